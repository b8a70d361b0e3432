//! Database entity models and create/update request types.

pub mod change_logs;
pub mod chat;
pub mod form_submissions;
pub mod integrations;
pub mod litters;
pub mod payment_sessions;
pub mod posts;
pub mod puppies;
pub mod site;
pub mod testimonials;
pub mod users;
