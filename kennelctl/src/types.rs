//! Common type definitions shared across the API and database layers.
//!
//! All entity IDs are UUIDs wrapped in type aliases. The [`Operation`] and
//! [`Resource`] enums are used for authorization error reporting.

use std::fmt;
use uuid::Uuid;

// Type aliases for IDs
pub type UserId = Uuid;
pub type PuppyId = Uuid;
pub type LitterId = Uuid;
pub type PostId = Uuid;
pub type TestimonialId = Uuid;
pub type SubmissionId = Uuid;
pub type IntegrationId = Uuid;
pub type PaymentSessionId = Uuid;
pub type ConversationId = Uuid;
pub type MessageId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

/// Operations that can be performed on resources, used in permission errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Read => write!(f, "read"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// Resources that can be operated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Puppies,
    Litters,
    BlogPosts,
    Testimonials,
    FormSubmissions,
    Integrations,
    Payments,
    Conversations,
    Site,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Users => "users",
            Resource::Puppies => "puppies",
            Resource::Litters => "litters",
            Resource::BlogPosts => "blog posts",
            Resource::Testimonials => "testimonials",
            Resource::FormSubmissions => "form submissions",
            Resource::Integrations => "integrations",
            Resource::Payments => "payments",
            Resource::Conversations => "conversations",
            Resource::Site => "site settings",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbrev_uuid() {
        let id: Uuid = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(abbrev_uuid(&id), "550e8400");
    }
}
