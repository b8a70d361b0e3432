//! Role checks for protected routes.

use crate::{
    api::models::users::{CurrentUser, Role},
    errors::{Error, Result},
    types::{Operation, Resource},
};

/// Require the user to be an admin.
pub fn require_admin(user: &CurrentUser, action: Operation, resource: Resource) -> Result<()> {
    if user.role == Role::Admin {
        Ok(())
    } else {
        Err(Error::InsufficientPermissions { action, resource })
    }
}

/// Require the user to be staff (admin or editor).
///
/// Editors manage content (puppies, litters, posts, testimonials, submissions)
/// but not users, integrations, or payments.
pub fn require_staff(user: &CurrentUser, action: Operation, resource: Resource) -> Result<()> {
    match user.role {
        Role::Admin | Role::Editor => Ok(()),
        Role::Customer => Err(Error::InsufficientPermissions { action, resource }),
    }
}

/// Require the user to either own the resource or be an admin.
pub fn require_self_or_admin(user: &CurrentUser, owner_id: uuid::Uuid, action: Operation, resource: Resource) -> Result<()> {
    if user.id == owner_id || user.role == Role::Admin {
        Ok(())
    } else {
        Err(Error::InsufficientPermissions { action, resource })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user_with_role(role: Role) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            role,
            display_name: None,
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&user_with_role(Role::Admin), Operation::Read, Resource::Users).is_ok());

        let result = require_admin(&user_with_role(Role::Editor), Operation::Read, Resource::Users);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().status_code(), axum::http::StatusCode::FORBIDDEN);

        assert!(require_admin(&user_with_role(Role::Customer), Operation::Read, Resource::Users).is_err());
    }

    #[test]
    fn test_require_staff() {
        assert!(require_staff(&user_with_role(Role::Admin), Operation::Update, Resource::Puppies).is_ok());
        assert!(require_staff(&user_with_role(Role::Editor), Operation::Update, Resource::Puppies).is_ok());
        assert!(require_staff(&user_with_role(Role::Customer), Operation::Update, Resource::Puppies).is_err());
    }

    #[test]
    fn test_require_self_or_admin() {
        let user = user_with_role(Role::Customer);

        // Own resource
        assert!(require_self_or_admin(&user, user.id, Operation::Read, Resource::Conversations).is_ok());

        // Someone else's resource
        assert!(require_self_or_admin(&user, Uuid::new_v4(), Operation::Read, Resource::Conversations).is_err());

        // Admin can access anyone's
        let admin = user_with_role(Role::Admin);
        assert!(require_self_or_admin(&admin, Uuid::new_v4(), Operation::Read, Resource::Conversations).is_ok());
    }
}
