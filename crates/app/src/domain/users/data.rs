//! Users Data

use crate::domain::users::{UsersServiceError, records::UserUuid};

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl NewUser {
    /// Reject blank names and addresses without a local part and domain.
    ///
    /// # Errors
    ///
    /// Returns [`UsersServiceError::InvalidData`] when a field is malformed.
    pub fn validate(&self) -> Result<(), UsersServiceError> {
        validate_profile(&self.name, &self.email)
    }
}

/// Replacement profile for an existing user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl UserUpdate {
    /// Same field rules as [`NewUser::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`UsersServiceError::InvalidData`] when a field is malformed.
    pub fn validate(&self) -> Result<(), UsersServiceError> {
        validate_profile(&self.name, &self.email)
    }
}

fn validate_profile(name: &str, email: &str) -> Result<(), UsersServiceError> {
    if name.trim().is_empty() {
        return Err(UsersServiceError::InvalidData);
    }

    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(UsersServiceError::InvalidData),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            uuid: UserUuid::new(),
            name: name.to_string(),
            email: email.to_string(),
            is_admin: false,
        }
    }

    #[test]
    fn accepts_a_plain_address() {
        assert!(new_user("Ada", "ada@example.com").validate().is_ok());
    }

    #[test]
    fn rejects_blank_names() {
        assert!(matches!(
            new_user("  ", "ada@example.com").validate(),
            Err(UsersServiceError::InvalidData)
        ));
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["ada", "@example.com", "ada@localhost", ""] {
            assert!(
                new_user("Ada", email).validate().is_err(),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn updates_follow_the_same_rules() {
        let update = UserUpdate {
            name: "Ada".to_string(),
            email: "ada@example".to_string(),
            is_admin: true,
        };

        assert!(matches!(update.validate(), Err(UsersServiceError::InvalidData)));

        let update = UserUpdate {
            email: "ada@example.com".to_string(),
            ..update
        };

        assert!(update.validate().is_ok());
    }
}
