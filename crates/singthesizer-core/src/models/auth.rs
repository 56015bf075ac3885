use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginData {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterData {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("Username and password are required.")]
    MissingCredentials,

    #[error("Passwords do not match.")]
    PasswordMismatch,
}

impl LoginData {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), CredentialsError> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(CredentialsError::MissingCredentials);
        }
        Ok(())
    }
}

impl RegisterData {
    /// Checked before any network call. Field rules beyond presence and the
    /// password match are left to the backend.
    pub fn validate(&self) -> Result<(), CredentialsError> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(CredentialsError::MissingCredentials);
        }
        if self.password != self.password_confirm {
            return Err(CredentialsError::PasswordMismatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(password: &str, confirm: &str) -> RegisterData {
        RegisterData {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: password.to_string(),
            password_confirm: confirm.to_string(),
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert!(LoginData::new("alice", "secret").validate().is_ok());
        assert_eq!(
            LoginData::new("  ", "secret").validate(),
            Err(CredentialsError::MissingCredentials)
        );
        assert_eq!(
            LoginData::new("alice", "").validate(),
            Err(CredentialsError::MissingCredentials)
        );
    }

    #[test]
    fn test_register_password_mismatch() {
        assert!(register("hunter22", "hunter22").validate().is_ok());
        let err = register("hunter22", "hunter23").validate().unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match.");
    }

    #[test]
    fn test_register_serializes_confirm_field() {
        let json = serde_json::to_value(register("a", "a")).unwrap();
        assert_eq!(json["password_confirm"], "a");
        assert_eq!(json["email"], "alice@example.com");
    }
}
