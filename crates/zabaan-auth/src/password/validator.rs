//! Email, name and password policy for account creation and login.

use validator::ValidateEmail;

use zabaan_core::config::AuthConfig;
use zabaan_core::error::AppError;

/// Trims and lowercases an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates credential fields against configured limits.
///
/// Lengths are measured in bytes, which is what the password hash and the
/// database columns care about.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    password_min_length: usize,
    password_max_length: usize,
    email_max_length: usize,
    name_max_length: usize,
}

impl PasswordPolicy {
    /// Creates a policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            password_min_length: config.password_min_length,
            password_max_length: config.password_max_length,
            email_max_length: config.email_max_length,
            name_max_length: config.name_max_length,
        }
    }

    /// Checks email shape.
    pub fn validate_email(&self, email: &str) -> Result<(), AppError> {
        let email = email.trim();
        if email.is_empty() || !email.validate_email() {
            return Err(AppError::validation("invalid email format"));
        }
        Ok(())
    }

    /// Checks email length.
    pub fn validate_email_length(&self, email: &str) -> Result<(), AppError> {
        if email.len() > self.email_max_length {
            return Err(AppError::validation("email too long"));
        }
        Ok(())
    }

    /// Checks a name field's length. `field` names it in the error.
    pub fn validate_name(&self, field: &str, value: &str) -> Result<(), AppError> {
        if value.len() > self.name_max_length {
            return Err(AppError::validation(format!("{field} too long")));
        }
        Ok(())
    }

    /// Requires the minimum length, the maximum length, and at least one
    /// letter and one digit.
    pub fn validate_password(&self, password: &str) -> Result<(), AppError> {
        if password.len() < self.password_min_length {
            return Err(self.weak_password());
        }

        if password.len() > self.password_max_length {
            return Err(AppError::validation(format!(
                "password must be at most {} characters",
                self.password_max_length
            )));
        }

        let has_letter = password.chars().any(char::is_alphabetic);
        let has_digit = password.chars().any(char::is_numeric);
        if !has_letter || !has_digit {
            return Err(self.weak_password());
        }

        Ok(())
    }

    fn weak_password(&self) -> AppError {
        AppError::validation(format!(
            "password must be at least {} characters and contain a letter and a number",
            self.password_min_length
        ))
    }
}
