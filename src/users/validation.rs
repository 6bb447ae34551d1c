use lazy_static::lazy_static;
use regex::Regex;

use crate::users::repo_types::User;

pub const USERNAME_MAX_CHARS: usize = 180;

/// Field validation of a user before it is staged.
pub trait Validator: Send + Sync {
    /// Human-readable violations; empty when the user is valid.
    fn validate(&self, user: &User) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UserValidator;

impl Validator for UserValidator {
    fn validate(&self, user: &User) -> Vec<String> {
        let mut errors = Vec::new();

        if user.email.trim().is_empty() {
            errors.push("Email should not be blank.".to_string());
        } else if !is_valid_email(&user.email) {
            errors.push("Email is not a valid email address.".to_string());
        }

        if user.username.trim().is_empty() {
            errors.push("Username should not be blank.".to_string());
        } else if user.username.chars().count() > USERNAME_MAX_CHARS {
            errors.push(format!(
                "Username cannot be longer than {USERNAME_MAX_CHARS} characters."
            ));
        }

        if let Some(password) = &user.password {
            if password.trim().is_empty() {
                errors.push("Password should not be blank.".to_string());
            }
        }

        errors
    }
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}
