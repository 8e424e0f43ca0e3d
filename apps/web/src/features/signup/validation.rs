//! Field-level validation rules for the signup wizard and the sign-in form.
//! These run before any gateway call and only ever produce field-scoped errors.

use regex::Regex;
use std::{collections::BTreeMap, sync::LazyLock};

/// Minimum password length accepted by the identity service.
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    DisplayName,
    Email,
    Password,
    ConfirmPassword,
}

pub type FieldErrors = BTreeMap<Field, &'static str>;

/// Basic email shape: something, `@`, something, `.`, something, no whitespace.
static EMAIL_SHAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

pub fn valid_email(email: &str) -> bool {
    EMAIL_SHAPE.as_ref().is_some_and(|re| re.is_match(email))
}

pub fn required(value: &str, message: &'static str) -> Option<&'static str> {
    value.trim().is_empty().then_some(message)
}

pub fn check_first_name(value: &str) -> Option<&'static str> {
    required(value, "First name is required")
}

pub fn check_last_name(value: &str) -> Option<&'static str> {
    required(value, "Last name is required")
}

pub fn check_email(value: &str) -> Option<&'static str> {
    required(value, "Email is required").or_else(|| {
        (!valid_email(value.trim())).then_some("Enter a valid email address")
    })
}

pub fn check_password(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        Some("Password is required")
    } else if value.chars().count() < MIN_PASSWORD_LENGTH {
        Some("Password must be at least 6 characters")
    } else {
        None
    }
}

pub fn check_confirm_password(password: &str, confirm: &str) -> Option<&'static str> {
    (password != confirm).then_some("Passwords must match")
}

/// Sign-in form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(message) = required(&self.email, "Email is required") {
            errors.insert(Field::Email, message);
        }
        if let Some(message) = check_password(&self.password) {
            errors.insert(Field::Password, message);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(valid_email("a@b.com"));
        assert!(valid_email("first.last+tag@sub.example.org"));
        assert!(!valid_email("a@b"));
        assert!(!valid_email("a b@c.com"));
        assert!(!valid_email("@b.com"));
        assert!(!valid_email("a@@b.com"));
    }

    #[test]
    fn shared_email_pattern_is_valid() {
        assert!(EMAIL_SHAPE.is_some());
        for _ in 0..3 {
            assert!(valid_email("ada@example.com"));
            assert!(!valid_email("ada@example"));
        }
    }

    #[test]
    fn email_checks_presence_before_shape() {
        assert_eq!(check_email(""), Some("Email is required"));
        assert_eq!(check_email("   "), Some("Email is required"));
        assert_eq!(check_email("nope"), Some("Enter a valid email address"));
        assert_eq!(check_email("a@b.com"), None);
    }

    #[test]
    fn password_length_counts_characters() {
        assert_eq!(check_password(""), Some("Password is required"));
        assert_eq!(
            check_password("abcde"),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(check_password("abcdef"), None);
        assert_eq!(check_password("ééééé"), Some("Password must be at least 6 characters"));
    }

    #[test]
    fn confirm_password_must_match() {
        assert_eq!(
            check_confirm_password("abcdef", "abcxyz"),
            Some("Passwords must match")
        );
        assert_eq!(check_confirm_password("abcdef", "abcdef"), None);
    }

    #[test]
    fn whitespace_only_names_are_missing() {
        assert_eq!(check_first_name("  "), Some("First name is required"));
        assert_eq!(check_last_name("Lovelace"), None);
    }

    #[test]
    fn login_form_requires_both_fields() {
        let errors = LoginForm::default().validate();
        assert_eq!(errors.get(&Field::Email), Some(&"Email is required"));
        assert_eq!(errors.get(&Field::Password), Some(&"Password is required"));

        let form = LoginForm {
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(form.validate().is_empty());
    }
}
