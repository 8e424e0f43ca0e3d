//! Identity gateway error classification and the user-facing message mapping.
//! Views only ever see the mapped string; the structured error stops at the
//! auth flow boundary.

use std::fmt;
use thiserror::Error;

const GENERIC_MESSAGE: &str = "Unexpected authentication error. Please try again.";

/// Error kinds reported by the identity gateway. `Other` keeps the raw code for
/// anything this client does not recognize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GatewayErrorKind {
    EmailAlreadyInUse,
    InvalidEmail,
    WeakPassword,
    WrongPassword,
    UserNotFound,
    InvalidCredential,
    TooManyRequests,
    UserDisabled,
    PopupClosedByUser,
    PopupBlocked,
    NetworkRequestFailed,
    ConfigurationNotFound,
    InvalidApiKey,
    Other(String),
}

/// Coarse error taxonomy used for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad input, wrong secret or duplicate account.
    Credential,
    /// Cancelled or blocked interactive flow.
    Interaction,
    /// Network or configuration failure.
    Transport,
}

impl GatewayErrorKind {
    /// Parses a client-style code such as `auth/wrong-password` or `wrong-password`.
    #[cfg(test)]
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        let code = code.strip_prefix("auth/").unwrap_or(code);
        match code {
            "email-already-in-use" => Self::EmailAlreadyInUse,
            "invalid-email" => Self::InvalidEmail,
            "weak-password" => Self::WeakPassword,
            "wrong-password" => Self::WrongPassword,
            "user-not-found" => Self::UserNotFound,
            "invalid-credential" => Self::InvalidCredential,
            "too-many-requests" => Self::TooManyRequests,
            "user-disabled" => Self::UserDisabled,
            "popup-closed-by-user" => Self::PopupClosedByUser,
            "popup-blocked" => Self::PopupBlocked,
            "network-request-failed" => Self::NetworkRequestFailed,
            "configuration-not-found" => Self::ConfigurationNotFound,
            "invalid-api-key" => Self::InvalidApiKey,
            _ => Self::Other(code.to_string()),
        }
    }

    /// Parses the `error.message` field of an Identity Toolkit REST error body.
    /// Messages may carry a detail suffix, e.g. `WEAK_PASSWORD : Password should be ...`.
    pub fn from_rest_message(message: &str) -> Self {
        let message = message.trim();
        if message.starts_with("API key not valid") {
            return Self::InvalidApiKey;
        }
        let code = message.split(" : ").next().unwrap_or(message).trim();
        match code {
            "EMAIL_EXISTS" => Self::EmailAlreadyInUse,
            "INVALID_EMAIL" | "MISSING_EMAIL" => Self::InvalidEmail,
            "WEAK_PASSWORD" => Self::WeakPassword,
            "INVALID_PASSWORD" | "MISSING_PASSWORD" => Self::WrongPassword,
            "EMAIL_NOT_FOUND" | "USER_NOT_FOUND" => Self::UserNotFound,
            "INVALID_LOGIN_CREDENTIALS" | "INVALID_IDP_RESPONSE" => Self::InvalidCredential,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => Self::TooManyRequests,
            "USER_DISABLED" => Self::UserDisabled,
            "CONFIGURATION_NOT_FOUND" => Self::ConfigurationNotFound,
            "INVALID_API_KEY" => Self::InvalidApiKey,
            _ => Self::Other(code.to_string()),
        }
    }

    /// Client-style code for this kind, used in logs.
    pub fn code(&self) -> &str {
        match self {
            Self::EmailAlreadyInUse => "email-already-in-use",
            Self::InvalidEmail => "invalid-email",
            Self::WeakPassword => "weak-password",
            Self::WrongPassword => "wrong-password",
            Self::UserNotFound => "user-not-found",
            Self::InvalidCredential => "invalid-credential",
            Self::TooManyRequests => "too-many-requests",
            Self::UserDisabled => "user-disabled",
            Self::PopupClosedByUser => "popup-closed-by-user",
            Self::PopupBlocked => "popup-blocked",
            Self::NetworkRequestFailed => "network-request-failed",
            Self::ConfigurationNotFound => "configuration-not-found",
            Self::InvalidApiKey => "invalid-api-key",
            Self::Other(code) => code,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::PopupClosedByUser | Self::PopupBlocked => ErrorClass::Interaction,
            Self::NetworkRequestFailed | Self::ConfigurationNotFound | Self::InvalidApiKey => {
                ErrorClass::Transport
            }
            Self::EmailAlreadyInUse
            | Self::InvalidEmail
            | Self::WeakPassword
            | Self::WrongPassword
            | Self::UserNotFound
            | Self::InvalidCredential
            | Self::TooManyRequests
            | Self::UserDisabled
            | Self::Other(_) => ErrorClass::Credential,
        }
    }
}

impl fmt::Display for GatewayErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.code())
    }
}

/// Failure reported by an identity gateway call.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    /// The gateway's own description, shown when the kind is unrecognized.
    pub message: String,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::NetworkRequestFailed, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(GatewayErrorKind::Other("unknown".to_string()), message)
    }

    /// Builds an error from a REST error message, keeping the message as the description.
    pub fn from_rest_message(message: &str) -> Self {
        Self::new(GatewayErrorKind::from_rest_message(message), message.trim())
    }

    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }
}

/// Maps a gateway error to the single form-level message shown to the user.
pub fn user_message(error: &GatewayError) -> String {
    let message = match error.kind {
        GatewayErrorKind::EmailAlreadyInUse => {
            "An account already exists for that email. Try signing in instead."
        }
        GatewayErrorKind::InvalidEmail => {
            "The email address is invalid. Please double-check and try again."
        }
        GatewayErrorKind::WeakPassword => {
            "Please choose a stronger password (at least 6 characters)."
        }
        GatewayErrorKind::WrongPassword => {
            "That password is incorrect. Try again or reset your password."
        }
        GatewayErrorKind::UserNotFound => "Couldn't find an account with that email.",
        GatewayErrorKind::InvalidCredential => "The email or password is incorrect.",
        GatewayErrorKind::TooManyRequests => {
            "Too many attempts. Please wait a moment and try again."
        }
        GatewayErrorKind::UserDisabled => "This account has been disabled.",
        GatewayErrorKind::PopupClosedByUser => "The sign-in popup was closed before completing.",
        GatewayErrorKind::PopupBlocked => {
            "Your browser blocked the sign-in popup. Allow popups and try again."
        }
        GatewayErrorKind::NetworkRequestFailed => {
            "Network error while contacting the identity service. Check your connection and retry."
        }
        GatewayErrorKind::ConfigurationNotFound | GatewayErrorKind::InvalidApiKey => {
            "Authentication is not fully configured. Verify your API key and authorised domains."
        }
        GatewayErrorKind::Other(_) => {
            let own = error.message.trim();
            return if own.is_empty() {
                GENERIC_MESSAGE.to_string()
            } else {
                own.to_string()
            };
        }
    };
    message.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_password_and_unknown_account_have_distinct_messages() {
        let wrong = GatewayError::new(GatewayErrorKind::from_code("wrong-password"), "x");
        let missing = GatewayError::new(GatewayErrorKind::from_code("user-not-found"), "x");

        assert_ne!(user_message(&wrong), user_message(&missing));
        assert_eq!(
            user_message(&missing),
            "Couldn't find an account with that email."
        );
    }

    #[test]
    fn unrecognized_kind_falls_back_to_gateway_message() {
        let error = GatewayError::new(
            GatewayErrorKind::from_code("auth/quota-exceeded"),
            "Quota exceeded for this project.",
        );

        assert_eq!(
            error.kind,
            GatewayErrorKind::Other("quota-exceeded".to_string())
        );
        assert_eq!(user_message(&error), "Quota exceeded for this project.");
    }

    #[test]
    fn prefixed_and_bare_codes_parse_to_the_same_kind() {
        assert_eq!(
            GatewayErrorKind::from_code(" auth/user-disabled "),
            GatewayErrorKind::from_code("user-disabled")
        );
        assert_eq!(
            GatewayErrorKind::from_code("auth/app-deleted").code(),
            "app-deleted"
        );
    }

    #[test]
    fn unclassified_error_displays_its_code_and_message() {
        let error = GatewayError::other("Failed to decode response: eof");

        assert_eq!(error.kind, GatewayErrorKind::Other("unknown".to_string()));
        assert_eq!(
            error.to_string(),
            "unknown: Failed to decode response: eof"
        );
        assert_eq!(user_message(&error), "Failed to decode response: eof");
    }

    #[test]
    fn unrecognized_kind_without_message_uses_generic_text() {
        let error = GatewayError::other("   ");
        assert_eq!(user_message(&error), GENERIC_MESSAGE);
    }

    #[test]
    fn every_named_kind_maps_to_its_own_message() {
        let kinds = [
            "email-already-in-use",
            "invalid-email",
            "weak-password",
            "wrong-password",
            "user-not-found",
            "popup-closed-by-user",
            "popup-blocked",
            "network-request-failed",
            "configuration-not-found",
        ];
        let messages: Vec<String> = kinds
            .iter()
            .map(|code| user_message(&GatewayError::new(GatewayErrorKind::from_code(code), "")))
            .collect();

        for (index, message) in messages.iter().enumerate() {
            assert!(!message.is_empty(), "{} has no message", kinds[index]);
            for other in &messages[index + 1..] {
                assert_ne!(message, other);
            }
        }
    }

    #[test]
    fn misconfiguration_kinds_share_a_message() {
        let missing = GatewayError::new(GatewayErrorKind::ConfigurationNotFound, "");
        let bad_key = GatewayError::new(GatewayErrorKind::InvalidApiKey, "");
        assert_eq!(user_message(&missing), user_message(&bad_key));
    }

    #[test]
    fn rest_messages_are_classified() {
        assert_eq!(
            GatewayErrorKind::from_rest_message("EMAIL_EXISTS"),
            GatewayErrorKind::EmailAlreadyInUse
        );
        assert_eq!(
            GatewayErrorKind::from_rest_message(
                "WEAK_PASSWORD : Password should be at least 6 characters"
            ),
            GatewayErrorKind::WeakPassword
        );
        assert_eq!(
            GatewayErrorKind::from_rest_message("INVALID_PASSWORD"),
            GatewayErrorKind::WrongPassword
        );
        assert_eq!(
            GatewayErrorKind::from_rest_message("EMAIL_NOT_FOUND"),
            GatewayErrorKind::UserNotFound
        );
        assert_eq!(
            GatewayErrorKind::from_rest_message("API key not valid. Please pass a valid API key."),
            GatewayErrorKind::InvalidApiKey
        );
        assert_eq!(
            GatewayErrorKind::from_rest_message("OPERATION_NOT_ALLOWED"),
            GatewayErrorKind::Other("OPERATION_NOT_ALLOWED".to_string())
        );
    }

    #[test]
    fn kinds_are_classified_into_the_taxonomy() {
        assert_eq!(
            GatewayErrorKind::WrongPassword.class(),
            ErrorClass::Credential
        );
        assert_eq!(
            GatewayErrorKind::PopupBlocked.class(),
            ErrorClass::Interaction
        );
        assert_eq!(
            GatewayErrorKind::NetworkRequestFailed.class(),
            ErrorClass::Transport
        );
        assert_eq!(GatewayErrorKind::from_code("invalid-api-key").code(), "invalid-api-key");
    }
}
