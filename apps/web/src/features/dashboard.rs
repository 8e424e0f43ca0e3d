//! Presentation values for the dashboard derived from the session and the
//! consumed verification prompt.

use crate::features::auth::types::{Session, VerificationPrompt};

const FALLBACK_NAME: &str = "Explorer";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Greeting {
    pub display_name: String,
    pub first_name: String,
    pub initial: String,
}

/// Session display name, else the prompt's name, else the email's local part.
pub fn greeting(session: Option<&Session>, prompt: Option<&VerificationPrompt>) -> Greeting {
    let display_name = session
        .and_then(|session| session.display_name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .or_else(|| {
            prompt
                .map(|prompt| prompt.display_name.trim())
                .filter(|name| !name.is_empty())
        })
        .or_else(|| {
            session
                .and_then(|session| session.email.as_deref())
                .and_then(|email| email.split('@').next())
                .filter(|local| !local.is_empty())
        })
        .unwrap_or(FALLBACK_NAME)
        .to_string();

    let first_name = display_name
        .split_whitespace()
        .next()
        .unwrap_or(&display_name)
        .to_string();
    let initial = display_name
        .chars()
        .next()
        .map_or_else(|| "U".to_string(), |c| c.to_uppercase().collect());

    Greeting {
        display_name,
        first_name,
        initial,
    }
}

/// The banner shows only for a consumed prompt and an unverified email.
pub fn show_verification_banner(session: Option<&Session>, prompt: Option<&VerificationPrompt>) -> bool {
    prompt.is_some() && !session.is_some_and(|session| session.email_verified)
}

pub fn email_status(session: Option<&Session>) -> &'static str {
    if session.is_some_and(|session| session.email_verified) {
        "Verified"
    } else {
        "Pending verification"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(display_name: Option<&str>, email: Option<&str>, verified: bool) -> Session {
        Session {
            uid: "uid-1".to_string(),
            display_name: display_name.map(str::to_string),
            email: email.map(str::to_string),
            email_verified: verified,
            last_sign_in_at: None,
        }
    }

    fn prompt(display_name: &str) -> VerificationPrompt {
        VerificationPrompt {
            email: "a@b.com".to_string(),
            display_name: display_name.to_string(),
        }
    }

    #[test]
    fn greeting_prefers_session_display_name() {
        let session = session(Some(" Ada Lovelace "), Some("ada@example.com"), false);
        let greeting = greeting(Some(&session), Some(&prompt("Countess")));

        assert_eq!(greeting.display_name, "Ada Lovelace");
        assert_eq!(greeting.first_name, "Ada");
        assert_eq!(greeting.initial, "A");
    }

    #[test]
    fn greeting_falls_back_to_prompt_then_email() {
        let session = session(None, Some("grace@example.com"), false);

        assert_eq!(
            greeting(Some(&session), Some(&prompt("Countess"))).display_name,
            "Countess"
        );
        let from_email = greeting(Some(&session), None);
        assert_eq!(from_email.display_name, "grace");
        assert_eq!(from_email.initial, "G");
    }

    #[test]
    fn greeting_without_any_name_uses_fallback() {
        let greeting = greeting(None, None);
        assert_eq!(greeting.display_name, "Explorer");
        assert_eq!(greeting.first_name, "Explorer");
    }

    #[test]
    fn banner_needs_prompt_and_unverified_email() {
        let unverified = session(None, Some("a@b.com"), false);
        let verified = session(None, Some("a@b.com"), true);

        assert!(show_verification_banner(Some(&unverified), Some(&prompt("Ada"))));
        assert!(!show_verification_banner(Some(&verified), Some(&prompt("Ada"))));
        assert!(!show_verification_banner(Some(&unverified), None));
    }

    #[test]
    fn email_status_labels() {
        assert_eq!(email_status(Some(&session(None, None, true))), "Verified");
        assert_eq!(email_status(None), "Pending verification");
    }
}
