//! Session and request types shared by the gateway, the observer and the views.
//! `Session` carries identity metadata only; gateway tokens never leave the
//! gateway implementation.

use serde::{Deserialize, Serialize};

/// The currently authenticated identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub email_verified: bool,
    /// Milliseconds since the Unix epoch.
    pub last_sign_in_at: Option<u64>,
}

/// Email/password registration request built by the signup wizard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
}

/// One-shot payload handed from a successful signup to the dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationPrompt {
    pub email: String,
    pub display_name: String,
}
