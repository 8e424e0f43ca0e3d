//! Request and response payloads for the Identity Toolkit REST API, plus the
//! account record persisted in browser storage. Token fields must never be
//! logged or shown.

use crate::features::auth::{errors::GatewayError, types::Session};
use serde::{Deserialize, Serialize};
use url::Url;

const IDENTITY_TOOLKIT_BASE: &str = "https://identitytoolkit.googleapis.com/v1/";
const SECURE_TOKEN_BASE: &str = "https://securetoken.googleapis.com/v1/";

/// Builds an Identity Toolkit URL such as `accounts:signUp?key=...`.
pub fn identity_toolkit_url(method: &str, api_key: &str) -> Result<String, GatewayError> {
    endpoint(IDENTITY_TOOLKIT_BASE, method, api_key)
}

/// Builds the secure token (refresh) URL.
pub fn secure_token_url(api_key: &str) -> Result<String, GatewayError> {
    endpoint(SECURE_TOKEN_BASE, "token", api_key)
}

fn endpoint(base: &str, method: &str, api_key: &str) -> Result<String, GatewayError> {
    // `accounts:signUp` alone would parse as a URL with an `accounts` scheme.
    let mut url = Url::parse(base)
        .and_then(|base| base.join(&format!("./{method}")))
        .map_err(|err| GatewayError::other(format!("Invalid endpoint: {err}")))?;
    url.query_pairs_mut().append_pair("key", api_key);
    Ok(url.into())
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub return_secure_token: bool,
}

/// Token bundle returned by sign-up, sign-in and IdP sign-in.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub id_token: String,
    pub refresh_token: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdTokenRequest<'a> {
    pub id_token: &'a str,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest<'a> {
    pub id_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<&'a str>,
    pub return_secure_token: bool,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OobCodeRequest<'a> {
    pub request_type: &'static str,
    pub id_token: &'a str,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthUriRequest<'a> {
    pub provider_id: &'a str,
    pub continue_uri: &'a str,
    pub custom_parameter: CustomParameters,
}

#[derive(Clone, Debug, Serialize)]
pub struct CustomParameters {
    pub prompt: &'static str,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthUriResponse {
    pub auth_uri: String,
    pub session_id: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdpSignInRequest<'a> {
    pub request_uri: &'a str,
    pub session_id: &'a str,
    pub return_secure_token: bool,
    pub return_idp_credential: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub grant_type: &'static str,
    pub refresh_token: &'a str,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RefreshResponse {
    pub id_token: String,
    pub refresh_token: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub users: Vec<AccountInfo>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub local_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Milliseconds since the epoch, encoded as a string.
    #[serde(default)]
    pub last_login_at: Option<String>,
}

impl AccountInfo {
    pub fn into_session(self) -> Session {
        Session {
            uid: self.local_id,
            display_name: self.display_name.filter(|name| !name.trim().is_empty()),
            email: self.email.filter(|email| !email.trim().is_empty()),
            email_verified: self.email_verified,
            last_sign_in_at: self
                .last_login_at
                .as_deref()
                .and_then(|value| value.trim().parse().ok()),
        }
    }
}

impl LookupResponse {
    /// The single account the lookup was made for.
    pub fn into_session(self) -> Result<Session, GatewayError> {
        self.users
            .into_iter()
            .next()
            .map(AccountInfo::into_session)
            .ok_or_else(|| GatewayError::from_rest_message("USER_NOT_FOUND"))
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

impl ErrorEnvelope {
    /// Classifies an error response body; unparseable bodies become `Other`.
    pub fn classify(body: &str) -> GatewayError {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => GatewayError::from_rest_message(&envelope.error.message),
            Err(_) => GatewayError::other(body.trim().chars().take(200).collect::<String>()),
        }
    }
}

/// Signed-in account persisted between page loads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAccount {
    pub session: Session,
    pub id_token: String,
    pub refresh_token: String,
}
