//! Browser implementation of the identity gateway on top of the Identity
//! Toolkit REST API. The signed-in account (profile plus tokens) lives in
//! `localStorage` so a reload resolves to the same session; every change is
//! published through the [`SessionHub`].

use crate::app_lib::{api::post_json, config::AppConfig};
use crate::features::auth::{
    epoch::SessionEpoch,
    errors::{GatewayError, GatewayErrorKind},
    gateway::IdentityGateway,
    hub::{SessionHub, SessionStream, Subscription},
    popup::{CALLBACK_PATH, Popup, close_on_error},
    rest::{
        CreateAuthUriRequest, CreateAuthUriResponse, CustomParameters, IdTokenRequest,
        IdpSignInRequest, LookupResponse, OobCodeRequest, PasswordRequest, RefreshRequest,
        RefreshResponse, StoredAccount, TokenResponse, UpdateProfileRequest, identity_toolkit_url,
        secure_token_url,
    },
    types::{ProfileUpdate, Session},
};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

const CLIENT_VERSION: &str = concat!("gatehouse-web/", env!("CARGO_PKG_VERSION"));
const FEDERATED_PROVIDER: &str = "google.com";
const STORAGE_KEY: &str = "gatehouse:account";

#[derive(Clone)]
pub struct FirebaseGateway {
    config: Arc<AppConfig>,
    hub: SessionHub,
    account: Arc<Mutex<Option<StoredAccount>>>,
    epoch: SessionEpoch,
}

impl FirebaseGateway {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            hub: SessionHub::new(),
            account: Arc::new(Mutex::new(None)),
            epoch: SessionEpoch::new(),
        }
    }

    fn account(&self) -> MutexGuard<'_, Option<StoredAccount>> {
        self.account.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolves the persisted account and publishes the initial state. A
    /// rejected token is refreshed once; if the account still cannot be
    /// confirmed it is forgotten. When the service is unreachable the stored
    /// profile is trusted so an offline reload keeps the user signed in.
    /// A sign-in or sign-out that lands while the lookup is in flight wins.
    pub async fn resolve_initial(&self) {
        let Some(stored) = storage::load(STORAGE_KEY) else {
            debug!("no persisted account");
            self.hub.publish(None);
            return;
        };

        let token = self.epoch.begin();
        let confirmed = self.confirm(stored.clone()).await;
        if !self.epoch.is_current(token) {
            debug!("account changed during initial resolution; discarding result");
            return;
        }

        match confirmed {
            Ok(account) => {
                info!("restored persisted session");
                let session = account.session.clone();
                self.persist(Some(account));
                self.hub.publish(Some(session));
            }
            Err(err) if err.kind == GatewayErrorKind::NetworkRequestFailed => {
                warn!(kind = %err.kind, "identity service unreachable; using persisted session");
                let session = stored.session.clone();
                *self.account() = Some(stored);
                self.hub.publish(Some(session));
            }
            Err(err) => {
                info!(kind = %err.kind, "persisted session is no longer valid");
                self.persist(None);
                self.hub.publish(None);
            }
        }
    }

    async fn confirm(&self, stored: StoredAccount) -> Result<StoredAccount, GatewayError> {
        match self.lookup(&stored.id_token).await {
            Ok(session) => Ok(StoredAccount { session, ..stored }),
            Err(err) if err.kind == GatewayErrorKind::NetworkRequestFailed => Err(err),
            Err(err) => {
                debug!(kind = %err.kind, "id token rejected; refreshing");
                let refreshed = self.refresh(&stored.refresh_token).await?;
                let session = self.lookup(&refreshed.id_token).await?;
                Ok(StoredAccount {
                    session,
                    id_token: refreshed.id_token,
                    refresh_token: refreshed.refresh_token,
                })
            }
        }
    }

    async fn call<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        debug!(method, "identity toolkit call");
        let url = identity_toolkit_url(method, &self.config.api_key)?;
        post_json(&url, body, &self.headers()).await
    }

    fn headers(&self) -> [(&str, &str); 2] {
        [
            ("X-Client-Version", CLIENT_VERSION),
            ("X-Firebase-gmpid", self.config.app_id.as_str()),
        ]
    }

    async fn lookup(&self, id_token: &str) -> Result<Session, GatewayError> {
        self.call::<_, LookupResponse>("accounts:lookup", &IdTokenRequest { id_token })
            .await?
            .into_session()
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, GatewayError> {
        debug!("refreshing id token");
        let url = secure_token_url(&self.config.api_key)?;
        let body = RefreshRequest {
            grant_type: "refresh_token",
            refresh_token,
        };
        post_json(&url, &body, &self.headers()).await
    }

    /// Turns freshly issued tokens into the current session.
    async fn establish(&self, tokens: TokenResponse) -> Result<Session, GatewayError> {
        let session = self.lookup(&tokens.id_token).await?;
        self.persist(Some(StoredAccount {
            session: session.clone(),
            id_token: tokens.id_token,
            refresh_token: tokens.refresh_token,
        }));
        self.hub.publish(Some(session.clone()));
        Ok(session)
    }

    /// Stores `account` and advances the epoch, so an initial resolution
    /// still in flight discards its result.
    fn persist(&self, account: Option<StoredAccount>) {
        self.epoch.advance();
        match &account {
            Some(account) => storage::save(STORAGE_KEY, account),
            None => storage::clear(STORAGE_KEY),
        }
        *self.account() = account;
    }

    fn id_token_for(&self, session: &Session) -> Result<String, GatewayError> {
        self.account()
            .as_ref()
            .filter(|account| account.session.uid == session.uid)
            .map(|account| account.id_token.clone())
            .ok_or_else(|| GatewayError::from_rest_message("USER_NOT_FOUND"))
    }

    fn callback_origin() -> Result<String, GatewayError> {
        web_sys::window()
            .and_then(|window| window.location().origin().ok())
            .ok_or_else(|| GatewayError::other("No browser window available."))
    }
}

impl IdentityGateway for FirebaseGateway {
    fn observe_session(&self) -> (Subscription, SessionStream) {
        self.hub.subscribe()
    }

    async fn register_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, GatewayError> {
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let tokens: TokenResponse = self.call("accounts:signUp", &body).await?;
        info!("account created");
        self.establish(tokens).await
    }

    async fn sign_in_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, GatewayError> {
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let tokens: TokenResponse = self.call("accounts:signInWithPassword", &body).await?;
        info!("signed in with password");
        self.establish(tokens).await
    }

    async fn sign_in_with_federated_provider(&self) -> Result<Session, GatewayError> {
        let origin = Self::callback_origin()?;
        let popup = Popup::open()?;
        let continue_uri = format!("{origin}{CALLBACK_PATH}");
        let request = CreateAuthUriRequest {
            provider_id: FEDERATED_PROVIDER,
            continue_uri: &continue_uri,
            custom_parameter: CustomParameters {
                prompt: "select_account",
            },
        };
        let auth_uri = close_on_error(
            self.call::<_, CreateAuthUriResponse>("accounts:createAuthUri", &request)
                .await,
            || popup.close(),
        )?;
        close_on_error(popup.navigate(&auth_uri.auth_uri), || popup.close())?;
        let request_uri = popup.wait_for_callback(&origin).await?;

        let body = IdpSignInRequest {
            request_uri: &request_uri,
            session_id: &auth_uri.session_id,
            return_secure_token: true,
            return_idp_credential: true,
        };
        let tokens: TokenResponse = self.call("accounts:signInWithIdp", &body).await?;
        info!(provider = FEDERATED_PROVIDER, "signed in with federated provider");
        self.establish(tokens).await
    }

    async fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<(), GatewayError> {
        let id_token = self.id_token_for(session)?;
        let body = UpdateProfileRequest {
            id_token: &id_token,
            display_name: update.display_name.as_deref(),
            return_secure_token: false,
        };
        self.call::<_, serde_json::Value>("accounts:update", &body)
            .await?;
        debug!("profile updated");

        let updated = {
            let mut guard = self.account();
            let Some(account) = guard.as_mut() else {
                return Ok(());
            };
            if let Some(name) = &update.display_name {
                account.session.display_name = Some(name.clone());
            }
            account.clone()
        };
        let session = updated.session.clone();
        self.persist(Some(updated));
        self.hub.publish(Some(session));
        Ok(())
    }

    async fn send_verification_email(&self, session: &Session) -> Result<(), GatewayError> {
        let id_token = self.id_token_for(session)?;
        let body = OobCodeRequest {
            request_type: "VERIFY_EMAIL",
            id_token: &id_token,
        };
        self.call::<_, serde_json::Value>("accounts:sendOobCode", &body)
            .await?;
        info!("verification email requested");
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), GatewayError> {
        self.persist(None);
        info!("signed out");
        self.hub.publish(None);
        Ok(())
    }
}

mod storage {
    use crate::features::auth::rest::StoredAccount;
    use tracing::warn;
    use web_sys::Storage;

    fn local_storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    pub fn load(key: &str) -> Option<StoredAccount> {
        let raw = local_storage()?.get_item(key).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(account) => Some(account),
            Err(err) => {
                warn!(%err, "discarding unreadable persisted account");
                clear(key);
                None
            }
        }
    }

    pub fn save(key: &str, account: &StoredAccount) {
        let Some(storage) = local_storage() else {
            warn!("local storage unavailable; session will not survive a reload");
            return;
        };
        let saved = serde_json::to_string(account)
            .ok()
            .is_some_and(|raw| storage.set_item(key, &raw).is_ok());
        if !saved {
            warn!("failed to persist account");
        }
    }

    pub fn clear(key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}
