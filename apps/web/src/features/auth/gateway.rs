//! Capability interface of the external identity gateway. Credential checks,
//! token issuance and session persistence all happen behind it.

use crate::features::auth::{
    errors::GatewayError,
    hub::{SessionStream, Subscription},
    types::{ProfileUpdate, Session},
};

pub(crate) trait IdentityGateway {
    /// Subscribes to session changes, including the initial resolution.
    /// Dropping or consuming the returned [`Subscription`] unsubscribes.
    fn observe_session(&self) -> (Subscription, SessionStream);

    async fn register_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, GatewayError>;

    async fn sign_in_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, GatewayError>;

    async fn sign_in_with_federated_provider(&self) -> Result<Session, GatewayError>;

    async fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<(), GatewayError>;

    async fn send_verification_email(&self, session: &Session) -> Result<(), GatewayError>;

    async fn sign_out(&self) -> Result<(), GatewayError>;
}
