//! Auth operations used by the views. Each one calls the gateway and turns any
//! failure into the single user-facing message the form shows; structured
//! errors never cross this boundary.

use crate::features::auth::{
    errors::{GatewayError, user_message},
    gateway::IdentityGateway,
    types::{ProfileUpdate, Registration, Session},
};
use tracing::{debug, info, warn};

fn report(operation: &'static str, error: &GatewayError) -> String {
    info!(
        operation,
        kind = %error.kind,
        class = ?error.class(),
        "identity gateway call failed"
    );
    user_message(error)
}

/// Creates the account, sets its display name and requests a verification
/// email. The verification email is best effort and never fails the signup.
pub(crate) async fn register_with_email<G: IdentityGateway>(
    gateway: &G,
    registration: &Registration,
) -> Result<Session, String> {
    debug!("registering account");
    let mut session = gateway
        .register_with_credentials(&registration.email, &registration.password)
        .await
        .map_err(|err| report("register", &err))?;

    if let Some(display_name) = &registration.display_name {
        let update = ProfileUpdate {
            display_name: Some(display_name.clone()),
        };
        gateway
            .update_profile(&session, &update)
            .await
            .map_err(|err| report("update_profile", &err))?;
        session.display_name = Some(display_name.clone());
    }

    if !session.email_verified
        && let Err(err) = gateway.send_verification_email(&session).await
    {
        warn!(kind = %err.kind, "verification email was not sent");
    }

    Ok(session)
}

pub(crate) async fn sign_in_with_email<G: IdentityGateway>(
    gateway: &G,
    email: &str,
    password: &str,
) -> Result<Session, String> {
    debug!("signing in with password");
    gateway
        .sign_in_with_credentials(email.trim(), password)
        .await
        .map_err(|err| report("sign_in", &err))
}

pub(crate) async fn sign_in_with_federated<G: IdentityGateway>(
    gateway: &G,
) -> Result<Session, String> {
    debug!("signing in with federated provider");
    gateway
        .sign_in_with_federated_provider()
        .await
        .map_err(|err| report("federated_sign_in", &err))
}

pub(crate) async fn sign_out<G: IdentityGateway>(gateway: &G) -> Result<(), String> {
    debug!("signing out");
    gateway
        .sign_out()
        .await
        .map_err(|err| report("sign_out", &err))
}
