//! Auth feature module: the identity gateway seam, session notifications and
//! observer state, the route guard decision and the user-facing error mapping.
//! It touches security boundaries and must never log passwords or tokens.
//!
//! Flow Overview: the provider subscribes to the gateway and resolves the
//! persisted session once. Sign-in and signup call the gateway through
//! `flows`, then navigate. The gateway publishes every change before the call
//! returns, and the provider's subscription is the only writer of the
//! observer, so it always ends at the gateway's last notification.

pub(crate) mod epoch;
pub(crate) mod errors;
pub(crate) mod flows;
pub(crate) mod gate;
pub(crate) mod gateway;
pub(crate) mod hub;
pub(crate) mod observer;
pub(crate) mod popup;
pub(crate) mod prompt;
pub(crate) mod rest;
pub(crate) mod types;

#[cfg(target_arch = "wasm32")]
pub(crate) mod firebase;
#[cfg(target_arch = "wasm32")]
mod guards;
#[cfg(target_arch = "wasm32")]
pub(crate) mod state;

#[cfg(target_arch = "wasm32")]
pub(crate) use guards::RequireAuth;
