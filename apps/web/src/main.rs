#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

#[cfg(target_arch = "wasm32")]
mod app;
#[path = "lib/mod.rs"]
mod app_lib;
#[cfg(target_arch = "wasm32")]
mod components;
mod features;
#[cfg(target_arch = "wasm32")]
mod routes;

#[cfg(target_arch = "wasm32")]
use crate::{
    app::App,
    app_lib::{
        build_info::git_commit_hash,
        config::{AppConfig, ConfigError},
    },
    features::auth::firebase::FirebaseGateway,
    routes::ConfigErrorPage,
};
#[cfg(target_arch = "wasm32")]
use leptos::prelude::*;

#[cfg(target_arch = "wasm32")]
pub fn main() {
    app_lib::logging::init();

    match AppConfig::load() {
        Ok(config) => {
            tracing::info!(
                project_id = %config.project_id,
                auth_domain = %config.auth_domain,
                commit = git_commit_hash(),
                "starting gatehouse web client"
            );
            tracing::debug!(
                storage_bucket = %config.storage_bucket,
                messaging_sender_id = %config.messaging_sender_id,
                measurement_id = config.measurement_id.as_deref().unwrap_or("-"),
                "identity gateway settings loaded"
            );
            let gateway = FirebaseGateway::new(config);
            mount_to_body(move || view! { <App gateway=gateway /> });
        }
        Err(err) => {
            tracing::error!(%err, "identity gateway is not configured");
            let ConfigError::Missing(missing) = err;
            mount_to_body(move || view! { <ConfigErrorPage missing=missing /> });
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
