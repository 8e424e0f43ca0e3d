//! Shared frontend utilities: HTTP helpers for the identity service, runtime
//! configuration, logging setup and build metadata.
//!
//! Configuration and logging are plain Rust and compile on every target so
//! they can be unit tested natively; the HTTP helpers need the browser.

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
pub(crate) mod build_info;
pub(crate) mod config;
pub(crate) mod logging;
