//! Domain-level frontend features and their shared logic. Routes import these
//! modules to keep view code focused on rendering.

pub(crate) mod auth;
pub(crate) mod dashboard;
pub(crate) mod signup;
