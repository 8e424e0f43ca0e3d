//! Route paths shared by views and guards.

pub use crate::features::auth::gate::{HOME_PATH as DASHBOARD, LOGIN_PATH as LOGIN};

pub const SIGNUP: &str = "/signup";
