//! Signup wizard state machine and the field validation shared with sign-in.

pub(crate) mod validation;
pub(crate) mod wizard;
