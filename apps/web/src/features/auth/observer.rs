//! Process-wide session state as seen by the rest of the client. It changes
//! only on gateway notifications, applied in delivery order; applying the same
//! session twice is a no-op.

use crate::features::auth::types::Session;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub session: Option<Session>,
    /// True until the first notification arrives, false forever after.
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            session: None,
            loading: true,
        }
    }
}

impl SessionState {
    /// Applies one notification. Returns `false` when nothing changed, so a
    /// repeated notification does not wake readers.
    pub fn apply(&mut self, session: Option<Session>) -> bool {
        if !self.loading && self.session == session {
            return false;
        }
        self.session = session;
        self.loading = false;
        true
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            uid: "uid-1".to_string(),
            display_name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            email_verified: true,
            last_sign_in_at: Some(1_700_000_000_000),
        }
    }

    #[test]
    fn starts_loading_without_a_session() {
        let state = SessionState::default();
        assert!(state.loading);
        assert!(!state.is_authenticated());
    }

    #[test]
    fn first_notification_ends_loading_even_when_signed_out() {
        let mut state = SessionState::default();

        assert!(state.apply(None));

        assert!(!state.loading);
        assert_eq!(state.session, None);
    }

    #[test]
    fn loading_never_returns_after_first_notification() {
        let mut state = SessionState::default();
        state.apply(Some(session()));
        state.apply(None);
        state.apply(Some(session()));

        assert!(!state.loading);
        assert!(state.is_authenticated());
    }

    #[test]
    fn repeated_notification_is_a_no_op() {
        let mut state = SessionState::default();
        assert!(state.apply(Some(session())));
        assert!(!state.apply(Some(session())));
    }
}
