//! Route guard decision for protected views, kept free of rendering so it can
//! be tested directly. The guard is UX only; the identity service owns access.

use crate::features::auth::observer::SessionState;
use url::form_urlencoded;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
/// Query parameter carrying the originally requested location to the sign-in view.
pub const RETURN_PARAM: &str = "from";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Session state is still resolving: show a placeholder, do not redirect.
    Placeholder,
    /// No session: replace history with the sign-in view.
    Redirect(LoginRedirect),
    /// Session present: render the protected content.
    Render,
}

/// Redirect to sign-in that remembers where the user was going.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginRedirect {
    pub from: String,
}

impl LoginRedirect {
    pub fn href(&self) -> String {
        let encoded: String = form_urlencoded::Serializer::new(String::new())
            .append_pair(RETURN_PARAM, &self.from)
            .finish();
        format!("{LOGIN_PATH}?{encoded}")
    }
}

/// Decides what a protected route shows for the current session state.
pub fn evaluate(state: &SessionState, requested: &str) -> GateDecision {
    if state.loading {
        GateDecision::Placeholder
    } else if state.is_authenticated() {
        GateDecision::Render
    } else {
        GateDecision::Redirect(LoginRedirect {
            from: requested.to_string(),
        })
    }
}

/// Post-login destination from the `from` parameter. Only local paths are
/// honoured; anything else goes home.
pub fn return_target(from: Option<&str>) -> String {
    match from.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => HOME_PATH.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::{
        epoch::SessionEpoch,
        hub::{SessionHub, SessionStream},
        types::Session,
    };
    use futures::{FutureExt, StreamExt};

    fn signed_out() -> SessionState {
        SessionState {
            session: None,
            loading: false,
        }
    }

    #[test]
    fn loading_renders_placeholder_without_redirect() {
        let state = SessionState::default();
        assert_eq!(evaluate(&state, "/"), GateDecision::Placeholder);
    }

    #[test]
    fn absent_session_redirects_to_login_preserving_path() {
        let decision = evaluate(&signed_out(), "/");

        let GateDecision::Redirect(redirect) = decision else {
            panic!("expected a redirect");
        };
        assert_eq!(redirect.from, "/");
        assert_eq!(redirect.href(), "/login?from=%2F");
    }

    #[test]
    fn present_session_renders_content() {
        let state = SessionState {
            session: Some(Session {
                uid: "uid-1".to_string(),
                display_name: None,
                email: None,
                email_verified: false,
                last_sign_in_at: None,
            }),
            loading: false,
        };
        assert_eq!(evaluate(&state, "/"), GateDecision::Render);
    }

    #[test]
    fn sign_out_while_viewing_redirects_on_reevaluation() {
        let mut state = SessionState::default();
        state.apply(Some(Session {
            uid: "uid-1".to_string(),
            display_name: None,
            email: None,
            email_verified: false,
            last_sign_in_at: None,
        }));
        assert_eq!(evaluate(&state, "/"), GateDecision::Render);

        state.apply(None);

        assert!(matches!(evaluate(&state, "/"), GateDecision::Redirect(_)));
    }

    fn account(uid: &str) -> Session {
        Session {
            uid: uid.to_string(),
            display_name: None,
            email: Some(format!("{uid}@example.com")),
            email_verified: true,
            last_sign_in_at: None,
        }
    }

    /// Applies every queued notification, the way the provider's loop does.
    fn drain(stream: &mut SessionStream, state: &mut SessionState) {
        while let Some(Some(session)) = stream.next().now_or_never() {
            state.apply(session);
        }
    }

    #[test]
    fn guard_follows_published_notifications() {
        let hub = SessionHub::new();
        let (_subscription, mut stream) = hub.subscribe();
        let mut state = SessionState::default();

        drain(&mut stream, &mut state);
        assert_eq!(evaluate(&state, "/reports"), GateDecision::Placeholder);

        hub.publish(Some(account("a")));
        drain(&mut stream, &mut state);
        assert_eq!(evaluate(&state, "/reports"), GateDecision::Render);

        hub.publish(None);
        drain(&mut stream, &mut state);
        assert_eq!(
            evaluate(&state, "/reports"),
            GateDecision::Redirect(LoginRedirect {
                from: "/reports".to_string()
            })
        );
    }

    #[test]
    fn observer_ends_at_the_last_published_session() {
        let hub = SessionHub::new();
        let (_subscription, mut stream) = hub.subscribe();
        let mut state = SessionState::default();

        hub.publish(Some(account("b")));
        hub.publish(Some(account("a")));
        drain(&mut stream, &mut state);

        assert_eq!(state.session, Some(account("a")));
        assert_eq!(hub.current(), Some(state.session.clone()));
    }

    #[test]
    fn stale_initial_resolution_is_not_published() {
        let hub = SessionHub::new();
        let epoch = SessionEpoch::new();
        let (_subscription, mut stream) = hub.subscribe();
        let mut state = SessionState::default();

        let resolution = epoch.begin();
        // A sign-in completes while the persisted account is still being confirmed.
        epoch.advance();
        hub.publish(Some(account("fresh")));
        if epoch.is_current(resolution) {
            hub.publish(Some(account("stale")));
        }
        drain(&mut stream, &mut state);

        assert_eq!(state.session, Some(account("fresh")));
        assert_eq!(hub.current(), Some(Some(account("fresh"))));
    }

    #[test]
    fn redirect_href_encodes_nested_query() {
        let redirect = LoginRedirect {
            from: "/reports?tab=2&x=1".to_string(),
        };
        assert_eq!(redirect.href(), "/login?from=%2Freports%3Ftab%3D2%26x%3D1");
    }

    #[test]
    fn return_target_only_accepts_local_paths() {
        assert_eq!(return_target(None), "/");
        assert_eq!(return_target(Some("/reports")), "/reports");
        assert_eq!(return_target(Some("//evil.example")), "/");
        assert_eq!(return_target(Some("https://evil.example")), "/");
        assert_eq!(return_target(Some("/\\evil.example")), "/");
        assert_eq!(return_target(Some("")), "/");
    }
}
