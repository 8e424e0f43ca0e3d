//! Auth session state and context for the frontend. The provider subscribes to
//! the gateway's session notifications once on mount, starts the initial
//! resolution, and exposes derived signals for guards and routes. Tokens never
//! enter the reactive graph; only the profile-level [`Session`] does.
//!
//! The subscription loop is the only writer of [`SessionState`]. Views read it
//! and call the gateway; the gateway publishes before an operation returns, so
//! the state is already current by the time a view navigates.

use crate::features::auth::{
    firebase::FirebaseGateway, gateway::IdentityGateway, observer::SessionState,
    prompt::PromptSlot, types::Session,
};
use futures::StreamExt;
use leptos::{prelude::*, task::spawn_local};
use tracing::debug;

#[derive(Clone, Copy)]
/// Auth session context shared through Leptos.
pub struct AuthContext {
    pub state: ReadSignal<SessionState>,
    pub session: Signal<Option<Session>>,
    set_state: WriteSignal<SessionState>,
    gateway: StoredValue<FirebaseGateway>,
    prompts: StoredValue<PromptSlot>,
}

impl AuthContext {
    fn new(gateway: FirebaseGateway) -> Self {
        let (state, set_state) = signal(SessionState::default());
        Self {
            state,
            session: Signal::derive(move || state.with(|state| state.session.clone())),
            set_state,
            gateway: StoredValue::new(gateway),
            prompts: StoredValue::new(PromptSlot::new()),
        }
    }

    pub fn gateway(&self) -> FirebaseGateway {
        self.gateway.get_value()
    }

    /// The one-shot verification prompt slot shared by signup and dashboard.
    pub fn prompts(&self) -> PromptSlot {
        self.prompts.get_value()
    }
}

/// Provides auth context, subscribes to session changes and resolves the
/// persisted session once on mount.
#[component]
pub fn AuthProvider(gateway: FirebaseGateway, children: Children) -> impl IntoView {
    let auth = AuthContext::new(gateway.clone());
    provide_context(auth);

    let (subscription, mut notifications) = gateway.observe_session();
    spawn_local(async move {
        while let Some(session) = notifications.next().await {
            auth.set_state.maybe_update(|state| state.apply(session));
        }
        debug!("session subscription closed");
    });
    on_cleanup(move || subscription.unsubscribe());

    spawn_local(async move {
        gateway.resolve_initial().await;
    });

    view! { {children()} }
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
