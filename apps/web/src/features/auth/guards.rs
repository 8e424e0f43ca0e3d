use crate::components::Spinner;
use crate::features::auth::{
    gate::{GateDecision, evaluate},
    state::use_auth,
};
use leptos::prelude::*;
use leptos_router::{
    NavigateOptions,
    hooks::{use_location, use_navigate},
};

/// Renders its children only for an authenticated session. While the session
/// is resolving it shows a placeholder; once it resolves to signed out it
/// replaces the current history entry with the login route.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| {
        let path = location.pathname.get();
        let search = location.search.get();
        let requested = match search.strip_prefix('?').unwrap_or(&search) {
            "" => path,
            query => format!("{path}?{query}"),
        };
        auth.state.with(|state| evaluate(state, &requested))
    });

    Effect::new(move |_| {
        if let GateDecision::Redirect(redirect) = decision.get() {
            navigate(
                &redirect.href(),
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    move || match decision.get() {
        GateDecision::Render => children().into_any(),
        GateDecision::Placeholder => view! {
            <div class="flex min-h-screen items-center justify-center gap-3 text-gray-600">
                <Spinner />
                <span>"Loading…"</span>
            </div>
        }
        .into_any(),
        GateDecision::Redirect(_) => ().into_any(),
    }
}
