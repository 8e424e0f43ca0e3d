use crate::components::{AppShell, Spinner};
use leptos::prelude::*;

/// Landing page for the federated sign-in popup. The opener reads this URL
/// and closes the window, so it only needs a short notice.
#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    view! {
        <AppShell>
            <div class="flex items-center justify-center gap-3 py-10 text-slate-600">
                <Spinner small=true />
                <span>"Completing sign-in…"</span>
            </div>
        </AppShell>
    }
}
