use crate::components::{Alert, AlertKind, AppShell};
use leptos::prelude::*;

/// Shown instead of the app when the identity gateway settings are incomplete.
#[component]
pub fn ConfigErrorPage(missing: Vec<&'static str>) -> impl IntoView {
    let items = missing
        .into_iter()
        .map(|name| view! { <li><code>{name}</code></li> })
        .collect_view();

    view! {
        <AppShell>
            <div class="space-y-4 rounded-2xl border border-slate-200 bg-white p-6 shadow-sm">
                <h1 class="text-xl font-semibold text-slate-900">"Configuration required"</h1>
                <Alert
                    kind=AlertKind::Error
                    message="The identity gateway is not configured. Set the missing values at build time or in window.GATEHOUSE_CONFIG and reload."
                />
                <ul class="list-inside list-disc text-sm text-slate-700">{items}</ul>
            </div>
        </AppShell>
    }
}
