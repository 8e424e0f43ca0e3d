//! Inline banners for form errors and notices. Messages must be safe to render
//! and never include tokens or raw gateway payloads.

use leptos::prelude::*;

#[derive(Clone, Copy)]
pub enum AlertKind {
    Error,
    Warning,
}

/// Renders a styled alert banner with an optional heading.
#[component]
pub fn Alert(
    kind: AlertKind,
    #[prop(into)] message: String,
    #[prop(optional, into)] title: Option<String>,
) -> impl IntoView {
    let (class, role) = match kind {
        AlertKind::Error => (
            "rounded-lg border border-red-200 bg-red-50 px-4 py-3 text-sm text-red-700",
            "alert",
        ),
        AlertKind::Warning => (
            "rounded-lg border border-amber-200 bg-amber-50 px-4 py-3 text-sm text-amber-800",
            "status",
        ),
    };

    view! {
        <div class=class role=role>
            {title.map(|title| view! { <p class="mb-1 font-semibold">{title}</p> })}
            <p>{message}</p>
        </div>
    }
}
