//! Page frame shared by every route: brand header, a centered content column
//! and a footer carrying the build's commit.

use crate::app_lib::build_info::git_commit_hash;
use leptos::prelude::*;

/// Wraps a page. `wide` widens the column for the dashboard.
#[component]
pub fn AppShell(#[prop(optional)] wide: bool, children: Children) -> impl IntoView {
    let column = if wide { "max-w-4xl" } else { "max-w-md" };

    view! {
        <div class="flex min-h-screen flex-col bg-gradient-to-br from-slate-50 to-indigo-50">
            <header class="px-6 py-5">
                <span class="text-lg font-semibold tracking-tight text-indigo-700">"Gatehouse"</span>
            </header>
            <main class="flex flex-1 items-start justify-center px-4 py-6 sm:items-center">
                <div class=format!("w-full {column}")>{children()}</div>
            </main>
            <footer class="px-6 py-4 text-center text-xs text-gray-400">
                {format!("build {}", git_commit_hash())}
            </footer>
        </div>
    }
}
