//! Post-login landing page: greeting, live clock, account stats, the one-shot
//! verification banner and sign out. Mounted behind `RequireAuth`.

use crate::components::{Alert, AlertKind, AppShell, Button, ButtonVariant};
use crate::features::{
    auth::{flows, state::use_auth},
    dashboard::{email_status, greeting, show_verification_banner},
};
use js_sys::{Date, Object, Reflect};
use leptos::{prelude::*, task::spawn_local};
use std::time::Duration;
use tracing::warn;
use wasm_bindgen::JsValue;

fn locale() -> String {
    web_sys::window()
        .and_then(|window| window.navigator().language())
        .unwrap_or_else(|| "en-US".to_string())
}

fn long_date_options() -> JsValue {
    let options = Object::new();
    for (key, value) in [("weekday", "long"), ("year", "numeric"), ("month", "long"), ("day", "numeric")] {
        let _ = Reflect::set(&options, &key.into(), &value.into());
    }
    options.into()
}

fn format_date(millis: f64, locale: &str) -> String {
    Date::new(&JsValue::from_f64(millis))
        .to_locale_date_string(locale, &long_date_options())
        .into()
}

fn format_time(millis: f64, locale: &str) -> String {
    Date::new(&JsValue::from_f64(millis))
        .to_locale_time_string(locale)
        .into()
}

#[allow(clippy::cast_precision_loss)]
fn format_timestamp(millis: u64, locale: &str) -> String {
    Date::new(&JsValue::from_f64(millis as f64))
        .to_locale_string(locale, &JsValue::UNDEFINED)
        .into()
}

#[component]
fn Stat(label: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <div class="rounded-xl border border-slate-200 bg-white p-4">
            <p class="text-xs uppercase tracking-wide text-slate-400">{label}</p>
            <p class="mt-1 text-sm font-medium text-slate-900">{move || value.get()}</p>
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let session = auth.session;
    // Consumed once per mount; a reload or a later visit finds the slot empty.
    let prompt = StoredValue::new(auth.prompts().take());
    let locale = StoredValue::new(locale());

    let (now, set_now) = signal(Date::now());
    match set_interval_with_handle(move || set_now.set(Date::now()), Duration::from_secs(1)) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(_) => warn!("clock interval unavailable"),
    }

    let welcome = Memo::new(move |_| {
        session.with(|session| prompt.with_value(|prompt| greeting(session.as_ref(), prompt.as_ref())))
    });
    let show_banner = Memo::new(move |_| {
        session.with(|session| {
            prompt.with_value(|prompt| show_verification_banner(session.as_ref(), prompt.as_ref()))
        })
    });
    let banner_email = move || {
        prompt.with_value(|prompt| prompt.as_ref().map(|prompt| prompt.email.clone()).unwrap_or_default())
    };

    let (signing_out, set_signing_out) = signal(false);
    let on_sign_out = move |_| {
        if signing_out.get_untracked() {
            return;
        }
        set_signing_out.set(true);
        let gateway = auth.gateway();
        spawn_local(async move {
            // The guard redirects once the signed-out notification lands.
            if flows::sign_out(&gateway).await.is_err() {
                set_signing_out.set(false);
            }
        });
    };

    view! {
        <AppShell wide=true>
            <div class="space-y-6">
                <div class="flex items-center justify-between gap-4">
                    <div class="flex items-center gap-4">
                        <span class="flex h-12 w-12 items-center justify-center rounded-full bg-indigo-600 text-lg font-semibold text-white">
                            {move || welcome.with(|welcome| welcome.initial.clone())}
                        </span>
                        <div>
                            <h1 class="text-2xl font-semibold text-slate-900">
                                {move || welcome.with(|welcome| format!("Welcome, {}!", welcome.first_name))}
                            </h1>
                            <p class="text-sm text-slate-500">
                                {move || locale.with_value(|locale| format_date(now.get(), locale))}
                                " · "
                                {move || locale.with_value(|locale| format_time(now.get(), locale))}
                            </p>
                        </div>
                    </div>
                    <Button variant=ButtonVariant::Secondary disabled=signing_out {..} on:click=on_sign_out>
                        "Sign out"
                    </Button>
                </div>
                <Show when=move || show_banner.get()>
                    <Alert
                        kind=AlertKind::Warning
                        title="Verify your email"
                        message=format!(
                            "We sent a verification link to {}. Open it to confirm your address.",
                            banner_email(),
                        )
                    />
                </Show>
                <div class="grid gap-4 sm:grid-cols-3">
                    <Stat
                        label="Signed in as"
                        value=Signal::derive(move || welcome.with(|welcome| welcome.display_name.clone()))
                    />
                    <Stat
                        label="Email status"
                        value=Signal::derive(move || session.with(|session| email_status(session.as_ref()).to_string()))
                    />
                    <Stat
                        label="Last sign-in"
                        value=Signal::derive(move || {
                            session
                                .with(|session| session.as_ref().and_then(|session| session.last_sign_in_at))
                                .map_or_else(
                                    || "First session".to_string(),
                                    |millis| locale.with_value(|locale| format_timestamp(millis, locale)),
                                )
                        })
                    />
                </div>
            </div>
        </AppShell>
    }
}
