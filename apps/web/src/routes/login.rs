//! Sign-in view: email and password, or the federated provider. Validation is
//! field-scoped and runs before any gateway call; gateway failures surface as a
//! single form-level message.

use crate::components::{Alert, AlertKind, AppShell, Button, FederatedButton, Spinner, TextField};
use crate::features::auth::{
    flows,
    gate::{RETURN_PARAM, return_target},
    state::use_auth,
    types::Session,
};
use crate::features::signup::validation::{Field, FieldErrors, LoginForm};
use crate::routes::paths;
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::{
    NavigateOptions,
    components::A,
    hooks::{use_navigate, use_query_map},
};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let query = use_query_map();
    let (form, set_form) = signal(LoginForm::default());
    let (field_errors, set_field_errors) = signal(FieldErrors::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let sign_in_action = Action::new_local(move |input: &LoginForm| {
        let input = input.clone();
        let gateway = auth.gateway();
        async move { flows::sign_in_with_email(&gateway, &input.email, &input.password).await }
    });
    let federated_action = Action::new_local(move |(): &()| {
        let gateway = auth.gateway();
        async move { flows::sign_in_with_federated(&gateway).await }
    });
    let pending = Signal::derive(move || {
        sign_in_action.pending().get() || federated_action.pending().get()
    });

    let complete = move |result: Result<Session, String>| match result {
        Ok(_) => {
            let from = query.with_untracked(|query| query.get(RETURN_PARAM));
            navigate(
                &return_target(from.as_deref()),
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
        Err(message) => set_error.set(Some(message)),
    };

    let complete_password = complete.clone();
    Effect::new(move |_| {
        if let Some(result) = sign_in_action.value().get() {
            complete_password(result);
        }
    });
    Effect::new(move |_| {
        if let Some(result) = federated_action.value().get() {
            complete(result);
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        if pending.get_untracked() {
            return;
        }
        set_error.set(None);

        let input = form.get_untracked();
        let errors = input.validate();
        let valid = errors.is_empty();
        set_field_errors.set(errors);
        if valid {
            sign_in_action.dispatch(input);
        }
    };

    let on_federated = move |()| {
        if pending.get_untracked() {
            return;
        }
        set_error.set(None);
        federated_action.dispatch(());
    };

    let edit = move |field: Field, value: String| {
        set_form.update(|form| match field {
            Field::Password => form.password = value,
            _ => form.email = value,
        });
        set_field_errors.update(|errors| {
            errors.remove(&field);
        });
    };

    view! {
        <AppShell>
            <form
                class="space-y-5 rounded-2xl border border-slate-200 bg-white p-6 shadow-sm sm:p-8"
                novalidate
                on:submit=on_submit
            >
                <div class="space-y-1">
                    <h1 class="text-2xl font-semibold text-slate-900">"Welcome back"</h1>
                    <p class="text-sm text-slate-500">"Sign in to continue to your dashboard."</p>
                </div>
                {move || {
                    error
                        .get()
                        .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                <TextField
                    id="email"
                    label="Email"
                    input_type="email"
                    autocomplete="email"
                    value=Signal::derive(move || form.with(|form| form.email.clone()))
                    error=Signal::derive(move || {
                        field_errors.with(|errors| errors.get(&Field::Email).copied())
                    })
                    disabled=pending
                    on_input=move |value: String| edit(Field::Email, value)
                />
                <TextField
                    id="password"
                    label="Password"
                    input_type="password"
                    autocomplete="current-password"
                    value=Signal::derive(move || form.with(|form| form.password.clone()))
                    error=Signal::derive(move || {
                        field_errors.with(|errors| errors.get(&Field::Password).copied())
                    })
                    disabled=pending
                    on_input=move |value: String| edit(Field::Password, value)
                />
                <div class="flex items-center gap-3">
                    <Button button_type="submit" disabled=pending>
                        {move || if sign_in_action.pending().get() { "Signing in…" } else { "Sign in" }}
                    </Button>
                    {move || pending.get().then_some(view! { <Spinner small=true /> })}
                </div>
                <div class="flex items-center gap-3 text-xs uppercase text-slate-400">
                    <span class="h-px flex-1 bg-slate-200"></span>
                    "or"
                    <span class="h-px flex-1 bg-slate-200"></span>
                </div>
                <FederatedButton disabled=pending on_press=on_federated />
                <p class="text-center text-sm text-slate-500">
                    "New here? "
                    <A href=paths::SIGNUP {..} class="font-medium text-indigo-600 hover:underline">
                        "Create an account"
                    </A>
                </p>
            </form>
        </AppShell>
    }
}
