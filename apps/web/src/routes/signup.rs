//! Signup route driving the three-step wizard. All transitions go through
//! [`SignupWizard`]; this view only renders its state and dispatches the
//! registration once the review step is submitted.
//!
//! On success the verification prompt is delivered to the dashboard through
//! the one-shot slot and history is replaced with the dashboard. The session
//! itself arrives through the gateway's notification, never from this view.

use crate::{
    components::{
        Alert, AlertKind, AppShell, Button, ButtonVariant, FederatedButton, Spinner,
        StepIndicator, TextField,
    },
    features::{
        auth::{flows, state::use_auth, types::Registration},
        signup::{
            validation::Field,
            wizard::{Direction, SignupWizard, Step},
        },
    },
    routes::paths,
};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::{
    NavigateOptions,
    components::A,
    hooks::use_navigate,
};

const STEP_LABELS: &[&str] = &["Profile", "Account", "Review"];

fn field_meta(field: Field) -> (&'static str, &'static str, &'static str, &'static str) {
    match field {
        Field::FirstName => ("first_name", "First name", "text", "given-name"),
        Field::LastName => ("last_name", "Last name", "text", "family-name"),
        Field::DisplayName => ("display_name", "Display name (optional)", "text", "nickname"),
        Field::Email => ("email", "Email", "email", "email"),
        Field::Password => ("password", "Password", "password", "new-password"),
        Field::ConfirmPassword => ("confirm_password", "Confirm password", "password", "new-password"),
    }
}

fn wizard_field(wizard: RwSignal<SignupWizard>, field: Field, disabled: Signal<bool>) -> impl IntoView {
    let (id, label, input_type, autocomplete) = field_meta(field);
    view! {
        <TextField
            id=id
            label=label
            input_type=input_type
            autocomplete=autocomplete
            value=Signal::derive(move || wizard.with(|wizard| wizard.draft().value(field).to_string()))
            error=Signal::derive(move || wizard.with(|wizard| wizard.field_error(field)))
            disabled=disabled
            on_input=move |value: String| wizard.update(|wizard| wizard.set_field(field, value))
        />
    }
}

fn review_row(label: &'static str, value: String, placeholder: bool) -> impl IntoView {
    view! {
        <div class="flex justify-between gap-4 py-2">
            <dt class="text-slate-500">{label}</dt>
            <dd class="text-right font-medium" class:text-slate-400=placeholder class:text-slate-900={!placeholder}>
                {value}
            </dd>
        </div>
    }
}

fn review(wizard: RwSignal<SignupWizard>) -> impl IntoView {
    move || {
        wizard.with(|wizard| {
            let draft = wizard.draft();
            let name = draft.full_name();
            let email = draft.email.trim().to_string();
            let display_name = draft.display_name.trim().to_string();
            view! {
                <dl class="divide-y divide-slate-100 rounded-xl border border-slate-200 px-4 text-sm">
                    {review_row(
                        "Name",
                        if name.is_empty() { "—".to_string() } else { name.clone() },
                        name.is_empty(),
                    )}
                    {review_row(
                        "Email",
                        if email.is_empty() { "Not provided yet".to_string() } else { email.clone() },
                        email.is_empty(),
                    )}
                    {review_row(
                        "Display name",
                        if display_name.is_empty() {
                            "Will use your full name".to_string()
                        } else {
                            display_name.clone()
                        },
                        display_name.is_empty(),
                    )}
                </dl>
            }
        })
    }
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let wizard = RwSignal::new(SignupWizard::new());
    let step = Memo::new(move |_| wizard.with(SignupWizard::step));
    let step_index = Memo::new(move |_| wizard.with(SignupWizard::step_index));
    let pending = Signal::derive(move || wizard.with(SignupWizard::is_pending));

    let register_action = Action::new_local(move |registration: &Registration| {
        let registration = registration.clone();
        let gateway = auth.gateway();
        async move { flows::register_with_email(&gateway, &registration).await }
    });
    let federated_action = Action::new_local(move |(): &()| {
        let gateway = auth.gateway();
        async move { flows::sign_in_with_federated(&gateway).await }
    });

    let go_home = move || {
        navigate(
            paths::DASHBOARD,
            NavigateOptions {
                replace: true,
                ..Default::default()
            },
        );
    };

    let go_home_after_register = go_home.clone();
    Effect::new(move |_| {
        let Some(result) = register_action.value().get() else {
            return;
        };
        match result {
            Ok(_) => {
                let prompt = wizard.with_untracked(|wizard| wizard.draft().verification_prompt());
                auth.prompts().deliver(prompt);
                wizard.update(|wizard| wizard.finish(Ok(())));
                go_home_after_register();
            }
            Err(message) => wizard.update(|wizard| wizard.finish(Err(message))),
        }
    });
    Effect::new(move |_| {
        let Some(result) = federated_action.value().get() else {
            return;
        };
        match result {
            Ok(_) => {
                wizard.update(|wizard| wizard.finish(Ok(())));
                go_home();
            }
            Err(message) => wizard.update(|wizard| wizard.finish(Err(message))),
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        if !wizard.with_untracked(SignupWizard::is_last_step) {
            wizard.update(|wizard| {
                wizard.advance();
            });
            return;
        }
        if let Some(registration) = wizard.try_update(SignupWizard::begin_submit).flatten() {
            register_action.dispatch(registration);
        }
    };

    let on_federated = move |()| {
        if wizard.try_update(SignupWizard::begin_federated).unwrap_or(false) {
            federated_action.dispatch(());
        }
    };

    let step_body = move || match step.get() {
        Step::Review => review(wizard).into_any(),
        current => current
            .fields()
            .iter()
            .map(|field| wizard_field(wizard, *field, pending))
            .collect_view()
            .into_any(),
    };

    view! {
        <AppShell>
            <form
                class="space-y-6 rounded-2xl border border-slate-200 bg-white p-6 shadow-sm sm:p-8"
                novalidate
                on:submit=on_submit
            >
                <div class="space-y-1">
                    <h1 class="text-2xl font-semibold text-slate-900">"Create your account"</h1>
                    <p class="text-sm text-slate-500">"It only takes a minute."</p>
                </div>
                <StepIndicator current=step_index labels=STEP_LABELS />
                {move || {
                    wizard
                        .with(|wizard| wizard.form_error().map(str::to_string))
                        .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                <div
                    class="space-y-4"
                    data-direction=move || match wizard.with(SignupWizard::direction) {
                        Direction::Forward => "forward",
                        Direction::Backward => "backward",
                    }
                >
                    {step_body}
                </div>
                <div class="flex flex-col-reverse gap-3 sm:flex-row sm:justify-between">
                    <Show when=move || { step_index.get() > 0 } fallback=|| view! { <span></span> }>
                        <Button
                            variant=ButtonVariant::Secondary
                            disabled=pending
                            {..}
                            on:click=move |_| {
                                wizard.update(|wizard| {
                                    wizard.retreat();
                                });
                            }
                        >
                            "Back"
                        </Button>
                    </Show>
                    <div class="flex items-center gap-3">
                        {move || pending.get().then_some(view! { <Spinner small=true /> })}
                        <Button button_type="submit" disabled=pending>
                            {move || match (step.get(), register_action.pending().get()) {
                                (Step::Review, true) => "Creating account…",
                                (Step::Review, false) => "Finish sign up",
                                _ => "Next",
                            }}
                        </Button>
                    </div>
                </div>
                <div class="flex items-center gap-3 text-xs uppercase text-slate-400">
                    <span class="h-px flex-1 bg-slate-200"></span>
                    "or"
                    <span class="h-px flex-1 bg-slate-200"></span>
                </div>
                <FederatedButton disabled=pending on_press=on_federated />
                <p class="text-center text-sm text-slate-500">
                    "Already have an account? "
                    <A href=paths::LOGIN {..} class="font-medium text-indigo-600 hover:underline">
                        "Sign in"
                    </A>
                </p>
            </form>
        </AppShell>
    }
}
