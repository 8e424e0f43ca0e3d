use leptos::prelude::*;

/// Labelled input with a field-scoped error line underneath.
#[component]
pub fn TextField(
    id: &'static str,
    label: &'static str,
    input_type: &'static str,
    autocomplete: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] error: Signal<Option<&'static str>>,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] on_input: Callback<String>,
) -> impl IntoView {
    let error_id = format!("{id}-error");
    let has_error = move || error.get().is_some();

    view! {
        <div>
            <label class="mb-2 block text-sm font-medium text-slate-700" for=id>
                {label}
            </label>
            <input
                id=id
                type=input_type
                autocomplete=autocomplete
                class="w-full rounded-xl border bg-slate-50 px-3 py-2.5 text-sm text-slate-900 focus:ring-2 focus:ring-indigo-200"
                class:border-slate-200=move || !has_error()
                class:border-red-400=has_error
                aria-invalid=move || has_error().to_string()
                aria-describedby=error_id.clone()
                prop:value=move || value.get()
                disabled=move || disabled.get()
                on:input=move |event| on_input.run(event_target_value(&event))
            />
            <p id=error_id class="mt-1 min-h-[1rem] text-xs text-red-600">
                {move || error.get()}
            </p>
        </div>
    }
}
