use leptos::prelude::*;

/// Numbered progress dots for a multi-step form. `current` is zero-based.
#[component]
pub fn StepIndicator(
    #[prop(into)] current: Signal<usize>,
    labels: &'static [&'static str],
) -> impl IntoView {
    let steps = labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let reached = move || current.get() >= index;
            view! {
                <li class="flex flex-1 flex-col items-center gap-1">
                    <span
                        class="flex h-8 w-8 items-center justify-center rounded-full text-sm font-semibold"
                        class:bg-indigo-600=reached
                        class:text-white=reached
                        class:bg-gray-200=move || !reached()
                        class:text-gray-600=move || !reached()
                        aria-current=move || (current.get() == index).then_some("step")
                    >
                        {index + 1}
                    </span>
                    <span class="text-xs text-gray-600">{*label}</span>
                </li>
            }
        })
        .collect_view();

    view! {
        <div>
            <p class="mb-2 text-center text-sm text-gray-500">
                {move || format!("Step {} of {}", current.get() + 1, labels.len())}
            </p>
            <ol class="flex items-start justify-between">{steps}</ol>
        </div>
    }
}
