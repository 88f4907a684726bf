//! Loading Component
//!
//! Loading spinners.

use leptos::*;

/// Full-page loading spinner
#[component]
pub fn Loading(
    #[prop(optional, into)]
    label: Option<String>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-12">
            <div class="loading-spinner w-12 h-12" />
            {label.map(|text| view! {
                <p class="text-gray-400 text-lg mt-4">{text}</p>
            })}
        </div>
    }
}

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}
