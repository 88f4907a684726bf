//! Toast Notification Component
//!
//! Shows success and error messages.

use fame_gallery::{Notification, Severity};
use leptos::*;

use crate::state::global::GlobalState;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="fixed bottom-4 right-4 z-[60] space-y-2">
            // Success toast
            {move || {
                state.success.get().map(|notification| view! {
                    <ToastMessage notification=notification />
                })
            }}

            // Error toast, click to dismiss
            {move || {
                state.error.get().map(|notification| view! {
                    <div on:click=move |_| state.clear_error()>
                        <ToastMessage notification=notification />
                    </div>
                })
            }}
        </div>
    }
}

#[component]
fn ToastMessage(notification: Notification) -> impl IntoView {
    let (icon, bg_class) = match notification.severity {
        Severity::Success => ("✓", "bg-green-600"),
        Severity::Error => ("✕", "bg-red-600"),
    };

    view! {
        <div class=format!(
            "flex items-start space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg \
             transform transition-all duration-300 ease-out animate-slide-in max-w-sm",
            bg_class
        )>
            <span class="text-lg">{icon}</span>
            <div>
                <p class="text-sm font-semibold">{notification.title}</p>
                <p class="text-sm">{notification.description}</p>
            </div>
        </div>
    }
}
