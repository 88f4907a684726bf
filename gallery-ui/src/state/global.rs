//! Global Application State
//!
//! Reactive state management using Leptos signals.

use fame_gallery::{Notification, Notifier, Severity};
use leptos::*;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Success toast
    pub success: RwSignal<Option<Notification>>,
    /// Error toast
    pub error: RwSignal<Option<Notification>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        success: create_rw_signal(None),
        error: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, notification: Notification) {
        self.success.set(Some(notification));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, notification: Notification) {
        self.error.set(Some(notification));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}

/// Routes controller notifications to toasts and bumps a revision signal on
/// every state change so views re-read the controller
#[derive(Clone, Copy)]
pub struct ToastNotifier {
    state: GlobalState,
    revision: RwSignal<u64>,
}

impl ToastNotifier {
    pub fn new(state: GlobalState) -> Self {
        Self {
            state,
            revision: create_rw_signal(0),
        }
    }

    /// Subscribe the current reactive scope to controller changes
    pub fn track(&self) {
        self.revision.track();
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Success => self.state.show_success(notification),
            Severity::Error => {
                web_sys::console::warn_1(
                    &format!("{}: {}", notification.title, notification.description).into(),
                );
                self.state.show_error(notification);
            }
        }
    }

    fn changed(&self) {
        self.revision.update(|r| *r = r.wrapping_add(1));
    }
}
