//! Login Form Component
//!
//! Shown on the admin page while no session token is stored.

use leptos::*;
use std::rc::Rc;

use crate::components::loading::InlineLoading;
use crate::state::{AdminController, ToastNotifier};

#[component]
pub fn LoginForm(admin: Rc<AdminController>, notifier: ToastNotifier) -> impl IntoView {
    let submitter = Rc::clone(&admin);
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let admin = Rc::clone(&submitter);
        spawn_local(async move {
            admin.login().await;
        });
    };

    let on_username = {
        let admin = Rc::clone(&admin);
        move |ev: ev::Event| {
            let value = event_target_value(&ev);
            admin.edit_login_form(|form| form.username = value);
        }
    };
    let on_password = {
        let admin = Rc::clone(&admin);
        move |ev: ev::Event| {
            let value = event_target_value(&ev);
            admin.edit_login_form(|form| form.password = value);
        }
    };

    let username = {
        let admin = Rc::clone(&admin);
        move || {
            notifier.track();
            admin.login_form().username
        }
    };
    let loading = move || {
        notifier.track();
        admin.is_loading()
    };

    view! {
        <div class="min-h-screen flex items-center justify-center p-4">
            <form on:submit=on_submit class="w-full max-w-md bg-gray-800 rounded-xl p-8 shadow-2xl space-y-6">
                <div class="text-center">
                    <div class="text-5xl mb-4">"🛡"</div>
                    <h1 class="text-2xl font-bold">"Admin sign-in"</h1>
                    <p class="text-gray-400 text-sm mt-1">"Enter your credentials to manage the gallery"</p>
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Username"</label>
                    <input
                        type="text"
                        autocomplete="username"
                        prop:value=username
                        on:input=on_username
                        class="w-full bg-gray-700 rounded-lg px-4 py-3 border border-gray-600
                               focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Password"</label>
                    <input
                        type="password"
                        autocomplete="current-password"
                        on:input=on_password
                        class="w-full bg-gray-700 rounded-lg px-4 py-3 border border-gray-600
                               focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <button
                    type="submit"
                    disabled=loading.clone()
                    class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           disabled:cursor-not-allowed rounded-lg py-3 font-semibold
                           transition-colors flex items-center justify-center space-x-2"
                >
                    {move || if loading() {
                        view! { <InlineLoading /> <span>"Signing in..."</span> }.into_view()
                    } else {
                        view! { <span>"Sign in"</span> }.into_view()
                    }}
                </button>

                <a href="/" class="block text-center text-sm text-gray-400 hover:text-white">"← Back to gallery"</a>
            </form>
        </div>
    }
}
