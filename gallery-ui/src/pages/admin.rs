//! Admin Page
//!
//! Login form while signed out; creation form, entry list and image picker
//! once a session token is stored.

use fame_gallery::{AdminOptions, AdminView, Notification, Notifier, Session};
use leptos::*;
use leptos_router::A;
use std::rc::Rc;

use crate::api::{self, BrowserGateway};
use crate::components::loading::InlineLoading;
use crate::components::{ImagePicker, LoginForm};
use crate::state::{AdminController, GlobalState, LocalStorageStore, ToastNotifier};

/// Admin page component
#[component]
pub fn Admin() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let notifier = ToastNotifier::new(state);

    let admin: Rc<AdminController> = Rc::new(AdminView::new(
        BrowserGateway::new(api::endpoints()),
        Session::new(LocalStorageStore),
        notifier,
        AdminOptions::default(),
    ));

    // Read the stored token once
    let mounter = Rc::clone(&admin);
    spawn_local(async move {
        mounter.mount().await;
    });

    // Only flips on login/logout, so the forms are not rebuilt while typing
    let logged_in = {
        let admin = Rc::clone(&admin);
        create_memo(move |_| {
            notifier.track();
            admin.is_logged_in()
        })
    };

    move || {
        let admin = Rc::clone(&admin);
        if logged_in.get() {
            view! { <AdminPanel admin=admin notifier=notifier /> }.into_view()
        } else {
            view! { <LoginForm admin=admin notifier=notifier /> }.into_view()
        }
    }
}

#[component]
fn AdminPanel(admin: Rc<AdminController>, notifier: ToastNotifier) -> impl IntoView {
    let logout = {
        let admin = Rc::clone(&admin);
        move |_| admin.logout()
    };

    view! {
        <div class="min-h-screen">
            <header class="border-b border-gray-700 bg-gray-800/80 backdrop-blur-xl sticky top-0 z-10">
                <div class="container mx-auto px-4 py-6 flex items-center justify-between">
                    <h1 class="text-2xl font-bold">"Admin panel"</h1>
                    <div class="flex gap-3">
                        <A href="/" class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg">"Gallery"</A>
                        <button on:click=logout class="px-4 py-2 bg-red-600 hover:bg-red-700 rounded-lg">
                            "Log out"
                        </button>
                    </div>
                </div>
            </header>

            <main class="container mx-auto px-4 py-8 grid lg:grid-cols-2 gap-8">
                <ItemFormSection admin=Rc::clone(&admin) notifier=notifier />
                <ItemList admin=Rc::clone(&admin) notifier=notifier />
            </main>

            <ImagePicker admin=admin notifier=notifier />
        </div>
    }
}

#[component]
fn ItemFormSection(admin: Rc<AdminController>, notifier: ToastNotifier) -> impl IntoView {
    let on_submit = {
        let admin = Rc::clone(&admin);
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            let admin = Rc::clone(&admin);
            spawn_local(async move {
                admin.submit_item().await;
            });
        }
    };

    let on_file = {
        let admin = Rc::clone(&admin);
        move |ev: ev::Event| {
            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            // Allow choosing the same file again
            input.set_value("");

            if !admin.check_upload(&file.type_(), file.size() as u64) {
                return;
            }

            let admin = Rc::clone(&admin);
            spawn_local(async move {
                match api::read_file(&file).await {
                    Ok(upload) => {
                        admin.upload_image(upload).await;
                    }
                    Err(e) => {
                        web_sys::console::error_1(&e.into());
                        admin.notifier().notify(Notification::upload_failed());
                    }
                }
            });
        }
    };

    let open_picker = {
        let admin = Rc::clone(&admin);
        move |_| {
            let admin = Rc::clone(&admin);
            spawn_local(async move {
                admin.open_picker().await;
            });
        }
    };

    let field = |read: fn(&fame_gallery::ItemForm) -> String| {
        let admin = Rc::clone(&admin);
        move || {
            notifier.track();
            read(&admin.form())
        }
    };
    let image_url = field(|f| f.image_url.clone());
    let preview = field(|f| f.image_url.clone());
    let name = field(|f| f.name.clone());
    let telegram = field(|f| f.telegram_username.clone());
    let bio = field(|f| f.bio.clone());

    let edit = |apply: fn(&mut fame_gallery::ItemForm, String)| {
        let admin = Rc::clone(&admin);
        move |ev: ev::Event| {
            let value = event_target_value(&ev);
            admin.edit_form(|form| apply(form, value));
        }
    };

    let category_options = {
        let admin = Rc::clone(&admin);
        move || {
            notifier.track();
            let selected = admin.form().category_id;
            admin
                .categories()
                .into_iter()
                .map(|cat| {
                    view! {
                        <option value=cat.id.to_string() selected=selected == Some(cat.id)>
                            {cat.name}
                        </option>
                    }
                })
                .collect_view()
        }
    };
    let on_category = {
        let admin = Rc::clone(&admin);
        move |ev: ev::Event| {
            let id = event_target_value(&ev).parse().ok();
            admin.edit_form(|form| form.category_id = id);
        }
    };

    let uploading = {
        let admin = Rc::clone(&admin);
        move || {
            notifier.track();
            admin.is_uploading()
        }
    };
    let loading = {
        let admin = Rc::clone(&admin);
        move || {
            notifier.track();
            admin.is_loading()
        }
    };
    let uploading_label = uploading.clone();
    let loading_label = loading.clone();

    let input_class = "w-full bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 \
                       focus:border-primary-500 focus:outline-none";

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Add person"</h2>

            <form on:submit=on_submit class="space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Image URL *"</label>
                    <input
                        type="url"
                        placeholder="https://..."
                        prop:value=image_url
                        on:input=edit(|form, value| form.image_url = value)
                        class=input_class
                    />
                    <div class="flex gap-2 mt-2">
                        <label class="flex-1 flex items-center justify-center gap-2 px-4 py-2 bg-gray-700
                                      hover:bg-gray-600 rounded-lg cursor-pointer transition-colors">
                            <input
                                type="file"
                                accept="image/*"
                                class="hidden"
                                on:change=on_file
                                disabled=uploading
                            />
                            {move || if uploading_label() {
                                view! { <InlineLoading /> <span>"Uploading..."</span> }.into_view()
                            } else {
                                view! { <span>"📁 Upload file"</span> }.into_view()
                            }}
                        </label>
                        <button
                            type="button"
                            on:click=open_picker
                            class="flex-1 px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg transition-colors"
                        >
                            "🖼 Choose from gallery"
                        </button>
                    </div>
                    {move || {
                        let url = preview();
                        (!url.is_empty()).then(|| view! {
                            <img src=url alt="Preview" class="mt-3 h-40 rounded-lg object-cover" />
                        })
                    }}
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Name *"</label>
                    <input
                        type="text"
                        prop:value=name
                        on:input=edit(|form, value| form.name = value)
                        class=input_class
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Category"</label>
                    <select on:change=on_category class=input_class>
                        {category_options}
                    </select>
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Telegram"</label>
                    <input
                        type="text"
                        placeholder="@username"
                        prop:value=telegram
                        on:input=edit(|form, value| form.telegram_username = value)
                        class=input_class
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Bio *"</label>
                    <textarea
                        rows="4"
                        prop:value=bio
                        on:input=edit(|form, value| form.bio = value)
                        class=input_class
                    />
                </div>

                <button
                    type="submit"
                    disabled=loading
                    class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           disabled:cursor-not-allowed rounded-lg py-3 font-semibold
                           transition-colors flex items-center justify-center space-x-2"
                >
                    {move || if loading_label() {
                        view! { <InlineLoading /> <span>"Saving..."</span> }.into_view()
                    } else {
                        view! { <span>"Add person"</span> }.into_view()
                    }}
                </button>
            </form>
        </section>
    }
}

#[component]
fn ItemList(admin: Rc<AdminController>, notifier: ToastNotifier) -> impl IntoView {
    move || {
        notifier.track();
        let items = admin.items();

        if items.is_empty() {
            return view! {
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"People (0)"</h2>
                    <p class="text-gray-400">"Nobody added yet"</p>
                </section>
            }
            .into_view();
        }

        let count = items.len();
        let rows = items
            .into_iter()
            .map(|item| {
                let admin = Rc::clone(&admin);
                let id = item.id;
                let badge = item
                    .badge()
                    .map(|(name, color)| (name.to_string(), color.to_string()));
                view! {
                    <div class="flex items-center gap-4 p-3 bg-gray-700 rounded-lg">
                        <img src=item.image_url.clone() alt=item.name.clone() class="w-14 h-14 rounded-lg object-cover" />
                        <div class="flex-1 min-w-0">
                            <p class="font-medium truncate">{item.name.clone()}</p>
                            {badge.map(|(name, color)| view! {
                                <span
                                    class="inline-block px-2 py-0.5 rounded-full text-xs font-bold text-white"
                                    style=format!("background-color: {}", color)
                                >
                                    {name}
                                </span>
                            })}
                        </div>
                        <button
                            on:click=move |_| {
                                let admin = Rc::clone(&admin);
                                spawn_local(async move {
                                    admin
                                        .delete_item(id, || {
                                            window()
                                                .confirm_with_message("Delete this person?")
                                                .unwrap_or(false)
                                        })
                                        .await;
                                });
                            }
                            class="px-3 py-2 bg-red-600 hover:bg-red-700 rounded-lg text-sm"
                        >
                            "Delete"
                        </button>
                    </div>
                }
            })
            .collect_view();

        view! {
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">{format!("People ({})", count)}</h2>
                <div class="space-y-3 max-h-[70vh] overflow-y-auto">{rows}</div>
            </section>
        }
        .into_view()
    }
}
