//! Image Picker Component
//!
//! Modal listing previously uploaded images. Selecting one and confirming
//! puts its URL into the admin form.

use fame_gallery::PickerState;
use leptos::*;
use std::rc::Rc;

use crate::components::Loading;
use crate::state::{AdminController, ToastNotifier};

#[component]
pub fn ImagePicker(admin: Rc<AdminController>, notifier: ToastNotifier) -> impl IntoView {
    move || {
        notifier.track();

        let body = match admin.picker_state() {
            PickerState::Closed => return ().into_view(),
            PickerState::Loading => view! { <Loading /> }.into_view(),
            PickerState::Empty => view! {
                <div class="text-center py-12">
                    <div class="text-5xl mb-4 opacity-50">"🖼"</div>
                    <p class="text-gray-400">"The gallery is empty"</p>
                </div>
            }
            .into_view(),
            PickerState::Populated => {
                let selected = admin.picker_selection();
                let tiles = admin
                    .picker_images()
                    .into_iter()
                    .map(|image| {
                        let admin = Rc::clone(&admin);
                        let url = image.url.clone();
                        let is_selected = selected.as_deref() == Some(image.url.as_str());
                        view! {
                            <div
                                class=if is_selected {
                                    "cursor-pointer rounded-lg overflow-hidden border-2 border-primary-500 scale-105 transition-all"
                                } else {
                                    "cursor-pointer rounded-lg overflow-hidden border-2 border-gray-700 hover:border-primary-500/50 transition-all"
                                }
                                on:click=move |_| {
                                    admin.select_image(&url);
                                }
                            >
                                <div class="aspect-square relative">
                                    <img src=image.url.clone() alt=image.name.clone() class="w-full h-full object-cover" />
                                    {is_selected.then(|| view! {
                                        <div class="absolute inset-0 bg-primary-500/20 flex items-center justify-center">
                                            <span class="w-12 h-12 bg-primary-600 rounded-full flex items-center justify-center text-xl">"✓"</span>
                                        </div>
                                    })}
                                </div>
                                <div class="p-2 bg-gray-700/50">
                                    <p class="text-xs truncate font-medium">{image.name.clone()}</p>
                                </div>
                            </div>
                        }
                    })
                    .collect_view();

                let confirm = Rc::clone(&admin);
                let cancel = Rc::clone(&admin);
                view! {
                    <div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-4">{tiles}</div>
                    <div class="flex gap-3 pt-4 mt-4 border-t border-gray-700">
                        <button
                            disabled=!admin.can_confirm_picker()
                            on:click=move |_| {
                                confirm.confirm_picker();
                            }
                            class="flex-1 px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                                   disabled:cursor-not-allowed rounded-lg font-medium transition-colors"
                        >
                            "✓ Select image"
                        </button>
                        <button
                            on:click=move |_| cancel.cancel_picker()
                            class="flex-1 px-4 py-2 border border-gray-600 hover:bg-gray-700 rounded-lg font-medium transition-colors"
                        >
                            "Cancel"
                        </button>
                    </div>
                }
                .into_view()
            }
        };

        let close = Rc::clone(&admin);
        view! {
            <div
                class="fixed inset-0 bg-gray-900/80 z-50 flex items-center justify-center p-4"
                on:click=move |_| close.cancel_picker()
            >
                <div
                    class="max-w-4xl w-full max-h-[80vh] overflow-y-auto bg-gray-800 rounded-xl p-6 shadow-2xl"
                    on:click=|ev: ev::MouseEvent| ev.stop_propagation()
                >
                    <h2 class="text-2xl font-semibold mb-4">"Choose an image from the gallery"</h2>
                    {body}
                </div>
            </div>
        }
        .into_view()
    }
}
