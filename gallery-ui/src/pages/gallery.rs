//! Gallery Page
//!
//! Public listing: category filter chips, card grid and the detail overlay.

use fame_gallery::GalleryView;
use leptos::*;
use leptos_router::A;
use std::rc::Rc;

use crate::api::{self, BrowserGateway};
use crate::components::{DetailOverlay, ItemCard, Loading};
use crate::state::{GalleryController, GlobalState, ToastNotifier};

/// Gallery page component
#[component]
pub fn Gallery() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let notifier = ToastNotifier::new(state);

    let gallery: Rc<GalleryController> = Rc::new(GalleryView::new(
        BrowserGateway::new(api::endpoints()),
        notifier,
        api::date_locale(),
    ));

    // Fetch on mount
    let loader = Rc::clone(&gallery);
    spawn_local(async move {
        loader.load().await;
    });

    let chips = {
        let gallery = Rc::clone(&gallery);
        move || {
            notifier.track();
            gallery
                .filter_chips()
                .into_iter()
                .map(|chip| {
                    let gallery = Rc::clone(&gallery);
                    let filter = chip.filter;
                    let style = chip
                        .color
                        .filter(|_| chip.active)
                        .map(|color| format!("background-color: {}", color));
                    let class = match (chip.active, chip.filter) {
                        (true, None) => "px-4 py-2 rounded-full font-medium bg-primary-600 text-white shadow-lg scale-105 transition-all",
                        (true, Some(_)) => "px-4 py-2 rounded-full font-medium text-white shadow-lg scale-105 transition-all",
                        (false, _) => "px-4 py-2 rounded-full font-medium bg-gray-700/50 hover:bg-gray-700 text-gray-300 transition-all",
                    };

                    view! {
                        <button class=class style=style on:click=move |_| gallery.set_filter(filter)>
                            {format!("{} ({})", chip.label, chip.count)}
                        </button>
                    }
                })
                .collect_view()
        }
    };

    let content = {
        let gallery = Rc::clone(&gallery);
        move || {
            notifier.track();

            if gallery.is_loading() {
                return view! { <Loading label="Loading..." /> }.into_view();
            }

            if let Some(empty) = gallery.empty_state() {
                return view! {
                    <div class="text-center py-20">
                        <div class="text-6xl mb-4 opacity-50">"👤"</div>
                        <h2 class="text-2xl font-semibold mb-2">{empty.title()}</h2>
                        <p class="text-gray-400">{empty.hint()}</p>
                    </div>
                }
                .into_view();
            }

            let cards = gallery
                .visible_items()
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    let gallery = Rc::clone(&gallery);
                    view! {
                        <ItemCard
                            item=item
                            index=index
                            on_select=move |id| {
                                gallery.select(id);
                            }
                        />
                    }
                })
                .collect_view();

            view! {
                <div class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 lg:grid-cols-4 xl:grid-cols-5 gap-6">
                    {cards}
                </div>
            }
            .into_view()
        }
    };

    let overlay = move || {
        notifier.track();
        gallery.detail().map(|detail| {
            let backdrop = Rc::clone(&gallery);
            let close = Rc::clone(&gallery);
            view! {
                <DetailOverlay
                    detail=detail
                    on_click=move |target| {
                        backdrop.handle_overlay_click(target);
                    }
                    on_close=move || close.close_detail()
                />
            }
        })
    };

    view! {
        <div class="min-h-screen">
            <header class="border-b border-gray-700 bg-gray-800/80 backdrop-blur-xl sticky top-0 z-10 shadow-lg">
                <div class="container mx-auto px-4 py-6">
                    <div class="flex items-center justify-between flex-wrap gap-4">
                        <div class="flex items-center gap-3">
                            <div class="w-12 h-12 bg-primary-600 rounded-xl flex items-center justify-center text-2xl shadow-lg">
                                "★"
                            </div>
                            <div>
                                <h1 class="text-3xl font-black text-primary-400">"TG FAME"</h1>
                                <p class="text-sm text-gray-400">"Telegram personalities"</p>
                            </div>
                        </div>
                        <A
                            href="/admin"
                            class="px-6 py-2.5 bg-gray-700 hover:bg-gray-600 rounded-xl font-semibold transition-colors"
                        >
                            "🛡 Admin"
                        </A>
                    </div>

                    <div class="flex flex-wrap gap-2 mt-6">{chips}</div>
                </div>
            </header>

            <main class="container mx-auto px-4 py-12">{content}</main>

            {overlay}
        </div>
    }
}
