//! Detail Overlay Component
//!
//! Full view of one person. Clicking the dimmed backdrop closes it; clicks
//! inside the card stop at the card.

use fame_gallery::{ItemDetail, OverlayClick};
use leptos::*;

#[component]
pub fn DetailOverlay(
    detail: ItemDetail,
    /// Backdrop clicks
    on_click: impl Fn(OverlayClick) + 'static,
    /// Close button
    on_close: impl Fn() + 'static,
) -> impl IntoView {
    let ItemDetail {
        item,
        added_on,
        telegram_link,
        badge,
    } = detail;
    let handle = item.handle().map(str::to_string);

    view! {
        <div
            class="fixed inset-0 bg-gray-900/95 backdrop-blur-xl z-50 flex items-center justify-center p-4 animate-fade-in"
            on:click=move |_| on_click(OverlayClick::Backdrop)
        >
            <div
                class="max-w-5xl w-full bg-gray-800 border border-gray-700 rounded-3xl overflow-hidden shadow-2xl"
                on:click=|ev: ev::MouseEvent| ev.stop_propagation()
            >
                <div class="grid md:grid-cols-5">
                    <div class="md:col-span-2 relative aspect-[3/4] md:aspect-auto">
                        <img src=item.image_url.clone() alt=item.name.clone() class="w-full h-full object-cover" />
                        {badge.map(|(name, color)| view! {
                            <div
                                class="absolute top-6 left-6 px-4 py-2 rounded-full text-sm font-bold text-white shadow-xl"
                                style=format!("background-color: {}", color)
                            >
                                {name}
                            </div>
                        })}
                    </div>

                    <div class="md:col-span-3 p-8 md:p-12 flex flex-col justify-between">
                        <div>
                            <h2 class="text-4xl font-black mb-3 text-primary-400">{item.name.clone()}</h2>
                            {telegram_link.zip(handle).map(|(href, handle)| view! {
                                <a
                                    href=href
                                    target="_blank"
                                    rel="noopener noreferrer"
                                    class="inline-flex items-center gap-2 text-primary-400 hover:text-primary-300 font-medium mb-6"
                                >
                                    "✈ "{handle}
                                </a>
                            })}
                            <p class="text-gray-300 leading-relaxed text-lg my-6">{item.bio.clone()}</p>
                            <div class="text-sm text-gray-400 bg-gray-700/50 rounded-lg px-4 py-3 w-fit">
                                "Added: "{added_on}
                            </div>
                        </div>

                        <button
                            on:click=move |_| on_close()
                            class="mt-8 w-full px-6 py-4 bg-primary-600 hover:bg-primary-700 rounded-xl font-bold text-lg transition-colors"
                        >
                            "✕ Close"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
