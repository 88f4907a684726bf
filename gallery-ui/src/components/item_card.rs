//! Item Card Component
//!
//! One person in the gallery grid.

use fame_gallery::{Item, ItemId};
use leptos::*;

/// Gallery card; clicking it opens the detail overlay
#[component]
pub fn ItemCard(
    item: Item,
    /// Position in the grid, staggers the fade-in
    #[prop(default = 0)]
    index: usize,
    on_select: impl Fn(ItemId) + 'static,
) -> impl IntoView {
    let id = item.id;
    let badge = item
        .badge()
        .map(|(name, color)| (name.to_string(), color.to_string()));
    let handle = item.handle().map(str::to_string);

    view! {
        <div
            class="group cursor-pointer overflow-hidden rounded-lg border border-gray-700 bg-gray-800
                   hover:border-primary-500 transition-all duration-500 hover:-translate-y-2 animate-fade-in"
            style=format!("animation-delay: {}ms", index * 50)
            on:click=move |_| on_select(id)
        >
            <div class="relative aspect-[3/4] overflow-hidden">
                <img
                    src=item.image_url.clone()
                    alt=item.name.clone()
                    class="w-full h-full object-cover transition-transform duration-700 group-hover:scale-110"
                />
                {badge.map(|(name, color)| view! {
                    <div
                        class="absolute top-3 right-3 z-10 px-3 py-1 rounded-full text-xs font-bold text-white shadow-xl"
                        style=format!("background-color: {}", color)
                    >
                        {name}
                    </div>
                })}
                <div class="absolute inset-0 bg-gradient-to-t from-gray-900 via-gray-900/60 to-transparent" />
                <div class="absolute bottom-0 left-0 right-0 p-4">
                    <h3 class="text-lg font-bold mb-1 line-clamp-1">{item.name.clone()}</h3>
                    {handle.map(|h| view! {
                        <p class="text-xs text-primary-400 font-medium mb-2">{h}</p>
                    })}
                    <p class="text-xs text-gray-400 line-clamp-2">{item.bio.clone()}</p>
                </div>
            </div>
        </div>
    }
}
