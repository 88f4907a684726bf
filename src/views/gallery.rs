//! Gallery View
//!
//! Public listing with category filters and a detail overlay. Items and
//! categories are fetched together on mount; the view stays in its loading
//! state until both have answered.

use futures_util::future::join;
use std::cell::{Cell, RefCell};

use crate::filter::{self, FilterChip};
use crate::format::{format_long_date, telegram_link, DateLocale};
use crate::gateway::Gateway;
use crate::models::{Category, CategoryId, Item, ItemId};
use crate::notify::{Notification, Notifier};

/// Where a click on the open detail overlay landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayClick {
    /// Dimmed area around the card: closes the overlay
    Backdrop,
    /// Inside the card: must not reach the backdrop handler
    Content,
}

/// Why the grid is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Nothing has been added yet
    NoItems,
    /// The active category has no entries
    EmptyCategory,
}

impl EmptyState {
    pub fn title(&self) -> &'static str {
        match self {
            EmptyState::NoItems => "No one here yet",
            EmptyState::EmptyCategory => "Nobody in this category",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            EmptyState::NoItems => "Add the first person from the admin panel",
            EmptyState::EmptyCategory => "Try choosing another category",
        }
    }
}

/// Content of the detail overlay
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetail {
    pub item: Item,
    /// Long-form creation date, or the raw timestamp if it could not be parsed
    pub added_on: String,
    pub telegram_link: Option<String>,
    /// Category `(name, color)`, when the endpoint joined them in
    pub badge: Option<(String, String)>,
}

pub struct GalleryView<G, N> {
    gateway: G,
    notifier: N,
    locale: DateLocale,
    items: RefCell<Vec<Item>>,
    categories: RefCell<Vec<Category>>,
    active_filter: Cell<Option<CategoryId>>,
    selected: Cell<Option<ItemId>>,
    loading: Cell<bool>,
}

impl<G: Gateway, N: Notifier> GalleryView<G, N> {
    /// New view, in the loading state until [`GalleryView::load`] completes
    pub fn new(gateway: G, notifier: N, locale: DateLocale) -> Self {
        Self {
            gateway,
            notifier,
            locale,
            items: RefCell::new(Vec::new()),
            categories: RefCell::new(Vec::new()),
            active_filter: Cell::new(None),
            selected: Cell::new(None),
            loading: Cell::new(true),
        }
    }

    /// Fetch items and categories concurrently
    pub async fn load(&self) {
        self.loading.set(true);
        self.notifier.changed();

        let (items, categories) = join(self.gateway.list_items(), self.gateway.list_categories()).await;

        let mut connection_lost = false;
        match items {
            Ok(items) => {
                tracing::info!(count = items.len(), "Loaded gallery items");
                *self.items.borrow_mut() = items;
            }
            Err(e) => {
                tracing::error!("Failed to fetch items: {}", e);
                connection_lost |= e.is_connection_failure();
            }
        }
        match categories {
            Ok(categories) => *self.categories.borrow_mut() = categories,
            Err(e) => {
                tracing::error!("Failed to fetch categories: {}", e);
                connection_lost |= e.is_connection_failure();
            }
        }

        if connection_lost {
            self.notifier.notify(Notification::connection_failed());
        }

        self.loading.set(false);
        self.notifier.changed();
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn locale(&self) -> DateLocale {
        self.locale
    }

    pub fn items(&self) -> Vec<Item> {
        self.items.borrow().clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.borrow().clone()
    }

    pub fn active_filter(&self) -> Option<CategoryId> {
        self.active_filter.get()
    }

    /// `None` shows everything
    pub fn set_filter(&self, filter: Option<CategoryId>) {
        self.active_filter.set(filter);
        self.notifier.changed();
    }

    pub fn visible_items(&self) -> Vec<Item> {
        let items = self.items.borrow();
        filter::visible_items(&items, self.active_filter.get())
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn filter_chips(&self) -> Vec<FilterChip> {
        filter::filter_chips(
            &self.items.borrow(),
            &self.categories.borrow(),
            self.active_filter.get(),
        )
    }

    /// Set when the grid has nothing to show
    pub fn empty_state(&self) -> Option<EmptyState> {
        let items = self.items.borrow();
        let filter = self.active_filter.get();
        if items.iter().any(|item| filter::matches(item, filter)) {
            None
        } else if filter.is_some() {
            Some(EmptyState::EmptyCategory)
        } else {
            Some(EmptyState::NoItems)
        }
    }

    /// Open the detail overlay for an item
    pub fn select(&self, id: ItemId) -> bool {
        if !self.items.borrow().iter().any(|item| item.id == id) {
            return false;
        }
        self.selected.set(Some(id));
        self.notifier.changed();
        true
    }

    pub fn selected_item(&self) -> Option<Item> {
        let id = self.selected.get()?;
        self.items.borrow().iter().find(|item| item.id == id).cloned()
    }

    pub fn detail(&self) -> Option<ItemDetail> {
        let item = self.selected_item()?;
        let added_on = format_long_date(&item.created_at, self.locale)
            .unwrap_or_else(|| item.created_at.clone());
        let telegram_link = item.handle().and_then(telegram_link);
        let badge = item
            .badge()
            .map(|(name, color)| (name.to_string(), color.to_string()));

        Some(ItemDetail {
            item,
            added_on,
            telegram_link,
            badge,
        })
    }

    /// Close button
    pub fn close_detail(&self) {
        if self.selected.take().is_some() {
            self.notifier.changed();
        }
    }

    /// Click routing for the overlay; returns whether it closed
    pub fn handle_overlay_click(&self, target: OverlayClick) -> bool {
        match target {
            OverlayClick::Backdrop if self.selected.get().is_some() => {
                self.close_detail();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::fixtures::{category, item};
    use crate::gateway::mock::{Call, MockGateway};
    use crate::notify::NotificationLog;

    fn view(gw: MockGateway) -> GalleryView<MockGateway, NotificationLog> {
        GalleryView::new(gw, NotificationLog::new(), DateLocale::En)
    }

    fn scenario() -> MockGateway {
        MockGateway::with_data(
            vec![item(1, Some(1)), item(2, Some(2))],
            vec![category(1, "A", "#111"), category(2, "B", "#222")],
        )
    }

    fn ids(items: &[Item]) -> Vec<i64> {
        items.iter().map(|i| i.id).collect()
    }

    #[tokio::test]
    async fn test_loading_until_both_fetches_resolve() {
        let gallery = view(scenario());
        assert!(gallery.is_loading());

        gallery.load().await;

        assert!(!gallery.is_loading());
        assert_eq!(gallery.items().len(), 2);
        assert_eq!(gallery.categories().len(), 2);

        let calls = gallery.gateway.calls();
        assert!(calls.contains(&Call::ListItems));
        assert!(calls.contains(&Call::ListCategories));
    }

    #[tokio::test]
    async fn test_filter_scenario() {
        let gallery = view(scenario());
        gallery.load().await;

        gallery.set_filter(Some(1));
        assert_eq!(ids(&gallery.visible_items()), vec![1]);

        gallery.set_filter(None);
        assert_eq!(ids(&gallery.visible_items()), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_empty_states() {
        let gallery = view(MockGateway::with_data(vec![], vec![category(1, "A", "#111")]));
        gallery.load().await;
        assert_eq!(gallery.empty_state(), Some(EmptyState::NoItems));

        let gallery = view(MockGateway::with_data(
            vec![item(1, Some(2))],
            vec![category(1, "A", "#111"), category(2, "B", "#222")],
        ));
        gallery.load().await;
        assert_eq!(gallery.empty_state(), None);
        gallery.set_filter(Some(1));
        assert_eq!(gallery.empty_state(), Some(EmptyState::EmptyCategory));
    }

    #[tokio::test]
    async fn test_offline_load_notifies_and_stops_loading() {
        let gw = scenario();
        gw.offline.set(true);
        let gallery = view(gw);

        gallery.load().await;

        assert!(!gallery.is_loading());
        assert!(gallery.items().is_empty());
        let notes = gallery.notifier.entries();
        assert_eq!(notes, vec![Notification::connection_failed()]);
    }

    #[tokio::test]
    async fn test_detail_overlay() {
        let mut person = item(5, Some(1));
        person.telegram_username = Some("@anna".into());
        person.created_at = "2025-10-25T04:00:00".into();
        let gallery = view(MockGateway::with_data(vec![person], vec![]));
        gallery.load().await;

        assert!(!gallery.select(404));
        assert!(gallery.select(5));

        let detail = gallery.detail().unwrap();
        assert_eq!(detail.added_on, "October 25, 2025");
        assert_eq!(detail.telegram_link.as_deref(), Some("https://t.me/anna"));
        assert_eq!(detail.item.bio, "Bio of person 5");
        assert_eq!(detail.badge, None);
    }

    #[tokio::test]
    async fn test_detail_carries_category_badge() {
        let mut person = item(7, Some(1));
        person.category_name = Some("Bloggers".into());
        person.category_color = Some("#ff0066".into());
        let gallery = view(MockGateway::with_data(
            vec![person],
            vec![category(1, "Bloggers", "#ff0066")],
        ));
        gallery.load().await;
        gallery.select(7);

        let detail = gallery.detail().unwrap();
        assert_eq!(
            detail.badge,
            Some(("Bloggers".to_string(), "#ff0066".to_string()))
        );
    }

    #[tokio::test]
    async fn test_detail_falls_back_to_raw_date() {
        let mut person = item(5, None);
        person.created_at = "sometime".into();
        let gallery = view(MockGateway::with_data(vec![person], vec![]));
        gallery.load().await;
        gallery.select(5);

        let detail = gallery.detail().unwrap();
        assert_eq!(detail.added_on, "sometime");
        assert_eq!(detail.telegram_link, None);
    }

    #[tokio::test]
    async fn test_clicks_inside_overlay_do_not_close_it() {
        let gallery = view(scenario());
        gallery.load().await;
        gallery.select(1);

        assert!(!gallery.handle_overlay_click(OverlayClick::Content));
        assert!(gallery.detail().is_some());

        assert!(gallery.handle_overlay_click(OverlayClick::Backdrop));
        assert!(gallery.detail().is_none());

        gallery.select(2);
        gallery.close_detail();
        assert!(gallery.selected_item().is_none());
    }
}
