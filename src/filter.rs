//! Category Filtering
//!
//! `None` means "show all"; otherwise only items in the chosen category pass.

use crate::models::{Category, CategoryId, Item};

/// Whether `item` passes the active filter
pub fn matches(item: &Item, filter: Option<CategoryId>) -> bool {
    match filter {
        None => true,
        Some(id) => item.category_id == Some(id),
    }
}

/// Items passing the filter, in their original order
pub fn visible_items(items: &[Item], filter: Option<CategoryId>) -> Vec<&Item> {
    items.iter().filter(|item| matches(item, filter)).collect()
}

/// Number of items in a category
pub fn count_in_category(items: &[Item], category: CategoryId) -> usize {
    items
        .iter()
        .filter(|item| item.category_id == Some(category))
        .count()
}

/// One filter button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    /// Filter applied when the chip is clicked
    pub filter: Option<CategoryId>,
    pub label: String,
    pub count: usize,
    /// Category color, `None` for the "All" chip
    pub color: Option<String>,
    pub active: bool,
}

/// The "All" chip followed by one chip per category
pub fn filter_chips(
    items: &[Item],
    categories: &[Category],
    active: Option<CategoryId>,
) -> Vec<FilterChip> {
    let mut chips = Vec::with_capacity(categories.len() + 1);

    chips.push(FilterChip {
        filter: None,
        label: "All".to_string(),
        count: items.len(),
        color: None,
        active: active.is_none(),
    });

    chips.extend(categories.iter().map(|cat| FilterChip {
        filter: Some(cat.id),
        label: cat.name.clone(),
        count: count_in_category(items, cat.id),
        color: Some(cat.color.clone()),
        active: active == Some(cat.id),
    }));

    chips
}
