//! Inventory filtering

use crate::domain::{Category, PantryItem};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// "all" (any case) disables category filtering
    pub fn from_str(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(Category::from_str(s))
        }
    }

    fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

/// Items whose name contains `search` (case-insensitive) and whose
/// category passes `filter`, in store order
pub fn filter_items<'a>(items: &'a [PantryItem], filter: &CategoryFilter, search: &str) -> Vec<&'a PantryItem> {
    let needle = search.trim().to_lowercase();
    items
        .iter()
        .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
        .filter(|item| filter.matches(&item.category))
        .collect()
}
