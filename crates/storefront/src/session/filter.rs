//! Active category tracking.

use shopfront_core::Category;

/// What the product grid should show after a category change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelection {
    /// Show the cached catalog as-is; no fetch needed.
    ShowCached,
    /// Fetch this category's products from the catalog.
    Fetch(Category),
}

/// Remembers which category the product grid is filtered by.
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    active: Category,
}

impl CategoryFilter {
    /// A filter showing every product.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The category currently selected.
    #[must_use]
    pub const fn active(&self) -> &Category {
        &self.active
    }

    /// Make `category` active and decide how to populate the grid.
    pub fn select(&mut self, category: Category) -> CategorySelection {
        self.active = category.clone();
        if category.is_all() {
            CategorySelection::ShowCached
        } else {
            CategorySelection::Fetch(category)
        }
    }

    /// Whether `category` is the active one.
    #[must_use]
    pub fn is_active(&self, category: &Category) -> bool {
        &self.active == category
    }
}
