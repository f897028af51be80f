//! Page-level view state: what the shopper is looking at.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::filter::{CategorySelector, ProductQuery, QuickFilter};

/// Top-level page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Cart,
}

/// Listing inputs, current page and the product open in the detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    category: CategorySelector,
    quick_filter: QuickFilter,
    search: String,
    page: Page,
    selected_product: Option<Product>,
}

impl ViewState {
    /// Home page, every category, no filter or search.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a category and return to the listing.
    pub fn change_category(&mut self, category: CategorySelector) {
        self.category = category;
        self.page = Page::Home;
    }

    /// Select a quick filter and return to the listing.
    pub fn change_filter(&mut self, filter: QuickFilter) {
        self.quick_filter = filter;
        self.page = Page::Home;
    }

    /// Set the search term and return to the listing.
    ///
    /// A non-empty term widens the category back to `All` so results are not
    /// hidden by a stale category.
    pub fn search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = Page::Home;
        if !self.search.is_empty() {
            self.category = CategorySelector::All;
        }
    }

    /// Reset the category to `All` without leaving the current page.
    pub fn clear_category(&mut self) {
        self.category = CategorySelector::All;
    }

    pub fn show_cart(&mut self) {
        self.page = Page::Cart;
    }

    pub fn continue_shopping(&mut self) {
        self.page = Page::Home;
    }

    /// Open the detail view for `product`, replacing any open one.
    pub fn select_product(&mut self, product: Product) {
        self.selected_product = Some(product);
    }

    pub fn close_product(&mut self) {
        self.selected_product = None;
    }

    #[must_use]
    pub const fn category(&self) -> CategorySelector {
        self.category
    }

    #[must_use]
    pub const fn quick_filter(&self) -> &QuickFilter {
        &self.quick_filter
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    #[must_use]
    pub const fn selected_product(&self) -> Option<&Product> {
        self.selected_product.as_ref()
    }

    /// The listing query for the current inputs.
    #[must_use]
    pub fn query(&self) -> ProductQuery {
        ProductQuery {
            category: self.category,
            search: self.search.clone(),
            quick_filter: self.quick_filter.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tech_bazaar_core::{Category, CurrencyCode, ProductId};

    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_defaults() {
        let view = ViewState::new();
        assert_eq!(view.page(), Page::Home);
        assert_eq!(view.category(), CategorySelector::All);
        assert_eq!(view.quick_filter(), &QuickFilter::All);
        assert!(view.selected_product().is_none());
    }

    #[test]
    fn test_changes_return_home() {
        let mut view = ViewState::new();
        view.show_cart();
        view.change_category(CategorySelector::Only(Category::Audio));
        assert_eq!(view.page(), Page::Home);

        view.show_cart();
        view.change_filter(QuickFilter::Sale);
        assert_eq!(view.page(), Page::Home);

        view.show_cart();
        view.search("");
        assert_eq!(view.page(), Page::Home);
    }

    #[test]
    fn test_search_resets_category() {
        let mut view = ViewState::new();
        view.change_category(CategorySelector::Only(Category::Mobile));
        view.search("");
        assert_eq!(view.category(), CategorySelector::Only(Category::Mobile));

        view.search("dyson");
        assert_eq!(view.category(), CategorySelector::All);
        assert_eq!(view.search_term(), "dyson");
    }

    #[test]
    fn test_clear_category_keeps_page() {
        let mut view = ViewState::new();
        view.change_category(CategorySelector::Only(Category::TV));
        view.show_cart();
        view.clear_category();
        assert_eq!(view.category(), CategorySelector::All);
        assert_eq!(view.page(), Page::Cart);
    }

    #[test]
    fn test_query_drives_listing() {
        let catalog = Catalog::seeded(CurrencyCode::USD);
        let mut view = ViewState::new();
        view.change_category(CategorySelector::Only(Category::Mobile));
        view.change_filter(QuickFilter::Expensive);

        let ids: Vec<&str> = view
            .query()
            .apply(&catalog)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["1", "8"]);
    }

    #[test]
    fn test_select_and_close_product() {
        let catalog = Catalog::seeded(CurrencyCode::USD);
        let mut view = ViewState::new();
        let product = catalog.find(&ProductId::from("3")).unwrap().clone();
        view.select_product(product);
        assert_eq!(view.selected_product().unwrap().name, "PlayStation 5 Pro");
        view.close_product();
        assert!(view.selected_product().is_none());
    }
}
