//! Screen state for the product list.
//!
//! One value holds the active tab, the open overlay, the filter inputs, the
//! load state and the transient notice, so that they cannot drift apart.

use crate::model::{Product, ProductId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    ToPurchase,
    Purchased,
}

impl Tab {
    pub fn title(self) -> &'static str {
        match self {
            Tab::ToPurchase => "Produkty do zakupu",
            Tab::Purchased => "Produkty kupione",
        }
    }

    pub fn includes(self, product: &Product) -> bool {
        match self {
            Tab::ToPurchase => !product.purchased,
            Tab::Purchased => product.purchased,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Sidebar,
    FilterDialog,
    ConfirmDelete(ProductId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

/// Dismissable message raised by a failed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Błąd",
            message: message.into(),
        }
    }
}

/// Filter dialog inputs, kept as typed so the dialog can be reopened as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub store: String,
    pub max_price: String,
}

impl ProductFilter {
    pub fn new(store: impl Into<String>, max_price: impl Into<String>) -> Self {
        Self {
            store: store.into(),
            max_price: max_price.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.store.trim().is_empty() || !self.max_price.trim().is_empty()
    }

    /// Store: case-insensitive substring of the query as typed, surrounding
    /// spaces included; a blank query is ignored. Price: amount at most the
    /// ceiling; an unparsable ceiling matches nothing.
    pub fn matches(&self, product: &Product) -> bool {
        let store_ok = self.store.trim().is_empty()
            || product
                .store
                .to_lowercase()
                .contains(&self.store.to_lowercase());

        let ceiling = self.max_price.trim();
        let price_ok = ceiling.is_empty()
            || ceiling
                .parse::<f64>()
                .ok()
                .filter(|c| !c.is_nan())
                .is_some_and(|c| product.price.at_most(c));

        store_ok && price_ok
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListSection<'a> {
    pub title: &'static str,
    pub items: Vec<&'a Product>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub tab: Tab,
    pub overlay: Overlay,
    pub filter: ProductFilter,
    pub load: LoadState,
    pub notice: Option<Notice>,
    pub dark_mode: bool,
}

impl ViewState {
    pub fn open_sidebar(&mut self) {
        self.overlay = Overlay::Sidebar;
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        if self.overlay == Overlay::Sidebar {
            self.overlay = Overlay::None;
        }
    }

    pub fn open_filter(&mut self) {
        self.overlay = Overlay::FilterDialog;
    }

    pub fn apply_filter(&mut self, filter: ProductFilter) {
        self.filter = filter;
        if self.overlay == Overlay::FilterDialog {
            self.overlay = Overlay::None;
        }
    }

    pub fn clear_filter(&mut self) {
        self.filter = ProductFilter::default();
    }

    pub fn confirm_delete(&mut self, id: ProductId) {
        self.overlay = Overlay::ConfirmDelete(id);
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    pub fn raise(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// The single section shown for the active tab.
    pub fn section<'a>(&self, products: &'a [Product]) -> ListSection<'a> {
        let items = products
            .iter()
            .filter(|p| self.tab.includes(p))
            .filter(|p| self.filter.matches(p))
            .collect();

        ListSection {
            title: self.tab.title(),
            items,
        }
    }
}
