//! The fixed product catalog and its page component.
//!
//! A static list of eight products; no pagination, filtering, or search.

use std::sync::Arc;

use smartcart_core::{CartItem, Product};

use crate::cart::CartStore;
use crate::shell::PageShell;
use crate::views::ProductCardView;

/// The hardcoded catalog.
///
/// Categories must match the labels the backend's encoders were trained on.
#[must_use]
pub fn products() -> Vec<Product> {
    [
        (1, "Smartphone", 1499.00, "Electronics", "electronics.jpg"),
        (2, "Stylish Jean", 799.00, "Clothing", "fashion.jpg"),
        (3, "Organic Rice Pack", 299.00, "Groceries", "grocery.jpg"),
        (4, "Smart Blender", 999.00, "Electronics", "home.jpg"),
        (
            5,
            "Noise-Cancelling Headphones",
            2199.00,
            "Electronics",
            "headphones.jpg",
        ),
        (6, "Comfortable Sweater", 1299.00, "Clothing", "sweater.jpg"),
        (7, "Fresh Produce Basket", 450.00, "Groceries", "fruit.jpg"),
        (
            8,
            "Ergonomic Office Chair",
            3500.00,
            "Home Decor",
            "chair.jpg",
        ),
    ]
    .into_iter()
    .map(|(id, name, price, category, image)| Product {
        id,
        name: name.to_string(),
        price,
        category: category.to_string(),
        image: image.to_string(),
    })
    .collect()
}

/// The shop page: renders product cards and delegates adds to the cart store.
pub struct CatalogPage {
    store: CartStore,
    shell: Arc<dyn PageShell>,
}

impl CatalogPage {
    #[must_use]
    pub fn new(store: CartStore, shell: Arc<dyn PageShell>) -> Self {
        Self { store, shell }
    }

    /// One card per catalog product.
    #[must_use]
    pub fn render(&self) -> Vec<ProductCardView> {
        products().iter().map(ProductCardView::from).collect()
    }

    /// Handle an "add to cart" click for the given product.
    pub fn add_to_cart(&self, product: &Product) {
        self.store.add(CartItem::from(product));
        self.shell
            .notify(&format!("\"{}\" added to cart!", product.name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::RecordingShell;
    use crate::storage::LocalStore;

    fn page_with_shell() -> (CatalogPage, Arc<RecordingShell>, CartStore) {
        let shell = Arc::new(RecordingShell::new());
        let store = CartStore::new(Arc::new(LocalStore::in_memory()), shell.clone());
        (
            CatalogPage::new(store.clone(), shell.clone()),
            shell,
            store,
        )
    }

    #[test]
    fn catalog_has_eight_products_with_known_categories() {
        let all = products();
        assert_eq!(all.len(), 8);
        for product in &all {
            assert!(matches!(
                product.category.as_str(),
                "Electronics" | "Clothing" | "Groceries" | "Home Decor"
            ));
            assert!(product.price > 0.0);
        }
    }

    #[test]
    fn render_formats_prices() {
        let (page, _, _) = page_with_shell();
        let cards = page.render();
        assert_eq!(cards.len(), 8);
        assert_eq!(cards[0].name, "Smartphone");
        assert_eq!(cards[0].price, "₹1499.00");
    }

    #[test]
    fn add_to_cart_delegates_and_notifies() {
        let (page, shell, store) = page_with_shell();
        let all = products();
        page.add_to_cart(&all[0]);

        assert_eq!(store.count(), 1);
        assert_eq!(
            shell.notifications(),
            vec!["\"Smartphone\" added to cart!".to_string()]
        );
    }
}
