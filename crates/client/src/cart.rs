//! The cart store - single owner of all persisted client state.
//!
//! Every read and write of the cart and of the cached prediction goes through
//! this module; nothing else touches the storage keys.

use std::sync::Arc;

use smartcart_core::{CachedPrediction, CartItem};

use crate::shell::PageShell;
use crate::storage::{LocalStore, keys};
use crate::views::CartCountView;

/// Persistent cart state behind an explicit API.
#[derive(Clone)]
pub struct CartStore {
    store: Arc<LocalStore>,
    shell: Arc<dyn PageShell>,
}

impl CartStore {
    #[must_use]
    pub fn new(store: Arc<LocalStore>, shell: Arc<dyn PageShell>) -> Self {
        Self { store, shell }
    }

    /// Load the full cart.
    ///
    /// Absent or unparsable storage reads as an empty cart, never an error.
    #[must_use]
    pub fn load(&self) -> Vec<CartItem> {
        let Some(raw) = self.store.get(keys::CART) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(cart) => cart,
            Err(e) => {
                tracing::warn!(error = %e, "Unparsable cart payload, treating as empty");
                Vec::new()
            }
        }
    }

    /// Persist the full cart, replacing prior contents.
    pub fn save(&self, cart: &[CartItem]) {
        match serde_json::to_string(cart) {
            Ok(raw) => self.store.set(keys::CART, &raw),
            Err(e) => tracing::error!(error = %e, "Failed to serialize cart"),
        }
    }

    /// Add an item to the cart.
    ///
    /// An existing entry with the same catalog id gains quantity instead of a
    /// duplicate line; its price is untouched. Predicted-offer entries never
    /// merge. New entries land with quantity 1 and their original price
    /// captured (defaulting to the current price).
    pub fn add(&self, item: CartItem) {
        let mut cart = self.load();

        let existing = cart
            .iter_mut()
            .find(|entry| entry.id == item.id && !item.id.is_offer());
        if let Some(entry) = existing {
            entry.quantity += 1;
            tracing::debug!(id = %entry.id, quantity = entry.quantity, "Incremented cart quantity");
        } else {
            let original_price = item.original_price.unwrap_or(item.price);
            cart.push(CartItem {
                quantity: 1,
                original_price: Some(original_price),
                ..item
            });
        }

        self.save(&cart);
        self.refresh_badge(cart.len());
    }

    /// Remove the entry at `index`. Out-of-range indices are a no-op.
    ///
    /// Returns whether an entry was removed.
    pub fn remove(&self, index: usize) -> bool {
        let mut cart = self.load();
        if index >= cart.len() {
            return false;
        }

        let removed = cart.remove(index);
        tracing::debug!(name = %removed.name, "Removed cart item");
        self.save(&cart);
        self.refresh_badge(cart.len());
        true
    }

    /// Number of distinct cart entries (not the sum of quantities).
    #[must_use]
    pub fn count(&self) -> usize {
        self.load().len()
    }

    /// Cache a successful prediction for later cart actions.
    ///
    /// There is one slot system-wide; each successful prediction supersedes
    /// the last. The category is stored twice: once as the display name the
    /// follow-up cart action reuses, once as the category for the purchase
    /// record.
    pub fn cache_prediction(&self, optimized_price: f64, category: &str) {
        self.store
            .set(keys::PREDICTED_PRICE, &optimized_price.to_string());
        self.store.set(keys::PREDICTED_PRODUCT_NAME, category);
        self.store.set(keys::PREDICTED_PRODUCT_CATEGORY, category);
    }

    /// The cached prediction, if a valid one exists.
    ///
    /// Returns `None` when the price is missing, non-numeric, non-finite or
    /// not strictly positive, or when no product name was cached.
    #[must_use]
    pub fn cached_prediction(&self) -> Option<CachedPrediction> {
        let price = self
            .store
            .get(keys::PREDICTED_PRICE)?
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite() && *price > 0.0)?;
        let product_name = self
            .store
            .get(keys::PREDICTED_PRODUCT_NAME)
            .filter(|name| !name.is_empty())?;
        let category = self
            .store
            .get(keys::PREDICTED_PRODUCT_CATEGORY)
            .unwrap_or_else(|| product_name.clone());

        Some(CachedPrediction {
            price,
            product_name,
            category,
        })
    }

    /// Clear the cart and all cached prediction state together.
    pub fn clear_checkout_state(&self) {
        self.store.remove(keys::CART);
        self.store.remove(keys::PREDICTED_PRICE);
        self.store.remove(keys::PREDICTED_PRODUCT_NAME);
        self.store.remove(keys::PREDICTED_PRODUCT_CATEGORY);
        self.refresh_badge(0);
    }

    /// Push the current distinct-entry count to the navbar badge.
    pub fn refresh_badge(&self, count: usize) {
        self.shell.set_cart_badge(CartCountView::from_count(count));
    }
}

#[cfg(test)]
mod tests {
    use smartcart_core::ItemId;

    use super::*;
    use crate::shell::RecordingShell;

    fn store_with_shell() -> (CartStore, Arc<RecordingShell>) {
        let shell = Arc::new(RecordingShell::new());
        let store = CartStore::new(Arc::new(LocalStore::in_memory()), shell.clone());
        (store, shell)
    }

    fn catalog_item(id: u32, price: f64) -> CartItem {
        CartItem {
            id: ItemId::Catalog(id),
            name: format!("Item {id}"),
            price,
            original_price: Some(price),
            category: "Electronics".to_string(),
            quantity: 1,
            image: None,
        }
    }

    fn offer_item(token: i64, price: f64) -> CartItem {
        CartItem {
            id: ItemId::offer_from_millis(token),
            name: "Predicted Offer for Electronics".to_string(),
            price,
            original_price: Some(price + 100.0),
            category: "Electronics".to_string(),
            quantity: 1,
            image: None,
        }
    }

    #[test]
    fn load_on_empty_storage_is_empty() {
        let (store, _) = store_with_shell();
        assert!(store.load().is_empty());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn adding_same_catalog_id_twice_increments_quantity() {
        let (store, _) = store_with_shell();
        store.add(catalog_item(1, 1499.0));
        store.add(catalog_item(1, 1499.0));

        let cart = store.load();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].quantity, 2);
        assert!((cart[0].price - 1499.0).abs() < f64::EPSILON);
    }

    #[test]
    fn predicted_offers_never_merge() {
        let (store, _) = store_with_shell();
        store.add(offer_item(1000, 900.0));
        store.add(offer_item(2000, 900.0));

        let cart = store.load();
        assert_eq!(cart.len(), 2);
        assert!(cart.iter().all(|item| item.quantity == 1));
    }

    #[test]
    fn offers_with_identical_tokens_still_do_not_merge() {
        let (store, _) = store_with_shell();
        store.add(offer_item(1000, 900.0));
        store.add(offer_item(1000, 900.0));
        assert_eq!(store.load().len(), 2);
    }

    #[test]
    fn add_captures_original_price_when_missing() {
        let (store, _) = store_with_shell();
        let mut item = catalog_item(2, 799.0);
        item.original_price = None;
        store.add(item);

        let cart = store.load();
        assert_eq!(cart[0].original_price, Some(799.0));
    }

    #[test]
    fn remove_keeps_relative_order() {
        let (store, _) = store_with_shell();
        store.add(catalog_item(1, 10.0));
        store.add(catalog_item(2, 20.0));
        store.add(catalog_item(3, 30.0));

        assert!(store.remove(1));

        let cart = store.load();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart[0].id, ItemId::Catalog(1));
        assert_eq!(cart[1].id, ItemId::Catalog(3));
    }

    #[test]
    fn remove_out_of_range_is_a_noop() {
        let (store, _) = store_with_shell();
        store.add(catalog_item(1, 10.0));
        assert!(!store.remove(5));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn count_is_distinct_entries_not_quantities() {
        let (store, _) = store_with_shell();
        store.add(catalog_item(1, 10.0));
        store.add(catalog_item(1, 10.0));
        store.add(catalog_item(2, 20.0));
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn mutations_refresh_the_badge() {
        let (store, shell) = store_with_shell();
        store.add(catalog_item(1, 10.0));
        assert_eq!(shell.last_badge(), Some(CartCountView::from_count(1)));

        store.remove(0);
        assert_eq!(shell.last_badge(), Some(CartCountView::from_count(0)));
        assert!(!shell.last_badge().unwrap().visible);
    }

    #[test]
    fn corrupt_cart_payload_reads_as_empty() {
        let shell = Arc::new(RecordingShell::new());
        let local = Arc::new(LocalStore::in_memory());
        local.set(keys::CART, "not a cart");
        let store = CartStore::new(local, shell);
        assert!(store.load().is_empty());
    }

    #[test]
    fn cached_prediction_requires_positive_numeric_price() {
        let shell = Arc::new(RecordingShell::new());
        let local = Arc::new(LocalStore::in_memory());
        let store = CartStore::new(local.clone(), shell);

        assert_eq!(store.cached_prediction(), None);

        store.cache_prediction(1349.1, "Electronics");
        let cached = store.cached_prediction().unwrap();
        assert!((cached.price - 1349.1).abs() < f64::EPSILON);
        assert_eq!(cached.product_name, "Electronics");
        assert_eq!(cached.category, "Electronics");

        local.set(keys::PREDICTED_PRICE, "0");
        assert_eq!(store.cached_prediction(), None);

        local.set(keys::PREDICTED_PRICE, "not-a-number");
        assert_eq!(store.cached_prediction(), None);
    }

    #[test]
    fn clear_checkout_state_removes_all_keys() {
        let shell = Arc::new(RecordingShell::new());
        let local = Arc::new(LocalStore::in_memory());
        let store = CartStore::new(local.clone(), shell);

        store.add(catalog_item(1, 10.0));
        store.cache_prediction(5.0, "Groceries");
        store.clear_checkout_state();

        assert_eq!(local.get(keys::CART), None);
        assert_eq!(local.get(keys::PREDICTED_PRICE), None);
        assert_eq!(local.get(keys::PREDICTED_PRODUCT_NAME), None);
        assert_eq!(local.get(keys::PREDICTED_PRODUCT_CATEGORY), None);
    }
}
