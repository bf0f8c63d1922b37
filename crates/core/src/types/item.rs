//! Cart line items and their identifiers.

use serde::{Deserialize, Serialize};

use crate::types::product::Product;

/// Prefix carried by every synthetic predicted-offer identifier.
pub const OFFER_ID_PREFIX: &str = "predict_offer_";

/// Identifier of a cart entry.
///
/// Catalog items carry the numeric catalog id; predicted offers carry a
/// synthetic string token so they never collide with catalog entries. The
/// untagged representation keeps the persisted JSON identical to what the
/// backend expects: a number for catalog items, a string for offers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    /// Fixed catalog identifier (1-based).
    Catalog(u32),
    /// Synthetic predicted-offer token, e.g. `predict_offer_1714060800000`.
    Offer(String),
}

impl ItemId {
    /// Build the synthetic offer token from a millisecond timestamp.
    #[must_use]
    pub fn offer_from_millis(millis: i64) -> Self {
        Self::Offer(format!("{OFFER_ID_PREFIX}{millis}"))
    }

    /// Whether this id belongs to a predicted offer.
    ///
    /// Offer entries are exempt from the quantity-merge rule: two entries
    /// with offer ids never combine, whatever their tokens.
    #[must_use]
    pub fn is_offer(&self) -> bool {
        match self {
            Self::Catalog(_) => false,
            Self::Offer(token) => token.starts_with(OFFER_ID_PREFIX),
        }
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Catalog(id) => write!(f, "{id}"),
            Self::Offer(token) => f.write_str(token),
        }
    }
}

/// A single line in the persisted cart.
///
/// `original_price` is what the backend logs for the purchase record; it is
/// captured at insert time and never changes, while `price` may be a
/// model-suggested price for predicted offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ItemId,
    pub name: String,
    /// Current unit price (may be a predicted price for offer entries).
    pub price: f64,
    /// Unit price at the time the item entered the cart.
    #[serde(default)]
    pub original_price: Option<f64>,
    pub category: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Catalog image reference; absent for predicted offers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

const fn default_quantity() -> u32 {
    1
}

impl CartItem {
    /// Unit price captured when the item entered the cart, falling back to
    /// the current price for entries persisted without one.
    #[must_use]
    pub fn original_price(&self) -> f64 {
        self.original_price.unwrap_or(self.price)
    }

    /// Line subtotal at the current price.
    #[must_use]
    pub fn line_price(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Line subtotal at the original price.
    #[must_use]
    pub fn original_line_price(&self) -> f64 {
        self.original_price() * f64::from(self.quantity)
    }
}

impl From<&Product> for CartItem {
    fn from(product: &Product) -> Self {
        Self {
            id: ItemId::Catalog(product.id),
            name: product.name.clone(),
            price: product.price,
            original_price: Some(product.price),
            category: product.category.clone(),
            quantity: 1,
            image: Some(product.image.clone()),
        }
    }
}
