//! Display data the page components hand to the embedding page.
//!
//! Plain structs with pre-formatted price strings; how they become markup is
//! the page's business.

use smartcart_core::{CartItem, Prediction, Product};

/// Format an amount as a price string.
#[must_use]
pub fn format_price(amount: f64) -> String {
    format!("₹{amount:.2}")
}

/// Format a bare amount with two decimals, no currency symbol.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Product card display data for the catalog page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCardView {
    pub name: String,
    pub category: String,
    pub price: String,
    /// Image file name under the static assets directory.
    pub image: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone(),
            price: format_price(product.price),
            image: product.image.clone(),
        }
    }
}

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineView {
    /// Position in the cart; the remove control carries it back.
    pub index: usize,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub line_price: String,
}

impl CartLineView {
    #[must_use]
    pub fn from_item(index: usize, item: &CartItem) -> Self {
        Self {
            index,
            name: item.name.clone(),
            category: item.category.clone(),
            quantity: item.quantity,
            line_price: format_price(item.line_price()),
        }
    }
}

/// Smart-price offer section of the cart page.
#[derive(Debug, Clone, PartialEq)]
pub struct SmartPriceOfferView {
    pub predicted_price: String,
}

/// Full cart page display data.
#[derive(Debug, Clone, PartialEq)]
pub struct CartPageView {
    pub lines: Vec<CartLineView>,
    /// Show the "no items" placeholder instead of the list.
    pub empty: bool,
    pub pay_enabled: bool,
    /// Sum of original price x quantity, two decimals.
    pub total_original: String,
    /// Sum of current price x quantity (reflects predicted-offer pricing),
    /// two decimals.
    pub total_calculated: String,
    /// Present only while the cached prediction undercuts the calculated
    /// total.
    pub offer: Option<SmartPriceOfferView>,
}

/// Navbar cart badge state; hidden when the cart has no entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartCountView {
    pub count: usize,
    pub visible: bool,
}

impl CartCountView {
    #[must_use]
    pub fn from_count(count: usize) -> Self {
        Self {
            count,
            visible: count > 0,
        }
    }
}

/// Prediction result panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionView {
    pub optimized_price: String,
    /// Conversion probability as a percentage with two decimals.
    pub conversion_probability: String,
    pub customer_segment: String,
}

impl From<&Prediction> for PredictionView {
    fn from(prediction: &Prediction) -> Self {
        Self {
            optimized_price: format_price(prediction.optimized_price),
            conversion_probability: format!("{:.2}%", prediction.conversion_probability * 100.0),
            customer_segment: prediction.customer_segment.clone(),
        }
    }
}

/// Submit control state on the prediction page.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitButtonView {
    pub enabled: bool,
    pub label: &'static str,
}

/// Confirm control state inside the payment dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmButtonView {
    pub enabled: bool,
    pub label: &'static str,
}

/// Payment confirmation dialog contents.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmDialogView {
    /// The currently displayed total, two decimals.
    pub final_price: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1499.0), "₹1499.00");
        assert_eq!(format_price(0.005), "₹0.01");
        assert_eq!(format_amount(0.0), "0.00");
    }

    #[test]
    fn badge_hidden_at_zero() {
        assert!(!CartCountView::from_count(0).visible);
        assert!(CartCountView::from_count(1).visible);
    }

    #[test]
    fn prediction_view_formats_probability_as_percentage() {
        let prediction = Prediction {
            optimized_price: 1349.1,
            conversion_probability: 0.8234,
            customer_segment: "High-Value Shopper".to_string(),
        };
        let view = PredictionView::from(&prediction);
        assert_eq!(view.optimized_price, "₹1349.10");
        assert_eq!(view.conversion_probability, "82.34%");
    }
}
