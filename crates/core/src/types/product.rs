//! Catalog products.

use serde::{Deserialize, Serialize};

/// A fixed catalog entry.
///
/// The category strings must match the labels the backend's encoders were
/// trained on (`Electronics`, `Clothing`, `Groceries`, `Home Decor`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: f64,
    pub category: String,
    /// Image file name under the static assets directory.
    pub image: String,
}
