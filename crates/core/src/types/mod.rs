//! Core types for smartcart.
//!
//! Wire-compatible serde types for cart persistence, the catalog, and the
//! two backend endpoints (price prediction and purchase recording).

pub mod item;
pub mod prediction;
pub mod product;

pub use item::{CartItem, ItemId};
pub use prediction::{
    CachedPrediction, GuestProfile, Prediction, PredictionRequest, ProductContext,
    PurchaseReceipt,
};
pub use product::Product;
