//! HTTP clients for the two backend endpoints.

pub mod prediction;
pub mod purchase;

pub use prediction::{PredictionClient, PredictionError};
pub use purchase::{PurchaseClient, PurchaseError};
