//! Page components: prediction form and cart/checkout.

pub mod cart;
pub mod predict;

pub use cart::CartPage;
pub use predict::PredictPage;
