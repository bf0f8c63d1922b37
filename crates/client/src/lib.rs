//! Smartcart client library.
//!
//! Client-side logic of the smartcart demo shop: a fixed product catalog, a
//! shopping cart persisted in local storage, a price-prediction form backed
//! by a scoring endpoint, and a checkout flow that posts a purchase record.
//!
//! # Architecture
//!
//! - [`storage`] - local key-value store, the browser-storage analog
//! - [`cart`] - the cart store, sole owner of all persisted state
//! - [`catalog`] - fixed product list and its page component
//! - [`pages`] - prediction and cart page components
//! - [`services`] - HTTP clients for the two backend endpoints
//! - [`shell`] - seam for alerts, sounds, navigation, and the cart badge
//! - [`config`] - explicit configuration object, loaded from the environment
//!
//! Every component receives its configuration and collaborators at
//! construction; nothing reads ambient global state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod forms;
pub mod pages;
pub mod services;
pub mod shell;
pub mod storage;
pub mod views;
