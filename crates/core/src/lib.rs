//! Smartcart Core - Shared types library.
//!
//! This crate provides the domain types used across all smartcart components:
//! - `client` - Cart store, catalog, prediction and checkout flows
//! - `integration-tests` - End-to-end suites against a mock backend
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Cart items, catalog products, and prediction wire types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
