//! Core types for the storefront.
//!
//! This module provides type-safe wrappers for product ids and prices.

pub mod id;
pub mod price;

pub use id::ProductId;
pub use price::Price;
