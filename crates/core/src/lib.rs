//! Teees Core - Storefront domain logic.
//!
//! This crate holds everything the storefront does that is not rendering:
//! - `catalog` - The static, ordered product list
//! - `cart` - Cart lines and the pure add/remove reducer
//! - `store` - Cart store that writes through to a persistent slot
//! - `pagination` - Page slicing of the catalog
//! - `checkout` - Order message and WhatsApp deep link
//!
//! # Architecture
//!
//! The core crate performs no network or database I/O. Persistence is reached
//! only through the [`storage::KeyValueStore`] trait, so the storefront can back
//! the cart with a session and the CLI can back it with a file.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod pagination;
pub mod storage;
pub mod store;
pub mod types;

pub use cart::{Cart, CartAction, CartError, CartLine};
pub use catalog::{Catalog, CatalogError, Product};
pub use checkout::{OrderMessage, WhatsAppCheckout, compose_order};
pub use pagination::{PAGE_SIZE, Pagination};
pub use storage::{CART_SLOT_KEY, KeyValueStore, MemoryStore, StorageError};
pub use store::CartStore;
pub use types::*;
