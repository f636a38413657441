//! Cart store with write-through persistence.
//!
//! The store is read from its slot exactly once, when it is restored, and the
//! whole cart is written back after every mutation. A slot that is missing,
//! unreadable, or holds something that is not a valid cart restores as an
//! empty cart rather than failing.

use crate::cart::{Cart, CartAction};
use crate::catalog::Product;
use crate::storage::{CART_SLOT_KEY, KeyValueStore, StorageError};
use crate::types::{Price, ProductId};

/// The current cart plus the storage it is persisted to.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    cart: Cart,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Load the cart from `storage`, falling back to an empty cart.
    pub fn restore(storage: S) -> Self {
        let cart = match storage.get(CART_SLOT_KEY) {
            Ok(Some(json)) => Cart::from_json(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Discarding unreadable saved cart");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read saved cart");
                Cart::new()
            }
        };

        Self { storage, cart }
    }

    /// Add one unit of `product` and persist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be saved. The in-memory
    /// cart has been updated either way.
    pub fn add_to_cart(&mut self, product: &Product) -> Result<(), StorageError> {
        self.dispatch(CartAction::Add(product.clone()))
    }

    /// Remove the line for `id` (if any) and persist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be saved. The in-memory
    /// cart has been updated either way.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Result<(), StorageError> {
        self.dispatch(CartAction::Remove(id))
    }

    /// Apply `action` and persist the resulting cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be saved.
    pub fn dispatch(&mut self, action: CartAction) -> Result<(), StorageError> {
        self.cart = std::mem::take(&mut self.cart).apply(action);
        self.save()
    }

    fn save(&mut self) -> Result<(), StorageError> {
        let json = self
            .cart
            .to_json()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        self.storage.set(CART_SLOT_KEY, json)
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Give back the storage handle.
    pub fn into_inner(self) -> S {
        self.storage
    }
}
