//! Cart lines and the cart reducer.
//!
//! A cart holds at most one line per product id, in the order products were
//! first added. Adding a product already in the cart bumps that line's
//! quantity; it never creates a second line.
//!
//! All transitions are pure: [`Cart::apply`] takes the old cart and an action
//! and returns the new cart, so they can be exercised without any rendering or
//! storage context. Persistence lives in [`crate::store::CartStore`].
//!
//! # Serialized Form
//!
//! A cart serializes to a JSON array of flat line objects, the product fields
//! plus a quantity:
//!
//! ```json
//! [{"id":1,"name":"Bone Straight","color":"Natural Black","price":85000,"desc":"22 inch","quantity":2}]
//! ```

use std::collections::HashSet;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// Errors raised when reading a serialized cart.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("invalid cart JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cart holds more than one line for product {0}")]
    DuplicateLine(ProductId),
}

/// One product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: NonZeroU32,
}

impl CartLine {
    fn new(product: Product) -> Self {
        Self {
            product,
            quantity: NonZeroU32::MIN,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// `price * quantity` for this line.
    #[must_use]
    pub const fn line_total(&self) -> Price {
        self.product.price.times(self.quantity.get())
    }
}

/// A cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of a product.
    Add(Product),
    /// Drop the line for a product id, if present.
    Remove(ProductId),
}

/// Ordered cart lines, insertion order = first-add order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Apply an action, returning the resulting cart.
    #[must_use]
    pub fn apply(mut self, action: CartAction) -> Self {
        match action {
            CartAction::Add(product) => self.add(product),
            CartAction::Remove(id) => self.remove(id),
        }
        self
    }

    /// Add one unit of `product`.
    ///
    /// If a line with the same id exists its quantity goes up by one and its
    /// other fields are left as they were. Otherwise a new line with quantity 1
    /// is appended.
    pub fn add(&mut self, product: Product) {
        match self.lines.iter_mut().find(|line| line.id() == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::new(product)),
        }
    }

    /// Remove the line for `id`. Does nothing if there is no such line.
    pub fn remove(&mut self, id: ProductId) {
        self.lines.retain(|line| line.id() != id);
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities, shown on the bag badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity.get()))
    }

    /// Serialize to the persisted JSON form.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Parse` if serialization fails.
    pub fn to_json(&self) -> Result<String, CartError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse the persisted JSON form and check its shape.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the payload is not an array of valid lines
    /// (missing fields, zero or negative quantity) or repeats a product id.
    pub fn from_json(json: &str) -> Result<Self, CartError> {
        let cart: Self = serde_json::from_str(json)?;

        let mut seen = HashSet::with_capacity(cart.lines.len());
        if let Some(dup) = cart.lines.iter().find(|line| !seen.insert(line.id())) {
            return Err(CartError::DuplicateLine(dup.id()));
        }

        Ok(cart)
    }
}

impl FromIterator<CartAction> for Cart {
    fn from_iter<I: IntoIterator<Item = CartAction>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::apply)
    }
}
