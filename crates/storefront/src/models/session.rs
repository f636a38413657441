//! Session-related types.
//!
//! The visitor's session is the persistent slot for their cart.

/// Session keys.
pub mod keys {
    /// Key holding the visitor's serialized cart.
    pub const CART: &str = teees_core::CART_SLOT_KEY;
}
