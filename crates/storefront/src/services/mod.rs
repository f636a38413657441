//! Services that sit between route handlers and the core crate.

pub mod cart;
