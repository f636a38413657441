//! Local cart commands.
//!
//! These drive the same cart store the storefront uses, persisted to a JSON
//! slot file instead of a session.

use std::io::{self, Write};

use teees_core::{Cart, CartStore, Catalog, KeyValueStore, ProductId, StorageError, WhatsAppCheckout};
use thiserror::Error;

/// Errors raised by cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    #[error("no product with id {0} in the catalog")]
    UnknownProduct(ProductId),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Print the cart lines and total.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn show<S: KeyValueStore>(storage: S, out: &mut impl Write) -> Result<(), CartCommandError> {
    let store = CartStore::restore(storage);
    print_cart(store.cart(), out)?;
    Ok(())
}

/// Add one unit of product `id`.
///
/// # Errors
///
/// Returns an error if the product is not in the catalog or the cart cannot
/// be saved.
pub fn add<S: KeyValueStore>(
    storage: S,
    catalog: &Catalog,
    id: ProductId,
    out: &mut impl Write,
) -> Result<(), CartCommandError> {
    let product = catalog.find(id).ok_or(CartCommandError::UnknownProduct(id))?;

    let mut store = CartStore::restore(storage);
    store.add_to_cart(product)?;
    tracing::info!(product_id = %id, "Added to local cart");

    writeln!(
        out,
        "Added {} {} ({} in bag)",
        product.color,
        product.name,
        store.item_count()
    )?;
    Ok(())
}

/// Remove the line for product `id`. Not being in the cart is fine.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn remove<S: KeyValueStore>(
    storage: S,
    id: ProductId,
    out: &mut impl Write,
) -> Result<(), CartCommandError> {
    let mut store = CartStore::restore(storage);
    let present = store.cart().line(id).is_some();
    store.remove_from_cart(id)?;

    if present {
        writeln!(out, "Removed product {id} ({} in bag)", store.item_count())?;
    } else {
        writeln!(out, "Product {id} was not in the bag")?;
    }
    Ok(())
}

/// Print the order message and WhatsApp link. Prints a notice instead when
/// the cart is empty.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn checkout<S: KeyValueStore>(
    storage: S,
    checkout: &WhatsAppCheckout,
    out: &mut impl Write,
) -> Result<(), CartCommandError> {
    let store = CartStore::restore(storage);

    match teees_core::compose_order(store.cart()) {
        Some(message) => {
            writeln!(out, "{}", message.text())?;
            writeln!(out)?;
            writeln!(out, "{}", checkout.link(&message))?;
        }
        None => writeln!(out, "Your bag is empty.")?,
    }
    Ok(())
}

fn print_cart(cart: &Cart, out: &mut impl Write) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Your bag is empty.");
    }

    for line in cart.lines() {
        writeln!(
            out,
            "  [{:>3}] {}x {} {} - {}",
            line.id().as_u32(),
            line.quantity,
            line.product.color,
            line.product.name,
            line.product.price
        )?;
    }
    writeln!(out, "Total: {} ({} items)", cart.total(), cart.item_count())
}
