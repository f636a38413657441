//! Checkout hand-off to WhatsApp.
//!
//! There is no payment step. Checkout turns the cart into a plain-text order
//! message and builds a `wa.me` deep link that opens a chat with the shop with
//! that message pre-filled. Whether the message is ever sent is up to the
//! visitor and their WhatsApp client.

use std::fmt::Write as _;

use crate::cart::Cart;
use crate::types::Price;

/// Base of the WhatsApp click-to-chat link.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// First line of every order message.
pub const ORDER_GREETING: &str = "Hello, I would like to order the following wigs:";

/// An order summary ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderMessage {
    text: String,
    total: Price,
}

impl OrderMessage {
    /// The full message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }
}

/// Compose the order message for `cart`.
///
/// Returns `None` for an empty cart. Each line reads
/// `"<quantity>x <color> <name> - #<unit price>"`, in cart order, followed by
/// the grand total.
#[must_use]
pub fn compose_order(cart: &Cart) -> Option<OrderMessage> {
    if cart.is_empty() {
        return None;
    }

    let mut text = String::new();
    text.push_str(ORDER_GREETING);
    text.push_str("\n\n");

    for line in cart.lines() {
        // Writing to a String cannot fail.
        let _ = writeln!(
            text,
            "{}x {} {} - {}",
            line.quantity, line.product.color, line.product.name, line.product.price
        );
    }

    let total = cart.total();
    let _ = write!(text, "\n*Total Amount: {total}*");

    Some(OrderMessage { text, total })
}

/// Builds click-to-chat links for a fixed recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppCheckout {
    recipient: String,
}

impl WhatsAppCheckout {
    /// `recipient` is the shop's number in international format, digits only
    /// (e.g. `2349018065008`).
    #[must_use]
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }

    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// `https://wa.me/<recipient>?text=<percent-encoded message>`.
    #[must_use]
    pub fn link(&self, message: &OrderMessage) -> String {
        format!(
            "{WHATSAPP_BASE_URL}/{}?text={}",
            self.recipient,
            urlencoding::encode(message.text())
        )
    }

    /// Deep link for `cart`, or `None` if the cart is empty.
    #[must_use]
    pub fn checkout_url(&self, cart: &Cart) -> Option<String> {
        compose_order(cart).map(|message| self.link(&message))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::CartAction;
    use crate::catalog::Product;
    use crate::types::ProductId;

    fn product(id: u32, name: &str, color: &str, price: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            color: color.to_string(),
            price: Price::new(price),
            desc: String::new(),
            image: None,
        }
    }

    fn bob_cart() -> Cart {
        let bob = product(1, "Bob", "Black", 5_000);
        [CartAction::Add(bob.clone()), CartAction::Add(bob)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_order_lines_and_total() {
        let message = compose_order(&bob_cart()).unwrap();
        assert!(message.text().contains("2x Black Bob - #5,000"));
        assert!(message.text().contains("#10,000"));
        assert_eq!(message.total(), Price::new(10_000));
    }

    #[test]
    fn test_full_message_layout() {
        let mut cart = bob_cart();
        cart.add(product(2, "Pixie Cut", "Burgundy", 32_500));

        let message = compose_order(&cart).unwrap();
        assert_eq!(
            message.text(),
            "Hello, I would like to order the following wigs:\n\
             \n\
             2x Black Bob - #5,000\n\
             1x Burgundy Pixie Cut - #32,500\n\
             \n\
             *Total Amount: #42,500*"
        );
    }

    #[test]
    fn test_empty_cart_composes_nothing() {
        let checkout = WhatsAppCheckout::new("2349018065008");
        assert!(compose_order(&Cart::new()).is_none());
        assert!(checkout.checkout_url(&Cart::new()).is_none());
    }

    #[test]
    fn test_link_encodes_message() {
        let checkout = WhatsAppCheckout::new("2349018065008");
        let url = checkout.checkout_url(&bob_cart()).unwrap();

        assert!(url.starts_with("https://wa.me/2349018065008?text="));
        assert!(url.contains("2x%20Black%20Bob%20-%20%235%2C000%0A"));
        assert!(url.contains("%2ATotal%20Amount%3A%20%2310%2C000%2A"));
        assert!(!url.contains(' '));
        assert!(!url.contains('\n'));

        let encoded = url.split_once("?text=").unwrap().1;
        let decoded = urlencoding::decode(encoded).unwrap();
        assert_eq!(decoded, compose_order(&bob_cart()).unwrap().text());
    }
}
