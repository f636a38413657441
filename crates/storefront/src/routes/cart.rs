//! Cart route handlers.
//!
//! Cart lines live in the visitor's session. Every mutation restores the cart
//! store from the session, applies the change, and writes the whole cart back
//! before redirecting.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use teees_core::{Cart, CartLine, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::services::cart as cart_service;
use crate::state::AppState;

use super::ShopView;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: u32,
    pub name: String,
    pub color: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id().as_u32(),
            name: line.product.name.clone(),
            color: line.product.color.clone(),
            quantity: line.quantity.get(),
            price: line.product.price.to_string(),
            line_price: line.line_total().to_string(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    /// Catalog page to return to.
    pub page: Option<usize>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub shop: ShopView,
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display the cart panel.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let store = cart_service::load(&session).await;
    let cart = CartView::from(store.cart());

    CartShowTemplate {
        shop: ShopView::new(state.config(), cart.item_count),
        cart,
    }
}

/// Add one unit of a product, then return to the catalog page it was added from.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .find(form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let mut store = cart_service::load(&session).await;
    store.add_to_cart(product)?;
    let count = store.item_count();
    cart_service::save(store, &session).await?;

    let id = form.product_id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));
    tracing::info!(product_id = %form.product_id, item_count = count, "Added to cart");

    let page = form.page.filter(|&p| p > 0).unwrap_or(1);
    Ok(Redirect::to(&format!("/?page={page}#shop")).into_response())
}

/// Remove a line from the cart. Removing a product that is not in the cart
/// is not an error.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Response> {
    let mut store = cart_service::load(&session).await;
    store.remove_from_cart(form.product_id)?;
    cart_service::save(store, &session).await?;

    tracing::info!(product_id = %form.product_id, "Removed from cart");

    Ok(Redirect::to("/cart").into_response())
}

/// Cart count badge fragment.
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    CartCountTemplate {
        count: cart_service::load(&session).await.item_count(),
    }
}

/// Hand the order off to WhatsApp.
///
/// An empty cart goes back to the cart page instead.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Response {
    let store = cart_service::load(&session).await;

    match state.checkout().checkout_url(store.cart()) {
        Some(url) => {
            let total = store.total().to_string();
            add_breadcrumb("checkout", "WhatsApp hand-off", Some(&[("total", total.as_str())]));
            tracing::info!(
                lines = store.cart().len(),
                total = %store.total(),
                "Checkout via WhatsApp"
            );
            Redirect::to(&url).into_response()
        }
        None => Redirect::to("/cart").into_response(),
    }
}
