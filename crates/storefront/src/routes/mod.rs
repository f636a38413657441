//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog grid (?page=N)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (registered in main)
//!
//! # Cart
//! GET  /cart                   - Cart panel
//! POST /cart/add               - Add one unit (redirects back to the catalog page)
//! POST /cart/remove            - Remove a line (redirects to /cart)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Redirect to the WhatsApp order chat
//! ```

pub mod cart;
pub mod home;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::StorefrontConfig;
use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Shop identity and bag badge shown on every page.
#[derive(Clone)]
pub struct ShopView {
    pub name: String,
    pub contact_phone: String,
    pub cart_count: u32,
}

impl ShopView {
    #[must_use]
    pub fn new(config: &StorefrontConfig, cart_count: u32) -> Self {
        Self {
            name: config.shop.name.clone(),
            contact_phone: config.shop.contact_phone.clone(),
            cart_count,
        }
    }
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .nest("/cart", cart_routes())
        .route("/checkout", get(cart::checkout))
}

/// Assemble the storefront application.
///
/// The caller must add a session layer (see [`crate::middleware::session`]);
/// every page reads the visitor's cart from the session.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    routes()
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}
