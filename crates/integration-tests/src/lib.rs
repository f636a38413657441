//! Integration tests for the Teees Beauty storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p teees-integration-tests
//! ```
//!
//! Tests drive the real storefront router in-process with an in-memory session
//! store, so no database or network is needed. [`TestApp`] behaves like a
//! single browser: it keeps the session cookie between requests.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use secrecy::SecretString;
use teees_core::Catalog;
use teees_storefront::config::{SentryConfig, ShopConfig, StorefrontConfig};
use teees_storefront::middleware::session::SESSION_COOKIE_NAME;
use teees_storefront::middleware::session_layer;
use teees_storefront::routes;
use teees_storefront::state::AppState;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, Session};

/// The shop's WhatsApp number used in test configs.
pub const TEST_WHATSAPP_NUMBER: &str = "2349018065008";

/// Storefront config that needs no environment.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    let storefront_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront");

    StorefrontConfig {
        database_url: SecretString::from("postgres://unused@localhost/unused"),
        host: [127, 0, 0, 1].into(),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        catalog_path: storefront_dir.join("data/products.json"),
        static_dir: storefront_dir.join("static"),
        shop: ShopConfig {
            name: "Teees Beauty".to_string(),
            contact_phone: "0916 486 1760".to_string(),
            whatsapp_number: TEST_WHATSAPP_NUMBER.to_string(),
        },
        sentry: SentryConfig::default(),
    }
}

/// A catalog of `n` products with ids `1..=n`, named `Wig <id>`, colored
/// `Black`, priced at `<id> * 1,000`.
///
/// # Panics
///
/// Panics if the generated catalog is invalid (it never is).
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn numbered_catalog(n: u32) -> Catalog {
    let products: Vec<_> = (1..=n)
        .map(|i| {
            serde_json::json!({
                "id": i,
                "name": format!("Wig {i}"),
                "color": "Black",
                "price": 1000 * u64::from(i),
                "desc": format!("Description {i}"),
            })
        })
        .collect();

    Catalog::from_json(&serde_json::Value::Array(products).to_string()).unwrap()
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// The storefront app plus one visitor's cookie jar.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
    sessions: MemoryStore,
    cookie: Option<String>,
}

impl TestApp {
    /// App over `catalog` with a fresh in-memory session store.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        let config = test_config();
        let sessions = MemoryStore::default();
        let router = routes::app(AppState::new(config.clone(), catalog))
            .layer(session_layer(sessions.clone(), &config));

        Self {
            router,
            sessions,
            cookie: None,
        }
    }

    /// A second visitor sharing this app's session store but with no cookie.
    #[must_use]
    pub fn new_visitor(&self) -> Self {
        Self {
            router: self.router.clone(),
            sessions: self.sessions.clone(),
            cookie: None,
        }
    }

    /// Start a session whose `key` slot holds `value` as-is, and make it
    /// this visitor's session.
    ///
    /// # Panics
    ///
    /// Panics if the session cannot be saved.
    #[allow(clippy::unwrap_used)]
    pub async fn seed_session(&mut self, key: &str, value: serde_json::Value) {
        let session = Session::new(None, Arc::new(self.sessions.clone()), None);
        session.insert_value(key, value).await.unwrap();
        session.save().await.unwrap();

        let id = session.id().unwrap();
        self.cookie = Some(format!("{SESSION_COOKIE_NAME}={id}"));
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or served.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Request::get(uri), Body::empty()).await
    }

    /// Send a form-encoded POST request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or served.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        let builder = Request::post(uri).header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        );
        self.send(builder, Body::from(form.to_string())).await
    }

    #[allow(clippy::unwrap_used)]
    async fn send(&mut self, mut builder: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(set_cookie.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
