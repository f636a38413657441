//! Home page route handler: hero, catalog grid, pagination and contact footer.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use teees_core::{Pagination, Product};
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::services::cart as cart_service;
use crate::state::AppState;

use super::ShopView;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: u32,
    pub name: String,
    pub color: String,
    pub price: String,
    pub desc: String,
    pub image: Option<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_u32(),
            name: product.name.clone(),
            color: product.color.clone(),
            price: product.price.to_string(),
            desc: product.desc.clone(),
            image: product.image.clone(),
        }
    }
}

/// One numbered pagination button.
#[derive(Clone)]
pub struct PageLink {
    pub number: usize,
    pub current: bool,
}

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub page: Option<usize>,
}

impl CatalogQuery {
    /// Requested page; missing or zero means the first page.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page.filter(|&p| p > 0).unwrap_or(1)
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub shop: ShopView,
    pub products: Vec<ProductView>,
    pub pages: Vec<PageLink>,
    pub current_page: usize,
    pub previous_page: Option<usize>,
    pub next_page: Option<usize>,
}

/// Display the catalog page.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let catalog = state.catalog();
    let pagination = Pagination::new(catalog.len()).on_page(query.page());

    let products = pagination
        .visible(catalog.products())
        .iter()
        .map(ProductView::from)
        .collect();

    let pages = pagination
        .pages()
        .map(|number| PageLink {
            number,
            current: number == pagination.current_page(),
        })
        .collect();

    let current_page = pagination.current_page();
    let previous_page = pagination.has_previous().then(|| current_page - 1);
    let next_page = pagination.has_next().then(|| current_page + 1);

    let cart_count = cart_service::load(&session).await.item_count();

    HomeTemplate {
        shop: ShopView::new(state.config(), cart_count),
        products,
        pages,
        current_page,
        previous_page,
        next_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_query_page_defaults() {
        assert_eq!(CatalogQuery { page: None }.page(), 1);
        assert_eq!(CatalogQuery { page: Some(0) }.page(), 1);
        assert_eq!(CatalogQuery { page: Some(3) }.page(), 3);
    }
}
