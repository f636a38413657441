//! The product catalog.
//!
//! The catalog is a static, ordered list of products supplied as a JSON array
//! (the shop's data file). It is parsed once at startup and never changes while
//! the process runs. Order in the file is display order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, ProductId};

/// Errors raised while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate product id {0} in catalog")]
    DuplicateId(ProductId),
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Color or variant label shown under the name.
    pub color: String,
    pub price: Price,
    /// Description text.
    #[serde(default)]
    pub desc: String,
    /// Optional image path, relative to the static asset root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Immutable, ordered product list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        if let Some(dup) = products.iter().find(|p| !seen.insert(p.id)) {
            return Err(CatalogError::DuplicateId(dup.id));
        }
        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the JSON is malformed or ids repeat.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"id": 1, "name": "Bone Straight", "color": "Natural Black", "price": 85000, "desc": "22 inch, full lace"},
        {"id": 2, "name": "Body Wave", "color": "Honey Blonde", "price": 120000, "desc": "26 inch, HD frontal", "image": "images/body-wave.jpg"}
    ]"#;

    #[test]
    fn test_from_json_preserves_order() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);
        let names: Vec<_> = catalog.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Bone Straight", "Body Wave"]);
    }

    #[test]
    fn test_find_by_id() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        let product = catalog.find(ProductId::new(2)).unwrap();
        assert_eq!(product.color, "Honey Blonde");
        assert_eq!(product.price, Price::new(120_000));
        assert_eq!(product.image.as_deref(), Some("images/body-wave.jpg"));
        assert!(catalog.find(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[
            {"id": 1, "name": "A", "color": "Black", "price": 1},
            {"id": 1, "name": "B", "color": "Brown", "price": 2}
        ]"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == ProductId::new(1)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CatalogError::Parse(_))
        ));
        // Negative prices are not representable.
        assert!(Catalog::from_json(r#"[{"id": 1, "name": "A", "color": "B", "price": -5}]"#).is_err());
    }
}
