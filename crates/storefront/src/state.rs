//! Application state shared across handlers.

use std::path::Path;
use std::sync::Arc;

use teees_core::{Catalog, CatalogError, WhatsAppCheckout};

use crate::config::StorefrontConfig;

/// Error loading the product catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the catalog, and the checkout link builder.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    checkout: WhatsAppCheckout,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let checkout = WhatsAppCheckout::new(config.shop.whatsapp_number.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                checkout,
            }),
        }
    }

    /// Create state, reading the catalog from `config.catalog_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or parsed.
    pub fn load(config: StorefrontConfig) -> Result<Self, CatalogLoadError> {
        let catalog = load_catalog(&config.catalog_path)?;
        tracing::info!(products = catalog.len(), "Catalog loaded");
        Ok(Self::new(config, catalog))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the WhatsApp checkout link builder.
    #[must_use]
    pub fn checkout(&self) -> &WhatsAppCheckout {
        &self.inner.checkout
    }
}

/// Read and parse a JSON catalog file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid catalog.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogLoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Catalog::from_json(&json)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_bundled_catalog_loads() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/products.json");
        let catalog = load_catalog(&path).unwrap();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_missing_catalog_is_io_error() {
        let err = load_catalog(Path::new("/nonexistent/products.json")).unwrap_err();
        assert!(matches!(err, CatalogLoadError::Io { .. }));
    }
}
