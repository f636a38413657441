//! Settings for the local (file-backed) cart commands.
//!
//! # Environment Variables
//!
//! - `STOREFRONT_CATALOG_PATH` - Product data file (default: crates/storefront/data/products.json)
//! - `TEEES_CART_FILE` - Local cart slot file (default: .teees-cart.json)
//! - `WHATSAPP_NUMBER` - Order recipient, digits only (default: the shop's number)

use std::path::PathBuf;

use teees_core::{Catalog, WhatsAppCheckout};
use teees_storefront::config::{ConfigError, ShopConfig, validate_whatsapp_number};
use teees_storefront::state::{CatalogLoadError, load_catalog};
use thiserror::Error;

use crate::store::JsonFileStore;

/// Errors raised while preparing a local command.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),
}

/// Paths and recipient for the local cart.
#[derive(Debug, Clone)]
pub struct LocalContext {
    pub catalog_path: PathBuf,
    pub cart_file: PathBuf,
    pub whatsapp_number: String,
}

impl LocalContext {
    /// Read settings from the environment (and `.env`).
    ///
    /// # Errors
    ///
    /// Returns an error if `WHATSAPP_NUMBER` is set but invalid.
    pub fn from_env() -> Result<Self, ContextError> {
        let _ = dotenvy::dotenv();

        let whatsapp_number = resolve_whatsapp_number(std::env::var("WHATSAPP_NUMBER").ok())?;

        Ok(Self {
            catalog_path: env_path(
                "STOREFRONT_CATALOG_PATH",
                "crates/storefront/data/products.json",
            ),
            cart_file: env_path("TEEES_CART_FILE", ".teees-cart.json"),
            whatsapp_number,
        })
    }

    /// Load the product catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or parsed.
    pub fn catalog(&self) -> Result<Catalog, ContextError> {
        Ok(load_catalog(&self.catalog_path)?)
    }

    #[must_use]
    pub fn cart_store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.cart_file)
    }

    #[must_use]
    pub fn checkout(&self) -> WhatsAppCheckout {
        WhatsAppCheckout::new(self.whatsapp_number.clone())
    }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map_or_else(|| PathBuf::from(default), PathBuf::from)
}

/// Pick the order recipient. Unset or blank means the shop's default number.
fn resolve_whatsapp_number(raw: Option<String>) -> Result<String, ConfigError> {
    let number = raw
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| ShopConfig::default().whatsapp_number);
    validate_whatsapp_number(&number, "WHATSAPP_NUMBER")?;
    Ok(number)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_whatsapp_number_defaults_when_unset_or_blank() {
        let default = ShopConfig::default().whatsapp_number;

        assert_eq!(resolve_whatsapp_number(None).unwrap(), default);
        assert_eq!(resolve_whatsapp_number(Some(String::new())).unwrap(), default);
        assert_eq!(resolve_whatsapp_number(Some("   ".to_string())).unwrap(), default);
    }

    #[test]
    fn test_whatsapp_number_trimmed_and_validated() {
        assert_eq!(
            resolve_whatsapp_number(Some(" 2348012345678 ".to_string())).unwrap(),
            "2348012345678"
        );
        assert!(matches!(
            resolve_whatsapp_number(Some("+234 801".to_string())),
            Err(ConfigError::InvalidEnvVar(..))
        ));
    }
}
