//! Session-backed cart persistence.
//!
//! The visitor's session is their persistent slot. A request snapshots the
//! slot into a [`SessionSlot`], runs the cart store against it, then flushes
//! the slot back into the session before responding.

use teees_core::{CartStore, KeyValueStore, StorageError};
use tower_sessions::Session;

use crate::error::Result;
use crate::models::session_keys::CART as CART_SLOT_KEY;

/// Snapshot of the cart slot of one session.
#[derive(Debug, Default)]
pub struct SessionSlot {
    value: Option<String>,
    dirty: bool,
}

impl SessionSlot {
    /// Read the cart slot from `session`.
    ///
    /// A slot that cannot be read is treated as empty.
    pub async fn load(session: &Session) -> Self {
        let value = match session.get::<String>(CART_SLOT_KEY).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cart from session");
                None
            }
        };

        Self {
            value,
            dirty: false,
        }
    }

    /// Write the slot back to `session` if it changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the session rejects the write.
    pub async fn flush(self, session: &Session) -> Result<()> {
        if let (true, Some(value)) = (self.dirty, self.value) {
            session.insert(CART_SLOT_KEY, value).await?;
        }
        Ok(())
    }
}

impl KeyValueStore for SessionSlot {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        if key == CART_SLOT_KEY {
            Ok(self.value.clone())
        } else {
            Ok(None)
        }
    }

    fn set(&mut self, key: &str, value: String) -> std::result::Result<(), StorageError> {
        if key != CART_SLOT_KEY {
            return Err(StorageError::Backend(format!(
                "session slot only stores '{CART_SLOT_KEY}', not '{key}'"
            )));
        }
        self.value = Some(value);
        self.dirty = true;
        Ok(())
    }
}

/// Restore the visitor's cart store from their session.
pub async fn load(session: &Session) -> CartStore<SessionSlot> {
    CartStore::restore(SessionSlot::load(session).await)
}

/// Persist a cart store back into the session.
///
/// # Errors
///
/// Returns an error if the session rejects the write.
pub async fn save(store: CartStore<SessionSlot>, session: &Session) -> Result<()> {
    store.into_inner().flush(session).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use teees_core::ProductId;
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_non_string_slot_restores_empty() {
        let session = session();
        session.insert(CART_SLOT_KEY, 42).await.unwrap();

        let store = load(&session).await;

        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_cart_restores_empty_and_is_overwritten() {
        let session = session();
        session
            .insert(CART_SLOT_KEY, r#"[{"id":1}]"#.to_string())
            .await
            .unwrap();

        let mut store = load(&session).await;
        assert!(store.cart().is_empty());

        store.remove_from_cart(ProductId::new(1)).unwrap();
        save(store, &session).await.unwrap();

        let saved = session.get::<String>(CART_SLOT_KEY).await.unwrap();
        assert_eq!(saved.as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_untouched_slot_is_not_written() {
        let session = session();

        let store = load(&session).await;
        save(store, &session).await.unwrap();

        assert_eq!(session.get::<String>(CART_SLOT_KEY).await.unwrap(), None);
    }

    #[test]
    fn test_slot_only_stores_cart_key() {
        let mut slot = SessionSlot::default();
        assert!(slot.set("other", "x".to_string()).is_err());
        assert!(!slot.dirty);

        slot.set(CART_SLOT_KEY, "[]".to_string()).unwrap();
        assert!(slot.dirty);
        assert_eq!(slot.get(CART_SLOT_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(slot.get("other").unwrap(), None);
    }
}
