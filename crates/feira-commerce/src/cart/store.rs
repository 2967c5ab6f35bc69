//! Session cart store with write-through persistence.
//!
//! Wraps a [`Cart`] and an injected [`KvStore`] port. Every successful
//! mutation writes the whole item collection back through the port
//! before returning, so a reload restores the cart exactly. The
//! replace-whole-collection write is the only transaction boundary;
//! rejected mutations never touch storage.

use feira_cache::{namespaced_key, KvStore, KvStoreExt};

use crate::cart::{Cart, LineItem, NewItem};
use crate::error::CommerceError;
use crate::ids::LineItemId;
use crate::money::{Currency, Money};

/// Configuration for a [`SessionCartStore`].
#[derive(Debug, Clone)]
pub struct CartStoreConfig {
    /// Storage namespace the items are persisted under.
    pub namespace: String,
    /// Currency of the cart.
    pub currency: Currency,
}

impl Default for CartStoreConfig {
    fn default() -> Self {
        Self {
            namespace: "cart".to_string(),
            currency: Currency::BRL,
        }
    }
}

impl CartStoreConfig {
    /// Create a configuration with the default namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the storage namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the cart currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }
}

/// The authoritative cart for one client session.
pub struct SessionCartStore {
    cart: Cart,
    storage: Box<dyn KvStore>,
    key: String,
}

impl SessionCartStore {
    /// Load the session cart from storage.
    ///
    /// Starts empty when nothing is stored. An unreadable snapshot is
    /// logged and discarded rather than failing the session.
    pub fn load(storage: Box<dyn KvStore>, config: CartStoreConfig) -> Self {
        let key = namespaced_key!(&config.namespace, "items");
        let items: Vec<LineItem> = match storage.get(&key) {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "discarding unreadable cart snapshot");
                Vec::new()
            }
        };
        tracing::debug!(key = %key, items = items.len(), "cart loaded");
        Self {
            cart: Cart::from_items(items, config.currency),
            storage,
            key,
        }
    }

    fn persist(&self) -> Result<(), CommerceError> {
        self.storage.set(&self.key, &self.cart.items())?;
        Ok(())
    }

    /// Add an item; see [`Cart::add_item`]. Persists on success.
    pub fn add_item(&mut self, candidate: NewItem) -> Result<LineItemId, CommerceError> {
        let id = self.cart.add_item(candidate)?;
        self.persist()?;
        tracing::debug!(line_item = %id, total_items = self.cart.total_items(), "item added");
        Ok(id)
    }

    /// Set an item's quantity; see [`Cart::update_quantity`]. Persists
    /// on success.
    pub fn update_quantity(
        &mut self,
        line_item_id: &LineItemId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        let updated = self.cart.update_quantity(line_item_id, quantity)?;
        if updated {
            self.persist()?;
            tracing::debug!(line_item = %line_item_id, quantity, "quantity updated");
        }
        Ok(updated)
    }

    /// Remove an item. Persists when something was removed.
    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> Result<bool, CommerceError> {
        let removed = self.cart.remove_item(line_item_id);
        if removed {
            self.persist()?;
            tracing::debug!(line_item = %line_item_id, "item removed");
        }
        Ok(removed)
    }

    /// Empty the cart unconditionally and persist.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.cart.clear();
        self.persist()?;
        tracing::info!("cart cleared");
        Ok(())
    }

    /// The underlying cart, read-only.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Sum of quantities.
    pub fn total_items(&self) -> i64 {
        self.cart.total_items()
    }

    /// Total price, computed on read.
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        self.cart.total_price()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }
}

impl std::fmt::Debug for SessionCartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCartStore")
            .field("cart", &self.cart)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use feira_cache::MemoryStore;

    use super::*;
    use crate::ids::{ProductId, StoreId};

    /// Shared handle so tests can reload from the same backing store.
    #[derive(Clone)]
    struct SharedStore(Arc<MemoryStore>);

    impl KvStore for SharedStore {
        fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, feira_cache::CacheError> {
            self.0.get_raw(key)
        }
        fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), feira_cache::CacheError> {
            self.0.set_raw(key, value)
        }
        fn delete(&self, key: &str) -> Result<(), feira_cache::CacheError> {
            self.0.delete(key)
        }
        fn exists(&self, key: &str) -> Result<bool, feira_cache::CacheError> {
            self.0.exists(key)
        }
    }

    fn candidate(product: &str, price_cents: i64) -> NewItem {
        NewItem::new(
            ProductId::new(product),
            StoreId::new("store-1"),
            "Bordado de renda",
            Money::new(price_cents, Currency::BRL),
        )
    }

    #[test]
    fn test_starts_empty_without_snapshot() {
        let store = SessionCartStore::load(Box::new(MemoryStore::new()), CartStoreConfig::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_reload_restores_items() {
        let backing = SharedStore(Arc::new(MemoryStore::new()));

        let mut store =
            SessionCartStore::load(Box::new(backing.clone()), CartStoreConfig::new());
        store
            .add_item(candidate("prod-1", 8990).with_quantity(2))
            .unwrap();

        let reloaded = SessionCartStore::load(Box::new(backing), CartStoreConfig::new());
        assert_eq!(reloaded.total_items(), 2);
        assert_eq!(reloaded.total_price().unwrap().amount_cents, 17980);
    }

    #[test]
    fn test_every_mutation_persists() {
        let backing = SharedStore(Arc::new(MemoryStore::new()));
        let mut store =
            SessionCartStore::load(Box::new(backing.clone()), CartStoreConfig::new());

        let id = store.add_item(candidate("prod-1", 8990)).unwrap();
        store.update_quantity(&id, 4).unwrap();
        let reloaded =
            SessionCartStore::load(Box::new(backing.clone()), CartStoreConfig::new());
        assert_eq!(reloaded.total_items(), 4);

        store.remove_item(&id).unwrap();
        let reloaded = SessionCartStore::load(Box::new(backing), CartStoreConfig::new());
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_rejected_mutation_does_not_persist() {
        let backing = SharedStore(Arc::new(MemoryStore::new()));
        let mut store =
            SessionCartStore::load(Box::new(backing.clone()), CartStoreConfig::new());
        let id = store.add_item(candidate("prod-1", 8990)).unwrap();

        assert!(store.update_quantity(&id, 0).is_err());

        let reloaded = SessionCartStore::load(Box::new(backing), CartStoreConfig::new());
        assert_eq!(reloaded.items()[0].quantity, 1);
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let backing = SharedStore(Arc::new(MemoryStore::new()));
        backing.set_raw("cart:items", b"not json").unwrap();

        let store = SessionCartStore::load(Box::new(backing), CartStoreConfig::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_persists_empty_collection() {
        let backing = SharedStore(Arc::new(MemoryStore::new()));
        let mut store =
            SessionCartStore::load(Box::new(backing.clone()), CartStoreConfig::new());
        store.add_item(candidate("prod-1", 8990)).unwrap();
        store.clear().unwrap();

        let reloaded = SessionCartStore::load(Box::new(backing), CartStoreConfig::new());
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_custom_namespace() {
        let backing = SharedStore(Arc::new(MemoryStore::new()));
        let config = CartStoreConfig::new().with_namespace("feira-cart");
        let mut store = SessionCartStore::load(Box::new(backing.clone()), config);
        store.add_item(candidate("prod-1", 100)).unwrap();

        assert!(backing.exists("feira-cart:items").unwrap());
        assert!(!backing.exists("cart:items").unwrap());
    }
}
