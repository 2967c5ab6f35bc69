//! Durable key-value storage port for Feira client state.
//!
//! Provides a small, ergonomic API for persisting client-local state
//! (the cart, session preferences) with automatic JSON serialization.
//! The backend is behind the [`KvStore`] trait so callers inject the
//! real store in production and [`MemoryStore`] in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use feira_cache::{KvStore, KvStoreExt, MemoryStore};
//!
//! let store = MemoryStore::new();
//!
//! // Store a value
//! store.set("cart:session123", &cart)?;
//!
//! // Retrieve a value
//! let cart: Option<Cart> = store.get("cart:session123")?;
//!
//! // Delete a value
//! store.delete("cart:session123")?;
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::{KvStore, KvStoreExt, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CacheError, KvStore, KvStoreExt, MemoryStore};
}
