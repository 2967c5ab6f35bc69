//! Cart module.
//!
//! The cart model, derived pricing, and the session store that
//! persists every mutation through the storage port.

mod cart;
mod pricing;
mod store;

pub use cart::{Cart, LineItem, NewItem, MAX_QUANTITY_PER_ITEM};
pub use pricing::{CartPricing, LineItemPricing};
pub use store::{CartStoreConfig, SessionCartStore};
