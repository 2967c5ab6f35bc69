//! Cart and checkout domain logic for the Feira marketplace.
//!
//! This crate provides the purchase core of the storefront:
//!
//! - **Cart**: line items deduplicated by product, derived totals, and
//!   a session store that persists every mutation through an injected
//!   key-value port ([`feira_cache::KvStore`]).
//! - **Checkout**: the address → payment → review wizard as an explicit
//!   state machine, form validation (CEP, Luhn, expiry), and order
//!   submission with an idempotency token.
//! - **Money**: cents-based arithmetic, never floats.
//!
//! External collaborators (payment processor, CEP directory) come from
//! [`feira_gateway`] and are injected as trait objects.
//!
//! # Example
//!
//! ```rust,ignore
//! use feira_commerce::prelude::*;
//! use feira_cache::MemoryStore;
//! use feira_gateway::MockProcessor;
//!
//! let mut cart = SessionCartStore::load(Box::new(MemoryStore::new()), CartStoreConfig::new());
//! cart.add_item(NewItem::new(
//!     ProductId::new("prod-1"),
//!     StoreId::new("store-1"),
//!     "Vaso de barro",
//!     Money::from_decimal(89.90, Currency::BRL),
//! ))?;
//!
//! let mut checkout = CheckoutSession::new();
//! checkout.submit_address(address)?;
//! checkout.confirm_pix()?;
//! let confirmation = checkout.submit_order(&mut cart, &MockProcessor::new())?;
//! println!("paid {}", confirmation.total);
//! ```

pub mod cart;
pub mod checkout;
pub mod error;
pub mod ids;
pub mod money;
pub mod validate;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        Cart, CartPricing, CartStoreConfig, LineItem, LineItemPricing, NewItem, SessionCartStore,
    };

    // Checkout
    pub use crate::checkout::{
        Address, CardDetails, CheckoutFlow, CheckoutSession, CheckoutStep, LookupTicket,
        OrderConfirmation, PaymentSelection,
    };

    // Validation
    pub use crate::validate::FieldError;
}
