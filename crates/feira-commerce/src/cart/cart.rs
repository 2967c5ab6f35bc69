//! Cart and line item types.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::{LineItemId, ProductId, StoreId};
use crate::money::{Currency, Money};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A candidate item for [`Cart::add_item`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Store selling the product.
    pub store_id: StoreId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Product image reference.
    pub image: String,
    /// Quantity to add.
    pub quantity: i64,
}

impl NewItem {
    /// Create a candidate with quantity 1 and no image.
    pub fn new(
        product_id: ProductId,
        store_id: StoreId,
        name: impl Into<String>,
        unit_price: Money,
    ) -> Self {
        Self {
            product_id,
            store_id,
            name: name.into(),
            unit_price,
            image: String::new(),
            quantity: 1,
        }
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the quantity to add.
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }
}

/// A line item in the cart.
///
/// At most one line item exists per product; repeated adds fold into
/// the quantity. Line totals are derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Unique line item identifier, generated at insertion.
    pub id: LineItemId,
    /// Product being purchased.
    pub product_id: ProductId,
    /// Store selling the product.
    pub store_id: StoreId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Product image reference.
    pub image: String,
    /// Quantity.
    pub quantity: i64,
}

impl LineItem {
    fn from_candidate(candidate: NewItem) -> Self {
        Self {
            id: LineItemId::generate(),
            product_id: candidate.product_id,
            store_id: candidate.store_id,
            name: candidate.name,
            unit_price: candidate.unit_price,
            image: candidate.image,
            quantity: candidate.quantity,
        }
    }

    /// Total for this line (`unit_price * quantity`).
    ///
    /// Returns `None` on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.try_multiply(self.quantity)
    }
}

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
    currency: Currency,
}

impl Cart {
    /// Create an empty cart in the given currency.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Rebuild a cart from a persisted item collection.
    pub fn from_items(items: Vec<LineItem>, currency: Currency) -> Self {
        Self { items, currency }
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Add an item to the cart.
    ///
    /// If the product is already present, its quantity is incremented
    /// and the existing line keeps its identifier and unit price.
    /// Returns the affected line item's ID.
    ///
    /// Fails with:
    /// - `InvalidQuantity` if the candidate quantity is not positive
    /// - `CurrencyMismatch` if the price is in another currency
    /// - `QuantityExceedsLimit` / `Overflow` on quantity arithmetic
    pub fn add_item(&mut self, candidate: NewItem) -> Result<LineItemId, CommerceError> {
        if candidate.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(candidate.quantity));
        }
        if candidate.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: candidate.unit_price.currency.code().to_string(),
            });
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == candidate.product_id)
        {
            let new_quantity = existing
                .quantity
                .checked_add(candidate.quantity)
                .ok_or(CommerceError::Overflow)?;

            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }

            existing.quantity = new_quantity;
            return Ok(existing.id.clone());
        }

        if candidate.quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                candidate.quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let item = LineItem::from_candidate(candidate);
        let id = item.id.clone();
        self.items.push(item);
        Ok(id)
    }

    /// Set an item's quantity in place.
    ///
    /// Fails with `InvalidQuantity` for quantities below 1: removal is
    /// always explicit, via [`Cart::remove_item`]. Returns `false` when
    /// no item has the given ID.
    pub fn update_quantity(
        &mut self,
        line_item_id: &LineItemId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        if let Some(item) = self.items.iter_mut().find(|i| &i.id == line_item_id) {
            item.quantity = quantity;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Remove an item from the cart. Removing a missing item is a no-op.
    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != line_item_id);
        self.items.len() < len_before
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get total item count (sum of quantities).
    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of distinct line items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by ID.
    pub fn get_item(&self, line_item_id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == line_item_id)
    }

    /// Get an item by product ID.
    pub fn get_item_by_product(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Get total price (`Σ unit_price × quantity`), computed on read.
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        let mut total = Money::zero(self.currency);
        for item in &self.items {
            let line = item.line_total().ok_or(CommerceError::Overflow)?;
            total = total.try_add(&line).ok_or(CommerceError::Overflow)?;
        }
        Ok(total)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::BRL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(product: &str, price_cents: i64) -> NewItem {
        NewItem::new(
            ProductId::new(product),
            StoreId::new("store-1"),
            "Cerâmica artesanal",
            Money::new(price_cents, Currency::BRL),
        )
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::default();
        cart.add_item(candidate("prod-1", 8990).with_quantity(2))
            .unwrap();

        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.unique_item_count(), 1);
    }

    #[test]
    fn test_add_same_product_increments_quantity() {
        let mut cart = Cart::default();
        let first = cart.add_item(candidate("prod-1", 8990)).unwrap();
        let second = cart
            .add_item(candidate("prod-1", 8990).with_quantity(2))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price().unwrap().amount_cents, 26970);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::default();
        assert!(matches!(
            cart.add_item(candidate("prod-1", 8990).with_quantity(0)),
            Err(CommerceError::InvalidQuantity(0))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_rejects_currency_mismatch() {
        let mut cart = Cart::default();
        let foreign = NewItem::new(
            ProductId::new("prod-1"),
            StoreId::new("store-1"),
            "Imported",
            Money::new(1000, Currency::USD),
        );
        assert!(matches!(
            cart.add_item(foreign),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::default();
        let id = cart.add_item(candidate("prod-1", 8990)).unwrap();

        assert!(cart.update_quantity(&id, 5).unwrap());
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn test_update_quantity_rejects_below_one() {
        let mut cart = Cart::default();
        let id = cart.add_item(candidate("prod-1", 8990)).unwrap();

        assert!(matches!(
            cart.update_quantity(&id, 0),
            Err(CommerceError::InvalidQuantity(0))
        ));
        // Item is still there; removal must be explicit.
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_update_quantity_missing_item() {
        let mut cart = Cart::default();
        let updated = cart
            .update_quantity(&LineItemId::new("nope"), 2)
            .unwrap();
        assert!(!updated);
    }

    #[test]
    fn test_remove_item_is_noop_when_absent() {
        let mut cart = Cart::default();
        assert!(!cart.remove_item(&LineItemId::new("nope")));
    }

    #[test]
    fn test_remove_then_readd_creates_new_line() {
        let mut cart = Cart::default();
        let id = cart.add_item(candidate("prod-1", 8990)).unwrap();
        assert!(cart.remove_item(&id));

        let new_id = cart.add_item(candidate("prod-1", 8990)).unwrap();
        assert_ne!(id, new_id);
    }

    #[test]
    fn test_quantity_cap() {
        let mut cart = Cart::default();
        cart.add_item(candidate("prod-1", 100).with_quantity(MAX_QUANTITY_PER_ITEM))
            .unwrap();
        assert!(matches!(
            cart.add_item(candidate("prod-1", 100)),
            Err(CommerceError::QuantityExceedsLimit(..))
        ));
    }

    #[test]
    fn test_totals_consistency() {
        let mut cart = Cart::default();
        cart.add_item(candidate("prod-1", 8990).with_quantity(3))
            .unwrap();
        cart.add_item(candidate("prod-2", 4550).with_quantity(2))
            .unwrap();

        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price().unwrap().amount_cents, 3 * 8990 + 2 * 4550);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::default();
        cart.add_item(candidate("prod-b", 100)).unwrap();
        cart.add_item(candidate("prod-a", 200)).unwrap();
        let products: Vec<&str> = cart
            .items()
            .iter()
            .map(|i| i.product_id.as_str())
            .collect();
        assert_eq!(products, vec!["prod-b", "prod-a"]);
    }
}
