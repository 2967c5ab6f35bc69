//! Cart pricing calculations.
//!
//! Pricing is derived from the items on every read; nothing here is
//! stored back on the cart.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::ids::LineItemId;
use crate::money::Money;

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of all line totals.
    pub subtotal: Money,
    /// Sum of all quantities.
    pub total_items: i64,
    /// Per-line-item breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Per-installment amounts for the subtotal.
    ///
    /// Display-only: the processor is always charged the full subtotal.
    /// Returns `None` when `parts` is zero.
    pub fn installment_preview(&self, parts: u32) -> Option<Vec<Money>> {
        self.subtotal.split_installments(parts)
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Line item ID.
    pub line_item_id: LineItemId,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// Line total (unit_price * quantity).
    pub total: Money,
}

impl Cart {
    /// Calculate the pricing breakdown.
    ///
    /// Fails with `Overflow` if any line total or the subtotal
    /// overflows.
    pub fn pricing(&self) -> Result<CartPricing, CommerceError> {
        let mut line_items = Vec::with_capacity(self.items().len());
        for item in self.items() {
            let total = item.line_total().ok_or(CommerceError::Overflow)?;
            line_items.push(LineItemPricing {
                line_item_id: item.id.clone(),
                unit_price: item.unit_price,
                quantity: item.quantity,
                total,
            });
        }

        Ok(CartPricing {
            subtotal: self.total_price()?,
            total_items: self.total_items(),
            line_items,
        })
    }
}
