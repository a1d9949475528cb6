use serde::{Deserialize, Serialize};

use crate::models::CartItem;

pub const DISCOUNT_THRESHOLD: f64 = 2000.0;
pub const DISCOUNT_RATE: f64 = 0.05;
pub const TAX_RATE: f64 = 0.02;
pub const FREE_SHIPPING_THRESHOLD: f64 = 1000.0;
pub const FLAT_SHIPPING_FEE: f64 = 100.0;

/// Derived order totals. The same formula is used on the cart screen and at
/// checkout submission; tax is 2% of the subtotal after discount.
///
/// Values stay unrounded; the `*_display` helpers round to the nearest whole
/// rupee for rendering.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct CartTotals {
    pub subtotal: f64,
    #[serde(default)]
    pub discount: f64,
    pub tax: f64,
    pub shipping: f64,
    pub total: f64,
}

impl CartTotals {
    pub fn compute(items: &[CartItem]) -> Self {
        let subtotal: f64 = items
            .iter()
            .map(|item| item.product.price * f64::from(item.qty))
            .sum();
        let discount = if subtotal > DISCOUNT_THRESHOLD {
            subtotal * DISCOUNT_RATE
        } else {
            0.0
        };
        let tax = (subtotal - discount) * TAX_RATE;
        let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
            0.0
        } else {
            FLAT_SHIPPING_FEE
        };
        let total = subtotal - discount + tax + shipping;

        CartTotals {
            subtotal,
            discount,
            tax,
            shipping,
            total,
        }
    }

    pub fn discount_display(&self) -> i64 {
        self.discount.round() as i64
    }

    pub fn tax_display(&self) -> i64 {
        self.tax.round() as i64
    }

    pub fn total_display(&self) -> i64 {
        self.total.round() as i64
    }
}

/// Total number of units across all line items, as shown on the nav badge.
pub fn item_count(items: &[CartItem]) -> u32 {
    items.iter().map(|item| item.qty).sum()
}
