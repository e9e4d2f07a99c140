//! Cart line items.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// A positive item quantity.
///
/// A line item can never hold zero units; reducing the last unit removes the
/// line instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(NonZeroU32);

/// Error returned when converting zero into a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("quantity must be at least 1")]
pub struct ZeroQuantity;

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, returning `None` for zero.
    #[must_use]
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// The number of units.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// One more unit (saturating at `u32::MAX`).
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One fewer unit, or `None` when this is the last one.
    #[must_use]
    pub fn decremented(self) -> Option<Self> {
        Self::new(self.0.get() - 1)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = ZeroQuantity;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ZeroQuantity)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

/// One product in the cart plus how many units of it.
///
/// Serialized flat: the product's fields and `quantity` side by side, which is
/// the layout of the persisted cart snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// The product as it was when first added.
    #[serde(flatten)]
    pub product: Product,
    /// Units of the product in the cart.
    pub quantity: Quantity,
}

impl CartLineItem {
    /// A new line holding a single unit of `product`.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: Quantity::ONE,
        }
    }

    /// The line's identity key.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::product::Rating;

    fn product() -> Product {
        Product {
            id: ProductId::new(9),
            title: "Backpack".to_string(),
            price: Price::from_cents(1050),
            category: "bags".to_string(),
            image: "https://example.test/9.png".to_string(),
            description: String::new(),
            rating: Rating {
                rate: 4.5,
                count: 10,
            },
        }
    }

    #[test]
    fn test_quantity_rejects_zero() {
        assert!(Quantity::new(0).is_none());
        assert_eq!(Quantity::try_from(0), Err(ZeroQuantity));
    }

    #[test]
    fn test_quantity_decrement_to_none() {
        assert_eq!(Quantity::ONE.decremented(), None);
        assert_eq!(
            Quantity::new(3).unwrap().decremented(),
            Quantity::new(2)
        );
    }

    #[test]
    fn test_quantity_increment_saturates() {
        let max = Quantity::new(u32::MAX).unwrap();
        assert_eq!(max.incremented(), max);
    }

    #[test]
    fn test_line_item_serializes_flat() {
        let item = CartLineItem {
            product: product(),
            quantity: Quantity::new(2).unwrap(),
        };

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], 9);
        assert_eq!(value["title"], "Backpack");
        assert_eq!(value["quantity"], 2);
        assert!(value.get("product").is_none());
    }

    #[test]
    fn test_line_item_rejects_zero_quantity() {
        let mut value = serde_json::to_value(CartLineItem::new(product())).unwrap();
        value["quantity"] = serde_json::json!(0);
        assert!(serde_json::from_value::<CartLineItem>(value).is_err());
    }

    #[test]
    fn test_line_total() {
        let item = CartLineItem {
            product: product(),
            quantity: Quantity::new(3).unwrap(),
        };
        assert_eq!(item.line_total(), Price::from_cents(3150));
    }
}
