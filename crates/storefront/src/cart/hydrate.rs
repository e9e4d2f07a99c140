//! Reading a stored cart snapshot.
//!
//! Older snapshots may carry line items without a `quantity` (or with 0),
//! which count as one unit, and may repeat an id, which is folded into the
//! first line for that id.

use serde::Deserialize;
use tracing::warn;

use shopfront_core::{CartLineItem, Product, Quantity};

#[derive(Deserialize)]
struct StoredLine {
    #[serde(flatten)]
    product: Product,
    #[serde(default)]
    quantity: Option<u32>,
}

/// Parse `raw` into line items, restoring the cart invariants.
///
/// An unparsable snapshot yields an empty cart.
pub(super) fn parse_snapshot(raw: &str) -> Vec<CartLineItem> {
    let lines: Vec<StoredLine> = match serde_json::from_str(raw) {
        Ok(lines) => lines,
        Err(e) => {
            warn!(error = %e, "Stored cart is unreadable, starting empty");
            return Vec::new();
        }
    };

    let mut items: Vec<CartLineItem> = Vec::with_capacity(lines.len());
    for line in lines {
        let quantity = line
            .quantity
            .and_then(Quantity::new)
            .unwrap_or(Quantity::ONE);

        if let Some(existing) = items.iter_mut().find(|item| item.id() == line.product.id) {
            let merged = existing.quantity.get().saturating_add(quantity.get());
            existing.quantity = Quantity::new(merged).unwrap_or(existing.quantity);
        } else {
            items.push(CartLineItem {
                product: line.product,
                quantity,
            });
        }
    }
    items
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    const LINE: &str = r#""title":"Mug","price":5.5,"category":"home","image":"""#;

    #[test]
    fn test_missing_and_zero_quantity_read_as_one() {
        let raw = format!(r#"[{{"id":1,{LINE}}},{{"id":2,{LINE},"quantity":0}}]"#);
        let items = parse_snapshot(&raw);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].quantity, Quantity::ONE);
        assert_eq!(items[1].quantity, Quantity::ONE);
    }

    #[test]
    fn test_duplicate_ids_merge_into_first() {
        let raw = format!(
            r#"[{{"id":1,{LINE},"quantity":2}},{{"id":3,{LINE}}},{{"id":1,{LINE},"quantity":3}}]"#
        );
        let items = parse_snapshot(&raw);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id().as_i32(), 1);
        assert_eq!(items[0].quantity.get(), 5);
        assert_eq!(items[1].id().as_i32(), 3);
    }

    #[test]
    fn test_garbage_yields_empty_cart() {
        assert!(parse_snapshot("not json").is_empty());
        assert!(parse_snapshot(r#"{"id":1}"#).is_empty());
        assert!(parse_snapshot("null").is_empty());
    }
}
