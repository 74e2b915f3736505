use serde::{Deserialize, Serialize};

use stockroom_core::{Money, ProductId, ValueObject};

/// One product row of a sale.
///
/// `name` and `unit_price` are copied from the catalog when the product is
/// first added; later catalog price changes do not reach an open draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    /// Always positive while the line exists.
    pub quantity: u64,
}

impl LineItem {
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        quantity: u64,
    ) -> Self {
        Self {
            product_id,
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

impl ValueObject for LineItem {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_is_price_times_quantity() {
        let line = LineItem::new(ProductId::new(1), "Paracetamol 500mg", Money::from_major(24), 5);
        assert_eq!(line.line_total(), Money::from_major(120));
    }
}
