use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, Money, ProductId};

/// Stock level classification shown next to each product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn label(self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// A sellable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    /// Selling price per unit.
    pub unit_price: Money,
    pub stock: u32,
    /// Reorder threshold; below this the product counts as low stock.
    pub min_stock: u32,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price: Money,
        stock: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            unit_price,
            stock,
            min_stock: 0,
        }
    }

    pub fn with_min_stock(mut self, min_stock: u32) -> Self {
        self.min_stock = min_stock;
        self
    }

    /// Whether at least one unit can be sold.
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    pub fn stock_status(&self) -> StockStatus {
        if self.stock == 0 {
            StockStatus::OutOfStock
        } else if self.stock < self.min_stock {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thermometer(stock: u32) -> Product {
        Product::new(
            ProductId::new(3),
            "Digital Thermometer",
            "Equipment",
            Money::from_major(320),
            stock,
        )
        .with_min_stock(10)
    }

    #[test]
    fn zero_stock_is_out_of_stock_and_unavailable() {
        let p = thermometer(0);
        assert!(!p.is_available());
        assert_eq!(p.stock_status(), StockStatus::OutOfStock);
    }

    #[test]
    fn below_threshold_is_low_stock() {
        let p = thermometer(5);
        assert!(p.is_available());
        assert_eq!(p.stock_status(), StockStatus::LowStock);
        assert_eq!(p.stock_status().to_string(), "Low Stock");
    }

    #[test]
    fn at_threshold_is_in_stock() {
        assert_eq!(thermometer(10).stock_status(), StockStatus::InStock);
    }

    #[test]
    fn default_threshold_never_reports_low_stock() {
        let p = Product::new(
            ProductId::new(1),
            "Vitamin C",
            "Supplements",
            Money::from_major(45),
            1,
        );
        assert_eq!(p.min_stock, 0);
        assert_eq!(p.stock_status(), StockStatus::InStock);
    }
}
