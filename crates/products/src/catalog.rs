//! Catalog provider.

use std::collections::HashSet;

use stockroom_core::{DomainError, DomainResult, Money, ProductId};

use crate::product::Product;

/// Read-only source of purchasable products.
///
/// There is intentionally no mutation API: completing a sale does not touch
/// stock figures.
pub trait Catalog {
    /// All products in catalog order.
    fn products(&self) -> &[Product];

    fn get(&self, id: ProductId) -> Option<&Product> {
        self.products().iter().find(|p| p.id == id)
    }

    /// Case-insensitive match on name or category. An empty (or blank) term
    /// matches every product.
    fn search(&self, term: &str) -> Vec<&Product> {
        let needle = term.trim().to_lowercase();
        self.products()
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

/// Fixed product list held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    /// Build a catalog, refusing duplicate product ids.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for p in &products {
            if !seen.insert(p.id) {
                return Err(DomainError::conflict(format!(
                    "duplicate product id {}",
                    p.id
                )));
            }
        }
        Ok(Self { products })
    }

    /// The demo pharmacy catalog.
    pub fn demo() -> Self {
        Self {
            products: vec![
                Product::new(
                    ProductId::new(1),
                    "Paracetamol 500mg",
                    "Medicine",
                    Money::from_major(24),
                    150,
                )
                .with_min_stock(20),
                Product::new(
                    ProductId::new(2),
                    "Vitamin C",
                    "Supplements",
                    Money::from_major(45),
                    80,
                )
                .with_min_stock(15),
                Product::new(
                    ProductId::new(3),
                    "Digital Thermometer",
                    "Equipment",
                    Money::from_major(320),
                    5,
                )
                .with_min_stock(10),
                Product::new(
                    ProductId::new(4),
                    "Hand Sanitizer 250ml",
                    "Hygiene",
                    Money::from_major(80),
                    0,
                )
                .with_min_stock(25),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Catalog for InMemoryCatalog {
    fn products(&self) -> &[Product] {
        &self.products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::StockStatus;

    #[test]
    fn demo_catalog_lookup() {
        let catalog = InMemoryCatalog::demo();
        assert_eq!(catalog.len(), 4);

        let p = catalog.get(ProductId::new(1)).unwrap();
        assert_eq!(p.name, "Paracetamol 500mg");
        assert_eq!(p.unit_price, Money::from_major(24));

        assert!(catalog.get(ProductId::new(99)).is_none());
    }

    #[test]
    fn demo_catalog_has_an_out_of_stock_product() {
        let catalog = InMemoryCatalog::demo();
        let sanitizer = catalog.get(ProductId::new(4)).unwrap();
        assert_eq!(sanitizer.stock_status(), StockStatus::OutOfStock);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let p = Product::new(ProductId::new(1), "A", "X", Money::from_major(1), 1);
        let err = InMemoryCatalog::new(vec![p.clone(), p]).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn search_matches_name_or_category_case_insensitively() {
        let catalog = InMemoryCatalog::demo();

        let hits: Vec<_> = catalog.search("vitamin").iter().map(|p| p.id).collect();
        assert_eq!(hits, vec![ProductId::new(2)]);

        let hits: Vec<_> = catalog.search("EQUIPMENT").iter().map(|p| p.id).collect();
        assert_eq!(hits, vec![ProductId::new(3)]);

        assert_eq!(catalog.search("  ").len(), 4);
        assert!(catalog.search("aspirin").is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Every search hit really contains the term, and nothing is invented.
            #[test]
            fn search_hits_contain_term(term in "[a-zA-Z ]{0,6}") {
                let catalog = InMemoryCatalog::demo();
                let needle = term.trim().to_lowercase();
                for hit in catalog.search(&term) {
                    prop_assert!(
                        needle.is_empty()
                            || hit.name.to_lowercase().contains(&needle)
                            || hit.category.to_lowercase().contains(&needle)
                    );
                }
                prop_assert!(catalog.search(&term).len() <= catalog.len());
            }
        }
    }
}
