//! Product catalog (read-only to the sale core).
//!
//! Products are owned by whoever maintains the catalog; sales only read
//! names, prices and stock figures from here and never write back.

pub mod catalog;
pub mod product;

pub use catalog::{Catalog, InMemoryCatalog};
pub use product::{Product, StockStatus};
