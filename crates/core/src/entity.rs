//! Things the till tracks by identity, such as catalog products.

/// A record whose identity outlives changes to its fields.
///
/// A product keeps its [`ProductId`](crate::ProductId) while its price or
/// stock changes; two products with equal fields but different ids are
/// different products.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
