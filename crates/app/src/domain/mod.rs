//! Shelf Domain Concerns

pub mod products;
