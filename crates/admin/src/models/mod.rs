//! Domain models for admin.

pub mod order;

pub use order::{OrderRecord, ProductSnapshot, resolve_products};
