//! Miu Home Core - Shared types library.
//!
//! This crate provides common types used across all Miu Home components:
//! - `storefront` - Shopper-side cart, favorites, and checkout logic
//! - `admin` - Store dashboard reporting
//! - `cli` - Command-line tools for driving the local stores
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
