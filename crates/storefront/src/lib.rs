//! Miu Home Storefront library.
//!
//! Shopper-side state that lives on the device: the persisted cart, the
//! favorites list, and checkout preparation. Everything remote (session,
//! product documents, order documents) belongs to the hosted backend and is
//! not part of this crate.
//!
//! # Modules
//!
//! - [`storage`] - Key-value storage backends and the ordered slot writer
//! - [`cart`] - The cart store
//! - [`favorites`] - The favorites store
//! - [`checkout`] - Delivery validation and order drafts
//! - [`state`] - Explicit application context handed to screens

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod favorites;
pub mod state;
pub mod storage;
