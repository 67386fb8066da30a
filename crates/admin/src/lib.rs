//! Miu Home Admin library.
//!
//! Order records as the admin screens see them, the sales dashboard
//! computed from them, and product form validation for inventory changes.
//! Fetching and writing documents is done against the hosted backend by the
//! caller.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod dashboard;
pub mod inventory;
pub mod models;
