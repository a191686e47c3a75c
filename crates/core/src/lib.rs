//! Stride Core - Shared types library.
//!
//! This crate provides common types used across all Stride components:
//! - `storefront` - Public-facing e-commerce site
//! - `shop-api` - Mocked catalog and stock service
//! - `integration-tests` - End-to-end tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no file
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, catalog wire types, and the cart snapshot type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
