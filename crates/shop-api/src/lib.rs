//! Stride Shop API library.
//!
//! A mocked read-only REST service standing in for the product catalog and
//! stock services the storefront consumes. The catalog and stock levels are
//! loaded once at startup from a JSON fixture; lookups are served from an
//! in-memory index.
//!
//! The [`routes::router`] function is public so tests can mount the service
//! in-process instead of running the binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod routes;
