//! Shopfront Core - Shared types library.
//!
//! This crate provides common types used across all Shopfront components:
//! - `client` - API client library with local cart and session state
//! - `cli` - Command-line storefront interface
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no durable
//! storage. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices, plus the
//!   storefront domain entities (users, products, cart lines, transactions,
//!   payments)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
