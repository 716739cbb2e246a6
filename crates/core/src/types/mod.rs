//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod status;
pub mod transaction;
pub mod user;

pub use cart::CartItem;
pub use id::*;
pub use price::Price;
pub use product::Product;
pub use status::*;
pub use transaction::{Payment, PaymentDetails, Transaction};
pub use user::User;
