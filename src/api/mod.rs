//! # API Module
//!
//! Business logic of the checkout screen, free of any web framework types.
//!
//! ## Modules
//!
//! - [`checkout`] - Form controller, validation policies and the in-flight gate
//! - [`formatters`] - Masking rules for card number, expiry date and cvv
//! - [`transaction`] - Transaction context and Naira formatting

pub mod checkout;
pub mod formatters;
pub mod transaction;
