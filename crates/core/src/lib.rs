//! Shopfront Core - Shared types library.
//!
//! This crate provides common types used across all Shopfront components:
//! - `cart` - Cart pricing engine, catalog and contact form logic
//! - `cli` - Command-line driver over a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, money, emails, and notice levels

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
