//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_pricing` - Cart operations and price breakdowns over an in-memory store
//! - `file_store_session` - Cart state persisted through the JSON file store
//! - `catalog_contact` - Product listing and contact form flows
