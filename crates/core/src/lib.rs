//! SoleVerse Core - Shared types library.
//!
//! This crate provides the types shared by every SoleVerse component:
//! - `storefront` - JSON API server (catalog, customers, mock payments)
//! - `client` - Shopper-side state (cart, accounts) and API client
//! - `cli` - Terminal front end and database migrations
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. Request and response bodies live here so that the server
//! and the client agree on the wire format by construction.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, prices, emails, statuses, products and API bodies

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
