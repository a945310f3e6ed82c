//! SoleVerse shopper client.
//!
//! Everything a shopper's session owns lives here: the cart, the local
//! account registry and login session, and the flows that talk to the
//! storefront API (checkout, payment, image preloading).
//!
//! State is held by explicitly owned stores ([`CartStore`],
//! [`AccountStore`]) that write through to a [`Storage`] after every
//! mutation and rehydrate from it on load.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use soleverse_client::{CartStore, ClientConfig, FileStorage, StorefrontApi};
//!
//! let config = ClientConfig::from_env()?;
//! let storage = Arc::new(FileStorage::new(&config.data_dir));
//! let api = StorefrontApi::new(config.api_url.clone());
//!
//! let mut cart = CartStore::load(storage)?;
//! let products = api.list_products().await?;
//! cart.add_to_cart(&products[0], Some(9));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account;
pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod credential;
pub mod storage;

pub use account::{AccountError, AccountProfile, AccountStore, Session, SignupForm, UserAccount};
pub use api::{ApiError, StorefrontApi};
pub use cart::{CartError, CartStore, LineItem};
pub use checkout::{CheckoutError, pay_for_cart, preload_images, submit_checkout};
pub use config::{ClientConfig, ConfigError};
pub use credential::{Argon2Verifier, CredentialError, CredentialVerifier};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
