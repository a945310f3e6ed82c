//! Command implementations.
//!
//! Expected failures (bad input, a rejected API call, an empty cart) are
//! reported where they happen and turn into a failing exit code. Anything
//! that escapes as a [`CommandError`] reaches the root handler in `main`.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fmt::Display;
use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;

use soleverse_client::{
    AccountStore, Argon2Verifier, CartStore, ClientConfig, ConfigError, FileStorage, Storage,
    StorageError, StorefrontApi, storage,
};

pub mod account;
pub mod migrate;
pub mod shop;

/// Errors that abort a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Migration(#[from] migrate::MigrationError),
}

/// Everything a shopper command needs: the API client and local storage.
pub struct Context {
    api: StorefrontApi,
    storage: Arc<dyn Storage>,
}

impl Context {
    /// Build the context from `SOLEVERSE_API_URL` and `SOLEVERSE_DATA_DIR`.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Config` if the API URL is invalid.
    pub fn from_env() -> Result<Self, CommandError> {
        let config = ClientConfig::from_env()?;
        tracing::debug!(
            api_url = %config.api_url,
            data_dir = %config.data_dir.display(),
            "Loaded client configuration"
        );

        Ok(Self {
            api: StorefrontApi::new(config.api_url),
            storage: Arc::new(FileStorage::new(config.data_dir)),
        })
    }

    pub const fn api(&self) -> &StorefrontApi {
        &self.api
    }

    /// Rehydrate the cart.
    pub fn cart(&self) -> Result<CartStore, StorageError> {
        CartStore::load(Arc::clone(&self.storage))
    }

    /// Rehydrate accounts and session.
    pub fn accounts(&self) -> Result<AccountStore, StorageError> {
        AccountStore::load(Arc::clone(&self.storage), Arc::new(Argon2Verifier::new()))
    }
}

/// Report an expected failure and exit unsuccessfully.
pub fn notice(error: impl Display) -> ExitCode {
    eprintln!("✗ {error}");
    ExitCode::FAILURE
}

/// Drop every persisted key: cart, accounts and session.
pub fn reset(ctx: &Context) -> Result<ExitCode, CommandError> {
    storage::clear_all(ctx.storage.as_ref())?;
    println!("Local shopper data cleared.");
    Ok(ExitCode::SUCCESS)
}
