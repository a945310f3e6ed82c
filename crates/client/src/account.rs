//! Local shopper accounts and the login session.
//!
//! Accounts live only in client storage. Passwords are kept as digests
//! produced by a [`CredentialVerifier`]; the session profile never carries
//! the digest.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use soleverse_core::{Email, PasswordDigest, UserId};

use crate::credential::{CredentialError, CredentialVerifier};
use crate::storage::{self, Storage, StorageError, keys};

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Errors returned by signup and login.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Please enter a valid email")]
    InvalidEmail,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// A registered account as persisted under `signupUsers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub password_digest: PasswordDigest,
}

impl UserAccount {
    /// The account without its credential.
    #[must_use]
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Public part of an account, stored in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub phone: String,
}

/// Who is logged in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub is_authenticated: bool,
    pub current_user: Option<AccountProfile>,
}

/// Signup form input.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

/// Account registry plus session, written through to storage.
pub struct AccountStore {
    storage: Arc<dyn Storage>,
    verifier: Arc<dyn CredentialVerifier>,
    accounts: Vec<UserAccount>,
    session: Session,
}

impl std::fmt::Debug for AccountStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountStore")
            .field("accounts", &self.accounts.len())
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl AccountStore {
    /// Rehydrate accounts and session from storage.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if a stored value cannot be read or decoded.
    pub fn load(
        storage: Arc<dyn Storage>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Result<Self, StorageError> {
        let accounts = storage::load(storage.as_ref(), keys::SIGNUP_USERS)?.unwrap_or_default();
        let session = Session {
            is_authenticated: storage::load(storage.as_ref(), keys::IS_AUTHENTICATED)?
                .unwrap_or(false),
            current_user: storage::load(storage.as_ref(), keys::CURRENT_USER)?,
        };

        Ok(Self {
            storage,
            verifier,
            accounts,
            session,
        })
    }

    /// Register a new account.
    ///
    /// Checks run in order and the first failure is returned: every field
    /// filled, email well-formed, passwords equal, password long enough,
    /// email not yet registered. Signing up does not log in.
    ///
    /// # Errors
    ///
    /// Returns the `AccountError` for the first failed check, or
    /// `AccountError::Credential` if the password cannot be hashed.
    #[instrument(skip_all)]
    pub fn signup(&mut self, form: &SignupForm) -> Result<AccountProfile, AccountError> {
        let fields = [
            &form.name,
            &form.email,
            &form.phone,
            &form.password,
            &form.confirm_password,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(AccountError::MissingFields);
        }

        let email = Email::parse(&form.email).map_err(|_| AccountError::InvalidEmail)?;

        if form.password != form.confirm_password {
            return Err(AccountError::PasswordMismatch);
        }
        if form.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AccountError::PasswordTooShort);
        }
        if self.accounts.iter().any(|a| a.email == email) {
            return Err(AccountError::EmailTaken);
        }

        let account = UserAccount {
            id: self.next_id(),
            name: form.name.trim().to_owned(),
            email,
            phone: form.phone.trim().to_owned(),
            password_digest: self.verifier.digest(&form.password)?,
        };
        let profile = account.profile();
        self.accounts.push(account);
        self.persist_accounts();

        tracing::info!(user_id = %profile.id, "Account created");
        Ok(profile)
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::MissingFields` or `AccountError::InvalidEmail`
    /// for bad input, and `AccountError::InvalidCredentials` when no account
    /// matches. The session is unchanged on error.
    #[instrument(skip_all)]
    pub fn login(&mut self, email: &str, password: &str) -> Result<AccountProfile, AccountError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AccountError::MissingFields);
        }
        let email = Email::parse(email).map_err(|_| AccountError::InvalidEmail)?;

        let profile = self
            .accounts
            .iter()
            .find(|a| a.email == email && self.verifier.verify(password, &a.password_digest))
            .map(UserAccount::profile)
            .ok_or(AccountError::InvalidCredentials)?;

        self.session = Session {
            is_authenticated: true,
            current_user: Some(profile.clone()),
        };
        self.persist_session();

        tracing::info!(user_id = %profile.id, "Logged in");
        Ok(profile)
    }

    /// End the session.
    pub fn logout(&mut self) {
        self.session = Session::default();
        self.persist_session();
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn current_user(&self) -> Option<&AccountProfile> {
        self.session.current_user.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_authenticated
    }

    /// Registered accounts.
    #[must_use]
    pub fn accounts(&self) -> &[UserAccount] {
        &self.accounts
    }

    fn next_id(&self) -> UserId {
        let max = self
            .accounts
            .iter()
            .map(|a| a.id.as_i32())
            .max()
            .unwrap_or(0);
        UserId::new(max.saturating_add(1))
    }

    fn persist_accounts(&self) {
        if let Err(e) = storage::save(self.storage.as_ref(), keys::SIGNUP_USERS, &self.accounts) {
            tracing::warn!(error = %e, "Failed to persist accounts");
        }
    }

    fn persist_session(&self) {
        let storage = self.storage.as_ref();
        let result = storage::save(storage, keys::IS_AUTHENTICATED, &self.session.is_authenticated)
            .and_then(|()| match &self.session.current_user {
                Some(user) => storage::save(storage, keys::CURRENT_USER, user),
                None => storage.remove(keys::CURRENT_USER),
            });

        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist session");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::credential::Argon2Verifier;
    use crate::storage::MemoryStorage;

    fn verifier() -> Arc<dyn CredentialVerifier> {
        Arc::new(Argon2Verifier::with_params(
            argon2::Params::new(8, 1, 1, None).unwrap(),
        ))
    }

    fn store() -> (Arc<MemoryStorage>, AccountStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = AccountStore::load(storage.clone(), verifier()).unwrap();
        (storage, store)
    }

    fn form(email: &str, password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            name: "Asha Rao".to_owned(),
            email: email.to_owned(),
            phone: "9876543210".to_owned(),
            password: password.to_owned(),
            confirm_password: confirm.to_owned(),
        }
    }

    #[test]
    fn test_signup_then_login() {
        let (_, mut store) = store();
        store
            .signup(&form("asha@soleverse.in", "secret1", "secret1"))
            .unwrap();
        assert!(!store.is_authenticated());

        let profile = store.login("asha@soleverse.in", "secret1").unwrap();
        assert_eq!(profile.name, "Asha Rao");
        assert!(store.is_authenticated());
        assert_eq!(store.current_user(), Some(&profile));
    }

    #[test]
    fn test_login_wrong_password_leaves_session() {
        let (_, mut store) = store();
        store
            .signup(&form("asha@soleverse.in", "secret1", "secret1"))
            .unwrap();

        let err = store.login("asha@soleverse.in", "secret2").unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(store.session(), &Session::default());
    }

    #[test]
    fn test_login_unknown_email() {
        let (_, mut store) = store();
        let err = store.login("nobody@soleverse.in", "secret1").unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[test]
    fn test_signup_validation_order() {
        let (_, mut store) = store();

        let mut missing = form("asha@soleverse.in", "secret1", "secret1");
        missing.phone = "  ".to_owned();
        assert!(matches!(
            store.signup(&missing),
            Err(AccountError::MissingFields)
        ));

        // Bad email wins over mismatched passwords
        assert!(matches!(
            store.signup(&form("asha", "secret1", "other")),
            Err(AccountError::InvalidEmail)
        ));
        // Mismatch wins over short password
        assert!(matches!(
            store.signup(&form("asha@soleverse.in", "abc", "abd")),
            Err(AccountError::PasswordMismatch)
        ));
        assert!(matches!(
            store.signup(&form("asha@soleverse.in", "abc", "abc")),
            Err(AccountError::PasswordTooShort)
        ));
        assert!(store.accounts().is_empty());
    }

    #[test]
    fn test_signup_duplicate_email() {
        let (_, mut store) = store();
        store
            .signup(&form("asha@soleverse.in", "secret1", "secret1"))
            .unwrap();
        let err = store
            .signup(&form("asha@soleverse.in", "secret2", "secret2"))
            .unwrap_err();
        assert!(matches!(err, AccountError::EmailTaken));
        assert_eq!(store.accounts().len(), 1);
    }

    #[test]
    fn test_stored_account_has_no_plaintext_password() {
        let (storage, mut store) = store();
        store
            .signup(&form("asha@soleverse.in", "secret1", "secret1"))
            .unwrap();

        let raw = storage.get(keys::SIGNUP_USERS).unwrap().unwrap();
        assert!(!raw.contains("secret1"));
        assert!(raw.contains("passwordDigest"));
    }

    #[test]
    fn test_session_survives_reload_and_logout_clears_current_user() {
        let (storage, mut store) = store();
        store
            .signup(&form("asha@soleverse.in", "secret1", "secret1"))
            .unwrap();
        store.login("asha@soleverse.in", "secret1").unwrap();

        let reloaded = AccountStore::load(storage.clone(), verifier()).unwrap();
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.accounts().len(), 1);
        assert_eq!(
            reloaded.current_user().map(|u| u.email.as_str()),
            Some("asha@soleverse.in")
        );

        let raw_user = storage.get(keys::CURRENT_USER).unwrap().unwrap();
        assert!(!raw_user.contains("passwordDigest"));

        store.logout();
        assert!(!store.is_authenticated());
        assert!(!storage.contains(keys::CURRENT_USER));
        assert_eq!(
            storage.get(keys::IS_AUTHENTICATED).unwrap().as_deref(),
            Some("false")
        );
    }

    #[test]
    fn test_ids_continue_after_reload() {
        let (storage, mut store) = store();
        store
            .signup(&form("a@soleverse.in", "secret1", "secret1"))
            .unwrap();

        let mut reloaded = AccountStore::load(storage.clone(), verifier()).unwrap();
        let second = reloaded
            .signup(&form("b@soleverse.in", "secret1", "secret1"))
            .unwrap();
        assert_eq!(second.id.as_i32(), 2);
    }
}
