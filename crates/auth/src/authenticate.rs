//! Login against a [`UserStore`] using an external password verifier.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use roster_core::UserId;

use crate::{Role, StoreError, UserInterface, UserStore};

/// External password-hashing service.
///
/// Implementations own the algorithm; the account only supplies hash + salt.
pub trait PasswordVerifier: Send + Sync {
    fn verify(&self, plaintext: &str, password_hash: &str, salt: Option<&str>) -> bool;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown login or wrong password (deliberately indistinguishable).
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Authorization context produced by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
    pub roles: BTreeSet<Role>,
}

pub struct Authenticator<V> {
    store: Arc<dyn UserStore>,
    verifier: V,
}

impl<V: PasswordVerifier> Authenticator<V> {
    pub fn new(store: Arc<dyn UserStore>, verifier: V) -> Self {
        Self { store, verifier }
    }

    /// Authenticate by email or username.
    pub fn authenticate(&self, login: &str, plaintext: &str) -> Result<AuthenticatedUser, AuthError> {
        let Some(mut account) = self.store.find_by_identifier(login)? else {
            tracing::info!("login rejected: unknown identifier");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .verifier
            .verify(plaintext, UserInterface::password(&account), UserInterface::salt(&account))
        {
            tracing::info!(username = %account.username(), "login rejected: bad password");
            return Err(AuthError::InvalidCredentials);
        }

        account.erase_credentials();

        let user_id = account
            .id()
            .ok_or_else(|| StoreError::Corrupt("loaded account has no id".to_string()))?;

        tracing::info!(user_id = %user_id, username = %account.username(), "login accepted");
        Ok(AuthenticatedUser {
            user_id,
            username: account.username().to_string(),
            roles: UserInterface::roles(&account),
        })
    }
}

impl<V> core::fmt::Debug for Authenticator<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Authenticator").finish_non_exhaustive()
    }
}
