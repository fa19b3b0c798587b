//! Persistence contract for user accounts, plus an in-memory implementation.
//!
//! The store owns identity (ids are handed out on first save) and uniqueness
//! of `email`/`username`. Roles travel as a JSON document, the way a JSON
//! column would hold them.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value as JsonValue;
use thiserror::Error;

use roster_core::{DomainError, UserId};

use crate::{Credential, RoleSet, UserAccount};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    #[error("user not found: {0}")]
    NotFound(UserId),

    #[error("stored row is corrupt: {0}")]
    Corrupt(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Persistence boundary for [`UserAccount`].
pub trait UserStore: Send + Sync + core::fmt::Debug {
    /// Insert (no id yet) or update (id present) an account.
    ///
    /// Returns the account as stored, with its id assigned.
    fn save(&self, account: UserAccount) -> Result<UserAccount, StoreError>;

    fn find(&self, id: UserId) -> Result<Option<UserAccount>, StoreError>;

    fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, StoreError>;

    fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, StoreError>;

    /// Look up by email first, then by username.
    fn find_by_identifier(&self, login: &str) -> Result<Option<UserAccount>, StoreError> {
        match self.find_by_email(login)? {
            Some(account) => Ok(Some(account)),
            None => self.find_by_username(login),
        }
    }

    /// Returns whether a row was removed.
    fn delete(&self, id: UserId) -> Result<bool, StoreError>;
}

#[derive(Debug, Clone)]
struct UserRow {
    email: String,
    username: String,
    roles: JsonValue,
    password: String,
    salt: Option<String>,
}

impl UserRow {
    fn from_account(account: &UserAccount) -> Result<Self, StoreError> {
        let roles = serde_json::to_value(account.role_set())
            .map_err(|e| StoreError::Corrupt(format!("roles: {e}")))?;

        Ok(Self {
            email: account.email().to_string(),
            username: account.username().to_string(),
            roles,
            password: account.password().to_string(),
            salt: account.salt().map(str::to_string),
        })
    }

    fn to_account(&self, id: UserId) -> Result<UserAccount, StoreError> {
        let roles: RoleSet = serde_json::from_value(self.roles.clone())
            .map_err(|e| StoreError::Corrupt(format!("roles for {id}: {e}")))?;

        let mut credential = Credential::new(self.password.clone());
        if let Some(salt) = &self.salt {
            credential.set_salt(salt.clone());
        }

        Ok(UserAccount::restore(
            id,
            self.email.clone(),
            self.username.clone(),
            roles,
            credential,
        )?)
    }
}

/// Whether `login` is used as an email or username by any row other than `skip`.
fn login_taken(rows: &HashMap<UserId, UserRow>, skip: UserId, login: &str) -> bool {
    rows.iter()
        .filter(|(id, _)| **id != skip)
        .any(|(_, row)| row.email == login || row.username == login)
}

/// In-memory user store.
///
/// Intended for tests/dev. Lookups by email/username are linear scans.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    rows: RwLock<HashMap<UserId, UserRow>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<UserId, UserRow>>, StoreError> {
        self.rows
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn find_where(
        &self,
        pred: impl Fn(&UserRow) -> bool,
    ) -> Result<Option<UserAccount>, StoreError> {
        let rows = self.read()?;
        rows.iter()
            .find(|(_, row)| pred(row))
            .map(|(id, row)| row.to_account(*id))
            .transpose()
    }
}

impl UserStore for InMemoryUserStore {
    fn save(&self, mut account: UserAccount) -> Result<UserAccount, StoreError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let id = match account.id() {
            Some(id) if rows.contains_key(&id) => id,
            Some(id) => return Err(StoreError::NotFound(id)),
            None => UserId::new(),
        };

        // Email and username share one login namespace: each must be free
        // in both columns of every other row. Email is checked first.
        if login_taken(&rows, id, account.email()) {
            return Err(StoreError::DuplicateEmail(account.email().to_string()));
        }
        if login_taken(&rows, id, account.username()) {
            return Err(StoreError::DuplicateUsername(account.username().to_string()));
        }

        account.assign_id(id)?;
        let row = UserRow::from_account(&account)?;
        let inserted = rows.insert(id, row).is_none();

        tracing::debug!(user_id = %id, inserted, "user saved");
        Ok(account)
    }

    fn find(&self, id: UserId) -> Result<Option<UserAccount>, StoreError> {
        let rows = self.read()?;
        rows.get(&id).map(|row| row.to_account(id)).transpose()
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, StoreError> {
        self.find_where(|row| row.email == email)
    }

    fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, StoreError> {
        self.find_where(|row| row.username == username)
    }

    fn delete(&self, id: UserId) -> Result<bool, StoreError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let removed = rows.remove(&id).is_some();
        tracing::debug!(user_id = %id, removed, "user deleted");
        Ok(removed)
    }
}
