//! User account: identity, roles and credential.
//!
//! The account is a plain record with guarded mutators. It does not hash or
//! verify passwords and it does not persist itself; see [`crate::store`] and
//! [`crate::authenticate`] for those collaborators.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use roster_core::{DomainError, DomainResult, Entity, UserId};

use crate::{Credential, Role, RoleSet};

/// A user account.
///
/// # Invariants
/// - `email`, `username` and the password hash are never empty.
/// - `id` is assigned at most once (by the persistence layer).
/// - `roles()` always contains `ROLE_USER`.
///
/// Uniqueness of `email`/`username` across accounts is the store's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserAccountRecord")]
pub struct UserAccount {
    id: Option<UserId>,
    email: String,
    username: String,
    #[serde(default)]
    roles: RoleSet,
    #[serde(flatten)]
    credential: Credential,
}

/// Unvalidated wire shape; deserialization goes through [`UserAccount::from_parts`].
#[derive(Deserialize)]
struct UserAccountRecord {
    id: Option<UserId>,
    email: String,
    username: String,
    #[serde(default)]
    roles: RoleSet,
    #[serde(flatten)]
    credential: Credential,
}

impl TryFrom<UserAccountRecord> for UserAccount {
    type Error = DomainError;

    fn try_from(record: UserAccountRecord) -> Result<Self, Self::Error> {
        UserAccount::from_parts(
            record.id,
            record.email,
            record.username,
            record.roles,
            record.credential,
        )
    }
}

fn require_non_empty(field: &'static str, value: String) -> DomainResult<String> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    Ok(value)
}

impl UserAccount {
    /// Create an unsaved account from an already-hashed password.
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> DomainResult<Self> {
        let email = require_non_empty("email", email.into())?;
        let username = require_non_empty("username", username.into())?;
        let password_hash = require_non_empty("password", password_hash.into())?;

        Ok(Self {
            id: None,
            email,
            username,
            roles: RoleSet::new(),
            credential: Credential::new(password_hash),
        })
    }

    /// Rebuild an account from stored columns, re-checking field invariants.
    pub fn restore(
        id: UserId,
        email: impl Into<String>,
        username: impl Into<String>,
        roles: RoleSet,
        credential: Credential,
    ) -> DomainResult<Self> {
        Self::from_parts(Some(id), email.into(), username.into(), roles, credential)
    }

    fn from_parts(
        id: Option<UserId>,
        email: String,
        username: String,
        roles: RoleSet,
        credential: Credential,
    ) -> DomainResult<Self> {
        let email = require_non_empty("email", email)?;
        let username = require_non_empty("username", username)?;
        if credential.password().trim().is_empty() {
            return Err(DomainError::validation("password", "must not be empty"));
        }

        Ok(Self {
            id,
            email,
            username,
            roles,
            credential,
        })
    }

    pub fn id(&self) -> Option<UserId> {
        self.id
    }

    /// Record the identity handed out by the persistence layer.
    ///
    /// Re-assigning the same id is accepted; a different one is not.
    pub fn assign_id(&mut self, id: UserId) -> DomainResult<()> {
        match self.id {
            Some(existing) if existing != id => Err(DomainError::invariant(format!(
                "user already has id {existing}"
            ))),
            _ => {
                self.id = Some(id);
                Ok(())
            }
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> DomainResult<&mut Self> {
        self.email = require_non_empty("email", email.into())?;
        Ok(self)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_username(&mut self, username: impl Into<String>) -> DomainResult<&mut Self> {
        self.username = require_non_empty("username", username.into())?;
        Ok(self)
    }

    /// Effective roles (stored roles plus `ROLE_USER`).
    pub fn roles(&self) -> BTreeSet<Role> {
        self.roles.effective_roles()
    }

    pub fn role_set(&self) -> &RoleSet {
        &self.roles
    }

    pub fn add_role(&mut self, role: impl Into<Role>) -> &mut Self {
        self.roles.add_role(role);
        self
    }

    pub fn remove_role(&mut self, role: impl Into<Role>) -> &mut Self {
        self.roles.remove_role(role);
        self
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    /// The encoded password hash.
    pub fn password(&self) -> &str {
        self.credential.password()
    }

    pub fn set_password(&mut self, password_hash: impl Into<String>) -> DomainResult<&mut Self> {
        let hash = require_non_empty("password", password_hash.into())?;
        self.credential.set_password(hash);
        Ok(self)
    }

    pub fn salt(&self) -> Option<&str> {
        self.credential.salt()
    }

    pub fn set_salt(&mut self, salt: impl Into<String>) -> &mut Self {
        self.credential.set_salt(salt);
        self
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}

impl Entity for UserAccount {
    type Id = Option<UserId>;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
