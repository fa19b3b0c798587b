//! `roster-auth` — user accounts, roles and credentials.
//!
//! This crate is intentionally decoupled from HTTP and any concrete database.
//! Persistence and password hashing are reached through traits.

pub mod authenticate;
pub mod credential;
pub mod roles;
pub mod security;
pub mod store;
pub mod user;

pub use authenticate::{AuthError, AuthenticatedUser, Authenticator, PasswordVerifier};
pub use credential::Credential;
pub use roles::{Role, RoleSet, ROLE_USER};
pub use security::UserInterface;
pub use store::{InMemoryUserStore, StoreError, UserStore};
pub use user::UserAccount;
