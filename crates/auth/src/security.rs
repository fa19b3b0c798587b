use std::collections::BTreeSet;

use crate::{Role, UserAccount};

/// What an authentication pipeline needs from a user record.
///
/// Any type exposing these accessors can be authenticated; nothing else about
/// the record is assumed.
pub trait UserInterface {
    /// Roles used to build the authorization context.
    fn roles(&self) -> BTreeSet<Role>;

    /// Encoded password hash to verify the supplied plaintext against.
    fn password(&self) -> &str;

    /// Salt used when the hash was produced, if the scheme needs one.
    fn salt(&self) -> Option<&str>;

    /// Login/display identifier.
    fn username(&self) -> &str;

    /// Drop transient secret material after authentication.
    fn erase_credentials(&mut self) {}
}

impl UserInterface for UserAccount {
    fn roles(&self) -> BTreeSet<Role> {
        UserAccount::roles(self)
    }

    fn password(&self) -> &str {
        UserAccount::password(self)
    }

    fn salt(&self) -> Option<&str> {
        UserAccount::salt(self)
    }

    fn username(&self) -> &str {
        UserAccount::username(self)
    }

    // Only the hash is held, never plaintext, so the default no-op applies.
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe(user: &impl UserInterface) -> (String, usize, bool) {
        (user.username().to_string(), user.roles().len(), user.salt().is_some())
    }

    #[test]
    fn account_satisfies_capability() {
        let mut user = UserAccount::new("a@x.com", "alice", "h1").unwrap();
        user.add_role("ROLE_ADMIN");
        assert_eq!(describe(&user), ("alice".to_string(), 2, false));
    }

    #[test]
    fn erase_credentials_keeps_hash() {
        let mut user = UserAccount::new("a@x.com", "alice", "h1").unwrap();
        UserInterface::erase_credentials(&mut user);
        assert_eq!(UserInterface::password(&user), "h1");
    }
}
