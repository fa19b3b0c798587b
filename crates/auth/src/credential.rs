use serde::{Deserialize, Serialize};

use roster_core::ValueObject;

/// Password hash plus optional salt.
///
/// This is a value holder. It never sees plaintext and performs no hashing;
/// callers hand it an already-encoded hash.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    salt: Option<String>,
}

impl Credential {
    pub fn new(password_hash: impl Into<String>) -> Self {
        Self {
            password_hash: password_hash.into(),
            salt: None,
        }
    }

    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    /// The encoded password hash.
    pub fn password(&self) -> &str {
        &self.password_hash
    }

    /// Replace the stored hash unconditionally.
    pub fn set_password(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
    }

    /// `None` when no salt was ever set (self-salting schemes).
    pub fn salt(&self) -> Option<&str> {
        self.salt.as_deref()
    }

    pub fn set_salt(&mut self, salt: impl Into<String>) {
        self.salt = Some(salt.into());
    }
}

impl ValueObject for Credential {}

// Hashes stay out of logs.
impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credential")
            .field("password_hash", &"[REDACTED]")
            .field("salt", &self.salt.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salt_is_absent_until_set() {
        let mut credential = Credential::new("h1");
        assert_eq!(credential.salt(), None);

        credential.set_salt("pepper");
        assert_eq!(credential.salt(), Some("pepper"));
    }

    #[test]
    fn set_password_replaces_hash() {
        let mut credential = Credential::new("h1").with_salt("s1");
        credential.set_password("h2");
        assert_eq!(credential.password(), "h2");
        assert_eq!(credential.salt(), Some("s1"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let credential = Credential::new("$argon2id$secret").with_salt("s1");
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("secret"));
        assert!(!rendered.contains("s1"));
    }

    #[test]
    fn serialized_form_omits_missing_salt() {
        let json = serde_json::to_value(Credential::new("h1")).unwrap();
        assert_eq!(json, serde_json::json!({ "password_hash": "h1" }));
    }
}
