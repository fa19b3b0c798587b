use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use roster_core::ValueObject;

/// Baseline role every account holds, whether or not it was stored.
pub const ROLE_USER: &str = "ROLE_USER";

/// Role identifier.
///
/// Roles are opaque strings at this layer; the taxonomy of valid roles lives
/// with whoever grants them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// The baseline role (`ROLE_USER`).
    pub fn baseline() -> Self {
        Self(Cow::Borrowed(ROLE_USER))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_baseline(&self) -> bool {
        self.as_str() == ROLE_USER
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Role {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl ValueObject for Role {}

/// Deduplicated roles of an account, plus the baseline-on-read rule.
///
/// Storage only holds what was explicitly granted. The baseline role is
/// injected when the effective set is read and never written back, so a
/// freshly created account persists an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet {
    stored: BTreeSet<Role>,
}

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored roles plus the baseline, deduplicated.
    pub fn effective_roles(&self) -> BTreeSet<Role> {
        let mut roles = self.stored.clone();
        roles.insert(Role::baseline());
        roles
    }

    /// Grant `role`. Returns `true` if storage changed.
    pub fn add_role(&mut self, role: impl Into<Role>) -> bool {
        self.stored.insert(role.into())
    }

    /// Revoke `role` from storage. Absent roles are ignored.
    ///
    /// Revoking the baseline only affects storage; it is still effective.
    pub fn remove_role(&mut self, role: impl Into<Role>) -> bool {
        self.stored.remove(&role.into())
    }

    /// Membership in the effective set.
    pub fn contains(&self, role: &Role) -> bool {
        role.is_baseline() || self.stored.contains(role)
    }

    /// Explicitly stored roles, in the order they are persisted.
    pub fn stored(&self) -> impl Iterator<Item = &Role> {
        self.stored.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.stored.is_empty()
    }
}

impl ValueObject for RoleSet {}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self {
            stored: iter.into_iter().collect(),
        }
    }
}

impl Extend<Role> for RoleSet {
    fn extend<I: IntoIterator<Item = Role>>(&mut self, iter: I) {
        self.stored.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names(roles: &BTreeSet<Role>) -> Vec<&str> {
        roles.iter().map(Role::as_str).collect()
    }

    #[test]
    fn empty_set_still_has_baseline() {
        let roles = RoleSet::new();
        assert!(roles.is_empty());
        assert_eq!(names(&roles.effective_roles()), vec!["ROLE_USER"]);
        assert!(roles.contains(&Role::baseline()));
    }

    #[test]
    fn reading_does_not_store_baseline() {
        let roles = RoleSet::new();
        let _ = roles.effective_roles();
        assert_eq!(roles.stored().count(), 0);
    }

    #[test]
    fn explicit_baseline_is_not_duplicated() {
        let mut roles = RoleSet::new();
        roles.add_role(ROLE_USER);
        roles.add_role("ROLE_ADMIN");
        assert_eq!(names(&roles.effective_roles()), vec!["ROLE_ADMIN", "ROLE_USER"]);
    }

    #[test]
    fn removing_baseline_has_no_observable_effect() {
        let mut roles = RoleSet::new();
        roles.add_role(ROLE_USER);
        assert!(roles.remove_role(ROLE_USER));
        assert!(roles.is_empty());
        assert!(roles.effective_roles().contains(&Role::baseline()));
    }

    #[test]
    fn add_and_remove_accept_the_same_argument_types() {
        let mut roles = RoleSet::new();
        roles.add_role("ROLE_A");
        roles.add_role(String::from("ROLE_B"));
        roles.add_role(Role::new("ROLE_C"));

        assert!(roles.remove_role("ROLE_A"));
        assert!(roles.remove_role(String::from("ROLE_B")));
        assert!(roles.remove_role(Role::new("ROLE_C")));
        assert!(roles.is_empty());
    }

    #[test]
    fn removing_absent_role_is_a_noop() {
        let mut roles: RoleSet = [Role::new("ROLE_EDITOR")].into_iter().collect();
        let before = roles.clone();
        assert!(!roles.remove_role("ROLE_ADMIN"));
        assert_eq!(roles, before);
    }

    #[test]
    fn serializes_as_json_array_without_baseline() {
        let mut roles = RoleSet::new();
        roles.add_role("ROLE_ADMIN");
        roles.add_role("ROLE_ADMIN");
        assert_eq!(serde_json::to_value(&roles).unwrap(), serde_json::json!(["ROLE_ADMIN"]));
    }

    #[test]
    fn deserializing_collapses_duplicates() {
        let roles: RoleSet =
            serde_json::from_value(serde_json::json!(["ROLE_A", "ROLE_B", "ROLE_A"])).unwrap();
        assert_eq!(roles.stored().count(), 2);
    }

    fn role_name() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(ROLE_USER.to_string()),
            "ROLE_[A-Z]{1,12}",
            ".{0,16}",
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: an added role is always effective.
        #[test]
        fn added_role_is_effective(seed in prop::collection::vec(role_name(), 0..8), r in role_name()) {
            let mut roles: RoleSet = seed.into_iter().map(Role::from).collect();
            roles.add_role(r.clone());
            prop_assert!(roles.effective_roles().contains(&Role::from(r)));
        }

        /// Property: add then remove leaves a non-baseline role absent.
        #[test]
        fn add_then_remove_drops_role(seed in prop::collection::vec(role_name(), 0..8), r in role_name()) {
            prop_assume!(r != ROLE_USER);
            let mut roles: RoleSet = seed.into_iter().map(Role::from).collect();
            roles.add_role(r.clone());
            roles.remove_role(r.clone());
            prop_assert!(!roles.effective_roles().contains(&Role::from(r)));
        }

        /// Property: the baseline survives any sequence of removals.
        #[test]
        fn baseline_always_effective(
            seed in prop::collection::vec(role_name(), 0..8),
            removals in prop::collection::vec(role_name(), 0..8),
        ) {
            let mut roles: RoleSet = seed.into_iter().map(Role::from).collect();
            for r in removals {
                roles.remove_role(r);
            }
            prop_assert!(roles.effective_roles().contains(&Role::baseline()));
        }

        /// Property: granting twice equals granting once.
        #[test]
        fn add_is_idempotent(seed in prop::collection::vec(role_name(), 0..8), r in role_name()) {
            let mut once: RoleSet = seed.into_iter().map(Role::from).collect();
            let mut twice = once.clone();
            once.add_role(r.clone());
            twice.add_role(r.clone());
            twice.add_role(r);
            prop_assert_eq!(once.effective_roles(), twice.effective_roles());
        }
    }
}
