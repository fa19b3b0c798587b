//! Per-environment component enablement.
//!
//! Each component carries explicit on/off flags per environment plus an
//! optional `all` fallback. A component is active when its flag for the
//! current environment is on, or when it has no flag for that environment and
//! `all` is on.

use std::collections::HashMap;

use crate::Environment;

/// Well-known component names.
pub mod names {
    pub const USER_STORE: &str = "user_store";
    pub const DEBUG_LOGGING: &str = "debug_logging";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: &'static str,
    per_env: HashMap<Environment, bool>,
    all: Option<bool>,
}

impl Component {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            per_env: HashMap::new(),
            all: None,
        }
    }

    /// Enabled in every environment unless overridden.
    pub fn all(mut self) -> Self {
        self.all = Some(true);
        self
    }

    pub fn env(mut self, env: Environment, enabled: bool) -> Self {
        self.per_env.insert(env, enabled);
        self
    }

    pub fn enabled_for(&self, env: Environment) -> bool {
        self.per_env
            .get(&env)
            .copied()
            .or(self.all)
            .unwrap_or(false)
    }
}

/// Ordered set of components known to the kernel.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: Vec<Component>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Components every deployment ships with.
    pub fn standard() -> Self {
        Self::new()
            .register(Component::new(names::USER_STORE).all())
            .register(
                Component::new(names::DEBUG_LOGGING)
                    .env(Environment::Dev, true)
                    .env(Environment::Test, true),
            )
    }

    /// Register a component; a later registration with the same name replaces
    /// the earlier one in place.
    pub fn register(mut self, component: Component) -> Self {
        match self.components.iter_mut().find(|c| c.name == component.name) {
            Some(existing) => *existing = component,
            None => self.components.push(component),
        }
        self
    }

    /// Names of components active in `env`, in registration order.
    pub fn enabled_for(&self, env: Environment) -> Vec<&'static str> {
        self.components
            .iter()
            .filter(|c| c.enabled_for(env))
            .map(|c| c.name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_flag_overrides_all() {
        let component = Component::new("profiler").all().env(Environment::Prod, false);
        assert!(component.enabled_for(Environment::Dev));
        assert!(component.enabled_for(Environment::Test));
        assert!(!component.enabled_for(Environment::Prod));
    }

    #[test]
    fn no_flags_means_disabled() {
        assert!(!Component::new("idle").enabled_for(Environment::Dev));
    }

    #[test]
    fn enabled_components_keep_registration_order() {
        let registry = ComponentRegistry::new()
            .register(Component::new("b").all())
            .register(Component::new("a").env(Environment::Test, true))
            .register(Component::new("c").all());

        assert_eq!(registry.enabled_for(Environment::Test), vec!["b", "a", "c"]);
        assert_eq!(registry.enabled_for(Environment::Prod), vec!["b", "c"]);
    }

    #[test]
    fn re_registering_replaces_in_place() {
        let registry = ComponentRegistry::new()
            .register(Component::new("a").all())
            .register(Component::new("b").all())
            .register(Component::new("a"));

        assert_eq!(registry.enabled_for(Environment::Dev), vec!["b"]);
    }

    #[test]
    fn standard_registry_drops_debug_logging_in_prod() {
        let registry = ComponentRegistry::standard();
        assert_eq!(
            registry.enabled_for(Environment::Dev),
            vec![names::USER_STORE, names::DEBUG_LOGGING]
        );
        assert_eq!(registry.enabled_for(Environment::Prod), vec![names::USER_STORE]);
    }
}
