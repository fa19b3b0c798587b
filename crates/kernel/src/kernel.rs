use std::sync::Arc;

use roster_auth::{Authenticator, InMemoryUserStore, PasswordVerifier, UserStore};

use crate::registry::names;
use crate::{ComponentRegistry, KernelConfig, KernelError};

/// A booted application: configuration plus the components it resolved.
#[derive(Debug)]
pub struct Kernel {
    config: KernelConfig,
    components: Vec<&'static str>,
    user_store: Option<Arc<dyn UserStore>>,
}

impl Kernel {
    /// Initialise logging, resolve components for the configured environment
    /// and wire the ones that need construction.
    pub fn boot(config: KernelConfig, registry: &ComponentRegistry) -> Self {
        roster_observability::tracing::init(config.log_format);

        // `debug = false` switches debug logging off even where the registry enables it.
        let components: Vec<&'static str> = registry
            .enabled_for(config.environment)
            .into_iter()
            .filter(|name| config.debug || *name != names::DEBUG_LOGGING)
            .collect();

        let user_store: Option<Arc<dyn UserStore>> = components
            .contains(&names::USER_STORE)
            .then(|| Arc::new(InMemoryUserStore::new()) as Arc<dyn UserStore>);

        tracing::info!(
            environment = %config.environment,
            debug = config.debug,
            components = ?components,
            "kernel booted"
        );
        if components.contains(&names::DEBUG_LOGGING) {
            tracing::debug!(config = ?config, "debug logging component active");
        }

        Self {
            config,
            components,
            user_store,
        }
    }

    /// Boot from process environment with the standard registry.
    pub fn boot_from_env() -> Result<Self, KernelError> {
        let config = KernelConfig::from_env()?;
        Ok(Self::boot(config, &ComponentRegistry::standard()))
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn components(&self) -> &[&'static str] {
        &self.components
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.components.iter().any(|c| *c == name)
    }

    pub fn user_store(&self) -> Result<Arc<dyn UserStore>, KernelError> {
        self.user_store
            .clone()
            .ok_or(KernelError::ComponentDisabled(names::USER_STORE))
    }

    /// Authenticator over the kernel's user store.
    pub fn authenticator<V: PasswordVerifier>(
        &self,
        verifier: V,
    ) -> Result<Authenticator<V>, KernelError> {
        Ok(Authenticator::new(self.user_store()?, verifier))
    }
}
