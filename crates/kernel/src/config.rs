//! Kernel configuration from environment variables.

use roster_observability::LogFormat;

use crate::{Environment, KernelError};

pub const APP_ENV: &str = "APP_ENV";
pub const APP_DEBUG: &str = "APP_DEBUG";
pub const LOG_FORMAT: &str = "LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelConfig {
    pub environment: Environment,
    /// Defaults to on everywhere except prod. When off, the kernel drops the
    /// debug-logging component regardless of the registry.
    pub debug: bool,
    pub log_format: LogFormat,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Dev,
            debug: true,
            log_format: LogFormat::Pretty,
        }
    }
}

impl KernelConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, KernelError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup` (injectable for tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, KernelError> {
        let environment = match lookup(APP_ENV) {
            Some(value) => value.parse()?,
            None => {
                tracing::warn!("{APP_ENV} not set; defaulting to dev");
                Environment::Dev
            }
        };

        let debug = match lookup(APP_DEBUG) {
            Some(value) => parse_flag(APP_DEBUG, &value)?,
            None => !environment.is_prod(),
        };

        let log_format = match lookup(LOG_FORMAT).as_deref().map(str::trim) {
            Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => {
                return Err(KernelError::InvalidFlag {
                    name: LOG_FORMAT,
                    value: other.to_string(),
                });
            }
            None if environment.is_prod() => LogFormat::Json,
            None => LogFormat::Pretty,
        };

        Ok(Self {
            environment,
            debug,
            log_format,
        })
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, KernelError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(KernelError::InvalidFlag {
            name,
            value: value.to_string(),
        }),
    }
}
