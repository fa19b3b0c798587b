use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KernelError {
    #[error("unknown environment: {0}")]
    UnknownEnvironment(String),

    #[error("invalid value for {name}: {value}")]
    InvalidFlag { name: &'static str, value: String },

    #[error("component not enabled: {0}")]
    ComponentDisabled(&'static str),
}
