//! `roster-kernel` — application bootstrap.
//!
//! Resolves the runtime environment, decides which components are active for
//! it, initialises logging and wires the user store.

pub mod config;
pub mod environment;
pub mod error;
pub mod kernel;
pub mod registry;

pub use config::KernelConfig;
pub use environment::Environment;
pub use error::KernelError;
pub use kernel::Kernel;
pub use registry::{Component, ComponentRegistry};
