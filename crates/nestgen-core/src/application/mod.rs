//! Application layer for nestgen.
//!
//! This layer contains:
//! - **Services**: use case orchestration (`ModuleService`)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! Naming, layout and template rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{GenerateRequest, ModuleService};

pub use ports::{Filesystem, Generator};

pub use error::ApplicationError;
