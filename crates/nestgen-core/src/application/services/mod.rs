//! Application services - orchestrate use cases.

pub mod module_service;

pub use module_service::{GenerateRequest, ModuleService};
