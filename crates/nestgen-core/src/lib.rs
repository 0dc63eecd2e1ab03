//! nestgen core - ports and adapters implementation
//!
//! Domain and application layers for the nestgen module scaffolder.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           nestgen-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     Application Service (ModuleService) │
//! │        plan → execute → report          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Application Ports (Filesystem,        │
//! │   Generator)                            │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   nestgen-adapters (Infrastructure)     │
//! │   LocalFilesystem, NestCliGenerator     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nestgen_core::prelude::*;
//!
//! let name = ModuleName::parse("userProfile")?;
//! let service = ModuleService::new(filesystem, generator);
//! let report = service.generate(&GenerateRequest::new(name))?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateRequest, ModuleService,
        ports::{Filesystem, Generator},
    };
    pub use crate::domain::{
        Artifact, GenerationPlan, GenerationReport, ModuleLayout, ModuleName, Outcome,
        Schematic, SkipReason, Step, TemplateVariant,
    };
    pub use crate::error::{NestgenError, NestgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
