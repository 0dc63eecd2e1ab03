// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for nestgen.
//!
//! Pure logic only: name derivation, module layout, the fixed template set,
//! source patching and the generation plan. All file-system and process
//! access goes through the ports in `crate::application::ports`.
//!
//! - **No I/O**: nothing here touches the disk or spawns processes
//! - **No external crates**: std, `thiserror`, `serde` derives
//! - **Computed once**: a [`ModuleName`] owns every derived name form
pub mod error;
pub mod layout;
pub mod module_patch;
pub mod naming;
pub mod plan;
pub mod templates;

pub use error::{DomainError, ErrorCategory};
pub use layout::{ModuleLayout, Schematic, TemplateVariant};
pub use module_patch::{patch_module_source, patch_spec_source};
pub use naming::ModuleName;
pub use plan::{
    GenerationPlan, GenerationReport, Outcome, PlannedStep, SkipReason, Step, StepReport,
};
pub use templates::{Artifact, RenderContext};
