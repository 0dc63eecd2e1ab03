//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `nestgen-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::Schematic;
use crate::error::NestgenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `nestgen_adapters::filesystem::LocalFilesystem` (production)
/// - `nestgen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> NestgenResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> NestgenResult<()>;

    /// Read a UTF-8 file.
    fn read_file(&self, path: &Path) -> NestgenResult<String>;

    /// Move a file.
    fn rename(&self, from: &Path, to: &Path) -> NestgenResult<()>;

    /// Delete a file.
    fn remove_file(&self, path: &Path) -> NestgenResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for the external scaffolding command (`nest g ...`).
///
/// Implemented by:
/// - `nestgen_adapters::generator::NestCliGenerator` (production)
/// - `nestgen_adapters::generator::RecordingGenerator` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Generator: Send + Sync {
    /// Run the schematic for `name` with `project_root` as working directory.
    ///
    /// Blocks until the command exits; a non-zero exit is an error.
    fn generate(&self, schematic: Schematic, name: &str, project_root: &Path) -> NestgenResult<()>;

    /// Human-readable command line, for logs and dry runs.
    fn describe(&self, schematic: Schematic, name: &str) -> String;
}
