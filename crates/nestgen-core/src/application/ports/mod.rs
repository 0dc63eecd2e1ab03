//! Application ports (traits) for external dependencies.
//!
//! Ports define what the application needs from the outside world.
//! Adapters in `nestgen-adapters` implement these.
//!
//! - `Filesystem`: directory creation, reads, writes, moves
//! - `Generator`: the framework's own scaffolding command

pub mod output;

pub use output::{Filesystem, Generator};

#[cfg(test)]
pub use output::{MockFilesystem, MockGenerator};
