//! Generator adapters.

mod nest_cli;
mod recording;

pub use nest_cli::NestCliGenerator;
pub use recording::{Invocation, RecordingGenerator};
