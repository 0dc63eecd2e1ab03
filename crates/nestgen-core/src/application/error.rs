//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not in name or
//! layout rules. Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while executing a generation plan.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The scaffolding command could not be started.
    #[error("Could not run '{command}': {reason}")]
    GeneratorUnavailable { command: String, reason: String },

    /// The scaffolding command ran and exited unsuccessfully.
    #[error("'{command}' failed ({})", exit_description(.status))]
    GeneratorFailed {
        command: String,
        status: Option<i32>,
    },

    /// The scaffolding command succeeded but its output is not where the
    /// module layout expects it.
    #[error("'{command}' did not create {path}")]
    GeneratorOutputMissing { command: String, path: PathBuf },

    /// Adapter state could not be locked.
    #[error("Adapter state is poisoned")]
    LockPoisoned,
}

fn exit_description(status: &Option<i32>) -> String {
    match *status {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Run the command from the project root".into(),
            ],
            Self::GeneratorUnavailable { command, .. } => vec![
                format!("'{command}' could not be started"),
                "Install the Nest CLI: npm i -D @nestjs/cli".into(),
                "Or point generator.program at another command in the config".into(),
                "Use --skip-generator to only write the templated files".into(),
            ],
            Self::GeneratorFailed { command, .. } => vec![
                format!("'{command}' exited with an error"),
                "Check the generator output above for details".into(),
                "Make sure you are inside a Nest project (nest-cli.json)".into(),
            ],
            Self::GeneratorOutputMissing { .. } => vec![
                "The Nest CLI writes under sourceRoot from nest-cli.json".into(),
                "Set --src-dir (or generator.src_dir) to the same directory".into(),
                "Or use --skip-generator to only write the templated files".into(),
            ],
            Self::LockPoisoned => vec!["This is a bug, please report it".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
            Self::GeneratorUnavailable { .. }
            | Self::GeneratorFailed { .. }
            | Self::GeneratorOutputMissing { .. } => {
                ErrorCategory::External
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_failed_message_includes_status() {
        let err = ApplicationError::GeneratorFailed {
            command: "npx nest g module user".into(),
            status: Some(1),
        };
        assert_eq!(err.to_string(), "'npx nest g module user' failed (exit status 1)");
    }

    #[test]
    fn generator_killed_by_signal() {
        let err = ApplicationError::GeneratorFailed {
            command: "npx nest g module user".into(),
            status: None,
        };
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn misplaced_output_points_at_source_root() {
        let err = ApplicationError::GeneratorOutputMissing {
            command: "npx nest g module order".into(),
            path: PathBuf::from("lib/order/order.module.ts"),
        };
        assert_eq!(
            err.to_string(),
            "'npx nest g module order' did not create lib/order/order.module.ts"
        );
        assert!(err.suggestions().iter().any(|s| s.contains("sourceRoot")));
        assert_eq!(err.category(), ErrorCategory::External);
    }

    #[test]
    fn unavailable_generator_suggests_skip() {
        let err = ApplicationError::GeneratorUnavailable {
            command: "npx nest".into(),
            reason: "not found".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("--skip-generator")));
        assert_eq!(err.category(), ErrorCategory::External);
    }
}
