// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports and retries can keep a copy)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("module name cannot be empty")]
    EmptyModuleName,

    #[error("invalid module name '{name}': {reason}")]
    InvalidModuleName { name: String, reason: String },

    #[error("source directory must be relative to the project: {path}")]
    AbsoluteSourceDir { path: String },

    #[error("unknown template variant '{0}'")]
    UnknownVariant(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyModuleName => vec![
                "Pass the module name as the first argument".into(),
                "Example: nestgen generate userProfile".into(),
            ],
            Self::InvalidModuleName { name, reason } => vec![
                format!("'{name}' cannot be used: {reason}"),
                "Use letters, digits, '-', '_' or spaces, starting with a letter".into(),
                "Examples: product, userProfile, order-item".into(),
            ],
            Self::AbsoluteSourceDir { path } => vec![
                format!("'{path}' is absolute"),
                "Use a path relative to the project directory, e.g. 'src'".into(),
            ],
            Self::UnknownVariant(_) => vec!["Supported variants: repository, classic".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyModuleName
            | Self::InvalidModuleName { .. }
            | Self::AbsoluteSourceDir { .. }
            | Self::UnknownVariant(_) => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
