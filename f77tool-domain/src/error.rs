//! Error types for f77tool-domain.
//!
//! A missing compiler is deliberately absent here: it is a
//! [`Detection::NotFound`](f77tool_types::Detection) value, resolved to the
//! fallback program name, and only fails later when a compile action runs.

use f77tool_types::{ActionKind, ObjectKind, PartitionError, Suffix};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// Another tool already bound this suffix to a different action.
    /// Raised by the builder registry and passed through untouched.
    #[error(
        "{builder} object builder: suffix '{suffix}' already bound to {existing}, refusing {requested}"
    )]
    ConflictingBinding {
        builder: ObjectKind,
        suffix: Suffix,
        existing: ActionKind,
        requested: ActionKind,
    },

    /// A collaborator the tool relies on is absent or malformed.
    #[error("misconfigured environment: {message}")]
    MisconfiguredEnvironment { message: String },

    /// The plain and preprocessed suffix groups overlap.
    #[error(transparent)]
    OverlappingSuffixes(#[from] PartitionError),
}

impl ToolError {
    pub fn misconfigured(message: impl Into<String>) -> Self {
        ToolError::MisconfiguredEnvironment {
            message: message.into(),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ToolError::ConflictingBinding { .. })
    }
}
