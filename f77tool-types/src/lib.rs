//! Shared DTOs for the f77 tool integration.
//!
//! # Design constraints
//! - The report types are intended to be serialized (`f77tool generate --format json`).
//! - Be conservative with breaking changes to variable names; build scripts key off them.
//! - Prefer adding optional fields over changing semantics.

pub mod action;
pub mod detect;
pub mod report;
pub mod suffix;
pub mod vars;

pub use action::{ActionKind, ConflictPolicy, ObjectKind, SourceKind};
pub use detect::Detection;
pub use report::{Bindings, ToolReport};
pub use suffix::{PartitionError, Suffix, SuffixPartition, SuffixSet};
pub use vars::VarValue;

/// Schema identifiers.
pub mod schema {
    pub const F77TOOL_REPORT_V1: &str = "f77tool.report.v1";
}
