use serde::{Deserialize, Serialize};
use std::fmt;

use crate::vars;

/// Which object builder an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Static,
    Shared,
}

impl ObjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Static => "static",
            ObjectKind::Shared => "shared",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a source needs a preprocessing pass before compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Plain,
    Preprocessed,
}

/// The four predefined Fortran-77 compile actions.
///
/// Each action runs exactly one command template; the template itself lives
/// in the construction environment under [`ActionKind::command_var`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    #[serde(rename = "F77Action")]
    F77,
    #[serde(rename = "ShF77Action")]
    ShF77,
    #[serde(rename = "F77PPAction")]
    F77Pp,
    #[serde(rename = "ShF77PPAction")]
    ShF77Pp,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::F77,
        ActionKind::ShF77,
        ActionKind::F77Pp,
        ActionKind::ShF77Pp,
    ];

    pub fn new(source: SourceKind, object: ObjectKind) -> Self {
        match (source, object) {
            (SourceKind::Plain, ObjectKind::Static) => ActionKind::F77,
            (SourceKind::Plain, ObjectKind::Shared) => ActionKind::ShF77,
            (SourceKind::Preprocessed, ObjectKind::Static) => ActionKind::F77Pp,
            (SourceKind::Preprocessed, ObjectKind::Shared) => ActionKind::ShF77Pp,
        }
    }

    pub fn source(self) -> SourceKind {
        match self {
            ActionKind::F77 | ActionKind::ShF77 => SourceKind::Plain,
            ActionKind::F77Pp | ActionKind::ShF77Pp => SourceKind::Preprocessed,
        }
    }

    pub fn object(self) -> ObjectKind {
        match self {
            ActionKind::F77 | ActionKind::F77Pp => ObjectKind::Static,
            ActionKind::ShF77 | ActionKind::ShF77Pp => ObjectKind::Shared,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ActionKind::F77 => "F77Action",
            ActionKind::ShF77 => "ShF77Action",
            ActionKind::F77Pp => "F77PPAction",
            ActionKind::ShF77Pp => "ShF77PPAction",
        }
    }

    /// Name of the construction variable holding this action's command line.
    pub fn command_var(self) -> &'static str {
        match self {
            ActionKind::F77 => vars::F77COM,
            ActionKind::ShF77 => vars::SHF77COM,
            ActionKind::F77Pp => vars::F77PPCOM,
            ActionKind::ShF77Pp => vars::SHF77PPCOM,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a builder table does when a suffix is bound a second time.
///
/// Re-binding a suffix to the *same* action is always accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Refuse a different action for an already-bound suffix.
    #[default]
    Reject,
    /// Replace the previous binding.
    Overwrite,
}
