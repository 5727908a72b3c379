//! Construction variable names and values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compiler program name.
pub const F77: &str = "F77";
/// Program name used for shared objects.
pub const SHF77: &str = "SHF77";
/// Base compile flags.
pub const F77FLAGS: &str = "F77FLAGS";
/// Compile flags for shared objects.
pub const SHF77FLAGS: &str = "SHF77FLAGS";
pub const F77COM: &str = "F77COM";
pub const F77PPCOM: &str = "F77PPCOM";
pub const SHF77COM: &str = "SHF77COM";
pub const SHF77PPCOM: &str = "SHF77PPCOM";

// Owned by other tools or by the execution engine; only referenced here.
pub const F77_INCFLAGS: &str = "_F77INCFLAGS";
pub const CPPFLAGS: &str = "CPPFLAGS";
pub const CPPDEFFLAGS: &str = "_CPPDEFFLAGS";
pub const TARGET: &str = "TARGET";
pub const SOURCES: &str = "SOURCES";

/// Every variable this tool writes, in the order they are written.
pub const PRODUCED: [&str; 8] = [
    F77, SHF77, F77FLAGS, SHF77FLAGS, F77COM, F77PPCOM, SHF77COM, SHF77PPCOM,
];

/// `$NAME` reference to a construction variable.
pub fn reference(name: &str) -> String {
    format!("${name}")
}

/// A construction variable value.
///
/// `List` is a command-line list: entries are joined with spaces on
/// substitution and may themselves be `$NAME` references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    Str(String),
    List(Vec<String>),
}

impl VarValue {
    /// Builds a command-line list by splitting on whitespace.
    pub fn clvar(s: &str) -> Self {
        VarValue::List(s.split_whitespace().map(str::to_string).collect())
    }

    pub fn empty_list() -> Self {
        VarValue::List(Vec::new())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            VarValue::Str(s) => Some(s),
            VarValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            VarValue::Str(_) => None,
            VarValue::List(items) => Some(items),
        }
    }
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarValue::Str(s) => f.write_str(s),
            VarValue::List(items) => f.write_str(&items.join(" ")),
        }
    }
}

impl From<&str> for VarValue {
    fn from(s: &str) -> Self {
        VarValue::Str(s.to_string())
    }
}

impl From<String> for VarValue {
    fn from(s: String) -> Self {
        VarValue::Str(s)
    }
}

impl From<Vec<String>> for VarValue {
    fn from(items: Vec<String>) -> Self {
        VarValue::List(items)
    }
}
