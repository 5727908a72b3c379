use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{ActionKind, Detection, Suffix, SuffixPartition, VarValue};

/// Snapshot of what `generate` did to an environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolReport {
    pub schema: String,
    pub tool: String,
    pub case_sensitive: bool,
    pub detection: Detection,
    pub program: String,
    pub suffixes: SuffixPartition,
    pub bindings: Bindings,

    #[serde(default)]
    pub vars: BTreeMap<String, VarValue>,

    /// Fully substituted variable values, when requested.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expanded: BTreeMap<String, String>,
}

impl ToolReport {
    pub fn new(
        case_sensitive: bool,
        detection: Detection,
        program: String,
        suffixes: SuffixPartition,
    ) -> Self {
        Self {
            schema: crate::schema::F77TOOL_REPORT_V1.to_string(),
            tool: "f77".to_string(),
            case_sensitive,
            detection,
            program,
            suffixes,
            bindings: Bindings::default(),
            vars: BTreeMap::new(),
            expanded: BTreeMap::new(),
        }
    }
}

/// Suffix → action tables of the two object builders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    #[serde(rename = "static", default)]
    pub static_obj: BTreeMap<Suffix, ActionKind>,

    #[serde(rename = "shared", default)]
    pub shared_obj: BTreeMap<Suffix, ActionKind>,
}
