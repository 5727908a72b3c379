//! Clap-free settings for the generate and exists pipelines.

use camino::Utf8PathBuf;
use f77tool_domain::{DEFAULT_COMPILERS, DEFAULT_FALLBACK};
use f77tool_types::{ConflictPolicy, VarValue};
use std::collections::BTreeMap;

/// How the environment decides whether `.f` and `.F` are distinct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseMode {
    /// Host platform convention.
    #[default]
    Auto,
    /// Create a scratch file under the project root and look.
    Probe,
    Sensitive,
    Insensitive,
}

/// Settings for the generate pipeline.
#[derive(Debug, Clone)]
pub struct GenerateSettings {
    pub project_root: Utf8PathBuf,

    // Compiler discovery
    pub compilers: Vec<String>,
    pub fallback: String,
    pub search_path: Vec<Utf8PathBuf>,

    // Environment
    pub case_mode: CaseMode,
    pub on_conflict: ConflictPolicy,
    /// Variables set before the tool runs.
    pub preset: BTreeMap<String, VarValue>,

    // Output
    pub expand: bool,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            project_root: Utf8PathBuf::from("."),
            compilers: DEFAULT_COMPILERS.iter().map(|s| s.to_string()).collect(),
            fallback: DEFAULT_FALLBACK.to_string(),
            search_path: Vec::new(),
            case_mode: CaseMode::default(),
            on_conflict: ConflictPolicy::default(),
            preset: BTreeMap::new(),
            expand: false,
        }
    }
}
