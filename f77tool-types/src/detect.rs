use serde::{Deserialize, Serialize};

/// Result of probing the search path for a compiler executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "name", rename_all = "snake_case")]
pub enum Detection {
    Found(String),
    NotFound,
}

impl Detection {
    pub fn is_found(&self) -> bool {
        matches!(self, Detection::Found(_))
    }

    pub fn found(&self) -> Option<&str> {
        match self {
            Detection::Found(name) => Some(name),
            Detection::NotFound => None,
        }
    }

    /// The detected name, or `fallback` when nothing was found.
    pub fn resolve_or(&self, fallback: &str) -> String {
        self.found().unwrap_or(fallback).to_string()
    }
}
