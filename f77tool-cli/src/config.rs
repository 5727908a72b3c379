//! Configuration file loading for f77tool.
//!
//! Discovers and loads `f77tool.toml` from the project root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use f77tool_core::settings::{CaseMode, GenerateSettings};
use f77tool_types::{ConflictPolicy, VarValue};
use fs_err as fs;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "f77tool.toml";

/// Top-level configuration from f77tool.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct F77toolConfig {
    /// Compiler discovery.
    pub compiler: CompilerConfig,

    /// Filesystem behaviour.
    pub filesystem: FilesystemConfig,

    /// Object builder behaviour.
    pub builders: BuildersConfig,

    /// Construction variables set before the tool runs.
    pub vars: BTreeMap<String, VarValue>,
}

/// Compiler section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Candidate executable names, probed in order.
    pub candidates: Vec<String>,

    /// Name used when no candidate is found.
    pub fallback: Option<String>,

    /// Directories searched instead of `PATH`.
    pub search_path: Vec<Utf8PathBuf>,
}

/// Filesystem section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilesystemConfig {
    pub case_sensitive: CaseSetting,
}

/// `case_sensitive = "auto" | "probe" | true | false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CaseSetting {
    Fixed(bool),
    Mode(CaseWord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseWord {
    Auto,
    Probe,
}

impl Default for CaseSetting {
    fn default() -> Self {
        CaseSetting::Mode(CaseWord::Auto)
    }
}

impl From<CaseSetting> for CaseMode {
    fn from(setting: CaseSetting) -> Self {
        match setting {
            CaseSetting::Fixed(true) => CaseMode::Sensitive,
            CaseSetting::Fixed(false) => CaseMode::Insensitive,
            CaseSetting::Mode(CaseWord::Auto) => CaseMode::Auto,
            CaseSetting::Mode(CaseWord::Probe) => CaseMode::Probe,
        }
    }
}

/// Builders section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildersConfig {
    /// What to do when a suffix is already bound to a different action.
    pub on_conflict: ConflictPolicy,
}

/// Discover the f77tool.toml config file.
///
/// Returns `None` if no config file is found in `project_root`.
pub fn discover_config(project_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = project_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse an f77tool.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<F77toolConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<F77toolConfig> {
    let config: F77toolConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the project root, or return default if not found.
pub fn load_or_default(project_root: &Utf8Path) -> anyhow::Result<F77toolConfig> {
    match discover_config(project_root) {
        Some(path) => load_config(&path),
        None => Ok(F77toolConfig::default()),
    }
}

/// The command-line side of a merge. `None` / empty means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub compilers: Vec<String>,
    pub search_path: Vec<Utf8PathBuf>,
    pub case_mode: Option<CaseMode>,
    pub on_conflict: Option<ConflictPolicy>,
    pub vars: BTreeMap<String, VarValue>,
    pub expand: bool,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: F77toolConfig,
}

impl ConfigMerger {
    /// Create a new merger from a loaded config.
    pub fn new(config: F77toolConfig) -> Self {
        Self { config }
    }

    /// Produce pipeline settings.
    ///
    /// CLI compiler and search path lists replace the config file lists.
    /// CLI `--set` variables are layered over `[vars]`.
    pub fn merge(self, project_root: Utf8PathBuf, cli: CliOverrides) -> GenerateSettings {
        let defaults = GenerateSettings::default();

        let compilers = if !cli.compilers.is_empty() {
            cli.compilers
        } else if !self.config.compiler.candidates.is_empty() {
            self.config.compiler.candidates
        } else {
            defaults.compilers
        };

        let search_path = if cli.search_path.is_empty() {
            self.config.compiler.search_path
        } else {
            cli.search_path
        };

        let mut preset = self.config.vars;
        preset.extend(cli.vars);

        GenerateSettings {
            project_root,
            compilers,
            fallback: self
                .config
                .compiler
                .fallback
                .filter(|f| !f.trim().is_empty())
                .unwrap_or(defaults.fallback),
            search_path,
            case_mode: cli
                .case_mode
                .unwrap_or_else(|| self.config.filesystem.case_sensitive.into()),
            on_conflict: cli.on_conflict.unwrap_or(self.config.builders.on_conflict),
            preset,
            expand: cli.expand,
        }
    }
}

/// Parse `--set` entries from NAME=VALUE strings.
///
/// Values are split on whitespace into a flag list; an empty value gives an
/// empty list.
pub fn parse_cli_params(params: &[String]) -> anyhow::Result<BTreeMap<String, VarValue>> {
    let mut out = BTreeMap::new();
    for entry in params {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("invalid variable '{}': expected NAME=VALUE", entry))?;
        let key = key.trim();
        if key.is_empty() {
            anyhow::bail!("invalid variable '{}': missing name", entry);
        }
        out.insert(key.to_string(), VarValue::clvar(value));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let contents = r#"
[compiler]
candidates = ["gfortran", "g77", "f77"]
fallback = "g77"
search_path = ["/opt/fortran/bin"]

[filesystem]
case_sensitive = "probe"

[builders]
on_conflict = "overwrite"

[vars]
F77FLAGS = ["-O2", "-g"]
CPPFLAGS = "-DNDEBUG"
"#;

        let config = parse_config(contents).unwrap();
        assert_eq!(config.compiler.candidates, vec!["gfortran", "g77", "f77"]);
        assert_eq!(config.compiler.fallback.as_deref(), Some("g77"));
        assert_eq!(
            config.compiler.search_path,
            vec![Utf8PathBuf::from("/opt/fortran/bin")]
        );
        assert_eq!(
            config.filesystem.case_sensitive,
            CaseSetting::Mode(CaseWord::Probe)
        );
        assert_eq!(config.builders.on_conflict, ConflictPolicy::Overwrite);
        assert_eq!(
            config.vars.get("F77FLAGS"),
            Some(&VarValue::List(vec!["-O2".into(), "-g".into()]))
        );
        assert_eq!(config.vars.get("CPPFLAGS"), Some(&VarValue::from("-DNDEBUG")));
    }

    #[test]
    fn test_parse_boolean_case_setting() {
        let config = parse_config("[filesystem]\ncase_sensitive = false\n").unwrap();
        assert_eq!(config.filesystem.case_sensitive, CaseSetting::Fixed(false));
        assert_eq!(
            CaseMode::from(config.filesystem.case_sensitive),
            CaseMode::Insensitive
        );
    }

    #[test]
    fn test_parse_rejects_unknown_case_word() {
        assert!(parse_config("[filesystem]\ncase_sensitive = \"sometimes\"\n").is_err());
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert!(config.compiler.candidates.is_empty());
        assert!(config.vars.is_empty());
        assert_eq!(config.builders.on_conflict, ConflictPolicy::Reject);
        assert_eq!(
            CaseMode::from(config.filesystem.case_sensitive),
            CaseMode::Auto
        );
    }

    #[test]
    fn test_merge_defaults() {
        let settings =
            ConfigMerger::new(F77toolConfig::default()).merge(".".into(), CliOverrides::default());
        assert_eq!(settings.compilers, vec!["f77"]);
        assert_eq!(settings.fallback, "f77");
        assert_eq!(settings.case_mode, CaseMode::Auto);
        assert!(settings.preset.is_empty());
        assert!(!settings.expand);
    }

    #[test]
    fn test_merge_cli_overrides_config() {
        let config = parse_config(
            r#"
[compiler]
candidates = ["g77"]

[filesystem]
case_sensitive = true

[vars]
F77FLAGS = "-O2"
F77PATH = "include"
"#,
        )
        .unwrap();

        let cli = CliOverrides {
            compilers: vec!["gfortran".into()],
            case_mode: Some(CaseMode::Insensitive),
            vars: parse_cli_params(&["F77FLAGS=-O3 -g".to_string()]).unwrap(),
            ..Default::default()
        };
        let settings = ConfigMerger::new(config).merge("proj".into(), cli);

        assert_eq!(settings.project_root, Utf8PathBuf::from("proj"));
        assert_eq!(settings.compilers, vec!["gfortran"]);
        assert_eq!(settings.case_mode, CaseMode::Insensitive);
        assert_eq!(
            settings.preset.get("F77FLAGS"),
            Some(&VarValue::clvar("-O3 -g"))
        );
        assert_eq!(settings.preset.get("F77PATH"), Some(&VarValue::from("include")));
    }

    #[test]
    fn test_merge_config_used_when_cli_silent() {
        let config = parse_config(
            r#"
[compiler]
candidates = ["g77"]
fallback = "g77"

[builders]
on_conflict = "overwrite"
"#,
        )
        .unwrap();
        let settings = ConfigMerger::new(config).merge(".".into(), CliOverrides::default());
        assert_eq!(settings.compilers, vec!["g77"]);
        assert_eq!(settings.fallback, "g77");
        assert_eq!(settings.on_conflict, ConflictPolicy::Overwrite);
    }

    #[test]
    fn test_merge_ignores_blank_fallback() {
        let config = parse_config("[compiler]\nfallback = \"  \"\n").unwrap();
        let settings = ConfigMerger::new(config).merge(".".into(), CliOverrides::default());
        assert_eq!(settings.fallback, "f77");
    }

    #[test]
    fn test_parse_cli_params_valid() {
        let params = vec!["F77FLAGS=-O2 -g".to_string(), "CPPFLAGS=".to_string()];
        let parsed = parse_cli_params(&params).expect("parse params");
        assert_eq!(parsed.get("F77FLAGS"), Some(&VarValue::clvar("-O2 -g")));
        assert_eq!(parsed.get("CPPFLAGS"), Some(&VarValue::empty_list()));
    }

    #[test]
    fn test_parse_cli_params_missing_name() {
        let err = parse_cli_params(&["=-O2".to_string()]).expect_err("missing name");
        assert!(err.to_string().contains("missing name"));
    }

    #[test]
    fn test_parse_cli_params_missing_equals() {
        let err = parse_cli_params(&["F77FLAGS".to_string()]).expect_err("no equals");
        assert!(err.to_string().contains("expected NAME=VALUE"));
    }

    #[test]
    fn test_discover_config_some_and_none() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        assert!(discover_config(&root).is_none());

        std::fs::write(root.join(CONFIG_FILE_NAME), "").expect("write config");
        assert!(discover_config(&root).is_some());
    }

    #[test]
    fn test_load_or_default_returns_default_when_missing() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let cfg = load_or_default(&root).expect("load default");
        assert!(cfg.compiler.candidates.is_empty());
        assert!(cfg.vars.is_empty());
    }
}
