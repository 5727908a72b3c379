//! Default filesystem- and PATH-backed port implementations.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use f77tool_domain::ports::{CaseSensitivity, ExecutableDetector};
use f77tool_types::Detection;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Host convention: Windows folds case, everything else keeps it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformCaseSensitivity;

impl CaseSensitivity for PlatformCaseSensitivity {
    fn case_sensitive(&self, a: &str, b: &str) -> bool {
        if cfg!(windows) {
            a.to_lowercase() != b.to_lowercase()
        } else {
            a != b
        }
    }
}

/// A fixed answer, for tests and for callers that already know.
#[derive(Debug, Clone, Copy)]
pub struct FixedCaseSensitivity(pub bool);

impl CaseSensitivity for FixedCaseSensitivity {
    fn case_sensitive(&self, a: &str, b: &str) -> bool {
        a != b && self.0
    }
}

/// Asks the filesystem under `dir` directly.
///
/// Creates a scratch file ending in the first suffix and checks whether the
/// name ending in the second suffix resolves to it. Falls back to
/// [`PlatformCaseSensitivity`] when the directory is not writable.
#[derive(Debug, Clone)]
pub struct ProbeCaseSensitivity {
    dir: Utf8PathBuf,
}

impl ProbeCaseSensitivity {
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    fn probe(&self, a: &str, b: &str) -> anyhow::Result<bool> {
        let scratch = tempfile::Builder::new()
            .prefix(".f77tool-probe-")
            .suffix(a)
            .tempfile_in(&self.dir)
            .with_context(|| format!("create probe file in {}", self.dir))?;

        let path = Utf8Path::from_path(scratch.path())
            .with_context(|| format!("non-UTF-8 probe path under {}", self.dir))?;
        let stem = path
            .as_str()
            .strip_suffix(a)
            .with_context(|| format!("probe file {path} lost its suffix"))?;
        let twin = Utf8PathBuf::from(format!("{stem}{b}"));

        let folds = twin.exists();
        debug!(dir = %self.dir, %twin, folds, "case sensitivity probe");
        Ok(!folds)
    }
}

impl CaseSensitivity for ProbeCaseSensitivity {
    fn case_sensitive(&self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }
        match self.probe(a, b) {
            Ok(sensitive) => sensitive,
            Err(e) => {
                warn!("{e:#}; using platform convention");
                PlatformCaseSensitivity.case_sensitive(a, b)
            }
        }
    }
}

/// Looks candidates up on `PATH` (or an explicit search path) with `which`.
#[derive(Debug, Clone, Default)]
pub struct WhichDetector {
    search_path: Option<OsString>,
}

impl WhichDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches only `dirs`, in order, instead of `PATH`.
    pub fn with_search_path<I, P>(dirs: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let dirs: Vec<PathBuf> = dirs.into_iter().map(Into::into).collect();
        if dirs.is_empty() {
            return Ok(Self::new());
        }
        let joined = std::env::join_paths(&dirs).context("join compiler search path")?;
        Ok(Self {
            search_path: Some(joined),
        })
    }

    fn locate(&self, name: &str) -> Option<PathBuf> {
        match &self.search_path {
            None => which::which(name).ok(),
            Some(paths) => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                which::which_in(name, Some(paths), cwd).ok()
            }
        }
    }
}

impl ExecutableDetector for WhichDetector {
    fn detect(&self, candidates: &[String]) -> Detection {
        for name in candidates {
            match self.locate(name) {
                Some(path) => {
                    debug!(candidate = name.as_str(), path = %path.display(), "found compiler");
                    return Detection::Found(name.clone());
                }
                None => debug!(candidate = name.as_str(), "not found"),
            }
        }
        Detection::NotFound
    }
}

/// A detector over a fixed set of "installed" names.
#[derive(Debug, Clone, Default)]
pub struct StaticDetector {
    available: Vec<String>,
}

impl StaticDetector {
    pub fn new<I, S>(available: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available: available.into_iter().map(Into::into).collect(),
        }
    }

    /// Nothing is installed.
    pub fn none() -> Self {
        Self::default()
    }
}

impl ExecutableDetector for StaticDetector {
    fn detect(&self, candidates: &[String]) -> Detection {
        candidates
            .iter()
            .find(|c| self.available.contains(c))
            .map(|c| Detection::Found(c.clone()))
            .unwrap_or(Detection::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn fixed_answer_only_applies_to_distinct_suffixes() {
        assert!(FixedCaseSensitivity(true).case_sensitive(".f", ".F"));
        assert!(!FixedCaseSensitivity(false).case_sensitive(".f", ".F"));
        assert!(!FixedCaseSensitivity(true).case_sensitive(".f", ".f"));
    }

    #[test]
    fn platform_convention() {
        let sensitive = PlatformCaseSensitivity.case_sensitive(".f", ".F");
        assert_eq!(sensitive, !cfg!(windows));
        assert!(!PlatformCaseSensitivity.case_sensitive(".f", ".f"));
    }

    #[test]
    fn probe_leaves_no_files_behind() {
        let dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let probe = ProbeCaseSensitivity::new(root);

        // Whatever the host filesystem says, the answer is stable.
        let first = probe.case_sensitive(".f", ".F");
        let second = probe.case_sensitive(".f", ".F");
        assert_eq!(first, second);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn probe_of_missing_dir_falls_back_to_platform() {
        let dir = TempDir::new().unwrap();
        let missing = Utf8PathBuf::from_path_buf(dir.path().join("gone")).unwrap();
        let probe = ProbeCaseSensitivity::new(missing);
        assert_eq!(
            probe.case_sensitive(".f", ".F"),
            PlatformCaseSensitivity.case_sensitive(".f", ".F")
        );
    }

    #[test]
    fn static_detector_takes_first_available_candidate() {
        let detector = StaticDetector::new(["gfortran", "g77"]);
        assert_eq!(
            detector.detect(&names(&["f77", "g77", "gfortran"])),
            Detection::Found("g77".into())
        );
        assert_eq!(StaticDetector::none().detect(&names(&["f77"])), Detection::NotFound);
        assert_eq!(detector.detect(&[]), Detection::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn which_detector_honours_search_path() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let exe = dir.path().join("myf77");
        std::fs::write(&exe, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();

        let detector = WhichDetector::with_search_path([dir.path()]).unwrap();
        assert_eq!(
            detector.detect(&names(&["f77-not-here", "myf77"])),
            Detection::Found("myf77".into())
        );
        assert_eq!(
            detector.detect(&names(&["f77-not-here"])),
            Detection::NotFound
        );
    }
}
