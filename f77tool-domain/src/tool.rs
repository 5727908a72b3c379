use crate::ToolError;
use crate::binder::bind;
use crate::classifier::{PROBE_PAIR, classify};
use crate::ports::{ExecutableDetector, ToolEnvironment};
use crate::templates::VariableTemplateSet;
use f77tool_types::{ActionKind, Detection, ObjectKind, SourceKind, SuffixPartition};
use tracing::{debug, warn};

/// Compiler names probed by default.
pub const DEFAULT_COMPILERS: [&str; 1] = ["f77"];
/// Program name used when no compiler is found.
pub const DEFAULT_FALLBACK: &str = "f77";

/// What `generate` decided, for callers that want to report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    pub case_sensitive: bool,
    pub partition: SuffixPartition,
    pub detection: Detection,
    pub program: String,
    pub templates: VariableTemplateSet,
}

/// The Fortran-77 tool integration.
#[derive(Debug, Clone)]
pub struct F77Tool {
    compilers: Vec<String>,
    fallback: String,
}

impl Default for F77Tool {
    fn default() -> Self {
        Self::new()
    }
}

impl F77Tool {
    pub fn new() -> Self {
        Self {
            compilers: DEFAULT_COMPILERS.iter().map(|s| s.to_string()).collect(),
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }

    /// Replaces the probed compiler names. An empty list keeps the defaults.
    pub fn with_compilers<I, S>(mut self, compilers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let compilers: Vec<String> = compilers.into_iter().map(Into::into).collect();
        if !compilers.is_empty() {
            self.compilers = compilers;
        }
        self
    }

    /// Replaces the program name used when no candidate is found. A blank
    /// name keeps the default.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        let fallback = fallback.into();
        if !fallback.trim().is_empty() {
            self.fallback = fallback;
        }
        self
    }

    pub fn compilers(&self) -> &[String] {
        &self.compilers
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Adds builder bindings and construction variables for f77 to `env`.
    pub fn generate<E>(&self, env: &mut E) -> Result<GenerateOutcome, ToolError>
    where
        E: ToolEnvironment + ?Sized,
    {
        {
            let (static_obj, shared_obj) = env.object_builders()?;
            check_kind(static_obj.object_kind(), ObjectKind::Static)?;
            check_kind(shared_obj.object_kind(), ObjectKind::Shared)?;
        }

        let case_sensitive = env.case_sensitive(PROBE_PAIR.0, PROBE_PAIR.1);
        let partition = classify(case_sensitive)?;
        debug!(
            case_sensitive,
            plain = ?partition.plain().as_strs(),
            preprocessed = ?partition.preprocessed().as_strs(),
            "classified f77 suffixes"
        );

        // Re-borrowed: the case query above needs `env` shared.
        {
            let (static_obj, shared_obj) = env.object_builders()?;
            for source in [SourceKind::Plain, SourceKind::Preprocessed] {
                let suffixes = partition.set_for(source);
                bind(
                    &mut *static_obj,
                    suffixes,
                    ActionKind::new(source, ObjectKind::Static),
                )?;
                bind(
                    &mut *shared_obj,
                    suffixes,
                    ActionKind::new(source, ObjectKind::Shared),
                )?;
            }
        }

        let detection = self.detect(&*env);
        let program = detection.resolve_or(&self.fallback);
        if !detection.is_found() {
            warn!(
                candidates = ?self.compilers,
                fallback = %self.fallback,
                "no Fortran-77 compiler found; compile actions will fail until one is installed"
            );
        }

        let templates = VariableTemplateSet::new(program.clone());
        templates.apply(env);

        Ok(GenerateOutcome {
            case_sensitive,
            partition,
            detection,
            program,
            templates,
        })
    }

    /// True if a compiler is found among the candidate names. Read-only.
    pub fn exists<E>(&self, env: &E) -> bool
    where
        E: ExecutableDetector + ?Sized,
    {
        self.detect(env).is_found()
    }

    fn detect<E>(&self, env: &E) -> Detection
    where
        E: ExecutableDetector + ?Sized,
    {
        let detection = env.detect(&self.compilers);
        debug!(?detection, "probed for Fortran-77 compiler");
        detection
    }
}

fn check_kind(got: ObjectKind, want: ObjectKind) -> Result<(), ToolError> {
    if got == want {
        Ok(())
    } else {
        Err(ToolError::misconfigured(format!(
            "expected the {want} object builder, got the {got} one"
        )))
    }
}
