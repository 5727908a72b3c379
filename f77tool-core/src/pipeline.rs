//! Generate and exists pipelines, extracted from the CLI.
//!
//! The host filesystem and `PATH` are reached only through the adapters the
//! caller hands in, so the same entry points serve the binary and tests.

use crate::adapters::{
    FixedCaseSensitivity, PlatformCaseSensitivity, ProbeCaseSensitivity, WhichDetector,
};
use crate::env::Environment;
use crate::settings::{CaseMode, GenerateSettings};
use anyhow::Context;
use f77tool_domain::ports::{CaseSensitivity, ConstructionEnv, ExecutableDetector};
use f77tool_domain::{F77Tool, PROBE_PAIR, classify};
use f77tool_types::vars::PRODUCED;
use f77tool_types::{Bindings, SuffixPartition, ToolReport};
use tracing::{debug, info};

/// Outcome of `run_generate`.
#[derive(Debug)]
pub struct GenerateRun {
    pub report: ToolReport,
    /// The configured environment, for callers that keep building with it.
    pub env: Environment,
}

fn case_adapter(settings: &GenerateSettings) -> Box<dyn CaseSensitivity> {
    match settings.case_mode {
        CaseMode::Auto => Box::new(PlatformCaseSensitivity),
        CaseMode::Probe => Box::new(ProbeCaseSensitivity::new(settings.project_root.clone())),
        CaseMode::Sensitive => Box::new(FixedCaseSensitivity(true)),
        CaseMode::Insensitive => Box::new(FixedCaseSensitivity(false)),
    }
}

fn tool(settings: &GenerateSettings) -> F77Tool {
    F77Tool::new()
        .with_compilers(settings.compilers.iter().cloned())
        .with_fallback(settings.fallback.clone())
}

/// The compiler detector implied by `settings.search_path`.
pub fn default_detector(settings: &GenerateSettings) -> anyhow::Result<WhichDetector> {
    WhichDetector::with_search_path(settings.search_path.iter().map(|p| p.as_std_path()))
}

/// A fresh environment with presets applied and no tool configuration yet.
pub fn build_environment(
    settings: &GenerateSettings,
    detector: Box<dyn ExecutableDetector>,
) -> Environment {
    let mut env = Environment::new(case_adapter(settings), detector)
        .with_conflict_policy(settings.on_conflict);
    for (name, value) in &settings.preset {
        env.set(name, value.clone());
    }
    env
}

/// Run the generate pipeline against a fresh environment.
///
/// Failures from the tool itself keep their [`ToolError`](f77tool_domain::ToolError)
/// and can be recovered with `downcast_ref`.
pub fn run_generate(
    settings: &GenerateSettings,
    detector: Box<dyn ExecutableDetector>,
) -> anyhow::Result<GenerateRun> {
    let mut env = build_environment(settings, detector);
    let outcome = tool(settings)
        .generate(&mut env)
        .context("configure environment for Fortran 77")?;

    let mut report = ToolReport::new(
        outcome.case_sensitive,
        outcome.detection,
        outcome.program,
        outcome.partition,
    );
    report.bindings = Bindings {
        static_obj: env.static_builder().actions().clone(),
        shared_obj: env.shared_builder().actions().clone(),
    };
    report.vars = env.vars().clone();

    if settings.expand {
        for name in PRODUCED {
            if let Some(value) = env.expand(name) {
                report.expanded.insert(name.to_string(), value);
            }
        }
    }

    info!(
        program = report.program.as_str(),
        case_sensitive = report.case_sensitive,
        static_bindings = report.bindings.static_obj.len(),
        shared_bindings = report.bindings.shared_obj.len(),
        "environment configured"
    );

    Ok(GenerateRun { report, env })
}

/// Whether any configured compiler candidate can be found.
pub fn run_exists(settings: &GenerateSettings, detector: &dyn ExecutableDetector) -> bool {
    let found = tool(settings).exists(detector);
    debug!(found, "exists");
    found
}

/// The suffix partition the configured filesystem would get, without
/// touching an environment.
pub fn run_suffixes(settings: &GenerateSettings) -> anyhow::Result<(bool, SuffixPartition)> {
    let (a, b) = PROBE_PAIR;
    let case_sensitive = case_adapter(settings).case_sensitive(a, b);
    let partition = classify(case_sensitive).context("classify f77 suffixes")?;
    Ok((case_sensitive, partition))
}
