//! Domain logic: teach a build environment how to compile Fortran-77.
//!
//! This crate owns *what* gets registered: which suffixes map to which
//! compile action, and which construction variables describe the command
//! lines. It does not own the environment, the builders or the compiler
//! probe; those are reached through the traits in [`ports`].

mod binder;
mod classifier;
mod error;
pub mod ports;
mod templates;
mod tool;

pub use binder::bind;
pub use classifier::{
    CONDITIONAL_SUFFIX, PLAIN_BASELINE, PREPROCESSED_BASELINE, PROBE_PAIR, classify,
};
pub use error::ToolError;
pub use ports::{
    BuilderRegistry, CaseSensitivity, ConstructionEnv, ExecutableDetector, ObjectBuilderFactory,
    ToolEnvironment,
};
pub use templates::VariableTemplateSet;
pub use tool::{DEFAULT_COMPILERS, DEFAULT_FALLBACK, F77Tool, GenerateOutcome};
