//! Capabilities the tool needs from the surrounding build environment.
//!
//! f77tool-domain never owns an environment; the orchestrator hands one in.
//! Default implementations live in `f77tool-core`.

use crate::ToolError;
use f77tool_types::{ActionKind, Detection, ObjectKind, Suffix, VarValue};

/// A builder's suffix → action table.
pub trait BuilderRegistry {
    fn object_kind(&self) -> ObjectKind;

    /// Binds `action` to `suffix`. Conflict handling is the registry's call.
    fn register(&mut self, suffix: &Suffix, action: ActionKind) -> Result<(), ToolError>;

    fn lookup(&self, suffix: &Suffix) -> Option<ActionKind>;
}

/// Hands out the environment's static and shared object builders.
pub trait ObjectBuilderFactory {
    fn object_builders(
        &mut self,
    ) -> Result<(&mut dyn BuilderRegistry, &mut dyn BuilderRegistry), ToolError>;
}

/// Searches for an executable among candidate names.
pub trait ExecutableDetector {
    fn detect(&self, candidates: &[String]) -> Detection;
}

/// Whether the filesystem distinguishes two suffixes that differ only in case.
pub trait CaseSensitivity {
    fn case_sensitive(&self, a: &str, b: &str) -> bool;
}

impl<T: ExecutableDetector + ?Sized> ExecutableDetector for Box<T> {
    fn detect(&self, candidates: &[String]) -> Detection {
        (**self).detect(candidates)
    }
}

impl<T: CaseSensitivity + ?Sized> CaseSensitivity for Box<T> {
    fn case_sensitive(&self, a: &str, b: &str) -> bool {
        (**self).case_sensitive(a, b)
    }
}

/// Key-value construction variable store.
pub trait ConstructionEnv {
    fn get(&self, name: &str) -> Option<&VarValue>;

    fn set(&mut self, name: &str, value: VarValue);

    /// Sets `name` only if it has no value yet. Returns true if it wrote.
    fn set_default(&mut self, name: &str, value: VarValue) -> bool {
        if self.get(name).is_some() {
            return false;
        }
        self.set(name, value);
        true
    }
}

/// Everything `generate` and `exists` touch, as one bound.
pub trait ToolEnvironment:
    ConstructionEnv + ObjectBuilderFactory + CaseSensitivity + ExecutableDetector
{
}

impl<T> ToolEnvironment for T where
    T: ConstructionEnv + ObjectBuilderFactory + CaseSensitivity + ExecutableDetector + ?Sized
{
}
