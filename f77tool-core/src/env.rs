//! In-memory construction environment and builder tables.

use crate::subst;
use f77tool_domain::ToolError;
use f77tool_domain::ports::{
    BuilderRegistry, CaseSensitivity, ConstructionEnv, ExecutableDetector, ObjectBuilderFactory,
};
use f77tool_types::{ActionKind, ConflictPolicy, Detection, ObjectKind, Suffix, VarValue};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// Suffix → action table for one object builder.
#[derive(Debug, Clone)]
pub struct BuilderTable {
    kind: ObjectKind,
    policy: ConflictPolicy,
    actions: BTreeMap<Suffix, ActionKind>,
}

impl BuilderTable {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            policy: ConflictPolicy::default(),
            actions: BTreeMap::new(),
        }
    }

    pub fn with_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    pub fn actions(&self) -> &BTreeMap<Suffix, ActionKind> {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl BuilderRegistry for BuilderTable {
    fn object_kind(&self) -> ObjectKind {
        self.kind
    }

    fn register(&mut self, suffix: &Suffix, action: ActionKind) -> Result<(), ToolError> {
        match self.actions.get(suffix).copied() {
            None => {
                self.actions.insert(suffix.clone(), action);
                Ok(())
            }
            Some(existing) if existing == action => Ok(()),
            Some(existing) => match self.policy {
                ConflictPolicy::Reject => Err(ToolError::ConflictingBinding {
                    builder: self.kind,
                    suffix: suffix.clone(),
                    existing,
                    requested: action,
                }),
                ConflictPolicy::Overwrite => {
                    warn!(
                        builder = %self.kind,
                        suffix = suffix.as_str(),
                        %existing,
                        requested = %action,
                        "overwriting suffix binding"
                    );
                    self.actions.insert(suffix.clone(), action);
                    Ok(())
                }
            },
        }
    }

    fn lookup(&self, suffix: &Suffix) -> Option<ActionKind> {
        self.actions.get(suffix).copied()
    }
}

/// A build environment: construction variables plus the static and shared
/// object builders, with the filesystem and compiler probes it was built with.
pub struct Environment {
    vars: BTreeMap<String, VarValue>,
    static_obj: BuilderTable,
    shared_obj: BuilderTable,
    case: Box<dyn CaseSensitivity>,
    detector: Box<dyn ExecutableDetector>,
}

impl Environment {
    pub fn new<C, D>(case: C, detector: D) -> Self
    where
        C: CaseSensitivity + 'static,
        D: ExecutableDetector + 'static,
    {
        Self {
            vars: BTreeMap::new(),
            static_obj: BuilderTable::new(ObjectKind::Static),
            shared_obj: BuilderTable::new(ObjectKind::Shared),
            case: Box::new(case),
            detector: Box::new(detector),
        }
    }

    /// Sets the re-binding policy of both object builders.
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.static_obj.policy = policy;
        self.shared_obj.policy = policy;
        self
    }

    pub fn static_builder(&self) -> &BuilderTable {
        &self.static_obj
    }

    pub fn shared_builder(&self) -> &BuilderTable {
        &self.shared_obj
    }

    pub fn static_builder_mut(&mut self) -> &mut BuilderTable {
        &mut self.static_obj
    }

    pub fn shared_builder_mut(&mut self) -> &mut BuilderTable {
        &mut self.shared_obj
    }

    pub fn builder(&self, kind: ObjectKind) -> &BuilderTable {
        match kind {
            ObjectKind::Static => &self.static_obj,
            ObjectKind::Shared => &self.shared_obj,
        }
    }

    pub fn vars(&self) -> &BTreeMap<String, VarValue> {
        &self.vars
    }

    /// The fully substituted value of `name`.
    pub fn expand(&self, name: &str) -> Option<String> {
        self.vars
            .get(name)
            .map(|value| subst::expand_value(value, &self.vars))
    }

    /// The substituted value of `name` split into command-line arguments.
    pub fn expand_list(&self, name: &str) -> Option<Vec<String>> {
        self.expand(name)
            .map(|s| s.split_whitespace().map(str::to_string).collect())
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("vars", &self.vars)
            .field("static_obj", &self.static_obj)
            .field("shared_obj", &self.shared_obj)
            .finish_non_exhaustive()
    }
}

impl ConstructionEnv for Environment {
    fn get(&self, name: &str) -> Option<&VarValue> {
        self.vars.get(name)
    }

    fn set(&mut self, name: &str, value: VarValue) {
        debug!(var = name, "set");
        self.vars.insert(name.to_string(), value);
    }
}

impl ObjectBuilderFactory for Environment {
    fn object_builders(
        &mut self,
    ) -> Result<(&mut dyn BuilderRegistry, &mut dyn BuilderRegistry), ToolError> {
        let static_obj: &mut dyn BuilderRegistry = &mut self.static_obj;
        let shared_obj: &mut dyn BuilderRegistry = &mut self.shared_obj;
        Ok((static_obj, shared_obj))
    }
}

impl CaseSensitivity for Environment {
    fn case_sensitive(&self, a: &str, b: &str) -> bool {
        self.case.case_sensitive(a, b)
    }
}

impl ExecutableDetector for Environment {
    fn detect(&self, candidates: &[String]) -> Detection {
        self.detector.detect(candidates)
    }
}
