use crate::ports::ConstructionEnv;
use f77tool_types::VarValue;
use f77tool_types::vars::{self, reference};
use tracing::debug;

/// Construction variables written by the f77 tool.
///
/// Everything is computed up front, including templates no builder may ever
/// use, so callers can inspect the full set before applying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableTemplateSet {
    pub program: String,
    pub shared_program: String,
    pub flags: VarValue,
    pub shared_flags: VarValue,
    pub com: String,
    pub pp_com: String,
    pub shared_com: String,
    pub shared_pp_com: String,
}

impl VariableTemplateSet {
    pub fn new(program: impl Into<String>) -> Self {
        let shared_program = reference(vars::F77);
        Self {
            com: compile_line(vars::F77, vars::F77FLAGS, false),
            pp_com: compile_line(vars::F77, vars::F77FLAGS, true),
            shared_com: compile_line(vars::SHF77, vars::SHF77FLAGS, false),
            shared_pp_com: compile_line(vars::SHF77, vars::SHF77FLAGS, true),
            program: program.into(),
            shared_program,
            flags: VarValue::empty_list(),
            // A reference, not a copy: it tracks F77FLAGS until someone sets it.
            shared_flags: VarValue::List(vec![reference(vars::F77FLAGS)]),
        }
    }

    /// `(name, value)` pairs in write order.
    pub fn entries(&self) -> Vec<(&'static str, VarValue)> {
        vec![
            (vars::F77, VarValue::from(self.program.as_str())),
            (vars::SHF77, VarValue::from(self.shared_program.as_str())),
            (vars::F77FLAGS, self.flags.clone()),
            (vars::SHF77FLAGS, self.shared_flags.clone()),
            (vars::F77COM, VarValue::from(self.com.as_str())),
            (vars::F77PPCOM, VarValue::from(self.pp_com.as_str())),
            (vars::SHF77COM, VarValue::from(self.shared_com.as_str())),
            (vars::SHF77PPCOM, VarValue::from(self.shared_pp_com.as_str())),
        ]
    }

    /// Writes the set into `env`.
    ///
    /// Flag variables are only filled in when absent; program names and
    /// command templates are always overwritten.
    pub fn apply<E: ConstructionEnv + ?Sized>(&self, env: &mut E) {
        for (name, value) in self.entries() {
            if is_user_flag(name) {
                let wrote = env.set_default(name, value);
                debug!(var = name, wrote, "default construction variable");
            } else {
                debug!(var = name, value = %value, "set construction variable");
                env.set(name, value);
            }
        }
    }
}

fn is_user_flag(name: &str) -> bool {
    name == vars::F77FLAGS || name == vars::SHF77FLAGS
}

fn compile_line(program: &str, flags: &str, preprocess: bool) -> String {
    let mut parts = vec![reference(program), reference(flags)];
    if preprocess {
        parts.push(reference(vars::CPPFLAGS));
        parts.push(reference(vars::CPPDEFFLAGS));
    }
    parts.push(reference(vars::F77_INCFLAGS));
    parts.push(format!(
        "-c -o {} {}",
        reference(vars::TARGET),
        reference(vars::SOURCES)
    ));
    parts.join(" ")
}
