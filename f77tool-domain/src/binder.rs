use crate::ToolError;
use crate::ports::BuilderRegistry;
use f77tool_types::{ActionKind, SuffixSet};
use tracing::debug;

/// Registers `action` for every suffix in `suffixes`, in order.
///
/// Stops at the first registry error. Conflicts are the registry's to detect;
/// nothing is checked here.
pub fn bind(
    builder: &mut dyn BuilderRegistry,
    suffixes: &SuffixSet,
    action: ActionKind,
) -> Result<(), ToolError> {
    let kind = builder.object_kind();
    for suffix in suffixes {
        builder.register(suffix, action)?;
        debug!(builder = %kind, suffix = suffix.as_str(), action = action.name(), "bound suffix");
    }
    Ok(())
}
