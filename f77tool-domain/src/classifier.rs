use crate::ToolError;
use f77tool_types::{SuffixPartition, SuffixSet};

/// Always compiled without preprocessing.
pub const PLAIN_BASELINE: [&str; 2] = [".f", ".for"];
/// Always preprocessed.
pub const PREPROCESSED_BASELINE: [&str; 2] = [".fpp", ".FPP"];
/// Placement depends on filesystem case sensitivity.
pub const CONDITIONAL_SUFFIX: &str = ".F";
/// The pair whose distinctness decides where [`CONDITIONAL_SUFFIX`] goes.
pub const PROBE_PAIR: (&str, &str) = (".f", ".F");

/// Splits the Fortran-77 suffixes into plain and preprocessed groups.
///
/// On a case-sensitive filesystem `.F` conventionally marks sources that need
/// the preprocessor. On a case-insensitive one `.F` and `.f` name the same
/// files, so `.F` must stay plain or plain sources would become unreachable.
///
/// Fails with [`ToolError::OverlappingSuffixes`] if the groups share a suffix.
pub fn classify(case_sensitive: bool) -> Result<SuffixPartition, ToolError> {
    let mut plain: SuffixSet = PLAIN_BASELINE.into_iter().collect();
    let mut preprocessed: SuffixSet = PREPROCESSED_BASELINE.into_iter().collect();

    if case_sensitive {
        preprocessed.insert(CONDITIONAL_SUFFIX);
    } else {
        plain.insert(CONDITIONAL_SUFFIX);
    }

    Ok(SuffixPartition::new(plain, preprocessed)?)
}
