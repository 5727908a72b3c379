use serde::{Deserialize, Serialize};
use std::fmt;

/// A file suffix including its leading dot, e.g. `.f` or `.FPP`.
///
/// Comparison is exact: `.f` and `.F` are different suffixes even on
/// filesystems that fold case. Folding is the classifier's decision, not ours.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Suffix(String);

impl Suffix {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Suffix {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<&str> for Suffix {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// An insertion-ordered set of suffixes.
///
/// Order matters for logging and for the order in which bindings are
/// registered, so this is a deduplicated `Vec` rather than a `BTreeSet`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuffixSet(Vec<Suffix>);

impl SuffixSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `suffix`; returns false if it was already present.
    pub fn insert(&mut self, suffix: impl Into<Suffix>) -> bool {
        let suffix = suffix.into();
        if self.contains(&suffix) {
            return false;
        }
        self.0.push(suffix);
        true
    }

    pub fn contains(&self, suffix: &Suffix) -> bool {
        self.0.iter().any(|s| s == suffix)
    }

    pub fn contains_str(&self, suffix: &str) -> bool {
        self.0.iter().any(|s| s.as_str() == suffix)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Suffix> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Suffix strings in insertion order.
    pub fn as_strs(&self) -> Vec<&str> {
        self.0.iter().map(Suffix::as_str).collect()
    }
}

impl<'a> IntoIterator for &'a SuffixSet {
    type Item = &'a Suffix;
    type IntoIter = std::slice::Iter<'a, Suffix>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<S: Into<Suffix>> FromIterator<S> for SuffixSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SuffixSet::new();
        for s in iter {
            set.insert(s);
        }
        set
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartitionError {
    #[error("suffix '{suffix}' is claimed as both plain and preprocessed")]
    Overlap { suffix: Suffix },
}

/// The plain / preprocessed split of Fortran-77 suffixes for one environment.
///
/// The two sets are disjoint; [`SuffixPartition::new`] is the only way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuffixPartition {
    plain: SuffixSet,
    preprocessed: SuffixSet,
}

impl SuffixPartition {
    pub fn new(plain: SuffixSet, preprocessed: SuffixSet) -> Result<Self, PartitionError> {
        if let Some(suffix) = plain.iter().find(|s| preprocessed.contains(s)) {
            return Err(PartitionError::Overlap {
                suffix: suffix.clone(),
            });
        }
        Ok(Self {
            plain,
            preprocessed,
        })
    }

    pub fn plain(&self) -> &SuffixSet {
        &self.plain
    }

    pub fn preprocessed(&self) -> &SuffixSet {
        &self.preprocessed
    }

    pub fn set_for(&self, kind: crate::SourceKind) -> &SuffixSet {
        match kind {
            crate::SourceKind::Plain => &self.plain,
            crate::SourceKind::Preprocessed => &self.preprocessed,
        }
    }

    /// Which group a suffix belongs to, if any.
    pub fn kind_of(&self, suffix: &Suffix) -> Option<crate::SourceKind> {
        if self.plain.contains(suffix) {
            Some(crate::SourceKind::Plain)
        } else if self.preprocessed.contains(suffix) {
            Some(crate::SourceKind::Preprocessed)
        } else {
            None
        }
    }
}

impl<'de> Deserialize<'de> for SuffixPartition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            plain: SuffixSet,
            preprocessed: SuffixSet,
        }

        let raw = Raw::deserialize(deserializer)?;
        SuffixPartition::new(raw.plain, raw.preprocessed).map_err(serde::de::Error::custom)
    }
}
