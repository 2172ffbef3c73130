//! Common types for version selection

use serde::{Deserialize, Serialize};

use crate::version::error::FilterError;

/// Kind of version matching requested by a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionKind {
    /// Newest candidate, or the newest candidate equal to a literal
    Latest,
    /// Newest candidate matching a regular expression
    Regex,
    /// Highest-precedence candidate satisfying a semver constraint
    Semver,
}

impl VersionKind {
    /// Returns the string representation of the version kind
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionKind::Latest => "latest",
            VersionKind::Regex => "regex",
            VersionKind::Semver => "semver",
        }
    }

    /// Pattern used when the filter does not declare one
    pub fn default_pattern(&self) -> &'static str {
        match self {
            VersionKind::Latest => "latest",
            VersionKind::Regex => ".*",
            VersionKind::Semver => "*",
        }
    }
}

impl std::fmt::Display for VersionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VersionKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(VersionKind::Latest),
            "regex" => Ok(VersionKind::Regex),
            "semver" => Ok(VersionKind::Semver),
            other => Err(FilterError::UnsupportedKind(other.to_string())),
        }
    }
}

/// Order in which a candidate list is supplied
///
/// The latest and regex strategies return the most recently published match,
/// so they need to know which end of the list is the newest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CandidateOrder {
    /// Oldest version first, newest last (the usual registry listing order)
    #[default]
    OldestFirst,
    /// Newest version first
    NewestFirst,
}

impl CandidateOrder {
    /// Iterate candidates from the newest to the oldest
    pub fn newest_first<'a>(
        &self,
        candidates: &'a [String],
    ) -> Box<dyn Iterator<Item = &'a String> + 'a> {
        match self {
            CandidateOrder::OldestFirst => Box::new(candidates.iter().rev()),
            CandidateOrder::NewestFirst => Box::new(candidates.iter()),
        }
    }

    /// Returns the newest candidate, if any
    pub fn newest<'a>(&self, candidates: &'a [String]) -> Option<&'a String> {
        match self {
            CandidateOrder::OldestFirst => candidates.last(),
            CandidateOrder::NewestFirst => candidates.first(),
        }
    }
}

/// Version selected by a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundVersion {
    /// The candidate exactly as it appeared in the input list
    pub original_version: String,
    /// The value reported to the caller; normalized for semver matches
    pub parsed_version: String,
}

impl FoundVersion {
    /// A match whose reported value is the candidate itself
    pub fn verbatim(version: &str) -> Self {
        Self {
            original_version: version.to_string(),
            parsed_version: version.to_string(),
        }
    }
}
