//! Version matching abstraction for the supported kinds

use crate::version::error::FilterError;
use crate::version::matchers::{LatestMatcher, RegexMatcher, SemverMatcher};
use crate::version::types::{CandidateOrder, FoundVersion, VersionKind};

/// Trait for kind-specific version selection
///
/// Each kind has different selection rules:
/// - latest: newest candidate, or the newest one equal to a literal
/// - regex: newest candidate matching an expression
/// - semver: highest-precedence candidate satisfying a constraint
pub trait VersionMatcher: Send + Sync {
    /// Returns the version kind this matcher handles
    fn kind(&self) -> VersionKind;

    /// Select one version from the candidates
    ///
    /// `order` tells which end of `candidates` holds the most recently
    /// published version.
    fn search(
        &self,
        candidates: &[String],
        order: CandidateOrder,
    ) -> Result<FoundVersion, FilterError>;
}

/// The matcher selected for a filter, one variant per [`VersionKind`]
#[derive(Debug)]
pub enum Strategy<'a> {
    Latest(LatestMatcher<'a>),
    Regex(RegexMatcher<'a>),
    Semver(SemverMatcher<'a>),
}

impl<'a> Strategy<'a> {
    pub fn new(kind: VersionKind, pattern: &'a str, strict: bool) -> Self {
        match kind {
            VersionKind::Latest => Strategy::Latest(LatestMatcher::new(pattern)),
            VersionKind::Regex => Strategy::Regex(RegexMatcher::new(pattern)),
            VersionKind::Semver => Strategy::Semver(SemverMatcher::new(pattern, strict)),
        }
    }
}

impl VersionMatcher for Strategy<'_> {
    fn kind(&self) -> VersionKind {
        match self {
            Strategy::Latest(m) => m.kind(),
            Strategy::Regex(m) => m.kind(),
            Strategy::Semver(m) => m.kind(),
        }
    }

    fn search(
        &self,
        candidates: &[String],
        order: CandidateOrder,
    ) -> Result<FoundVersion, FilterError> {
        match self {
            Strategy::Latest(m) => m.search(candidates, order),
            Strategy::Regex(m) => m.search(candidates, order),
            Strategy::Semver(m) => m.search(candidates, order),
        }
    }
}
