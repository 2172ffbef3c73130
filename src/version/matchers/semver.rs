//! Semver version matcher
//!
//! Picks the highest-precedence candidate satisfying a constraint, whatever
//! its position in the list. Candidates that are not semantic versions are
//! skipped. Pre-releases are only eligible in strict mode or when the
//! constraint names one.

use std::cmp::Ordering;

use semver::Version;
use tracing::debug;

use crate::version::error::FilterError;
use crate::version::matcher::VersionMatcher;
use crate::version::semver::{Constraint, cmp_precedence, parse_version};
use crate::version::types::{CandidateOrder, FoundVersion, VersionKind};

#[derive(Debug, Clone, Copy)]
pub struct SemverMatcher<'a> {
    constraint: &'a str,
    strict: bool,
}

impl<'a> SemverMatcher<'a> {
    pub fn new(constraint: &'a str, strict: bool) -> Self {
        Self { constraint, strict }
    }

    fn parse_constraint(&self) -> Result<Constraint, FilterError> {
        Constraint::parse(self.constraint).map_err(|reason| FilterError::InvalidConstraint {
            constraint: self.constraint.to_string(),
            reason,
        })
    }
}

impl VersionMatcher for SemverMatcher<'_> {
    fn kind(&self) -> VersionKind {
        VersionKind::Semver
    }

    fn search(
        &self,
        candidates: &[String],
        order: CandidateOrder,
    ) -> Result<FoundVersion, FilterError> {
        let constraint = self.parse_constraint()?;

        // Walk newest first so that equal precedence keeps the newest entry
        let mut best: Option<(Version, &String)> = None;
        for candidate in order.newest_first(candidates) {
            let Some(version) = parse_version(candidate) else {
                debug!("Skipping {:?}: not a semantic version", candidate);
                continue;
            };
            if !constraint.matches(&version, self.strict) {
                continue;
            }
            if best
                .as_ref()
                .is_none_or(|(b, _)| cmp_precedence(&version, b) == Ordering::Greater)
            {
                best = Some((version, candidate));
            }
        }

        best.map(|(version, original)| FoundVersion {
            original_version: original.clone(),
            parsed_version: version.to_string(),
        })
        .ok_or_else(|| FilterError::NoVersionFound {
            pattern: self.constraint.to_string(),
        })
    }
}
