//! User-facing version filter
//!
//! A [`Filter`] is usually deserialized from a user-authored document, so its
//! fields are kept as plain strings and checked by [`Filter::validate`]
//! instead of being trusted.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::version::error::FilterError;
use crate::version::matcher::{Strategy, VersionMatcher};
use crate::version::types::{CandidateOrder, FoundVersion, VersionKind};

/// Parameters selecting one version out of a list of candidates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Filter {
    /// Version kind: `latest`, `regex` or `semver`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Pattern interpreted according to the kind
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pattern: String,
    /// Make pre-release versions eligible. Only used by `semver`.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub strict: bool,
}

impl Filter {
    pub fn new(kind: impl Into<String>, pattern: impl Into<String>, strict: bool) -> Self {
        Self {
            kind: kind.into(),
            pattern: pattern.into(),
            strict,
        }
    }

    /// Returns a normalized copy with defaults applied, then validates it.
    ///
    /// An empty kind becomes `latest`; an empty pattern becomes the default
    /// pattern of the kind.
    pub fn init(&self) -> Result<Filter, FilterError> {
        let mut filter = self.clone();

        if filter.kind.is_empty() {
            filter.kind = VersionKind::Latest.as_str().to_string();
        }

        if filter.pattern.is_empty() {
            if let Ok(kind) = filter.kind.parse::<VersionKind>() {
                filter.pattern = kind.default_pattern().to_string();
            }
        }

        filter.validate()?;
        Ok(filter)
    }

    /// Checks that the kind is supported
    pub fn validate(&self) -> Result<(), FilterError> {
        self.version_kind().map(|_| ())
    }

    /// Typed view of the kind
    pub fn version_kind(&self) -> Result<VersionKind, FilterError> {
        self.kind.parse()
    }

    /// Returns true if no field was configured
    pub fn is_zero(&self) -> bool {
        *self == Filter::default()
    }

    /// Search candidates ordered from the oldest to the newest
    pub fn search(&self, candidates: &[String]) -> Result<FoundVersion, FilterError> {
        self.search_ordered(candidates, CandidateOrder::OldestFirst)
    }

    /// Search candidates supplied in the given order
    ///
    /// The latest and regex kinds prefer the most recently published match,
    /// so `order` must describe `candidates` truthfully.
    pub fn search_ordered(
        &self,
        candidates: &[String],
        order: CandidateOrder,
    ) -> Result<FoundVersion, FilterError> {
        let strategy = self.strategy()?;

        info!(
            "Searching for version matching pattern {:?} ({})",
            self.pattern,
            strategy.kind()
        );

        strategy.search(candidates, order)
    }

    fn strategy(&self) -> Result<Strategy<'_>, FilterError> {
        let kind = self.version_kind()?;
        Ok(Strategy::new(kind, &self.pattern, self.strict))
    }
}
