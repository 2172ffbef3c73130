use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("unsupported version kind {0:?}")]
    UnsupportedKind(String),

    #[error("invalid regex pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid semver constraint {constraint:?}: {reason}")]
    InvalidConstraint { constraint: String, reason: String },

    #[error("no version to choose from: candidate list is empty")]
    EmptyCandidateList,

    #[error("no version found matching pattern {pattern:?}")]
    NoVersionFound { pattern: String },
}

impl FilterError {
    /// Returns true when the search ran to completion without a match.
    ///
    /// This is an expected outcome callers usually handle by skipping the
    /// update rather than reporting a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FilterError::NoVersionFound { .. })
    }
}
