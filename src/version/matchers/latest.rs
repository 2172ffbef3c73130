//! Latest version matcher
//!
//! - `latest` - the newest candidate
//! - anything else - the newest candidate exactly equal to the pattern

use crate::version::error::FilterError;
use crate::version::matcher::VersionMatcher;
use crate::version::types::{CandidateOrder, FoundVersion, VersionKind};

/// Pattern selecting the newest candidate unconditionally
pub const LATEST_PATTERN: &str = "latest";

#[derive(Debug, Clone, Copy)]
pub struct LatestMatcher<'a> {
    pattern: &'a str,
}

impl<'a> LatestMatcher<'a> {
    pub fn new(pattern: &'a str) -> Self {
        Self { pattern }
    }
}

impl VersionMatcher for LatestMatcher<'_> {
    fn kind(&self) -> VersionKind {
        VersionKind::Latest
    }

    fn search(
        &self,
        candidates: &[String],
        order: CandidateOrder,
    ) -> Result<FoundVersion, FilterError> {
        if self.pattern == LATEST_PATTERN {
            return order
                .newest(candidates)
                .map(|v| FoundVersion::verbatim(v))
                .ok_or(FilterError::EmptyCandidateList);
        }

        order
            .newest_first(candidates)
            .find(|v| v.as_str() == self.pattern)
            .map(|v| FoundVersion::verbatim(v))
            .ok_or_else(|| FilterError::NoVersionFound {
                pattern: self.pattern.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn strings(versions: &[&str]) -> Vec<String> {
        versions.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case(&["1.0.0", "1.1.0", "2.0.0"], CandidateOrder::OldestFirst, "2.0.0")]
    #[case(&["2.0.0", "1.1.0", "1.0.0"], CandidateOrder::NewestFirst, "2.0.0")]
    // position wins, not precedence
    #[case(&["3.0.0", "1.0.0"], CandidateOrder::OldestFirst, "1.0.0")]
    #[case(&["only"], CandidateOrder::OldestFirst, "only")]
    fn search_latest_returns_newest_candidate(
        #[case] candidates: &[&str],
        #[case] order: CandidateOrder,
        #[case] expected: &str,
    ) {
        let found = LatestMatcher::new("latest")
            .search(&strings(candidates), order)
            .unwrap();
        assert_eq!(found, FoundVersion::verbatim(expected));
    }

    #[rstest]
    #[case(CandidateOrder::OldestFirst)]
    #[case(CandidateOrder::NewestFirst)]
    fn search_latest_fails_on_empty_list(#[case] order: CandidateOrder) {
        let err = LatestMatcher::new("latest").search(&[], order).unwrap_err();
        assert!(matches!(err, FilterError::EmptyCandidateList));
    }

    #[test]
    fn search_literal_returns_exact_match() {
        let candidates = strings(&["1.0.0", "1.0.0-rc.1", "2.0.0"]);

        let found = LatestMatcher::new("1.0.0")
            .search(&candidates, CandidateOrder::OldestFirst)
            .unwrap();

        assert_eq!(found, FoundVersion::verbatim("1.0.0"));
    }

    #[rstest]
    #[case(&["1.0.0", "2.0.0"], "1.0")]
    #[case(&["v1.0.0"], "1.0.0")]
    #[case(&[], "1.0.0")]
    fn search_literal_without_match_is_not_found(
        #[case] candidates: &[&str],
        #[case] pattern: &str,
    ) {
        let err = LatestMatcher::new(pattern)
            .search(&strings(candidates), CandidateOrder::OldestFirst)
            .unwrap_err();
        assert!(matches!(err, FilterError::NoVersionFound { pattern: p } if p == pattern));
    }
}
