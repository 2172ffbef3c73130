//! Regex version matcher
//!
//! Returns the newest candidate matching the pattern anywhere in the string;
//! anchor with `^`/`$` for whole-string matches.

use regex::Regex;

use crate::version::error::FilterError;
use crate::version::matcher::VersionMatcher;
use crate::version::types::{CandidateOrder, FoundVersion, VersionKind};

#[derive(Debug, Clone, Copy)]
pub struct RegexMatcher<'a> {
    pattern: &'a str,
}

impl<'a> RegexMatcher<'a> {
    pub fn new(pattern: &'a str) -> Self {
        Self { pattern }
    }

    fn compile(&self) -> Result<Regex, FilterError> {
        Regex::new(self.pattern).map_err(|source| FilterError::InvalidPattern {
            pattern: self.pattern.to_string(),
            source,
        })
    }
}

impl VersionMatcher for RegexMatcher<'_> {
    fn kind(&self) -> VersionKind {
        VersionKind::Regex
    }

    fn search(
        &self,
        candidates: &[String],
        order: CandidateOrder,
    ) -> Result<FoundVersion, FilterError> {
        let re = self.compile()?;

        order
            .newest_first(candidates)
            .find(|v| re.is_match(v))
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
    #[case(r"^1\.", &["1.0.0", "1.1.0", "2.0.0"], "1.1.0")]
    #[case(".*", &["1.0.0", "2.0.0"], "2.0.0")]
    #[case(r"^v\d+\.\d+\.\d+$", &["v1.0.0", "v1.1.0-rc.1", "nightly"], "v1.0.0")]
    #[case("rc", &["1.0.0-rc.1", "1.0.0", "1.1.0-rc.2", "1.1.0"], "1.1.0-rc.2")]
    fn search_returns_newest_match(
        #[case] pattern: &str,
        #[case] candidates: &[&str],
        #[case] expected: &str,
    ) {
        let found = RegexMatcher::new(pattern)
            .search(&strings(candidates), CandidateOrder::OldestFirst)
            .unwrap();
        assert_eq!(found, FoundVersion::verbatim(expected));
    }

    #[test]
    fn search_respects_newest_first_order() {
        let candidates = strings(&["1.1.0", "1.0.0", "0.9.0"]);

        let found = RegexMatcher::new(r"^1\.")
            .search(&candidates, CandidateOrder::NewestFirst)
            .unwrap();

        assert_eq!(found.original_version, "1.1.0");
    }

    #[rstest]
    #[case(&["1.0.0", "2.0.0"])]
    #[case(&[])]
    fn search_invalid_pattern_fails_regardless_of_candidates(#[case] candidates: &[&str]) {
        let err = RegexMatcher::new("(unclosed")
            .search(&strings(candidates), CandidateOrder::OldestFirst)
            .unwrap_err();
        assert!(matches!(err, FilterError::InvalidPattern { pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn search_without_match_is_not_found() {
        let err = RegexMatcher::new(r"^3\.")
            .search(&strings(&["1.0.0", "2.0.0"]), CandidateOrder::OldestFirst)
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
