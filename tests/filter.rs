use std::sync::Arc;
use std::thread;

use rstest::rstest;
use version_filter::config::{ConfigFormat, filter_from_str};
use version_filter::{CandidateOrder, Filter, FilterError, FoundVersion};

fn strings(versions: &[&str]) -> Vec<String> {
    versions.iter().map(|s| s.to_string()).collect()
}

fn init(kind: &str, pattern: &str, strict: bool) -> Filter {
    Filter::new(kind, pattern, strict).init().unwrap()
}

#[rstest]
#[case(init("latest", "latest", false), &["1.0.0", "1.1.0", "2.0.0"], "2.0.0")]
#[case(init("regex", r"^1\.", false), &["1.0.0", "1.1.0", "2.0.0"], "1.1.0")]
#[case(init("semver", "^1.0.0", false), &["1.0.0", "1.0.1", "1.1.0-rc.1", "2.0.0"], "1.0.1")]
#[case(init("semver", "*", true), &["1.0.0", "1.1.0-rc.1"], "1.1.0-rc.1")]
fn search_selects_expected_version(
    #[case] filter: Filter,
    #[case] candidates: &[&str],
    #[case] expected: &str,
) {
    let found = filter.search(&strings(candidates)).unwrap();

    assert_eq!(found, FoundVersion::verbatim(expected));
}

#[test]
fn search_latest_on_empty_list_fails() {
    let err = init("latest", "latest", false).search(&[]).unwrap_err();

    assert!(matches!(err, FilterError::EmptyCandidateList));
}

#[test]
fn init_rejects_unknown_kind_before_search() {
    let err = Filter::new("bogus", "", false).init().unwrap_err();

    assert!(matches!(err, FilterError::UnsupportedKind(ref kind) if kind == "bogus"));
    assert_eq!(err.to_string(), r#"unsupported version kind "bogus""#);
}

#[test]
fn default_filter_picks_last_candidate() {
    let filter = Filter::default().init().unwrap();

    let found = filter.search(&strings(&["b", "a", "c"])).unwrap();

    assert_eq!(found.original_version, "c");
}

#[test]
fn literal_match_returns_highest_indexed_equal_element() {
    let filter = init("latest", "1.0.0", false);

    let found = filter
        .search(&strings(&["1.0.0", "2.0.0", "1.0.0", "3.0.0"]))
        .unwrap();

    assert_eq!(found, FoundVersion::verbatim("1.0.0"));
    assert!(
        filter
            .search(&strings(&["2.0.0", "3.0.0"]))
            .unwrap_err()
            .is_not_found()
    );
}

#[rstest]
#[case("*")]
#[case(">=0.1.0")]
#[case("^1.0.0 || ^2.0.0")]
#[case("1.x")]
fn non_strict_semver_never_returns_prerelease(#[case] constraint: &str) {
    let candidates = strings(&["0.9.0", "1.0.0", "1.5.0-beta.1", "2.0.0", "2.1.0-rc.1"]);

    let found = init("semver", constraint, false).search(&candidates).unwrap();

    assert!(!found.parsed_version.contains('-'));
}

#[test]
fn semver_ignores_candidate_order() {
    let filter = init("semver", "^1", false);
    let candidates = strings(&["1.9.0", "1.2.0", "1.10.0", "1.3.0"]);

    let oldest_first = filter.search(&candidates).unwrap();
    let newest_first = filter
        .search_ordered(&candidates, CandidateOrder::NewestFirst)
        .unwrap();

    assert_eq!(oldest_first.original_version, "1.10.0");
    assert_eq!(oldest_first, newest_first);
}

#[test]
fn invalid_patterns_are_reported_with_their_cause() {
    let regex_err = init("regex", "[", false).search(&[]).unwrap_err();
    let semver_err = init("semver", "^one", false)
        .search(&strings(&["1.0.0"]))
        .unwrap_err();

    assert!(matches!(regex_err, FilterError::InvalidPattern { .. }));
    assert!(regex_err.to_string().starts_with(r#"invalid regex pattern "[""#));
    assert!(matches!(semver_err, FilterError::InvalidConstraint { .. }));
}

#[rstest]
#[case(init("latest", "latest", false))]
#[case(init("latest", "1.2.0", false))]
#[case(init("regex", r"^1\.", false))]
#[case(init("semver", "^1", false))]
#[case(init("semver", "*", true))]
fn repeated_search_returns_same_result(#[case] filter: Filter) {
    let candidates = strings(&["1.0.0", "1.4.0", "1.2.0", "2.0.0-rc.1"]);

    let first = filter.search(&candidates).unwrap();
    let second = filter.search(&candidates).unwrap();

    assert_eq!(first, second);
    assert_eq!(candidates, strings(&["1.0.0", "1.4.0", "1.2.0", "2.0.0-rc.1"]));
}

#[test]
fn concurrent_searches_share_one_filter() {
    let filter = Arc::new(init("semver", "~1.2", false));
    let candidates = Arc::new(strings(&["1.1.0", "1.2.0", "1.2.7", "1.3.0"]));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let filter = Arc::clone(&filter);
            let candidates = Arc::clone(&candidates);
            thread::spawn(move || filter.search(&candidates).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().original_version, "1.2.7");
    }
}

#[test]
fn filter_from_yaml_document_searches_end_to_end() {
    let document = "versionfilter:\n  kind: semver\n  pattern: \">=1.0.0, <1.5.0\"\n";
    let filter = filter_from_str(document, ConfigFormat::Yaml)
        .unwrap()
        .init()
        .unwrap();

    let found = filter
        .search(&strings(&["v1.0.0", "v1.4.2", "v1.5.0", "v2.0.0"]))
        .unwrap();

    assert_eq!(
        found,
        FoundVersion {
            original_version: "v1.4.2".to_string(),
            parsed_version: "1.4.2".to_string(),
        }
    );
}
