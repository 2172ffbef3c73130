//! Kind-specific version matchers

pub mod latest;
pub mod regex;
pub mod semver;

pub use self::latest::LatestMatcher;
pub use self::regex::RegexMatcher;
pub use self::semver::SemverMatcher;
