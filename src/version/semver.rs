//! Semver parsing and constraint evaluation
//!
//! Supported constraint syntax:
//! - `1.2.3`, `=1.2.3` - exact match
//! - `!=1.2.3` - anything but this version
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators
//! - `^1.2.3` - compatible with version (>=1.2.3 <2.0.0, special cases for 0.x)
//! - `~1.2.3` - approximately equivalent (>=1.2.3 <1.3.0)
//! - `1.2.3 - 2.3.4` - inclusive hyphen range
//! - `1.2.x`, `1.*`, `1.2`, `*` - wildcards and partial versions
//! - `>=1.0.0 <2.0.0`, `>=1.0.0, <2.0.0` - AND of comparators
//! - `^1.0.0 || ^2.0.0` - OR of comparator sets

use std::cmp::Ordering;

use semver::{Prerelease, Version};

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Accepts a leading `v` and pads partial versions with zeros, keeping any
/// pre-release or build suffix.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "v1.2" -> Version(1, 2, 0)
/// - "1.2-rc.1" -> Version(1, 2, 0, pre: rc.1)
pub fn parse_version(version: &str) -> Option<Version> {
    let version = strip_v_prefix(version.trim());
    let (rest, build) = match version.split_once('+') {
        Some((rest, build)) => (rest, Some(build)),
        None => (version, None),
    };
    let (core, pre) = match rest.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (rest, None),
    };

    let parts: Vec<&str> = core.split('.').collect();
    let mut normalized = match parts.as_slice() {
        [major] => format!("{major}.0.0"),
        [major, minor] => format!("{major}.{minor}.0"),
        _ => core.to_string(),
    };
    if let Some(pre) = pre {
        normalized.push('-');
        normalized.push_str(pre);
    }
    if let Some(build) = build {
        normalized.push('+');
        normalized.push_str(build);
    }

    Version::parse(&normalized).ok()
}

/// Compare two versions by semver precedence, ignoring build metadata.
pub fn cmp_precedence(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch, &a.pre).cmp(&(b.major, b.minor, b.patch, &b.pre))
}

fn strip_v_prefix(version: &str) -> &str {
    version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version)
}

/// A parsed constraint expression: an OR of comparator sets
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    alternatives: Vec<ComparatorSet>,
}

/// Comparators that must all hold (space or comma separated)
#[derive(Debug, Clone, PartialEq)]
struct ComparatorSet {
    comparators: Vec<Comparator>,
    /// True when one of the written versions carries a pre-release tag
    names_prerelease: bool,
}

/// A single bound on a version
#[derive(Debug, Clone, PartialEq)]
enum Comparator {
    Exact(Version),
    NotEqual(Version),
    Greater(Version),
    AtLeast(Version),
    Less(Version),
    AtMost(Version),
}

impl Comparator {
    fn satisfies(&self, version: &Version) -> bool {
        match self {
            Comparator::Exact(v) => cmp_precedence(version, v) == Ordering::Equal,
            Comparator::NotEqual(v) => cmp_precedence(version, v) != Ordering::Equal,
            Comparator::Greater(v) => cmp_precedence(version, v) == Ordering::Greater,
            Comparator::AtLeast(v) => cmp_precedence(version, v) != Ordering::Less,
            Comparator::Less(v) => cmp_precedence(version, v) == Ordering::Less,
            Comparator::AtMost(v) => cmp_precedence(version, v) != Ordering::Greater,
        }
    }
}

impl Constraint {
    /// Parse a constraint expression.
    ///
    /// The empty string and `latest` are accepted as aliases of `*`.
    /// Returns the reason on failure.
    pub fn parse(constraint: &str) -> Result<Self, String> {
        let constraint = constraint.trim();
        if constraint.is_empty() || constraint == "latest" {
            return Ok(Self::any());
        }

        let alternatives = constraint
            .split("||")
            .map(ComparatorSet::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { alternatives })
    }

    /// Constraint matched by every version
    pub fn any() -> Self {
        Self {
            alternatives: vec![ComparatorSet {
                comparators: Vec::new(),
                names_prerelease: false,
            }],
        }
    }

    /// Check whether a version satisfies the constraint.
    ///
    /// Pre-release versions only match when `include_prerelease` is set or
    /// the comparator set names a pre-release itself.
    pub fn matches(&self, version: &Version, include_prerelease: bool) -> bool {
        self.alternatives.iter().any(|set| {
            (version.pre.is_empty() || include_prerelease || set.names_prerelease)
                && set.comparators.iter().all(|c| c.satisfies(version))
        })
    }
}

impl ComparatorSet {
    fn parse(spec: &str) -> Result<Self, String> {
        let spec = spec.replace(',', " ");
        let tokens: Vec<&str> = spec.split_whitespace().collect();
        if tokens.is_empty() {
            return Err("empty comparator set".to_string());
        }

        let mut comparators = Vec::new();
        let mut names_prerelease = false;
        let mut i = 0;

        while i < tokens.len() {
            // Hyphen range: "1.2.3 - 2.3.4"
            if tokens.get(i + 1) == Some(&"-") {
                let from = tokens[i];
                let to = tokens
                    .get(i + 2)
                    .ok_or_else(|| format!("hyphen range {from:?} has no upper bound"))?;
                let from = Partial::parse(from)?;
                let to = Partial::parse(to)?;
                names_prerelease |= from.has_prerelease() || to.has_prerelease();
                comparators.extend(hyphen_range(&from, &to)?);
                i += 3;
                continue;
            }

            // Operator separated from its version: ">= 1.2.3"
            let token = if is_operator(tokens[i]) {
                let version = tokens
                    .get(i + 1)
                    .ok_or_else(|| format!("operator {:?} has no version", tokens[i]))?;
                i += 2;
                format!("{}{}", tokens[i - 2], version)
            } else {
                i += 1;
                tokens[i - 1].to_string()
            };

            let (op, partial) = split_operator(&token)?;
            names_prerelease |= partial.has_prerelease();
            comparators.extend(op.lower(&partial)?);
        }

        Ok(Self {
            comparators,
            names_prerelease,
        })
    }
}

/// Operators recognized in front of a version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Exact,
    NotEqual,
    Greater,
    AtLeast,
    Less,
    AtMost,
    Tilde,
    Caret,
}

const OPERATORS: [(&str, Operator); 8] = [
    ("!=", Operator::NotEqual),
    (">=", Operator::AtLeast),
    ("<=", Operator::AtMost),
    (">", Operator::Greater),
    ("<", Operator::Less),
    ("=", Operator::Exact),
    ("~", Operator::Tilde),
    ("^", Operator::Caret),
];

fn is_operator(token: &str) -> bool {
    OPERATORS.iter().any(|(symbol, _)| *symbol == token)
}

fn split_operator(token: &str) -> Result<(Operator, Partial), String> {
    for (symbol, op) in OPERATORS {
        if let Some(rest) = token.strip_prefix(symbol) {
            return Ok((op, Partial::parse(rest)?));
        }
    }
    Ok((Operator::Exact, Partial::parse(token)?))
}

impl Operator {
    /// Lower an operator applied to a (possibly partial) version into bounds
    fn lower(self, partial: &Partial) -> Result<Vec<Comparator>, String> {
        let floor = partial.floor();
        let comparators = match (self, partial.specified()) {
            (Operator::Exact, 3) => vec![Comparator::Exact(floor)],
            (Operator::Exact, 0) => Vec::new(),
            (Operator::Exact, _) => vec![Comparator::AtLeast(floor), partial.ceiling()?],

            (Operator::NotEqual, 3) => vec![Comparator::NotEqual(floor)],
            (Operator::NotEqual, _) => {
                return Err(format!("{partial} must be a full version after \"!=\""));
            }

            (Operator::Greater, 0) | (Operator::Less, 0) => {
                return Err(format!("no version can satisfy a strict bound on {partial}"));
            }
            (Operator::Greater, 3) => vec![Comparator::Greater(floor)],
            // >1.2 means >=1.3.0
            (Operator::Greater, _) => vec![Comparator::AtLeast(partial.next()?)],

            (Operator::AtLeast, 0) => Vec::new(),
            (Operator::AtLeast, _) => vec![Comparator::AtLeast(floor)],

            (Operator::Less, 3) => vec![Comparator::Less(floor)],
            (Operator::Less, _) => vec![Comparator::Less(lowest_prerelease(floor))],

            (Operator::AtMost, 0) => Vec::new(),
            (Operator::AtMost, 3) => vec![Comparator::AtMost(floor)],
            (Operator::AtMost, _) => vec![partial.ceiling()?],

            (Operator::Tilde, 0) | (Operator::Caret, 0) => Vec::new(),
            (Operator::Tilde, 1) => vec![Comparator::AtLeast(floor), partial.ceiling()?],
            (Operator::Tilde, _) => vec![
                Comparator::AtLeast(floor.clone()),
                Comparator::Less(lowest_prerelease(Version::new(
                    floor.major,
                    bump(floor.minor)?,
                    0,
                ))),
            ],

            (Operator::Caret, specified) => {
                // Bump the leftmost non-zero component, or the last written one
                let upper = if floor.major > 0 || specified == 1 {
                    Version::new(bump(floor.major)?, 0, 0)
                } else if floor.minor > 0 || specified == 2 {
                    Version::new(0, bump(floor.minor)?, 0)
                } else {
                    Version::new(0, 0, bump(floor.patch)?)
                };
                vec![
                    Comparator::AtLeast(floor),
                    Comparator::Less(lowest_prerelease(upper)),
                ]
            }
        };
        Ok(comparators)
    }
}

fn hyphen_range(from: &Partial, to: &Partial) -> Result<Vec<Comparator>, String> {
    let mut comparators = Vec::new();
    if from.specified() > 0 {
        comparators.push(Comparator::AtLeast(from.floor()));
    }
    match to.specified() {
        0 => {}
        3 => comparators.push(Comparator::AtMost(to.floor())),
        _ => comparators.push(to.ceiling()?),
    }
    Ok(comparators)
}

fn bump(component: u64) -> Result<u64, String> {
    component
        .checked_add(1)
        .ok_or_else(|| format!("version component {component} is too large"))
}

/// `X.Y.Z-0`, the lowest version with precedence at `X.Y.Z`
fn lowest_prerelease(mut version: Version) -> Version {
    if version.pre.is_empty() {
        version.pre = Prerelease::new("0").unwrap_or(Prerelease::EMPTY);
    }
    version
}

/// A version as written in a constraint, where trailing components may be
/// missing or wildcards (`x`, `X`, `*`)
#[derive(Debug, Clone, PartialEq)]
struct Partial {
    raw: String,
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Prerelease,
}

impl Partial {
    fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = strip_v_prefix(raw.trim());
        if trimmed.is_empty() {
            return Err("missing version".to_string());
        }

        // Build metadata does not take part in precedence
        let without_build = trimmed.split_once('+').map_or(trimmed, |(rest, _)| rest);
        let (core, pre) = match without_build.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (without_build, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() > 3 {
            return Err(format!("{raw:?} has more than three components"));
        }

        let mut numbers = [None; 3];
        let mut wildcard_seen = false;
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if matches!(*part, "x" | "X" | "*") {
                wildcard_seen = true;
                continue;
            }
            if wildcard_seen {
                return Err(format!("{raw:?} has a number after a wildcard"));
            }
            let number = part
                .parse::<u64>()
                .map_err(|_| format!("{raw:?} is not a valid version"))?;
            *slot = Some(number);
        }

        let pre = match pre {
            Some("") => return Err(format!("{raw:?} has an empty pre-release")),
            Some(pre) => {
                if numbers.iter().any(Option::is_none) {
                    return Err(format!(
                        "{raw:?} has a pre-release without a full version"
                    ));
                }
                Prerelease::new(pre).map_err(|e| format!("{raw:?}: {e}"))?
            }
            None => Prerelease::EMPTY,
        };

        Ok(Self {
            raw: raw.trim().to_string(),
            major: numbers[0],
            minor: numbers[1],
            patch: numbers[2],
            pre,
        })
    }

    /// Number of leading numeric components that were written
    fn specified(&self) -> usize {
        [self.major, self.minor, self.patch]
            .iter()
            .take_while(|c| c.is_some())
            .count()
    }

    fn has_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }

    /// Lowest version covered by the partial version
    fn floor(&self) -> Version {
        let mut version = Version::new(
            self.major.unwrap_or(0),
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        );
        version.pre = self.pre.clone();
        version
    }

    /// First version past the partial range: `1.2` -> `1.3.0`
    fn next(&self) -> Result<Version, String> {
        let floor = self.floor();
        match self.specified() {
            1 => Ok(Version::new(bump(floor.major)?, 0, 0)),
            2 => Ok(Version::new(floor.major, bump(floor.minor)?, 0)),
            _ => Err(format!("{} does not describe a range", self.raw)),
        }
    }

    /// Exclusive upper bound of the partial range, excluding its pre-releases
    fn ceiling(&self) -> Result<Comparator, String> {
        Ok(Comparator::Less(lowest_prerelease(self.next()?)))
    }
}

impl std::fmt::Display for Partial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.raw)
    }
}
