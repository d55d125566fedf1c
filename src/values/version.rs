//! Dotted numeric versions

use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9]+)*(-[A-Za-z0-9]+)*$").expect("version pattern is valid")
});

/// A version made of a numeric branch of any length plus optional tags.
///
/// Text form is `2.3.1` or `1.0-beta-rc1`. Ordering compares the branch
/// first, then the tags.
///
/// # Example
///
/// ```
/// use envsettings::Version;
///
/// let v: Version = "2.3.1".parse().unwrap();
/// assert_eq!(v.branch(), &[2, 3, 1]);
/// assert!(v.tags().is_empty());
/// assert!(v > Version::new(vec![2, 3]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    branch: Vec<u64>,
    tags: Vec<String>,
}

impl Version {
    pub fn new(branch: Vec<u64>) -> Self {
        Self {
            branch,
            tags: Vec::new(),
        }
    }

    /// The all-zero `0.0.0.0` version, below any real release
    pub fn zero() -> Self {
        Self::new(vec![0, 0, 0, 0])
    }

    pub fn branch(&self) -> &[u64] {
        &self.branch
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::zero()
    }
}

/// Error returned when text is not a valid [`Version`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVersionError(String);

impl fmt::Display for ParseVersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid version: {:?}", self.0)
    }
}

impl std::error::Error for ParseVersionError {}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !VERSION_RE.is_match(s) {
            return Err(ParseVersionError(s.to_string()));
        }

        let mut parts = s.split('-');
        let numbers = parts.next().unwrap_or_default();
        let branch = numbers
            .split('.')
            .map(str::parse::<u64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ParseVersionError(s.to_string()))?;
        let tags = parts.map(String::from).collect();

        Ok(Self { branch, tags })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let branch: Vec<String> = self.branch.iter().map(u64::to_string).collect();
        f.write_str(&branch.join("."))?;
        for tag in &self.tags {
            write!(f, "-{tag}")?;
        }
        Ok(())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
