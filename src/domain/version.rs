use crate::error::{GitFlowError, Result};
use std::fmt;

/// Semantic version triple with an optional candidate counter.
///
/// The counter is the pre-release label carried by candidate-family tags
/// (rendered as `-rc.N`). Ordering compares the numeric triple first; for
/// equal triples a version without a counter orders above one with a
/// counter, and counters compare numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub candidate: Option<u32>,
}

impl Version {
    /// Create a new version without a candidate counter
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
            candidate: None,
        }
    }

    /// Attach a candidate counter to this version
    pub fn with_candidate(mut self, counter: u32) -> Self {
        self.candidate = Some(counter);
        self
    }

    /// Parse a bare version string (`X.Y.Z` or `X.Y.Z-rc.N`).
    ///
    /// Tag prefixes must already be stripped by the caller. Any
    /// non-numeric component is a fatal `Version` error: it indicates a
    /// corrupted tag history from which no safe next version can be
    /// resolved.
    pub fn parse(s: &str) -> Result<Self> {
        let (triple, candidate) = match s.split_once('-') {
            Some((triple, suffix)) => {
                let counter = suffix
                    .strip_prefix("rc.")
                    .and_then(|n| n.parse::<u32>().ok())
                    .ok_or_else(|| {
                        GitFlowError::version(format!(
                            "Invalid pre-release suffix in '{}': expected rc.<n>",
                            s
                        ))
                    })?;
                (triple, Some(counter))
            }
            None => (s, None),
        };

        let parts: Vec<&str> = triple.split('.').collect();
        if parts.len() != 3 {
            return Err(GitFlowError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                s
            )));
        }

        let major = parts[0]
            .parse::<u32>()
            .map_err(|_| GitFlowError::version(format!("Invalid major version: {}", parts[0])))?;
        let minor = parts[1]
            .parse::<u32>()
            .map_err(|_| GitFlowError::version(format!("Invalid minor version: {}", parts[1])))?;
        let patch = parts[2]
            .parse::<u32>()
            .map_err(|_| GitFlowError::version(format!("Invalid patch version: {}", parts[2])))?;

        Ok(Version {
            major,
            minor,
            patch,
            candidate,
        })
    }

    /// Bump according to bump class, dropping any candidate counter.
    ///
    /// - Major: major += 1, minor and patch reset to 0
    /// - Minor: minor += 1, patch reset to 0
    /// - Patch: patch += 1
    pub fn bump(&self, bump: BumpClass) -> Self {
        match bump {
            BumpClass::Major => Version::new(self.major + 1, 0, 0),
            BumpClass::Minor => Version::new(self.major, self.minor + 1, 0),
            BumpClass::Patch => Version::new(self.major, self.minor, self.patch + 1),
        }
    }

    /// The numeric triple without any candidate counter
    pub fn base(&self) -> Self {
        Version::new(self.major, self.minor, self.patch)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (self.candidate, other.candidate) {
                (None, None) => std::cmp::Ordering::Equal,
                // A finished version outranks any candidate of the same triple
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (Some(_), None) => std::cmp::Ordering::Less,
                (Some(a), Some(b)) => a.cmp(&b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(counter) = self.candidate {
            write!(f, "-rc.{}", counter)?;
        }
        Ok(())
    }
}

/// Coarse-grained category of a version increment.
///
/// Totally ordered: Major > Minor > Patch, so "strongest wins" resolution
/// is `max` and ceilings clamp with `min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BumpClass {
    Patch,
    Minor,
    Major,
}
