use crate::domain::version::Version;
use crate::error::Result;

/// The two tag namespaces, distinguished by configured prefix.
///
/// A candidate-family and a release-family tag may denote the same numeric
/// version; within one family the tag-to-version mapping is injective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFamily {
    Release,
    Candidate,
}

/// A (prefix, version) pair mapped to a git reference name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub prefix: String,
    pub version: Version,
}

impl Tag {
    /// Create a tag from a family prefix and version
    pub fn new(prefix: impl Into<String>, version: Version) -> Self {
        Tag {
            prefix: prefix.into(),
            version,
        }
    }

    /// The tag name as written to the repository (e.g. `v1.2.3`)
    pub fn name(&self) -> String {
        format!("{}{}", self.prefix, self.version)
    }

    /// Interpret an existing tag name as a member of the family with the
    /// given prefix.
    ///
    /// Returns `Ok(None)` when the tag does not belong to the family (no
    /// prefix match, or the remainder is not version-shaped at all). A tag
    /// that does carry the prefix and starts with a digit but fails to
    /// parse is a fatal `Version` error: the tag history is corrupted.
    pub fn parse_in_family(name: &str, prefix: &str) -> Result<Option<Tag>> {
        let Some(rest) = name.strip_prefix(prefix) else {
            return Ok(None);
        };

        if !rest.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            return Ok(None);
        }

        let version = Version::parse(rest)?;
        Ok(Some(Tag::new(prefix, version)))
    }
}
