//! Changelog Builder: groups a commit range by detected type and renders
//! one changelog entry, prepended newest-first to the changelog document.
//!
//! Commits arrive in the range query's own order, which is newest first
//! (see [`crate::git::Repository::commits_since`]); the builder preserves
//! that order within each section so entries read newest-first. It does
//! not deduplicate against prior runs; re-run guarding is the
//! orchestrator's job.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::domain::{CommitKind, CommitRecord};
use crate::error::Result;

/// One rendered changelog entry: a version/date header and type-grouped
/// commit sections in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changelog {
    pub tag: String,
    pub date: NaiveDate,
    pub sections: Vec<(CommitKind, Vec<CommitRecord>)>,
}

impl Changelog {
    /// Group commits under the tag they are being released as.
    ///
    /// Sections appear in the order their type is first seen; commits keep
    /// their incoming (newest-first) order within a section.
    pub fn build(tag: impl Into<String>, date: NaiveDate, commits: &[CommitRecord]) -> Self {
        let mut sections: Vec<(CommitKind, Vec<CommitRecord>)> = Vec::new();

        for commit in commits {
            let kind = CommitKind::detect(&commit.message);
            match sections.iter_mut().find(|(k, _)| *k == kind) {
                Some((_, entries)) => entries.push(commit.clone()),
                None => sections.push((kind, vec![commit.clone()])),
            }
        }

        Changelog {
            tag: tag.into(),
            date,
            sections,
        }
    }

    /// Render the entry as markdown
    pub fn render(&self) -> String {
        let mut out = format!("## {} - {}\n", self.tag, self.date.format("%Y-%m-%d"));

        for (kind, commits) in &self.sections {
            out.push_str(&format!("\n### {}\n", kind.heading()));
            for commit in commits {
                out.push_str(&format!("- {} {}\n", commit.short_hash, commit.summary()));
            }
        }

        out
    }
}

/// Prepend a rendered entry to the changelog document, creating the file
/// if it does not exist yet.
pub fn prepend_entry(path: impl AsRef<Path>, entry: &str) -> Result<()> {
    let path = path.as_ref();

    let existing = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };

    let updated = if existing.is_empty() {
        format!("{}\n", entry.trim_end())
    } else {
        format!("{}\n\n{}", entry.trim_end(), existing)
    };

    fs::write(path, updated)?;
    Ok(())
}
