use regex::Regex;

/// Commit metadata passed through from the range query.
///
/// Nothing here is interpreted beyond the message; classification happens
/// in the classifier (bump class) and in [`CommitKind::detect`]
/// (changelog grouping).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Full commit hash
    pub hash: String,
    /// Abbreviated hash used for build identifiers and changelog lines
    pub short_hash: String,
    /// Complete commit message, body included
    pub message: String,
    /// Author name
    pub author: String,
    /// Commit time, seconds since the epoch
    pub timestamp: i64,
}

impl CommitRecord {
    /// First line of the commit message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// Commit type detected for changelog grouping.
///
/// Distinct from bump classification: the vocabulary overlaps, but this
/// pass only decides which changelog section a commit lands in. `Misc` is
/// the catch-all when no type prefix matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitKind {
    Feat,
    Fix,
    Chore,
    Docs,
    Refactor,
    Perf,
    Test,
    Misc,
}

impl CommitKind {
    /// Detect the commit type from the first line of a message.
    ///
    /// Accepts the conventional forms `type:`, `type(scope):` and the
    /// breaking `!` variants of both.
    pub fn detect(message: &str) -> Self {
        let first_line = message.lines().next().unwrap_or("");

        let type_token = Regex::new(r"^([a-z]+)(?:\([^)]*\))?!?:")
            .ok()
            .and_then(|re| re.captures(first_line))
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string());

        match type_token.as_deref() {
            Some("feat") => CommitKind::Feat,
            Some("fix") | Some("hotfix") => CommitKind::Fix,
            Some("chore") => CommitKind::Chore,
            Some("docs") => CommitKind::Docs,
            Some("refactor") => CommitKind::Refactor,
            Some("perf") => CommitKind::Perf,
            Some("test") => CommitKind::Test,
            _ => CommitKind::Misc,
        }
    }

    /// Section heading used in the rendered changelog
    pub fn heading(&self) -> &'static str {
        match self {
            CommitKind::Feat => "feat",
            CommitKind::Fix => "fix",
            CommitKind::Chore => "chore",
            CommitKind::Docs => "docs",
            CommitKind::Refactor => "refactor",
            CommitKind::Perf => "perf",
            CommitKind::Test => "test",
            CommitKind::Misc => "misc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(message: &str) -> CommitRecord {
        CommitRecord {
            hash: "a".repeat(40),
            short_hash: "aaaaaaa".to_string(),
            message: message.to_string(),
            author: "Test Author".to_string(),
            timestamp: 0,
        }
    }

    #[test]
    fn test_summary_is_first_line() {
        let c = record("feat: add thing\n\nlong body here");
        assert_eq!(c.summary(), "feat: add thing");
    }

    #[test]
    fn test_detect_plain_types() {
        assert_eq!(CommitKind::detect("feat: x"), CommitKind::Feat);
        assert_eq!(CommitKind::detect("fix: x"), CommitKind::Fix);
        assert_eq!(CommitKind::detect("chore: x"), CommitKind::Chore);
        assert_eq!(CommitKind::detect("docs: x"), CommitKind::Docs);
        assert_eq!(CommitKind::detect("refactor: x"), CommitKind::Refactor);
        assert_eq!(CommitKind::detect("perf: x"), CommitKind::Perf);
        assert_eq!(CommitKind::detect("test: x"), CommitKind::Test);
    }

    #[test]
    fn test_detect_scoped_and_breaking() {
        assert_eq!(CommitKind::detect("feat(auth): login"), CommitKind::Feat);
        assert_eq!(CommitKind::detect("feat!: rewrite"), CommitKind::Feat);
        assert_eq!(CommitKind::detect("fix(db)!: schema"), CommitKind::Fix);
    }

    #[test]
    fn test_detect_hotfix_groups_with_fix() {
        assert_eq!(CommitKind::detect("hotfix: urgent"), CommitKind::Fix);
    }

    #[test]
    fn test_detect_unknown_type_is_misc() {
        assert_eq!(CommitKind::detect("build: ci tweak"), CommitKind::Misc);
        assert_eq!(CommitKind::detect("Update README"), CommitKind::Misc);
        assert_eq!(CommitKind::detect(""), CommitKind::Misc);
    }

    #[test]
    fn test_detect_uses_first_line_only() {
        assert_eq!(
            CommitKind::detect("random summary\n\nfix: not this line"),
            CommitKind::Misc
        );
    }
}
