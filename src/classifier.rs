//! Commit Classifier: maps one commit message to a bump class.
//!
//! Rules are data, not code: an ordered list of (matcher, bump) pairs
//! evaluated first-match-wins, built once from the configured keywords.
//! Matching is case-insensitive and looks at the first message line only,
//! except the `BREAKING CHANGE` footer check which scans the whole body.

use regex::Regex;

use crate::config::KeywordsConfig;
use crate::domain::BumpClass;

/// How a single rule recognizes a commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Case-insensitive substring of the first line
    Keyword(String),
    /// Conventional-commit `!` before the colon (`feat!:`, `fix(db)!:`)
    BangSuffix,
    /// `BREAKING CHANGE` footer anywhere in the message body
    BreakingFooter,
    /// Case-insensitive prefix of the first line
    Prefix(String),
}

impl Matcher {
    fn matches(&self, message: &str) -> bool {
        let first_line = message.lines().next().unwrap_or("").to_lowercase();

        match self {
            Matcher::Keyword(keyword) => first_line.contains(&keyword.to_lowercase()),
            Matcher::BangSuffix => Regex::new(r"^[a-z]+(\([^)]*\))?!:")
                .map(|re| re.is_match(&first_line))
                .unwrap_or(false),
            Matcher::BreakingFooter => message.contains("BREAKING CHANGE"),
            Matcher::Prefix(prefix) => first_line.starts_with(&prefix.to_lowercase()),
        }
    }
}

/// One classification rule: when the matcher fires, the bump applies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub matcher: Matcher,
    pub bump: BumpClass,
}

/// Ordered rule list over commit messages. Pure; no side effects.
#[derive(Debug, Clone)]
pub struct CommitClassifier {
    rules: Vec<Rule>,
}

impl CommitClassifier {
    /// Build the rule list from configured keywords.
    ///
    /// Priority order: major markers (configured literals, `!` suffix,
    /// breaking footer), then patch markers, then the `feat` prefix.
    pub fn from_keywords(keywords: &KeywordsConfig) -> Self {
        let mut rules = Vec::new();

        for keyword in &keywords.major {
            rules.push(Rule {
                matcher: Matcher::Keyword(keyword.clone()),
                bump: BumpClass::Major,
            });
        }
        rules.push(Rule {
            matcher: Matcher::BangSuffix,
            bump: BumpClass::Major,
        });
        rules.push(Rule {
            matcher: Matcher::BreakingFooter,
            bump: BumpClass::Major,
        });

        for keyword in &keywords.patch {
            rules.push(Rule {
                matcher: Matcher::Keyword(keyword.clone()),
                bump: BumpClass::Patch,
            });
        }

        rules.push(Rule {
            matcher: Matcher::Prefix("feat".to_string()),
            bump: BumpClass::Minor,
        });

        CommitClassifier { rules }
    }

    /// Classify a message; `default` is the branch family's fallback
    /// (Minor on the primary family, Patch on the release family).
    pub fn classify(&self, message: &str, default: BumpClass) -> BumpClass {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(message))
            .map(|rule| rule.bump)
            .unwrap_or(default)
    }
}
