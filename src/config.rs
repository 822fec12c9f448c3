use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::Version;
use crate::error::{GitFlowError, Result};
use crate::ui::Verbosity;

/// Complete configuration for one run, resolved once at startup.
///
/// CI environment inputs (the `INPUT_*` contract) supply the release
/// policy; an optional TOML file can override the marker keywords, commit
/// identity and changelog path. Components receive this by reference and
/// never read ambient state themselves.
#[derive(Debug, Clone)]
pub struct Config {
    /// Version used verbatim when a tag family has no prior tag
    pub init_version: Version,
    /// Name of the primary (candidate-family) branch
    pub primary_branch: String,
    /// Tag prefix for the candidate family (e.g. `rc/`)
    pub candidate_prefix: String,
    /// Tag prefix for the release family (e.g. `v`)
    pub release_prefix: String,
    /// Whether tags, branches and the changelog commit are pushed
    pub push_enabled: bool,
    /// Whether release records are published for release tags
    pub publish_enabled: bool,
    /// Branches where every primary-branch run cuts a release
    pub auto_release_branches: Vec<String>,
    /// Reporting threshold
    pub verbosity: Verbosity,
    /// Remote refs are pushed to
    pub remote: String,
    /// Publish API coordinates
    pub github: GithubConfig,
    /// Marker keywords driving bump classification and release triggers
    pub keywords: KeywordsConfig,
    /// Committer identity for the changelog commit
    pub identity: IdentityConfig,
    /// Path of the changelog document, relative to the work tree
    pub changelog_path: String,
}

/// Publish API coordinates and credential
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// `owner/repo` slug the release is created in
    pub repository: Option<String>,
    /// API base URL, configurable for enterprise installs
    pub api_url: String,
    /// Bearer credential; never logged
    pub token: Option<String>,
}

fn default_major_keywords() -> Vec<String> {
    vec![
        "[BUMP-MAJOR]".to_string(),
        "bump-major".to_string(),
    ]
}

fn default_patch_keywords() -> Vec<String> {
    vec![
        "[hotfix]".to_string(),
        "[fix]".to_string(),
        "hotfix:".to_string(),
        "fix:".to_string(),
    ]
}

fn default_release_marker() -> String {
    "[RELEASE]".to_string()
}

fn default_skip_ci_marker() -> String {
    "[skip ci]".to_string()
}

/// Marker keywords for bump classification and release triggering.
///
/// The major/patch lists are matched case-insensitively against the first
/// line of the commit message; the release marker triggers a release cut
/// on the primary branch; the skip-ci marker is appended to the changelog
/// commit so it does not re-trigger the pipeline.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct KeywordsConfig {
    #[serde(default = "default_major_keywords")]
    pub major: Vec<String>,

    #[serde(default = "default_patch_keywords")]
    pub patch: Vec<String>,

    #[serde(default = "default_release_marker")]
    pub release_marker: String,

    #[serde(default = "default_skip_ci_marker")]
    pub skip_ci: String,
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        KeywordsConfig {
            major: default_major_keywords(),
            patch: default_patch_keywords(),
            release_marker: default_release_marker(),
            skip_ci: default_skip_ci_marker(),
        }
    }
}

fn default_identity_name() -> String {
    "gitflow-release".to_string()
}

fn default_identity_email() -> String {
    "gitflow-release@users.noreply.github.com".to_string()
}

/// Committer identity used for the changelog commit
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IdentityConfig {
    #[serde(default = "default_identity_name")]
    pub name: String,

    #[serde(default = "default_identity_email")]
    pub email: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        IdentityConfig {
            name: default_identity_name(),
            email: default_identity_email(),
        }
    }
}

fn default_changelog_path() -> String {
    "CHANGELOG.md".to_string()
}

/// Optional TOML override file (`gitflow-release.toml`)
#[derive(Debug, Deserialize, Serialize, Clone)]
struct Overrides {
    #[serde(default)]
    keywords: Option<KeywordsConfig>,

    #[serde(default)]
    identity: Option<IdentityConfig>,

    #[serde(default = "default_changelog_path")]
    changelog: String,
}

impl Default for Overrides {
    fn default() -> Self {
        Overrides {
            keywords: None,
            identity: None,
            changelog: default_changelog_path(),
        }
    }
}

impl Config {
    /// Build the configuration from the environment plus an optional
    /// override file.
    ///
    /// Override file lookup order: explicit path, `./gitflow-release.toml`,
    /// `<user config dir>/gitflow-release.toml`, then built-in defaults.
    /// Missing required inputs abort before any mutation.
    pub fn resolve(config_path: Option<&str>) -> Result<Self> {
        let overrides = load_overrides(config_path)?;

        let init_version = require_env("INPUT_INIT_VERSION")?;
        let init_version = Version::parse(&init_version).map_err(|e| {
            GitFlowError::config(format!("INPUT_INIT_VERSION is not a valid version: {}", e))
        })?;

        let primary_branch = require_env("INPUT_PRIMARY_BRANCH")?;

        let verbosity = match env_var("INPUT_LOG_LEVEL") {
            Some(level) => level
                .parse::<Verbosity>()
                .map_err(GitFlowError::config)?,
            None => Verbosity::Info,
        };

        let auto_release_branches = env_var("INPUT_AUTO_RELEASE_BRANCHES")
            .map(|s| {
                s.split(',')
                    .map(|b| b.trim().to_string())
                    .filter(|b| !b.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let config = Config {
            init_version,
            primary_branch,
            candidate_prefix: env_var("INPUT_TAG_PREFIX_CANDIDATE").unwrap_or_default(),
            release_prefix: env_var("INPUT_TAG_PREFIX_RELEASE").unwrap_or_default(),
            push_enabled: env_flag("INPUT_ENABLE_GIT_PUSH"),
            publish_enabled: env_flag("INPUT_ENABLE_GITHUB_RELEASE"),
            auto_release_branches,
            verbosity,
            remote: "origin".to_string(),
            github: GithubConfig {
                repository: env_var("GITHUB_REPOSITORY"),
                api_url: env_var("INPUT_GITHUB_API_URL")
                    .unwrap_or_else(|| "https://api.github.com".to_string()),
                token: env_var("INPUT_GITHUB_TOKEN"),
            },
            keywords: overrides.keywords.unwrap_or_default(),
            identity: overrides.identity.unwrap_or_default(),
            changelog_path: overrides.changelog,
        };

        config.validate()?;
        Ok(config)
    }

    /// Cross-field checks that cannot be expressed per input.
    ///
    /// Publishing needs the API credential and repository slug; the two
    /// tag families must be distinguishable by prefix.
    pub fn validate(&self) -> Result<()> {
        if self.candidate_prefix == self.release_prefix {
            return Err(GitFlowError::config(format!(
                "Candidate and release tag prefixes must differ (both are '{}')",
                self.candidate_prefix
            )));
        }

        if self.publish_enabled {
            if self.github.token.is_none() {
                return Err(GitFlowError::config(
                    "INPUT_GITHUB_TOKEN is required when INPUT_ENABLE_GITHUB_RELEASE is true",
                ));
            }
            if self.github.repository.is_none() {
                return Err(GitFlowError::config(
                    "GITHUB_REPOSITORY is required when INPUT_ENABLE_GITHUB_RELEASE is true",
                ));
            }
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn require_env(name: &str) -> Result<String> {
    env_var(name).ok_or_else(|| GitFlowError::config(format!("{} is required", name)))
}

fn env_flag(name: &str) -> bool {
    env_var(name).as_deref() == Some("true")
}

fn load_overrides(config_path: Option<&str>) -> Result<Overrides> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitflow-release.toml").exists() {
        fs::read_to_string("./gitflow-release.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("gitflow-release.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Overrides::default());
        }
    } else {
        return Ok(Overrides::default());
    };

    toml::from_str(&config_str)
        .map_err(|e| GitFlowError::config(format!("Invalid override file: {}", e)))
}
