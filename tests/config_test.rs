//! Tests for configuration resolution from the CI environment contract.

use std::io::Write;

use serial_test::serial;
use tempfile::NamedTempFile;

use gitflow_release::config::Config;
use gitflow_release::domain::Version;
use gitflow_release::ui::Verbosity;

const ALL_INPUTS: &[&str] = &[
    "INPUT_INIT_VERSION",
    "INPUT_PRIMARY_BRANCH",
    "INPUT_TAG_PREFIX_CANDIDATE",
    "INPUT_TAG_PREFIX_RELEASE",
    "INPUT_ENABLE_GIT_PUSH",
    "INPUT_ENABLE_GITHUB_RELEASE",
    "INPUT_AUTO_RELEASE_BRANCHES",
    "INPUT_LOG_LEVEL",
    "INPUT_GITHUB_TOKEN",
    "INPUT_GITHUB_API_URL",
    "GITHUB_REPOSITORY",
];

fn clear_env() {
    for name in ALL_INPUTS {
        std::env::remove_var(name);
    }
}

fn set_required() {
    std::env::set_var("INPUT_INIT_VERSION", "0.1.0");
    std::env::set_var("INPUT_PRIMARY_BRANCH", "main");
    std::env::set_var("INPUT_TAG_PREFIX_CANDIDATE", "rc/");
    std::env::set_var("INPUT_TAG_PREFIX_RELEASE", "v");
}

#[test]
#[serial]
fn test_resolve_minimal_environment() {
    clear_env();
    set_required();

    let config = Config::resolve(None).unwrap();

    assert_eq!(config.init_version, Version::new(0, 1, 0));
    assert_eq!(config.primary_branch, "main");
    assert_eq!(config.candidate_prefix, "rc/");
    assert_eq!(config.release_prefix, "v");
    assert!(!config.push_enabled);
    assert!(!config.publish_enabled);
    assert!(config.auto_release_branches.is_empty());
    assert_eq!(config.verbosity, Verbosity::Info);
    assert_eq!(config.remote, "origin");
    assert_eq!(config.github.api_url, "https://api.github.com");
    assert_eq!(config.changelog_path, "CHANGELOG.md");

    clear_env();
}

#[test]
#[serial]
fn test_resolve_missing_required_input() {
    clear_env();
    std::env::set_var("INPUT_PRIMARY_BRANCH", "main");

    let err = Config::resolve(None).unwrap_err();
    assert!(err.to_string().contains("INPUT_INIT_VERSION"));

    clear_env();
}

#[test]
#[serial]
fn test_resolve_rejects_malformed_init_version() {
    clear_env();
    set_required();
    std::env::set_var("INPUT_INIT_VERSION", "one.two.three");

    assert!(Config::resolve(None).is_err());

    clear_env();
}

#[test]
#[serial]
fn test_resolve_flags_and_lists() {
    clear_env();
    set_required();
    std::env::set_var("INPUT_ENABLE_GIT_PUSH", "true");
    std::env::set_var("INPUT_ENABLE_GITHUB_RELEASE", "false");
    std::env::set_var("INPUT_AUTO_RELEASE_BRANCHES", "main, stable,");
    std::env::set_var("INPUT_LOG_LEVEL", "debug");

    let config = Config::resolve(None).unwrap();

    assert!(config.push_enabled);
    assert!(!config.publish_enabled);
    assert_eq!(
        config.auto_release_branches,
        vec!["main".to_string(), "stable".to_string()]
    );
    assert_eq!(config.verbosity, Verbosity::Debug);

    clear_env();
}

#[test]
#[serial]
fn test_resolve_publish_requires_credentials() {
    clear_env();
    set_required();
    std::env::set_var("INPUT_ENABLE_GITHUB_RELEASE", "true");

    assert!(Config::resolve(None).is_err());

    std::env::set_var("INPUT_GITHUB_TOKEN", "token");
    std::env::set_var("GITHUB_REPOSITORY", "owner/repo");
    let config = Config::resolve(None).unwrap();
    assert!(config.publish_enabled);
    assert_eq!(config.github.repository, Some("owner/repo".to_string()));

    clear_env();
}

#[test]
#[serial]
fn test_resolve_rejects_equal_prefixes() {
    clear_env();
    set_required();
    std::env::set_var("INPUT_TAG_PREFIX_CANDIDATE", "v");
    std::env::set_var("INPUT_TAG_PREFIX_RELEASE", "v");

    assert!(Config::resolve(None).is_err());

    clear_env();
}

#[test]
#[serial]
fn test_resolve_with_override_file() {
    clear_env();
    set_required();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
changelog = "docs/CHANGES.md"

[keywords]
release_marker = "[SHIP]"

[identity]
name = "release-bot"
email = "bot@example.com"
"#
    )
    .unwrap();
    file.flush().unwrap();

    let config = Config::resolve(file.path().to_str()).unwrap();

    assert_eq!(config.changelog_path, "docs/CHANGES.md");
    assert_eq!(config.keywords.release_marker, "[SHIP]");
    // Unlisted keyword lists keep their defaults
    assert!(config.keywords.patch.contains(&"fix:".to_string()));
    assert_eq!(config.identity.name, "release-bot");

    clear_env();
}

#[test]
#[serial]
fn test_resolve_enterprise_api_url() {
    clear_env();
    set_required();
    std::env::set_var("INPUT_GITHUB_API_URL", "https://github.example.com/api/v3");

    let config = Config::resolve(None).unwrap();
    assert_eq!(config.github.api_url, "https://github.example.com/api/v3");

    clear_env();
}
