//! Integration tests for the git2-backed repository against real
//! repositories created in temporary directories.

use std::fs;
use std::path::Path;

use gitflow_release::git::{Git2Repository, Repository};

fn init_repo(dir: &Path) -> git2::Repository {
    let mut opts = git2::RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = git2::Repository::init_opts(dir, &opts).unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test Author").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    repo
}

fn commit_file(repo: &git2::Repository, file: &str, message: &str) -> git2::Oid {
    let workdir = repo.workdir().unwrap();
    fs::write(workdir.join(file), message).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(file)).unwrap();
    index.write().unwrap();

    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let signature = git2::Signature::now("Test Author", "test@example.com").unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .unwrap()
}

fn tag_head(repo: &git2::Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.tag_lightweight(name, head.as_object(), false).unwrap();
}

#[test]
fn test_current_branch_and_head() {
    let dir = tempfile::tempdir().unwrap();
    let raw = init_repo(dir.path());
    let oid = commit_file(&raw, "a.txt", "feat: add X");

    let repo = Git2Repository::open(dir.path()).unwrap();
    assert_eq!(repo.current_branch().unwrap(), "main");
    assert_eq!(repo.head_hash().unwrap(), oid.to_string());
    assert_eq!(repo.head_message().unwrap(), "feat: add X");
}

#[test]
fn test_tag_at_head() {
    let dir = tempfile::tempdir().unwrap();
    let raw = init_repo(dir.path());
    commit_file(&raw, "a.txt", "feat: add X");

    let repo = Git2Repository::open(dir.path()).unwrap();
    assert!(repo.tag_at_head().unwrap().is_none());

    tag_head(&raw, "v1.0.0");
    assert_eq!(repo.tag_at_head().unwrap(), Some("v1.0.0".to_string()));

    // A new commit moves HEAD past the tag
    commit_file(&raw, "b.txt", "fix: crash");
    assert!(repo.tag_at_head().unwrap().is_none());
}

#[test]
fn test_reachable_tags_excludes_other_histories() {
    let dir = tempfile::tempdir().unwrap();
    let raw = init_repo(dir.path());
    commit_file(&raw, "a.txt", "feat: add X");
    tag_head(&raw, "v1.0.0");

    // Tag a side branch; it must not be visible from main
    let head = raw.head().unwrap().peel_to_commit().unwrap();
    raw.branch("side", &head, false).unwrap();
    raw.set_head("refs/heads/side").unwrap();
    commit_file(&raw, "side.txt", "feat: side work");
    tag_head(&raw, "v9.9.9");

    raw.set_head("refs/heads/main").unwrap();
    raw.checkout_head(Some(git2::build::CheckoutBuilder::new().force()))
        .unwrap();
    commit_file(&raw, "b.txt", "fix: crash");
    tag_head(&raw, "rc/1.1.0");

    let repo = Git2Repository::open(dir.path()).unwrap();
    let mut tags = repo.reachable_tags().unwrap();
    tags.sort();
    assert_eq!(tags, vec!["rc/1.1.0".to_string(), "v1.0.0".to_string()]);
}

#[test]
fn test_commits_since_stops_at_tag_and_orders_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let raw = init_repo(dir.path());
    commit_file(&raw, "a.txt", "feat: first");
    tag_head(&raw, "v1.0.0");
    commit_file(&raw, "b.txt", "fix: second");
    commit_file(&raw, "c.txt", "feat: third");

    let repo = Git2Repository::open(dir.path()).unwrap();
    let commits = repo.commits_since(Some("v1.0.0")).unwrap();

    let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
    assert_eq!(messages, vec!["feat: third", "fix: second"]);
    assert_eq!(commits[0].short_hash.len(), 7);
    assert_eq!(commits[0].author, "Test Author");
}

#[test]
fn test_commits_since_without_tag_walks_everything() {
    let dir = tempfile::tempdir().unwrap();
    let raw = init_repo(dir.path());
    commit_file(&raw, "a.txt", "feat: first");
    commit_file(&raw, "b.txt", "fix: second");

    let repo = Git2Repository::open(dir.path()).unwrap();
    let commits = repo.commits_since(None).unwrap();
    assert_eq!(commits.len(), 2);
}

#[test]
fn test_create_tag_and_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let raw = init_repo(dir.path());
    commit_file(&raw, "a.txt", "feat: add X");

    let repo = Git2Repository::open(dir.path()).unwrap();
    repo.create_tag("v1.0.0").unwrap();
    assert_eq!(repo.tag_at_head().unwrap(), Some("v1.0.0".to_string()));

    let err = repo.create_tag("v1.0.0").unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[test]
fn test_create_branch_stays_on_current_branch() {
    let dir = tempfile::tempdir().unwrap();
    let raw = init_repo(dir.path());
    commit_file(&raw, "a.txt", "feat: add X");

    let repo = Git2Repository::open(dir.path()).unwrap();
    repo.create_branch("release/1.0").unwrap();

    assert_eq!(repo.current_branch().unwrap(), "main");
    assert!(raw.find_branch("release/1.0", git2::BranchType::Local).is_ok());

    let err = repo.create_branch("release/1.0").unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[test]
fn test_commit_worktree_stages_everything() {
    let dir = tempfile::tempdir().unwrap();
    let raw = init_repo(dir.path());
    commit_file(&raw, "a.txt", "feat: add X");

    fs::write(dir.path().join("CHANGELOG.md"), "## v1.0.0\n").unwrap();

    let repo = Git2Repository::open(dir.path()).unwrap();
    repo.commit_worktree(
        "chore(release): version v1.0.0 [skip ci]",
        "gitflow-release",
        "gitflow-release@users.noreply.github.com",
    )
    .unwrap();

    assert_eq!(
        repo.head_message().unwrap(),
        "chore(release): version v1.0.0 [skip ci]"
    );
    let commits = repo.commits_since(None).unwrap();
    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].author, "gitflow-release");
}

#[test]
fn test_workdir_points_at_the_work_tree() {
    let dir = tempfile::tempdir().unwrap();
    let raw = init_repo(dir.path());
    commit_file(&raw, "a.txt", "feat: add X");

    let repo = Git2Repository::open(dir.path()).unwrap();
    let workdir = repo.workdir().unwrap();
    assert!(workdir.join("a.txt").exists());
}
