use std::path::PathBuf;
use std::sync::Mutex;

use crate::domain::CommitRecord;
use crate::error::{GitFlowError, Result};
use crate::git::Repository;

/// Mock repository for testing without actual git operations.
///
/// Query state is configured up front; side effects are recorded in an
/// operation log so tests can assert on what the orchestrator did and in
/// which order.
pub struct MockRepository {
    branch: String,
    head_hash: String,
    head_message: String,
    head_tag: Option<String>,
    tags: Mutex<Vec<String>>,
    branches: Mutex<Vec<String>>,
    commits: Vec<CommitRecord>,
    operations: Mutex<Vec<String>>,
    workdir: PathBuf,
}

impl MockRepository {
    /// Create an empty mock positioned on `main` with a fixed HEAD
    pub fn new() -> Self {
        MockRepository {
            branch: "main".to_string(),
            head_hash: "0123456789abcdef0123456789abcdef01234567".to_string(),
            head_message: "initial commit".to_string(),
            head_tag: None,
            tags: Mutex::new(Vec::new()),
            branches: Mutex::new(Vec::new()),
            commits: Vec::new(),
            operations: Mutex::new(Vec::new()),
            workdir: std::env::temp_dir(),
        }
    }

    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.branch = branch.into();
    }

    pub fn set_head(&mut self, hash: impl Into<String>, message: impl Into<String>) {
        self.head_hash = hash.into();
        self.head_message = message.into();
    }

    /// Mark HEAD as already tagged (idempotency scenarios)
    pub fn set_head_tag(&mut self, tag: impl Into<String>) {
        self.head_tag = Some(tag.into());
    }

    /// Add a pre-existing reachable tag
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.lock().unwrap().push(name.into());
    }

    /// Add a commit to the range returned by `commits_since`
    pub fn add_commit(&mut self, record: CommitRecord) {
        self.commits.push(record);
    }

    pub fn set_workdir(&mut self, path: impl Into<PathBuf>) {
        self.workdir = path.into();
    }

    /// Recorded side effects, in application order
    pub fn operations(&self) -> Vec<String> {
        self.operations.lock().unwrap().clone()
    }

    fn record(&self, op: String) {
        self.operations.lock().unwrap().push(op);
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn head_hash(&self) -> Result<String> {
        Ok(self.head_hash.clone())
    }

    fn head_message(&self) -> Result<String> {
        Ok(self.head_message.clone())
    }

    fn tag_at_head(&self) -> Result<Option<String>> {
        Ok(self.head_tag.clone())
    }

    fn reachable_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.lock().unwrap().clone())
    }

    fn commits_since(&self, _tag: Option<&str>) -> Result<Vec<CommitRecord>> {
        Ok(self.commits.clone())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let mut tags = self.tags.lock().unwrap();
        if tags.iter().any(|t| t == name) {
            return Err(GitFlowError::tag(format!("Tag '{}' already exists", name)));
        }
        tags.push(name.to_string());
        self.record(format!("create_tag {}", name));
        Ok(())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        let mut branches = self.branches.lock().unwrap();
        if branches.iter().any(|b| b == name) {
            return Err(GitFlowError::branch(format!(
                "Branch '{}' already exists",
                name
            )));
        }
        branches.push(name.to_string());
        self.record(format!("create_branch {}", name));
        Ok(())
    }

    fn commit_worktree(&self, message: &str, _name: &str, _email: &str) -> Result<()> {
        self.record(format!("commit_worktree {}", message));
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()> {
        self.record(format!("push_tag {} {}", remote, tag_name));
        Ok(())
    }

    fn push_branch(&self, remote: &str, branch_name: &str) -> Result<()> {
        self.record(format!("push_branch {} {}", remote, branch_name));
        Ok(())
    }

    fn workdir(&self) -> Result<PathBuf> {
        Ok(self.workdir.clone())
    }
}
