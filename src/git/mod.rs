//! Git operations abstraction layer.
//!
//! The version-control store is an external collaborator: everything the
//! release flow needs from it goes through the [Repository] trait, with a
//! real `git2`-backed implementation and a mock for tests.
//!
//! - [repository::Git2Repository]: real implementation using the `git2` crate
//! - [mock::MockRepository]: in-memory implementation for testing

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::PathBuf;

use crate::domain::CommitRecord;
use crate::error::Result;

/// Common git operation trait for abstraction.
///
/// All implementors must be `Send + Sync`. Implementations map underlying
/// errors (like `git2::Error`) to the appropriate
/// [crate::error::GitFlowError] variants; reference conflicts on creation
/// surface as `Tag`/`Branch` errors.
pub trait Repository: Send + Sync {
    /// Name of the currently checked-out branch
    fn current_branch(&self) -> Result<String>;

    /// Full hash of the HEAD commit
    fn head_hash(&self) -> Result<String>;

    /// Complete message of the HEAD commit
    fn head_message(&self) -> Result<String>;

    /// Tag name pointing exactly at HEAD, if any.
    ///
    /// Used for the idempotency check: a tagged HEAD means a previous run
    /// already completed and the invocation no-ops.
    fn tag_at_head(&self) -> Result<Option<String>>;

    /// All tag names whose target is reachable from HEAD.
    ///
    /// Family filtering and version parsing happen in the caller; this
    /// only answers "which tags exist in this history".
    fn reachable_tags(&self) -> Result<Vec<String>>;

    /// Commits from HEAD back to (but excluding) the given tag's commit,
    /// or the whole reachable history when `tag` is `None`.
    ///
    /// Order is the revwalk's own: newest first. The changelog builder
    /// relies on this order; do not reverse it.
    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitRecord>>;

    /// Create a lightweight tag at HEAD. An existing tag of the same name
    /// is a fatal `Tag` conflict.
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Create a branch at HEAD without switching to it. An existing
    /// branch of the same name is a fatal `Branch` conflict.
    fn create_branch(&self, name: &str) -> Result<()>;

    /// Stage the whole work tree and commit it on the current branch
    fn commit_worktree(&self, message: &str, name: &str, email: &str) -> Result<()>;

    /// Push a tag ref to the remote
    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()>;

    /// Push a branch ref to the remote
    fn push_branch(&self, remote: &str, branch_name: &str) -> Result<()>;

    /// Root of the work tree, for documents like the changelog
    fn workdir(&self) -> Result<PathBuf>;
}
