use git2::{ObjectType, Oid, Repository as Git2Repo, Signature};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::CommitRecord;
use crate::error::{GitFlowError, Result};
use crate::git::Repository;

const SHORT_HASH_LEN: usize = 7;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Ok(Git2Repository { repo })
    }

    fn head_commit(&self) -> Result<git2::Commit<'_>> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit)
    }

    /// Map of peeled tag targets to the tag names pointing at them.
    /// Handles both lightweight and annotated tags.
    fn tag_targets(&self) -> Result<HashMap<Oid, Vec<String>>> {
        let mut targets: HashMap<Oid, Vec<String>> = HashMap::new();
        let tags = self.repo.tag_names(None)?;

        for tag_name in tags.iter().flatten() {
            if let Ok(tag_ref) = self.repo.find_reference(&format!("refs/tags/{}", tag_name)) {
                if let Ok(tag_obj) = tag_ref.peel(ObjectType::Any) {
                    targets
                        .entry(tag_obj.id())
                        .or_default()
                        .push(tag_name.to_string());
                }
            }
        }

        Ok(targets)
    }

    fn commit_record(&self, oid: Oid) -> Result<CommitRecord> {
        let commit = self.repo.find_commit(oid)?;
        let hash = oid.to_string();
        let short_hash = hash.chars().take(SHORT_HASH_LEN).collect();
        let message = commit.message().unwrap_or("(empty message)").to_string();
        let author = commit.author().name().unwrap_or("unknown").to_string();

        Ok(CommitRecord {
            hash,
            short_hash,
            message,
            author,
            timestamp: commit.time().seconds(),
        })
    }
}

impl Repository for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        head.shorthand()
            .map(|s| s.to_string())
            .ok_or_else(|| GitFlowError::branch("HEAD is not on a named branch"))
    }

    fn head_hash(&self) -> Result<String> {
        Ok(self.head_commit()?.id().to_string())
    }

    fn head_message(&self) -> Result<String> {
        Ok(self
            .head_commit()?
            .message()
            .unwrap_or("(empty message)")
            .to_string())
    }

    fn tag_at_head(&self) -> Result<Option<String>> {
        let head_oid = self.head_commit()?.id();
        let targets = self.tag_targets()?;

        Ok(targets
            .get(&head_oid)
            .and_then(|names| names.first().cloned()))
    }

    fn reachable_tags(&self) -> Result<Vec<String>> {
        let head_oid = self.head_commit()?.id();
        let targets = self.tag_targets()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(head_oid)?;

        let mut tags = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            if let Some(names) = targets.get(&oid) {
                tags.extend(names.iter().cloned());
            }
        }

        Ok(tags)
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitRecord>> {
        let head_oid = self.head_commit()?.id();

        let stop_oid = match tag {
            Some(tag_name) => self
                .repo
                .find_reference(&format!("refs/tags/{}", tag_name))
                .ok()
                .and_then(|r| r.peel(ObjectType::Any).ok())
                .map(|obj| obj.id()),
            None => None,
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(head_oid)?;

        // Newest first; the changelog builder keeps this order.
        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            if Some(oid) == stop_oid {
                break;
            }
            commits.push(self.commit_record(oid)?);
        }

        Ok(commits)
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        if self
            .repo
            .find_reference(&format!("refs/tags/{}", name))
            .is_ok()
        {
            return Err(GitFlowError::tag(format!("Tag '{}' already exists", name)));
        }

        let head = self.head_commit()?;
        self.repo
            .tag_lightweight(name, head.as_object(), false)
            .map_err(|e| GitFlowError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        let head = self.head_commit()?;
        self.repo.branch(name, &head, false).map_err(|e| {
            if e.code() == git2::ErrorCode::Exists {
                GitFlowError::branch(format!("Branch '{}' already exists", name))
            } else {
                GitFlowError::branch(format!("Cannot create branch '{}': {}", name, e))
            }
        })?;

        Ok(())
    }

    fn commit_worktree(&self, message: &str, name: &str, email: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = Signature::now(name, email)?;
        let parent = self.head_commit()?;

        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;

        Ok(())
    }

    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|e| GitFlowError::remote(format!("Cannot find remote: {}", e)))?;

        let refspec = format!("refs/tags/{}:refs/tags/{}", tag_name, tag_name);
        remote
            .push(&[refspec.as_str()], None)
            .map_err(|e| GitFlowError::remote(format!("Tag push failed: {}", e)))?;

        Ok(())
    }

    fn push_branch(&self, remote: &str, branch_name: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|e| GitFlowError::remote(format!("Cannot find remote: {}", e)))?;

        let refspec = format!("refs/heads/{}:refs/heads/{}", branch_name, branch_name);
        remote
            .push(&[refspec.as_str()], None)
            .map_err(|e| GitFlowError::remote(format!("Branch push failed: {}", e)))?;

        Ok(())
    }

    fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(|p| p.to_path_buf())
            .ok_or_else(|| GitFlowError::config("Repository has no work tree"))
    }
}

// SAFETY: Git2Repository wraps git2::Repository which is Send.
// git2 is thread-safe for these operations via libgit2's thread-safe design,
// and this tool runs a single synchronous invocation.
unsafe impl Sync for Git2Repository {}
