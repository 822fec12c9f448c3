//! Run orchestration: gathers repository state, asks the strategy engine
//! for the action, then applies side effects in a fixed order.
//!
//! Application order is: tag creation, tag push, changelog commit and
//! push, release branch creation and push, release publishing. Effects
//! are best effort and sequential; a failure aborts the run and leaves
//! earlier effects in place, and a re-run is guarded by the tagged-HEAD
//! check.

use chrono::Local;

use crate::changelog::{self, Changelog};
use crate::config::Config;
use crate::domain::{BranchContext, ReleaseAction, Tag, TagFamily};
use crate::error::Result;
use crate::git::Repository;
use crate::outputs;
use crate::publish::ReleasePublisher;
use crate::strategy::{BranchStrategy, FamilyVersions};
use crate::ui::Reporter;

const SHORT_HASH_LEN: usize = 7;

/// Drives one complete invocation against a repository
pub struct Orchestrator<'a> {
    config: &'a Config,
    repo: &'a dyn Repository,
    publisher: Option<&'a dyn ReleasePublisher>,
    reporter: &'a Reporter,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        config: &'a Config,
        repo: &'a dyn Repository,
        publisher: Option<&'a dyn ReleasePublisher>,
        reporter: &'a Reporter,
    ) -> Self {
        Orchestrator {
            config,
            repo,
            publisher,
            reporter,
        }
    }

    /// Compute and apply the release action for the current HEAD.
    ///
    /// With `dry_run` the plan is reported and nothing is written.
    pub fn run(&self, dry_run: bool) -> Result<()> {
        // A tagged HEAD means a previous run already completed here.
        if let Some(existing) = self.repo.tag_at_head()? {
            self.reporter.warning(&format!(
                "HEAD is already tagged as '{}'; nothing to do",
                existing
            ));
            outputs::emit(&existing, self.reporter)?;
            return Ok(());
        }

        let branch = self.repo.current_branch()?;
        let message = self.repo.head_message()?;
        let head_hash = self.repo.head_hash()?;
        let short_hash: String = head_hash.chars().take(SHORT_HASH_LEN).collect();

        let (versions, previous_release) = self.scan_tag_families()?;
        self.reporter.debug(&format!(
            "Branch '{}', candidate {:?}, release {:?}",
            branch, versions.candidate, versions.release
        ));

        // A release run tags first and then advances HEAD with the
        // changelog commit, so that commit itself is never tagged. Its
        // skip-ci marker identifies it as bookkeeping for an already
        // completed run.
        if message.contains(&self.config.keywords.skip_ci) {
            self.reporter.warning(
                "HEAD is a release bookkeeping commit; nothing to do",
            );
            if let Some(tag) = &previous_release {
                outputs::emit(tag, self.reporter)?;
            }
            return Ok(());
        }

        let ctx = BranchContext::classify(&branch, &self.config.primary_branch);
        let strategy = BranchStrategy::new(self.config);
        let action = strategy.plan(&ctx, &message, versions, &short_hash, self.reporter);

        if dry_run {
            self.report_plan(&action);
            return Ok(());
        }

        self.apply(&action, &branch, previous_release.as_deref())?;

        if let Some(version) = action.output_version() {
            outputs::emit(&version, self.reporter)?;
        }

        Ok(())
    }

    /// Highest reachable version per family, plus the name of the newest
    /// release tag (the changelog range start).
    fn scan_tag_families(&self) -> Result<(FamilyVersions, Option<String>)> {
        // When one prefix extends the other, the longer one claims the tag.
        let (first, second) = if self.config.candidate_prefix.len() >= self.config.release_prefix.len()
        {
            (TagFamily::Candidate, TagFamily::Release)
        } else {
            (TagFamily::Release, TagFamily::Candidate)
        };

        let mut versions = FamilyVersions::default();
        let mut previous_release: Option<Tag> = None;

        for name in self.repo.reachable_tags()? {
            let (family, tag) = if let Some(tag) = self.parse_family(&name, first)? {
                (first, tag)
            } else if let Some(tag) = self.parse_family(&name, second)? {
                (second, tag)
            } else {
                continue;
            };

            match family {
                TagFamily::Candidate => {
                    if versions.candidate.map_or(true, |v| tag.version > v) {
                        versions.candidate = Some(tag.version);
                    }
                }
                TagFamily::Release => {
                    if versions.release.map_or(true, |v| tag.version > v) {
                        versions.release = Some(tag.version);
                        previous_release = Some(tag);
                    }
                }
            }
        }

        Ok((versions, previous_release.map(|t| t.name())))
    }

    fn parse_family(&self, name: &str, family: TagFamily) -> Result<Option<Tag>> {
        let prefix = match family {
            TagFamily::Candidate => &self.config.candidate_prefix,
            TagFamily::Release => &self.config.release_prefix,
        };
        Tag::parse_in_family(name, prefix)
    }

    fn report_plan(&self, action: &ReleaseAction) {
        self.reporter.status("Dry run; nothing will be written");

        match &action.tag {
            Some((tag, TagFamily::Candidate)) => {
                self.reporter.status(&format!("Would tag candidate {}", tag.name()))
            }
            Some((tag, TagFamily::Release)) => {
                self.reporter.status(&format!("Would tag release {}", tag.name()))
            }
            None => self.reporter.status("Would create no tag"),
        }

        if let Some(branch) = &action.release_branch {
            self.reporter.status(&format!("Would create branch {}", branch));
        }
        if action.update_changelog {
            self.reporter
                .status(&format!("Would update {}", self.config.changelog_path));
        }
        if action.publish {
            self.reporter.status("Would publish a release record");
        }
        if let Some(version) = action.output_version() {
            self.reporter.status(&format!("Would report version {}", version));
        }
    }

    fn apply(
        &self,
        action: &ReleaseAction,
        branch: &str,
        previous_release: Option<&str>,
    ) -> Result<()> {
        let Some((tag, _family)) = &action.tag else {
            return Ok(());
        };
        let tag_name = tag.name();

        self.repo.create_tag(&tag_name)?;
        self.reporter.success(&format!("Created tag {}", tag_name));

        if self.config.push_enabled {
            self.repo.push_tag(&self.config.remote, &tag_name)?;
            self.reporter.success(&format!("Pushed tag {}", tag_name));
        }

        let mut notes = format!("Release {}", tag_name);
        if action.update_changelog {
            notes = self.update_changelog(&tag_name, branch, previous_release)?;
        }

        if let Some(release_branch) = &action.release_branch {
            self.repo.create_branch(release_branch)?;
            self.reporter
                .success(&format!("Created branch {}", release_branch));

            if self.config.push_enabled {
                self.repo.push_branch(&self.config.remote, release_branch)?;
                self.reporter
                    .success(&format!("Pushed branch {}", release_branch));
            }
        }

        if action.publish && self.config.publish_enabled {
            if !self.config.push_enabled {
                self.reporter
                    .warning("Publishing skipped: the tag was not pushed");
            } else if let Some(publisher) = self.publisher {
                publisher.create_release(&tag_name, &notes)?;
                self.reporter
                    .success(&format!("Published release {}", tag_name));
            }
        }

        Ok(())
    }

    /// Build the entry for the commits since the previous release, prepend
    /// it to the changelog document and commit the result.
    ///
    /// Returns the rendered entry, which doubles as the release notes.
    fn update_changelog(
        &self,
        tag_name: &str,
        branch: &str,
        previous_release: Option<&str>,
    ) -> Result<String> {
        let commits = self.repo.commits_since(previous_release)?;
        let date = Local::now().date_naive();
        let entry = Changelog::build(tag_name, date, &commits).render();

        let path = self.repo.workdir()?.join(&self.config.changelog_path);
        changelog::prepend_entry(&path, &entry)?;

        let message = format!(
            "chore(release): version {} {}",
            tag_name, self.config.keywords.skip_ci
        );
        self.repo
            .commit_worktree(&message, &self.config.identity.name, &self.config.identity.email)?;
        self.reporter
            .success(&format!("Updated {}", self.config.changelog_path));

        if self.config.push_enabled {
            self.repo.push_branch(&self.config.remote, branch)?;
        }

        Ok(entry)
    }
}
