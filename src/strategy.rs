//! Branch Strategy Engine: the version-decision state machine.
//!
//! Given the classified branch, the HEAD commit message and the highest
//! existing version per tag family, decides which family to write, whether
//! a release branch must be created and whether publishing is required.
//! The engine only decides; it applies nothing itself.

use crate::classifier::CommitClassifier;
use crate::config::Config;
use crate::domain::{
    BranchContext, BranchKind, BumpClass, ReleaseAction, Tag, TagFamily, Version,
};
use crate::resolver;
use crate::ui::Reporter;

/// Highest existing version per tag family, as found reachable from HEAD.
/// `None` means the family has no tags yet and resolution bootstraps.
#[derive(Debug, Clone, Copy, Default)]
pub struct FamilyVersions {
    pub candidate: Option<Version>,
    pub release: Option<Version>,
}

/// Decides the `ReleaseAction` for one run
pub struct BranchStrategy<'a> {
    config: &'a Config,
    classifier: CommitClassifier,
}

impl<'a> BranchStrategy<'a> {
    pub fn new(config: &'a Config) -> Self {
        BranchStrategy {
            config,
            classifier: CommitClassifier::from_keywords(&config.keywords),
        }
    }

    /// Run the state machine over the branch kind.
    ///
    /// Every arm returns a fully populated action; fields are `None` or
    /// `false` where the effect does not apply to that branch kind.
    pub fn plan(
        &self,
        ctx: &BranchContext,
        message: &str,
        versions: FamilyVersions,
        short_hash: &str,
        reporter: &Reporter,
    ) -> ReleaseAction {
        match ctx.kind {
            BranchKind::Primary => self.plan_primary(ctx, message, versions, reporter),
            BranchKind::Release { major, minor } => {
                self.plan_release(major, minor, message, versions, reporter)
            }
            BranchKind::Other => self.plan_other(short_hash, reporter),
        }
    }

    fn plan_primary(
        &self,
        ctx: &BranchContext,
        message: &str,
        versions: FamilyVersions,
        reporter: &Reporter,
    ) -> ReleaseAction {
        let bump = self.classifier.classify(message, BumpClass::Minor);
        reporter.debug(&format!("Classified commit as {:?} bump", bump));

        let triggered = message.contains(&self.config.keywords.release_marker)
            || self.config.auto_release_branches.contains(&ctx.name);

        if triggered {
            // Release versions come from the release family only, never
            // from candidate pre-release counters.
            let version = resolver::resolve(versions.release, bump, None, self.config.init_version);
            let release_branch = format!("release/{}.{}", version.major, version.minor);
            reporter.status(&format!(
                "Release triggered on '{}': version {}",
                ctx.name, version
            ));

            return ReleaseAction {
                tag: Some((
                    Tag::new(&self.config.release_prefix, version),
                    TagFamily::Release,
                )),
                release_branch: Some(release_branch),
                publish: true,
                update_changelog: true,
                build_id: None,
            };
        }

        let version = resolver::resolve(versions.candidate, bump, None, self.config.init_version);
        reporter.status(&format!("Candidate version {}", version));

        ReleaseAction {
            tag: Some((
                Tag::new(&self.config.candidate_prefix, version),
                TagFamily::Candidate,
            )),
            release_branch: None,
            publish: false,
            update_changelog: false,
            build_id: None,
        }
    }

    fn plan_release(
        &self,
        major: u32,
        minor: u32,
        message: &str,
        versions: FamilyVersions,
        reporter: &Reporter,
    ) -> ReleaseAction {
        // Hard cap: release branches never widen scope beyond patches,
        // whatever the commit message claims.
        let bump = self.classifier.classify(message, BumpClass::Patch);
        if bump > BumpClass::Patch {
            reporter.warning(&format!(
                "{:?} bump demoted to Patch on release branch",
                bump
            ));
        }

        // A release branch with no prior tag seeds from its own suffix,
        // not from the global initial version.
        let seed = Version::new(major, minor, 0);
        let version = resolver::resolve(versions.release, bump, Some(BumpClass::Patch), seed);

        if (version.major, version.minor) != (major, minor) {
            reporter.warning(&format!(
                "Tag version family {}.{} does not match branch family {}.{}",
                version.major, version.minor, major, minor
            ));
        }
        reporter.status(&format!("Release version {}", version));

        ReleaseAction {
            tag: Some((
                Tag::new(&self.config.release_prefix, version),
                TagFamily::Release,
            )),
            release_branch: None,
            publish: true,
            update_changelog: false,
            build_id: None,
        }
    }

    fn plan_other(&self, short_hash: &str, reporter: &Reporter) -> ReleaseAction {
        let build_id = format!("sha/{}", short_hash);
        reporter.status(&format!(
            "Non-flow branch: build identifier {} (no tag will be created)",
            build_id
        ));

        ReleaseAction {
            tag: None,
            release_branch: None,
            publish: false,
            update_changelog: false,
            build_id: Some(build_id),
        }
    }
}
