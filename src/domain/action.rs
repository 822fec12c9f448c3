use crate::domain::tag::{Tag, TagFamily};

/// The computed, not-yet-applied bundle of side effects for one run.
///
/// Built once by the strategy engine, consumed once by the orchestrator.
/// The engine never applies effects itself; absent fields mean the effect
/// is not required for this branch kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAction {
    /// Tag to create, with the family it belongs to. `None` on non-flow
    /// branches, which never write to the version history.
    pub tag: Option<(Tag, TagFamily)>,
    /// Release branch to create (`release/<major>.<minor>`)
    pub release_branch: Option<String>,
    /// Whether a release record should be published for the tag
    pub publish: bool,
    /// Whether the changelog document should be updated
    pub update_changelog: bool,
    /// Synthetic build identifier for non-flow branches (`sha/<short>`)
    pub build_id: Option<String>,
}

impl ReleaseAction {
    /// The version string this run reports to the invoking environment:
    /// the tag name when one is written, the build identifier otherwise.
    pub fn output_version(&self) -> Option<String> {
        if let Some((tag, _)) = &self.tag {
            return Some(tag.name());
        }
        self.build_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::version::Version;

    #[test]
    fn test_output_version_from_tag() {
        let action = ReleaseAction {
            tag: Some((Tag::new("v", Version::new(1, 4, 3)), TagFamily::Release)),
            release_branch: Some("release/1.4".to_string()),
            publish: true,
            update_changelog: true,
            build_id: None,
        };
        assert_eq!(action.output_version(), Some("v1.4.3".to_string()));
    }

    #[test]
    fn test_output_version_from_build_id() {
        let action = ReleaseAction {
            tag: None,
            release_branch: None,
            publish: false,
            update_changelog: false,
            build_id: Some("sha/abc1234".to_string()),
        };
        assert_eq!(action.output_version(), Some("sha/abc1234".to_string()));
    }
}
