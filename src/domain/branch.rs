use regex::Regex;

/// Structural classification of the branch a run is operating on.
///
/// Exactly one of three kinds; everything downstream matches on this
/// closed variant instead of comparing branch-name strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// The configured primary branch (candidate tag family)
    Primary,
    /// A `release/<major>.<minor>` maintenance branch (release tag family)
    Release { major: u32, minor: u32 },
    /// Any other branch; builds get a synthetic identifier, never a tag
    Other,
}

/// A branch name together with its classified kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub kind: BranchKind,
}

impl BranchContext {
    /// Classify a branch name against the configured primary branch.
    ///
    /// Release branches must match `release/<digits>.<digits>` exactly; a
    /// branch like `release/1.4.1` or `release/next` is `Other`.
    pub fn classify(name: impl Into<String>, primary_branch: &str) -> Self {
        let name = name.into();

        let kind = if name == primary_branch {
            BranchKind::Primary
        } else if let Some((major, minor)) = parse_release_suffix(&name) {
            BranchKind::Release { major, minor }
        } else {
            BranchKind::Other
        };

        BranchContext { name, kind }
    }
}

fn parse_release_suffix(name: &str) -> Option<(u32, u32)> {
    let re = Regex::new(r"^release/(\d+)\.(\d+)$").ok()?;
    let captures = re.captures(name)?;
    let major = captures.get(1)?.as_str().parse::<u32>().ok()?;
    let minor = captures.get(2)?.as_str().parse::<u32>().ok()?;
    Some((major, minor))
}
