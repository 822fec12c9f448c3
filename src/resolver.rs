//! Version Resolver: next version from the current family version and a
//! bump class, with branch-policy ceilings applied here rather than in the
//! classifier so the two stay independently testable.

use crate::domain::{BumpClass, Version};

/// Compute the next version for a tag family.
///
/// - `current`: highest existing version in the family, `None` when the
///   family has no tags yet.
/// - `ceiling`: policy-imposed maximum bump class (release branches cap at
///   Patch); a stronger computed bump is clamped down and recomputed.
/// - Bootstrap: with no current version the configured `initial` is
///   returned verbatim and the bump class is ignored.
///
/// Candidate counters on `current` are stripped before bumping; release
/// versions are never derived from pre-release labels.
pub fn resolve(
    current: Option<Version>,
    bump: BumpClass,
    ceiling: Option<BumpClass>,
    initial: Version,
) -> Version {
    let Some(current) = current else {
        return initial;
    };

    let effective = match ceiling {
        Some(ceiling) => bump.min(ceiling),
        None => bump,
    };

    current.base().bump(effective)
}
