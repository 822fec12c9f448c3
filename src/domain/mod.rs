//! Domain logic - pure business rules independent of git operations

pub mod action;
pub mod branch;
pub mod commit;
pub mod tag;
pub mod version;

pub use action::ReleaseAction;
pub use branch::{BranchContext, BranchKind};
pub use commit::{CommitKind, CommitRecord};
pub use tag::{Tag, TagFamily};
pub use version::{BumpClass, Version};
