use thiserror::Error;

/// Unified error type for gitflow-release operations.
///
/// Every fatal condition maps to one of these variants; none are silently
/// swallowed. Side-effect steps that fail leave earlier steps applied.
#[derive(Error, Debug)]
pub enum GitFlowError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Branch error: {0}")]
    Branch(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Release publishing failed: {0}")]
    Publish(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in gitflow-release
pub type Result<T> = std::result::Result<T, GitFlowError>;

impl GitFlowError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitFlowError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GitFlowError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        GitFlowError::Tag(msg.into())
    }

    /// Create a branch error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        GitFlowError::Branch(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        GitFlowError::Remote(msg.into())
    }

    /// Create a publish error with context
    pub fn publish(msg: impl Into<String>) -> Self {
        GitFlowError::Publish(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GitFlowError::config("missing INPUT_INIT_VERSION");
        assert_eq!(
            err.to_string(),
            "Configuration error: missing INPUT_INIT_VERSION"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GitFlowError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_constructors() {
        assert!(GitFlowError::version("test").to_string().contains("Version"));
        assert!(GitFlowError::tag("test").to_string().contains("Tag"));
        assert!(GitFlowError::branch("test").to_string().contains("Branch"));
        assert!(GitFlowError::publish("test")
            .to_string()
            .contains("publishing"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (GitFlowError::config("x"), "Configuration error"),
            (GitFlowError::version("x"), "Version parsing error"),
            (GitFlowError::tag("x"), "Tag error"),
            (GitFlowError::branch("x"), "Branch error"),
            (GitFlowError::remote("x"), "Remote operation failed"),
            (GitFlowError::publish("x"), "Release publishing failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
