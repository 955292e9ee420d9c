use super::{ErrorCode, RepoSyncError};

/// Extension trait for convenient error conversion
pub trait ErrorExt<T> {
    /// Convert to RepoSyncError with context
    fn to_reposync(self, context: impl Into<String>) -> Result<T, RepoSyncError>;

    /// Convert to RepoSyncError with specific error type
    fn to_config_error(self, message: impl Into<String>) -> Result<T, RepoSyncError>;
}

impl<T, E> ErrorExt<T> for Result<T, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn to_reposync(self, context: impl Into<String>) -> Result<T, RepoSyncError> {
        self.map_err(|e| RepoSyncError::other(context).with_source(e))
    }

    fn to_config_error(self, message: impl Into<String>) -> Result<T, RepoSyncError> {
        self.map_err(|e| RepoSyncError::config(message).with_source(e))
    }
}

/// Helper functions for common error scenarios
pub mod common {
    use super::*;
    use std::path::Path;

    /// Manifest or settings file does not exist
    pub fn config_not_found(path: impl AsRef<Path>) -> RepoSyncError {
        RepoSyncError::config_with_code(
            ErrorCode::CONFIG_NOT_FOUND,
            format!("File not found: {}", path.as_ref().display()),
        )
    }

    /// A required manifest field is absent or null
    pub fn missing_required_field(field: &str) -> RepoSyncError {
        RepoSyncError::config_with_code(
            ErrorCode::CONFIG_MISSING_REQUIRED,
            format!("Required field '{}' is missing", field),
        )
    }

    /// The git executable could not be run
    pub fn git_unavailable(program: &str) -> RepoSyncError {
        RepoSyncError::git(
            ErrorCode::GIT_UNAVAILABLE,
            format!("'{}' could not be executed; is git installed?", program),
            "preflight",
        )
    }

    /// A checkout's origin does not match its manifest entry
    pub fn remote_mismatch(dir: &Path, expected: &str, actual: &str) -> RepoSyncError {
        RepoSyncError::validation_with_code(
            ErrorCode::VALIDATION_REMOTE_MISMATCH,
            format!(
                "{}: remote.origin.url is '{}' but the manifest expects '{}'",
                dir.display(),
                actual,
                expected
            ),
            Some(dir.display().to_string()),
        )
    }
}
