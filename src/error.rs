//! Error types for release upload operations.
//!
//! Every failure surfaces as a [`ReleaseError`]. The uploader never re-wraps
//! an error it receives from a collaborator, so callers can match on the
//! variant produced at the point of failure.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release upload operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release upload operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// GitHub API errors
    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    /// Local artifact errors
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// GitHub API errors
#[derive(Error, Debug)]
pub enum GitHubError {
    /// The request never produced a response
    #[error("GitHub request failed: {operation} - {reason}")]
    RequestFailed {
        /// Operation that failed
        operation: String,
        /// Reason for the error
        reason: String,
    },

    /// GitHub answered with a non-success status
    #[error("GitHub returned {status} for {operation}: {message}")]
    UnexpectedStatus {
        /// Operation that failed
        operation: String,
        /// HTTP status code
        status: u16,
        /// Message reported by GitHub
        message: String,
    },

    /// Upload URL could not be parsed
    #[error("Invalid upload URL '{url}': {reason}")]
    InvalidUploadUrl {
        /// URL as supplied
        url: String,
        /// Reason for the error
        reason: String,
    },
}

/// Local artifact errors
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// Artifact file missing or unreadable
    #[error("Failed to read artifact {path}: {source}")]
    ReadFailed {
        /// Path of the artifact
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No GitHub token available
    #[error("GitHub token not provided. Set GH_TOKEN or GITHUB_TOKEN")]
    MissingToken,

    /// Repository string is not `owner/repo`
    #[error("Invalid GitHub repository '{value}'. Expected: owner/repo")]
    InvalidRepository {
        /// Value as supplied
        value: String,
    },

    /// API base URL could not be parsed
    #[error("Invalid GitHub API URL '{value}': {reason}")]
    InvalidApiUrl {
        /// Value as supplied
        value: String,
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::GitHub(GitHubError::UnexpectedStatus { status: 401, .. }) => vec![
                "Verify the GitHub token is valid and not expired".to_string(),
                "Set GH_TOKEN or GITHUB_TOKEN to a token with repo scope".to_string(),
            ],
            ReleaseError::GitHub(GitHubError::UnexpectedStatus { status: 403, .. }) => vec![
                "Check the token has write access to the repository".to_string(),
            ],
            ReleaseError::GitHub(GitHubError::UnexpectedStatus { status: 404, .. }) => vec![
                "Check the release id and repository are correct".to_string(),
                "Check the asset has not already been deleted".to_string(),
            ],
            ReleaseError::GitHub(GitHubError::UnexpectedStatus { status: 422, .. }) => vec![
                "An asset with this name may already exist on the release".to_string(),
                "Enable replace mode to delete existing assets before upload".to_string(),
            ],
            ReleaseError::Artifact(ArtifactError::ReadFailed { path, .. }) => vec![
                format!("Check that {} exists and is readable", path.display()),
            ],
            ReleaseError::Config(ConfigError::MissingToken) => vec![
                "Export GH_TOKEN or GITHUB_TOKEN before running".to_string(),
            ],
            ReleaseError::Config(ConfigError::InvalidRepository { .. }) => vec![
                "Set GITHUB_REPOSITORY in the form owner/repo".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ReleaseError::Config(_)
                | ReleaseError::GitHub(GitHubError::InvalidUploadUrl { .. })
                | ReleaseError::GitHub(GitHubError::UnexpectedStatus { status: 401, .. })
        )
    }
}
