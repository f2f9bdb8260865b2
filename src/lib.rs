//! # Release Uploader
//!
//! Upload local build artifacts to a GitHub release.
//!
//! Each [`Artifact`] is uploaded under the final segment of its path. In
//! replace mode, assets already attached to the release with the same name
//! are deleted first, and every delete completes before the first upload.
//! Any failure ends the batch and is returned unchanged; work already done on
//! the release is kept.
//!
//! ## Usage
//!
//! ```no_run
//! use release_uploader::{
//!     Artifact, ArtifactUploader, GitHubReleasesConfig, GithubArtifactUploader, GithubReleases,
//!     Releases,
//! };
//!
//! # async fn run() -> release_uploader::Result<()> {
//! let releases = GithubReleases::new(GitHubReleasesConfig::from_env()?)?;
//! let release = releases.get_by_tag("v1.2.0").await?;
//!
//! let uploader = GithubArtifactUploader::new(releases, true);
//! let artifacts = [Artifact::new("dist/app-x86_64.tar.gz")];
//! uploader
//!     .upload_artifacts(&artifacts, release.id, &release.upload_url)
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod artifact;
pub mod error;
pub mod github;
pub mod uploader;

pub use artifact::{Artifact, ArtifactPayload};
pub use error::{ArtifactError, ConfigError, GitHubError, ReleaseError, Result};
pub use github::{
    GitHubReleasesConfig, GithubReleases, RAW_CONTENT_TYPE, Release, ReleaseOptions, Releases,
    RemoteAsset,
};
pub use uploader::{ArtifactUploader, GithubArtifactUploader};
