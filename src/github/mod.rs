//! GitHub integration for release asset operations

mod client;
mod config;
mod releases;

pub use client::GithubReleases;
pub use config::{DEFAULT_API_URL, GitHubReleasesConfig, parse_repository};
pub use releases::{RAW_CONTENT_TYPE, Release, ReleaseOptions, Releases, RemoteAsset};
