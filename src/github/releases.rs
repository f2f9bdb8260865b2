//! The release collaborator contract and the records it exchanges.

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content type sent with every asset upload
pub const RAW_CONTENT_TYPE: &str = "raw";

/// A GitHub release
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Release {
    /// Release ID
    pub id: u64,
    /// Tag the release points at
    pub tag_name: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Release notes
    #[serde(default)]
    pub body: Option<String>,
    /// Whether the release is a draft
    #[serde(default)]
    pub draft: bool,
    /// Whether the release is a prerelease
    #[serde(default)]
    pub prerelease: bool,
    /// Commit or branch the tag is created from
    #[serde(default)]
    pub target_commitish: Option<String>,
    /// Templated asset upload URL
    #[serde(default)]
    pub upload_url: String,
    /// Release page URL
    #[serde(default)]
    pub html_url: String,
    /// Publication time, absent for drafts
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Assets already attached to the release
    #[serde(default)]
    pub assets: Vec<RemoteAsset>,
}

/// An asset already attached to a release
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RemoteAsset {
    /// Asset ID
    pub id: u64,
    /// Asset file name
    pub name: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// Public download URL
    #[serde(default)]
    pub browser_download_url: String,
}

impl RemoteAsset {
    /// Create an asset record with only the fields the uploader matches on
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            size: 0,
            browser_download_url: String::new(),
        }
    }
}

/// Optional fields shared by release creation and update
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ReleaseOptions {
    /// Release notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Commit the tag is created from
    #[serde(rename = "target_commitish", skip_serializing_if = "Option::is_none")]
    pub commit_hash: Option<String>,
    /// Create or keep the release as a draft
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Mark as prerelease
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<bool>,
}

/// Release management operations against a remote host
///
/// This is the whole network boundary: the uploader only ever talks to the
/// remote through this trait, so tests can substitute a recording double.
#[async_trait]
pub trait Releases: Send + Sync {
    /// Create a release for `tag`
    async fn create(&self, tag: &str, options: &ReleaseOptions) -> Result<Release>;

    /// Update release `id` to point at `tag`
    async fn update(&self, id: u64, tag: &str, options: &ReleaseOptions) -> Result<Release>;

    /// Look up a release by tag
    async fn get_by_tag(&self, tag: &str) -> Result<Release>;

    /// List releases of the repository
    async fn list_releases(&self) -> Result<Vec<Release>>;

    /// List assets attached to a release
    async fn list_artifacts_for_release(&self, release_id: u64) -> Result<Vec<RemoteAsset>>;

    /// Delete a release asset
    async fn delete_artifact(&self, asset_id: u64) -> Result<()>;

    /// Upload `content` as asset `name` to `asset_url`
    async fn upload_artifact(
        &self,
        asset_url: &str,
        content_length: u64,
        content_type: &str,
        content: Bytes,
        name: &str,
    ) -> Result<()>;
}
