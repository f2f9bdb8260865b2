//! Replace-then-upload sequencing for release assets.

use crate::artifact::Artifact;
use crate::error::Result;
use crate::github::{RAW_CONTENT_TYPE, Releases};
use async_trait::async_trait;
use std::collections::HashMap;

/// Uploads a batch of artifacts to a release
#[async_trait]
pub trait ArtifactUploader: Send + Sync {
    /// Upload every artifact to release `release_id` through `upload_url`
    async fn upload_artifacts(
        &self,
        artifacts: &[Artifact],
        release_id: u64,
        upload_url: &str,
    ) -> Result<()>;
}

/// [`ArtifactUploader`] that optionally deletes same-named assets first
///
/// With `replaces` set, the existing assets of the release are listed once and
/// every asset whose name matches an artifact is deleted. All deletes finish
/// before the first upload starts. The first failure of any step is returned
/// as-is and ends the batch; completed deletes and uploads are not undone.
#[derive(Debug, Clone)]
pub struct GithubArtifactUploader<R> {
    releases: R,
    replaces: bool,
}

impl<R: Releases> GithubArtifactUploader<R> {
    /// Create an uploader over `releases`
    pub fn new(releases: R, replaces: bool) -> Self {
        Self { releases, replaces }
    }

    /// Whether same-named remote assets are deleted before upload
    pub fn replaces(&self) -> bool {
        self.replaces
    }

    /// The release collaborator
    pub fn releases(&self) -> &R {
        &self.releases
    }

    async fn delete_existing(&self, artifacts: &[Artifact], release_id: u64) -> Result<()> {
        let assets = self.releases.list_artifacts_for_release(release_id).await?;
        log::debug!("Release {} has {} existing asset(s)", release_id, assets.len());

        let mut ids_by_name: HashMap<&str, u64> = HashMap::with_capacity(assets.len());
        for asset in &assets {
            ids_by_name.entry(asset.name.as_str()).or_insert(asset.id);
        }

        for artifact in artifacts {
            match ids_by_name.get(artifact.name()) {
                Some(&asset_id) => {
                    log::info!("Deleting existing asset {} (id {})", artifact.name(), asset_id);
                    self.releases.delete_artifact(asset_id).await?;
                }
                None => log::debug!("No existing asset named {}", artifact.name()),
            }
        }

        Ok(())
    }

    async fn upload(&self, artifact: &Artifact, upload_url: &str) -> Result<()> {
        let payload = artifact.read_payload().await?;
        log::info!(
            "Uploading {} ({} bytes)",
            artifact.name(),
            payload.content_length
        );

        self.releases
            .upload_artifact(
                upload_url,
                payload.content_length,
                RAW_CONTENT_TYPE,
                payload.bytes,
                artifact.name(),
            )
            .await
    }
}

#[async_trait]
impl<R: Releases> ArtifactUploader for GithubArtifactUploader<R> {
    async fn upload_artifacts(
        &self,
        artifacts: &[Artifact],
        release_id: u64,
        upload_url: &str,
    ) -> Result<()> {
        if self.replaces {
            self.delete_existing(artifacts, release_id).await?;
        }

        for artifact in artifacts {
            self.upload(artifact, upload_url).await?;
        }

        log::info!(
            "Uploaded {} artifact(s) to release {}",
            artifacts.len(),
            release_id
        );
        Ok(())
    }
}
