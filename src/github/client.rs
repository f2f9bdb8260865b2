//! GitHub REST implementation of [`Releases`].

use super::config::GitHubReleasesConfig;
use super::releases::{Release, ReleaseOptions, Releases, RemoteAsset};
use crate::error::{ConfigError, GitHubError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

/// GitHub REST API version sent with every request
const API_VERSION: &str = "2022-11-28";

/// Page size for list endpoints (GitHub maximum)
const PER_PAGE: usize = 100;

/// Release operations bound to one GitHub repository
#[derive(Debug, Clone)]
pub struct GithubReleases {
    client: Client,
    api_url: Url,
    config: GitHubReleasesConfig,
}

#[derive(Serialize)]
struct ReleaseRequest<'a> {
    tag_name: &'a str,
    #[serde(flatten)]
    options: &'a ReleaseOptions,
}

impl GithubReleases {
    /// Create a client for the repository in `config`
    pub fn new(config: GitHubReleasesConfig) -> Result<Self> {
        let api_url = Url::parse(&config.api_url).map_err(|e| ConfigError::InvalidApiUrl {
            value: config.api_url.clone(),
            reason: e.to_string(),
        })?;
        if api_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidApiUrl {
                value: config.api_url.clone(),
                reason: "URL cannot be used as a base".to_string(),
            }
            .into());
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let client = Client::builder()
            .user_agent(concat!("release_uploader/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| GitHubError::RequestFailed {
                operation: "github_client_init".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_url,
            config,
        })
    }

    /// Configuration this client was built from
    pub fn config(&self) -> &GitHubReleasesConfig {
        &self.config
    }

    /// `{api}/repos/{owner}/{repo}/releases/{segments...}`
    fn releases_url(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["repos", self.config.owner.as_str(), self.config.repo.as_str(), "releases"])
                .extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.config.token)
    }

    async fn send(&self, operation: &str, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| GitHubError::RequestFailed {
                operation: operation.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or(body);

        Err(GitHubError::UnexpectedStatus {
            operation: operation.to_string(),
            status: status.as_u16(),
            message,
        }
        .into())
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = self.send(operation, request).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| GitHubError::RequestFailed {
                operation: operation.to_string(),
                reason: e.to_string(),
            })?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch every page of a list endpoint
    async fn list_all<T: DeserializeOwned>(&self, operation: &str, url: Url) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1usize;

        loop {
            let request = self.request(Method::GET, url.clone()).query(&[
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ]);
            let batch: Vec<T> = self.send_json(operation, request).await?;
            let len = batch.len();
            items.extend(batch);

            if len < PER_PAGE {
                return Ok(items);
            }
            page += 1;
        }
    }
}

#[async_trait]
impl Releases for GithubReleases {
    async fn create(&self, tag: &str, options: &ReleaseOptions) -> Result<Release> {
        log::info!("Creating release {} in {}/{}", tag, self.config.owner, self.config.repo);
        let request = self
            .request(Method::POST, self.releases_url(&[]))
            .json(&ReleaseRequest { tag_name: tag, options });
        self.send_json("create_release", request).await
    }

    async fn update(&self, id: u64, tag: &str, options: &ReleaseOptions) -> Result<Release> {
        log::info!("Updating release {} ({})", id, tag);
        let request = self
            .request(Method::PATCH, self.releases_url(&[id.to_string().as_str()]))
            .json(&ReleaseRequest { tag_name: tag, options });
        self.send_json("update_release", request).await
    }

    async fn get_by_tag(&self, tag: &str) -> Result<Release> {
        log::debug!("Looking up release by tag {}", tag);
        let request = self.request(Method::GET, self.releases_url(&["tags", tag]));
        self.send_json("get_release_by_tag", request).await
    }

    async fn list_releases(&self) -> Result<Vec<Release>> {
        self.list_all("list_releases", self.releases_url(&[])).await
    }

    async fn list_artifacts_for_release(&self, release_id: u64) -> Result<Vec<RemoteAsset>> {
        let url = self.releases_url(&[release_id.to_string().as_str(), "assets"]);
        self.list_all("list_release_assets", url).await
    }

    async fn delete_artifact(&self, asset_id: u64) -> Result<()> {
        let url = self.releases_url(&["assets", asset_id.to_string().as_str()]);
        self.send("delete_release_asset", self.request(Method::DELETE, url))
            .await?;
        Ok(())
    }

    async fn upload_artifact(
        &self,
        asset_url: &str,
        content_length: u64,
        content_type: &str,
        content: Bytes,
        name: &str,
    ) -> Result<()> {
        let url = expand_upload_url(asset_url, name)?;
        let request = self
            .request(Method::POST, url)
            .header(header::CONTENT_LENGTH, content_length)
            .header(header::CONTENT_TYPE, content_type)
            .body(content);
        self.send("upload_release_asset", request).await?;
        Ok(())
    }
}

/// Resolve a release `upload_url` into the endpoint for asset `name`
///
/// GitHub hands out upload URLs with an RFC 6570 query template such as
/// `.../assets{?name,label}`; the template is dropped and `name` appended.
fn expand_upload_url(asset_url: &str, name: &str) -> Result<Url> {
    let base = match asset_url.find('{') {
        Some(idx) => &asset_url[..idx],
        None => asset_url,
    };

    let mut url = Url::parse(base).map_err(|e| GitHubError::InvalidUploadUrl {
        url: asset_url.to_string(),
        reason: e.to_string(),
    })?;
    url.query_pairs_mut().append_pair("name", name);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;

    #[test]
    fn test_expand_upload_url_strips_template() {
        let url = expand_upload_url(
            "https://uploads.github.com/repos/o/r/releases/100/assets{?name,label}",
            "art1.tar.gz",
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://uploads.github.com/repos/o/r/releases/100/assets?name=art1.tar.gz"
        );
    }

    #[test]
    fn test_expand_upload_url_encodes_name() {
        let url = expand_upload_url("http://api.example.com", "my file+1.zip").unwrap();
        assert_eq!(url.query(), Some("name=my+file%2B1.zip"));
    }

    #[test]
    fn test_expand_upload_url_rejects_garbage() {
        let err = expand_upload_url("not a url", "art1").unwrap_err();
        assert!(matches!(
            err,
            ReleaseError::GitHub(GitHubError::InvalidUploadUrl { .. })
        ));
    }

    #[test]
    fn test_releases_url_layout() {
        let releases =
            GithubReleases::new(GitHubReleasesConfig::new("octo", "widgets", "t")).unwrap();
        assert_eq!(
            releases.releases_url(&["tags", "v1.0.0"]).as_str(),
            "https://api.github.com/repos/octo/widgets/releases/tags/v1.0.0"
        );
        assert_eq!(
            releases.releases_url(&["assets", "7"]).as_str(),
            "https://api.github.com/repos/octo/widgets/releases/assets/7"
        );
    }

    #[test]
    fn test_releases_url_keeps_enterprise_prefix() {
        let config = GitHubReleasesConfig::new("octo", "widgets", "t")
            .with_api_url("https://ghe.example.com/api/v3");
        let releases = GithubReleases::new(config).unwrap();
        assert_eq!(
            releases.releases_url(&[]).as_str(),
            "https://ghe.example.com/api/v3/repos/octo/widgets/releases"
        );
    }

    #[test]
    fn test_new_rejects_invalid_api_url() {
        let config = GitHubReleasesConfig::new("octo", "widgets", "t").with_api_url("::");
        assert!(matches!(
            GithubReleases::new(config),
            Err(ReleaseError::Config(ConfigError::InvalidApiUrl { .. }))
        ));
    }
}
