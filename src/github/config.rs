//! Connection settings for the GitHub Releases API.

use crate::error::{ConfigError, Result};
use std::time::Duration;

/// Default GitHub REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Configuration for GitHub release access
#[derive(Debug, Clone)]
pub struct GitHubReleasesConfig {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// GitHub token
    pub token: String,
    /// REST API base URL (GitHub Enterprise or a local stub)
    pub api_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for GitHubReleasesConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            token: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(300),
        }
    }
}

impl GitHubReleasesConfig {
    /// Create configuration for `owner/repo` against github.com
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            token: token.into(),
            ..Default::default()
        }
    }

    /// Point the client at a different API base URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Create configuration from the process environment
    ///
    /// Reads `GITHUB_REPOSITORY` (`owner/repo`), the token from `GH_TOKEN`
    /// then `GITHUB_TOKEN`, and an optional `GITHUB_API_URL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let repository = lookup("GITHUB_REPOSITORY").unwrap_or_default();
        let (owner, repo) = parse_repository(&repository)?;

        let token = lookup("GH_TOKEN")
            .filter(|t| !t.is_empty())
            .or_else(|| lookup("GITHUB_TOKEN").filter(|t| !t.is_empty()))
            .ok_or(ConfigError::MissingToken)?;

        let mut config = Self::new(owner, repo, token);
        if let Some(api_url) = lookup("GITHUB_API_URL").filter(|u| !u.is_empty()) {
            config.api_url = api_url;
        }

        Ok(config)
    }
}

/// Parse a GitHub repository string into an owner/repo tuple
pub fn parse_repository(value: &str) -> Result<(String, String)> {
    match value.split('/').collect::<Vec<_>>().as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ConfigError::InvalidRepository {
            value: value.to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_parse_repository() {
        assert_eq!(
            parse_repository("octo/widgets").unwrap(),
            ("octo".to_string(), "widgets".to_string())
        );
        assert!(parse_repository("widgets").is_err());
        assert!(parse_repository("a/b/c").is_err());
        assert!(parse_repository("/repo").is_err());
        assert!(parse_repository("").is_err());
    }

    #[test]
    fn test_from_env_prefers_gh_token() {
        let config = GitHubReleasesConfig::from_lookup(lookup(&[
            ("GITHUB_REPOSITORY", "octo/widgets"),
            ("GH_TOKEN", "gh"),
            ("GITHUB_TOKEN", "github"),
        ]))
        .unwrap();

        assert_eq!(config.owner, "octo");
        assert_eq!(config.repo, "widgets");
        assert_eq!(config.token, "gh");
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_from_env_falls_back_to_github_token_and_api_url() {
        let config = GitHubReleasesConfig::from_lookup(lookup(&[
            ("GITHUB_REPOSITORY", "octo/widgets"),
            ("GH_TOKEN", ""),
            ("GITHUB_TOKEN", "github"),
            ("GITHUB_API_URL", "https://ghe.example.com/api/v3/"),
        ]))
        .unwrap();

        assert_eq!(config.token, "github");
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3/");
    }

    #[test]
    fn test_from_env_missing_token() {
        let err = GitHubReleasesConfig::from_lookup(lookup(&[("GITHUB_REPOSITORY", "octo/widgets")]))
            .unwrap_err();
        assert!(matches!(err, ReleaseError::Config(ConfigError::MissingToken)));
    }

    #[test]
    fn test_from_env_missing_repository() {
        let err = GitHubReleasesConfig::from_lookup(lookup(&[("GH_TOKEN", "gh")])).unwrap_err();
        assert!(matches!(
            err,
            ReleaseError::Config(ConfigError::InvalidRepository { .. })
        ));
    }
}
