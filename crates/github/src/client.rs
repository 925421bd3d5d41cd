//! GitHub REST implementation of the remote label authority.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use tracing::debug;

use labels::{Label, LabelAuthority, OpStatus};

const GITHUB_API_URL: &str = "https://api.github.com";

/// Label store of a single GitHub repository.
///
/// One blocking-style call at a time; the sync engine drives this
/// sequentially on purpose, which keeps us friendly to GitHub's rate
/// limits.
#[derive(Debug, Clone)]
pub struct GitHubAuthority {
    client: reqwest::Client,
    base_url: String,
    owner: String,
    repo: String,
}

impl GitHubAuthority {
    /// Create an authority for `owner/repo` authenticated by `token`.
    pub fn new(token: &str, owner: &str, repo: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("labelctl/0.3"));
        let mut authorization = HeaderValue::from_str(&format!("Bearer {token}"))
            .context("GitHub token is not a valid header value")?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: GITHUB_API_URL.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Point the client at a different API root. Used by tests.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn labels_url(&self) -> String {
        format!("{}/repos/{}/{}/labels", self.base_url, self.owner, self.repo)
    }

    // Path encoding, not form encoding: spaces must become %20 here.
    fn label_url(&self, name: &str) -> String {
        format!("{}/{}", self.labels_url(), urlencoding::encode(name))
    }
}

#[async_trait]
impl LabelAuthority for GitHubAuthority {
    async fn list(&self) -> Result<Vec<Label>> {
        let response = self
            .client
            .get(self.labels_url())
            .send()
            .await
            .with_context(|| format!("failed to list labels of {}/{}", self.owner, self.repo))?
            .error_for_status()
            .with_context(|| format!("listing labels of {}/{}", self.owner, self.repo))?;
        let listed: Vec<Label> = response.json().await.context("failed to parse label list")?;
        debug!(count = listed.len(), repo = %self.repo, "listed remote labels");
        Ok(listed)
    }

    async fn delete(&self, name: &str) -> Result<OpStatus> {
        let response = self
            .client
            .delete(self.label_url(name))
            .send()
            .await
            .with_context(|| format!("failed to delete label \"{name}\""))?;
        Ok(OpStatus::from_code(response.status().as_u16()))
    }

    async fn create(&self, label: &Label) -> Result<OpStatus> {
        let response = self
            .client
            .post(self.labels_url())
            .json(label)
            .send()
            .await
            .context("failed to create label")?;
        Ok(OpStatus::from_code(response.status().as_u16()))
    }

    async fn update(&self, name: &str, label: &Label) -> Result<OpStatus> {
        let response = self
            .client
            .patch(self.label_url(name))
            .json(label)
            .send()
            .await
            .with_context(|| format!("failed to update label \"{name}\""))?;
        Ok(OpStatus::from_code(response.status().as_u16()))
    }
}
