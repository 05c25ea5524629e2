//! Upload of the articles payload through the GitHub contents API.

use std::fmt;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use engine_logging::engine_info;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::source::map_reqwest_error;
use crate::{EngineError, FailureKind, PublishOutcome};

pub const GITHUB_API: &str = "https://api.github.com";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update articles";
const USER_AGENT: &str = "blog-admin";

/// Repository file that receives the payload.
#[derive(Clone, PartialEq, Eq)]
pub struct PublishTarget {
    pub api_base: String,
    /// `owner/name`.
    pub repo: String,
    pub path: String,
    pub token: String,
    pub message: String,
}

impl PublishTarget {
    pub fn github(
        repo: impl Into<String>,
        path: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            api_base: GITHUB_API.to_string(),
            repo: repo.into(),
            path: path.into(),
            token: token.into(),
            message: DEFAULT_COMMIT_MESSAGE.to_string(),
        }
    }

    pub fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/contents/{}",
            self.api_base.trim_end_matches('/'),
            self.repo.trim_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

impl fmt::Debug for PublishTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishTarget")
            .field("api_base", &self.api_base)
            .field("repo", &self.repo)
            .field("path", &self.path)
            .field("token", &"<redacted>")
            .field("message", &self.message)
            .finish()
    }
}

#[derive(Deserialize)]
struct ContentsResponse {
    sha: Option<String>,
}

#[derive(Serialize)]
struct UploadRequest<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

pub struct GithubPublisher {
    target: PublishTarget,
    client: reqwest::Client,
}

impl GithubPublisher {
    pub fn new(target: PublishTarget) -> Result<Self, EngineError> {
        if target.token.trim().is_empty() {
            return Err(EngineError::new(
                FailureKind::MissingToken,
                "a GitHub token is required to publish",
            ));
        }
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| EngineError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { target, client })
    }

    /// Replaces the remote file with `payload`, creating it when absent.
    pub async fn publish(&self, payload: &str) -> Result<PublishOutcome, EngineError> {
        let url = self.target.contents_url();
        let sha = self.current_sha(&url).await?;
        let created = sha.is_none();
        let request = UploadRequest {
            message: &self.target.message,
            content: STANDARD.encode(payload.as_bytes()),
            sha,
        };

        let response = self
            .client
            .put(&url)
            .header(AUTHORIZATION, self.auth_header())
            .header(ACCEPT, "application/vnd.github+json")
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        engine_info!(
            "Published {} bytes to {}:{} (created={})",
            payload.len(),
            self.target.repo,
            self.target.path,
            created
        );
        Ok(PublishOutcome {
            created,
            bytes: payload.len() as u64,
        })
    }

    async fn current_sha(&self, url: &str) -> Result<Option<String>, EngineError> {
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, self.auth_header())
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(EngineError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        let contents: ContentsResponse = response
            .json()
            .await
            .map_err(|err| EngineError::new(FailureKind::InvalidPayload, err.to_string()))?;
        Ok(contents.sha)
    }

    fn auth_header(&self) -> String {
        format!("token {}", self.target.token.trim())
    }
}
