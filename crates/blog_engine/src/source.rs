use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use blog_core::Article;
use engine_logging::{engine_debug, engine_info};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;

use crate::payload::parse_articles_payload;
use crate::{EngineError, FailureKind};

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec![
                "application/json".to_string(),
                "text/plain".to_string(),
            ],
        }
    }
}

/// Where the article payload comes from.
#[async_trait::async_trait]
pub trait ArticleSource: Send + Sync {
    /// Human readable location, for logs.
    fn describe(&self) -> String;

    async fn load(&self) -> Result<Vec<Article>, EngineError>;
}

/// Picks an HTTP source for `http(s)://` locations and a file source otherwise.
pub fn source_for(location: &str, settings: SourceSettings) -> Arc<dyn ArticleSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Arc::new(HttpSource::new(location, settings))
    } else {
        Arc::new(FileSource::new(location))
    }
}

/// A static `articles.json` on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl ArticleSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Vec<Article>, EngineError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|err| {
            EngineError::new(FailureKind::Io, format!("{}: {err}", self.path.display()))
        })?;
        let articles = parse_articles_payload(&bytes)
            .map_err(|err| EngineError::new(FailureKind::InvalidPayload, err.to_string()))?;
        engine_info!("Loaded {} articles from {:?}", articles.len(), self.path);
        Ok(articles)
    }
}

/// A static JSON file or content API reachable over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    settings: SourceSettings,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, settings: SourceSettings) -> Self {
        Self {
            url: url.into(),
            settings,
        }
    }

    fn build_client(&self) -> Result<reqwest::Client, EngineError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(self.settings.redirect_limit))
            .build()
            .map_err(|err| EngineError::new(FailureKind::Network, err.to_string()))
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    async fn download(&self) -> Result<Vec<u8>, EngineError> {
        let parsed = reqwest::Url::parse(&self.url)
            .map_err(|err| EngineError::new(FailureKind::InvalidLocation, err.to_string()))?;
        let client = self.build_client()?;

        let response = client.get(parsed).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, content_len));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(EngineError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        engine_debug!("Downloaded {} bytes from {}", bytes.len(), self.url);
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl ArticleSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn load(&self) -> Result<Vec<Article>, EngineError> {
        let bytes = self.download().await?;
        let articles = parse_articles_payload(&bytes)
            .map_err(|err| EngineError::new(FailureKind::InvalidPayload, err.to_string()))?;
        engine_info!("Loaded {} articles from {}", articles.len(), self.url);
        Ok(articles)
    }
}

fn too_large(max_bytes: u64, actual: u64) -> EngineError {
    EngineError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> EngineError {
    if err.is_timeout() {
        return EngineError::new(FailureKind::Timeout, err.to_string());
    }
    EngineError::new(FailureKind::Network, err.to_string())
}
