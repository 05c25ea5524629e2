use std::fmt;

use blog_core::Article;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ArticlesLoaded {
        request_id: RequestId,
        result: Result<Vec<Article>, EngineError>,
    },
    Published {
        request_id: RequestId,
        result: Result<PublishOutcome, EngineError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// `true` when the remote file did not exist before.
    pub created: bool,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct EngineError {
    pub kind: FailureKind,
    pub message: String,
}

impl EngineError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidLocation,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Io,
    InvalidPayload,
    MissingToken,
    Network,
    /// The engine thread is gone.
    Disconnected,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidLocation => write!(f, "invalid location"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Io => write!(f, "io error"),
            FailureKind::InvalidPayload => write!(f, "invalid articles payload"),
            FailureKind::MissingToken => write!(f, "missing access token"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Disconnected => write!(f, "engine disconnected"),
        }
    }
}
