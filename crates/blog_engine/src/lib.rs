//! Blog engine: article sources, payload codec, atomic persistence and publishing.
mod engine;
mod payload;
mod persist;
mod publish;
mod source;
mod types;

pub use engine::EngineHandle;
pub use payload::{
    decode_payload, format_payload, parse_articles_payload, parse_articles_str, validate_payload,
    PayloadError,
};
pub use persist::{
    ensure_output_dir, read_articles_file, write_articles_file, AtomicFileWriter, PersistError,
};
pub use publish::{GithubPublisher, PublishTarget, DEFAULT_COMMIT_MESSAGE, GITHUB_API};
pub use source::{source_for, ArticleSource, FileSource, HttpSource, SourceSettings};
pub use types::{EngineError, EngineEvent, FailureKind, PublishOutcome, RequestId};
