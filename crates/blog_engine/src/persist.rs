use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use blog_core::{sort_newest_first, Article};
use engine_logging::engine_info;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::payload::{format_payload, parse_articles_payload, PayloadError};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("not a file path: {0:?}")]
    InvalidPath(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// Reads an articles file; a missing file is an empty collection.
pub fn read_articles_file(path: &Path) -> Result<Vec<Article>, PersistError> {
    match fs::read(path) {
        Ok(bytes) => Ok(parse_articles_payload(&bytes)?),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            engine_info!("No articles file at {:?}; starting empty", path);
            Ok(Vec::new())
        }
        Err(err) => Err(err.into()),
    }
}

/// Writes `articles` newest first as pretty JSON, replacing `path` atomically.
pub fn write_articles_file(path: &Path, articles: &[Article]) -> Result<PathBuf, PersistError> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| PersistError::InvalidPath(path.to_path_buf()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut sorted = articles.to_vec();
    sort_newest_first(&mut sorted);
    let content = format_payload(&sorted)?;

    let written = AtomicFileWriter::new(dir).write(filename, &content)?;
    engine_info!("Saved {} articles to {:?}", sorted.len(), written);
    Ok(written)
}
