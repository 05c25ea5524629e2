use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use blog_core::{ArticleDraft, Catalog};
use blog_engine::{
    decode_payload, format_payload, parse_articles_str, read_articles_file, validate_payload,
    write_articles_file, AtomicFileWriter, EngineHandle, PublishOutcome, PublishTarget,
};
use chrono::{SecondsFormat, Utc};
use engine_logging::engine_info;

use crate::cli::AdminCommand;

pub fn run(command: &AdminCommand) -> anyhow::Result<()> {
    match command {
        AdminCommand::Check { file } => {
            let count = check(file)?;
            println!("{}: {count} articles", file.display());
        }
        AdminCommand::Format { file, write } => {
            let formatted = format(file)?;
            if *write {
                let written = write_in_place(file, &formatted)?;
                println!("Formatted {}", written.display());
            } else {
                print!("{formatted}");
            }
        }
        AdminCommand::Save {
            file,
            title,
            slug,
            image,
            body_file,
            replace,
        } => {
            let body_text = match body_file {
                Some(path) => Some(
                    fs::read_to_string(path)
                        .with_context(|| format!("failed to read {}", path.display()))?,
                ),
                None => None,
            };
            let edits = DraftEdits {
                title: title.clone(),
                slug: slug.clone(),
                main_image: image.clone(),
                body_text,
            };
            let saved = save(file, replace.as_deref(), edits, &timestamp())?;
            println!("Saved \"{saved}\" to {}", file.display());
        }
        AdminCommand::Delete { slug, file } => {
            delete(file, slug)?;
            println!("Deleted \"{slug}\" from {}", file.display());
        }
        AdminCommand::Publish {
            file,
            repo,
            path,
            token,
            message,
        } => {
            let mut target = PublishTarget::github(repo.as_str(), path.as_str(), token.as_str());
            target.message = message.clone();
            let outcome = publish(file, target)?;
            let verb = if outcome.created { "Created" } else { "Updated" };
            println!("{verb} {repo}/{path} ({} bytes)", outcome.bytes);
        }
    }
    Ok(())
}

/// Field overrides for `admin save`; `None` keeps the current value.
#[derive(Debug, Default)]
struct DraftEdits {
    title: Option<String>,
    slug: Option<String>,
    main_image: Option<String>,
    body_text: Option<String>,
}

impl DraftEdits {
    fn apply(self, mut draft: ArticleDraft) -> ArticleDraft {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(slug) = self.slug {
            draft.slug = slug;
        }
        if let Some(image) = self.main_image {
            draft.main_image = image;
        }
        if let Some(body) = self.body_text {
            draft.body_text = body;
        }
        draft
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn read_text(file: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    Ok(decode_payload(&bytes)?)
}

fn check(file: &Path) -> anyhow::Result<usize> {
    let text = read_text(file)?;
    validate_payload(&text).with_context(|| format!("{} is not a valid payload", file.display()))
}

/// Pretty form of the payload, keeping the stored order.
fn format(file: &Path) -> anyhow::Result<String> {
    let text = read_text(file)?;
    let articles = parse_articles_str(&text)
        .with_context(|| format!("{} is not a valid payload", file.display()))?;
    Ok(format_payload(&articles)?)
}

fn write_in_place(file: &Path, content: &str) -> anyhow::Result<PathBuf> {
    let filename = file
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("not a file path: {}", file.display()))?;
    let dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok(AtomicFileWriter::new(dir).write(filename, content)?)
}

/// Creates or replaces one article and returns its slug.
fn save(
    file: &Path,
    replace: Option<&str>,
    edits: DraftEdits,
    published_at: &str,
) -> anyhow::Result<String> {
    let mut catalog = Catalog::new(read_articles_file(file)?);
    let base = match replace {
        Some(current) => catalog
            .articles()
            .iter()
            .find(|article| article.slug == current)
            .map(ArticleDraft::from_article)
            .unwrap_or_default(),
        None => ArticleDraft::default(),
    };
    let draft = edits.apply(base);
    let slug = draft.slug.trim().to_string();
    catalog.upsert(replace, draft, published_at)?;
    write_articles_file(file, catalog.articles())?;
    engine_info!("Saved article {} ({} total)", slug, catalog.len());
    Ok(slug)
}

fn delete(file: &Path, slug: &str) -> anyhow::Result<()> {
    let mut catalog = Catalog::new(read_articles_file(file)?);
    if !catalog.remove(slug) {
        bail!("no article with slug \"{slug}\" in {}", file.display());
    }
    write_articles_file(file, catalog.articles())?;
    Ok(())
}

/// Sorts the local file newest first, saves it, then uploads the same bytes.
fn publish(file: &Path, target: PublishTarget) -> anyhow::Result<PublishOutcome> {
    let text = read_text(file)?;
    let mut catalog = Catalog::new(parse_articles_str(&text)?);
    catalog.sort_newest_first();
    write_articles_file(file, catalog.articles())?;
    let payload = format_payload(catalog.articles())?;

    let engine = EngineHandle::publisher().context("failed to start the background engine")?;
    let outcome = engine
        .publish_blocking(1, target, payload)
        .with_context(|| format!("failed to publish {}", file.display()))?;
    engine_info!("Published {} ({} bytes)", file.display(), outcome.bytes);
    Ok(outcome)
}
