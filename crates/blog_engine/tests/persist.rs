use std::fs;

use blog_core::{Article, ArticleBody, Block};
use blog_engine::{
    ensure_output_dir, read_articles_file, write_articles_file, AtomicFileWriter,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn article(slug: &str, published_at: &str) -> Article {
    Article {
        slug: slug.into(),
        title: format!("Title {slug}"),
        published_at: published_at.into(),
        main_image: String::new(),
        body: ArticleBody::Document(vec![Block::paragraph("نص عربي")].into()),
        extra: Default::default(),
    }
}

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("articles.json", "[]").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "[]");

    let second = writer.write("articles.json", "[1]").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "[1]");
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("articles.json", "data").is_err());
    assert!(!file_path.with_file_name("articles.json").exists());
}

#[test]
fn missing_articles_file_reads_as_empty() {
    let temp = TempDir::new().unwrap();
    let articles = read_articles_file(&temp.path().join("articles.json")).unwrap();
    assert!(articles.is_empty());
}

#[test]
fn written_file_is_sorted_pretty_and_keeps_unicode() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("articles.json");
    let articles = vec![
        article("old", "2023-01-01T00:00:00Z"),
        article("new", "2024-01-01T00:00:00Z"),
    ];

    write_articles_file(&path, &articles).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("[\n  {\n    \"slug\": \"new\""), "{text}");
    assert!(text.contains("نص عربي"));
    assert!(text.ends_with("]\n"));

    let back = read_articles_file(&path).unwrap();
    let slugs: Vec<&str> = back.iter().map(|a| a.slug.as_str()).collect();
    assert_eq!(slugs, vec!["new", "old"]);
    assert_eq!(back[0], articles[1]);
}
