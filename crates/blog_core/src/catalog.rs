//! Editable article collection backing the admin tools.

use serde_json::Map;
use thiserror::Error;

use crate::content::{Article, ArticleBody};
use crate::listing::sort_newest_first;
use crate::render::{body_plain_text, text_to_blocks};

/// Header image used when a new article does not name one.
pub const DEFAULT_MAIN_IMAGE: &str = "images/default.jpg";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("article title is required")]
    MissingTitle,
    #[error("article slug is required")]
    MissingSlug,
}

/// Editor form contents for one article; the body is edited as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: String,
    pub slug: String,
    pub main_image: String,
    pub body_text: String,
}

impl Default for ArticleDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            slug: String::new(),
            main_image: DEFAULT_MAIN_IMAGE.to_string(),
            body_text: String::new(),
        }
    }
}

impl ArticleDraft {
    pub fn from_article(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            slug: article.slug.clone(),
            main_image: article.main_image.clone(),
            body_text: body_plain_text(&article.body).into_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    articles: Vec<Article>,
}

impl Catalog {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn into_articles(self) -> Vec<Article> {
        self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Saves a draft, stamping it with `published_at`.
    ///
    /// Replaces the article currently stored under `current_slug` when there is
    /// one; otherwise (new article, or the edited one vanished) appends.
    pub fn upsert(
        &mut self,
        current_slug: Option<&str>,
        draft: ArticleDraft,
        published_at: impl Into<String>,
    ) -> Result<(), CatalogError> {
        let title = draft.title.trim();
        let slug = draft.slug.trim();
        if title.is_empty() {
            return Err(CatalogError::MissingTitle);
        }
        if slug.is_empty() {
            return Err(CatalogError::MissingSlug);
        }

        let existing = current_slug.and_then(|current| {
            self.articles
                .iter()
                .position(|candidate| candidate.slug == current)
        });
        // Fields the editor does not touch survive the save. So does the
        // stored body when its text was not edited, keeping marks and images.
        let (body, extra) = match existing.map(|index| &self.articles[index]) {
            Some(previous) if body_plain_text(&previous.body) == draft.body_text.as_str() => {
                (previous.body.clone(), previous.extra.clone())
            }
            Some(previous) => (
                ArticleBody::Document(text_to_blocks(&draft.body_text)),
                previous.extra.clone(),
            ),
            None => (
                ArticleBody::Document(text_to_blocks(&draft.body_text)),
                Map::new(),
            ),
        };

        let article = Article {
            slug: slug.to_string(),
            title: title.to_string(),
            published_at: published_at.into(),
            main_image: draft.main_image.trim().to_string(),
            body,
            extra,
        };
        match existing {
            Some(index) => self.articles[index] = article,
            None => self.articles.push(article),
        }
        Ok(())
    }

    /// Removes every article with `slug`; returns whether anything was removed.
    pub fn remove(&mut self, slug: &str) -> bool {
        let before = self.articles.len();
        self.articles.retain(|article| article.slug != slug);
        self.articles.len() != before
    }

    pub fn sort_newest_first(&mut self) {
        sort_newest_first(&mut self.articles);
    }
}
