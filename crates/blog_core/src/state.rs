use crate::listing::{
    article_href, filter_by_title, find_by_slug, format_published_date, sort_newest_first,
};
use crate::render::{body_html, body_plain_text, excerpt, DEFAULT_EXCERPT_CHARS};
use crate::view_model::{AppViewModel, ArticleCardView, ArticlePageView, PageView};
use crate::{Article, Preferences};

/// Which page the front-end is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
    /// Searchable list of all articles.
    #[default]
    List,
    /// Single article page; `slug` comes from the `id` query parameter.
    Article { slug: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotRequested,
    Loading,
    Loaded,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    page: Page,
    load: LoadState,
    articles: Vec<Article>,
    query: String,
    preferences: Preferences,
    last_error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    /// Loaded articles, newest first.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            preferences: self.preferences,
            page: self.page_view(),
        }
    }

    fn page_view(&self) -> PageView {
        if self.load != LoadState::Loaded {
            return PageView::Loading;
        }
        match &self.page {
            Page::List => PageView::List {
                query: self.query.clone(),
                cards: filter_by_title(&self.articles, &self.query)
                    .into_iter()
                    .map(card_view)
                    .collect(),
            },
            Page::Article { slug } => slug
                .as_deref()
                .and_then(|slug| find_by_slug(&self.articles, slug))
                .map(|article| PageView::Article(article_page_view(article)))
                .unwrap_or(PageView::NotFound),
        }
    }

    pub(crate) fn open_page(&mut self, page: Page) {
        self.page = page;
    }

    pub(crate) fn begin_loading(&mut self) {
        self.load = LoadState::Loading;
    }

    pub(crate) fn set_articles(&mut self, mut articles: Vec<Article>) {
        sort_newest_first(&mut articles);
        self.articles = articles;
        self.load = LoadState::Loaded;
        self.last_error = None;
    }

    pub(crate) fn fail_loading(&mut self, reason: String) {
        self.articles.clear();
        self.load = LoadState::Loaded;
        self.last_error = Some(reason);
    }

    pub(crate) fn set_query(&mut self, query: String) {
        self.query = query;
    }

    pub(crate) fn set_preferences(&mut self, preferences: Preferences) {
        self.preferences = preferences;
    }
}

fn card_view(article: &Article) -> ArticleCardView {
    ArticleCardView {
        slug: article.slug.clone(),
        href: article_href(&article.slug),
        title: article.title.clone(),
        image: article.main_image.clone(),
        date: format_published_date(&article.published_at),
        excerpt: excerpt(&article.body, DEFAULT_EXCERPT_CHARS),
    }
}

fn article_page_view(article: &Article) -> ArticlePageView {
    ArticlePageView {
        title: article.title.clone(),
        image: article.main_image.clone(),
        date: format_published_date(&article.published_at),
        body_text: body_plain_text(&article.body).into_owned(),
        body_html: body_html(&article.body),
    }
}
