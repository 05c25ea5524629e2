use crate::Preferences;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub preferences: Preferences,
    pub page: PageView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    Loading,
    /// Cards matching `query`; empty when nothing matched.
    List {
        query: String,
        cards: Vec<ArticleCardView>,
    },
    Article(ArticlePageView),
    NotFound,
}

/// One entry of the article list. `excerpt` is plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCardView {
    pub slug: String,
    pub href: String,
    pub title: String,
    pub image: String,
    pub date: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticlePageView {
    pub title: String,
    pub image: String,
    pub date: String,
    pub body_text: String,
    /// Rendered body fragment, safe for element content.
    pub body_html: String,
}
