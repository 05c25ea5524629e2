use crate::{Article, Page, Preferences};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A page was opened; loads the articles on first use.
    PageOpened(Page),
    /// Article source delivered the payload.
    ArticlesLoaded(Vec<Article>),
    /// Article source failed; the list is treated as empty.
    ArticlesFailed(String),
    /// User edited the search box.
    SearchChanged(String),
    /// User clicked the theme button.
    ThemeToggled,
    /// User clicked the font button.
    FontCycled,
    /// Restore preferences saved by a previous session.
    PreferencesRestored(Preferences),
}
