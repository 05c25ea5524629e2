//! Blog core: content model, rich-text transforms and the pure front-end state machine.
mod catalog;
mod content;
mod effect;
mod listing;
mod msg;
mod prefs;
mod render;
mod state;
mod update;
mod view_model;

pub use catalog::{ArticleDraft, Catalog, CatalogError, DEFAULT_MAIN_IMAGE};
pub use content::{Article, ArticleBody, Block, BlockStyle, Document, Span, BLOCK_KIND, SPAN_KIND};
pub use effect::Effect;
pub use listing::{
    article_href, filter_by_title, find_by_slug, format_published_date, newest_first,
    parse_published_at, sort_newest_first, ARTICLE_PAGE,
};
pub use msg::Msg;
pub use prefs::{Font, Preferences, Theme};
pub use render::{
    blocks_to_html, blocks_to_text, body_html, body_plain_text, escape_angle_brackets, excerpt,
    text_to_blocks, truncate_with_ellipsis, DEFAULT_EXCERPT_CHARS, ELLIPSIS,
};
pub use state::{AppState, LoadState, Page};
pub use update::update;
pub use view_model::{AppViewModel, ArticleCardView, ArticlePageView, PageView};
