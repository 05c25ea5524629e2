//! Rich-text to plain text / HTML transforms.
//!
//! Every function here is total: malformed content has already been reduced
//! to empty blocks by [`Document::from_value`], so nothing can fail.

use std::borrow::Cow;
use std::fmt::Write;

use crate::content::{ArticleBody, Block, BlockStyle, Document};

/// Maximum excerpt length used by the article list.
pub const DEFAULT_EXCERPT_CHARS: usize = 160;
pub const ELLIPSIS: &str = "...";
const PARAGRAPH_BREAK: &str = "\n\n";

/// Flattens a document to plain text, one paragraph per block.
pub fn blocks_to_text(document: &Document) -> String {
    document
        .blocks()
        .iter()
        .map(Block::text)
        .collect::<Vec<_>>()
        .join(PARAGRAPH_BREAK)
}

/// Renders a document as `<h2>` / `<p>` elements with no separator.
pub fn blocks_to_html(document: &Document) -> String {
    let mut html = String::new();
    for block in document.blocks() {
        let text = block.text();
        let tag = match block.style {
            BlockStyle::H2 => "h2",
            BlockStyle::Normal | BlockStyle::Other(_) => "p",
        };
        let _ = write!(html, "<{tag}>{}</{tag}>", escape_angle_brackets(&text));
    }
    html
}

/// Replaces `<` and `>` with their entities and nothing else.
///
/// This keeps span text from opening tags. It is NOT an HTML sanitizer:
/// quotes and ampersands pass through untouched, so the result must only be
/// placed in element content, never in attributes.
pub fn escape_angle_brackets(text: &str) -> Cow<'_, str> {
    if !text.contains(&['<', '>'][..]) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace('<', "&lt;").replace('>', "&gt;"))
}

/// Plain text of a body; legacy text is returned as-is.
pub fn body_plain_text(body: &ArticleBody) -> Cow<'_, str> {
    match body {
        ArticleBody::Document(document) => Cow::Owned(blocks_to_text(document)),
        ArticleBody::PlainText(text) => Cow::Borrowed(text),
    }
}

/// HTML of a body; legacy text becomes a single paragraph.
pub fn body_html(body: &ArticleBody) -> String {
    match body {
        ArticleBody::Document(document) => blocks_to_html(document),
        ArticleBody::PlainText(text) => format!("<p>{}</p>", escape_angle_brackets(text)),
    }
}

/// Plain-text preview of at most `max_chars` characters plus [`ELLIPSIS`].
pub fn excerpt(body: &ArticleBody, max_chars: usize) -> String {
    truncate_with_ellipsis(&body_plain_text(body), max_chars)
}

/// Cuts `text` at `max_chars` characters (not bytes, not words), trims the
/// trailing whitespace of the kept part and appends [`ELLIPSIS`].
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((end, _)) => format!("{}{ELLIPSIS}", text[..end].trim_end()),
    }
}

/// Splits edited plain text into `normal` blocks, one per paragraph.
pub fn text_to_blocks(text: &str) -> Document {
    text.trim().split(PARAGRAPH_BREAK).map(Block::paragraph).collect()
}
