//! Article and rich-text content model.
//!
//! The rich-text body is built from an already-decoded JSON value. Shapes that
//! do not match (a body that is not an array, blocks without `children`, spans
//! without `text`) degrade to empty values instead of failing the whole
//! article.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// `_type` of a rich-text block.
pub const BLOCK_KIND: &str = "block";
/// `_type` of a span inside a block.
pub const SPAN_KIND: &str = "span";

/// A contiguous run of text within a block.
#[derive(Debug, Clone, Default)]
pub struct Span {
    pub text: String,
    /// Source value; fields other than `text` (`_key`, `marks`) are written
    /// back from it.
    raw: Option<Value>,
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Span {}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            raw: None,
        }
    }

    fn from_value(value: &Value) -> Self {
        let text = value
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Self {
            text: text.to_string(),
            raw: Some(value.clone()),
        }
    }

    fn to_value(&self) -> Value {
        if let Some(raw) = &self.raw {
            if Self::from_value(raw) == *self {
                return raw.clone();
            }
        }
        let mut map = source_fields(self.raw.as_ref());
        map.entry("_type")
            .or_insert_with(|| Value::from(SPAN_KIND));
        map.insert("text".into(), Value::String(self.text.clone()));
        Value::Object(map)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BlockStyle {
    #[default]
    Normal,
    H2,
    /// Any other style tag. Rendered like `Normal`, kept so edits round-trip.
    Other(String),
}

impl BlockStyle {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "" | "normal" => BlockStyle::Normal,
            "h2" => BlockStyle::H2,
            other => BlockStyle::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            BlockStyle::Normal => "normal",
            BlockStyle::H2 => "h2",
            BlockStyle::Other(tag) => tag,
        }
    }
}

/// One paragraph or heading unit of rich text.
///
/// Equality compares the interpreted fields only. Serialization writes the
/// source value back unchanged unless one of them was edited, and even then
/// keeps every field this model does not interpret (`_key`, `markDefs`, an
/// image's `asset`).
#[derive(Debug, Clone, Default)]
pub struct Block {
    /// The `_type` discriminator; `None` when the source omitted it.
    pub kind: Option<String>,
    pub style: BlockStyle,
    pub children: Vec<Span>,
    raw: Option<Value>,
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.style == other.style && self.children == other.children
    }
}

impl Eq for Block {}

impl Block {
    /// A `normal` block holding a single span.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: Some(BLOCK_KIND.to_string()),
            style: BlockStyle::Normal,
            children: vec![Span::new(text)],
            raw: None,
        }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Self {
            style: BlockStyle::H2,
            ..Self::paragraph(text)
        }
    }

    /// Blocks of any other `_type` (images, embeds) carry no text.
    pub fn is_text_block(&self) -> bool {
        self.kind.as_deref().map_or(true, |kind| kind == BLOCK_KIND)
    }

    /// Child span text concatenated in order with no separator.
    pub fn text(&self) -> String {
        if !self.is_text_block() {
            return String::new();
        }
        self.children.iter().map(|span| span.text.as_str()).collect()
    }

    fn from_value(value: &Value) -> Self {
        let kind = value
            .get("_type")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);
        let style = value
            .get("style")
            .and_then(Value::as_str)
            .map(BlockStyle::from_tag)
            .unwrap_or_default();
        let children = value
            .get("children")
            .and_then(Value::as_array)
            .map(|spans| spans.iter().map(Span::from_value).collect())
            .unwrap_or_default();
        Self {
            kind,
            style,
            children,
            raw: Some(value.clone()),
        }
    }

    fn to_value(&self) -> Value {
        let source = self.raw.as_ref().map(Self::from_value);
        if let (Some(raw), Some(source)) = (&self.raw, &source) {
            if source == self {
                return raw.clone();
            }
        }

        let mut map = source_fields(self.raw.as_ref());
        if source.as_ref().map_or(true, |source| source.kind != self.kind) {
            match &self.kind {
                Some(kind) => {
                    map.insert("_type".into(), Value::String(kind.clone()));
                }
                None => {
                    map.remove("_type");
                }
            }
        }
        if source.as_ref().map_or(true, |source| source.style != self.style) {
            map.insert(
                "style".into(),
                Value::String(self.style.as_tag().to_string()),
            );
        }
        if source
            .as_ref()
            .map_or(true, |source| source.children != self.children)
        {
            map.insert(
                "children".into(),
                Value::Array(self.children.iter().map(Span::to_value).collect()),
            );
        }
        Value::Object(map)
    }
}

/// Object fields of a source value; empty for values built in code.
fn source_fields(raw: Option<&Value>) -> Map<String, Value> {
    raw.and_then(Value::as_object).cloned().unwrap_or_default()
}

/// Ordered sequence of blocks making up one article body.
#[derive(Debug, Clone, Default)]
pub struct Document {
    blocks: Vec<Block>,
    /// A `body` that was not an array, written back as found.
    unparsed: Option<Value>,
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.blocks == other.blocks
    }
}

impl Eq for Document {}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            unparsed: None,
        }
    }

    /// Builds a document from decoded JSON. Anything but an array is empty.
    pub fn from_value(value: &Value) -> Self {
        match value.as_array() {
            Some(items) => items.iter().map(Block::from_value).collect(),
            None => Self {
                blocks: Vec::new(),
                unparsed: Some(value.clone()),
            },
        }
    }

    pub fn to_value(&self) -> Value {
        match &self.unparsed {
            Some(value) if self.blocks.is_empty() => value.clone(),
            _ => Value::Array(self.blocks.iter().map(Block::to_value).collect()),
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl From<Vec<Block>> for Document {
    fn from(blocks: Vec<Block>) -> Self {
        Self::new(blocks)
    }
}

impl FromIterator<Block> for Document {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// An article body: structured blocks, or the legacy plain `content` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleBody {
    Document(Document),
    PlainText(String),
}

impl Default for ArticleBody {
    fn default() -> Self {
        ArticleBody::PlainText(String::new())
    }
}

impl ArticleBody {
    /// Resolves the `body` / `content` pair of a raw article.
    ///
    /// A present, non-empty `body` wins even when it is not a block array (it
    /// then renders as empty text). Otherwise `content` is taken as plain text.
    pub fn from_fields(body: Option<&Value>, content: Option<&Value>) -> Self {
        match body {
            Some(value) if carries_body(value) => ArticleBody::Document(Document::from_value(value)),
            _ => ArticleBody::PlainText(
                content
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            ),
        }
    }
}

fn carries_body(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// One article as published in the articles payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawArticle", into = "RawArticle")]
pub struct Article {
    pub slug: String,
    pub title: String,
    /// Publish timestamp as found in the payload (normally RFC 3339).
    pub published_at: String,
    pub main_image: String,
    pub body: ArticleBody,
    /// Payload fields not interpreted here (`_id`, `author`, a superseded
    /// `content`), written back as found.
    pub extra: Map<String, Value>,
}

/// Wire shape of an article. Every field is read leniently: a missing or
/// wrongly typed value becomes empty instead of rejecting the payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", expecting = "an article object")]
struct RawArticle {
    #[serde(default)]
    slug: Option<Value>,
    #[serde(default)]
    title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    published_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    main_image: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn lenient_string(value: Option<Value>) -> String {
    match value {
        Some(Value::String(text)) => text,
        _ => String::new(),
    }
}

fn non_empty(text: String) -> Option<Value> {
    Some(text).filter(|text| !text.is_empty()).map(Value::String)
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        let body = ArticleBody::from_fields(raw.body.as_ref(), raw.content.as_ref());
        let mut extra = raw.extra;
        // Keep whichever of body/content lost so a rewrite does not drop it.
        let unused = match body {
            ArticleBody::Document(_) => ("content", raw.content),
            ArticleBody::PlainText(_) => ("body", raw.body),
        };
        if let (key, Some(value)) = unused {
            extra.insert(key.to_string(), value);
        }
        Self {
            slug: lenient_string(raw.slug),
            title: lenient_string(raw.title),
            published_at: lenient_string(raw.published_at),
            main_image: lenient_string(raw.main_image),
            body,
            extra,
        }
    }
}

impl From<Article> for RawArticle {
    fn from(article: Article) -> Self {
        let mut extra = article.extra;
        let kept_body = extra.remove("body");
        let kept_content = extra.remove("content");
        let (body, content) = match article.body {
            ArticleBody::Document(document) => (Some(document.to_value()), kept_content),
            ArticleBody::PlainText(text) => (kept_body, Some(Value::String(text))),
        };
        Self {
            slug: Some(Value::String(article.slug)),
            title: Some(Value::String(article.title)),
            published_at: non_empty(article.published_at),
            main_image: non_empty(article.main_image),
            body,
            content,
            extra,
        }
    }
}
