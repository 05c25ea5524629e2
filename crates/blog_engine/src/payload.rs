use blog_core::Article;
use encoding_rs::{Encoding, UTF_8};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("failed to decode payload as {encoding}")]
    Decode { encoding: String },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected an array of articles or an object with a `result` array, found {found}")]
    Shape { found: &'static str },
}

/// Content API envelope around the article array.
#[derive(Deserialize)]
struct Envelope {
    result: Vec<Article>,
}

/// Decode raw bytes to text: BOM if present, UTF-8 otherwise.
pub fn decode_payload(bytes: &[u8]) -> Result<String, PayloadError> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .unwrap_or(UTF_8);
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(PayloadError::Decode {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(text.into_owned())
}

pub fn parse_articles_payload(bytes: &[u8]) -> Result<Vec<Article>, PayloadError> {
    parse_articles_str(&decode_payload(bytes)?)
}

/// Parses a bare article array (static `articles.json`) or a content API
/// envelope `{"result": [...]}`.
pub fn parse_articles_str(text: &str) -> Result<Vec<Article>, PayloadError> {
    // The shape is decided on the value; the typed pass then re-reads the
    // text so element errors keep their line and column.
    let value: Value = serde_json::from_str(text)?;
    match &value {
        Value::Array(_) => Ok(serde_json::from_str(text)?),
        Value::Object(map) if map.contains_key("result") => {
            let envelope: Envelope = serde_json::from_str(text)?;
            Ok(envelope.result)
        }
        other => Err(PayloadError::Shape {
            found: json_kind(other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object without `result`",
    }
}

/// Checks a hand-edited payload; returns the number of articles.
pub fn validate_payload(text: &str) -> Result<usize, PayloadError> {
    parse_articles_str(text).map(|articles| articles.len())
}

/// Pretty JSON with two-space indentation and a trailing newline.
pub fn format_payload(articles: &[Article]) -> Result<String, PayloadError> {
    let mut text = serde_json::to_string_pretty(articles)?;
    text.push('\n');
    Ok(text)
}
