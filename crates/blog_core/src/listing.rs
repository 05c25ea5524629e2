use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use url::form_urlencoded;

use crate::content::Article;

/// Page that shows a single article, addressed by `?id=<slug>`.
pub const ARTICLE_PAGE: &str = "article.html";

/// Parses a publish timestamp: RFC 3339, or a bare `YYYY-MM-DD` date.
pub fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Newest first. Undated articles go last, keeping their relative order.
pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(newest_first);
}

/// Compares two articles by publish date, newest first.
pub fn newest_first(a: &Article, b: &Article) -> Ordering {
    match (
        parse_published_at(&a.published_at),
        parse_published_at(&b.published_at),
    ) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive title search. An empty query keeps everything.
pub fn filter_by_title<'a>(articles: &'a [Article], query: &str) -> Vec<&'a Article> {
    let needle = query.to_lowercase();
    articles
        .iter()
        .filter(|article| article.title.to_lowercase().contains(&needle))
        .collect()
}

pub fn find_by_slug<'a>(articles: &'a [Article], slug: &str) -> Option<&'a Article> {
    articles.iter().find(|article| article.slug == slug)
}

/// Long human date, e.g. `5 March 2024`. Unparseable input is shown verbatim.
pub fn format_published_date(raw: &str) -> String {
    match parse_published_at(raw) {
        Some(ts) => ts.format("%-d %B %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Link to the article page, e.g. `article.html?id=my-slug`.
pub fn article_href(slug: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("id", slug)
        .finish();
    format!("{ARTICLE_PAGE}?{query}")
}
