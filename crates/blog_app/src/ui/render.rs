use std::fmt::Write;

use blog_core::{AppViewModel, ArticleCardView, ArticlePageView, PageView, Preferences};
use htmlescape::{encode_attribute, encode_minimal};

const LOADING: &str = "Loading articles...";
const NO_ARTICLES: &str = "No articles found.";
const NOT_FOUND_TITLE: &str = "Article not found";
const NOT_FOUND_TEXT: &str =
    "The article you are looking for does not exist. Go back to the article list.";

/// Terminal rendering of the current page.
pub fn render_text(view: &AppViewModel) -> String {
    match &view.page {
        PageView::Loading => LOADING.to_string(),
        PageView::List { cards, .. } if cards.is_empty() => NO_ARTICLES.to_string(),
        PageView::List { cards, .. } => cards
            .iter()
            .map(render_card)
            .collect::<Vec<_>>()
            .join("\n"),
        PageView::Article(page) => format!(
            "{title}\nPublished {date}\n\n{body}\n",
            title = page.title,
            date = page.date,
            body = page.body_text
        ),
        PageView::NotFound => format!("{NOT_FOUND_TITLE}\n{NOT_FOUND_TEXT}\n"),
    }
}

fn render_card(card: &ArticleCardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", card.title);
    let _ = writeln!(out, "  {} | {}", card.date, card.href);
    if !card.excerpt.is_empty() {
        for line in card.excerpt.lines().filter(|line| !line.trim().is_empty()) {
            let _ = writeln!(out, "  {line}");
        }
    }
    out
}

/// Article page fragment. Title and image go through full HTML escaping; the
/// body is already rendered by the core.
pub fn render_article_html(page: &ArticlePageView, preferences: Preferences) -> String {
    format!(
        concat!(
            "<main class=\"article-content\" data-theme=\"{theme}\" data-font=\"{font}\">\n",
            "  <img src=\"{image}\" alt=\"{alt}\" class=\"article-header-image\">\n",
            "  <h1 class=\"article-title\">{title}</h1>\n",
            "  <p class=\"article-meta\">Published {date}</p>\n",
            "  <div class=\"article-body\">\n",
            "    {body}\n",
            "  </div>\n",
            "</main>\n"
        ),
        theme = preferences.theme.as_key(),
        font = preferences.font.as_key(),
        image = encode_attribute(&page.image),
        alt = encode_attribute(&page.title),
        title = encode_minimal(&page.title),
        date = encode_minimal(&page.date),
        body = page.body_html,
    )
}

pub fn render_preferences(preferences: Preferences) -> String {
    format!(
        "theme: {}\nfont: {}",
        preferences.theme.as_key(),
        preferences.font.as_key()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::{Font, Theme};
    use pretty_assertions::assert_eq;

    fn page() -> ArticlePageView {
        ArticlePageView {
            title: "Tom & \"Jerry\"".into(),
            image: "images/a.jpg".into(),
            date: "5 March 2024".into(),
            body_text: "Hello".into(),
            body_html: "<p>Hello</p>".into(),
        }
    }

    fn view(page: PageView) -> AppViewModel {
        AppViewModel {
            preferences: Preferences::default(),
            page,
        }
    }

    #[test]
    fn empty_list_says_nothing_found() {
        let text = render_text(&view(PageView::List {
            query: "x".into(),
            cards: Vec::new(),
        }));
        assert_eq!(text, NO_ARTICLES);
    }

    #[test]
    fn cards_show_date_link_and_excerpt() {
        let text = render_text(&view(PageView::List {
            query: String::new(),
            cards: vec![ArticleCardView {
                slug: "a".into(),
                href: "article.html?id=a".into(),
                title: "A".into(),
                image: String::new(),
                date: "1 January 2024".into(),
                excerpt: "one\n\ntwo".into(),
            }],
        }));
        assert_eq!(text, "A\n  1 January 2024 | article.html?id=a\n  one\n  two\n");
    }

    #[test]
    fn article_html_escapes_title_but_not_body() {
        let prefs = Preferences {
            theme: Theme::Dark,
            font: Font::Naskh,
        };
        let html = render_article_html(&page(), prefs);
        assert!(html.contains("data-theme=\"dark\" data-font=\"naskh\""));
        assert!(html.contains("<h1 class=\"article-title\">Tom &amp; &quot;Jerry&quot;</h1>"));
        assert!(html.contains("    <p>Hello</p>\n"));
    }

    #[test]
    fn not_found_page_explains() {
        let text = render_text(&view(PageView::NotFound));
        assert!(text.starts_with(NOT_FOUND_TITLE));
    }
}
