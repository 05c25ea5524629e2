use std::sync::Once;

use blog_core::{
    update, AppState, Article, ArticleBody, Effect, Font, LoadState, Msg, Page, PageView,
    Preferences, Theme,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn article(slug: &str, title: &str, published_at: &str, content: &str) -> Article {
    Article {
        slug: slug.into(),
        title: title.into(),
        published_at: published_at.into(),
        main_image: format!("images/{slug}.jpg"),
        body: ArticleBody::PlainText(content.into()),
        extra: Default::default(),
    }
}

fn loaded(page: Page) -> AppState {
    let (state, effects) = update(AppState::new(), Msg::PageOpened(page));
    assert_eq!(effects, vec![Effect::LoadArticles]);
    let (state, effects) = update(
        state,
        Msg::ArticlesLoaded(vec![
            article("older", "Older post", "2024-01-01T00:00:00Z", "old body"),
            article("newer", "Newer post", "2024-03-05T00:00:00Z", "new <b>body</b>"),
        ]),
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn opening_a_page_loads_articles_once() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::PageOpened(Page::List));
    assert_eq!(effects, vec![Effect::LoadArticles]);
    assert_eq!(state.load_state(), LoadState::Loading);
    assert_eq!(state.view().page, PageView::Loading);

    let (_state, effects) = update(state, Msg::PageOpened(Page::List));
    assert!(effects.is_empty());
}

#[test]
fn list_shows_newest_first_with_excerpts() {
    init_logging();
    let state = loaded(Page::List);
    match state.view().page {
        PageView::List { query, cards } => {
            assert_eq!(query, "");
            let slugs: Vec<&str> = cards.iter().map(|c| c.slug.as_str()).collect();
            assert_eq!(slugs, vec!["newer", "older"]);
            assert_eq!(cards[0].href, "article.html?id=newer");
            assert_eq!(cards[0].date, "5 March 2024");
            assert_eq!(cards[0].excerpt, "new <b>body</b>");
            assert_eq!(cards[0].image, "images/newer.jpg");
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn search_filters_cards_by_title() {
    init_logging();
    let state = loaded(Page::List);
    let (state, effects) = update(state, Msg::SearchChanged("NEWER".into()));
    assert!(effects.is_empty());

    match state.view().page {
        PageView::List { cards, .. } => {
            assert_eq!(cards.len(), 1);
            assert_eq!(cards[0].slug, "newer");
        }
        other => panic!("expected list, got {other:?}"),
    }

    let (state, _) = update(state, Msg::SearchChanged("nothing like this".into()));
    assert_eq!(
        state.view().page,
        PageView::List {
            query: "nothing like this".into(),
            cards: Vec::new(),
        }
    );
}

#[test]
fn article_page_renders_body_html() {
    init_logging();
    let state = loaded(Page::Article {
        slug: Some("newer".into()),
    });
    match state.view().page {
        PageView::Article(page) => {
            assert_eq!(page.title, "Newer post");
            assert_eq!(page.body_html, "<p>new &lt;b&gt;body&lt;/b&gt;</p>");
            assert_eq!(page.date, "5 March 2024");
        }
        other => panic!("expected article, got {other:?}"),
    }
}

#[test]
fn unknown_or_missing_slug_is_not_found() {
    init_logging();
    let state = loaded(Page::Article {
        slug: Some("nope".into()),
    });
    assert_eq!(state.view().page, PageView::NotFound);

    let (state, effects) = update(state, Msg::PageOpened(Page::Article { slug: None }));
    assert!(effects.is_empty());
    assert_eq!(state.view().page, PageView::NotFound);
}

#[test]
fn failed_load_shows_empty_list() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::PageOpened(Page::List));
    let (state, effects) = update(state, Msg::ArticlesFailed("http status 500".into()));
    assert!(effects.is_empty());
    assert_eq!(state.last_error(), Some("http status 500"));
    assert_eq!(
        state.view().page,
        PageView::List {
            query: String::new(),
            cards: Vec::new(),
        }
    );
}

#[test]
fn theme_toggle_flips_and_persists() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::ThemeToggled);
    let dark = Preferences {
        theme: Theme::Dark,
        font: Font::Serif,
    };
    assert_eq!(effects, vec![Effect::SavePreferences(dark)]);
    assert_eq!(state.view().preferences, dark);

    let (state, _) = update(state, Msg::ThemeToggled);
    assert_eq!(state.preferences().theme, Theme::Light);
}

#[test]
fn font_cycle_persists_each_step() {
    init_logging();
    let mut state = AppState::new();
    let mut fonts = Vec::new();
    for _ in 0..4 {
        let (next, effects) = update(state, Msg::FontCycled);
        match effects.as_slice() {
            [Effect::SavePreferences(prefs)] => fonts.push(prefs.font),
            other => panic!("unexpected effects {other:?}"),
        }
        state = next;
    }
    assert_eq!(fonts, vec![Font::Naskh, Font::Sans, Font::Tajawal, Font::Serif]);
}

#[test]
fn restored_preferences_are_not_saved_again() {
    init_logging();
    let prefs = Preferences {
        theme: Theme::Dark,
        font: Font::Tajawal,
    };
    let (state, effects) = update(AppState::new(), Msg::PreferencesRestored(prefs));
    assert!(effects.is_empty());
    assert_eq!(state.preferences(), prefs);
}
