use crate::{AppState, Effect, LoadState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageOpened(page) => {
            state.open_page(page);
            if state.load_state() == LoadState::NotRequested {
                state.begin_loading();
                vec![Effect::LoadArticles]
            } else {
                Vec::new()
            }
        }
        Msg::ArticlesLoaded(articles) => {
            state.set_articles(articles);
            Vec::new()
        }
        Msg::ArticlesFailed(reason) => {
            state.fail_loading(reason);
            Vec::new()
        }
        Msg::SearchChanged(query) => {
            state.set_query(query);
            Vec::new()
        }
        Msg::ThemeToggled => {
            let mut preferences = state.preferences();
            preferences.theme = preferences.theme.toggled();
            state.set_preferences(preferences);
            vec![Effect::SavePreferences(preferences)]
        }
        Msg::FontCycled => {
            let mut preferences = state.preferences();
            preferences.font = preferences.font.next();
            state.set_preferences(preferences);
            vec![Effect::SavePreferences(preferences)]
        }
        Msg::PreferencesRestored(preferences) => {
            state.set_preferences(preferences);
            Vec::new()
        }
    };

    (state, effects)
}
