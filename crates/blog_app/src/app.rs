use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use blog_core::{update, AppState, AppViewModel, Msg, Page, PageView};
use blog_engine::{source_for, ArticleSource, SourceSettings};
use engine_logging::engine_debug;

use crate::cli::{Cli, Command};
use crate::effects::EffectRunner;
use crate::{admin, persistence, ui};

/// Reader front-end: owns the state and feeds effect results back into it.
struct Frontend {
    state: AppState,
    runner: EffectRunner,
}

impl Frontend {
    fn new(source: Arc<dyn ArticleSource>, config_dir: PathBuf) -> anyhow::Result<Self> {
        let runner = EffectRunner::new(source, config_dir.clone())
            .context("failed to start the background engine")?;
        let mut frontend = Self {
            state: AppState::new(),
            runner,
        };
        let preferences = persistence::load_preferences(&config_dir);
        frontend.dispatch(Msg::PreferencesRestored(preferences));
        Ok(frontend)
    }

    /// Applies `msg` and every message its effects produce.
    fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            engine_debug!("dispatch {:?}", msg);
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            for effect in effects {
                if let Some(next) = self.runner.run(effect) {
                    inbox.push_back(next);
                }
            }
        }
    }

    fn view(&self) -> AppViewModel {
        self.state.view()
    }
}

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    if let Command::Admin { command } = &cli.command {
        return admin::run(command);
    }

    let source = source_for(&cli.source, SourceSettings::default());
    let mut frontend = Frontend::new(source, cli.config_dir.clone())?;
    println!("{}", render_command(&mut frontend, &cli.command));
    Ok(())
}

fn render_command(frontend: &mut Frontend, command: &Command) -> String {
    match command {
        Command::List { search } => {
            frontend.dispatch(Msg::PageOpened(Page::List));
            if let Some(query) = search {
                frontend.dispatch(Msg::SearchChanged(query.clone()));
            }
            ui::render::render_text(&frontend.view())
        }
        Command::Show { slug, html } => {
            frontend.dispatch(Msg::PageOpened(Page::Article { slug: slug.clone() }));
            let view = frontend.view();
            match &view.page {
                PageView::Article(page) if *html => {
                    ui::render::render_article_html(page, view.preferences)
                }
                _ => ui::render::render_text(&view),
            }
        }
        Command::Theme => {
            frontend.dispatch(Msg::ThemeToggled);
            ui::render::render_preferences(frontend.view().preferences)
        }
        Command::Font => {
            frontend.dispatch(Msg::FontCycled);
            ui::render::render_preferences(frontend.view().preferences)
        }
        Command::Prefs => ui::render::render_preferences(frontend.view().preferences),
        Command::Admin { .. } => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::{Font, Theme};
    use blog_engine::FileSource;
    use pretty_assertions::assert_eq;
    use std::fs;

    const PAYLOAD: &str = r#"[
      {"slug": "old", "title": "Old Post", "publishedAt": "2023-01-02",
       "mainImage": "images/old.jpg", "content": "Legacy <b>text</b>"},
      {"slug": "new", "title": "New Post", "publishedAt": "2024-03-05T10:00:00Z",
       "mainImage": "images/new.jpg",
       "body": [{"_type": "block", "style": "h2", "children": [{"text": "Intro"}]},
                {"_type": "block", "style": "normal", "children": [{"text": "Hello"}]}]}
    ]"#;

    fn frontend(dir: &tempfile::TempDir) -> Frontend {
        let path = dir.path().join("articles.json");
        fs::write(&path, PAYLOAD).unwrap();
        Frontend::new(Arc::new(FileSource::new(path)), dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn list_is_newest_first() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut frontend = frontend(&dir);
        let text = render_command(&mut frontend, &Command::List { search: None });
        let new_at = text.find("New Post").unwrap();
        let old_at = text.find("Old Post").unwrap();
        assert!(new_at < old_at);
        assert!(text.contains("article.html?id=new"));
    }

    #[test]
    fn search_without_matches_reports_nothing_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut frontend = frontend(&dir);
        let text = render_command(
            &mut frontend,
            &Command::List {
                search: Some("zzz".into()),
            },
        );
        assert_eq!(text, "No articles found.");
    }

    #[test]
    fn show_html_renders_blocks() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut frontend = frontend(&dir);
        let html = render_command(
            &mut frontend,
            &Command::Show {
                slug: Some("new".into()),
                html: true,
            },
        );
        assert!(html.contains("<h2>Intro</h2><p>Hello</p>"));
    }

    #[test]
    fn show_escapes_legacy_content() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut frontend = frontend(&dir);
        let html = render_command(
            &mut frontend,
            &Command::Show {
                slug: Some("old".into()),
                html: true,
            },
        );
        assert!(html.contains("Legacy &lt;b&gt;text&lt;/b&gt;"));
    }

    #[test]
    fn unknown_slug_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut frontend = frontend(&dir);
        let text = render_command(
            &mut frontend,
            &Command::Show {
                slug: Some("missing".into()),
                html: true,
            },
        );
        assert!(text.starts_with("Article not found"));
    }

    #[test]
    fn missing_source_shows_empty_list() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = Arc::new(FileSource::new(dir.path().join("absent.json")));
        let mut frontend = Frontend::new(source, dir.path().to_path_buf()).unwrap();
        let text = render_command(&mut frontend, &Command::List { search: None });
        assert_eq!(text, "No articles found.");
    }

    #[test]
    fn theme_toggle_is_remembered() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut first = frontend(&dir);
        render_command(&mut first, &Command::Theme);
        render_command(&mut first, &Command::Font);

        let second = frontend(&dir);
        let prefs = second.view().preferences;
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.font, Font::Naskh);
    }
}
