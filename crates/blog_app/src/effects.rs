use std::path::PathBuf;
use std::sync::Arc;

use blog_core::{Effect, Msg};
use blog_engine::{ArticleSource, EngineHandle, RequestId};
use engine_logging::{engine_info, engine_warn};

use crate::persistence;

/// Executes core effects and turns their outcome back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    config_dir: PathBuf,
    next_request: RequestId,
}

impl EffectRunner {
    pub fn new(source: Arc<dyn ArticleSource>, config_dir: PathBuf) -> std::io::Result<Self> {
        Ok(Self {
            engine: EngineHandle::new(source)?,
            config_dir,
            next_request: 1,
        })
    }

    pub fn run(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::LoadArticles => {
                let request_id = self.next_request;
                self.next_request += 1;
                engine_info!("LoadArticles request_id={}", request_id);
                match self.engine.load_articles_blocking(request_id) {
                    Ok(articles) => Some(Msg::ArticlesLoaded(articles)),
                    Err(err) => {
                        engine_warn!("Articles unavailable: {}", err);
                        Some(Msg::ArticlesFailed(err.to_string()))
                    }
                }
            }
            Effect::SavePreferences(preferences) => {
                persistence::save_preferences(&self.config_dir, &preferences);
                None
            }
        }
    }
}
