use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use blog_core::Article;
use engine_logging::engine_warn;

use crate::publish::{GithubPublisher, PublishTarget};
use crate::source::ArticleSource;
use crate::{EngineError, EngineEvent, FailureKind, PublishOutcome, RequestId};

enum EngineCommand {
    LoadArticles {
        request_id: RequestId,
    },
    Publish {
        request_id: RequestId,
        target: PublishTarget,
        payload: String,
    },
}

/// Runs article loads and uploads on a background tokio runtime.
///
/// Commands go in through the handle; results come back as [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(source: Arc<dyn ArticleSource>) -> io::Result<Self> {
        Self::spawn(Some(source))
    }

    /// An engine for uploads only; article requests fail with
    /// [`FailureKind::InvalidLocation`].
    pub fn publisher() -> io::Result<Self> {
        Self::spawn(None)
    }

    fn spawn(source: Option<Arc<dyn ArticleSource>>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let source = source.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(source.as_deref(), command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn request_articles(&self, request_id: RequestId) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::LoadArticles { request_id });
    }

    pub fn publish(&self, request_id: RequestId, target: PublishTarget, payload: String) {
        let _ = self.cmd_tx.send(EngineCommand::Publish {
            request_id,
            target,
            payload,
        });
    }

    /// Blocks until the next event; `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    /// Requests the articles and waits for that request's result.
    ///
    /// Events belonging to other requests are dropped.
    pub fn load_articles_blocking(
        &self,
        request_id: RequestId,
    ) -> Result<Vec<Article>, EngineError> {
        self.request_articles(request_id);
        loop {
            match self.recv() {
                Some(EngineEvent::ArticlesLoaded {
                    request_id: id,
                    result,
                }) if id == request_id => return result,
                Some(_) => continue,
                None => return Err(disconnected()),
            }
        }
    }

    /// Publishes `payload` and waits for that request's result.
    pub fn publish_blocking(
        &self,
        request_id: RequestId,
        target: PublishTarget,
        payload: String,
    ) -> Result<PublishOutcome, EngineError> {
        self.publish(request_id, target, payload);
        loop {
            match self.recv() {
                Some(EngineEvent::Published {
                    request_id: id,
                    result,
                }) if id == request_id => return result,
                Some(_) => continue,
                None => return Err(disconnected()),
            }
        }
    }
}

async fn handle_command(
    source: Option<&dyn ArticleSource>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::LoadArticles { request_id } => {
            let result = match source {
                Some(source) => {
                    let result = source.load().await;
                    if let Err(err) = &result {
                        engine_warn!("Loading articles from {} failed: {}", source.describe(), err);
                    }
                    result
                }
                None => Err(EngineError::new(
                    FailureKind::InvalidLocation,
                    "engine was started without an article source",
                )),
            };
            EngineEvent::ArticlesLoaded { request_id, result }
        }
        EngineCommand::Publish {
            request_id,
            target,
            payload,
        } => {
            let result = match GithubPublisher::new(target) {
                Ok(publisher) => publisher.publish(&payload).await,
                Err(err) => Err(err),
            };
            if let Err(err) = &result {
                engine_warn!("Publishing articles failed: {}", err);
            }
            EngineEvent::Published { request_id, result }
        }
    };
    let _ = event_tx.send(event);
}

fn disconnected() -> EngineError {
    EngineError::new(FailureKind::Disconnected, "engine thread stopped")
}
