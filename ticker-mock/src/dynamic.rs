use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ticker_core::{Page, PageSource, TickerError};

/// Instruction for how a fetch should behave for a given URL.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Serve the provided body immediately.
    Return(String),
    /// Serve the provided body after sleeping.
    Delay(Duration, String),
    /// Fail immediately with the provided error.
    Fail(TickerError),
    /// Hang indefinitely (simulate a stalled server).
    Hang,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<String, MockBehavior>,
    requests: Vec<String>,
}

/// Controller handle used by tests to drive a [`MockPageSource`] from the outside.
#[derive(Clone)]
pub struct MockPageController {
    state: Arc<Mutex<InternalState>>,
}

impl MockPageController {
    /// Set the behavior for a URL, replacing any previous one.
    pub async fn set_behavior(&self, url: impl Into<String>, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(url.into(), behavior);
    }

    /// Serve `body` for `url`.
    pub async fn serve(&self, url: impl Into<String>, body: impl Into<String>) {
        self.set_behavior(url, MockBehavior::Return(body.into())).await;
    }

    /// URLs requested so far, in request order.
    pub async fn requests(&self) -> Vec<String> {
        self.state.lock().await.requests.clone()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.requests.clear();
    }
}

/// A page source that defers all behavior to a [`MockPageController`].
///
/// URLs with no configured behavior answer with a `404` status error.
pub struct MockPageSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl MockPageSource {
    /// Create a mock source and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn PageSource>, MockPageController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = MockPageController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn PageSource>, controller)
    }
}

#[async_trait]
impl PageSource for MockPageSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, url: &str) -> Result<Page, TickerError> {
        // Snapshot the rule without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push(url.to_string());
            guard.rules.get(url).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(body)) => Ok(Page::new(url, body)),
            Some(MockBehavior::Delay(d, body)) => {
                tokio::time::sleep(d).await;
                Ok(Page::new(url, body))
            }
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(TickerError::status(url, 404)),
        }
    }
}
