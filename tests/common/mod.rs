// Shared fakes for integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use api_panel_engine::error::FetchError;
use api_panel_engine::source::traits::JsonSource;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

#[derive(Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
    Transport,
}

/// In-memory JSON source answering by URL substring, recording every URL requested.
#[derive(Default)]
pub struct FakeSource {
    routes: Mutex<Vec<(String, Reply)>>,
    calls: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Later routes take priority, so a test can replace an earlier reply.
    pub fn route(&self, needle: &str, reply: Reply) -> &Self {
        self.routes.lock().push((needle.to_string(), reply));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls_matching(&self, needle: &str) -> usize {
        self.calls.lock().iter().filter(|u| u.contains(needle)).count()
    }
}

#[async_trait]
impl JsonSource for FakeSource {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        self.calls.lock().push(url.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let reply = self
            .routes
            .lock()
            .iter()
            .rev()
            .find(|(needle, _)| url.contains(needle.as_str()))
            .map(|(_, r)| r.clone());
        match reply {
            Some(Reply::Json(v)) => Ok(v),
            Some(Reply::Status(code)) => Err(FetchError::Status(code)),
            Some(Reply::Transport) | None => Err(FetchError::Transport(format!("no route for {}", url))),
        }
    }
}

pub fn shared(source: FakeSource) -> Arc<FakeSource> {
    Arc::new(source)
}
