use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::traits::JsonSource;
use crate::engine::stats::PanelStats;
use crate::error::FetchError;

/// Decorator that records every outgoing request in the panel stats.
pub struct CountingSource {
    inner: Arc<dyn JsonSource>,
    stats: Arc<PanelStats>,
}

impl CountingSource {
    pub fn new(inner: Arc<dyn JsonSource>, stats: Arc<PanelStats>) -> Self {
        Self { inner, stats }
    }
}

#[async_trait]
impl JsonSource for CountingSource {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        self.stats.record_request();
        let result = self.inner.get_json(url).await;
        if result.is_err() {
            self.stats.record_request_error();
        }
        result
    }
}
