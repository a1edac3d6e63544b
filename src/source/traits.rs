use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

/// A remote collaborator reachable by HTTP GET that answers with JSON.
#[async_trait]
pub trait JsonSource: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}
