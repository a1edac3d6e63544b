// Fetch-once, sample-many cache over a remote JSON collection.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::random::{uniform_index, RandomSource};
use crate::error::FetchError;
use crate::source::traits::JsonSource;

enum CacheState<T> {
    Empty,
    Loaded(Arc<[T]>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleOutcome<T> {
    /// The collection was fetched by this call; ask again to get an item.
    Loaded { count: usize },
    Item(T),
}

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("collection fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("collection is empty")]
    Empty,
}

pub struct SampledCollection<T> {
    source: Arc<dyn JsonSource>,
    url: String,
    random: Arc<dyn RandomSource>,
    state: RwLock<CacheState<T>>,
    load_lock: Mutex<()>,
}

impl<T> SampledCollection<T>
where
    T: DeserializeOwned + Clone + Send + Sync,
{
    pub fn new(source: Arc<dyn JsonSource>, url: String, random: Arc<dyn RandomSource>) -> Self {
        Self {
            source,
            url,
            random,
            state: RwLock::new(CacheState::Empty),
            load_lock: Mutex::new(()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(*self.state.read(), CacheState::Loaded(_))
    }

    /// Number of cached items; 0 until loaded.
    pub fn len(&self) -> usize {
        match &*self.state.read() {
            CacheState::Empty => 0,
            CacheState::Loaded(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load the collection on first use, otherwise return one uniformly chosen item.
    ///
    /// At most one fetch is in flight at a time. A caller that waited on
    /// another caller's fetch sees the loaded state and returns
    /// [`SampleOutcome::Loaded`] without fetching again. A failed fetch leaves
    /// the cache empty so the next call retries.
    pub async fn request_sample(&self) -> Result<SampleOutcome<T>, SampleError> {
        if let Some(items) = self.loaded_items() {
            return self.pick(&items);
        }

        let _guard = self.load_lock.lock().await;
        if let Some(items) = self.loaded_items() {
            debug!("collection {} loaded while waiting", self.url);
            return Ok(SampleOutcome::Loaded { count: items.len() });
        }

        let body = self.source.get_json(&self.url).await.map_err(|e| {
            warn!("collection fetch failed url={} err={}", self.url, e);
            SampleError::Fetch(e)
        })?;
        let items: Vec<T> = serde_json::from_value(body).map_err(|e| {
            warn!("collection decode failed url={} err={}", self.url, e);
            SampleError::Fetch(FetchError::Decode(e))
        })?;

        let count = items.len();
        *self.state.write() = CacheState::Loaded(items.into());
        info!("collection loaded url={} items={}", self.url, count);
        Ok(SampleOutcome::Loaded { count })
    }

    fn loaded_items(&self) -> Option<Arc<[T]>> {
        match &*self.state.read() {
            CacheState::Empty => None,
            CacheState::Loaded(items) => Some(items.clone()),
        }
    }

    fn pick(&self, items: &[T]) -> Result<SampleOutcome<T>, SampleError> {
        let idx = uniform_index(items.len(), self.random.as_ref()).ok_or(SampleError::Empty)?;
        Ok(SampleOutcome::Item(items[idx].clone()))
    }
}
