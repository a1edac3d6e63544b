// Panel actions: one trait, one generic recipe, and the concrete collaborators.

pub mod currency;
pub mod extract;
pub mod github;
pub mod images;
pub mod movies;
pub mod people;
pub mod quotes;
pub mod recipe;
pub mod spacex;
pub mod trivia;
pub mod weather;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{PanelConfig, LOADING_MESSAGE};
use crate::engine::random::RandomSource;
use crate::error::ActionError;
use crate::source::traits::JsonSource;
use crate::surface::{Markup, Surface};

/// Everything an action may touch while performing.
#[derive(Clone)]
pub struct ActionContext {
    pub source: Arc<dyn JsonSource>,
    pub random: Arc<dyn RandomSource>,
    pub config: Arc<PanelConfig>,
}

/// Trimmed input values keyed by field id.
#[derive(Debug, Clone, Default)]
pub struct Params {
    values: HashMap<&'static str, String>,
}

impl Params {
    pub fn read(surface: &dyn Surface, field_ids: &[&'static str]) -> Self {
        let values = field_ids
            .iter()
            .map(|id| (*id, surface.read_input(id).trim().to_string()))
            .collect();
        Self { values }
    }

    pub fn from_pairs(pairs: &[(&'static str, &str)]) -> Self {
        let values = pairs
            .iter()
            .map(|(k, v)| (*k, v.trim().to_string()))
            .collect();
        Self { values }
    }

    /// Value of a field, or `""` if the action never declared it.
    pub fn get(&self, field_id: &str) -> &str {
        self.values.get(field_id).map(String::as_str).unwrap_or("")
    }
}

#[async_trait]
pub trait Action: Send + Sync {
    /// Registry key, e.g. `"weather"`.
    fn name(&self) -> &'static str;

    /// Output region the action renders into.
    fn output_id(&self) -> &'static str;

    /// Input fields read before every run.
    fn input_ids(&self) -> &'static [&'static str] {
        &[]
    }

    /// Generic message for transport, status and shape failures.
    fn failure_message(&self) -> &'static str;

    /// Placeholder shown while performing; `None` renders nothing until done.
    fn loading_message(&self) -> Option<&'static str> {
        Some(LOADING_MESSAGE)
    }

    /// Cheap input checks. Must not touch the network.
    fn validate(&self, _params: &Params, _config: &PanelConfig) -> Result<(), ActionError> {
        Ok(())
    }

    async fn perform(&self, params: &Params, ctx: &ActionContext) -> Result<Markup, ActionError>;
}

/// Every action the panel ships with, in display order.
pub fn catalog(ctx: &ActionContext) -> Vec<Arc<dyn Action>> {
    vec![
        shared(images::dog()),
        shared(images::cat()),
        shared(weather::weather()),
        shared(currency::currency()),
        shared(movies::movies()),
        shared(github::github_user()),
        shared(trivia::joke()),
        shared(people::random_user()),
        shared(trivia::advice()),
        shared(trivia::number_trivia()),
        shared(quotes::QuoteAction::new(ctx)),
        shared(spacex::launch()),
    ]
}

fn shared(action: impl Action + 'static) -> Arc<dyn Action> {
    Arc::new(action)
}
