// Action registry and the trigger driver: validate, show loading, perform, render.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, warn};

use super::random::{RandomSource, ThreadRandom};
use super::stats::{PanelStats, StatsSnapshot};
use crate::actions::{catalog, Action, ActionContext, Params};
use crate::config::PanelConfig;
use crate::source::counting_source::CountingSource;
use crate::source::http_source::HttpSource;
use crate::source::traits::JsonSource;
use crate::surface::{Markup, Surface};

/// What a trigger finally wrote into its output region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerOutcome {
    pub output_id: &'static str,
    pub markup: Markup,
}

pub struct Panel {
    actions: HashMap<&'static str, Arc<dyn Action>>,
    order: Vec<&'static str>,
    ctx: ActionContext,
    stats: Arc<PanelStats>,
}

impl Panel {
    /// Panel over live HTTP and the thread PRNG.
    pub fn standard(config: PanelConfig) -> Result<Self> {
        let source = Arc::new(HttpSource::from_config(&config)?);
        Ok(Self::with_parts(config, source, Arc::new(ThreadRandom)))
    }

    pub fn with_parts(
        config: PanelConfig,
        source: Arc<dyn JsonSource>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        let stats = Arc::new(PanelStats::new());
        let ctx = ActionContext {
            source: Arc::new(CountingSource::new(source, stats.clone())),
            random,
            config: Arc::new(config),
        };

        let mut actions = HashMap::new();
        let mut order = Vec::new();
        for action in catalog(&ctx) {
            order.push(action.name());
            actions.insert(action.name(), action);
        }
        info!("panel ready with {} actions", order.len());

        Self {
            actions,
            order,
            ctx,
            stats,
        }
    }

    /// Action names in display order.
    pub fn action_names(&self) -> &[&'static str] {
        &self.order
    }

    pub fn action(&self, name: &str) -> Option<&Arc<dyn Action>> {
        self.actions.get(name)
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Run one action against `surface`. Returns `None` for an unknown action.
    ///
    /// Every path ends with a message in the action's output region; failures
    /// stay local to this call.
    pub async fn trigger(&self, name: &str, surface: &dyn Surface) -> Option<TriggerOutcome> {
        let action = self.actions.get(name)?.clone();
        self.stats.record_triggered();

        let output_id = action.output_id();
        let params = Params::read(surface, action.input_ids());

        if let Err(e) = action.validate(&params, &self.ctx.config) {
            debug!("action {} rejected: {}", name, e);
            self.stats.record_rejected();
            let markup = Markup::Text(e.user_message(action.failure_message()).to_string());
            surface.write_output(output_id, markup.clone());
            return Some(TriggerOutcome { output_id, markup });
        }

        if let Some(loading) = action.loading_message() {
            surface.write_output(output_id, Markup::Text(loading.to_string()));
        }

        let markup = match action.perform(&params, &self.ctx).await {
            Ok(markup) => {
                self.stats.record_succeeded();
                markup
            }
            Err(e) => {
                warn!("action {} failed: {}", name, e);
                self.stats.record_failed();
                Markup::Text(e.user_message(action.failure_message()).to_string())
            }
        };

        surface.write_output(output_id, markup.clone());
        Some(TriggerOutcome { output_id, markup })
    }
}
