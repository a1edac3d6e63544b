// ZenQuotes: load the whole quote list once, then show a random one per click.

use async_trait::async_trait;
use serde::Deserialize;

use super::extract::escape_html;
use super::{Action, ActionContext, Params};
use crate::engine::sampler::{SampleError, SampleOutcome, SampledCollection};
use crate::error::ActionError;
use crate::surface::Markup;

pub const QUOTES_FAILURE: &str = "Failed to fetch quotes.";
pub const QUOTES_LOADING: &str = "Loading quotes...";
pub const QUOTES_LOADED: &str = r#"Quotes loaded. Click "Get Quote" again to see a random quote."#;
pub const NO_QUOTES: &str = "No quotes loaded yet.";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Quote {
    /// Quote text.
    pub q: String,
    /// Author.
    pub a: String,
}

impl Quote {
    pub fn render(&self) -> String {
        format!("\"{}\" — <em>{}</em>", escape_html(&self.q), escape_html(&self.a))
    }
}

pub struct QuoteAction {
    quotes: SampledCollection<Quote>,
}

impl QuoteAction {
    pub fn new(ctx: &ActionContext) -> Self {
        Self {
            quotes: SampledCollection::new(
                ctx.source.clone(),
                ctx.config.endpoints.quotes.clone(),
                ctx.random.clone(),
            ),
        }
    }
}

impl From<SampleError> for ActionError {
    fn from(e: SampleError) -> Self {
        match e {
            SampleError::Fetch(f) => ActionError::Fetch(f),
            SampleError::Empty => ActionError::NotFound(NO_QUOTES),
        }
    }
}

#[async_trait]
impl Action for QuoteAction {
    fn name(&self) -> &'static str {
        "quote"
    }

    fn output_id(&self) -> &'static str {
        "quote-output"
    }

    fn failure_message(&self) -> &'static str {
        QUOTES_FAILURE
    }

    fn loading_message(&self) -> Option<&'static str> {
        if self.quotes.is_loaded() {
            None
        } else {
            Some(QUOTES_LOADING)
        }
    }

    async fn perform(&self, _params: &Params, _ctx: &ActionContext) -> Result<Markup, ActionError> {
        match self.quotes.request_sample().await? {
            SampleOutcome::Loaded { .. } => Ok(Markup::Html(QUOTES_LOADED.to_string())),
            SampleOutcome::Item(quote) => Ok(Markup::Html(quote.render())),
        }
    }
}
