// Generic fetch → extract → render action built from plain functions.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{Action, ActionContext, Params};
use crate::config::PanelConfig;
use crate::engine::random::RandomSource;
use crate::error::ActionError;
use crate::surface::Markup;

pub type ValidateFn = fn(&Params, &PanelConfig) -> Result<(), ActionError>;
pub type RequestFn = fn(&Params, &PanelConfig) -> Result<String, ActionError>;
pub type FollowUpFn = fn(&Params, &Value, &PanelConfig) -> Result<String, ActionError>;
pub type RenderFn = fn(&Params, &Value, &dyn RandomSource) -> Result<Markup, ActionError>;

pub struct Recipe {
    name: &'static str,
    output_id: &'static str,
    inputs: &'static [&'static str],
    failure: &'static str,
    validate: Option<ValidateFn>,
    request: RequestFn,
    follow_up: Option<FollowUpFn>,
    render: RenderFn,
}

impl Recipe {
    pub fn new(
        name: &'static str,
        output_id: &'static str,
        failure: &'static str,
        request: RequestFn,
        render: RenderFn,
    ) -> Self {
        Self {
            name,
            output_id,
            inputs: &[],
            failure,
            validate: None,
            request,
            follow_up: None,
            render,
        }
    }

    pub fn inputs(mut self, inputs: &'static [&'static str]) -> Self {
        self.inputs = inputs;
        self
    }

    /// Input check run before the loading placeholder and before any request.
    pub fn validate_with(mut self, validate: ValidateFn) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Second request derived from the first response body.
    pub fn follow_up(mut self, follow_up: FollowUpFn) -> Self {
        self.follow_up = Some(follow_up);
        self
    }
}

#[async_trait]
impl Action for Recipe {
    fn name(&self) -> &'static str {
        self.name
    }

    fn output_id(&self) -> &'static str {
        self.output_id
    }

    fn input_ids(&self) -> &'static [&'static str] {
        self.inputs
    }

    fn failure_message(&self) -> &'static str {
        self.failure
    }

    fn validate(&self, params: &Params, config: &PanelConfig) -> Result<(), ActionError> {
        match self.validate {
            Some(validate) => validate(params, config),
            None => Ok(()),
        }
    }

    async fn perform(&self, params: &Params, ctx: &ActionContext) -> Result<Markup, ActionError> {
        let config = ctx.config.as_ref();
        let url = (self.request)(params, config)?;
        debug!("{} request url={}", self.name, url);
        let mut body = ctx.source.get_json(&url).await?;

        if let Some(follow_up) = self.follow_up {
            let next = follow_up(params, &body, config)?;
            debug!("{} follow-up url={}", self.name, next);
            body = ctx.source.get_json(&next).await?;
        }

        (self.render)(params, &body, ctx.random.as_ref())
    }
}
