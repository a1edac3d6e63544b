// Single-field text collaborators: JokeAPI, Advice Slip and Numbers API.

use serde_json::Value;

use super::extract::{escape_html, str_field};
use super::recipe::Recipe;
use super::Params;
use crate::config::PanelConfig;
use crate::engine::random::RandomSource;
use crate::error::ActionError;
use crate::surface::Markup;

pub const JOKE_FAILURE: &str = "Failed to fetch joke.";
pub const ADVICE_FAILURE: &str = "Failed to fetch advice.";
pub const NUMBER_FAILURE: &str = "Failed to fetch number trivia.";

pub fn joke() -> Recipe {
    Recipe::new("joke", "joke-output", JOKE_FAILURE, joke_url, render_joke)
}

pub fn advice() -> Recipe {
    Recipe::new("advice", "advice-output", ADVICE_FAILURE, advice_url, render_advice)
}

pub fn number_trivia() -> Recipe {
    Recipe::new("number", "number-output", NUMBER_FAILURE, number_url, render_number)
}

fn joke_url(_: &Params, config: &PanelConfig) -> Result<String, ActionError> {
    Ok(format!("{}/joke/Any?type=single", config.endpoints.joke))
}

fn advice_url(_: &Params, config: &PanelConfig) -> Result<String, ActionError> {
    Ok(format!("{}/advice", config.endpoints.advice))
}

fn number_url(_: &Params, config: &PanelConfig) -> Result<String, ActionError> {
    Ok(format!("{}/random/trivia?json", config.endpoints.numbers))
}

fn render_joke(_: &Params, body: &Value, _: &dyn RandomSource) -> Result<Markup, ActionError> {
    Ok(Markup::Html(escape_html(str_field(body, "/joke")?)))
}

fn render_advice(_: &Params, body: &Value, _: &dyn RandomSource) -> Result<Markup, ActionError> {
    Ok(Markup::Text(str_field(body, "/slip/advice")?.to_string()))
}

fn render_number(_: &Params, body: &Value, _: &dyn RandomSource) -> Result<Markup, ActionError> {
    Ok(Markup::Text(str_field(body, "/text")?.to_string()))
}
