// Three random picks from TMDB's daily trending movies.

use serde_json::Value;

use super::extract::{build_url, escape_html, str_field};
use super::recipe::Recipe;
use super::Params;
use crate::config::{PanelConfig, MOVIE_PICKS};
use crate::engine::random::{shuffle, RandomSource};
use crate::error::ActionError;
use crate::surface::Markup;

pub const MOVIES_FAILURE: &str = "Failed to fetch movies.";
pub const MOVIES_NOT_CONFIGURED: &str = "Movie lookup is not configured.";

pub fn movies() -> Recipe {
    Recipe::new("movies", "movie-output", MOVIES_FAILURE, trending_url, render)
        .validate_with(require_key)
}

fn require_key(_: &Params, config: &PanelConfig) -> Result<(), ActionError> {
    config
        .tmdb_key()
        .map(|_| ())
        .ok_or(ActionError::Invalid(MOVIES_NOT_CONFIGURED))
}

fn trending_url(_: &Params, config: &PanelConfig) -> Result<String, ActionError> {
    let key = config
        .tmdb_key()
        .ok_or(ActionError::Invalid(MOVIES_NOT_CONFIGURED))?;
    build_url(
        &config.endpoints.tmdb,
        &["3", "trending", "movie", "day"],
        &[("api_key", key)],
    )
}

fn render(_: &Params, body: &Value, random: &dyn RandomSource) -> Result<Markup, ActionError> {
    let results = body
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| ActionError::Shape("missing `results`".to_string()))?;

    let mut titles = results
        .iter()
        .map(|m| str_field(m, "/title"))
        .collect::<Result<Vec<_>, _>>()?;
    shuffle(&mut titles, random);

    let html = titles
        .iter()
        .take(MOVIE_PICKS)
        .map(|t| format!("<p>{}</p>", escape_html(t)))
        .collect::<String>();
    Ok(Markup::Html(html))
}
