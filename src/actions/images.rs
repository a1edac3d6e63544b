use serde_json::Value;

use super::extract::{escape_html, str_field};
use super::recipe::Recipe;
use super::Params;
use crate::config::PanelConfig;
use crate::engine::random::RandomSource;
use crate::error::ActionError;
use crate::surface::Markup;

pub const DOG_FAILURE: &str = "Failed to fetch dog image.";
pub const CAT_FAILURE: &str = "Failed to fetch cat image.";

/// Random dog picture from the Dog CEO API.
pub fn dog() -> Recipe {
    Recipe::new("dog", "dog-output", DOG_FAILURE, dog_url, render_dog)
}

/// Random cat picture from The Cat API.
pub fn cat() -> Recipe {
    Recipe::new("cat", "cat-output", CAT_FAILURE, cat_url, render_cat)
}

fn dog_url(_: &Params, config: &PanelConfig) -> Result<String, ActionError> {
    Ok(format!("{}/api/breeds/image/random", config.endpoints.dog))
}

fn cat_url(_: &Params, config: &PanelConfig) -> Result<String, ActionError> {
    Ok(format!("{}/v1/images/search", config.endpoints.cat))
}

fn render_dog(_: &Params, body: &Value, _: &dyn RandomSource) -> Result<Markup, ActionError> {
    Ok(image(str_field(body, "/message")?, "Dog"))
}

fn render_cat(_: &Params, body: &Value, _: &dyn RandomSource) -> Result<Markup, ActionError> {
    Ok(image(str_field(body, "/0/url")?, "Cat"))
}

fn image(src: &str, alt: &str) -> Markup {
    Markup::Html(format!(r#"<img src="{}" alt="{}" />"#, escape_html(src), alt))
}
