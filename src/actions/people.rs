use serde_json::Value;

use super::extract::{escape_html, str_field};
use super::recipe::Recipe;
use super::Params;
use crate::config::PanelConfig;
use crate::engine::random::RandomSource;
use crate::error::ActionError;
use crate::surface::Markup;

pub const RANDOM_USER_FAILURE: &str = "Failed to fetch user.";

/// Photo, full name and nationality of a generated person from randomuser.me.
pub fn random_user() -> Recipe {
    Recipe::new("randomuser", "randomuser-output", RANDOM_USER_FAILURE, user_url, render)
}

fn user_url(_: &Params, config: &PanelConfig) -> Result<String, ActionError> {
    Ok(format!("{}/api/", config.endpoints.random_user))
}

fn render(_: &Params, body: &Value, _: &dyn RandomSource) -> Result<Markup, ActionError> {
    let photo = str_field(body, "/results/0/picture/medium")?;
    let first = str_field(body, "/results/0/name/first")?;
    let last = str_field(body, "/results/0/name/last")?;
    let nat = str_field(body, "/results/0/nat")?;
    Ok(Markup::Html(format!(
        r#"<img src="{}" alt="User photo"><br>{} {} ({})"#,
        escape_html(photo),
        escape_html(first),
        escape_html(last),
        escape_html(nat),
    )))
}
