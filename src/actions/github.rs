use serde_json::Value;

use super::extract::{build_url, escape_html, non_empty_str, scalar_field, str_field};
use super::recipe::Recipe;
use super::Params;
use crate::config::PanelConfig;
use crate::engine::random::RandomSource;
use crate::error::ActionError;
use crate::surface::Markup;

pub const USERNAME_INPUT: &str = "github-input";
pub const USER_NOT_FOUND: &str = "User not found.";
pub const ENTER_USERNAME: &str = "Please enter a username.";

/// Avatar, display name and follower count of a GitHub user.
pub fn github_user() -> Recipe {
    Recipe::new("github", "github-output", USER_NOT_FOUND, user_url, render)
        .inputs(&[USERNAME_INPUT])
        .validate_with(require_username)
}

fn require_username(params: &Params, _: &PanelConfig) -> Result<(), ActionError> {
    if params.get(USERNAME_INPUT).is_empty() {
        return Err(ActionError::Invalid(ENTER_USERNAME));
    }
    Ok(())
}

fn user_url(params: &Params, config: &PanelConfig) -> Result<String, ActionError> {
    build_url(
        &config.endpoints.github,
        &["users", params.get(USERNAME_INPUT)],
        &[],
    )
}

fn render(_: &Params, user: &Value, _: &dyn RandomSource) -> Result<Markup, ActionError> {
    let avatar = str_field(user, "/avatar_url")?;
    let display = match non_empty_str(user, "/name") {
        Some(name) => name,
        None => str_field(user, "/login")?,
    };
    let followers = scalar_field(user, "/followers")?;
    Ok(Markup::Html(format!(
        r#"<img src="{}" alt="Avatar" width="100"/><p>{}</p><p>Followers: {}</p>"#,
        escape_html(avatar),
        escape_html(display),
        escape_html(&followers),
    )))
}
