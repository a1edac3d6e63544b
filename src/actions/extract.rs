// JSON field extraction, URL templating and HTML escaping shared by the actions.

use reqwest::Url;
use serde_json::Value;

use crate::error::{ActionError, FetchError};

/// Look up a JSON pointer (`/a/0/b`), rejecting missing and `null` values.
pub fn field<'a>(body: &'a Value, pointer: &str) -> Result<&'a Value, ActionError> {
    match body.pointer(pointer) {
        Some(Value::Null) | None => Err(ActionError::Shape(format!("missing `{}`", pointer))),
        Some(v) => Ok(v),
    }
}

pub fn str_field<'a>(body: &'a Value, pointer: &str) -> Result<&'a str, ActionError> {
    field(body, pointer)?
        .as_str()
        .ok_or_else(|| ActionError::Shape(format!("`{}` is not a string", pointer)))
}

/// A field rendered as display text: strings verbatim, numbers and bools as JSON.
pub fn scalar_field(body: &Value, pointer: &str) -> Result<String, ActionError> {
    Ok(scalar(field(body, pointer)?))
}

pub fn scalar(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Non-empty string at `pointer`, if any. Used for "x || y" fallbacks.
pub fn non_empty_str<'a>(body: &'a Value, pointer: &str) -> Option<&'a str> {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// `base` plus percent-encoded path segments and query pairs.
pub fn build_url(base: &str, segments: &[&str], query: &[(&str, &str)]) -> Result<String, ActionError> {
    let mut url = Url::parse(base).map_err(|e| invalid_url(base, e))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| invalid_url(base, "cannot be a base"))?;
        path.pop_if_empty().extend(segments);
    }
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url.into())
}

fn invalid_url(base: &str, e: impl std::fmt::Display) -> ActionError {
    ActionError::Fetch(FetchError::Transport(format!("invalid url {}: {}", base, e)))
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
