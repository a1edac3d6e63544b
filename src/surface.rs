// Host rendering surface: named input fields and output regions.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Content written into an output region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    /// Rendered as markup (innerHTML).
    Html(String),
    /// Rendered as literal text (innerText).
    Text(String),
}

impl Markup {
    pub fn body(&self) -> &str {
        match self {
            Markup::Html(s) | Markup::Text(s) => s,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Markup::Html(_) => "text/html; charset=utf-8",
            Markup::Text(_) => "text/plain; charset=utf-8",
        }
    }
}

pub trait Surface: Send + Sync {
    /// Raw text of an input field; empty when the field does not exist.
    fn read_input(&self, field_id: &str) -> String;
    fn write_output(&self, region_id: &str, markup: Markup);
}

#[derive(Default)]
pub struct MemorySurface {
    inputs: RwLock<HashMap<String, String>>,
    outputs: RwLock<HashMap<String, Markup>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&self, field_id: &str, value: impl Into<String>) {
        self.inputs.write().insert(field_id.to_string(), value.into());
    }

    pub fn output(&self, region_id: &str) -> Option<Markup> {
        self.outputs.read().get(region_id).cloned()
    }
}

impl Surface for MemorySurface {
    fn read_input(&self, field_id: &str) -> String {
        self.inputs.read().get(field_id).cloned().unwrap_or_default()
    }

    fn write_output(&self, region_id: &str, markup: Markup) {
        self.outputs.write().insert(region_id.to_string(), markup);
    }
}
