// Panel engine: independent REST API actions rendered into named output regions.

pub mod actions;
pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod server;
pub mod source;
pub mod surface;
