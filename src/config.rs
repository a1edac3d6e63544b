use anyhow::{Context, Result};
use serde::Deserialize;

/// Placeholder written into an output region while an action is in flight.
pub const LOADING_MESSAGE: &str = "Loading...";

/// Default `User-Agent` sent with every request. GitHub and Nominatim reject anonymous clients.
pub const DEFAULT_USER_AGENT: &str = concat!("api_panel_engine/", env!("CARGO_PKG_VERSION"));

/// Number of trending movies rendered per click.
pub const MOVIE_PICKS: usize = 3;

/// Base URLs of every remote collaborator.
///
/// Paths are appended by the individual actions; overriding a base lets tests
/// point an action at a local fake upstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub dog: String,
    pub cat: String,
    pub geocode: String,
    pub forecast: String,
    pub currency: String,
    pub tmdb: String,
    pub github: String,
    pub joke: String,
    pub random_user: String,
    pub advice: String,
    pub numbers: String,
    /// Full URL of the quote collection (not a base).
    pub quotes: String,
    pub spacex: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            dog: "https://dog.ceo".to_string(),
            cat: "https://api.thecatapi.com".to_string(),
            geocode: "https://nominatim.openstreetmap.org".to_string(),
            forecast: "https://api.open-meteo.com".to_string(),
            currency: "https://open.er-api.com".to_string(),
            tmdb: "https://api.themoviedb.org".to_string(),
            github: "https://api.github.com".to_string(),
            joke: "https://v2.jokeapi.dev".to_string(),
            random_user: "https://randomuser.me".to_string(),
            advice: "https://api.adviceslip.com".to_string(),
            numbers: "http://numbersapi.com".to_string(),
            quotes: "https://zenquotes.io/api/quotes".to_string(),
            spacex: "https://api.spacexdata.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every base at a single host, e.g. a local fake upstream.
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            dog: base.clone(),
            cat: base.clone(),
            geocode: base.clone(),
            forecast: base.clone(),
            currency: base.clone(),
            tmdb: base.clone(),
            github: base.clone(),
            joke: base.clone(),
            random_user: base.clone(),
            advice: base.clone(),
            numbers: base.clone(),
            quotes: format!("{}/api/quotes", base),
            spacex: base,
        }
    }
}

/// Top-level configuration for the panel engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub endpoints: Endpoints,
    /// TMDB v3 API key. Movie lookups are rejected while unset.
    pub tmdb_api_key: Option<String>,
    pub user_agent: String,
    /// Per-request deadline. `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            tmdb_api_key: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl PanelConfig {
    /// Parse a (possibly partial) JSON document; missing keys keep their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid panel config")
    }

    pub fn with_tmdb_api_key(mut self, key: impl Into<String>) -> Self {
        self.tmdb_api_key = Some(key.into());
        self
    }

    /// The configured TMDB key, treating a blank string as unset.
    pub fn tmdb_key(&self) -> Option<&str> {
        self.tmdb_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}
