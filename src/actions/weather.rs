// Current weather: geocode the city with Nominatim, then query Open-Meteo.

use serde_json::Value;

use super::extract::{build_url, escape_html, scalar_field};
use super::recipe::Recipe;
use super::Params;
use crate::config::PanelConfig;
use crate::engine::random::RandomSource;
use crate::error::ActionError;
use crate::surface::Markup;

pub const CITY_INPUT: &str = "city-input";
pub const WEATHER_FAILURE: &str = "Error fetching weather.";
pub const CITY_NOT_FOUND: &str = "City not found!";

pub fn weather() -> Recipe {
    Recipe::new("weather", "weather-output", WEATHER_FAILURE, geocode_url, render)
        .inputs(&[CITY_INPUT])
        .follow_up(forecast_url)
}

// An empty city is sent as-is; the geocoder answers with no matches.
fn geocode_url(params: &Params, config: &PanelConfig) -> Result<String, ActionError> {
    build_url(
        &config.endpoints.geocode,
        &["search"],
        &[("format", "json"), ("q", params.get(CITY_INPUT))],
    )
}

fn forecast_url(_: &Params, places: &Value, config: &PanelConfig) -> Result<String, ActionError> {
    let first = places
        .as_array()
        .and_then(|a| a.first())
        .ok_or(ActionError::NotFound(CITY_NOT_FOUND))?;
    let lat = scalar_field(first, "/lat")?;
    let lon = scalar_field(first, "/lon")?;
    build_url(
        &config.endpoints.forecast,
        &["v1", "forecast"],
        &[
            ("latitude", lat.as_str()),
            ("longitude", lon.as_str()),
            ("current_weather", "true"),
        ],
    )
}

fn render(params: &Params, forecast: &Value, _: &dyn RandomSource) -> Result<Markup, ActionError> {
    let temperature = scalar_field(forecast, "/current_weather/temperature")?;
    let windspeed = scalar_field(forecast, "/current_weather/windspeed")?;
    let winddirection = scalar_field(forecast, "/current_weather/winddirection")?;
    let time = scalar_field(forecast, "/current_weather/time")?;
    Ok(Markup::Html(format!(
        "<strong>City:</strong> {}<br>\
         <strong>Temperature:</strong> {}°C<br>\
         <strong>Wind Speed:</strong> {} km/h<br>\
         <strong>Wind Direction:</strong> {}°<br>\
         <strong>Time:</strong> {}",
        escape_html(params.get(CITY_INPUT)),
        escape_html(&temperature),
        escape_html(&windspeed),
        escape_html(&winddirection),
        escape_html(&time),
    )))
}
