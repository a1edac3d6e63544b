// One random launch from the SpaceX v4 launch list.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::extract::{escape_html, non_empty_str, scalar_field};
use super::recipe::Recipe;
use super::Params;
use crate::config::PanelConfig;
use crate::engine::random::{uniform_index, RandomSource};
use crate::error::ActionError;
use crate::surface::Markup;

pub const SPACEX_FAILURE: &str = "Failed to fetch SpaceX launch.";
pub const NO_LAUNCHES: &str = "No SpaceX launches found.";
pub const NO_DETAILS: &str = "No details available.";

pub fn launch() -> Recipe {
    Recipe::new("spacex", "spacex-output", SPACEX_FAILURE, launches_url, render)
}

fn launches_url(_: &Params, config: &PanelConfig) -> Result<String, ActionError> {
    Ok(format!("{}/v4/launches", config.endpoints.spacex))
}

fn render(_: &Params, body: &Value, random: &dyn RandomSource) -> Result<Markup, ActionError> {
    let launches = body
        .as_array()
        .ok_or_else(|| ActionError::Shape("launch list is not an array".to_string()))?;
    let idx = uniform_index(launches.len(), random).ok_or(ActionError::NotFound(NO_LAUNCHES))?;
    let launch = &launches[idx];

    let name = scalar_field(launch, "/name")?;
    let date = scalar_field(launch, "/date_utc")?;
    let details = non_empty_str(launch, "/details").unwrap_or(NO_DETAILS);

    Ok(Markup::Html(format!(
        "<strong>Mission:</strong> {} <br /><strong>Date:</strong> {} <br /><strong>Details:</strong> {}",
        escape_html(&name),
        escape_html(&format_launch_date(&date)),
        escape_html(details),
    )))
}

/// en-US style `M/D/YYYY, h:mm:ss AM`, in UTC. Unparseable input is returned unchanged.
pub fn format_launch_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt
            .with_timezone(&Utc)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::random::SequenceRandom;
    use serde_json::json;

    #[test]
    fn test_format_launch_date() {
        assert_eq!(format_launch_date("2006-03-24T22:30:00.000Z"), "3/24/2006, 10:30:00 PM");
        assert_eq!(format_launch_date("2020-01-07T02:19:00+00:00"), "1/7/2020, 2:19:00 AM");
        assert_eq!(format_launch_date("soon"), "soon");
    }

    #[test]
    fn test_render_picks_by_random_index() {
        let body = json!([
            {"name": "FalconSat", "date_utc": "2006-03-24T22:30:00.000Z", "details": "Engine failure"},
            {"name": "DemoSat", "date_utc": "2007-03-21T01:10:00.000Z", "details": null}
        ]);
        let random = SequenceRandom::new(vec![0.75]);
        let markup = render(&Params::default(), &body, &random).unwrap();
        assert_eq!(
            markup,
            Markup::Html(
                "<strong>Mission:</strong> DemoSat <br /><strong>Date:</strong> 3/21/2007, 1:10:00 AM <br /><strong>Details:</strong> No details available."
                    .into()
            )
        );
    }

    #[test]
    fn test_render_empty_list() {
        let random = SequenceRandom::new(vec![0.1]);
        let err = render(&Params::default(), &json!([]), &random).unwrap_err();
        assert!(matches!(err, ActionError::NotFound(NO_LAUNCHES)));
    }
}
