// Currency conversion against the ExchangeRate-API open endpoint.

use serde_json::Value;

use super::extract::{build_url, escape_html};
use super::recipe::Recipe;
use super::Params;
use crate::config::PanelConfig;
use crate::engine::random::RandomSource;
use crate::error::ActionError;
use crate::surface::Markup;

pub const FROM_INPUT: &str = "from-currency";
pub const TO_INPUT: &str = "to-currency";
pub const AMOUNT_INPUT: &str = "amount";

pub const CURRENCY_FAILURE: &str = "Error fetching rate.";
pub const SELECT_BOTH: &str = "Please select both currencies.";
pub const SELECT_DIFFERENT: &str = "Please select two different currencies.";
pub const INVALID_AMOUNT: &str = "Please enter a valid amount greater than 0.";
pub const UNSUPPORTED_CURRENCY: &str = "Invalid currency codes or unsupported currency.";

pub fn currency() -> Recipe {
    Recipe::new("currency", "currency-output", CURRENCY_FAILURE, rates_url, render)
        .inputs(&[FROM_INPUT, TO_INPUT, AMOUNT_INPUT])
        .validate_with(validate)
}

fn validate(params: &Params, _: &PanelConfig) -> Result<(), ActionError> {
    let from = params.get(FROM_INPUT);
    let to = params.get(TO_INPUT);
    if from.is_empty() || to.is_empty() {
        return Err(ActionError::Invalid(SELECT_BOTH));
    }
    if from == to {
        return Err(ActionError::Invalid(SELECT_DIFFERENT));
    }
    parse_amount(params.get(AMOUNT_INPUT))?;
    Ok(())
}

fn parse_amount(raw: &str) -> Result<f64, ActionError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(ActionError::Invalid(INVALID_AMOUNT)),
    }
}

fn rates_url(params: &Params, config: &PanelConfig) -> Result<String, ActionError> {
    build_url(
        &config.endpoints.currency,
        &["v6", "latest", params.get(FROM_INPUT)],
        &[],
    )
}

fn render(params: &Params, body: &Value, _: &dyn RandomSource) -> Result<Markup, ActionError> {
    let from = params.get(FROM_INPUT);
    let to = params.get(TO_INPUT);
    let amount = parse_amount(params.get(AMOUNT_INPUT))?;

    if body.get("result").and_then(Value::as_str) == Some("error") {
        return Err(ActionError::NotFound(UNSUPPORTED_CURRENCY));
    }
    // A zero rate is treated like a missing one.
    let rate = body
        .get("rates")
        .and_then(|r| r.get(to))
        .and_then(Value::as_f64)
        .filter(|r| *r != 0.0)
        .ok_or(ActionError::NotFound(UNSUPPORTED_CURRENCY))?;

    let converted = rate * amount;
    Ok(Markup::Html(format!(
        "{amount} {from} = {converted:.4} {to} (Rate: 1 {from} = {rate} {to})",
        from = escape_html(from),
        to = escape_html(to),
    )))
}
