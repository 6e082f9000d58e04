//! Demand forecast payloads.
//!
//! The forecast form is submitted as raw strings. Before it is sent to
//! `POST /predict` every field goes through [`coerce_field`]:
//!
//! - `Holiday/Promotion` becomes `1` for `"Yes"` and `0` for anything else
//! - any other value that is a finite number once trimmed becomes that number
//! - everything else, including the empty string, stays a string

use serde::Serialize;
use serde_json::{Map, Number, Value};

use super::form::{FormData, FormError, FromForm};

/// The one field with a fixed yes/no encoding.
pub const HOLIDAY_PROMOTION_FIELD: &str = "Holiday/Promotion";

/// Fields the prediction model was trained on.
///
/// Informational only: the payload carries whatever the form submitted.
pub const KNOWN_FORECAST_FIELDS: &[&str] = &[
    "Date",
    "Store ID",
    "Product ID",
    "Category",
    "Region",
    "Inventory Level",
    "Units Ordered",
    "Demand Forecast",
    "Price",
    "Discount",
    "Weather Condition",
    HOLIDAY_PROMOTION_FIELD,
    "Competitor Pricing",
    "Seasonality",
];

/// Apply the coercion rule to one raw form value.
///
/// ```
/// use forecast_portal_core::coerce_field;
/// use serde_json::json;
///
/// assert_eq!(coerce_field("Holiday/Promotion", "Yes"), json!(1));
/// assert_eq!(coerce_field("Price", "3.5"), json!(3.5));
/// assert_eq!(coerce_field("Region", "North"), json!("North"));
/// ```
#[must_use]
pub fn coerce_field(name: &str, value: &str) -> Value {
    if name == HOLIDAY_PROMOTION_FIELD {
        return Value::from(u8::from(value == "Yes"));
    }

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Value::String(value.to_owned());
    }

    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or_else(|| Value::String(value.to_owned()), Value::Number)
}

/// The JSON body sent to `POST /predict`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ForecastInput(Map<String, Value>);

impl ForecastInput {
    /// Coerce every submitted field. A repeated name keeps its last value.
    #[must_use]
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut map = Map::new();
        for (name, value) in fields {
            map.insert(name.to_owned(), coerce_field(name, value));
        }
        Self(map)
    }

    /// The coerced value of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl FromForm for ForecastInput {
    fn from_form(form: &FormData) -> Result<Self, FormError> {
        Ok(Self::from_fields(form.iter()))
    }
}

/// Raw `POST /predict` response body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastResponse {
    pub prediction: Option<f64>,
    pub error: Option<String>,
}

impl ForecastResponse {
    /// Extract `prediction` and `error` from a JSON body.
    ///
    /// A body that is not an object has neither field, and a wrongly typed
    /// field reads as absent.
    #[must_use]
    pub fn from_json(body: &Value) -> Self {
        let Some(object) = body.as_object() else {
            return Self::default();
        };

        Self {
            prediction: object.get("prediction").and_then(Value::as_f64),
            error: object
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_owned),
        }
    }
}

/// What the forecast handler renders for a response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastResult {
    /// Predicted demand.
    Prediction(f64),
    /// The server reported an error.
    Error(String),
    /// Neither `prediction` nor a non-empty `error` was present.
    Unexpected,
}

impl From<ForecastResponse> for ForecastResult {
    fn from(response: ForecastResponse) -> Self {
        match response {
            ForecastResponse {
                prediction: Some(value),
                ..
            } => Self::Prediction(value),
            ForecastResponse {
                error: Some(error), ..
            } if !error.is_empty() => Self::Error(error),
            _ => Self::Unexpected,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_holiday_promotion_yes_no() {
        assert_eq!(coerce_field(HOLIDAY_PROMOTION_FIELD, "Yes"), json!(1));
        assert_eq!(coerce_field(HOLIDAY_PROMOTION_FIELD, "No"), json!(0));
        assert_eq!(coerce_field(HOLIDAY_PROMOTION_FIELD, "yes"), json!(0));
        assert_eq!(coerce_field(HOLIDAY_PROMOTION_FIELD, ""), json!(0));
    }

    #[test]
    fn test_numeric_strings_become_numbers() {
        assert_eq!(coerce_field("Price", "3.5"), json!(3.5));
        assert_eq!(coerce_field("Discount", " 20 "), json!(20.0));
        assert_eq!(coerce_field("Inventory Level", "-4"), json!(-4.0));
        assert_eq!(coerce_field("Units Ordered", "1e2"), json!(100.0));
    }

    #[test]
    fn test_non_numeric_strings_pass_through() {
        assert_eq!(coerce_field("Region", ""), json!(""));
        assert_eq!(coerce_field("Region", "   "), json!("   "));
        assert_eq!(coerce_field("Category", "abc"), json!("abc"));
        assert_eq!(coerce_field("Date", "2024-01-05"), json!("2024-01-05"));
    }

    #[test]
    fn test_non_finite_numbers_stay_strings() {
        assert_eq!(coerce_field("Price", "NaN"), json!("NaN"));
        assert_eq!(coerce_field("Price", "inf"), json!("inf"));
    }

    #[test]
    fn test_forecast_input_from_form() {
        let form = FormData::new()
            .with("Store ID", "S001")
            .with("Price", "33.5")
            .with(HOLIDAY_PROMOTION_FIELD, "Yes")
            .with("Price", "40");
        let input = ForecastInput::from_form(&form).unwrap();

        assert_eq!(input.len(), 3);
        assert_eq!(input.get("Price"), Some(&json!(40.0)));
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({"Store ID": "S001", "Price": 40.0, "Holiday/Promotion": 1})
        );
    }

    #[test]
    fn test_result_prediction_wins() {
        let response = ForecastResponse {
            prediction: Some(12.5),
            error: Some("ignored".to_owned()),
        };
        assert_eq!(ForecastResult::from(response), ForecastResult::Prediction(12.5));
    }

    #[test]
    fn test_result_error_and_unexpected() {
        let response = ForecastResponse::from_json(&json!({"error": "Invalid API key"}));
        assert_eq!(
            ForecastResult::from(response),
            ForecastResult::Error("Invalid API key".to_owned())
        );

        let response = ForecastResponse::from_json(&json!({"status": "ok"}));
        assert_eq!(ForecastResult::from(response), ForecastResult::Unexpected);

        let response = ForecastResponse::from_json(&json!({"error": ""}));
        assert_eq!(ForecastResult::from(response), ForecastResult::Unexpected);
    }

    #[test]
    fn test_malformed_response_is_unexpected() {
        for body in [
            json!({"prediction": "12"}),
            json!({"error": 42}),
            json!([42.0]),
            json!(42.0),
            json!(null),
        ] {
            let response = ForecastResponse::from_json(&body);
            assert_eq!(ForecastResult::from(response), ForecastResult::Unexpected, "{body}");
        }
    }

    #[test]
    fn test_integer_prediction_accepted() {
        let response = ForecastResponse::from_json(&json!({"prediction": 88}));
        assert_eq!(ForecastResult::from(response), ForecastResult::Prediction(88.0));
    }

    #[test]
    fn test_known_fields_include_holiday() {
        assert!(KNOWN_FORECAST_FIELDS.contains(&HOLIDAY_PROMOTION_FIELD));
    }
}
