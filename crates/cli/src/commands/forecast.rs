//! Forecast commands.

use std::io::Write;

use forecast_portal_client::Route;
use forecast_portal_core::{
    ForecastInput, FormData, HOLIDAY_PROMOTION_FIELD, KNOWN_FORECAST_FIELDS,
};

use super::Context;
use crate::error::CliError;

/// Split a `Name=Value` argument at the first `=`.
fn parse_field(arg: &str) -> Result<(&str, &str), CliError> {
    arg.split_once('=')
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| CliError::InvalidField(arg.to_owned()))
}

/// Build the forecast form from `Name=Value` arguments, in order.
fn build_form(args: &[String]) -> Result<FormData, CliError> {
    args.iter()
        .map(|arg| parse_field(arg))
        .collect::<Result<Vec<_>, _>>()
        .map(|pairs| pairs.into_iter().collect())
}

/// Submit the forecast form from the home page.
///
/// # Errors
///
/// Returns an error if an argument is malformed, the session check fails,
/// nobody is logged in, or no prediction was rendered.
pub async fn forecast(ctx: &Context, args: &[String]) -> Result<(), CliError> {
    let form = build_form(args)?;

    let view = ctx
        .controller(Route::Home)?
        .submit::<ForecastInput>(&form)
        .await?
        .ok_or(CliError::NotLoggedIn)?;

    if view.is_error() {
        return Err(CliError::NotAccepted);
    }
    Ok(())
}

/// Write the known forecast fields, one per line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn list_fields(out: &mut impl Write) -> Result<(), CliError> {
    for field in KNOWN_FORECAST_FIELDS {
        if *field == HOLIDAY_PROMOTION_FIELD {
            writeln!(out, "{field}  (Yes/No)")?;
        } else {
            writeln!(out, "{field}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_splits_on_first_equals() {
        assert_eq!(parse_field("Price=3.5").unwrap(), ("Price", "3.5"));
        assert_eq!(parse_field("Note=a=b").unwrap(), ("Note", "a=b"));
        assert_eq!(parse_field("Region=").unwrap(), ("Region", ""));
    }

    #[test]
    fn test_parse_field_rejects_malformed() {
        assert!(matches!(parse_field("Price"), Err(CliError::InvalidField(_))));
        assert!(matches!(parse_field("=3"), Err(CliError::InvalidField(_))));
    }

    #[test]
    fn test_build_form_keeps_order() {
        let args = vec!["Store ID=S001".to_owned(), "Holiday/Promotion=No".to_owned()];
        let form = build_form(&args).unwrap();
        let names: Vec<_> = form.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Store ID", "Holiday/Promotion"]);
    }

    #[test]
    fn test_list_fields() {
        let mut out = Vec::new();
        list_fields(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Holiday/Promotion  (Yes/No)\n"));
        assert_eq!(text.lines().count(), KNOWN_FORECAST_FIELDS.len());
    }
}
