//! The surface handlers render to.
//!
//! A [`Page`] stands in for the document a form lives on: blocking alerts,
//! navigation, the user greeting, the loading indicator and the result area.
//! Handlers receive it explicitly instead of looking elements up.

use core::fmt;

use forecast_portal_core::ForecastResult;

use crate::config::Route;

/// Rendering surface for one page.
pub trait Page: Send + Sync {
    /// Show a blocking message.
    fn alert(&self, message: &str);

    /// Leave the current page.
    fn navigate(&self, route: Route);

    /// Write the user greeting.
    fn set_user_info(&self, text: &str);

    /// Show or hide the loading indicator.
    fn set_loading(&self, visible: bool);

    /// Empty the result area.
    fn clear_result(&self);

    /// Render a forecast outcome into the result area.
    fn render_forecast(&self, view: &ForecastView);
}

/// Exactly one of these is rendered per forecast submission.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastView {
    Prediction(f64),
    ServerError(String),
    Unexpected,
    NetworkError(String),
}

impl ForecastView {
    /// Whether this view reports a failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !matches!(self, Self::Prediction(_))
    }
}

impl From<ForecastResult> for ForecastView {
    fn from(result: ForecastResult) -> Self {
        match result {
            ForecastResult::Prediction(value) => Self::Prediction(value),
            ForecastResult::Error(error) => Self::ServerError(error),
            ForecastResult::Unexpected => Self::Unexpected,
        }
    }
}

impl fmt::Display for ForecastView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prediction(value) => write!(f, "🔮 Predicted Demand: {value}"),
            Self::ServerError(error) => write!(f, "⚠️ Server Error: {error}"),
            Self::Unexpected => write!(f, "⚠️ Unexpected response from server."),
            Self::NetworkError(error) => write!(f, "❌ Network Error: {error}"),
        }
    }
}

/// Shows the loading indicator while alive and hides it on drop,
/// including when the request future is cancelled.
pub struct LoadingIndicator<'a> {
    page: &'a dyn Page,
}

impl<'a> LoadingIndicator<'a> {
    #[must_use]
    pub fn show(page: &'a dyn Page) -> Self {
        page.set_loading(true);
        Self { page }
    }
}

impl Drop for LoadingIndicator<'_> {
    fn drop(&mut self) {
        self.page.set_loading(false);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct LoaderOnly {
        states: Mutex<Vec<bool>>,
    }

    impl Page for LoaderOnly {
        fn alert(&self, _: &str) {}
        fn navigate(&self, _: Route) {}
        fn set_user_info(&self, _: &str) {}
        fn set_loading(&self, visible: bool) {
            if let Ok(mut states) = self.states.lock() {
                states.push(visible);
            }
        }
        fn clear_result(&self) {}
        fn render_forecast(&self, _: &ForecastView) {}
    }

    #[test]
    fn test_loading_indicator_hides_on_drop() {
        let page = LoaderOnly::default();
        {
            let _loading = LoadingIndicator::show(&page);
        }
        let states = page
            .states
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        assert_eq!(*states, [true, false]);
    }

    #[test]
    fn test_forecast_view_display() {
        assert_eq!(
            ForecastView::Prediction(123.45).to_string(),
            "🔮 Predicted Demand: 123.45"
        );
        assert_eq!(
            ForecastView::ServerError("Invalid API key".to_string()).to_string(),
            "⚠️ Server Error: Invalid API key"
        );
        assert_eq!(
            ForecastView::Unexpected.to_string(),
            "⚠️ Unexpected response from server."
        );
        assert_eq!(
            ForecastView::NetworkError("connection refused".to_string()).to_string(),
            "❌ Network Error: connection refused"
        );
    }

    #[test]
    fn test_forecast_view_from_result() {
        assert_eq!(
            ForecastView::from(ForecastResult::Error("boom".to_string())),
            ForecastView::ServerError("boom".to_string())
        );
        assert!(ForecastView::Unexpected.is_error());
        assert!(!ForecastView::Prediction(1.0).is_error());
    }
}
