//! Terminal rendering of a page.
//!
//! Alerts, the greeting and forecast results are written as lines to the
//! output; navigation is shown as `-> page`. The loading indicator only
//! shows up in the logs.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use forecast_portal_client::{ForecastView, Page, PageRoutes, Route};

pub struct TerminalPage<W> {
    out: Mutex<W>,
    routes: PageRoutes,
}

impl<W: Write + Send> TerminalPage<W> {
    pub const fn new(out: W, routes: PageRoutes) -> Self {
        Self {
            out: Mutex::new(out),
            routes,
        }
    }

    fn line(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{text}") {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Page for TerminalPage<W> {
    fn alert(&self, message: &str) {
        self.line(message);
    }

    fn navigate(&self, route: Route) {
        let path = self.routes.resolve(route);
        tracing::debug!(page = path, "Navigating");
        self.line(&format!("-> {path}"));
    }

    fn set_user_info(&self, text: &str) {
        self.line(text);
    }

    fn set_loading(&self, visible: bool) {
        if visible {
            tracing::info!("Waiting for prediction...");
        } else {
            tracing::debug!("Loading finished");
        }
    }

    fn clear_result(&self) {}

    fn render_forecast(&self, view: &ForecastView) {
        self.line(&view.to_string());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_page_lines() {
        let page = TerminalPage::new(Vec::new(), PageRoutes::default());

        page.set_user_info("Hello, alice");
        page.alert("Login successful!");
        page.navigate(Route::Home);
        page.render_forecast(&ForecastView::Prediction(88.2));

        let output = String::from_utf8(page.into_inner()).unwrap();
        assert_eq!(
            output,
            "Hello, alice\nLogin successful!\n-> home.html\n🔮 Predicted Demand: 88.2\n"
        );
    }
}
