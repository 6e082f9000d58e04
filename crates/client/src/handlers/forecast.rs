//! Session-gated demand forecast.

use std::future::Future;

use forecast_portal_core::{FormData, FormError, ForecastInput, ForecastResult, FromForm};
use tracing::{info, instrument, warn};
use url::Url;

use super::{Gateway, Submission};
use crate::error::ClientError;
use crate::page::{ForecastView, LoadingIndicator, Page};

impl Gateway {
    /// Re-check the session, then request a prediction and render it.
    ///
    /// Returns `None` without calling `/predict` when the session check
    /// redirected to the landing page. Otherwise exactly one
    /// [`ForecastView`] is rendered, and the loading indicator is hidden
    /// after it whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the session check fails or the session slot
    /// cannot be read. A failed prediction request is rendered, not returned.
    #[instrument(skip_all, fields(field_count = input.len()))]
    pub async fn forecast(
        &self,
        page: &dyn Page,
        input: &ForecastInput,
    ) -> Result<Option<ForecastView>, ClientError> {
        if self.session.check(&self.api, page).await?.is_none() {
            return Ok(None);
        }

        page.clear_result();
        let _loading = LoadingIndicator::show(page);

        let api_key = self.session.api_key()?;
        let view = match self.api.predict(api_key.as_ref(), input).await {
            Ok(response) => ForecastView::from(ForecastResult::from(response)),
            Err(e) => {
                warn!(error = %e, "Prediction request failed");
                ForecastView::NetworkError(e.to_string())
            }
        };

        if view.is_error() {
            warn!(%view, "Forecast not available");
        } else {
            info!(%view, "Forecast rendered");
        }
        page.render_forecast(&view);

        Ok(Some(view))
    }
}

impl Submission for ForecastInput {
    type Output = Option<ForecastView>;

    fn extract(form: &FormData, _location: &Url) -> Result<Self, FormError> {
        Self::from_form(form)
    }

    fn submit(
        self,
        gateway: &Gateway,
        page: &dyn Page,
    ) -> impl Future<Output = Result<Option<ForecastView>, ClientError>> + Send {
        async move { gateway.forecast(page, &self).await }
    }
}
