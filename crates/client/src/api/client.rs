//! Forecast Portal API client.

use std::sync::Arc;

use forecast_portal_core::{
    ApiMessage, Credentials, ForecastInput, ForecastResponse, PasswordResetConfirmation,
    PasswordResetRequest, Registration, SessionStatus,
};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use reqwest::{Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::GatewayConfig;
use crate::error::ClientError;
use crate::session::ApiKey;

/// Header carrying the API key on `/predict`.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Endpoint paths, relative to the configured base URL.
pub mod endpoints {
    pub const LOGIN: &str = "login";
    pub const SIGNUP: &str = "signup";
    pub const FORGOT_PASSWORD: &str = "forgot-password";
    pub const RESET_PASSWORD: &str = "reset-password";
    pub const CHECK_SESSION: &str = "check_session";
    pub const PREDICT: &str = "predict";
    pub const LOGOUT: &str = "logout";
}

/// Status and JSON body of a form submission response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    /// Whether the server answered 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The `{message}` / `{error}` fields of the body.
    #[must_use]
    pub fn message(&self) -> ApiMessage {
        ApiMessage::from_json(&self.body)
    }
}

/// Forecast Portal API client.
///
/// Cheap to clone; clones share the cookie jar.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    base_url: Url,
    /// Sends and stores cookies.
    credentialed: reqwest::Client,
    /// Never sends cookies.
    anonymous: reqwest::Client,
    jar: Arc<Jar>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client fails to build.
    pub fn new(config: &GatewayConfig) -> Result<Self, ClientError> {
        let jar = Arc::new(Jar::default());

        let credentialed = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()?;
        let anonymous = reqwest::Client::builder().build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                base_url: config.api_url.clone(),
                credentialed,
                anonymous,
                jar,
            }),
        })
    }

    /// The backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Log in with username and password. Cookies set by the server are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<ApiResponse, ClientError> {
        let response = self
            .inner
            .credentialed
            .post(self.endpoint(endpoints::LOGIN)?)
            .json(credentials)
            .send()
            .await?;

        read_api_response(response).await
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn signup(&self, registration: &Registration) -> Result<ApiResponse, ClientError> {
        let response = self
            .inner
            .anonymous
            .post(self.endpoint(endpoints::SIGNUP)?)
            .json(registration)
            .send()
            .await?;

        read_api_response(response).await
    }

    /// Ask the server to email a password reset link.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    #[instrument(skip(self, request))]
    pub async fn forgot_password(
        &self,
        request: &PasswordResetRequest,
    ) -> Result<ApiResponse, ClientError> {
        let response = self
            .inner
            .anonymous
            .post(self.endpoint(endpoints::FORGOT_PASSWORD)?)
            .json(request)
            .send()
            .await?;

        read_api_response(response).await
    }

    /// Submit a new password together with the reset token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    #[instrument(skip(self, confirmation), fields(has_token = confirmation.token.is_some()))]
    pub async fn reset_password(
        &self,
        confirmation: &PasswordResetConfirmation,
    ) -> Result<ApiResponse, ClientError> {
        let response = self
            .inner
            .anonymous
            .post(self.endpoint(endpoints::RESET_PASSWORD)?)
            .json(confirmation)
            .send()
            .await?;

        read_api_response(response).await
    }

    /// Ask the server whether the cookie session is logged in.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    #[instrument(skip(self))]
    pub async fn check_session(&self) -> Result<SessionStatus, ClientError> {
        let response = self
            .inner
            .credentialed
            .get(self.endpoint(endpoints::CHECK_SESSION)?)
            .send()
            .await?;

        let status = response.status();
        let session = SessionStatus::from_json(&read_json::<Value>(response).await?);

        debug!(%status, logged_in = session.logged_in, "Session checked");

        Ok(session)
    }

    /// Request a demand prediction.
    ///
    /// The API key is sent as-is; without one the header is omitted and the
    /// server decides.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid header value, the request
    /// fails, or the body is not JSON.
    #[instrument(skip(self, api_key, input), fields(field_count = input.len(), has_key = api_key.is_some()))]
    pub async fn predict(
        &self,
        api_key: Option<&ApiKey>,
        input: &ForecastInput,
    ) -> Result<ForecastResponse, ClientError> {
        let mut request = self
            .inner
            .anonymous
            .post(self.endpoint(endpoints::PREDICT)?)
            .json(input);

        if let Some(key) = api_key {
            let value = HeaderValue::from_str(key.expose_secret())
                .map_err(|e| ClientError::InvalidHeader(e.to_string()))?;
            request = request.header(API_KEY_HEADER, value);
        }

        let response = request.send().await?;
        let status = response.status();
        let forecast = ForecastResponse::from_json(&read_json::<Value>(response).await?);

        debug!(%status, has_prediction = forecast.prediction.is_some(), "Prediction received");

        Ok(forecast)
    }

    /// End the server-side session. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<StatusCode, ClientError> {
        let response = self
            .inner
            .credentialed
            .post(self.endpoint(endpoints::LOGOUT)?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Logout returned non-success status");
        }

        Ok(status)
    }

    /// Cookies currently held for the backend, as a `Cookie` header value.
    #[must_use]
    pub fn cookies(&self) -> Option<String> {
        self.inner
            .jar
            .cookies(&self.inner.base_url)
            .and_then(|value| value.to_str().ok().map(str::to_owned))
    }

    /// Load cookies previously returned by [`ApiClient::cookies`].
    pub fn restore_cookies(&self, header: &str) {
        for cookie in header.split(';').map(str::trim).filter(|c| !c.is_empty()) {
            self.inner.jar.add_cookie_str(cookie, &self.inner.base_url);
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.inner.base_url.join(path)?)
    }
}

/// Read a form submission response, keeping the status and the JSON body.
async fn read_api_response(response: Response) -> Result<ApiResponse, ClientError> {
    let status = response.status();
    let body: Value = read_json(response).await?;

    debug!(%status, "Response received");

    Ok(ApiResponse { status, body })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Parse(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client_for(server: &MockServer) -> ApiClient {
        let config = GatewayConfig::for_api_url(&server.uri()).unwrap();
        ApiClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(json!({"username": "alice", "password": "pw"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "Login successful"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client.login(&Credentials::new("alice", "pw")).await.unwrap();

        assert!(response.is_success());
        assert_eq!(response.message().message_text(), "Login successful");
    }

    #[tokio::test]
    async fn test_non_json_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/signup"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client
            .signup(&Registration::new("bob", "bob@example.com", "pw"))
            .await;

        assert!(matches!(result, Err(ClientError::Parse(_))));
    }

    #[tokio::test]
    async fn test_predict_sends_api_key_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(header(API_KEY_HEADER, "key-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"prediction": 42.5})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let key = ApiKey::new("key-123");
        let response = client
            .predict(Some(&key), &ForecastInput::default())
            .await
            .unwrap();

        assert_eq!(response.prediction, Some(42.5));
    }

    #[tokio::test]
    async fn test_predict_rejects_unrepresentable_key() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;
        let key = ApiKey::new("bad\nkey");

        let result = client.predict(Some(&key), &ForecastInput::default()).await;

        assert!(matches!(result, Err(ClientError::InvalidHeader(_))));
    }

    #[tokio::test]
    async fn test_restore_and_read_cookies() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;

        assert_eq!(client.cookies(), None);
        client.restore_cookies("session=abc; theme=dark");

        let cookies = client.cookies().unwrap();
        assert!(cookies.contains("session=abc"));
        assert!(cookies.contains("theme=dark"));
    }

    #[tokio::test]
    async fn test_endpoint_joins_base_path() {
        let config = GatewayConfig::for_api_url("http://localhost:5050/api").unwrap();
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(endpoints::CHECK_SESSION).unwrap().as_str(),
            "http://localhost:5050/api/check_session"
        );
    }
}
