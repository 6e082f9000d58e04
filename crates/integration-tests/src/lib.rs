//! Integration tests for the Forecast Portal client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p forecast-portal-integration-tests
//! ```
//!
//! The backend is a `wiremock` [`MockServer`]; nothing external is needed.
//!
//! # Test Categories
//!
//! - `auth_handlers` - Login, signup and logout
//! - `password_handlers` - Forgot-password and reset-password
//! - `forecast_handler` - Session gating, coercion on the wire, loader and rendering
//!
//! # Helpers
//!
//! - [`RecordingPage`] records everything a handler does to its page
//! - [`TestContext`] wires a mock backend, an in-memory session slot and a gateway
//! - [`closed_port_uri`] and [`single_response_backend`] for transport failures
//! - [`ReadOnlySessionStore`] for session slots that cannot be written

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex, PoisonError};

use forecast_portal_client::{
    ClientError, ForecastView, FormController, Gateway, GatewayConfig, MemorySessionStore, Page,
    Route, SessionStore, StoredSession,
};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One thing a handler did to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Alert(String),
    Navigate(Route),
    UserInfo(String),
    Loading(bool),
    ClearResult,
    Forecast(ForecastView),
}

/// A [`Page`] that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingPage {
    events: Mutex<Vec<PageEvent>>,
}

impl RecordingPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: PageEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    /// All recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<PageEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded alert texts.
    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PageEvent::Alert(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Recorded navigations.
    #[must_use]
    pub fn navigations(&self) -> Vec<Route> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PageEvent::Navigate(route) => Some(route),
                _ => None,
            })
            .collect()
    }

    /// Recorded loading indicator changes.
    #[must_use]
    pub fn loading(&self) -> Vec<bool> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PageEvent::Loading(visible) => Some(visible),
                _ => None,
            })
            .collect()
    }

    /// Recorded forecast renders.
    #[must_use]
    pub fn forecasts(&self) -> Vec<ForecastView> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PageEvent::Forecast(view) => Some(view),
                _ => None,
            })
            .collect()
    }
}

impl Page for RecordingPage {
    fn alert(&self, message: &str) {
        self.push(PageEvent::Alert(message.to_owned()));
    }

    fn navigate(&self, route: Route) {
        self.push(PageEvent::Navigate(route));
    }

    fn set_user_info(&self, text: &str) {
        self.push(PageEvent::UserInfo(text.to_owned()));
    }

    fn set_loading(&self, visible: bool) {
        self.push(PageEvent::Loading(visible));
    }

    fn clear_result(&self) {
        self.push(PageEvent::ClearResult);
    }

    fn render_forecast(&self, view: &ForecastView) {
        self.push(PageEvent::Forecast(view.clone()));
    }
}

/// A mock backend, an in-memory session slot, a gateway and a page.
pub struct TestContext {
    pub server: MockServer,
    pub store: Arc<MemorySessionStore>,
    pub gateway: Gateway,
    pub page: RecordingPage,
}

impl TestContext {
    /// Start a mock backend with an empty session slot.
    pub async fn new() -> Self {
        Self::with_session(StoredSession::default()).await
    }

    /// Start a mock backend with a pre-filled session slot.
    pub async fn with_session(session: StoredSession) -> Self {
        let server = MockServer::start().await;
        let config = GatewayConfig::for_api_url(&server.uri()).unwrap();
        let store = Arc::new(MemorySessionStore::with_session(session));
        let gateway = Gateway::connect(&config, Arc::clone(&store) as Arc<dyn SessionStore>)
            .unwrap();

        Self {
            server,
            store,
            gateway,
            page: RecordingPage::new(),
        }
    }

    /// A form controller for a page at `location` (relative to the backend).
    pub fn controller(&self, location: &str) -> FormController<'_> {
        let url = self.gateway.api().base_url().join(location).unwrap();
        FormController::new(&self.gateway, &self.page, url)
    }

    /// The current session slot.
    pub fn stored(&self) -> StoredSession {
        self.store.load().unwrap()
    }

    /// Mount a `/check_session` answer reporting `username` as logged in.
    pub async fn mock_logged_in(&self, username: &str, api_key: Option<&str>) {
        let mut body = json!({"logged_in": true, "username": username});
        if let Some(key) = api_key {
            body["api_key"] = json!(key);
        }

        Mock::given(method("GET"))
            .and(path("/check_session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a `/check_session` answer reporting nobody logged in.
    pub async fn mock_logged_out(&self) {
        Mock::given(method("GET"))
            .and(path("/check_session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"logged_in": false})))
            .mount(&self.server)
            .await;
    }
}

/// A gateway for `uri` backed by `store`.
pub fn gateway_for(uri: &str, store: Arc<dyn SessionStore>) -> Gateway {
    let config = GatewayConfig::for_api_url(uri).unwrap();
    Gateway::connect(&config, store).unwrap()
}

/// Base URL of a local port nothing listens on.
pub fn closed_port_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// A backend that answers exactly one request with `body`, then stops
/// listening. Any later connection is refused.
pub async fn single_response_backend(body: Value) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        drop(listener);

        let mut request = Vec::new();
        let mut buf = [0_u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(buf.get(..n).unwrap_or_default());
        }

        let body = body.to_string();
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });

    uri
}

/// A session slot that reads as empty and refuses every write.
#[derive(Debug, Default)]
pub struct ReadOnlySessionStore;

impl SessionStore for ReadOnlySessionStore {
    fn load(&self) -> Result<StoredSession, ClientError> {
        Ok(StoredSession::default())
    }

    fn save(&self, _session: &StoredSession) -> Result<(), ClientError> {
        Err(ClientError::Store("read-only session slot".to_owned()))
    }
}
