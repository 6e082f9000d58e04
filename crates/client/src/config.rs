//! Gateway configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PORTAL_API_URL` - Base URL of the backend API (default: `http://127.0.0.1:5050`)
//! - `PORTAL_STATE_DIR` - Directory holding the persisted session (default: `.forecast-portal`)
//! - `PORTAL_LANDING_PAGE` - Page shown to logged-out users (default: `index.html`)
//! - `PORTAL_HOME_PAGE` - Page shown after login (default: `home.html`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://127.0.0.1:5050";
const DEFAULT_STATE_DIR: &str = ".forecast-portal";
const DEFAULT_LANDING_PAGE: &str = "index.html";
const DEFAULT_HOME_PAGE: &str = "home.html";

/// File name of the persisted session inside the state directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the browser would be sent on each navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Login page, also the target of every "not logged in" redirect.
    Landing,
    /// Page with the forecast form.
    Home,
}

/// Page paths for each [`Route`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRoutes {
    pub landing: String,
    pub home: String,
}

impl PageRoutes {
    /// The page path for a route.
    #[must_use]
    pub fn resolve(&self, route: Route) -> &str {
        match route {
            Route::Landing => &self.landing,
            Route::Home => &self.home,
        }
    }
}

impl Default for PageRoutes {
    fn default() -> Self {
        Self {
            landing: DEFAULT_LANDING_PAGE.to_owned(),
            home: DEFAULT_HOME_PAGE.to_owned(),
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Backend base URL, always ending in `/`
    pub api_url: Url,
    /// Directory for the persisted session
    pub state_dir: PathBuf,
    /// Page paths used for navigation
    pub pages: PageRoutes,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `PORTAL_API_URL` is not an http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(
            "PORTAL_API_URL",
            &get_env_or_default("PORTAL_API_URL", DEFAULT_API_URL),
        )?;
        let state_dir = PathBuf::from(get_env_or_default("PORTAL_STATE_DIR", DEFAULT_STATE_DIR));
        let pages = PageRoutes {
            landing: get_env_or_default("PORTAL_LANDING_PAGE", DEFAULT_LANDING_PAGE),
            home: get_env_or_default("PORTAL_HOME_PAGE", DEFAULT_HOME_PAGE),
        };

        Ok(Self {
            api_url,
            state_dir,
            pages,
        })
    }

    /// Configuration for a given backend URL with default pages and state directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `api_url` is not an http(s) URL.
    pub fn for_api_url(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_api_url("api_url", api_url)?,
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            pages: PageRoutes::default(),
        })
    }

    /// Path of the persisted session file.
    #[must_use]
    pub fn session_file(&self) -> PathBuf {
        self.state_dir.join(SESSION_FILE_NAME)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a base URL, requiring http(s) and normalizing to a trailing slash
/// so endpoint paths join beneath it.
fn parse_api_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_url_adds_trailing_slash() {
        let url = parse_api_url("X", "http://127.0.0.1:5050").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5050/");

        let url = parse_api_url("X", "https://api.example.com/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/");
        assert_eq!(
            url.join("predict").unwrap().as_str(),
            "https://api.example.com/v1/predict"
        );
    }

    #[test]
    fn test_parse_api_url_rejects_other_schemes() {
        let err = parse_api_url("PORTAL_API_URL", "ftp://example.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(name, _) if name == "PORTAL_API_URL"));
    }

    #[test]
    fn test_parse_api_url_rejects_garbage() {
        assert!(parse_api_url("X", "not a url").is_err());
    }

    #[test]
    fn test_default_pages() {
        let pages = PageRoutes::default();
        assert_eq!(pages.resolve(Route::Landing), "index.html");
        assert_eq!(pages.resolve(Route::Home), "home.html");
    }

    #[test]
    fn test_session_file_path() {
        let config = GatewayConfig::for_api_url("http://localhost:5050").unwrap();
        assert_eq!(
            config.session_file(),
            PathBuf::from(".forecast-portal").join("session.json")
        );
    }
}
