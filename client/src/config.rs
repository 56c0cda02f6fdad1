//! Client configuration loaded via OrthoConfig.
//!
//! Every value is optional in the raw settings; the accessors apply defaults
//! and validate lazily so a bad value is reported only when it is used.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::http::{HttpGatewayConfig, RouteStyle};

/// Service root used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The base URL did not parse or cannot carry a path.
    #[error("invalid base URL `{value}`: {message}")]
    BaseUrl {
        /// The rejected value.
        value: String,
        /// Parser or scheme complaint.
        message: String,
    },
    /// The route style name is unknown.
    #[error("invalid route style: {message}")]
    RouteStyle {
        /// Parser complaint naming the unknown style.
        message: String,
    },
    /// A zero timeout would fail every request.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Configuration values for the contact client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTACTS")]
pub struct ClientSettings {
    /// Root URL of the contact service.
    pub base_url: Option<String>,
    /// `canonical` or `root-alias`.
    pub route_style: Option<String>,
    /// Whole-request timeout in seconds. Unset waits indefinitely.
    pub request_timeout_secs: Option<u64>,
    /// File holding the session token. Unset keeps it in memory.
    pub session_file: Option<PathBuf>,
}

impl ClientSettings {
    /// Parsed base URL, falling back to [`DEFAULT_BASE_URL`].
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let url = Url::parse(raw).map_err(|error| SettingsError::BaseUrl {
            value: raw.to_owned(),
            message: error.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(SettingsError::BaseUrl {
                value: raw.to_owned(),
                message: "URL cannot carry a path".to_owned(),
            });
        }
        Ok(url)
    }

    /// Parsed route style, falling back to canonical routes.
    pub fn route_style(&self) -> Result<RouteStyle, SettingsError> {
        self.route_style
            .as_deref()
            .map_or_else(|| Ok(RouteStyle::default()), str::parse)
            .map_err(|error| SettingsError::RouteStyle {
                message: error.to_string(),
            })
    }

    /// Request timeout, if one is configured.
    pub fn request_timeout(&self) -> Result<Option<Duration>, SettingsError> {
        match self.request_timeout_secs {
            Some(0) => Err(SettingsError::ZeroTimeout),
            Some(secs) => Ok(Some(Duration::from_secs(secs))),
            None => Ok(None),
        }
    }

    /// Token file location, if persistence is configured.
    #[must_use]
    pub fn session_file(&self) -> Option<&Path> {
        self.session_file.as_deref()
    }

    /// HTTP adapter options derived from these settings.
    pub fn gateway_config(&self) -> Result<HttpGatewayConfig, SettingsError> {
        let mut config =
            HttpGatewayConfig::new(self.base_url()?).with_route_style(self.route_style()?);
        if let Some(timeout) = self.request_timeout()? {
            config = config.with_timeout(timeout);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for client configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 4] = [
        "CONTACTS_BASE_URL",
        "CONTACTS_ROUTE_STYLE",
        "CONTACTS_REQUEST_TIMEOUT_SECS",
        "CONTACTS_SESSION_FILE",
    ];

    fn load_from_empty_args() -> ClientSettings {
        ClientSettings::load_from_iter([OsString::from("contacts")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(KEYS.map(|key| (key, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.base_url().expect("default url").as_str(),
            "http://localhost:5000/"
        );
        assert_eq!(settings.route_style(), Ok(RouteStyle::Canonical));
        assert_eq!(settings.request_timeout(), Ok(None));
        assert!(settings.session_file().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CONTACTS_BASE_URL", Some("https://contacts.example.com/api/".to_owned())),
            ("CONTACTS_ROUTE_STYLE", Some("root-alias".to_owned())),
            ("CONTACTS_REQUEST_TIMEOUT_SECS", Some("15".to_owned())),
            ("CONTACTS_SESSION_FILE", Some("/tmp/contacts-session".to_owned())),
        ]);

        let settings = load_from_empty_args();
        let gateway = settings.gateway_config().expect("valid settings");

        assert_eq!(gateway.base_url.as_str(), "https://contacts.example.com/api/");
        assert_eq!(gateway.route_style, RouteStyle::RootAlias);
        assert_eq!(gateway.timeout, Some(Duration::from_secs(15)));
        assert_eq!(
            settings.session_file(),
            Some(Path::new("/tmp/contacts-session"))
        );
    }

    #[rstest]
    #[case::unparseable(Some("not a url"), None, None)]
    #[case::mailto(Some("mailto:ops@example.com"), None, None)]
    #[case::route_style(None, Some("legacy"), None)]
    #[case::zero_timeout(None, None, Some(0))]
    fn invalid_values_surface_as_settings_errors(
        #[case] base_url: Option<&str>,
        #[case] route_style: Option<&str>,
        #[case] timeout: Option<u64>,
    ) {
        let settings = ClientSettings {
            base_url: base_url.map(str::to_owned),
            route_style: route_style.map(str::to_owned),
            request_timeout_secs: timeout,
            session_file: None,
        };

        assert!(settings.gateway_config().is_err());
    }
}
