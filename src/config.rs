//! Client configuration.
//!
//! Explicit values always win. Anything left empty can be filled from the
//! `DOCUSIGN_*` environment variables with [`ClientConfig::or_env`].

use crate::auth::Credentials;
use crate::error::{DocuSignError, Result};
use std::time::Duration;

/// Connection timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

/// Smallest accepted timeout, in seconds.
pub const MIN_TIMEOUT_SECS: f64 = 0.001;

/// Environment variable names, keyed by the field they fill.
pub mod env {
    /// Root URL of the API.
    pub const ROOT_URL: &str = "DOCUSIGN_ROOT_URL";
    /// Legacy auth username.
    pub const USERNAME: &str = "DOCUSIGN_USERNAME";
    /// Legacy auth password.
    pub const PASSWORD: &str = "DOCUSIGN_PASSWORD";
    /// Legacy auth integrator key.
    pub const INTEGRATOR_KEY: &str = "DOCUSIGN_INTEGRATOR_KEY";
    /// Pre-resolved account ID.
    pub const ACCOUNT_ID: &str = "DOCUSIGN_ACCOUNT_ID";
    /// AppToken for account provisioning.
    pub const APP_TOKEN: &str = "DOCUSIGN_APP_TOKEN";
    /// OAuth2 bearer token.
    pub const OAUTH2_TOKEN: &str = "DOCUSIGN_OAUTH2_TOKEN";
    /// Connection timeout in (fractional) seconds.
    pub const TIMEOUT: &str = "DOCUSIGN_TIMEOUT";
}

/// Configuration options for the client.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Root URL of the API, e.g. `https://demo.docusign.net/restapi/v2`.
    pub root_url: Option<String>,
    /// API username (legacy auth).
    pub username: Option<String>,
    /// API password (legacy auth).
    pub password: Option<String>,
    /// Integrator key (legacy auth).
    pub integrator_key: Option<String>,
    /// Account ID. Resolved through `/login_information` when missing.
    pub account_id: Option<String>,
    /// Account URL. Derived from `root_url` and `account_id` when missing.
    pub account_url: Option<String>,
    /// AppToken, only needed for account provisioning.
    pub app_token: Option<String>,
    /// OAuth2 bearer token. Takes precedence over legacy credentials.
    pub oauth2_token: Option<String>,
    /// Connection timeout (default: 30 seconds).
    pub timeout: Option<Duration>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Build a configuration from the `DOCUSIGN_*` environment variables only.
    pub fn from_env() -> Result<Self> {
        Self::default().or_env()
    }

    /// Fill empty fields from the process environment.
    pub fn or_env(self) -> Result<Self> {
        self.fill_from(|name| std::env::var(name).ok())
    }

    /// Fill empty fields from an arbitrary key/value source.
    ///
    /// `lookup` receives the environment variable names from [`env`].
    pub fn fill_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fill = |field: &mut Option<String>, name: &str| {
            if is_blank(field) {
                *field = lookup(name).filter(|v| !v.is_empty());
            }
        };

        fill(&mut self.root_url, env::ROOT_URL);
        fill(&mut self.username, env::USERNAME);
        fill(&mut self.password, env::PASSWORD);
        fill(&mut self.integrator_key, env::INTEGRATOR_KEY);
        fill(&mut self.account_id, env::ACCOUNT_ID);
        fill(&mut self.app_token, env::APP_TOKEN);
        fill(&mut self.oauth2_token, env::OAUTH2_TOKEN);

        if self.timeout.is_none() {
            if let Some(raw) = lookup(env::TIMEOUT).filter(|v| !v.trim().is_empty()) {
                let secs: f64 = raw.trim().parse().map_err(|_| {
                    DocuSignError::Config(format!("{} is not a number: {:?}", env::TIMEOUT, raw))
                })?;
                self.timeout = Some(parse_timeout(secs)?);
            }
        }

        Ok(self)
    }

    /// Credentials selected by this configuration.
    ///
    /// A non-empty OAuth2 token selects bearer auth, anything else falls back
    /// to the username/password/integrator-key header.
    pub fn credentials(&self) -> Credentials {
        match self.oauth2_token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => Credentials::OAuth2 {
                token: token.to_string(),
            },
            None => Credentials::Legacy {
                username: self.username.clone().unwrap_or_default(),
                password: self.password.clone().unwrap_or_default(),
                integrator_key: self.integrator_key.clone().unwrap_or_default(),
            },
        }
    }
}

/// Validate a timeout expressed in seconds.
///
/// Precision is limited to milliseconds (the value is truncated) and anything
/// under one millisecond is rejected.
pub fn parse_timeout(secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs < MIN_TIMEOUT_SECS {
        return Err(DocuSignError::Config(format!(
            "Cannot set timeout lower than {}",
            MIN_TIMEOUT_SECS
        )));
    }
    Ok(Duration::from_millis((secs * 1000.0) as u64))
}

pub(crate) fn default_timeout() -> Duration {
    Duration::from_millis((DEFAULT_TIMEOUT_SECS * 1000.0) as u64)
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().is_none_or(str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn environment() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (env::ROOT_URL, "http://other.example.com"),
            (env::USERNAME, "pierre paul ou jacques"),
            (env::PASSWORD, "not-a-secret"),
            (env::INTEGRATOR_KEY, "not-an-integrator-key"),
            (env::ACCOUNT_ID, "not-an-uuid"),
            (env::APP_TOKEN, "not-a-token"),
            (env::OAUTH2_TOKEN, "some-oauth2-token"),
            (env::TIMEOUT, "200.123"),
        ])
    }

    fn lookup<'a>(map: &'a HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| map.get(name).map(|v| v.to_string())
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.root_url.is_none());
        assert!(config.timeout.is_none());
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_environment_fills_empty_fields() {
        let map = environment();
        let config = ClientConfig::default().fill_from(lookup(&map)).unwrap();

        assert_eq!(config.root_url.as_deref(), Some("http://other.example.com"));
        assert_eq!(config.username.as_deref(), Some("pierre paul ou jacques"));
        assert_eq!(config.password.as_deref(), Some("not-a-secret"));
        assert_eq!(config.integrator_key.as_deref(), Some("not-an-integrator-key"));
        assert_eq!(config.account_id.as_deref(), Some("not-an-uuid"));
        assert_eq!(config.app_token.as_deref(), Some("not-a-token"));
        assert_eq!(config.oauth2_token.as_deref(), Some("some-oauth2-token"));
        assert_eq!(config.timeout, Some(Duration::from_millis(200_123)));
    }

    #[test]
    fn test_explicit_options_win() {
        let map = environment();
        let config = ClientConfig {
            root_url: Some("http://example.com".to_string()),
            username: Some("johndoe".to_string()),
            password: Some("secret".to_string()),
            oauth2_token: Some("explicit-token".to_string()),
            timeout: Some(Duration::from_secs(300)),
            ..Default::default()
        }
        .fill_from(lookup(&map))
        .unwrap();

        assert_eq!(config.root_url.as_deref(), Some("http://example.com"));
        assert_eq!(config.username.as_deref(), Some("johndoe"));
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.oauth2_token.as_deref(), Some("explicit-token"));
        assert_eq!(config.timeout, Some(Duration::from_secs(300)));
        // untouched fields still come from the environment
        assert_eq!(config.integrator_key.as_deref(), Some("not-an-integrator-key"));
    }

    #[test]
    fn test_empty_explicit_value_falls_back() {
        let map = environment();
        let config = ClientConfig {
            username: Some(String::new()),
            ..Default::default()
        }
        .fill_from(lookup(&map))
        .unwrap();
        assert_eq!(config.username.as_deref(), Some("pierre paul ou jacques"));
    }

    #[test]
    fn test_invalid_timeout_env() {
        let map = HashMap::from([(env::TIMEOUT, "soon")]);
        let err = ClientConfig::default().fill_from(lookup(&map)).unwrap_err();
        assert!(matches!(err, DocuSignError::Config(_)));
    }

    #[test]
    fn test_parse_timeout_precision() {
        assert_eq!(parse_timeout(1.2345).unwrap(), Duration::from_millis(1234));
        assert_eq!(parse_timeout(0.001).unwrap(), Duration::from_millis(1));
        assert_eq!(parse_timeout(30.0).unwrap(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_timeout_floor() {
        let err = parse_timeout(0.0009).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Cannot set timeout lower than 0.001"
        );
        assert!(parse_timeout(-1.0).is_err());
        assert!(parse_timeout(f64::NAN).is_err());
    }

    #[test]
    fn test_credentials_selection() {
        let legacy = ClientConfig {
            username: Some("johndoe".to_string()),
            password: Some("secret".to_string()),
            integrator_key: Some("very-secret".to_string()),
            oauth2_token: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(legacy.credentials(), Credentials::Legacy { .. }));

        let oauth = ClientConfig {
            oauth2_token: Some("some-oauth2-token".to_string()),
            ..legacy
        };
        assert_eq!(
            oauth.credentials(),
            Credentials::OAuth2 {
                token: "some-oauth2-token".to_string()
            }
        );
    }
}
