//! Transport configuration.

use std::time::Duration;

use snoo_core::{AccessToken, ApiUrl};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent. Reddit asks every client to identify itself
/// uniquely, so applications should set their own.
pub const DEFAULT_USER_AGENT: &str = concat!("snoo/", env!("CARGO_PKG_VERSION"));

/// Settings for an [`HttpTransport`](crate::HttpTransport).
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub base_url: ApiUrl,
    pub user_agent: String,
    pub access_token: Option<AccessToken>,
    pub timeout: Duration,
}

impl Default for HttpConfig {
    /// Anonymous access to the public JSON API.
    fn default() -> Self {
        Self {
            base_url: ApiUrl::public(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            access_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HttpConfig {
    /// Authenticated access through the OAuth host.
    pub fn oauth(token: AccessToken) -> Self {
        Self {
            base_url: ApiUrl::oauth(),
            access_token: Some(token),
            ..Self::default()
        }
    }

    pub fn base_url(mut self, base_url: ApiUrl) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_public_host() {
        let config = HttpConfig::default();
        assert_eq!(config.base_url.host(), Some("www.reddit.com"));
        assert!(config.access_token.is_none());
        assert!(config.user_agent.starts_with("snoo/"));
    }

    #[test]
    fn oauth_uses_oauth_host() {
        let config = HttpConfig::oauth(AccessToken::new("abc"));
        assert_eq!(config.base_url.host(), Some("oauth.reddit.com"));
        assert!(config.access_token.is_some());
    }

    #[test]
    fn debug_hides_token() {
        let config = HttpConfig::oauth(AccessToken::new("very-secret"));
        assert!(!format!("{:?}", config).contains("very-secret"));
    }
}
