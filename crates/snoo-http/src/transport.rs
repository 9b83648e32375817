//! reqwest-backed transport.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use serde::Deserialize;
use tracing::{debug, instrument, trace};

use snoo_core::error::{InvalidInputError, StatusError, TransportError};
use snoo_core::traits::{Request, Transport};
use snoo_core::{ApiUrl, Error, Result};

use crate::config::HttpConfig;
use crate::rate_limit::RateLimit;

/// Error body the API returns with non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

/// HTTP transport for the Reddit JSON API.
///
/// Owns one connection pool. Share it between clients with `Arc`.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: ApiUrl,
    authorization: Option<HeaderValue>,
    rate: RwLock<Option<RateLimit>>,
}

impl HttpTransport {
    /// Create a transport from its configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the user agent is empty or the token cannot be
    /// sent as a header.
    pub fn new(config: HttpConfig) -> Result<Self> {
        if config.user_agent.trim().is_empty() {
            return Err(InvalidInputError::Other {
                message: "user agent cannot be empty".to_string(),
            }
            .into());
        }

        let authorization = config
            .access_token
            .as_ref()
            .map(|token| {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                    .map_err(|_| InvalidInputError::Other {
                        message: "access token contains invalid header characters".to_string(),
                    })?;
                value.set_sensitive(true);
                Ok::<_, Error>(value)
            })
            .transpose()?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            client,
            base_url: config.base_url,
            authorization,
            rate: RwLock::new(None),
        })
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &ApiUrl {
        &self.base_url
    }

    /// Returns true if requests carry a bearer token.
    pub fn is_authenticated(&self) -> bool {
        self.authorization.is_some()
    }

    /// The most recent rate-limit report, if the server sent one.
    pub fn rate_limit(&self) -> Option<RateLimit> {
        self.rate
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn capture_rate(&self, headers: &reqwest::header::HeaderMap) {
        if let Some(rate) = RateLimit::from_headers(headers) {
            trace!(remaining = rate.remaining, used = rate.used, "rate limit");
            *self.rate.write().unwrap_or_else(PoisonError::into_inner) = Some(rate);
        }
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<Vec<u8>> {
        let status = response.status();
        trace!(status = %status, "response");
        self.capture_rate(response.headers());

        if status.is_success() {
            let body = response.bytes().await.map_err(transport_error)?;
            Ok(body.to_vec())
        } else {
            Err(Error::Transport(TransportError::Status(
                parse_error_response(response).await,
            )))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(path = %request.path))]
    async fn request(&self, request: &Request) -> Result<Vec<u8>> {
        let url = self.base_url.endpoint(&request.path);
        debug!(%url, "request");
        trace!(query = ?request.query, "query parameters");

        let query: Vec<(&str, &str)> = request.query.iter().collect();
        let mut builder = self
            .client
            .get(&url)
            .query(&query)
            .header(ACCEPT, "application/json");
        if let Some(ref authorization) = self.authorization {
            builder = builder.header(AUTHORIZATION, authorization.clone());
        }

        let response = builder.send().await.map_err(transport_error)?;
        self.handle_response(response).await
    }
}

/// Parse the API's error body, falling back to the bare status.
async fn parse_error_response(response: reqwest::Response) -> StatusError {
    let status = response.status().as_u16();

    match response.json::<ErrorBody>().await {
        Ok(body) => StatusError::new(status, body.reason, body.message),
        Err(_) => StatusError::new(status, None, None),
    }
}

/// Classify a reqwest failure.
fn transport_error(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout {
            message: err.to_string(),
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}
