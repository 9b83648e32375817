//! Transport trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::query::QueryParams;

/// One GET request for the transport: a path relative to the API base URL
/// plus its query parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub path: String,
    pub query: QueryParams,
}

impl Request {
    pub fn get(path: impl Into<String>, query: QueryParams) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }
}

/// Performs requests against the API.
///
/// Implementations own connection pooling, authentication headers, TLS and
/// any retry policy. They must be safe to share between concurrent walks.
/// Failures are reported as [`crate::Error::Transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the successful response body.
    async fn request(&self, request: &Request) -> Result<Vec<u8>>;
}

#[async_trait]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    async fn request(&self, request: &Request) -> Result<Vec<u8>> {
        (**self).request(request).await
    }
}
