//! Error types for the snoo client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, decoding, input validation and interrupted pagination walks.

use std::fmt;
use thiserror::Error;

use crate::walk::WalkInterrupted;

/// The unified error type for snoo operations.
///
/// This error type covers all possible failure modes in the library,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network or HTTP-level failure reported by the transport.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A response could not be decoded into listing content.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Input validation errors (invalid fullname, subreddit, URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A pagination walk failed or was cancelled after at least one page.
    #[error("{0}")]
    WalkInterrupted(Box<WalkInterrupted>),

    /// A pagination walk was cancelled before any page was fetched.
    #[error("walk cancelled before the first page")]
    Cancelled,
}

impl Error {
    /// Returns the transport error, looking through an interrupted walk.
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            Error::Transport(err) => Some(err),
            Error::WalkInterrupted(walk) => match &walk.cause {
                crate::walk::Interruption::Failed(inner) => inner.transport(),
                crate::walk::Interruption::Cancelled => None,
            },
            _ => None,
        }
    }
}

impl From<WalkInterrupted> for Error {
    fn from(walk: WalkInterrupted) -> Self {
        Error::WalkInterrupted(Box::new(walk))
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// The server answered with a non-success status.
    #[error("{0}")]
    Status(StatusError),

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl TransportError {
    /// Check if the server rejected the credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, TransportError::Status(status) if status.status == 401 || status.status == 403)
    }

    /// Check if the server asked us to slow down.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, TransportError::Status(status) if status.status == 429)
    }
}

/// Non-success HTTP response from the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusError {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable reason (e.g. `private`, `banned`), if present.
    pub reason: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl StatusError {
    /// Create a new status error.
    pub fn new(status: u16, reason: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            reason,
            message,
        }
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref reason) = self.reason {
            write!(f, " [{}]", reason)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for StatusError {}

/// Listing and content decoding errors.
///
/// Any of these fails the whole page; partially decoded pages are never
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A child carried a tag that is not registered.
    #[error("unsupported content kind '{kind}' at child {position}")]
    UnsupportedContentKind { kind: String, position: usize },

    /// A child's tag was known but its payload did not decode.
    #[error("invalid '{kind}' payload at child {position}: {message}")]
    InvalidContent {
        kind: String,
        position: usize,
        message: String,
    },

    /// The listing envelope is structurally invalid.
    #[error("malformed listing: {reason}")]
    MalformedPage { reason: String },

    /// The response body is not valid JSON.
    #[error("invalid JSON: {message}")]
    Json { message: String },

    /// The server handed back the cursor that was just requested.
    #[error("server repeated cursor '{cursor}'")]
    RepeatedCursor { cursor: String },
}

impl DecodeError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        DecodeError::MalformedPage {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json {
            message: err.to_string(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid fullname format.
    #[error("invalid fullname '{value}': {reason}")]
    Fullname { value: String, reason: String },

    /// Invalid subreddit name.
    #[error("invalid subreddit '{value}': {reason}")]
    Subreddit { value: String, reason: String },

    /// Invalid username.
    #[error("invalid username '{value}': {reason}")]
    Username { value: String, reason: String },

    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid geo filter code.
    #[error("invalid location '{value}': {reason}")]
    Location { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
