//! snoo-http - reqwest-backed transport for snoo.

mod config;
mod rate_limit;
mod transport;

pub use config::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, HttpConfig};
pub use rate_limit::RateLimit;
pub use transport::HttpTransport;
