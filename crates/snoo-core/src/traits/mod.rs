//! Core traits for transports and page streams.

mod stream;
mod transport;

pub use stream::PageStream;
pub use transport::{Request, Transport};
