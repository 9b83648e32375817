//! snoo-core - Reddit listing types, decoding and pagination.

pub mod client;
pub mod content;
pub mod endpoint;
pub mod error;
pub mod listing;
pub mod query;
pub mod tokens;
pub mod traits;
pub mod types;
pub mod walk;

pub use client::Listings;
pub use content::{Content, KindRegistry};
pub use endpoint::{ListingEndpoint, SubredditSource, UserSection};
pub use error::{DecodeError, Error, InvalidInputError, StatusError, TransportError};
pub use listing::{ListingDecoder, ListingPosition, ListingSelector, Page, Thread};
pub use query::{ListingOptions, Location, QueryParams, Sort, TimeWindow, build_query};
pub use tokens::AccessToken;
pub use traits::{PageStream, Request, Transport};
pub use types::{ApiUrl, Fullname, Kind, SubredditName, Username};
pub use walk::{Interruption, Walk, WalkInterrupted, WalkLimits, WalkStatus, Walker};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
