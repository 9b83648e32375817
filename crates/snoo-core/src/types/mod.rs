//! Identifier types.
//!
//! These types enforce Reddit's naming rules at construction time,
//! so malformed identifiers never reach a request path.

mod api_url;
mod fullname;
mod kind;
mod names;

pub use api_url::{ApiUrl, OAUTH_API_URL, PUBLIC_API_URL};
pub use fullname::Fullname;
pub use kind::Kind;
pub use names::{SubredditName, Username};
