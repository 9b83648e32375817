//! Listing pages and the decoder that builds them.

mod decoder;
mod page;

pub use decoder::{ListingDecoder, ListingPosition, ListingSelector, Thread};
pub use page::Page;
