//! Listing query building.
//!
//! Pure translation from typed options to wire parameters; no I/O.

mod options;
mod params;

pub use options::{DEFAULT_LIMIT, ListingOptions, Location, MAX_LIMIT, Sort, TimeWindow};
pub use params::{QueryParams, build_query};
