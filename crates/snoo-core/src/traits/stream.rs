//! Page stream trait.

use futures_core::Stream;

use crate::Result;
use crate::listing::Page;

/// A stream of listing pages, in request order.
pub trait PageStream: Stream<Item = Result<Page>> + Send {}

impl<T> PageStream for T where T: Stream<Item = Result<Page>> + Send {}
