//! Upstream data sources for Map Explorer.
//!
//! Wire types, URL builders and an HTTP client for:
//! - a Nominatim-compatible geocoder (place search and reverse border polygons),
//! - ipinfo.io (startup location guess),
//! - Wikidata (nearby entity lookup and entity records).
//!
//! The [`GeoSource`] trait is the seam between these services and the session
//! engine in the `map-explorer` crate.

mod endpoints;
mod error;
#[cfg(feature = "http")]
mod fetch;
mod geo;
pub mod ipinfo;
pub mod nominatim;
mod source;
pub mod test_data;
pub mod wikidata;

pub use endpoints::{DEFAULT_GEOCODING_BASE, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, SourceConfig};
pub use error::{Result, SourceError};
#[cfg(feature = "http")]
pub use fetch::HttpSource;
pub use geo::Coordinate;
pub use nominatim::{BorderParams, PlaceCandidate};
pub use source::GeoSource;
pub use wikidata::{Claim, ClaimValue, EntityRecord, GeoSearchParams};
