use std::future::Future;

use serde_json::Value;

use crate::{
    Coordinate, Result,
    ipinfo::IpInfo,
    nominatim::NominatimPlace,
    wikidata::{EntityRecord, GeoSearchHit},
};

/// The upstream services the explorer talks to.
///
/// [`HttpSource`](crate::HttpSource) is the real implementation; tests provide
/// scripted ones. Methods return raw wire types and report every failure as an
/// error. Deciding what a failure means for the session is the caller's job.
pub trait GeoSource: Send + Sync {
    /// Forward geocoding. Upstream order is preserved.
    fn search_places(&self, query: &str)
    -> impl Future<Output = Result<Vec<NominatimPlace>>> + Send;

    /// Reverse geocoding with polygon output, returned verbatim.
    fn reverse_border(&self, at: Coordinate) -> impl Future<Output = Result<Value>> + Send;

    /// Approximate location of the caller's public IP.
    fn locate_ip(&self) -> impl Future<Output = Result<IpInfo>> + Send;

    /// Entities near `at`, nearest first.
    fn nearby_entities(
        &self,
        at: Coordinate,
    ) -> impl Future<Output = Result<Vec<GeoSearchHit>>> + Send;

    /// Full record of one entity.
    fn entity(&self, id: &str) -> impl Future<Output = Result<EntityRecord>> + Send;
}
