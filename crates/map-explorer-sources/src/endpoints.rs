use std::time::Duration;

use crate::{
    ipinfo::IPINFO_URL,
    nominatim::BorderParams,
    wikidata::{ENTITY_DATA_URL, GeoSearchParams, WIKIDATA_API_URL},
};

pub const DEFAULT_GEOCODING_BASE: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = concat!("map-explorer/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the upstream services live and how they are queried.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    /// Base of the Nominatim-compatible geocoder, without a trailing path
    pub geocoding_base: String,
    pub ip_lookup_url: String,
    pub wikidata_api_url: String,
    pub entity_data_url: String,
    pub border: BorderParams,
    pub geosearch: GeoSearchParams,
    /// Sent with every request; public Nominatim rejects anonymous clients
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            geocoding_base: DEFAULT_GEOCODING_BASE.to_owned(),
            ip_lookup_url: IPINFO_URL.to_owned(),
            wikidata_api_url: WIKIDATA_API_URL.to_owned(),
            entity_data_url: ENTITY_DATA_URL.to_owned(),
            border: BorderParams::default(),
            geosearch: GeoSearchParams::default(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
