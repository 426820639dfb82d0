//! Nominatim-compatible geocoding: forward search and reverse border lookups.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;
use url::Url;

use crate::{Coordinate, Result};

/// Zoom 6 asks the reverse geocoder for state/region granularity.
pub const DEFAULT_BORDER_ZOOM: u8 = 6;
pub const DEFAULT_POLYGON_THRESHOLD: f64 = 0.001;

/// Parameters of the reverse-geocode call that returns a border polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderParams {
    /// Administrative granularity of the enclosing region
    pub zoom: u8,
    /// Polygon simplification tolerance in degrees
    pub polygon_threshold: f64,
}

impl Default for BorderParams {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_BORDER_ZOOM,
            polygon_threshold: DEFAULT_POLYGON_THRESHOLD,
        }
    }
}

/// One element of the `format=jsonv2` search response.
///
/// Nominatim returns coordinates as decimal strings and the place id as a number;
/// both are kept raw here and converted in [`PlaceCandidate::try_from`].
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    #[serde(deserialize_with = "string_or_number")]
    pub place_id: String,
    pub display_name: String,
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub importance: Option<f64>,
}

/// A search hit ready to be listed in the results dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceCandidate {
    pub place_id: String,
    pub display_name: String,
    pub lat: f64,
    pub lng: f64,
}

impl PlaceCandidate {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

impl TryFrom<NominatimPlace> for PlaceCandidate {
    type Error = NominatimPlace;

    fn try_from(place: NominatimPlace) -> std::result::Result<Self, Self::Error> {
        let (Ok(lat), Ok(lng)) = (place.lat.trim().parse(), place.lon.trim().parse()) else {
            return Err(place);
        };
        Ok(Self {
            place_id: place.place_id,
            display_name: place.display_name,
            lat,
            lng,
        })
    }
}

/// Convert raw hits into candidates, preserving upstream order.
///
/// Hits with unparsable coordinates are dropped; duplicates are kept.
pub fn into_candidates(places: Vec<NominatimPlace>) -> Vec<PlaceCandidate> {
    places
        .into_iter()
        .filter_map(|place| match PlaceCandidate::try_from(place) {
            Ok(candidate) => Some(candidate),
            Err(place) => {
                warn!(
                    place_id = %place.place_id,
                    lat = %place.lat,
                    lon = %place.lon,
                    "Dropping search hit with unparsable coordinates"
                );
                None
            }
        })
        .collect()
}

pub fn search_url(base: &str, query: &str) -> Result<Url> {
    let url = Url::parse_with_params(
        &format!("{}/search.php", base.trim_end_matches('/')),
        &[("q", query), ("format", "jsonv2"), ("exclude_place_ids", "")],
    )?;
    Ok(url)
}

pub fn reverse_url(base: &str, at: Coordinate, params: &BorderParams) -> Result<Url> {
    let url = Url::parse_with_params(
        &format!("{}/reverse", base.trim_end_matches('/')),
        &[
            ("lat", at.lat.to_string()),
            ("lon", at.lng.to_string()),
            ("zoom", params.zoom.to_string()),
            ("format", "geojson".to_owned()),
            ("polygon_geojson", "1".to_owned()),
            ("polygon_threshold", params.polygon_threshold.to_string()),
        ],
    )?;
    Ok(url)
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
