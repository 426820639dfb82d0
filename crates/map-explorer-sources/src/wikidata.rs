//! Wikidata wire types: the geosearch listing and `Special:EntityData` documents.
//!
//! Claim values arrive as `{ "type": ..., "value": ... }` pairs whose inner shape
//! depends on the type tag. They are decoded into [`ClaimValue`]; any tag this crate
//! does not model, or a known tag whose payload does not have the expected shape,
//! becomes [`ClaimValue::Unrecognized`] instead of failing the whole record.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::{Coordinate, Result, SourceError};

pub const WIKIDATA_API_URL: &str = "https://www.wikidata.org/w/api.php";
pub const ENTITY_DATA_URL: &str = "https://www.wikidata.org/wiki/Special:EntityData";

/// Parameters of the nearby-entity lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoSearchParams {
    /// Search radius in meters
    pub radius: u32,
    /// Maximum number of hits, nearest first
    pub limit: u32,
}

impl Default for GeoSearchParams {
    fn default() -> Self {
        Self {
            radius: 1000,
            limit: 1,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoSearchResponse {
    #[serde(default)]
    pub query: Option<GeoSearchQuery>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoSearchQuery {
    #[serde(default)]
    pub geosearch: Vec<GeoSearchHit>,
}

/// A page near the queried point. On Wikidata the title is the entity id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoSearchHit {
    pub title: String,
    #[serde(default)]
    pub pageid: Option<u64>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub dist: Option<f64>,
}

impl GeoSearchResponse {
    pub fn into_hits(self) -> Vec<GeoSearchHit> {
        self.query.map(|q| q.geosearch).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntityDataResponse {
    #[serde(default)]
    pub entities: HashMap<String, EntityRecord>,
}

impl EntityDataResponse {
    /// Take the record for `id`.
    ///
    /// A redirected id comes back keyed by its target, so a lone record under a
    /// different key is accepted too.
    pub fn take(mut self, id: &str) -> Result<EntityRecord> {
        if let Some(record) = self.entities.remove(id) {
            return Ok(record);
        }
        if self.entities.len() == 1 {
            if let Some((key, record)) = self.entities.into_iter().next() {
                debug!(requested = id, returned = %key, "Entity id was redirected");
                return Ok(record);
            }
        }
        Err(SourceError::EntityNotFound(id.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LangValue {
    pub language: String,
    pub value: String,
}

/// A Wikidata item as returned by `Special:EntityData/{id}.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntityRecord {
    pub id: String,
    #[serde(default)]
    pub labels: HashMap<String, LangValue>,
    #[serde(default)]
    pub descriptions: HashMap<String, LangValue>,
    #[serde(default)]
    pub claims: HashMap<String, Vec<Claim>>,
}

impl EntityRecord {
    pub fn label(&self, lang: &str) -> Option<&str> {
        self.labels.get(lang).map(|v| v.value.as_str())
    }

    pub fn description(&self, lang: &str) -> Option<&str> {
        self.descriptions.get(lang).map(|v| v.value.as_str())
    }

    /// The first statement recorded for `property`, e.g. `"P31"`.
    pub fn first_claim(&self, property: &str) -> Option<&Claim> {
        self.claims.get(property).and_then(|claims| claims.first())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claim {
    pub mainsnak: Snak,
    #[serde(default)]
    pub rank: Option<String>,
}

impl Claim {
    /// `None` for `novalue`/`somevalue` snaks, which carry no data value.
    pub fn value(&self) -> Option<&ClaimValue> {
        self.mainsnak.datavalue.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Snak {
    #[serde(default)]
    pub snaktype: Option<String>,
    #[serde(default)]
    pub property: Option<String>,
    #[serde(default)]
    pub datavalue: Option<ClaimValue>,
}

/// Decoded from any JSON, so a malformed value never fails the record around it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum ClaimValue {
    String(String),
    EntityRef(EntityRef),
    Time(TimeValue),
    GlobeCoordinate(GlobeCoordinate),
    Unrecognized { kind: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EntityRef {
    pub entity_type: String,
    pub numeric_id: u64,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeValue {
    /// ISO-8601-like with a leading sign, e.g. `+1990-00-00T00:00:00Z`
    pub time: String,
    pub precision: u8,
    #[serde(default)]
    pub calendarmodel: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GlobeCoordinate {
    #[serde(rename = "latitude")]
    pub lat: f64,
    #[serde(rename = "longitude")]
    pub lng: f64,
    #[serde(default)]
    pub precision: Option<f64>,
    #[serde(default)]
    pub globe: Option<String>,
}

impl GlobeCoordinate {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

impl From<serde_json::Value> for ClaimValue {
    /// `kind` is empty when the value has no string `type` tag.
    fn from(raw: serde_json::Value) -> Self {
        let serde_json::Value::Object(mut fields) = raw else {
            debug!("Claim value is not an object");
            return Self::Unrecognized {
                kind: String::new(),
            };
        };
        let kind = match fields.remove("type") {
            Some(serde_json::Value::String(kind)) => kind,
            _ => String::new(),
        };
        let value = fields.remove("value").unwrap_or_default();
        let decoded = match kind.as_str() {
            "string" => serde_json::from_value(value).map(Self::String),
            "wikibase-entityid" => serde_json::from_value(value).map(Self::EntityRef),
            "time" => serde_json::from_value(value).map(Self::Time),
            "globecoordinate" => serde_json::from_value(value).map(Self::GlobeCoordinate),
            _ => return Self::Unrecognized { kind },
        };
        decoded.unwrap_or_else(|err| {
            debug!(kind = %kind, error = %err, "Claim value does not match its declared type");
            Self::Unrecognized { kind }
        })
    }
}

pub fn geosearch_url(api: &str, at: Coordinate, params: &GeoSearchParams) -> Result<Url> {
    let url = Url::parse_with_params(
        api,
        &[
            ("action", "query".to_owned()),
            ("list", "geosearch".to_owned()),
            ("gscoord", format!("{}|{}", at.lat, at.lng)),
            ("gsradius", params.radius.to_string()),
            ("gslimit", params.limit.to_string()),
            ("format", "json".to_owned()),
            ("origin", "*".to_owned()),
        ],
    )?;
    Ok(url)
}

pub fn entity_url(base: &str, id: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|()| SourceError::InvalidEndpoint(base.to_owned()))?
        .pop_if_empty()
        .push(&format!("{id}.json"));
    Ok(url)
}
