use serde::Deserialize;

use crate::{Coordinate, Result, SourceError};

pub const IPINFO_URL: &str = "https://ipinfo.io/json";

/// The subset of the ipinfo.io response used to seed the map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IpInfo {
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// `"lat,lng"`
    #[serde(default)]
    pub loc: Option<String>,
}

impl IpInfo {
    pub fn coordinate(&self) -> Result<Coordinate> {
        let loc = self
            .loc
            .as_deref()
            .ok_or_else(|| SourceError::MalformedLocation("missing `loc` field".to_owned()))?;
        Coordinate::parse_pair(loc).ok_or_else(|| SourceError::MalformedLocation(loc.to_owned()))
    }
}
