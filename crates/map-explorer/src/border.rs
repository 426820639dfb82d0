//! Administrative border overlays fetched by reverse geocoding.

use map_explorer_sources::{Coordinate, GeoSource};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    error::Result,
    position::Flavor,
    request::{OrderingPolicy, Tracked},
};

/// The reverse-geocode GeoJSON document, kept exactly as received.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, PartialEq)]
pub struct BorderGeometry(Value);

impl BorderGeometry {
    pub fn new(document: Value) -> Self {
        Self(document)
    }

    pub fn document(&self) -> &Value {
        &self.0
    }

    pub fn into_document(self) -> Value {
        self.0
    }

    fn features(&self) -> &[Value] {
        self.0
            .get("features")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn feature_count(&self) -> usize {
        self.features().len()
    }

    /// `Polygon`, `MultiPolygon`, ... of the first feature.
    pub fn geometry_type(&self) -> Option<&str> {
        self.features()
            .first()?
            .pointer("/geometry/type")
            .and_then(Value::as_str)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.features()
            .first()?
            .pointer("/properties/display_name")
            .and_then(Value::as_str)
    }

    /// Nominatim answers `{"error": ...}` for points it cannot place.
    pub fn upstream_error(&self) -> Option<&str> {
        self.0.get("error").and_then(Value::as_str)
    }
}

/// One border slot per position flavor.
#[derive(Debug, Clone)]
pub struct BorderOverlays {
    clicked: Tracked<BorderGeometry>,
    selected: Tracked<BorderGeometry>,
}

impl BorderOverlays {
    pub fn new(policy: OrderingPolicy) -> Self {
        Self {
            clicked: Tracked::new(policy),
            selected: Tracked::new(policy),
        }
    }

    pub fn slot(&self, flavor: Flavor) -> &Tracked<BorderGeometry> {
        match flavor {
            Flavor::Clicked => &self.clicked,
            Flavor::Selected => &self.selected,
        }
    }

    pub fn slot_mut(&mut self, flavor: Flavor) -> &mut Tracked<BorderGeometry> {
        match flavor {
            Flavor::Clicked => &mut self.clicked,
            Flavor::Selected => &mut self.selected,
        }
    }
}

#[instrument(name = "Fetch border", skip(source), level = "debug")]
pub(crate) async fn fetch_border<S: GeoSource>(source: &S, at: Coordinate) -> Result<BorderGeometry> {
    let document = source.reverse_border(at).await?;
    let geometry = BorderGeometry::new(document);
    debug!(
        features = geometry.feature_count(),
        geometry_type = ?geometry.geometry_type(),
        "Fetched border"
    );
    Ok(geometry)
}
