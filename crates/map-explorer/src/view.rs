//! Read-only snapshot of everything a renderer draws.

use map_explorer_sources::{Coordinate, PlaceCandidate};

use crate::{border::BorderGeometry, enrich::InfoPanel, position::Flavor};

pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str =
    r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#;
pub const DEFAULT_ZOOM: u8 = 11;

/// Raster tile source. The attribution must be shown wherever the tiles are.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

impl TileLayer {
    /// Fill the `{s}`, `{z}`, `{x}` and `{y}` placeholders.
    pub fn tile_url(&self, subdomain: char, z: u8, x: u32, y: u32) -> String {
        self.url_template
            .replace("{s}", subdomain.encode_utf8(&mut [0; 4]))
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: OSM_TILE_URL.to_owned(),
            attribution: OSM_ATTRIBUTION.to_owned(),
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub color: String,
    pub weight: u8,
    pub fill_opacity: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            color: "blue".to_owned(),
            weight: 2,
            fill_opacity: 0.0,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub flavor: Flavor,
    pub at: Coordinate,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub flavor: Flavor,
    pub geometry: BorderGeometry,
    pub style: OverlayStyle,
}

/// Session state as of one instant.
///
/// Overlays whose latest fetch is still pending are left out, so a renderer never
/// draws a geometry that is about to be replaced.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    /// `None` until the map has been seeded
    pub center: Option<Coordinate>,
    pub zoom: u8,
    pub tile_layer: TileLayer,
    pub markers: Vec<Marker>,
    pub overlays: Vec<Overlay>,
    /// Flavors with a border fetch still outstanding
    pub loading: Vec<Flavor>,
    pub panel: InfoPanel,
    pub candidates: Vec<PlaceCandidate>,
}

impl MapView {
    pub fn is_seeded(&self) -> bool {
        self.center.is_some()
    }

    pub fn marker(&self, flavor: Flavor) -> Option<&Marker> {
        self.markers.iter().find(|m| m.flavor == flavor)
    }

    pub fn overlay(&self, flavor: Flavor) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.flavor == flavor)
    }

    pub fn is_loading(&self, flavor: Flavor) -> bool {
        self.loading.contains(&flavor)
    }
}
