use std::time::Duration;

use map_explorer_sources::{BorderParams, Coordinate, GeoSearchParams, SourceConfig};

use crate::{
    error::ExplorerError,
    request::OrderingPolicy,
    view::{DEFAULT_ZOOM, TileLayer},
};

/// Environment variable overriding the geocoding base URL.
pub const GEOCODING_API_ENV: &str = "GEOCODING_API";

const MAX_ZOOM: u8 = 18;

/// Everything that shapes an [`Explorer`](crate::Explorer) session.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    /// Upstream endpoints and query parameters
    pub sources: SourceConfig,
    /// How overlapping responses for the same slot are reconciled
    pub ordering: OrderingPolicy,
    /// Resolve a Wikidata entity for every map click, not only for search selections
    pub enrich_on_click: bool,
    /// Map center used when the IP lookup fails
    pub fallback_center: Option<Coordinate>,
    pub initial_zoom: u8,
    pub tile_layer: TileLayer,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            sources: SourceConfig::default(),
            ordering: OrderingPolicy::LastRequestWins,
            enrich_on_click: true,
            fallback_center: None,
            initial_zoom: DEFAULT_ZOOM,
            tile_layer: TileLayer::default(),
        }
    }
}

impl ExplorerConfig {
    pub fn builder() -> ExplorerConfigBuilder {
        ExplorerConfigBuilder::new()
    }
}

/// Builder for creating explorer configurations with ergonomic defaults
#[derive(Debug, Clone, Default)]
pub struct ExplorerConfigBuilder {
    config: ExplorerConfig,
}

impl ExplorerConfigBuilder {
    /// Create a new builder with the recommended defaults
    pub fn new() -> Self {
        Self {
            config: ExplorerConfig::default(),
        }
    }

    /// Legacy behavior of the first web release: whichever response
    /// arrives last is shown, clicks only draw borders, and there is no
    /// fallback center.
    pub fn legacy() -> Self {
        let mut builder = Self::new();
        builder.config.ordering = OrderingPolicy::LastResponseWins;
        builder.config.enrich_on_click = false;
        builder.config.fallback_center = None;
        builder
    }

    /// Defaults, with the geocoding base taken from `GEOCODING_API` when set.
    pub fn from_env() -> Self {
        let builder = Self::new();
        match std::env::var(GEOCODING_API_ENV) {
            Ok(base) if !base.trim().is_empty() => builder.geocoding_base(base.trim()),
            _ => builder,
        }
    }

    pub fn geocoding_base(mut self, base: impl Into<String>) -> Self {
        self.config.sources.geocoding_base = base.into();
        self
    }

    pub fn ip_lookup_url(mut self, url: impl Into<String>) -> Self {
        self.config.sources.ip_lookup_url = url.into();
        self
    }

    pub fn wikidata_api_url(mut self, url: impl Into<String>) -> Self {
        self.config.sources.wikidata_api_url = url.into();
        self
    }

    pub fn entity_data_url(mut self, url: impl Into<String>) -> Self {
        self.config.sources.entity_data_url = url.into();
        self
    }

    /// Set the reverse-geocode zoom (0..=18) and polygon simplification threshold
    pub fn border_detail(mut self, zoom: u8, polygon_threshold: f64) -> Result<Self, ExplorerError> {
        if zoom > MAX_ZOOM {
            return Err(ExplorerError::ConfigError(format!(
                "Border zoom must be at most {MAX_ZOOM}, got {zoom}"
            )));
        }
        if !polygon_threshold.is_finite() || polygon_threshold < 0.0 {
            return Err(ExplorerError::ConfigError(format!(
                "Polygon threshold must be a non-negative number, got {polygon_threshold}"
            )));
        }
        self.config.sources.border = BorderParams {
            zoom,
            polygon_threshold,
        };
        Ok(self)
    }

    /// Set the nearby-entity search radius in meters and the number of hits
    pub fn geosearch(mut self, radius: u32, limit: u32) -> Result<Self, ExplorerError> {
        if radius == 0 || limit == 0 {
            return Err(ExplorerError::ConfigError(format!(
                "Geosearch radius and limit must be positive, got radius {radius} and limit {limit}"
            )));
        }
        self.config.sources.geosearch = GeoSearchParams { radius, limit };
        Ok(self)
    }

    pub fn fallback_center(mut self, center: Option<Coordinate>) -> Self {
        self.config.fallback_center = center;
        self
    }

    pub fn ordering(mut self, policy: OrderingPolicy) -> Self {
        self.config.ordering = policy;
        self
    }

    pub fn enrich_on_click(mut self, enabled: bool) -> Self {
        self.config.enrich_on_click = enabled;
        self
    }

    pub fn initial_zoom(mut self, zoom: u8) -> Self {
        self.config.initial_zoom = zoom.min(MAX_ZOOM);
        self
    }

    pub fn tile_layer(mut self, layer: TileLayer) -> Self {
        self.config.tile_layer = layer;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.sources.user_agent = user_agent.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.sources.timeout = timeout;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> ExplorerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use map_explorer_sources::DEFAULT_GEOCODING_BASE;

    use super::*;

    #[test]
    fn test_default_builder() {
        let config = ExplorerConfigBuilder::new().build();
        assert_eq!(config.ordering, OrderingPolicy::LastRequestWins);
        assert!(config.enrich_on_click);
        assert!(config.fallback_center.is_none());
        assert_eq!(config.initial_zoom, 11);
        assert_eq!(config.sources.geocoding_base, DEFAULT_GEOCODING_BASE);
        assert_eq!(config.sources.border.zoom, 6);
        assert_eq!(config.sources.border.polygon_threshold, 0.001);
        assert_eq!(config.sources.geosearch.radius, 1000);
        assert_eq!(config.sources.geosearch.limit, 1);
    }

    #[test]
    fn test_legacy_preset() {
        let config = ExplorerConfigBuilder::legacy().build();
        assert_eq!(config.ordering, OrderingPolicy::LastResponseWins);
        assert!(!config.enrich_on_click);
        assert!(config.fallback_center.is_none());
    }

    #[test]
    fn test_method_chaining() {
        let config = ExplorerConfig::builder()
            .geocoding_base("http://localhost:8088")
            .fallback_center(Some(Coordinate::BERLIN_FALLBACK))
            .enrich_on_click(false)
            .initial_zoom(30)
            .user_agent("tests/1.0")
            .timeout(Duration::from_secs(2))
            .build();

        assert_eq!(config.sources.geocoding_base, "http://localhost:8088");
        assert_eq!(config.fallback_center, Some(Coordinate::BERLIN_FALLBACK));
        assert!(!config.enrich_on_click);
        assert_eq!(config.initial_zoom, 18);
        assert_eq!(config.sources.user_agent, "tests/1.0");
        assert_eq!(config.sources.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_override_preset() {
        let config = ExplorerConfigBuilder::legacy()
            .ordering(OrderingPolicy::LastRequestWins)
            .build();
        assert_eq!(config.ordering, OrderingPolicy::LastRequestWins);
        assert!(!config.enrich_on_click);
    }

    #[test]
    fn test_border_detail_validation() {
        let config = ExplorerConfigBuilder::new()
            .border_detail(8, 0.0001)
            .unwrap()
            .build();
        assert_eq!(config.sources.border.zoom, 8);
        assert_eq!(config.sources.border.polygon_threshold, 0.0001);

        assert!(ExplorerConfigBuilder::new().border_detail(19, 0.001).is_err());
        assert!(ExplorerConfigBuilder::new().border_detail(6, -1.0).is_err());
        assert!(ExplorerConfigBuilder::new().border_detail(6, f64::NAN).is_err());
    }

    #[test]
    fn test_geosearch_validation() {
        let config = ExplorerConfigBuilder::new().geosearch(500, 3).unwrap().build();
        assert_eq!(config.sources.geosearch.radius, 500);
        assert_eq!(config.sources.geosearch.limit, 3);

        assert!(ExplorerConfigBuilder::new().geosearch(0, 1).is_err());
        assert!(ExplorerConfigBuilder::new().geosearch(1000, 0).is_err());
    }
}
