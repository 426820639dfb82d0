use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::{
    Coordinate, GeoSource, Result, SourceConfig,
    ipinfo::IpInfo,
    nominatim::{self, NominatimPlace},
    wikidata::{self, EntityDataResponse, EntityRecord, GeoSearchHit, GeoSearchResponse},
};

/// [`GeoSource`] backed by the public web services.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    config: SourceConfig,
}

impl HttpSource {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "GET");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

impl GeoSource for HttpSource {
    #[instrument(name = "Search places", skip(self), level = "debug")]
    async fn search_places(&self, query: &str) -> Result<Vec<NominatimPlace>> {
        let url = nominatim::search_url(&self.config.geocoding_base, query)?;
        self.get_json(url).await
    }

    #[instrument(name = "Reverse border", skip(self), level = "debug")]
    async fn reverse_border(&self, at: Coordinate) -> Result<Value> {
        let url = nominatim::reverse_url(&self.config.geocoding_base, at, &self.config.border)?;
        self.get_json(url).await
    }

    #[instrument(name = "Locate IP", skip(self), level = "debug")]
    async fn locate_ip(&self) -> Result<IpInfo> {
        let url = Url::parse(&self.config.ip_lookup_url)?;
        self.get_json(url).await
    }

    #[instrument(name = "Nearby entities", skip(self), level = "debug")]
    async fn nearby_entities(&self, at: Coordinate) -> Result<Vec<GeoSearchHit>> {
        let url = wikidata::geosearch_url(&self.config.wikidata_api_url, at, &self.config.geosearch)?;
        let response: GeoSearchResponse = self.get_json(url).await?;
        Ok(response.into_hits())
    }

    #[instrument(name = "Entity data", skip(self), level = "debug")]
    async fn entity(&self, id: &str) -> Result<EntityRecord> {
        let url = wikidata::entity_url(&self.config.entity_data_url, id)?;
        let response: EntityDataResponse = self.get_json(url).await?;
        response.take(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_source_keeps_config() {
        let config = SourceConfig {
            geocoding_base: "http://localhost:8088".to_owned(),
            ..SourceConfig::default()
        };
        let source = HttpSource::new(config.clone()).unwrap();
        assert_eq!(source.config(), &config);
    }
}
