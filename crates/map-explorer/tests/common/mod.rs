//! A scripted [`GeoSource`] for driving the explorer without a network.
//!
//! Every response is registered up front together with an optional delay. Tests
//! run on a paused tokio clock, so delays only decide the order in which
//! responses arrive.

#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
    time::Duration,
};

use map_explorer::sources::{
    Result, SourceError,
    ipinfo::IpInfo,
    nominatim::NominatimPlace,
    wikidata::{EntityDataResponse, EntityRecord, GeoSearchHit, GeoSearchResponse},
};
use map_explorer::{Coordinate, GeoSource};
use serde_json::Value;

type Scripted<T> = (Duration, Option<T>);

#[derive(Debug, Default)]
pub struct FakeSource {
    ip: Mutex<Option<Scripted<String>>>,
    searches: Mutex<HashMap<String, String>>,
    borders: Mutex<HashMap<String, VecDeque<Scripted<Value>>>>,
    nearby: Mutex<HashMap<String, Scripted<String>>>,
    entities: Mutex<HashMap<String, Scripted<String>>>,
    calls: Mutex<Vec<String>>,
}

fn key(at: Coordinate) -> String {
    format!("{:.6},{:.6}", at.lat, at.lng)
}

/// What a garbled upstream body looks like once it reaches the source.
pub fn transport_failure() -> SourceError {
    match serde_json::from_str::<Value>("<html>502 Bad Gateway</html>") {
        Ok(_) => SourceError::MalformedLocation("unreachable".to_owned()),
        Err(err) => SourceError::Json(err),
    }
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// IP lookup answering with the given ipinfo document.
    pub fn with_ip(self, json: &str, delay_ms: u64) -> Self {
        *self.ip.lock().unwrap() = Some((Duration::from_millis(delay_ms), Some(json.to_owned())));
        self
    }

    pub fn with_search(self, query: &str, json: &str) -> Self {
        self.searches
            .lock()
            .unwrap()
            .insert(query.to_owned(), json.to_owned());
        self
    }

    /// Queue one reverse-geocode answer for `at`. Answers are handed out in
    /// order; the last one is repeated. `None` simulates a transport failure.
    pub fn with_border(self, at: Coordinate, delay_ms: u64, document: Option<Value>) -> Self {
        self.borders
            .lock()
            .unwrap()
            .entry(key(at))
            .or_default()
            .push_back((Duration::from_millis(delay_ms), document));
        self
    }

    pub fn with_nearby(self, at: Coordinate, delay_ms: u64, json: Option<&str>) -> Self {
        self.nearby.lock().unwrap().insert(
            key(at),
            (Duration::from_millis(delay_ms), json.map(str::to_owned)),
        );
        self
    }

    pub fn with_entity(self, id: &str, delay_ms: u64, json: Option<&str>) -> Self {
        self.entities.lock().unwrap().insert(
            id.to_owned(),
            (Duration::from_millis(delay_ms), json.map(str::to_owned)),
        );
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_border(&self, at: Coordinate) -> Option<Scripted<Value>> {
        let mut borders = self.borders.lock().unwrap();
        let queue = borders.get_mut(&key(at))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl GeoSource for FakeSource {
    async fn search_places(&self, query: &str) -> Result<Vec<NominatimPlace>> {
        self.record(format!("search:{query}"));
        let body = self
            .searches
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_else(|| "[]".to_owned());
        Ok(serde_json::from_str(&body)?)
    }

    async fn reverse_border(&self, at: Coordinate) -> Result<Value> {
        self.record(format!("reverse:{}", key(at)));
        let Some((delay, document)) = self.next_border(at) else {
            return Err(transport_failure());
        };
        tokio::time::sleep(delay).await;
        document.ok_or_else(transport_failure)
    }

    async fn locate_ip(&self) -> Result<IpInfo> {
        self.record("ip".to_owned());
        let scripted = self.ip.lock().unwrap().clone();
        let Some((delay, body)) = scripted else {
            return Err(transport_failure());
        };
        tokio::time::sleep(delay).await;
        let body = body.ok_or_else(transport_failure)?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn nearby_entities(&self, at: Coordinate) -> Result<Vec<GeoSearchHit>> {
        self.record(format!("geosearch:{}", key(at)));
        let scripted = self.nearby.lock().unwrap().get(&key(at)).cloned();
        let Some((delay, body)) = scripted else {
            return Ok(Vec::new());
        };
        tokio::time::sleep(delay).await;
        let body = body.ok_or_else(transport_failure)?;
        let response: GeoSearchResponse = serde_json::from_str(&body)?;
        Ok(response.into_hits())
    }

    async fn entity(&self, id: &str) -> Result<EntityRecord> {
        self.record(format!("entity:{id}"));
        let scripted = self.entities.lock().unwrap().get(id).cloned();
        let Some((delay, body)) = scripted else {
            return Err(SourceError::EntityNotFound(id.to_owned()));
        };
        tokio::time::sleep(delay).await;
        let body = body.ok_or_else(transport_failure)?;
        let response: EntityDataResponse = serde_json::from_str(&body)?;
        response.take(id)
    }
}
