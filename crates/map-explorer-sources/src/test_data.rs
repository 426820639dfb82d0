//! Canned upstream responses for tests and demos.
//!
//! The documents are trimmed copies of real responses: only the fields the
//! explorer reads are kept, plus a few it must ignore.

use serde_json::{Value, json};

use crate::Coordinate;

pub const IPINFO_JSON: &str = r#"{
    "ip": "203.0.113.7",
    "city": "Berlin",
    "region": "Land Berlin",
    "country": "DE",
    "loc": "52.5244,13.4105",
    "timezone": "Europe/Berlin"
}"#;

pub const SEARCH_BERLIN_JSON: &str = r#"[
    {
        "place_id": 240109189,
        "licence": "Data © OpenStreetMap contributors, ODbL 1.0.",
        "osm_type": "relation",
        "osm_id": 62422,
        "lat": "52.52",
        "lon": "13.405",
        "category": "boundary",
        "type": "administrative",
        "place_rank": 8,
        "importance": 0.8875,
        "display_name": "Berlin, Deutschland"
    },
    {
        "place_id": 8781245,
        "lat": "45.4695",
        "lon": "-71.1846",
        "category": "place",
        "type": "town",
        "display_name": "Berlin, Coös County, New Hampshire, United States"
    },
    {
        "place_id": "8781246",
        "lat": "45.4701",
        "lon": "-71.1850",
        "category": "place",
        "type": "town",
        "display_name": "Berlin, Coös County, New Hampshire, United States"
    }
]"#;

/// What Nominatim answers for `q=`: an error object rather than an array.
pub const SEARCH_EMPTY_QUERY_JSON: &str = r#"{
    "error": {"code": 400, "message": "Nothing to search for."}
}"#;

pub const GEOSEARCH_BERLIN_JSON: &str = r#"{
    "batchcomplete": "",
    "query": {
        "geosearch": [
            {"pageid": 140, "ns": 0, "title": "Q64", "lat": 52.516666666667,
             "lon": 13.383333333333, "dist": 617.4, "primary": ""}
        ]
    }
}"#;

pub const GEOSEARCH_EMPTY_JSON: &str = r#"{
    "batchcomplete": "",
    "query": {"geosearch": []}
}"#;

pub const ENTITY_BERLIN_JSON: &str = r#"{
    "entities": {
        "Q64": {
            "type": "item",
            "id": "Q64",
            "labels": {
                "en": {"language": "en", "value": "Berlin"},
                "de": {"language": "de", "value": "Berlin"}
            },
            "descriptions": {
                "en": {"language": "en", "value": "capital and largest city of Germany"}
            },
            "claims": {
                "P31": [{
                    "mainsnak": {"snaktype": "value", "property": "P31",
                        "datavalue": {"value": {"entity-type": "item", "numeric-id": 515, "id": "Q515"},
                                      "type": "wikibase-entityid"}},
                    "type": "statement", "rank": "normal"
                }],
                "P17": [{
                    "mainsnak": {"snaktype": "value", "property": "P17",
                        "datavalue": {"value": {"entity-type": "item", "numeric-id": 183, "id": "Q183"},
                                      "type": "wikibase-entityid"}},
                    "type": "statement", "rank": "normal"
                }],
                "P571": [{
                    "mainsnak": {"snaktype": "value", "property": "P571",
                        "datavalue": {"value": {"time": "+1237-00-00T00:00:00Z", "timezone": 0,
                                                "before": 0, "after": 0, "precision": 9,
                                                "calendarmodel": "http://www.wikidata.org/entity/Q1985727"},
                                      "type": "time"}},
                    "type": "statement", "rank": "normal"
                }],
                "P856": [{
                    "mainsnak": {"snaktype": "value", "property": "P856",
                        "datavalue": {"value": "https://www.berlin.de/", "type": "string"}},
                    "type": "statement", "rank": "preferred"
                }],
                "P625": [{
                    "mainsnak": {"snaktype": "value", "property": "P625",
                        "datavalue": {"value": {"latitude": 52.516666666667, "longitude": 13.383333333333,
                                                "altitude": null, "precision": 0.00027777777777778,
                                                "globe": "http://www.wikidata.org/entity/Q2"},
                                      "type": "globecoordinate"}},
                    "type": "statement", "rank": "normal"
                }],
                "P1082": [{
                    "mainsnak": {"snaktype": "value", "property": "P1082",
                        "datavalue": {"value": {"amount": "+3755251", "unit": "1"}, "type": "quantity"}},
                    "type": "statement", "rank": "preferred"
                }]
            }
        }
    }
}"#;

/// A record where every displayed claim has an unexpected shape.
pub const ENTITY_SPARSE_JSON: &str = r#"{
    "entities": {
        "Q999": {
            "id": "Q999",
            "labels": {"fr": {"language": "fr", "value": "Lieu-dit"}},
            "claims": {
                "P31": [{
                    "mainsnak": {"snaktype": "value", "property": "P31",
                        "datavalue": {"value": "village", "type": "string"}}
                }],
                "P571": [{
                    "mainsnak": {"snaktype": "value", "property": "P571",
                        "datavalue": {"value": {"time": "sometime", "precision": 9}, "type": "time"}}
                }],
                "P856": [{
                    "mainsnak": {"snaktype": "value", "property": "P856",
                        "datavalue": {"value": {"entity-type": "item", "numeric-id": 1, "id": "Q1"},
                                      "type": "wikibase-entityid"}}
                }]
            }
        }
    }
}"#;

/// A reverse-geocode `FeatureCollection` with a square boundary around `at`.
pub fn border_feature(name: &str, at: Coordinate) -> Value {
    let d = 0.5;
    let ring = json!([
        [at.lng - d, at.lat - d],
        [at.lng + d, at.lat - d],
        [at.lng + d, at.lat + d],
        [at.lng - d, at.lat + d],
        [at.lng - d, at.lat - d]
    ]);
    json!({
        "type": "FeatureCollection",
        "licence": "Data © OpenStreetMap contributors, ODbL 1.0. http://osm.org/copyright",
        "features": [{
            "type": "Feature",
            "properties": {
                "place_id": 240109189,
                "category": "boundary",
                "type": "administrative",
                "place_rank": 8,
                "display_name": name,
                "name": name
            },
            "bbox": [at.lng - d, at.lat - d, at.lng + d, at.lat + d],
            "geometry": {"type": "Polygon", "coordinates": [ring]}
        }]
    })
}

/// Nominatim's answer for a point in the open sea.
pub fn unable_to_geocode() -> Value {
    json!({"error": "Unable to geocode"})
}
