//! Display facts extracted from a Wikidata entity record.
//!
//! Only the first statement of each property is read. Each row is independent:
//! a property missing from the record means its row is absent, while a property
//! that is present but has an unexpected value shape degrades per row (see
//! [`FactRow`]).

use std::fmt;

use itertools::Itertools;
use map_explorer_sources::{ClaimValue, EntityRecord, wikidata::EntityRef};
use once_cell::sync::Lazy;
use regex::Regex;

pub const LABEL_LANGUAGE: &str = "en";
pub const UNKNOWN_PLACE: &str = "Unknown Place";
pub const UNKNOWN: &str = "Unknown";

/// Wikidata property ids read by the info panel.
pub mod property {
    pub const INSTANCE_OF: &str = "P31";
    pub const COUNTRY: &str = "P17";
    pub const INCEPTION: &str = "P571";
    pub const OFFICIAL_WEBSITE: &str = "P856";
}

// `+1990-00-00T00:00:00Z`: signed year, then month and day which may be zero.
static TIME_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+-])?(\d{1,16})-").expect("valid year pattern"));

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Established {
    Year(i64),
    Unknown,
}

impl fmt::Display for Established {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year @ 0..=9999) => write!(f, "{year:04}"),
            Self::Year(year) => write!(f, "{year}"),
            Self::Unknown => f.write_str(UNKNOWN),
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Website {
    Link(String),
    Unknown,
}

impl fmt::Display for Website {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link(url) => f.write_str(url),
            Self::Unknown => f.write_str(UNKNOWN),
        }
    }
}

/// One detail row of the info panel.
///
/// `Type` and `Country` only exist when the claim is an entity reference and
/// carry the bare numeric code (the id without its `Q`), not a resolved label.
/// `Established` and `Website` exist whenever their property does and fall back
/// to "Unknown".
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactRow {
    Type(String),
    Country(String),
    Established(Established),
    Website(Website),
}

impl FactRow {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Type(_) => "Type",
            Self::Country(_) => "Country",
            Self::Established(_) => "Established",
            Self::Website(_) => "Website",
        }
    }

    pub fn value(&self) -> String {
        match self {
            Self::Type(code) | Self::Country(code) => code.clone(),
            Self::Established(established) => established.to_string(),
            Self::Website(website) => website.to_string(),
        }
    }
}

impl fmt::Display for FactRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.value())
    }
}

/// What the info panel shows for one entity.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityFacts {
    pub entity_id: String,
    pub title: String,
    /// Absent rather than "Unknown" when the record has no English description
    pub description: Option<String>,
    pub rows: Vec<FactRow>,
}

impl EntityFacts {
    pub fn from_record(record: &EntityRecord) -> Self {
        let title = record
            .label(LABEL_LANGUAGE)
            .unwrap_or(UNKNOWN_PLACE)
            .to_owned();
        let description = record.description(LABEL_LANGUAGE).map(str::to_owned);

        let rows = [
            entity_code(record, property::INSTANCE_OF).map(FactRow::Type),
            entity_code(record, property::COUNTRY).map(FactRow::Country),
            established(record).map(FactRow::Established),
            website(record).map(FactRow::Website),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self {
            entity_id: record.id.clone(),
            title,
            description,
            rows,
        }
    }

    pub fn row(&self, label: &str) -> Option<&FactRow> {
        self.rows.iter().find(|row| row.label() == label)
    }

    pub fn type_code(&self) -> Option<&str> {
        self.rows.iter().find_map(|row| match row {
            FactRow::Type(code) => Some(code.as_str()),
            _ => None,
        })
    }

    pub fn country_code(&self) -> Option<&str> {
        self.rows.iter().find_map(|row| match row {
            FactRow::Country(code) => Some(code.as_str()),
            _ => None,
        })
    }

    pub fn established(&self) -> Option<Established> {
        self.rows.iter().find_map(|row| match row {
            FactRow::Established(established) => Some(*established),
            _ => None,
        })
    }

    pub fn website(&self) -> Option<&Website> {
        self.rows.iter().find_map(|row| match row {
            FactRow::Website(website) => Some(website),
            _ => None,
        })
    }
}

impl fmt::Display for EntityFacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if let Some(description) = &self.description {
            writeln!(f, "{description}")?;
        }
        write!(f, "{}", self.rows.iter().join("\n"))
    }
}

/// Year of a Wikidata time string, e.g. `1990` for `+1990-00-00T00:00:00Z`.
pub fn parse_year(time: &str) -> Option<i64> {
    let captures = TIME_YEAR.captures(time)?;
    let year: i64 = captures.get(2)?.as_str().parse().ok()?;
    match captures.get(1).map(|m| m.as_str()) {
        Some("-") => Some(-year),
        _ => Some(year),
    }
}

fn entity_code(record: &EntityRecord, property: &str) -> Option<String> {
    match record.first_claim(property)?.value()? {
        ClaimValue::EntityRef(reference) => Some(strip_q(reference)),
        _ => None,
    }
}

fn strip_q(reference: &EntityRef) -> String {
    reference.id.as_deref().map_or_else(
        || reference.numeric_id.to_string(),
        |id| id.strip_prefix('Q').unwrap_or(id).to_owned(),
    )
}

fn established(record: &EntityRecord) -> Option<Established> {
    let claim = record.first_claim(property::INCEPTION)?;
    let year = match claim.value() {
        Some(ClaimValue::Time(time)) => parse_year(&time.time),
        _ => None,
    };
    Some(year.map_or(Established::Unknown, Established::Year))
}

fn website(record: &EntityRecord) -> Option<Website> {
    let claim = record.first_claim(property::OFFICIAL_WEBSITE)?;
    Some(match claim.value() {
        Some(ClaimValue::String(url)) => Website::Link(url.clone()),
        _ => Website::Unknown,
    })
}

#[cfg(test)]
mod tests {
    use map_explorer_sources::{test_data, wikidata::EntityDataResponse};

    use super::*;

    fn record_from(json: &str, id: &str) -> EntityRecord {
        serde_json::from_str::<EntityDataResponse>(json)
            .unwrap()
            .take(id)
            .unwrap()
    }

    fn record_with_claim(property: &str, datavalue: &str) -> EntityRecord {
        let json = format!(
            r#"{{"id": "Q1", "claims": {{"{property}": [
                {{"mainsnak": {{"snaktype": "value", "property": "{property}", "datavalue": {datavalue}}}}}
            ]}}}}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_berlin_facts() {
        let facts = EntityFacts::from_record(&record_from(test_data::ENTITY_BERLIN_JSON, "Q64"));

        assert_eq!(facts.entity_id, "Q64");
        assert_eq!(facts.title, "Berlin");
        assert_eq!(
            facts.description.as_deref(),
            Some("capital and largest city of Germany")
        );
        assert_eq!(
            facts.rows,
            vec![
                FactRow::Type("515".to_owned()),
                FactRow::Country("183".to_owned()),
                FactRow::Established(Established::Year(1237)),
                FactRow::Website(Website::Link("https://www.berlin.de/".to_owned())),
            ]
        );
    }

    #[test]
    fn test_type_strips_q_prefix() {
        let record = record_with_claim(
            "P31",
            r#"{"type": "wikibase-entityid", "value": {"entity-type": "item", "numeric-id": 42, "id": "Q42"}}"#,
        );
        let facts = EntityFacts::from_record(&record);
        assert_eq!(facts.type_code(), Some("42"));
        assert_eq!(facts.row("Type").map(FactRow::value).as_deref(), Some("42"));
    }

    #[test]
    fn test_entity_ref_without_id_uses_numeric_id() {
        let record = record_with_claim(
            "P17",
            r#"{"type": "wikibase-entityid", "value": {"entity-type": "item", "numeric-id": 183}}"#,
        );
        assert_eq!(EntityFacts::from_record(&record).country_code(), Some("183"));
    }

    #[test]
    fn test_missing_label_and_description() {
        let facts = EntityFacts::from_record(&record_from(test_data::ENTITY_SPARSE_JSON, "Q999"));
        assert_eq!(facts.title, UNKNOWN_PLACE);
        assert!(facts.description.is_none());
        assert_eq!(
            facts.to_string(),
            "Unknown Place\nEstablished: Unknown\nWebsite: Unknown"
        );
    }

    #[test]
    fn test_unexpected_shapes_degrade_per_row() {
        let facts = EntityFacts::from_record(&record_from(test_data::ENTITY_SPARSE_JSON, "Q999"));

        // P31 is a plain string: no Type row. P17 is absent: no Country row.
        assert!(facts.type_code().is_none());
        assert!(facts.country_code().is_none());
        // P571 and P856 are present but malformed: rows render "Unknown".
        assert_eq!(facts.established(), Some(Established::Unknown));
        assert_eq!(facts.website(), Some(&Website::Unknown));
        assert_eq!(facts.rows.len(), 2);
    }

    #[test]
    fn test_established_from_year_precision_time() {
        let record = record_with_claim(
            "P571",
            r#"{"type": "time", "value": {"time": "+1990-00-00T00:00:00Z", "precision": 9}}"#,
        );
        let facts = EntityFacts::from_record(&record);
        assert_eq!(facts.established(), Some(Established::Year(1990)));
        assert_eq!(facts.row("Established").unwrap().to_string(), "Established: 1990");
    }

    #[test]
    fn test_established_novalue_renders_unknown() {
        let record: EntityRecord = serde_json::from_str(
            r#"{"id": "Q1", "claims": {"P571": [{"mainsnak": {"snaktype": "somevalue", "property": "P571"}}]}}"#,
        )
        .unwrap();
        assert_eq!(
            EntityFacts::from_record(&record).established(),
            Some(Established::Unknown)
        );
    }

    #[test]
    fn test_no_claims_no_rows() {
        let record: EntityRecord = serde_json::from_str(
            r#"{"id": "Q1", "labels": {"en": {"language": "en", "value": "Somewhere"}}}"#,
        )
        .unwrap();
        let facts = EntityFacts::from_record(&record);
        assert!(facts.rows.is_empty());
        assert_eq!(facts.to_string(), "Somewhere\n");
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("+1990-00-00T00:00:00Z"), Some(1990));
        assert_eq!(parse_year("+0800-12-25T00:00:00Z"), Some(800));
        assert_eq!(parse_year("-0500-00-00T00:00:00Z"), Some(-500));
        assert_eq!(parse_year("2001-01-01"), Some(2001));
        assert_eq!(parse_year("sometime"), None);
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("+-1990"), None);
    }

    #[test]
    fn test_year_renders_four_digits() {
        assert_eq!(Established::Year(800).to_string(), "0800");
        assert_eq!(Established::Year(1990).to_string(), "1990");
        assert_eq!(Established::Year(12_000).to_string(), "12000");
        assert_eq!(Established::Year(-500).to_string(), "-500");
    }

    #[test]
    fn test_untyped_claim_leaves_other_rows() {
        let record: EntityRecord = serde_json::from_str(
            r#"{"id": "Q5", "labels": {"en": {"language": "en", "value": "Aachen"}}, "claims": {
                "P31": [{"mainsnak": {"snaktype": "value", "property": "P31",
                    "datavalue": {"value": "oops"}}}],
                "P17": [{"mainsnak": {"snaktype": "value", "property": "P17",
                    "datavalue": {"type": "wikibase-entityid",
                                  "value": {"entity-type": "item", "numeric-id": 183, "id": "Q183"}}}}],
                "P571": [{"mainsnak": {"snaktype": "value", "property": "P571",
                    "datavalue": {"type": "time", "value": {"time": "+0800-00-00T00:00:00Z", "precision": 9}}}}],
                "P856": [{"mainsnak": {"snaktype": "value", "property": "P856",
                    "datavalue": {"type": "string", "value": "https://www.aachen.de/"}}}]
            }}"#,
        )
        .unwrap();

        let facts = EntityFacts::from_record(&record);
        assert!(facts.type_code().is_none());
        assert_eq!(
            facts.to_string(),
            "Aachen\n\
             Country: 183\n\
             Established: 0800\n\
             Website: https://www.aachen.de/"
        );
    }

    #[test]
    fn test_panel_text() {
        let facts = EntityFacts::from_record(&record_from(test_data::ENTITY_BERLIN_JSON, "Q64"));
        assert_eq!(
            facts.to_string(),
            "Berlin\n\
             capital and largest city of Germany\n\
             Type: 515\n\
             Country: 183\n\
             Established: 1237\n\
             Website: https://www.berlin.de/"
        );
    }
}
