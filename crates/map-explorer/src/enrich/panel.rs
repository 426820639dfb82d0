use map_explorer_sources::{Coordinate, EntityRecord};

use super::EntityFacts;

/// An entity shown in the info panel, with the point it was resolved for.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct OpenPanel {
    pub coordinate: Coordinate,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub record: EntityRecord,
    pub facts: EntityFacts,
}

impl OpenPanel {
    pub fn new(coordinate: Coordinate, record: EntityRecord) -> Self {
        let facts = EntityFacts::from_record(&record);
        Self {
            coordinate,
            record,
            facts,
        }
    }
}

/// Info panel state. It opens on a successful entity resolution and closes on
/// the close button or a new search selection.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InfoPanel {
    #[default]
    Closed,
    Open(OpenPanel),
}

impl InfoPanel {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn facts(&self) -> Option<&EntityFacts> {
        match self {
            Self::Open(panel) => Some(&panel.facts),
            Self::Closed => None,
        }
    }
}

impl From<Option<OpenPanel>> for InfoPanel {
    fn from(panel: Option<OpenPanel>) -> Self {
        panel.map_or(Self::Closed, Self::Open)
    }
}
