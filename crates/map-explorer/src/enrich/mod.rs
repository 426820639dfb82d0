//! Linked-data enrichment: nearby Wikidata entity -> record -> display facts.

mod facts;
mod panel;

pub use facts::{
    EntityFacts, Established, FactRow, LABEL_LANGUAGE, UNKNOWN, UNKNOWN_PLACE, Website,
    parse_year, property,
};
pub use panel::{InfoPanel, OpenPanel};

use map_explorer_sources::{Coordinate, EntityRecord, GeoSource};
use tracing::{debug, instrument};

use crate::error::Result;

/// Nearest entity around `at` and its full record.
///
/// `Ok(None)` when nothing lies within the search radius; the detail fetch is
/// skipped in that case.
#[instrument(name = "Resolve entity", skip(source), level = "debug")]
pub(crate) async fn resolve_entity<S: GeoSource>(
    source: &S,
    at: Coordinate,
) -> Result<Option<EntityRecord>> {
    let hits = source.nearby_entities(at).await?;
    let Some(nearest) = hits.into_iter().next() else {
        debug!("No entity near point");
        return Ok(None);
    };
    debug!(entity_id = %nearest.title, distance = ?nearest.dist, "Nearest entity");
    let record = source.entity(&nearest.title).await?;
    Ok(Some(record))
}
