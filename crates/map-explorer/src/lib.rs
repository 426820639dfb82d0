//! Map Explorer - session engine for an interactive world map
//!
//! Map Explorer holds the state behind a map page: a place search with a
//! results dropdown, a clicked and a search-selected position each with its own
//! administrative border overlay, and an info panel of Wikidata facts about the
//! selected point. All data comes from public services (a Nominatim-compatible
//! geocoder, ipinfo.io and Wikidata); the engine sequences the calls, discards
//! stale responses and exposes a [`MapView`] snapshot for any renderer.
//!
//! # Quick Start
//!
//! ```no_run
//! use map_explorer::{Coordinate, Explorer, ExplorerConfigBuilder, Flavor};
//!
//! # async fn run() -> Result<(), map_explorer::error::ExplorerError> {
//! let config = ExplorerConfigBuilder::from_env()
//!     .fallback_center(Some(Coordinate::BERLIN_FALLBACK))
//!     .build();
//! let explorer = Explorer::new(config)?;
//!
//! explorer.bootstrap().await;
//! explorer.click(Coordinate::new(48.8566, 2.3522)).await;
//!
//! let view = explorer.view();
//! if let Some(overlay) = view.overlay(Flavor::Clicked) {
//!     println!("Border: {:?}", overlay.geometry.display_name());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Failure policy
//!
//! Nothing in the session surfaces an error to the user. Transport failures,
//! empty results and unexpected response shapes are logged and leave the
//! affected state empty or unchanged. The `try_*` methods expose the underlying
//! [`Result`](error::Result) where a caller wants it.
use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod border;
mod config;
mod core;
mod enrich;
pub mod error;
mod position;
mod request;
mod search;
mod view;

pub use crate::core::{DefaultSource, Explorer};

pub use border::{BorderGeometry, BorderOverlays};
pub use config::{ExplorerConfig, ExplorerConfigBuilder, GEOCODING_API_ENV};
pub use enrich::{
    EntityFacts, Established, FactRow, InfoPanel, LABEL_LANGUAGE, OpenPanel, UNKNOWN, UNKNOWN_PLACE,
    Website, parse_year, property,
};
pub use map_explorer_sources as sources;
pub use map_explorer_sources::{
    Claim, ClaimValue, Coordinate, EntityRecord, GeoSource, PlaceCandidate,
};
pub use position::{Flavor, PositionStore};
pub use request::{OrderingPolicy, RequestTag, Tracked};
pub use search::{ListenerId, SearchDropdown, SearchMount};
pub use view::{MapView, Marker, Overlay, OverlayStyle, TileLayer};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Map Explorer library.
///
/// Installs a `tracing` fmt subscriber filtered by `RUST_LOG` when set, and by
/// `level` otherwise. Later calls are no-ops.
///
/// # Examples
///
/// ```rust
/// use map_explorer::init_logging;
/// use tracing::Level;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), map_explorer::error::ExplorerError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), error::ExplorerError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?
            .add_directive("hyper_util=warn".parse()?)
            .add_directive("reqwest=warn".parse()?);

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .try_init()
            .map_err(|err| anyhow::anyhow!(err))?;
        Ok(())
    })
}
