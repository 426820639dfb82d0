//! The explorer session: state owner and orchestrator of every flow.
//!
//! # Quick Start
//!
//! ```no_run
//! use map_explorer::{Explorer, ExplorerConfig};
//!
//! # async fn run() -> Result<(), map_explorer::error::ExplorerError> {
//! let explorer = Explorer::new(ExplorerConfig::default())?;
//!
//! // Seed the map from the caller's IP
//! explorer.bootstrap().await;
//!
//! // Search, then pick the first hit
//! let candidates = explorer.search(Some("Berlin")).await;
//! if let Some(first) = candidates.first() {
//!     explorer.select(first).await;
//! }
//!
//! if let Some(facts) = explorer.view().panel.facts() {
//!     println!("{facts}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! All methods take `&self`, so a click can be issued while an earlier one is
//! still waiting on the network. State sits behind a mutex that is only held for
//! short synchronous sections, never across an `.await`. Each asynchronous result
//! carries a [`RequestTag`](crate::RequestTag) and is dropped if a newer request
//! for the same slot was issued in the meantime.

use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(feature = "http")]
use map_explorer_sources::HttpSource;
use map_explorer_sources::{Coordinate, EntityRecord, GeoSource, PlaceCandidate};
use tracing::{debug, info, instrument, warn};

use crate::{
    border::{self, BorderGeometry, BorderOverlays},
    config::ExplorerConfig,
    enrich::{self, InfoPanel, OpenPanel},
    error::Result,
    position::{Flavor, PositionStore},
    request::Tracked,
    search::{self, SearchDropdown, SearchMount},
    view::{MapView, Marker, Overlay, OverlayStyle},
};

/// All mutable state of one session.
#[derive(Debug)]
pub(crate) struct Session {
    pub(crate) center: Option<Coordinate>,
    pub(crate) positions: PositionStore,
    pub(crate) borders: BorderOverlays,
    pub(crate) panel: Tracked<OpenPanel>,
    pub(crate) dropdown: SearchDropdown,
}

impl Session {
    fn new(config: &ExplorerConfig) -> Self {
        Self {
            center: None,
            positions: PositionStore::new(),
            borders: BorderOverlays::new(config.ordering),
            panel: Tracked::new(config.ordering),
            dropdown: SearchDropdown::default(),
        }
    }

    /// No lock is held across a panic-prone section, so a poisoned lock still
    /// guards consistent state.
    pub(crate) fn lock(session: &Mutex<Self>) -> MutexGuard<'_, Self> {
        session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An interactive map session.
///
/// Owns the position store, the border overlays, the info panel and the search
/// dropdown, and drives the upstream calls that fill them. Every public
/// operation fails soft: problems are logged and the affected piece of state is
/// simply left empty or unchanged.
#[derive(Debug)]
pub struct Explorer<S = DefaultSource> {
    source: S,
    config: ExplorerConfig,
    session: Mutex<Session>,
}

#[cfg(feature = "http")]
pub type DefaultSource = HttpSource;
#[cfg(not(feature = "http"))]
pub type DefaultSource = ();

#[cfg(feature = "http")]
impl Explorer<HttpSource> {
    /// Create a session talking to the configured public services.
    pub fn new(config: ExplorerConfig) -> Result<Self> {
        let source = HttpSource::new(config.sources.clone())?;
        Ok(Self::with_source(source, config))
    }
}

impl<S: GeoSource> Explorer<S> {
    /// Create a session on top of any [`GeoSource`].
    pub fn with_source(source: S, config: ExplorerConfig) -> Self {
        let session = Mutex::new(Session::new(&config));
        Self {
            source,
            config,
            session,
        }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        Session::lock(&self.session)
    }

    /// Seed the map from a one-off IP geolocation lookup.
    ///
    /// On success the clicked position and the map center move there and its
    /// border is fetched. On failure the configured fallback center is used, if
    /// any. A position the user clicked before the lookup finished is kept.
    /// Returns the seed that was applied.
    #[instrument(name = "Bootstrap session", skip(self), level = "info")]
    pub async fn bootstrap(&self) -> Option<Coordinate> {
        let located = self
            .source
            .locate_ip()
            .await
            .and_then(|info| info.coordinate());
        let seed = match located {
            Ok(at) => {
                info!(lat = at.lat, lng = at.lng, "Located from IP");
                at
            }
            Err(err) => {
                warn!(error = %err, "IP geolocation failed");
                let fallback = self.config.fallback_center?;
                info!(lat = fallback.lat, lng = fallback.lng, "Using fallback center");
                fallback
            }
        };

        {
            let mut session = self.session();
            if session.positions.clicked().is_some() {
                debug!("Position already chosen by the user, not reseeding");
                session.center.get_or_insert(seed);
                return None;
            }
            session.center = Some(seed);
            session.positions.set_clicked(seed);
        }
        self.refresh_border(Flavor::Clicked, seed).await;
        Some(seed)
    }

    /// A click on the map at `at`.
    ///
    /// Moves the clicked marker, refetches its border and, when enabled,
    /// discards the open panel and resolves the entity nearest to the click.
    #[instrument(name = "Map click", skip(self), level = "info")]
    pub async fn click(&self, at: Coordinate) {
        self.session().positions.set_clicked(at);
        if self.config.enrich_on_click {
            futures::join!(
                self.refresh_border(Flavor::Clicked, at),
                self.refresh_entity(at)
            );
        } else {
            self.refresh_border(Flavor::Clicked, at).await;
        }
    }

    /// Search for places and show them in the dropdown.
    ///
    /// Never fails: a transport or decoding error is logged and yields no
    /// candidates.
    pub async fn search(&self, query: Option<&str>) -> Vec<PlaceCandidate> {
        let candidates = self.try_search(query).await.unwrap_or_else(|err| {
            warn!(query = ?query, error = %err, "Place search failed");
            Vec::new()
        });
        self.session().dropdown.show(candidates.clone());
        candidates
    }

    /// Like [`search`](Self::search) but reports failures and leaves the
    /// dropdown untouched.
    pub async fn try_search(&self, query: Option<&str>) -> Result<Vec<PlaceCandidate>> {
        search::search_places(&self.source, query).await
    }

    /// Border polygon enclosing `at`, without touching session state.
    pub async fn fetch_border(&self, at: Coordinate) -> Option<BorderGeometry> {
        border::fetch_border(&self.source, at)
            .await
            .inspect_err(|err| {
                warn!(lat = at.lat, lng = at.lng, error = %err, "Border fetch failed");
            })
            .ok()
    }

    /// Entity record nearest to `at`, without touching session state.
    ///
    /// `None` both when nothing is nearby and when either lookup fails.
    pub async fn resolve_entity(&self, at: Coordinate) -> Option<EntityRecord> {
        self.try_resolve_entity(at).await.unwrap_or_else(|err| {
            warn!(lat = at.lat, lng = at.lng, error = %err, "Entity resolution failed");
            None
        })
    }

    pub async fn try_resolve_entity(&self, at: Coordinate) -> Result<Option<EntityRecord>> {
        enrich::resolve_entity(&self.source, at).await
    }

    /// Pick a search result.
    ///
    /// Closes the dropdown and the panel, moves the selected marker and the map
    /// center, then fetches the selected border and resolves the entity at the
    /// same time. Returns whether the panel opened.
    #[instrument(name = "Select place", skip(self, candidate), fields(place_id = %candidate.place_id), level = "info")]
    pub async fn select(&self, candidate: &PlaceCandidate) -> bool {
        let at = candidate.coordinate();
        {
            let mut session = self.session();
            session.dropdown.clear();
            session.panel.invalidate();
            session.positions.set_selected(at);
            session.center = Some(at);
        }
        let ((), opened) = futures::join!(
            self.refresh_border(Flavor::Selected, at),
            self.refresh_entity(at)
        );
        opened
    }

    /// Pick the `index`-th candidate of the dropdown. `None` if there is no such
    /// candidate.
    pub async fn select_nth(&self, index: usize) -> Option<bool> {
        let candidate = self.session().dropdown.get(index).cloned()?;
        Some(self.select(&candidate).await)
    }

    /// The panel's close button: closes the panel and forgets the selected
    /// position together with its overlay.
    pub fn close_panel(&self) {
        let mut session = self.session();
        session.panel.invalidate();
        session.positions.clear_selected();
        session.borders.slot_mut(Flavor::Selected).invalidate();
        debug!("Panel closed");
    }

    /// Mount a search box. The returned guard keeps one click-outside listener
    /// attached until it is dropped.
    pub fn mount_search(&self) -> SearchMount<'_> {
        SearchMount::attach(&self.session)
    }

    /// A pointer press outside the search dropdown. Returns whether the
    /// dropdown was dismissed.
    pub fn pointer_down_outside(&self) -> bool {
        self.session().dropdown.dismiss_outside()
    }

    pub fn positions(&self) -> PositionStore {
        self.session().positions
    }

    pub fn panel(&self) -> InfoPanel {
        self.session().panel.value().cloned().into()
    }

    /// Snapshot of everything a renderer needs.
    pub fn view(&self) -> MapView {
        let session = self.session();
        let flavors = [Flavor::Clicked, Flavor::Selected];

        let markers = flavors
            .iter()
            .filter_map(|&flavor| {
                session
                    .positions
                    .get(flavor)
                    .map(|at| Marker { flavor, at })
            })
            .collect();
        let overlays = flavors
            .iter()
            .filter_map(|&flavor| {
                session
                    .borders
                    .slot(flavor)
                    .renderable()
                    .map(|geometry| Overlay {
                        flavor,
                        geometry: geometry.clone(),
                        style: OverlayStyle::default(),
                    })
            })
            .collect();
        let loading = flavors
            .iter()
            .copied()
            .filter(|&flavor| session.borders.slot(flavor).is_loading())
            .collect();

        MapView {
            center: session.center,
            zoom: self.config.initial_zoom,
            tile_layer: self.config.tile_layer.clone(),
            markers,
            overlays,
            loading,
            panel: session.panel.value().cloned().into(),
            candidates: session.dropdown.candidates().to_vec(),
        }
    }

    async fn refresh_border(&self, flavor: Flavor, at: Coordinate) {
        let tag = self.session().borders.slot_mut(flavor).begin();
        debug!(%flavor, tag = tag.get(), "Border fetch issued");

        let outcome = border::fetch_border(&self.source, at).await;

        let mut session = self.session();
        let slot = session.borders.slot_mut(flavor);
        let applied = match outcome {
            Ok(geometry) => slot.complete(tag, Some(geometry)),
            Err(err) => {
                warn!(%flavor, lat = at.lat, lng = at.lng, error = %err, "Border fetch failed");
                slot.fail(tag)
            }
        };
        if !applied {
            debug!(%flavor, tag = tag.get(), "Discarded stale border response");
        }
    }

    /// Resolve the entity at `at` into the panel. Returns whether it opened.
    async fn refresh_entity(&self, at: Coordinate) -> bool {
        let tag = {
            let mut session = self.session();
            session.panel.invalidate();
            session.panel.begin()
        };

        let record = self.resolve_entity(at).await;
        let panel = record.map(|record| OpenPanel::new(at, record));
        let found = panel.is_some();

        let applied = self.session().panel.complete(tag, panel);
        if !applied {
            debug!(tag = tag.get(), "Discarded stale entity response");
        }
        applied && found
    }
}
