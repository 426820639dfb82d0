//! Place search and the results dropdown.

use std::{collections::BTreeSet, sync::Mutex};

use map_explorer_sources::{GeoSource, PlaceCandidate, nominatim::into_candidates};
use tracing::{debug, instrument};

use crate::{core::Session, error::Result};

/// Query the geocoder. `None` is sent as an empty query, unvalidated.
#[instrument(name = "Search places", skip(source), level = "debug")]
pub(crate) async fn search_places<S: GeoSource>(
    source: &S,
    query: Option<&str>,
) -> Result<Vec<PlaceCandidate>> {
    let places = source.search_places(query.unwrap_or_default()).await?;
    let candidates = into_candidates(places);
    debug!(count = candidates.len(), "Search complete");
    Ok(candidates)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Candidates of the latest search, plus the click-outside listeners that may
/// dismiss them.
#[derive(Debug, Clone, Default)]
pub struct SearchDropdown {
    candidates: Vec<PlaceCandidate>,
    listeners: BTreeSet<ListenerId>,
    next_listener: u64,
}

impl SearchDropdown {
    pub fn candidates(&self) -> &[PlaceCandidate] {
        &self.candidates
    }

    pub fn get(&self, index: usize) -> Option<&PlaceCandidate> {
        self.candidates.get(index)
    }

    pub fn is_open(&self) -> bool {
        !self.candidates.is_empty()
    }

    pub fn show(&mut self, candidates: Vec<PlaceCandidate>) {
        self.candidates = candidates;
    }

    pub fn clear(&mut self) {
        self.candidates.clear();
    }

    pub fn attach_dismiss(&mut self) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.insert(id);
        id
    }

    pub fn detach_dismiss(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// A pointer press outside the dropdown. Only dismisses while a listener is
    /// attached; returns whether anything was cleared.
    pub fn dismiss_outside(&mut self) -> bool {
        if self.listeners.is_empty() || !self.is_open() {
            return false;
        }
        self.clear();
        true
    }
}

/// A mounted search box. Holds one click-outside listener for as long as it lives.
#[must_use = "the dismiss listener is detached as soon as the mount is dropped"]
#[derive(Debug)]
pub struct SearchMount<'a> {
    session: &'a Mutex<Session>,
    listener: ListenerId,
}

impl<'a> SearchMount<'a> {
    pub(crate) fn attach(session: &'a Mutex<Session>) -> Self {
        let listener = Session::lock(session).dropdown.attach_dismiss();
        debug!(?listener, "Search mounted");
        Self { session, listener }
    }

    pub fn listener(&self) -> ListenerId {
        self.listener
    }
}

impl Drop for SearchMount<'_> {
    fn drop(&mut self) {
        Session::lock(self.session)
            .dropdown
            .detach_dismiss(self.listener);
        debug!(listener = ?self.listener, "Search unmounted");
    }
}
