//! Clicked and selected positions for the current session.

use std::fmt;

use map_explorer_sources::Coordinate;

/// Which of the two independently tracked positions a marker or overlay belongs to.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    /// Last point the user clicked on the map (also seeded from the IP lookup)
    Clicked,
    /// Last place picked from the search results
    Selected,
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clicked => f.write_str("clicked"),
            Self::Selected => f.write_str("selected"),
        }
    }
}

/// Holds both positions. Setting or clearing one never touches the other.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionStore {
    clicked: Option<Coordinate>,
    selected: Option<Coordinate>,
}

impl PositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clicked(&self) -> Option<Coordinate> {
        self.clicked
    }

    pub fn selected(&self) -> Option<Coordinate> {
        self.selected
    }

    pub fn get(&self, flavor: Flavor) -> Option<Coordinate> {
        match flavor {
            Flavor::Clicked => self.clicked,
            Flavor::Selected => self.selected,
        }
    }

    pub fn set_clicked(&mut self, at: Coordinate) {
        self.clicked = Some(at);
    }

    pub fn set_selected(&mut self, at: Coordinate) {
        self.selected = Some(at);
    }

    pub fn clear_clicked(&mut self) {
        self.clicked = None;
    }

    pub fn clear_selected(&mut self) {
        self.selected = None;
    }
}
