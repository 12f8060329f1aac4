use std::collections::BTreeMap;

use super::{Board, BoardError, Landing};

/// One outgoing route from an intersection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Destination {
    /// Path the token continues on.
    pub path: String,
    /// Waypoint index the token is placed on when entering `path`.
    pub entry_index: u32,
    /// Whether movement continues toward higher indices.
    pub forward: bool,
}

impl Destination {
    pub fn new(path: impl Into<String>, entry_index: u32, forward: bool) -> Self {
        Self {
            path: path.into(),
            entry_index,
            forward,
        }
    }

    pub fn entry(&self) -> Landing {
        Landing::new(self.path.clone(), self.entry_index)
    }
}

/// Answer to an intersection prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntersectionChoice {
    /// Keep the current path and continue forward.
    Stay,
    /// Take the destination at this position of the offered list.
    Take(usize),
}

/// Maps an intersection reached on a given path to its outgoing routes.
///
/// The key is the landing of the intersection waypoint itself, which also
/// identifies the path the token arrived from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntersectionTable {
    routes: BTreeMap<Landing, Vec<Destination>>,
}

impl IntersectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a route leaving `at`.
    pub fn add_route(&mut self, at: Landing, destination: Destination) {
        self.routes.entry(at).or_default().push(destination);
    }

    /// Destinations offered when a token stops at `at`.
    ///
    /// Returns an empty slice for unmapped intersections, which callers
    /// treat as "no change".
    pub fn available_destinations(&self, at: &Landing) -> &[Destination] {
        self.routes.get(at).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Landing, &[Destination])> {
        self.routes.iter().map(|(at, routes)| (at, routes.as_slice()))
    }

    /// Checks every route against the board.
    ///
    /// Keys must name intersection waypoints and every destination must
    /// point at an existing waypoint.
    pub fn validate(&self, board: &Board) -> Result<(), BoardError> {
        for (at, destinations) in &self.routes {
            let waypoint = board.waypoint(at)?;
            if !waypoint.is_intersection() {
                return Err(BoardError::NotAnIntersection(at.clone()));
            }
            for destination in destinations {
                let target = destination.entry();
                if board.waypoint(&target).is_err() {
                    return Err(BoardError::DanglingDestination {
                        at: at.clone(),
                        target,
                    });
                }
            }
        }
        Ok(())
    }
}
