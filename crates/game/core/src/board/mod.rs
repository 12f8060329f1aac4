//! Static board topology: named paths of waypoints and the routes between them.
//!
//! The board is built once during setup and only read afterwards. Lookups
//! never panic; out-of-range queries return `None` or a [`BoardError`].
mod error;
mod intersection;
mod waypoint;

use std::collections::BTreeMap;
use std::fmt;

pub use error::BoardError;
pub use intersection::{Destination, IntersectionChoice, IntersectionTable};
pub use waypoint::{Region, TileKind, Waypoint};

/// A position on the board: path name plus waypoint index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Landing {
    pub path: String,
    pub index: u32,
}

impl Landing {
    pub fn new(path: impl Into<String>, index: u32) -> Self {
        Self {
            path: path.into(),
            index,
        }
    }

    /// Index 0 of the same path.
    pub fn path_start(&self) -> Self {
        Self::new(self.path.clone(), 0)
    }
}

impl fmt::Display for Landing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.path, self.index)
    }
}

/// Ordered collection of named paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    paths: BTreeMap<String, Vec<Waypoint>>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a path. Waypoints are indexed in iteration order.
    pub fn insert_path<I>(&mut self, name: impl Into<String>, tiles: I) -> Result<(), BoardError>
    where
        I: IntoIterator<Item = (TileKind, Region)>,
    {
        let name = name.into();
        if self.paths.contains_key(&name) {
            return Err(BoardError::DuplicatePath(name));
        }
        let waypoints: Vec<Waypoint> = tiles
            .into_iter()
            .enumerate()
            .map(|(index, (kind, region))| Waypoint::new(index as u32, kind, region))
            .collect();
        if waypoints.is_empty() {
            return Err(BoardError::EmptyPath(name));
        }
        self.paths.insert(name, waypoints);
        Ok(())
    }

    pub fn path_exists(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    /// Number of waypoints on `path`.
    pub fn path_len(&self, path: &str) -> Option<u32> {
        self.paths.get(path).map(|waypoints| waypoints.len() as u32)
    }

    pub fn get_waypoint(&self, path: &str, index: u32) -> Option<&Waypoint> {
        self.paths.get(path)?.get(index as usize)
    }

    /// Position of `waypoint` on `path`, or `None` when it is not part of it.
    pub fn waypoint_index_of(&self, path: &str, waypoint: &Waypoint) -> Option<u32> {
        self.paths
            .get(path)?
            .iter()
            .position(|candidate| candidate == waypoint)
            .map(|index| index as u32)
    }

    /// Checked lookup used where a missing waypoint must be reported.
    pub fn waypoint(&self, landing: &Landing) -> Result<&Waypoint, BoardError> {
        let waypoints = self
            .paths
            .get(&landing.path)
            .ok_or_else(|| BoardError::UnknownPath(landing.path.clone()))?;
        waypoints
            .get(landing.index as usize)
            .ok_or_else(|| BoardError::IndexOutOfRange {
                path: landing.path.clone(),
                index: landing.index,
                len: waypoints.len() as u32,
            })
    }

    pub fn paths(&self) -> impl Iterator<Item = (&str, &[Waypoint])> {
        self.paths
            .iter()
            .map(|(name, waypoints)| (name.as_str(), waypoints.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Board {
        let mut board = Board::new();
        board
            .insert_path(
                "main",
                [
                    (TileKind::Question, Region::Volcano),
                    (TileKind::Card, Region::Volcano),
                    (TileKind::Intersection, Region::Volcano),
                ],
            )
            .unwrap();
        board
    }

    #[test]
    fn lookups_outside_the_board_are_absent() {
        let board = sample();
        assert!(board.get_waypoint("main", 3).is_none());
        assert!(board.get_waypoint("missing", 0).is_none());
        assert!(!board.path_exists("missing"));
        assert_eq!(
            board.waypoint(&Landing::new("main", 7)),
            Err(BoardError::IndexOutOfRange {
                path: "main".into(),
                index: 7,
                len: 3
            })
        );
    }

    #[test]
    fn waypoint_index_of_reports_absence() {
        let board = sample();
        let card = *board.get_waypoint("main", 1).unwrap();
        assert_eq!(board.waypoint_index_of("main", &card), Some(1));
        assert_eq!(board.waypoint_index_of("other", &card), None);

        let stranger = Waypoint::new(1, TileKind::Question, Region::Reef);
        assert_eq!(board.waypoint_index_of("main", &stranger), None);
    }

    #[test]
    fn intersections_drop_their_region() {
        let board = sample();
        let junction = board.get_waypoint("main", 2).unwrap();
        assert!(junction.is_intersection());
        assert_eq!(junction.region, Region::None);
    }

    #[test]
    fn duplicate_and_empty_paths_are_rejected() {
        let mut board = sample();
        assert_eq!(
            board.insert_path("main", [(TileKind::Card, Region::None)]),
            Err(BoardError::DuplicatePath("main".into()))
        );
        assert_eq!(
            board.insert_path("void", std::iter::empty()),
            Err(BoardError::EmptyPath("void".into()))
        );
    }
}
