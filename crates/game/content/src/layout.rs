//! Declarative board layouts.
//!
//! A layout describes each path as a compact glyph string plus region
//! bands, and lists the routes leaving each intersection. [`BoardLayout::build`]
//! turns it into the core [`Board`] and [`IntersectionTable`].

use trails_core::{Board, BoardError, Destination, IntersectionTable, Landing, Region, TileKind};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardLayout {
    pub paths: Vec<PathLayout>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub routes: Vec<RouteLayout>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathLayout {
    pub name: String,
    /// One glyph per waypoint: `Q`, `C` or `X`.
    pub layout: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub regions: Vec<RegionBand>,
}

/// Inclusive index range sharing a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionBand {
    pub from: u32,
    pub to: u32,
    pub region: Region,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteLayout {
    /// Intersection waypoint as `(path, index)`.
    pub at: (String, u32),
    /// Entry waypoint on the destination path.
    pub to: (String, u32),
    pub forward: bool,
}

/// Board topology ready to hand to the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSetup {
    pub board: Board,
    pub intersections: IntersectionTable,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("path `{path}` has unknown glyph `{glyph}` at index {index}")]
    UnknownGlyph {
        path: String,
        index: usize,
        glyph: char,
    },

    #[error("region band {from}..={to} does not fit path `{path}` (len {len})")]
    BandOutOfRange {
        path: String,
        from: u32,
        to: u32,
        len: u32,
    },

    #[error(transparent)]
    Board(#[from] BoardError),
}

impl BoardLayout {
    pub fn build(&self) -> Result<BoardSetup, LayoutError> {
        let mut board = Board::new();
        for path in &self.paths {
            board.insert_path(path.name.clone(), path.tiles()?)?;
        }

        let mut intersections = IntersectionTable::new();
        for route in &self.routes {
            let (at_path, at_index) = &route.at;
            let (to_path, entry) = &route.to;
            intersections.add_route(
                Landing::new(at_path.clone(), *at_index),
                Destination::new(to_path.clone(), *entry, route.forward),
            );
        }
        intersections.validate(&board)?;

        Ok(BoardSetup {
            board,
            intersections,
        })
    }
}

impl PathLayout {
    fn tiles(&self) -> Result<Vec<(TileKind, Region)>, LayoutError> {
        let mut tiles = self
            .layout
            .chars()
            .filter(|glyph| !glyph.is_whitespace())
            .enumerate()
            .map(|(index, glyph)| {
                TileKind::from_glyph(glyph)
                    .map(|kind| (kind, Region::None))
                    .ok_or_else(|| LayoutError::UnknownGlyph {
                        path: self.name.clone(),
                        index,
                        glyph,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let len = tiles.len() as u32;
        for band in &self.regions {
            if band.from > band.to || band.to >= len {
                return Err(LayoutError::BandOutOfRange {
                    path: self.name.clone(),
                    from: band.from,
                    to: band.to,
                    len,
                });
            }
            for tile in &mut tiles[band.from as usize..=band.to as usize] {
                tile.1 = band.region;
            }
        }
        Ok(tiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> BoardLayout {
        BoardLayout {
            paths: vec![
                PathLayout {
                    name: "main".into(),
                    layout: "QQXCQ".into(),
                    regions: vec![RegionBand {
                        from: 0,
                        to: 4,
                        region: Region::Volcano,
                    }],
                },
                PathLayout {
                    name: "side".into(),
                    layout: "CCC".into(),
                    regions: Vec::new(),
                },
            ],
            routes: vec![RouteLayout {
                at: ("main".into(), 2),
                to: ("side".into(), 0),
                forward: true,
            }],
        }
    }

    #[test]
    fn builds_paths_regions_and_routes() {
        let setup = layout().build().unwrap();
        let junction = setup.board.get_waypoint("main", 2).unwrap();
        assert_eq!(junction.kind, TileKind::Intersection);
        assert_eq!(junction.region, Region::None);
        assert_eq!(
            setup.board.get_waypoint("main", 4).unwrap().region,
            Region::Volcano
        );
        assert_eq!(
            setup
                .intersections
                .available_destinations(&Landing::new("main", 2)),
            &[Destination::new("side", 0, true)]
        );
    }

    #[test]
    fn rejects_unknown_glyphs_and_bad_bands() {
        let mut bad_glyph = layout();
        bad_glyph.paths[1].layout = "CZC".into();
        assert_eq!(
            bad_glyph.build(),
            Err(LayoutError::UnknownGlyph {
                path: "side".into(),
                index: 1,
                glyph: 'Z'
            })
        );

        let mut bad_band = layout();
        bad_band.paths[0].regions[0].to = 9;
        assert!(matches!(
            bad_band.build(),
            Err(LayoutError::BandOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_routes_from_plain_tiles() {
        let mut layout = layout();
        layout.routes[0].at.1 = 1;
        assert!(matches!(
            layout.build(),
            Err(LayoutError::Board(BoardError::NotAnIntersection(_)))
        ));
    }
}
