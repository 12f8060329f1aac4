use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// What happens when a token comes to rest on a waypoint.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TileKind {
    /// Asks the occupant a question.
    Question,
    /// Draws a random card for the occupant.
    Card,
    /// Junction between paths. Carries no tile effect.
    Intersection,
}

impl TileKind {
    /// Compact single-character encoding used by board layout strings.
    pub const fn glyph(self) -> char {
        match self {
            Self::Question => 'Q',
            Self::Card => 'C',
            Self::Intersection => 'X',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph.to_ascii_uppercase() {
            'Q' => Some(Self::Question),
            'C' => Some(Self::Card),
            'X' => Some(Self::Intersection),
            _ => None,
        }
    }
}

/// Thematic zone a waypoint belongs to. Drives element speed bonuses.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Region {
    Volcano,
    Reef,
    Grove,
    Peaks,
    #[default]
    None,
}

/// A single position on a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub index: u32,
    pub kind: TileKind,
    pub region: Region,
}

impl Waypoint {
    /// Creates a waypoint. Intersections never belong to a region.
    pub fn new(index: u32, kind: TileKind, region: Region) -> Self {
        let region = if kind == TileKind::Intersection {
            Region::None
        } else {
            region
        };
        Self {
            index,
            kind,
            region,
        }
    }

    pub fn is_intersection(&self) -> bool {
        self.kind == TileKind::Intersection
    }
}
