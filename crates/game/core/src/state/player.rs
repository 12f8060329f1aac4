use std::fmt;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::board::Landing;

use super::Abilities;

/// Seat number of a participant. Seats are assigned in join order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const fn seat(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Element a participant plays as. Determines their variant ability.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
}

impl Element {
    /// Default element for a seat: seats cycle through fire, water, earth, air.
    pub const fn for_seat(seat: usize) -> Self {
        match seat % 4 {
            0 => Self::Fire,
            1 => Self::Water,
            2 => Self::Earth,
            _ => Self::Air,
        }
    }
}

/// Movement direction along a path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub const fn from_forward(forward: bool) -> Self {
        if forward {
            Self::Forward
        } else {
            Self::Backward
        }
    }

    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// Index delta of one step.
    pub const fn delta(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Reference to the persistent profile a participant is playing with.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileRef {
    pub id: String,
    pub display_name: String,
    /// Skill rating handed to the question generator.
    pub rating: i32,
}

impl ProfileRef {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, rating: i32) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            rating,
        }
    }

    /// Placeholder profile for seats without a stored one.
    pub fn guest(id: PlayerId) -> Self {
        Self::new(format!("guest-{}", id.0), format!("Player {}", id.0 + 1), 0)
    }
}

/// Per-participant match state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub id: PlayerId,
    pub element: Element,
    pub profile: ProfileRef,

    /// Current path and waypoint index.
    pub landing: Landing,
    /// Landing at the start of the most recent dice move.
    pub previous_landing: Landing,
    pub direction: Direction,

    pub lives: u32,
    /// Cap for life gains, equal to the starting lives.
    pub max_lives: u32,
    /// Upcoming turns this participant forfeits.
    pub skip_turns: u32,

    pub abilities: Abilities,
}

impl PlayerState {
    pub fn new(
        id: PlayerId,
        element: Element,
        profile: ProfileRef,
        start: Landing,
        lives: u32,
    ) -> Self {
        Self {
            id,
            element,
            profile,
            previous_landing: start.clone(),
            landing: start,
            direction: Direction::Forward,
            lives,
            max_lives: lives,
            skip_turns: 0,
            abilities: Abilities::none(),
        }
    }

    pub fn with_abilities(mut self, abilities: Abilities) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn is_at(&self, landing: &Landing) -> bool {
        &self.landing == landing
    }

    pub fn is_eliminated(&self) -> bool {
        self.lives == 0
    }
}
