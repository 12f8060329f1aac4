/// Tunable rules of a match.
///
/// Every magic number of the board game lives here so content files can
/// override it (`config.toml`, partial tables are filled from [`Default`]).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Waypoint index at or beyond which a landing is the final waypoint.
    pub final_index: u32,

    /// Starting lives in two-participant mode.
    pub two_player_lives: u32,
    /// Starting lives with three or four participants.
    pub default_lives: u32,

    /// Number of dice summed per roll.
    pub dice_count: u32,
    /// Faces per die.
    pub dice_sides: u32,

    /// Ticks a token needs to travel from one waypoint to the next.
    pub ticks_per_step: u32,
    /// Pause between the dice result and the start of movement.
    pub roll_pause_ticks: u32,
    /// Pause after effect resolution before the turn passes on.
    pub turn_end_pause_ticks: u32,

    /// Steps added back when a backward move is clamped at index 0.
    pub negative_index_compensation: u32,

    /// Region speed bonus expressed as a fraction (4/3 by default).
    pub region_speed_numerator: u32,
    pub region_speed_denominator: u32,

    /// Steps granted by a correct easy answer.
    pub easy_reward_steps: u32,
    /// Steps of the forced-move card.
    pub forced_move_steps: u32,
    /// Steps of the move-back card ("Cursed Steps").
    pub move_back_steps: u32,
    /// Steps every player moves with the move-all card.
    pub move_all_steps: u32,

    /// `AdvancingTurn` gives up after `skip_attempt_factor * players` probes.
    pub skip_attempt_factor: u32,
}

impl GameConfig {
    /// Maximum number of participant slots on a board.
    pub const MAX_PLAYERS: usize = 4;

    pub const DEFAULT_FINAL_INDEX: u32 = 50;
    pub const DEFAULT_TICKS_PER_STEP: u32 = 3;

    pub fn new() -> Self {
        Self {
            final_index: Self::DEFAULT_FINAL_INDEX,
            two_player_lives: 4,
            default_lives: 3,
            dice_count: 2,
            dice_sides: 6,
            ticks_per_step: Self::DEFAULT_TICKS_PER_STEP,
            roll_pause_ticks: 2,
            turn_end_pause_ticks: 1,
            negative_index_compensation: 1,
            region_speed_numerator: 4,
            region_speed_denominator: 3,
            easy_reward_steps: 2,
            forced_move_steps: 25,
            move_back_steps: 6,
            move_all_steps: 3,
            skip_attempt_factor: 2,
        }
    }

    /// Config without pacing delays, one tick per waypoint hop.
    ///
    /// Used by tests and headless simulations.
    pub fn instant() -> Self {
        Self {
            ticks_per_step: 1,
            roll_pause_ticks: 0,
            turn_end_pause_ticks: 0,
            ..Self::new()
        }
    }

    /// Starting lives for a roster of `players` participants.
    pub fn starting_lives(&self, players: usize) -> u32 {
        if players <= 2 {
            self.two_player_lives
        } else {
            self.default_lives
        }
    }

    /// Whether `index` is at or past the final waypoint threshold.
    pub fn is_final(&self, index: u32) -> bool {
        index >= self.final_index
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lives_depend_on_roster_size() {
        let config = GameConfig::default();
        assert_eq!(config.starting_lives(2), 4);
        assert_eq!(config.starting_lives(3), 3);
        assert_eq!(config.starting_lives(4), 3);
    }

    #[test]
    fn final_threshold_is_inclusive() {
        let config = GameConfig::default();
        assert!(!config.is_final(49));
        assert!(config.is_final(50));
        assert!(config.is_final(57));
    }
}
