//! Per-participant token movement.
//!
//! A [`MovementController`] walks one token a waypoint at a time. It is
//! driven by the engine tick and suspends at intersections until a route is
//! chosen. Controllers never touch tiles; the engine dispatches the landing
//! once the controller reports [`StepOutcome::Finished`].

use tracing::{debug, warn};

use crate::board::{Board, BoardError, Destination, Landing, Waypoint};
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Direction, PlayerState};

/// A request to move a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRequest {
    pub steps: u32,
    /// One-off direction for this move. `None` uses the participant's own.
    pub direction: Option<Direction>,
    /// Caused by a card or reward rather than a dice roll.
    pub effect: bool,
}

impl MoveRequest {
    pub const fn roll(steps: u32) -> Self {
        Self {
            steps,
            direction: None,
            effect: false,
        }
    }

    pub const fn effect(steps: u32, direction: Option<Direction>) -> Self {
        Self {
            steps,
            direction,
            effect: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementState {
    #[default]
    Idle,
    Stepping {
        remaining: u32,
        direction: Direction,
        /// Ticks spent travelling toward the next waypoint.
        progress: u32,
    },
    AtIntersection {
        remaining: u32,
        direction: Direction,
        at: Landing,
    },
    /// Move complete, waiting for the engine to collect the landing.
    Finished { landing: Landing },
}

/// What a single controller tick produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing to do.
    Idle,
    /// Blocked on an intersection choice.
    Waiting,
    /// Token is between waypoints.
    Advancing,
    /// Token reached a waypoint and keeps going.
    Reached(Landing),
    /// Token stopped on an intersection and needs a route.
    Intersection { at: Landing, remaining: u32 },
    /// Token came to rest.
    Finished(Landing),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MovementError {
    #[error("token is already moving")]
    AlreadyMoving,

    #[error("a move needs at least one step")]
    ZeroSteps,

    #[error("token is not waiting at an intersection")]
    NotAtIntersection,

    #[error(transparent)]
    Board(#[from] BoardError),
}

impl GameError for MovementError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AlreadyMoving | Self::NotAtIntersection => ErrorSeverity::Validation,
            Self::ZeroSteps => ErrorSeverity::Recoverable,
            Self::Board(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyMoving => "MOVEMENT_ALREADY_MOVING",
            Self::ZeroSteps => "MOVEMENT_ZERO_STEPS",
            Self::NotAtIntersection => "MOVEMENT_NOT_AT_INTERSECTION",
            Self::Board(err) => err.error_code(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementController {
    state: MovementState,
    effect: bool,
}

impl MovementController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(
            self.state,
            MovementState::Stepping { .. } | MovementState::AtIntersection { .. }
        )
    }

    /// Whether the current or last move was caused by an effect.
    pub fn is_effect(&self) -> bool {
        self.effect
    }

    /// Starts a move and returns the step budget after ability adjustments.
    ///
    /// Dice moves get the participant's region bonus; effect moves do not.
    pub fn begin(
        &mut self,
        player: &mut PlayerState,
        board: &Board,
        request: MoveRequest,
    ) -> Result<u32, MovementError> {
        if self.is_in_flight() {
            return Err(MovementError::AlreadyMoving);
        }
        if request.steps == 0 {
            return Err(MovementError::ZeroSteps);
        }
        let waypoint = board.waypoint(&player.landing)?;

        let steps = if request.effect {
            request.steps
        } else {
            player.abilities.adjust_steps(request.steps, waypoint.region)
        };
        self.effect = request.effect;
        self.state = MovementState::Stepping {
            remaining: steps,
            direction: request.direction.unwrap_or(player.direction),
            progress: 0,
        };
        Ok(steps)
    }

    /// Advances the token by one tick.
    pub fn tick(
        &mut self,
        player: &mut PlayerState,
        board: &Board,
        config: &GameConfig,
    ) -> StepOutcome {
        let (mut remaining, mut direction, progress) = match &self.state {
            MovementState::Stepping {
                remaining,
                direction,
                progress,
            } => (*remaining, *direction, *progress),
            MovementState::AtIntersection { .. } => return StepOutcome::Waiting,
            MovementState::Idle | MovementState::Finished { .. } => return StepOutcome::Idle,
        };

        let progress = progress + 1;
        if progress < config.ticks_per_step.max(1) {
            self.state = MovementState::Stepping {
                remaining,
                direction,
                progress,
            };
            return StepOutcome::Advancing;
        }

        let Some(len) = board.path_len(&player.landing.path) else {
            warn!(
                target: "core::movement",
                player = %player.id,
                landing = %player.landing,
                "token is on an unknown path, stopping"
            );
            return self.finish(player);
        };

        let next = i64::from(player.landing.index) + direction.delta();
        if next < 0 {
            // Clamped hop still costs a step; compensation gives it back.
            direction = Direction::Forward;
            player.direction = Direction::Forward;
            player.landing.index = 0;
            remaining = remaining.saturating_sub(1) + config.negative_index_compensation;
            debug!(
                target: "core::movement",
                player = %player.id,
                remaining,
                "clamped at path start, now moving forward"
            );
        } else if next >= i64::from(len) {
            warn!(
                target: "core::movement",
                player = %player.id,
                landing = %player.landing,
                remaining,
                "end of path without an intersection, stopping"
            );
            return self.finish(player);
        } else {
            player.landing.index = next as u32;
            remaining -= 1;
        }

        let landing = player.landing.clone();
        let on_intersection = board
            .get_waypoint(&landing.path, landing.index)
            .is_some_and(Waypoint::is_intersection);
        if on_intersection {
            self.state = MovementState::AtIntersection {
                remaining,
                direction,
                at: landing.clone(),
            };
            return StepOutcome::Intersection {
                at: landing,
                remaining,
            };
        }

        if remaining == 0 {
            return self.finish(player);
        }
        self.state = MovementState::Stepping {
            remaining,
            direction,
            progress: 0,
        };
        StepOutcome::Reached(landing)
    }

    /// Continues a move suspended at an intersection.
    ///
    /// `None` keeps the current path and continues forward. A destination
    /// that does not exist on the board is treated the same way.
    pub fn resume(
        &mut self,
        player: &mut PlayerState,
        board: &Board,
        choice: Option<&Destination>,
    ) -> Result<StepOutcome, MovementError> {
        let remaining = match &self.state {
            MovementState::AtIntersection { remaining, .. } => *remaining,
            _ => return Err(MovementError::NotAtIntersection),
        };

        let direction = match choice {
            Some(destination)
                if board
                    .get_waypoint(&destination.path, destination.entry_index)
                    .is_some() =>
            {
                player.landing = destination.entry();
                Direction::from_forward(destination.forward)
            }
            Some(destination) => {
                warn!(
                    target: "core::movement",
                    player = %player.id,
                    path = %destination.path,
                    entry = destination.entry_index,
                    "route leads nowhere, staying on current path"
                );
                Direction::Forward
            }
            None => Direction::Forward,
        };
        player.direction = direction;

        if remaining == 0 {
            return Ok(self.finish(player));
        }
        self.state = MovementState::Stepping {
            remaining,
            direction,
            progress: 0,
        };
        Ok(StepOutcome::Advancing)
    }

    /// Collects the landing of a finished move and returns to idle.
    pub fn take_finished(&mut self) -> Option<Landing> {
        match std::mem::take(&mut self.state) {
            MovementState::Finished { landing } => Some(landing),
            other => {
                self.state = other;
                None
            }
        }
    }

    fn finish(&mut self, player: &PlayerState) -> StepOutcome {
        let landing = player.landing.clone();
        self.state = MovementState::Finished {
            landing: landing.clone(),
        };
        StepOutcome::Finished(landing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Region, TileKind};
    use crate::state::{Abilities, Element, PlayerId, ProfileRef};

    fn board() -> Board {
        let mut board = Board::new();
        let mut main = vec![(TileKind::Question, Region::Volcano); 12];
        main[3] = (TileKind::Intersection, Region::None);
        board.insert_path("main", main).unwrap();
        board
            .insert_path("branch", [(TileKind::Card, Region::Reef); 6])
            .unwrap();
        board
    }

    fn player_at(index: u32) -> PlayerState {
        PlayerState::new(
            PlayerId(0),
            Element::Water,
            ProfileRef::guest(PlayerId(0)),
            Landing::new("main", index),
            3,
        )
    }

    fn run(
        mover: &mut MovementController,
        player: &mut PlayerState,
        board: &Board,
    ) -> StepOutcome {
        let config = GameConfig::instant();
        loop {
            match mover.tick(player, board, &config) {
                StepOutcome::Advancing | StepOutcome::Reached(_) => continue,
                other => return other,
            }
        }
    }

    #[test]
    fn walks_forward_and_finishes() {
        let board = board();
        let mut player = player_at(4);
        let mut mover = MovementController::new();
        assert_eq!(mover.begin(&mut player, &board, MoveRequest::roll(5)), Ok(5));

        assert_eq!(
            run(&mut mover, &mut player, &board),
            StepOutcome::Finished(Landing::new("main", 9))
        );
        assert_eq!(mover.take_finished(), Some(Landing::new("main", 9)));
        assert!(!mover.is_in_flight());
    }

    #[test]
    fn rejects_zero_steps_and_double_starts() {
        let board = board();
        let mut player = player_at(0);
        let mut mover = MovementController::new();
        assert_eq!(
            mover.begin(&mut player, &board, MoveRequest::roll(0)),
            Err(MovementError::ZeroSteps)
        );
        mover.begin(&mut player, &board, MoveRequest::roll(2)).unwrap();
        assert_eq!(
            mover.begin(&mut player, &board, MoveRequest::roll(2)),
            Err(MovementError::AlreadyMoving)
        );
    }

    #[test]
    fn honours_ticks_per_step() {
        let board = board();
        let mut player = player_at(4);
        let mut mover = MovementController::new();
        let config = GameConfig {
            ticks_per_step: 3,
            ..GameConfig::instant()
        };
        mover.begin(&mut player, &board, MoveRequest::roll(1)).unwrap();
        assert_eq!(mover.tick(&mut player, &board, &config), StepOutcome::Advancing);
        assert_eq!(mover.tick(&mut player, &board, &config), StepOutcome::Advancing);
        assert_eq!(
            mover.tick(&mut player, &board, &config),
            StepOutcome::Finished(Landing::new("main", 5))
        );
    }

    #[test]
    fn backward_move_clamps_at_start_and_turns_around() {
        let board = board();
        let mut player = player_at(2);
        let mut mover = MovementController::new();
        mover
            .begin(
                &mut player,
                &board,
                MoveRequest::effect(6, Some(Direction::Backward)),
            )
            .unwrap();

        let outcome = run(&mut mover, &mut player, &board);
        // 2 -> 1 -> 0, clamp (compensated), then forward 0 -> 1 -> 2 -> 3 hits the junction.
        assert_eq!(
            outcome,
            StepOutcome::Intersection {
                at: Landing::new("main", 3),
                remaining: 1
            }
        );
        assert_eq!(player.direction, Direction::Forward);
    }

    #[test]
    fn stops_at_end_of_path() {
        let board = board();
        let mut player = PlayerState {
            landing: Landing::new("branch", 3),
            ..player_at(0)
        };
        let mut mover = MovementController::new();
        mover.begin(&mut player, &board, MoveRequest::roll(6)).unwrap();
        assert_eq!(
            run(&mut mover, &mut player, &board),
            StepOutcome::Finished(Landing::new("branch", 5))
        );
    }

    #[test]
    fn intersection_suspends_until_a_route_is_chosen() {
        let board = board();
        let mut player = player_at(0);
        let mut mover = MovementController::new();
        mover.begin(&mut player, &board, MoveRequest::roll(5)).unwrap();

        assert_eq!(
            run(&mut mover, &mut player, &board),
            StepOutcome::Intersection {
                at: Landing::new("main", 3),
                remaining: 2
            }
        );
        assert_eq!(
            mover.tick(&mut player, &board, &GameConfig::instant()),
            StepOutcome::Waiting
        );

        let route = Destination::new("branch", 0, true);
        mover.resume(&mut player, &board, Some(&route)).unwrap();
        assert_eq!(
            run(&mut mover, &mut player, &board),
            StepOutcome::Finished(Landing::new("branch", 2))
        );
    }

    #[test]
    fn staying_continues_forward_on_the_same_path() {
        let board = board();
        let mut player = player_at(0);
        player.direction = Direction::Backward;
        let mut mover = MovementController::new();
        mover
            .begin(
                &mut player,
                &board,
                MoveRequest::effect(4, Some(Direction::Forward)),
            )
            .unwrap();
        run(&mut mover, &mut player, &board);

        mover.resume(&mut player, &board, None).unwrap();
        assert_eq!(
            run(&mut mover, &mut player, &board),
            StepOutcome::Finished(Landing::new("main", 4))
        );
        assert_eq!(player.direction, Direction::Forward);
    }

    #[test]
    fn region_bonus_applies_to_dice_moves_only() {
        let board = board();
        let config = GameConfig::default();
        let mut player = player_at(4)
            .with_abilities(Abilities::for_element(Element::Fire, &config));
        let mut mover = MovementController::new();
        assert_eq!(mover.begin(&mut player, &board, MoveRequest::roll(3)), Ok(4));
        run(&mut mover, &mut player, &board);
        mover.take_finished();

        assert_eq!(
            mover.begin(&mut player, &board, MoveRequest::effect(3, None)),
            Ok(3)
        );
    }
}
