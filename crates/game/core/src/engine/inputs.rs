//! Handlers for outside input: dice, route choices, answers, selections.

use tracing::{debug, info};

use crate::board::IntersectionChoice;
use crate::env::RollContext;
use crate::event::GameEvent;
use crate::movement::MoveRequest;
use crate::question::{QuestionResponse, QuestionReward};
use crate::state::{PendingStep, PlayerId, Prompt, QuestionContext, TurnPhase};

use super::{EngineError, GameEngine};

impl<'a> GameEngine<'a> {
    /// Rolls the configured dice with the engine's RNG and submits the sum.
    pub fn roll(&mut self) -> Result<u32, EngineError> {
        self.ensure_roll_expected()?;
        let player = self.state.turn.current_player;
        let config = self.env.config();

        let mut total = 0;
        for _ in 0..config.dice_count.max(1) {
            let seed = self.next_seed(player, RollContext::Dice);
            total += self.env.rng().roll_die(seed, config.dice_sides);
        }
        self.submit_roll(total)?;
        Ok(total)
    }

    /// Accepts a dice sum rolled elsewhere and queues the move.
    pub fn submit_roll(&mut self, roll: u32) -> Result<(), EngineError> {
        self.ensure_roll_expected()?;
        if roll == 0 {
            return Err(EngineError::ZeroRoll);
        }
        let player = self.state.turn.current_player;
        self.emit(GameEvent::DiceRollStarted { player });

        let pause = self.env.config().roll_pause_ticks;
        let turn = &mut self.state.turn;
        turn.prompt = None;
        turn.has_rolled = true;
        turn.last_roll = Some(roll);
        turn.phase = TurnPhase::Rolling;
        turn.pause_ticks = pause;
        turn.selected_player = Some(player);
        turn.pending.push_back(PendingStep::Move {
            player,
            request: MoveRequest::roll(roll),
        });

        info!(target: "trails::engine", %player, roll, "dice rolled");
        self.emit(GameEvent::DiceRollCompleted { player, roll });
        Ok(())
    }

    pub fn submit_intersection_choice(
        &mut self,
        choice: IntersectionChoice,
    ) -> Result<(), EngineError> {
        self.ensure_in_progress()?;
        let (player, destinations) = match &self.state.turn.prompt {
            Some(Prompt::IntersectionChoice {
                player,
                destinations,
                ..
            }) => (*player, destinations.clone()),
            _ => return Err(self.unexpected("intersection_choice")),
        };

        let route = match choice {
            IntersectionChoice::Stay => None,
            IntersectionChoice::Take(index) => Some(destinations.get(index).cloned().ok_or(
                EngineError::UnknownRoute {
                    index,
                    available: destinations.len(),
                },
            )?),
        };

        self.state.turn.prompt = None;
        self.resume_movement(player, route)
    }

    pub fn submit_answer(&mut self, response: QuestionResponse) -> Result<(), EngineError> {
        self.ensure_in_progress()?;
        let player = match &self.state.turn.prompt {
            Some(Prompt::Question { player, .. }) => *player,
            _ => return Err(self.unexpected("question")),
        };
        let context = match self.state.turn.question.clone() {
            Some(context) => context,
            None => QuestionContext {
                player,
                landing: self.player(player)?.landing.clone(),
                retry_used: false,
            },
        };

        let (difficulty, correct) = match response {
            QuestionResponse::Skipped => {
                if !self.player_mut(player)?.abilities.consume_skip_question() {
                    return Err(EngineError::NoSkipCharge(player));
                }
                self.state.turn.prompt = None;
                self.state.turn.question = None;
                debug!(target: "trails::engine", %player, "question skipped");
                self.emit(GameEvent::QuestionSkipped { player });
                return Ok(());
            }
            QuestionResponse::Answered {
                difficulty,
                correct,
            } => (difficulty, correct),
        };

        self.state.turn.prompt = None;
        self.state.turn.question = None;
        self.emit(GameEvent::QuestionAnswered {
            player,
            difficulty,
            correct,
        });

        if !correct && !context.retry_used && self.player_mut(player)?.abilities.consume_retry() {
            self.emit(GameEvent::RetryGranted { player });
            self.ask_question(player, context.landing, true)?;
            return Ok(());
        }

        let config = self.env.config();
        let reward = QuestionReward::for_result(difficulty, correct, config);
        if config.is_final(context.landing.index) {
            if correct {
                self.declare_won(player);
                return Ok(());
            }
            // The token goes back first; the penalty follows the teleport.
            let to = self.player(player)?.previous_landing.clone();
            let pending = &mut self.state.turn.pending;
            pending.push_back(PendingStep::Teleport { player, to });
            pending.push_back(PendingStep::Reward { player, reward });
            return Ok(());
        }

        self.apply_reward(player, reward)
    }

    /// Completes a swap card. `None` lets the engine pick at random.
    pub fn submit_player_choice(&mut self, choice: Option<PlayerId>) -> Result<(), EngineError> {
        self.ensure_in_progress()?;
        let (player, candidates) = match &self.state.turn.prompt {
            Some(Prompt::PlayerSelection { player, candidates }) => (*player, candidates.clone()),
            _ => return Err(self.unexpected("player_selection")),
        };

        let other = match choice {
            Some(id) if candidates.contains(&id) => id,
            Some(id) => return Err(EngineError::InvalidSelection(id)),
            None => {
                let seed = self.next_seed(player, RollContext::SwapFallback);
                let index = self.env.rng().pick(seed, candidates.len());
                let pick = candidates
                    .get(index)
                    .copied()
                    .ok_or(EngineError::InvalidSelection(player))?;
                debug!(target: "trails::engine", %player, other = %pick, "no selection, swapping with random participant");
                pick
            }
        };

        self.state.turn.prompt = None;
        self.swap_positions(player, other)
    }

    fn ensure_roll_expected(&self) -> Result<(), EngineError> {
        self.ensure_in_progress()?;
        let turn = &self.state.turn;
        if turn.phase != TurnPhase::AwaitingRoll || turn.has_rolled {
            return Err(self.unexpected("roll"));
        }
        Ok(())
    }
}
