//! Tile effects: questions, cards, rewards, and life bookkeeping.

use tracing::{debug, info, warn};

use crate::board::Landing;
use crate::card::CardKind;
use crate::env::RollContext;
use crate::event::{GameEvent, ShieldSource};
use crate::movement::MoveRequest;
use crate::question::QuestionReward;
use crate::state::{ActiveTile, MatchOutcome, PendingStep, PlayerId, Prompt, QuestionContext};
use crate::tile::{self, Dispatch, SkipReason, TileAction};

use super::{EngineError, GameEngine};

impl<'a> GameEngine<'a> {
    /// Runs the tile dispatcher for a token that came to rest on `landing`.
    pub(super) fn dispatch_arrival(
        &mut self,
        landing: Landing,
        effect: bool,
    ) -> Result<(), EngineError> {
        let decision = tile::decide(
            &*self.state,
            self.env.board(),
            self.env.config(),
            &landing,
            effect,
        );
        match decision {
            Dispatch::Fire { occupant, action } => {
                self.state.turn.active_tile = Some(ActiveTile {
                    player: occupant,
                    landing: landing.clone(),
                });
                match action {
                    TileAction::AskQuestion => self.ask_question(occupant, landing, false),
                    TileAction::DrawCard => self.draw_card(occupant),
                }
            }
            Dispatch::Skip { occupant, reason } => {
                if reason == SkipReason::NoOccupant {
                    warn!(target: "trails::engine", %landing, "no participant to resolve tile for");
                } else {
                    debug!(target: "trails::engine", %landing, %reason, "tile effect skipped");
                }
                self.emit(GameEvent::TileEffectSkipped {
                    landing,
                    occupant,
                    reason,
                });
                Ok(())
            }
        }
    }

    pub(super) fn ask_question(
        &mut self,
        player: PlayerId,
        landing: Landing,
        retry: bool,
    ) -> Result<(), EngineError> {
        let state = self.player(player)?;
        let rating = state.profile.rating;
        let can_skip = state.abilities.can_skip_question();

        let turn = &mut self.state.turn;
        turn.question_player = Some(player);
        turn.question = Some(QuestionContext {
            player,
            landing: landing.clone(),
            retry_used: retry,
        });
        turn.prompt = Some(Prompt::Question {
            player,
            rating,
            can_skip,
            retry,
        });
        self.emit(GameEvent::QuestionAsked {
            player,
            landing,
            retry,
        });
        Ok(())
    }

    pub(super) fn apply_reward(
        &mut self,
        player: PlayerId,
        reward: QuestionReward,
    ) -> Result<(), EngineError> {
        self.emit(GameEvent::RewardApplied { player, reward });
        match reward {
            QuestionReward::Advance(steps) => self.queue(PendingStep::Move {
                player,
                request: MoveRequest::effect(steps, None),
            }),
            QuestionReward::ReturnToPreviousLanding => {
                let to = self.player(player)?.previous_landing.clone();
                self.queue(PendingStep::Teleport { player, to });
            }
            QuestionReward::ExtraTurn => self.grant_extra_turn(player),
            QuestionReward::LoseLife => self.lose_life(player)?,
            QuestionReward::GainLife => self.gain_life(player)?,
            QuestionReward::SkipTurn => self.schedule_skip(player)?,
        }
        Ok(())
    }

    fn draw_card(&mut self, player: PlayerId) -> Result<(), EngineError> {
        let seed = self.next_seed(player, RollContext::CardDraw);
        let card = self.env.cards().draw(self.env.rng(), seed);
        info!(target: "trails::engine", %player, card = card.title(), "card drawn");
        self.emit(GameEvent::CardDrawn { player, card });
        self.apply_card(player, card)
    }

    pub(super) fn apply_card(&mut self, player: PlayerId, card: CardKind) -> Result<(), EngineError> {
        let config = self.env.config();
        match card {
            CardKind::LifeGain => self.gain_life(player)?,
            CardKind::LifeLoss => self.lose_life(player)?,
            CardKind::Gamble => {
                let seed = self.next_seed(player, RollContext::Gamble);
                let won = self.env.rng().coin_flip(seed);
                self.emit(GameEvent::GambleResolved { player, won });
                if won {
                    self.gain_life(player)?;
                } else {
                    self.lose_life(player)?;
                }
            }
            CardKind::SwapPosition => self.queue(PendingStep::ChoosePlayer { player }),
            CardKind::SkipTurn => self.schedule_skip(player)?,
            CardKind::ForcedMove => self.queue(PendingStep::Move {
                player,
                request: MoveRequest::effect(config.forced_move_steps, None),
            }),
            CardKind::ReturnToStart => {
                let to = self.player(player)?.landing.path_start();
                self.queue(PendingStep::Teleport { player, to });
            }
            CardKind::ExtraTurn => self.grant_extra_turn(player),
            CardKind::MoveBack => {
                let backward = self.player(player)?.direction.reversed();
                self.queue(PendingStep::Move {
                    player,
                    request: MoveRequest::effect(config.move_back_steps, Some(backward)),
                });
            }
            CardKind::Shield => {
                self.state.protected.insert(player);
                self.emit(GameEvent::ShieldGranted { player });
            }
            CardKind::ReverseDirection => {
                let state = self.player_mut(player)?;
                state.direction = state.direction.reversed();
                let direction = state.direction;
                self.emit(GameEvent::DirectionReversed { player, direction });
            }
            CardKind::MoveAllForward => {
                for id in self.state.player_ids() {
                    self.queue(PendingStep::Move {
                        player: id,
                        request: MoveRequest::effect(config.move_all_steps, None),
                    });
                }
            }
        }
        Ok(())
    }

    /// Removes a life unless a shield card or ability absorbs it.
    pub(super) fn lose_life(&mut self, player: PlayerId) -> Result<(), EngineError> {
        if self.state.protected.remove(&player) {
            self.emit(GameEvent::ShieldAbsorbed {
                player,
                source: ShieldSource::Card,
            });
            return Ok(());
        }

        let state = self.player_mut(player)?;
        if state.abilities.consume_shield() {
            self.emit(GameEvent::ShieldAbsorbed {
                player,
                source: ShieldSource::Ability,
            });
            return Ok(());
        }
        state.lives = state.lives.saturating_sub(1);
        let lives = state.lives;

        info!(target: "trails::engine", %player, lives, "life lost");
        self.emit(GameEvent::LivesChanged {
            player,
            lives,
            delta: -1,
        });
        if lives == 0 {
            self.declare_lost(player);
        }
        Ok(())
    }

    pub(super) fn gain_life(&mut self, player: PlayerId) -> Result<(), EngineError> {
        let state = self.player_mut(player)?;
        if state.lives >= state.max_lives {
            debug!(target: "trails::engine", %player, lives = state.lives, "already at full lives");
            return Ok(());
        }
        state.lives += 1;
        let lives = state.lives;
        self.emit(GameEvent::LivesChanged {
            player,
            lives,
            delta: 1,
        });
        Ok(())
    }

    fn schedule_skip(&mut self, player: PlayerId) -> Result<(), EngineError> {
        let state = self.player_mut(player)?;
        state.skip_turns += 1;
        let pending = state.skip_turns;
        self.emit(GameEvent::SkipTurnScheduled { player, pending });
        Ok(())
    }

    fn grant_extra_turn(&mut self, player: PlayerId) {
        self.state.turn.is_extra_turn = true;
        self.emit(GameEvent::ExtraTurnGranted { player });
    }

    fn queue(&mut self, step: PendingStep) {
        self.state.turn.pending.push_back(step);
    }

    pub(super) fn declare_won(&mut self, player: PlayerId) {
        if self.state.is_over() {
            return;
        }
        self.state.turn.conclude(MatchOutcome::Won, Some(player));
        info!(target: "trails::engine", %player, "match won");
        self.emit(GameEvent::GameWon { player });
    }

    fn declare_lost(&mut self, player: PlayerId) {
        if self.state.is_over() {
            return;
        }
        self.state.turn.conclude(MatchOutcome::Lost, Some(player));
        info!(target: "trails::engine", %player, "match lost");
        self.emit(GameEvent::GameLost { player });
    }
}
