mod common;

use common::{Fixture, player, run, state};
use trails_core::{
    Abilities, CardKind, Destination, Difficulty, Direction, EngineError, GameEngine, GameEvent,
    GameState, IntersectionChoice, Landing, MatchOutcome, PlayerId, PlayerState, Prompt,
    QuestionResponse, QuestionReward, ShieldSource, TickStatus,
};

fn answered(difficulty: Difficulty, correct: bool) -> QuestionResponse {
    QuestionResponse::Answered {
        difficulty,
        correct,
    }
}

/// Rolls `lead` (standing on main#5) onto the card at main#7.
fn land_on_card(card: CardKind, lead: PlayerState) -> (GameState, TickStatus, Vec<GameEvent>) {
    let fixture = Fixture::track(&[(7, 'C')], vec![card]);
    let mut state = state(vec![lead, player(1, 0, 4)]);
    let mut engine = GameEngine::new(&mut state, fixture.env());

    engine.submit_roll(2).unwrap();
    let status = run(&mut engine);
    let events = engine.take_events();
    drop(engine);
    (state, status, events)
}

fn position(events: &[GameEvent], wanted: impl Fn(&GameEvent) -> bool) -> usize {
    events
        .iter()
        .position(wanted)
        .expect("event should have been emitted")
}

#[test]
fn correct_answer_on_final_waypoint_wins() {
    let fixture = Fixture::track(&[], vec![CardKind::Shield]);
    let mut state = state(vec![player(0, 45, 4), player(1, 0, 4)]);
    let mut engine = GameEngine::new(&mut state, fixture.env());

    engine.submit_roll(5).unwrap();
    assert!(matches!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::Question {
            player: PlayerId(0),
            ..
        })
    ));
    engine
        .submit_answer(answered(Difficulty::Hard, true))
        .unwrap();
    assert_eq!(run(&mut engine), TickStatus::Finished(MatchOutcome::Won));
    assert!(
        engine
            .take_events()
            .contains(&GameEvent::GameWon { player: PlayerId(0) })
    );
    assert!(engine.state().turn.pending.is_empty());
    assert!(engine.state().turn.game_won());
}

#[test]
fn forced_move_onto_the_final_waypoint_is_adjudicated() {
    let fixture = Fixture::track(&[(25, 'C')], vec![CardKind::ForcedMove]);
    let mut state = state(vec![player(0, 20, 4), player(1, 0, 4)]);
    let mut engine = GameEngine::new(&mut state, fixture.env());

    engine.submit_roll(5).unwrap();
    let status = run(&mut engine);
    assert!(matches!(
        status,
        TickStatus::Waiting(Prompt::Question {
            player: PlayerId(0),
            ..
        })
    ));
    assert_eq!(
        engine.state().player(PlayerId(0)).unwrap().landing,
        Landing::new("main", 50)
    );

    engine
        .submit_answer(answered(Difficulty::Easy, true))
        .unwrap();
    assert_eq!(run(&mut engine), TickStatus::Finished(MatchOutcome::Won));
}

#[test]
fn incorrect_final_answer_sends_token_back_and_applies_penalty() {
    let fixture = Fixture::track(&[], vec![CardKind::Shield]);
    let mut state = state(vec![player(0, 45, 4), player(1, 0, 4)]);
    let mut engine = GameEngine::new(&mut state, fixture.env());

    engine.submit_roll(5).unwrap();
    run(&mut engine);
    engine
        .submit_answer(answered(Difficulty::Hard, false))
        .unwrap();
    assert_eq!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::Roll {
            player: PlayerId(1)
        })
    );

    let events = engine.take_events();
    let returned = position(&events, |event| {
        matches!(event, GameEvent::Teleported { player: PlayerId(0), .. })
    });
    let penalised = position(&events, |event| {
        matches!(
            event,
            GameEvent::RewardApplied {
                player: PlayerId(0),
                reward: QuestionReward::SkipTurn,
            }
        )
    });
    assert!(returned < penalised);
    drop(engine);

    let p0 = state.player(PlayerId(0)).unwrap();
    assert_eq!(p0.landing, Landing::new("main", 45));
    assert_eq!(p0.skip_turns, 1);
    assert_eq!(state.turn.outcome, MatchOutcome::InProgress);
}

#[test]
fn easy_miss_returns_to_the_previous_landing() {
    let fixture = Fixture::track(&[], vec![CardKind::Shield]);
    let mut state = state(vec![player(0, 10, 4), player(1, 0, 4)]);
    let mut engine = GameEngine::new(&mut state, fixture.env());

    engine.submit_roll(2).unwrap();
    assert!(matches!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::Question {
            player: PlayerId(0),
            ..
        })
    ));
    assert_eq!(
        engine.state().player(PlayerId(0)).unwrap().landing,
        Landing::new("main", 12)
    );

    engine
        .submit_answer(answered(Difficulty::Easy, false))
        .unwrap();
    assert_eq!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::Roll {
            player: PlayerId(1)
        })
    );
    let events = engine.take_events();
    assert!(events.contains(&GameEvent::Teleported {
        player: PlayerId(0),
        from: Landing::new("main", 12),
        to: Landing::new("main", 10),
    }));
    let asked = events
        .iter()
        .filter(|event| matches!(event, GameEvent::QuestionAsked { .. }))
        .count();
    assert_eq!(asked, 1);
    drop(engine);

    let p0 = state.player(PlayerId(0)).unwrap();
    assert_eq!(p0.landing, Landing::new("main", 10));
    assert_eq!(p0.lives, 4);
    assert_eq!(p0.skip_turns, 0);
}

#[test]
fn win_drops_steps_still_queued_behind_it() {
    let fixture = Fixture::track(&[(47, 'C')], vec![CardKind::MoveAllForward]);
    let mut state = state(vec![player(0, 44, 4), player(1, 20, 4)]);
    let mut engine = GameEngine::new(&mut state, fixture.env());

    engine.submit_roll(3).unwrap();
    assert!(matches!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::Question {
            player: PlayerId(0),
            ..
        })
    ));
    assert_eq!(
        engine.state().player(PlayerId(0)).unwrap().landing,
        Landing::new("main", 50)
    );
    assert_eq!(engine.state().turn.pending.len(), 1);

    engine
        .submit_answer(answered(Difficulty::Medium, true))
        .unwrap();
    assert_eq!(run(&mut engine), TickStatus::Finished(MatchOutcome::Won));
    drop(engine);

    assert!(state.turn.pending.is_empty());
    assert!(!state.turn.is_extra_turn);
    assert_eq!(
        state.player(PlayerId(1)).unwrap().landing,
        Landing::new("main", 20)
    );
}

#[test]
fn reverse_direction_flips_the_drawer() {
    let (state, status, events) = land_on_card(CardKind::ReverseDirection, player(0, 5, 4));

    assert_eq!(
        status,
        TickStatus::Waiting(Prompt::Roll {
            player: PlayerId(1)
        })
    );
    assert!(events.contains(&GameEvent::DirectionReversed {
        player: PlayerId(0),
        direction: Direction::Backward,
    }));
    let p0 = state.player(PlayerId(0)).unwrap();
    assert_eq!(p0.direction, Direction::Backward);
    assert_eq!(p0.landing, Landing::new("main", 7));
}

#[test]
fn return_to_start_teleports_without_a_new_effect() {
    let (state, status, events) = land_on_card(CardKind::ReturnToStart, player(0, 5, 4));

    assert_eq!(
        status,
        TickStatus::Waiting(Prompt::Roll {
            player: PlayerId(1)
        })
    );
    assert_eq!(
        state.player(PlayerId(0)).unwrap().landing,
        Landing::new("main", 0)
    );
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, GameEvent::QuestionAsked { .. }))
    );
}

#[test]
fn gamble_moves_one_life_either_way() {
    let mut lead = player(0, 5, 4);
    lead.lives = 2;
    let (state, _, events) = land_on_card(CardKind::Gamble, lead);

    let won = events
        .iter()
        .find_map(|event| match event {
            GameEvent::GambleResolved {
                player: PlayerId(0),
                won,
            } => Some(*won),
            _ => None,
        })
        .expect("gamble should resolve");
    let expected = if won { 3 } else { 1 };
    assert_eq!(state.player(PlayerId(0)).unwrap().lives, expected);
}

#[test]
fn extra_turn_card_keeps_the_drawer() {
    let (state, status, events) = land_on_card(CardKind::ExtraTurn, player(0, 5, 4));

    assert_eq!(
        status,
        TickStatus::Waiting(Prompt::Roll {
            player: PlayerId(0)
        })
    );
    assert!(events.contains(&GameEvent::ExtraTurnGranted {
        player: PlayerId(0)
    }));
    assert_eq!(state.turn.turn_number, 1);
    assert!(!state.turn.is_extra_turn);
}

#[test]
fn life_gain_card_stops_at_the_cap() {
    let mut hurt = player(0, 5, 4);
    hurt.lives = 2;
    let (state, _, events) = land_on_card(CardKind::LifeGain, hurt);
    assert_eq!(state.player(PlayerId(0)).unwrap().lives, 3);
    assert!(events.contains(&GameEvent::LivesChanged {
        player: PlayerId(0),
        lives: 3,
        delta: 1,
    }));

    let (state, _, events) = land_on_card(CardKind::LifeGain, player(0, 5, 4));
    assert_eq!(state.player(PlayerId(0)).unwrap().lives, 4);
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, GameEvent::LivesChanged { .. }))
    );
}

#[test]
fn skip_turn_card_forfeits_the_next_turn() {
    let fixture = Fixture::track(&[(7, 'C')], vec![CardKind::SkipTurn]);
    let mut state = state(vec![player(0, 5, 4), player(1, 0, 4)]);
    let mut engine = GameEngine::new(&mut state, fixture.env());

    engine.submit_roll(2).unwrap();
    assert_eq!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::Roll {
            player: PlayerId(1)
        })
    );
    assert_eq!(engine.state().player(PlayerId(0)).unwrap().skip_turns, 1);

    engine.submit_roll(1).unwrap();
    run(&mut engine);
    engine
        .submit_answer(answered(Difficulty::Easy, true))
        .unwrap();
    assert_eq!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::Roll {
            player: PlayerId(1)
        })
    );
    assert!(engine.take_events().contains(&GameEvent::TurnSkipped {
        player: PlayerId(0),
        remaining: 0,
    }));
    drop(engine);

    assert_eq!(state.player(PlayerId(0)).unwrap().skip_turns, 0);
}

#[test]
fn losing_the_last_life_ends_the_match_once() {
    let fixture = Fixture::with_fill('C', &[], vec![CardKind::LifeLoss]);
    let mut state = state(vec![player(0, 0, 1), player(1, 0, 1)]);
    let mut engine = GameEngine::new(&mut state, fixture.env());

    engine.submit_roll(3).unwrap();
    assert_eq!(run(&mut engine), TickStatus::Finished(MatchOutcome::Lost));

    let events = engine.take_events();
    let losses = events
        .iter()
        .filter(|event| matches!(event, GameEvent::GameLost { .. }))
        .count();
    assert_eq!(losses, 1);
    assert!(events.contains(&GameEvent::LivesChanged {
        player: PlayerId(0),
        lives: 0,
        delta: -1,
    }));
    assert_eq!(
        engine.submit_roll(4),
        Err(EngineError::MatchOver(MatchOutcome::Lost))
    );
}

#[test]
fn shield_card_absorbs_before_the_ability() {
    let fixture = Fixture::with_fill('C', &[], vec![CardKind::LifeLoss]);
    let config = trails_core::GameConfig::default();
    let earth = player(0, 0, 3).with_abilities(Abilities::for_element(
        trails_core::Element::Earth,
        &config,
    ));
    let mut state = state(vec![earth, player(1, 0, 3)]);
    state.protected.insert(PlayerId(0));
    let mut engine = GameEngine::new(&mut state, fixture.env());

    engine.submit_roll(2).unwrap();
    run(&mut engine);
    assert!(engine.take_events().contains(&GameEvent::ShieldAbsorbed {
        player: PlayerId(0),
        source: ShieldSource::Card,
    }));
    drop(engine);

    assert!(state.protected.is_empty());
    let p0 = state.player(PlayerId(0)).unwrap();
    assert_eq!(p0.lives, 3);
    assert!(p0.abilities.shield.is_some_and(|charge| charge.is_available()));
}

#[test]
fn cursed_steps_clamp_at_the_path_start() {
    let fixture = Fixture::track(&[(2, 'C')], vec![CardKind::MoveBack]);
    let mut state = state(vec![player(0, 0, 4), player(1, 0, 4)]);
    let mut engine = GameEngine::new(&mut state, fixture.env());

    engine.submit_roll(2).unwrap();
    assert_eq!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::Roll {
            player: PlayerId(1)
        })
    );
    drop(engine);

    let p0 = state.player(PlayerId(0)).unwrap();
    // 2 -> 1 -> 0, clamp, then 1 -> 2 -> 3 -> 4.
    assert_eq!(p0.landing, Landing::new("main", 4));
    assert_eq!(p0.direction, Direction::Forward);
}

#[test]
fn swap_card_trades_places_with_the_chosen_player() {
    let fixture = Fixture::with_fill('C', &[], vec![CardKind::SwapPosition]);
    let mut state = state(vec![player(0, 0, 4), player(1, 10, 4)]);
    let mut engine = GameEngine::new(&mut state, fixture.env());

    engine.submit_roll(3).unwrap();
    assert_eq!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::PlayerSelection {
            player: PlayerId(0),
            candidates: vec![PlayerId(1)],
        })
    );
    assert_eq!(
        engine.submit_player_choice(Some(PlayerId(0))),
        Err(EngineError::InvalidSelection(PlayerId(0)))
    );
    engine.submit_player_choice(Some(PlayerId(1))).unwrap();
    run(&mut engine);
    drop(engine);

    assert_eq!(
        state.player(PlayerId(0)).unwrap().landing,
        Landing::new("main", 10)
    );
    assert_eq!(
        state.player(PlayerId(1)).unwrap().landing,
        Landing::new("main", 3)
    );
}

#[test]
fn move_all_forward_moves_every_token_without_effects() {
    let fixture = Fixture::track(&[(4, 'C')], vec![CardKind::MoveAllForward]);
    let mut state = state(vec![player(0, 0, 4), player(1, 10, 4)]);
    let mut engine = GameEngine::new(&mut state, fixture.env());

    engine.submit_roll(4).unwrap();
    assert_eq!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::Roll {
            player: PlayerId(1)
        })
    );
    drop(engine);

    assert_eq!(state.player(PlayerId(0)).unwrap().landing.index, 7);
    assert_eq!(state.player(PlayerId(1)).unwrap().landing.index, 13);
}

#[test]
fn water_retries_once_and_air_skips_once() {
    let config = trails_core::GameConfig::default();
    let fixture = Fixture::track(&[], vec![CardKind::Shield]);
    let water = player(0, 0, 4).with_abilities(Abilities::for_element(
        trails_core::Element::Water,
        &config,
    ));
    let air = player(1, 0, 4).with_abilities(Abilities::for_element(
        trails_core::Element::Air,
        &config,
    ));
    let mut state = state(vec![water, air]);
    let mut engine = GameEngine::new(&mut state, fixture.env());

    engine.submit_roll(2).unwrap();
    run(&mut engine);
    engine
        .submit_answer(answered(Difficulty::Medium, false))
        .unwrap();
    assert!(matches!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::Question { retry: true, .. })
    ));
    engine
        .submit_answer(answered(Difficulty::Medium, false))
        .unwrap();
    run(&mut engine);
    assert_eq!(engine.state().player(PlayerId(0)).unwrap().lives, 3);

    engine.submit_roll(2).unwrap();
    assert!(matches!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::Question {
            player: PlayerId(1),
            can_skip: true,
            ..
        })
    ));
    engine.submit_answer(QuestionResponse::Skipped).unwrap();
    assert_eq!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::Roll {
            player: PlayerId(0)
        })
    );

    engine.submit_roll(2).unwrap();
    run(&mut engine);
    engine
        .submit_answer(answered(Difficulty::Easy, true))
        .unwrap();
    run(&mut engine);
    engine.submit_roll(1).unwrap();
    run(&mut engine);
    assert_eq!(
        engine.submit_answer(QuestionResponse::Skipped),
        Err(EngineError::NoSkipCharge(PlayerId(1)))
    );
}

#[test]
fn intersection_choice_routes_onto_a_branch() {
    let mut fixture = Fixture::track(&[(3, 'X')], vec![CardKind::Shield]);
    fixture
        .board
        .insert_path("branch", [(trails_core::TileKind::Card, trails_core::Region::Reef); 8])
        .unwrap();
    fixture.intersections.add_route(
        Landing::new("main", 3),
        Destination::new("branch", 0, true),
    );
    let mut state = state(vec![player(0, 0, 4), player(1, 0, 4)]);
    let mut engine = GameEngine::new(&mut state, fixture.env());

    engine.submit_roll(5).unwrap();
    let TickStatus::Waiting(Prompt::IntersectionChoice { at, destinations, .. }) =
        run(&mut engine)
    else {
        panic!("expected an intersection prompt");
    };
    assert_eq!(at, Landing::new("main", 3));
    assert_eq!(destinations.len(), 1);

    assert_eq!(
        engine.submit_intersection_choice(IntersectionChoice::Take(4)),
        Err(EngineError::UnknownRoute {
            index: 4,
            available: 1
        })
    );
    engine
        .submit_intersection_choice(IntersectionChoice::Take(0))
        .unwrap();
    assert_eq!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::Roll {
            player: PlayerId(1)
        })
    );
    assert_eq!(
        engine.state().player(PlayerId(0)).unwrap().landing,
        Landing::new("branch", 2)
    );

    engine.submit_roll(5).unwrap();
    run(&mut engine);
    engine
        .submit_intersection_choice(IntersectionChoice::Stay)
        .unwrap();
    assert!(matches!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::Question {
            player: PlayerId(1),
            ..
        })
    ));
    assert_eq!(
        engine.state().player(PlayerId(1)).unwrap().landing,
        Landing::new("main", 5)
    );
}
