mod common;

use common::{Fixture, player, run, state};
use trails_core::{
    CardKind, Difficulty, EngineError, GameEngine, GameEvent, Landing, MatchOutcome, PlayerId,
    Prompt, QuestionResponse, SkipReason, TickStatus,
};

fn answered(difficulty: Difficulty, correct: bool) -> QuestionResponse {
    QuestionResponse::Answered {
        difficulty,
        correct,
    }
}

#[test]
fn dice_move_asks_question_and_easy_reward_is_inert() {
    let fixture = Fixture::track(&[], vec![CardKind::Shield]);
    let mut state = state(vec![player(0, 0, 4), player(1, 0, 4)]);
    let mut engine = GameEngine::new(&mut state, fixture.env());

    assert_eq!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::Roll {
            player: PlayerId(0)
        })
    );
    engine.submit_roll(5).unwrap();
    let TickStatus::Waiting(Prompt::Question { player, retry, .. }) = run(&mut engine) else {
        panic!("expected a question");
    };
    assert_eq!(player, PlayerId(0));
    assert!(!retry);

    engine
        .submit_answer(answered(Difficulty::Easy, true))
        .unwrap();
    assert_eq!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::Roll {
            player: PlayerId(1)
        })
    );

    let events = engine.take_events();
    assert!(events.contains(&GameEvent::TileEffectSkipped {
        landing: Landing::new("main", 7),
        occupant: Some(PlayerId(0)),
        reason: SkipReason::EffectMovement,
    }));
    assert!(events.contains(&GameEvent::TileEffectResolved {
        player: PlayerId(0),
        landing: Landing::new("main", 5),
    }));
    drop(engine);

    let p0 = state.player(PlayerId(0)).unwrap();
    assert_eq!(p0.landing, Landing::new("main", 7));
    assert_eq!(p0.previous_landing, Landing::new("main", 0));
    assert_eq!(state.turn.turn_number, 1);
}

#[test]
fn skipped_participants_forfeit_their_turn() {
    let fixture = Fixture::with_fill('C', &[], vec![CardKind::Shield]);
    let mut skipper = player(1, 0, 3);
    skipper.skip_turns = 1;
    let mut state = state(vec![player(0, 0, 3), skipper, player(2, 0, 3)]);
    let mut engine = GameEngine::new(&mut state, fixture.env());

    engine.submit_roll(3).unwrap();
    assert_eq!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::Roll {
            player: PlayerId(2)
        })
    );
    assert!(engine.take_events().contains(&GameEvent::TurnSkipped {
        player: PlayerId(1),
        remaining: 0,
    }));
    drop(engine);
    assert_eq!(state.player(PlayerId(1)).unwrap().skip_turns, 0);
}

#[test]
fn match_stalls_when_nobody_can_play() {
    let fixture = Fixture::with_fill('C', &[], vec![CardKind::Shield]);
    let mut first = player(0, 0, 4);
    first.skip_turns = 5;
    let mut second = player(1, 0, 4);
    second.skip_turns = 5;
    let mut state = state(vec![first, second]);
    let mut engine = GameEngine::new(&mut state, fixture.env());

    engine.submit_roll(2).unwrap();
    assert_eq!(run(&mut engine), TickStatus::Finished(MatchOutcome::Stalled));
    assert!(
        engine
            .take_events()
            .contains(&GameEvent::GameStalled { attempts: 4 })
    );
    assert_eq!(
        engine.submit_roll(2),
        Err(EngineError::MatchOver(MatchOutcome::Stalled))
    );
}

#[test]
fn medium_correct_answer_grants_an_extra_turn() {
    let fixture = Fixture::track(&[], vec![CardKind::Shield]);
    let mut state = state(vec![player(0, 0, 4), player(1, 0, 4)]);
    let mut engine = GameEngine::new(&mut state, fixture.env());

    engine.submit_roll(4).unwrap();
    run(&mut engine);
    engine
        .submit_answer(answered(Difficulty::Medium, true))
        .unwrap();
    assert_eq!(
        run(&mut engine),
        TickStatus::Waiting(Prompt::Roll {
            player: PlayerId(0)
        })
    );
    let events = engine.take_events();
    assert!(events.contains(&GameEvent::ExtraTurnGranted {
        player: PlayerId(0)
    }));
    assert!(events.contains(&GameEvent::TurnAdvanced {
        from: PlayerId(0),
        to: PlayerId(0),
        turn_number: 1,
    }));
}

#[test]
fn inputs_are_rejected_out_of_turn() {
    let fixture = Fixture::track(&[], vec![CardKind::Shield]);
    let mut state = state(vec![player(0, 0, 4), player(1, 0, 4)]);
    let mut engine = GameEngine::new(&mut state, fixture.env());
    run(&mut engine);

    assert_eq!(
        engine.submit_answer(answered(Difficulty::Easy, true)),
        Err(EngineError::UnexpectedInput {
            expected: "question",
            actual: "roll",
        })
    );
    assert_eq!(engine.submit_roll(0), Err(EngineError::ZeroRoll));

    engine.submit_roll(2).unwrap();
    assert!(matches!(
        engine.submit_roll(2),
        Err(EngineError::UnexpectedInput {
            expected: "roll",
            ..
        })
    ));
}

#[test]
fn replaying_with_the_same_seed_is_deterministic() {
    fn play(fixture: &Fixture) -> (trails_core::GameState, Vec<GameEvent>) {
        let mut state = state(vec![player(0, 0, 3), player(1, 0, 3), player(2, 0, 3)]);
        let mut events = Vec::new();
        {
            let mut engine = GameEngine::new(&mut state, fixture.env());
            for _ in 0..200 {
                match run(&mut engine) {
                    TickStatus::Finished(_) => break,
                    TickStatus::Waiting(Prompt::Roll { .. }) => {
                        engine.roll().unwrap();
                    }
                    TickStatus::Waiting(Prompt::Question { player, .. }) => {
                        let correct = player.0 % 2 == 0;
                        engine
                            .submit_answer(answered(Difficulty::Medium, correct))
                            .unwrap();
                    }
                    TickStatus::Waiting(Prompt::IntersectionChoice { .. }) => {
                        engine
                            .submit_intersection_choice(trails_core::IntersectionChoice::Stay)
                            .unwrap();
                    }
                    TickStatus::Waiting(Prompt::PlayerSelection { .. }) => {
                        engine.submit_player_choice(None).unwrap();
                    }
                    TickStatus::Progressed => unreachable!("run_until_prompt budget exhausted"),
                }
                events.extend(engine.take_events());
            }
        }
        (state, events)
    }

    let fixture = Fixture::track(&[(3, 'C'), (8, 'C'), (13, 'C'), (21, 'C')], Vec::new());
    let (first_state, first_events) = play(&fixture);
    let (second_state, second_events) = play(&fixture);
    assert_eq!(first_state, second_state);
    assert_eq!(first_events, second_events);
    assert!(!first_events.is_empty());
}
