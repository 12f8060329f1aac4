//! Seating participants for a new match.

use tracing::info;
use trails_core::{Abilities, Element, GameState, Landing, PlayerId, PlayerState, ProfileRef};

use crate::api::{Result, RuntimeError};
use crate::oracle::OracleManager;

/// Path every token starts on.
pub const START_PATH: &str = "main";

/// Seats `profiles` in join order at the start of [`START_PATH`].
///
/// Seats cycle through the elements, each with its ability, and everyone
/// gets the starting lives for the roster size.
pub fn new_match(oracles: &OracleManager, seed: u64, profiles: Vec<ProfileRef>) -> Result<GameState> {
    let config = oracles.config();
    let lives = config.starting_lives(profiles.len());
    let start = Landing::new(START_PATH, 0);

    let players = profiles
        .into_iter()
        .enumerate()
        .map(|(seat, profile)| {
            let element = Element::for_seat(seat);
            PlayerState::new(
                PlayerId(seat as u8),
                element,
                profile,
                start.clone(),
                lives,
            )
            .with_abilities(Abilities::for_element(element, config))
        })
        .collect::<Vec<_>>();

    let state = GameState::new(seed, players).map_err(RuntimeError::InitialState)?;
    info!(
        target: "runtime::setup",
        seed,
        participants = state.roster.len(),
        lives,
        "match seated"
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    use trails_content::Content;
    use trails_core::{GameConfig, StateError};

    use super::*;

    fn oracles() -> OracleManager {
        OracleManager::from_content(&Content::standard().unwrap())
    }

    #[test]
    fn two_participants_get_two_player_lives() {
        let profiles = vec![ProfileRef::guest(PlayerId(0)), ProfileRef::guest(PlayerId(1))];
        let state = new_match(&oracles(), 5, profiles).unwrap();

        let lives = GameConfig::default().two_player_lives;
        assert!(state.players().all(|p| p.lives == lives && p.max_lives == lives));
        assert_eq!(state.player(PlayerId(1)).unwrap().element, Element::Water);
        assert!(state.players().all(|p| p.landing == Landing::new(START_PATH, 0)));
    }

    #[test]
    fn oversized_roster_is_rejected() {
        let profiles = (0..5).map(|seat| ProfileRef::guest(PlayerId(seat))).collect();
        let err = new_match(&oracles(), 5, profiles).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::InitialState(StateError::TooManyPlayers { .. })
        ));
    }
}
