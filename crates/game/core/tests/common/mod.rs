#![allow(dead_code)]

use trails_core::{
    Board, CardCatalog, CardKind, Element, GameConfig, GameEngine, GameEnv, GameState,
    IntersectionTable, Landing, PcgRng, PlayerId, PlayerState, ProfileRef, Region, TickStatus,
    TileKind,
};

pub const TRACK_LEN: usize = 60;

/// Owns everything a [`GameEnv`] borrows.
pub struct Fixture {
    pub board: Board,
    pub intersections: IntersectionTable,
    pub cards: CardCatalog,
    pub config: GameConfig,
    pub rng: PcgRng,
}

impl Fixture {
    /// Single `main` path of question tiles with `marks` overriding glyphs.
    pub fn track(marks: &[(usize, char)], cards: Vec<CardKind>) -> Self {
        Self::with_fill('Q', marks, cards)
    }

    pub fn with_fill(fill: char, marks: &[(usize, char)], cards: Vec<CardKind>) -> Self {
        let mut glyphs = vec![fill; TRACK_LEN];
        for (index, glyph) in marks {
            glyphs[*index] = *glyph;
        }
        let mut board = Board::new();
        board
            .insert_path("main", glyphs.into_iter().map(tile))
            .expect("main path");
        Self {
            board,
            intersections: IntersectionTable::new(),
            cards: CardCatalog::from_kinds(cards),
            config: GameConfig::instant(),
            rng: PcgRng,
        }
    }

    pub fn env(&self) -> GameEnv<'_> {
        GameEnv::new(
            &self.board,
            &self.intersections,
            &self.cards,
            &self.config,
            &self.rng,
        )
    }
}

fn tile(glyph: char) -> (TileKind, Region) {
    (
        TileKind::from_glyph(glyph).expect("known glyph"),
        Region::Grove,
    )
}

pub fn player(seat: u8, index: u32, lives: u32) -> PlayerState {
    let id = PlayerId(seat);
    PlayerState::new(
        id,
        Element::for_seat(seat as usize),
        ProfileRef::guest(id),
        Landing::new("main", index),
        lives,
    )
}

pub fn state(players: Vec<PlayerState>) -> GameState {
    GameState::new(0xC0FFEE, players).expect("valid roster")
}

pub fn run(engine: &mut GameEngine<'_>) -> TickStatus {
    engine.run_until_prompt(10_000).expect("engine tick")
}
