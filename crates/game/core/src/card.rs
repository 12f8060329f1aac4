//! Card catalog drawn from on card tiles.

use strum::{Display, EnumCount, EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::env::RngOracle;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CardKind {
    LifeGain,
    LifeLoss,
    /// Coin flip between gaining and losing a life.
    Gamble,
    SwapPosition,
    SkipTurn,
    ForcedMove,
    ReturnToStart,
    ExtraTurn,
    MoveBack,
    Shield,
    ReverseDirection,
    MoveAllForward,
}

impl CardKind {
    /// Title shown when the card is drawn.
    pub const fn title(self) -> &'static str {
        match self {
            Self::LifeGain => "Second Wind",
            Self::LifeLoss => "Stumble",
            Self::Gamble => "Gamble",
            Self::SwapPosition => "Switcheroo",
            Self::SkipTurn => "Nap Time",
            Self::ForcedMove => "Tailwind",
            Self::ReturnToStart => "Back to Square One",
            Self::ExtraTurn => "Encore",
            Self::MoveBack => "Cursed Steps",
            Self::Shield => "Guardian",
            Self::ReverseDirection => "About Face",
            Self::MoveAllForward => "Stampede",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::LifeGain => "Gain a life.",
            Self::LifeLoss => "Lose a life.",
            Self::Gamble => "Flip a coin: gain a life or lose one.",
            Self::SwapPosition => "Trade places with another player.",
            Self::SkipTurn => "Skip your next turn.",
            Self::ForcedMove => "Rush forward along your path.",
            Self::ReturnToStart => "Return to the start of your current path.",
            Self::ExtraTurn => "Take another turn.",
            Self::MoveBack => "Walk back along your path.",
            Self::Shield => "The next life you would lose is kept.",
            Self::ReverseDirection => "Turn around.",
            Self::MoveAllForward => "Every player moves forward.",
        }
    }
}

/// Ordered set of cards a draw picks from uniformly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardCatalog {
    cards: Vec<CardKind>,
}

impl CardCatalog {
    /// Catalog holding every card kind once.
    pub fn standard() -> Self {
        Self {
            cards: CardKind::iter().collect(),
        }
    }

    /// Catalog restricted to `cards`. Falls back to the standard deck when empty.
    pub fn from_kinds(cards: Vec<CardKind>) -> Self {
        if cards.is_empty() {
            return Self::standard();
        }
        Self { cards }
    }

    pub fn draw(&self, rng: &dyn RngOracle, seed: u64) -> CardKind {
        self.cards[rng.pick(seed, self.cards.len())]
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CardKind> + '_ {
        self.cards.iter().copied()
    }
}

impl Default for CardCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
