//! Element-specific variant abilities.
//!
//! Abilities hook into three places of the turn loop: step counting before a
//! dice move, question handling (skip and retry), and life loss (shield).

use crate::board::Region;
use crate::config::GameConfig;

use super::Element;

/// Limited-use charge of an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Charge {
    remaining: u32,
}

impl Charge {
    pub const fn new(uses: u32) -> Self {
        Self { remaining: uses }
    }

    pub const fn single() -> Self {
        Self::new(1)
    }

    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    pub const fn is_available(&self) -> bool {
        self.remaining > 0
    }

    /// Spends one use. Returns false when no uses are left.
    pub fn consume(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Step multiplier applied while starting a move inside `region`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionSpeed {
    pub region: Region,
    pub numerator: u32,
    pub denominator: u32,
}

impl RegionSpeed {
    /// Scales `steps` when `current` matches the bonus region.
    ///
    /// Rounds down but never returns fewer steps than requested.
    pub fn adjust(&self, steps: u32, current: Region) -> u32 {
        if current != self.region || self.denominator == 0 {
            return steps;
        }
        let scaled = steps.saturating_mul(self.numerator) / self.denominator;
        scaled.max(steps)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Abilities {
    /// Absorbs one life loss.
    pub shield: Option<Charge>,
    /// Lets the participant pass on one question without penalty.
    pub skip_question: Option<Charge>,
    /// Grants a second attempt after one incorrect answer.
    pub retry: Option<Charge>,
    pub region_speed: Option<RegionSpeed>,
}

impl Abilities {
    pub const fn none() -> Self {
        Self {
            shield: None,
            skip_question: None,
            retry: None,
            region_speed: None,
        }
    }

    /// Ability kit of each element.
    ///
    /// | element | ability                              |
    /// |---------|--------------------------------------|
    /// | fire    | faster movement through the volcano  |
    /// | water   | one retry on an incorrect answer     |
    /// | earth   | one absorbed life loss               |
    /// | air     | one skipped question                 |
    pub fn for_element(element: Element, config: &GameConfig) -> Self {
        match element {
            Element::Fire => Self {
                region_speed: Some(RegionSpeed {
                    region: Region::Volcano,
                    numerator: config.region_speed_numerator,
                    denominator: config.region_speed_denominator,
                }),
                ..Self::none()
            },
            Element::Water => Self {
                retry: Some(Charge::single()),
                ..Self::none()
            },
            Element::Earth => Self {
                shield: Some(Charge::single()),
                ..Self::none()
            },
            Element::Air => Self {
                skip_question: Some(Charge::single()),
                ..Self::none()
            },
        }
    }

    /// Steps of a dice move after the region bonus.
    pub fn adjust_steps(&self, steps: u32, current: Region) -> u32 {
        match &self.region_speed {
            Some(speed) => speed.adjust(steps, current),
            None => steps,
        }
    }

    pub fn can_skip_question(&self) -> bool {
        self.skip_question.is_some_and(|charge| charge.is_available())
    }

    pub fn consume_shield(&mut self) -> bool {
        Self::spend(&mut self.shield)
    }

    pub fn consume_skip_question(&mut self) -> bool {
        Self::spend(&mut self.skip_question)
    }

    pub fn consume_retry(&mut self) -> bool {
        Self::spend(&mut self.retry)
    }

    fn spend(charge: &mut Option<Charge>) -> bool {
        charge.as_mut().is_some_and(Charge::consume)
    }
}
