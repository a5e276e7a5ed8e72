//! Trade goods, chiefdom counters, and the cup they are drawn from.
//!
//! Every counter has two faces: the plain face shown when a chiefdom is first
//! placed, and the mounded face shown once a mound has been built there.
//! Counters are identified by their index into `CHIEFDOM_COUNTERS`.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::land::Land;
use crate::dice::Dice;

/// The number of chiefdom counters in the game.
pub const COUNTER_COUNT: usize = 25;

/// One of the nine trade goods a chiefdom can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeGood {
    Hides,
    Chert,
    Feathers,
    Copper,
    Mica,
    Chalcedony,
    Pipestone,
    Obsidian,
    Seashells,
}

impl TradeGood {
    pub const fn name(self) -> &'static str {
        match self {
            TradeGood::Hides => "Hides",
            TradeGood::Chert => "Chert",
            TradeGood::Feathers => "Feathers",
            TradeGood::Copper => "Copper",
            TradeGood::Mica => "Mica",
            TradeGood::Chalcedony => "Chalcedony",
            TradeGood::Pipestone => "Pipestone",
            TradeGood::Obsidian => "Obsidian",
            TradeGood::Seashells => "Seashells",
        }
    }
}

impl fmt::Display for TradeGood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One side of a chiefdom counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CounterFace {
    pub value: u8,
    pub is_green_bird: bool,
}

/// A two-faced chiefdom counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChiefdomCounter {
    pub good: TradeGood,
    pub plain: CounterFace,
    pub mounded: CounterFace,
}

impl fmt::Display for ChiefdomCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}/{} {})",
            self.good,
            self.plain.value,
            self.plain.is_green_bird,
            self.mounded.value,
            self.mounded.is_green_bird
        )
    }
}

/// Identifies a counter by its index into `CHIEFDOM_COUNTERS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CounterId(u8);

impl CounterId {
    /// Iterates over every counter in table order.
    pub fn all() -> impl Iterator<Item = CounterId> {
        (0..COUNTER_COUNT as u8).map(CounterId)
    }

    /// Returns the counter data for this id.
    pub fn counter(self) -> &'static ChiefdomCounter {
        &CHIEFDOM_COUNTERS[self.0 as usize]
    }
}

impl TryFrom<u8> for CounterId {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        if (index as usize) < COUNTER_COUNT {
            Ok(CounterId(index))
        } else {
            Err(format!("counter index {index} out of range"))
        }
    }
}

impl From<CounterId> for u8 {
    fn from(id: CounterId) -> u8 {
        id.0
    }
}

/// A chiefdom placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chiefdom {
    pub counter: CounterId,
    pub is_mounded: bool,
    pub is_controlled: bool,
    pub land: Land,
}

impl Chiefdom {
    /// Creates an uncontrolled, plain chiefdom.
    pub fn new(counter: CounterId, land: Land) -> Self {
        Chiefdom { counter, is_mounded: false, is_controlled: false, land }
    }

    /// Returns the face currently showing.
    pub fn face(&self) -> CounterFace {
        let counter = self.counter.counter();
        if self.is_mounded {
            counter.mounded
        } else {
            counter.plain
        }
    }

    /// Returns the value of the face currently showing.
    pub fn value(&self) -> u8 {
        self.face().value
    }

    pub fn is_green_bird(&self) -> bool {
        self.face().is_green_bird
    }

    pub fn good(&self) -> TradeGood {
        self.counter.counter().good
    }
}

impl fmt::Display for Chiefdom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let face = self.face();
        let side = if self.is_mounded { "Mounded" } else { "Plain" };
        let icon = if face.is_green_bird { "B" } else { "R" };
        write!(f, "{} ({}) - {} {}", self.good(), face.value, side, icon)
    }
}

/// The cup of undrawn chiefdom counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cup {
    counters: VecDeque<CounterId>,
}

impl Cup {
    /// Fills the cup with every counter and shuffles it.
    pub fn filled<D: Dice>(dice: &mut D) -> Self {
        let mut counters: Vec<CounterId> = CounterId::all().collect();
        dice.shuffle(&mut counters);
        Cup { counters: counters.into() }
    }

    /// Draws the next counter, or `None` if the cup is empty.
    pub fn draw(&mut self) -> Option<CounterId> {
        self.counters.pop_front()
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

const fn counter(
    good: TradeGood,
    plain: u8,
    plain_bird: bool,
    mounded: u8,
    mounded_bird: bool,
) -> ChiefdomCounter {
    ChiefdomCounter {
        good,
        plain: CounterFace { value: plain, is_green_bird: plain_bird },
        mounded: CounterFace { value: mounded, is_green_bird: mounded_bird },
    }
}

/// The full counter inventory: good, plain value/bird, mounded value/bird.
pub static CHIEFDOM_COUNTERS: [ChiefdomCounter; COUNTER_COUNT] = [
    counter(TradeGood::Hides, 2, false, 4, true),
    counter(TradeGood::Hides, 2, true, 3, true),
    counter(TradeGood::Hides, 3, false, 4, false),
    counter(TradeGood::Hides, 3, false, 3, true),
    counter(TradeGood::Hides, 4, false, 2, true),
    counter(TradeGood::Chert, 2, false, 4, true),
    counter(TradeGood::Chert, 3, false, 3, true),
    counter(TradeGood::Chert, 4, false, 2, true),
    counter(TradeGood::Chert, 4, false, 4, false),
    counter(TradeGood::Copper, 2, true, 3, true),
    counter(TradeGood::Copper, 3, false, 3, true),
    counter(TradeGood::Copper, 4, false, 2, true),
    counter(TradeGood::Mica, 2, false, 4, true),
    counter(TradeGood::Mica, 3, false, 3, true),
    counter(TradeGood::Mica, 4, false, 3, false),
    counter(TradeGood::Feathers, 2, true, 2, true),
    counter(TradeGood::Feathers, 2, false, 4, true),
    counter(TradeGood::Feathers, 3, false, 3, true),
    counter(TradeGood::Feathers, 4, false, 2, true),
    counter(TradeGood::Pipestone, 3, false, 3, true),
    counter(TradeGood::Pipestone, 4, false, 2, true),
    counter(TradeGood::Chalcedony, 2, false, 4, true),
    counter(TradeGood::Chalcedony, 3, true, 2, true),
    counter(TradeGood::Seashells, 3, false, 4, false),
    counter(TradeGood::Obsidian, 4, false, 2, true),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::land::Tribe;
    use crate::dice::{ScriptedDice, SeededDice};

    #[test]
    fn counter_values_are_in_die_range() {
        for c in &CHIEFDOM_COUNTERS {
            assert!((2..=4).contains(&c.plain.value), "{}", c);
            assert!((2..=4).contains(&c.mounded.value), "{}", c);
        }
    }

    #[test]
    fn every_good_appears_in_the_inventory() {
        for good in [
            TradeGood::Hides,
            TradeGood::Chert,
            TradeGood::Feathers,
            TradeGood::Copper,
            TradeGood::Mica,
            TradeGood::Chalcedony,
            TradeGood::Pipestone,
            TradeGood::Obsidian,
            TradeGood::Seashells,
        ] {
            assert!(CHIEFDOM_COUNTERS.iter().any(|c| c.good == good), "{}", good);
        }
    }

    #[test]
    fn scripted_cup_keeps_table_order() {
        let mut cup = Cup::filled(&mut ScriptedDice::default());
        assert_eq!(cup.len(), COUNTER_COUNT);
        assert_eq!(cup.draw(), CounterId::try_from(0).ok());
        assert_eq!(cup.draw(), CounterId::try_from(1).ok());
        assert_eq!(cup.len(), COUNTER_COUNT - 2);
    }

    #[test]
    fn seeded_cup_is_a_permutation() {
        let mut cup = Cup::filled(&mut SeededDice::new(11));
        let mut seen = Vec::new();
        while let Some(id) = cup.draw() {
            seen.push(u8::from(id));
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..COUNTER_COUNT as u8).collect::<Vec<_>>());
        assert!(cup.is_empty());
        assert_eq!(cup.draw(), None);
    }

    #[test]
    fn chiefdom_faces_follow_mound_flag() {
        let land = Land::innermost(Tribe::Shawnee);
        let mut chiefdom = Chiefdom::new(CounterId::try_from(4).unwrap(), land);
        assert_eq!(chiefdom.value(), 4);
        assert!(!chiefdom.is_green_bird());
        assert_eq!(chiefdom.to_string(), "Hides (4) - Plain R");

        chiefdom.is_mounded = true;
        assert_eq!(chiefdom.value(), 2);
        assert!(chiefdom.is_green_bird());
        assert_eq!(chiefdom.to_string(), "Hides (2) - Mounded B");
    }
}
