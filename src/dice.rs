//! Randomness provider.
//!
//! Every random draw in a game (die rolls, deck shuffles, cup shuffles)
//! goes through a single `Dice` value owned by the game, so a seed plus the
//! sequence of player inputs reproduces a game exactly.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of dice rolls and shuffles.
pub trait Dice {
    /// Rolls one six-sided die: 1..=6.
    fn roll(&mut self) -> u8;

    /// Returns a uniform index in `0..bound`. Returns 0 when `bound <= 1`.
    fn below(&mut self, bound: usize) -> usize;

    /// Shuffles `items` in place (Fisher-Yates).
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        let len = items.len();
        for i in 0..len.saturating_sub(1) {
            let j = i + self.below(len - i);
            items.swap(i, j);
        }
    }
}

/// Seeded dice backed by a ChaCha8 stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeededDice {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        SeededDice { seed, rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Seeds from the system clock, for normal play.
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        SeededDice::new(nanos)
    }

    /// The seed this stream was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Dice for SeededDice {
    fn roll(&mut self) -> u8 {
        let roll = self.rng.gen_range(1..=6);
        tracing::trace!(roll, "die roll");
        roll
    }

    fn below(&mut self, bound: usize) -> usize {
        if bound <= 1 {
            0
        } else {
            self.rng.gen_range(0..bound)
        }
    }
}

/// Dice that replay a fixed list of rolls.
///
/// `below` always answers 0, so every shuffle leaves its input in order.
/// Running out of rolls panics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedDice {
    rolls: VecDeque<u8>,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        ScriptedDice { rolls: rolls.into_iter().collect() }
    }

    /// Appends more rolls to the end of the script.
    pub fn push(&mut self, rolls: impl IntoIterator<Item = u8>) {
        self.rolls.extend(rolls);
    }

    /// The number of scripted rolls not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> u8 {
        match self.rolls.pop_front() {
            Some(roll) => roll,
            None => panic!("scripted dice ran out of rolls"),
        }
    }

    fn below(&mut self, _bound: usize) -> usize {
        0
    }
}
