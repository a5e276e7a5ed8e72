//! History cards and the history deck.
//!
//! The fifty cards drive the game's economy and hostility. Cards are
//! identified by their printed number (1..=50) and looked up in the
//! compile-time `HISTORY_CARDS` table.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::counter::TradeGood;
use super::land::Tribe;
use crate::dice::Dice;

/// The number of history cards in the game.
pub const HISTORY_CARD_COUNT: usize = 50;

/// Number of Hopewell cards dealt into the early segment of the deck.
const EARLY_SEGMENT_LEN: usize = 10;

/// Number of Mississippian cards shuffled in with each Spanish card.
const LATE_CLUSTER_FILL: usize = 4;

/// A historical era. `Generic` appears only on cards, never on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Era {
    Hopewell,
    Mississippian,
    Spanish,
    Generic,
}

impl Era {
    pub const fn name(self) -> &'static str {
        match self {
            Era::Hopewell => "Hopewell",
            Era::Mississippian => "Mississippian",
            Era::Spanish => "Spanish",
            Era::Generic => "Generic",
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The warpath (or warpaths) a card's modifier applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierTarget {
    Tribe(Tribe),
    All,
}

impl ModifierTarget {
    /// Returns true if this target covers `tribe`'s warpath.
    pub fn covers(self, tribe: Tribe) -> bool {
        match self {
            ModifierTarget::Tribe(t) => t == tribe,
            ModifierTarget::All => true,
        }
    }
}

impl fmt::Display for ModifierTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierTarget::Tribe(t) => t.fmt(f),
            ModifierTarget::All => f.write_str("All"),
        }
    }
}

/// A card's warpath modifier: ascendant tribes are harder to win over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WarpathModifier {
    pub target: ModifierTarget,
    pub is_ascendant: bool,
}

/// An army named in a card's advancing-army list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Army {
    Tribe(Tribe),
    Spanish,
    CaddoOrShawnee,
}

impl fmt::Display for Army {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Army::Tribe(t) => t.fmt(f),
            Army::Spanish => f.write_str("Spanish"),
            Army::CaddoOrShawnee => f.write_str("Caddo or Shawnee"),
        }
    }
}

/// A single history card.
#[derive(Debug, PartialEq, Eq)]
pub struct HistoryCard {
    pub number: u8,
    pub title: &'static str,
    pub era: Era,
    pub action_points: u8,
    /// White cards add their action points outright; black cards use the
    /// trade-goods rule and the resource bonus.
    pub is_white: bool,
    pub resource_bonus: &'static [TradeGood],
    pub revolt: Option<Tribe>,
    pub modifier: Option<WarpathModifier>,
    pub advancing_armies: &'static [Army],
    /// The black-banner (Avaricia) event.
    pub is_avaricia: bool,
    pub is_spanish: bool,
}

impl HistoryCard {
    /// Looks up a card by its printed number.
    pub fn by_number(number: u8) -> Option<&'static HistoryCard> {
        let index = (number as usize).checked_sub(1)?;
        HISTORY_CARDS.get(index)
    }
}

impl fmt::Display for HistoryCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.number, self.title)
    }
}

/// The history deck, top card first. Only numbers of printed cards are
/// accepted, so a saved deck cannot hold a card that does not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct HistoryDeck {
    cards: VecDeque<u8>,
}

impl TryFrom<Vec<u8>> for HistoryDeck {
    type Error = String;

    fn try_from(numbers: Vec<u8>) -> Result<Self, Self::Error> {
        match numbers.iter().find(|n| HistoryCard::by_number(**n).is_none()) {
            Some(n) => Err(format!("no history card numbered {n}")),
            None => Ok(HistoryDeck { cards: numbers.into() }),
        }
    }
}

impl From<HistoryDeck> for Vec<u8> {
    fn from(deck: HistoryDeck) -> Vec<u8> {
        deck.cards.into()
    }
}

impl HistoryDeck {
    /// Builds the deck from three segments: early, mid, and late.
    ///
    /// - early: 10 shuffled Hopewell cards.
    /// - late: two clusters, each one Spanish-era card (black banner first,
    ///   then Spanish contact) shuffled together with 4 Mississippian cards.
    /// - mid: every remaining card, shuffled.
    pub fn assemble<D: Dice>(dice: &mut D) -> Self {
        let numbers_in = |era: Era| -> Vec<u8> {
            HISTORY_CARDS.iter().filter(|c| c.era == era).map(|c| c.number).collect()
        };
        let mut hopewell = numbers_in(Era::Hopewell);
        let mut mississippian = numbers_in(Era::Mississippian);
        let generic = numbers_in(Era::Generic);
        let mut spanish: Vec<&HistoryCard> = HISTORY_CARDS.iter().filter(|c| c.era == Era::Spanish).collect();
        spanish.sort_by_key(|c| (!c.is_avaricia, c.number));

        dice.shuffle(&mut hopewell);
        let early: Vec<u8> = hopewell.drain(..EARLY_SEGMENT_LEN.min(hopewell.len())).collect();

        dice.shuffle(&mut mississippian);
        let mut late = Vec::new();
        for card in spanish {
            let mut cluster = vec![card.number];
            cluster.extend(mississippian.drain(..LATE_CLUSTER_FILL.min(mississippian.len())));
            dice.shuffle(&mut cluster);
            late.extend(cluster);
        }

        let mut mid = hopewell;
        mid.extend(mississippian);
        mid.extend(generic);
        dice.shuffle(&mut mid);

        let mut cards: VecDeque<u8> = early.into();
        cards.extend(mid);
        cards.extend(late);
        HistoryDeck { cards }
    }

    /// Builds a deck with exactly the given cards, top first. Unknown card
    /// numbers are dropped.
    pub fn stacked(numbers: impl IntoIterator<Item = u8>) -> Self {
        let cards = numbers.into_iter().filter(|n| HistoryCard::by_number(*n).is_some()).collect();
        HistoryDeck { cards }
    }

    /// Draws the top card, or `None` if the deck is exhausted.
    pub fn draw(&mut self) -> Option<&'static HistoryCard> {
        let number = self.cards.pop_front()?;
        HistoryCard::by_number(number)
    }

    /// Returns the card numbers remaining, top first.
    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.cards.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

// Short names keep the card table on one line per card.
const HO: Army = Army::Tribe(Tribe::HoChunk);
const SH: Army = Army::Tribe(Tribe::Shawnee);
const CH: Army = Army::Tribe(Tribe::Cherokee);
const NA: Army = Army::Tribe(Tribe::Natchez);
const CA: Army = Army::Tribe(Tribe::Caddo);
const SP: Army = Army::Spanish;
const CS: Army = Army::CaddoOrShawnee;

const fn raised(tribe: Tribe) -> Option<WarpathModifier> {
    Some(WarpathModifier { target: ModifierTarget::Tribe(tribe), is_ascendant: true })
}

const fn lowered(tribe: Tribe) -> Option<WarpathModifier> {
    Some(WarpathModifier { target: ModifierTarget::Tribe(tribe), is_ascendant: false })
}

const ALL_RAISED: Option<WarpathModifier> =
    Some(WarpathModifier { target: ModifierTarget::All, is_ascendant: true });
const ALL_LOWERED: Option<WarpathModifier> =
    Some(WarpathModifier { target: ModifierTarget::All, is_ascendant: false });

#[allow(clippy::too_many_arguments)]
const fn white(
    number: u8,
    title: &'static str,
    era: Era,
    action_points: u8,
    revolt: Option<Tribe>,
    modifier: Option<WarpathModifier>,
    advancing_armies: &'static [Army],
) -> HistoryCard {
    HistoryCard {
        number,
        title,
        era,
        action_points,
        is_white: true,
        resource_bonus: &[],
        revolt,
        modifier,
        advancing_armies,
        is_avaricia: false,
        is_spanish: false,
    }
}

const fn black(
    number: u8,
    title: &'static str,
    action_points: u8,
    resource_bonus: &'static [TradeGood],
    revolt: Option<Tribe>,
    modifier: Option<WarpathModifier>,
    advancing_armies: &'static [Army],
) -> HistoryCard {
    HistoryCard {
        number,
        title,
        era: Era::Generic,
        action_points,
        is_white: false,
        resource_bonus,
        revolt,
        modifier,
        advancing_armies,
        is_avaricia: false,
        is_spanish: false,
    }
}

use self::Era::{Hopewell, Mississippian};
use super::counter::TradeGood::{
    Chalcedony, Chert, Copper, Feathers, Hides, Mica, Obsidian, Pipestone, Seashells,
};
use super::land::Tribe::{Caddo, Cherokee, HoChunk, Natchez, Shawnee};

/// Every history card, in printed order.
pub static HISTORY_CARDS: [HistoryCard; HISTORY_CARD_COUNT] = [
    white(1, "Poverty Point", Hopewell, 1, Some(Caddo), lowered(Caddo), &[]),
    white(2, "Bynum", Hopewell, 3, Some(Natchez), lowered(Natchez), &[]),
    white(3, "Marksville", Hopewell, 4, Some(Caddo), lowered(Caddo), &[]),
    white(4, "Portsmouth", Hopewell, 3, Some(Shawnee), lowered(Shawnee), &[]),
    white(5, "Pinson", Hopewell, 2, Some(Cherokee), lowered(Cherokee), &[]),
    white(6, "Newark", Hopewell, 4, Some(Natchez), lowered(Shawnee), &[]),
    white(7, "Lizard Mound", Hopewell, 3, Some(HoChunk), raised(HoChunk), &[]),
    white(8, "Toltec", Hopewell, 2, Some(Caddo), lowered(Caddo), &[]),
    white(9, "Lake Koshkonong", Hopewell, 4, Some(HoChunk), raised(HoChunk), &[]),
    white(10, "Harlan", Hopewell, 4, Some(Shawnee), lowered(Caddo), &[]),
    white(11, "Dickson", Hopewell, 2, Some(HoChunk), raised(HoChunk), &[]),
    white(12, "Spiro", Hopewell, 3, Some(Cherokee), lowered(Caddo), &[]),
    white(13, "Aztalan", Mississippian, 4, None, lowered(HoChunk), &[CH]),
    white(14, "Ocmulgee", Mississippian, 3, None, raised(Cherokee), &[CA, CH]),
    white(15, "Fort Ancient", Mississippian, 2, None, raised(Shawnee), &[SH]),
    white(16, "Red Wing", Mississippian, 3, None, lowered(HoChunk), &[CH, NA]),
    white(17, "Anhaica", Mississippian, 4, Some(HoChunk), lowered(Cherokee), &[CA]),
    white(18, "Etowah", Mississippian, 2, Some(Natchez), raised(Cherokee), &[CH]),
    white(19, "Moundville", Mississippian, 4, Some(Cherokee), raised(Natchez), &[HO, NA]),
    white(20, "Chucalissa", Mississippian, 2, None, lowered(Natchez), &[CA]),
    white(21, "Angel", Mississippian, 4, None, lowered(Shawnee), &[HO, CH]),
    white(22, "Kincaid", Mississippian, 1, None, raised(Natchez), &[NA, SH]),
    white(23, "Serpent Mound", Mississippian, 3, Some(Caddo), raised(Shawnee), &[NA, SH]),
    white(24, "Bottle Creek", Mississippian, 3, None, lowered(Natchez), &[CA, CH]),
    HistoryCard {
        number: 25,
        title: "Coosa",
        era: Era::Spanish,
        action_points: 4,
        is_white: true,
        resource_bonus: &[],
        revolt: None,
        modifier: raised(Cherokee),
        advancing_armies: &[CH, SH, NA],
        is_avaricia: true,
        is_spanish: false,
    },
    HistoryCard {
        number: 26,
        title: "The Spanish",
        era: Era::Spanish,
        action_points: 0,
        is_white: true,
        resource_bonus: &[],
        revolt: None,
        modifier: None,
        advancing_armies: &[HO, SH, SP],
        is_avaricia: false,
        is_spanish: true,
    },
    black(27, "Chalcedony & Obsidian", 4, &[Chalcedony, Obsidian], None, None, &[CA, CA, NA]),
    black(28, "Pipestone", 4, &[Pipestone], None, None, &[HO, SH]),
    black(29, "Mica & Seashells", 5, &[Mica, Seashells], None, None, &[NA, CH, CH]),
    black(30, "Hides & Feathers", 6, &[Hides, Feathers], None, None, &[CH, CA]),
    black(31, "Chert", 5, &[Chert], None, None, &[NA, SH, CH]),
    black(32, "Copper", 4, &[Copper], None, None, &[HO, HO, SH, CH]),
    black(33, "Tobacco", 3, &[], None, lowered(Cherokee), &[CH, NA]),
    black(34, "Sunflowers", 4, &[], None, lowered(Caddo), &[CA, NA]),
    black(35, "The Three Sisters", 2, &[], None, lowered(Natchez), &[NA, CA]),
    black(36, "Mobilian Jargon", 4, &[], Some(Cherokee), None, &[NA, SH]),
    black(37, "The Chunkey Game", 5, &[], None, None, &[CS]),
    black(38, "Adena Culture", 5, &[], None, None, &[CA, SH, SH, NA]),
    black(39, "Hopewell Culture", 3, &[], None, None, &[SH, HO]),
    black(40, "Mississippian Culture", 4, &[], None, None, &[NA, CH, CH]),
    black(41, "Burial Mounds", 3, &[], Some(Natchez), None, &[HO, HO, CA, CA]),
    black(42, "Platform Mounds", 2, &[], Some(Caddo), None, &[SH, NA, CH]),
    black(43, "Effigy Mounds", 2, &[], None, None, &[HO, HO, SH, SH, CA]),
    black(44, "Pottery", 3, &[], Some(Shawnee), ALL_RAISED, &[NA, CH]),
    black(45, "The Buzzard Cult", 7, &[], None, None, &[CH]),
    black(46, "Wattle & Daub", 3, &[], None, ALL_LOWERED, &[SH, CA]),
    black(47, "Oneota Culture", 6, &[], None, None, &[HO, HO, NA, SH]),
    black(48, "Human Sacrifice", 6, &[], None, ALL_RAISED, &[CH, CH, NA, NA]),
    black(49, "Black Drink", 5, &[], None, ALL_LOWERED, &[CH, CA]),
    black(50, "Cahokia", 1, &[], None, ALL_LOWERED, &[CH]),
];
