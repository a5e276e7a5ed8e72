//! Warpaths, tribes, and the thirty lands of the board.
//!
//! Each of the five tribes owns one warpath of six lands. Position 1 is the
//! land nearest Cahokia and position 6 is the tribal homeland. Lands are
//! stored in a compile-time lookup table indexed by the flat land index
//! `6 * warpath + (position - 1)`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The number of warpaths (one per playable tribe).
pub const WARPATH_COUNT: usize = 5;

/// The number of lands on each warpath.
pub const WARPATH_LENGTH: u8 = 6;

/// The total number of lands on the board.
pub const LAND_COUNT: usize = WARPATH_COUNT * WARPATH_LENGTH as usize;

/// The position of the tribal homeland on every warpath.
pub const HOMELAND: u8 = WARPATH_LENGTH;

/// One of the five tribes whose warpaths converge on Cahokia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tribe {
    HoChunk,
    Shawnee,
    Cherokee,
    Natchez,
    Caddo,
}

/// All five tribes in board order.
pub const ALL_TRIBES: [Tribe; WARPATH_COUNT] = [
    Tribe::HoChunk,
    Tribe::Shawnee,
    Tribe::Cherokee,
    Tribe::Natchez,
    Tribe::Caddo,
];

impl Tribe {
    /// Returns the tribe's name as typed by the player.
    pub const fn name(self) -> &'static str {
        match self {
            Tribe::HoChunk => "HoChunk",
            Tribe::Shawnee => "Shawnee",
            Tribe::Cherokee => "Cherokee",
            Tribe::Natchez => "Natchez",
            Tribe::Caddo => "Caddo",
        }
    }

    /// Returns the tribe owning the warpath with the given index.
    pub fn from_index(index: usize) -> Option<Tribe> {
        ALL_TRIBES.get(index).copied()
    }
}

impl fmt::Display for Tribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Converts a (warpath, position) pair into a flat land index.
///
/// `position` is 1-based; callers are expected to pass 1..=6.
pub const fn to_land_index(tribe: Tribe, position: u8) -> usize {
    WARPATH_LENGTH as usize * tribe as usize + (position as usize - 1)
}

/// Converts a flat land index back into its (warpath, position) pair.
pub fn from_land_index(index: usize) -> Option<(Tribe, u8)> {
    let tribe = Tribe::from_index(index / WARPATH_LENGTH as usize)?;
    let position = (index % WARPATH_LENGTH as usize) as u8 + 1;
    Some((tribe, position))
}

/// A land on the board, identified by its flat index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Land(u8);

impl Land {
    /// Returns the land at `position` on `tribe`'s warpath, if the position is valid.
    pub fn at(tribe: Tribe, position: u8) -> Option<Land> {
        if (1..=WARPATH_LENGTH).contains(&position) {
            Some(Land(to_land_index(tribe, position) as u8))
        } else {
            None
        }
    }

    /// Returns the land nearest Cahokia on `tribe`'s warpath.
    pub const fn innermost(tribe: Tribe) -> Land {
        Land(to_land_index(tribe, 1) as u8)
    }

    /// Returns the tribal homeland of `tribe`.
    pub const fn homeland(tribe: Tribe) -> Land {
        Land(to_land_index(tribe, HOMELAND) as u8)
    }

    /// Returns the land with the given flat index.
    pub fn from_index(index: usize) -> Option<Land> {
        if index < LAND_COUNT {
            Some(Land(index as u8))
        } else {
            None
        }
    }

    /// Iterates over every land in index order.
    pub fn all() -> impl Iterator<Item = Land> {
        (0..LAND_COUNT as u8).map(Land)
    }

    /// Returns the flat index of this land.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the tribe whose warpath this land lies on.
    pub const fn tribe(self) -> Tribe {
        ALL_TRIBES[self.0 as usize / WARPATH_LENGTH as usize]
    }

    /// Returns the 1-based position of this land on its warpath.
    pub const fn position(self) -> u8 {
        self.0 % WARPATH_LENGTH + 1
    }

    /// Returns the display name of this land.
    pub fn name(self) -> &'static str {
        LAND_INFO[self.0 as usize].name
    }

    /// Returns true if no chiefdom can ever occupy this land.
    pub fn is_wilderness(self) -> bool {
        LAND_INFO[self.0 as usize].is_wilderness
    }

    /// Returns true if this land is its tribe's homeland.
    pub const fn is_homeland(self) -> bool {
        self.position() == HOMELAND
    }

    /// Returns the next land out along the same warpath, away from Cahokia.
    pub fn outward(self) -> Option<Land> {
        Land::at(self.tribe(), self.position() + 1)
    }
}

impl fmt::Display for Land {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name(), self.tribe(), self.position())
    }
}

impl TryFrom<u8> for Land {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Land::from_index(index as usize).ok_or_else(|| format!("land index {index} out of range"))
    }
}

impl From<Land> for u8 {
    fn from(land: Land) -> u8 {
        land.0
    }
}

/// Static metadata for a land.
pub struct LandInfo {
    pub name: &'static str,
    pub is_wilderness: bool,
}

/// Compile-time lookup table: index by `Land::index()`.
pub static LAND_INFO: [LandInfo; LAND_COUNT] = [
    // Ho-Chunk warpath
    LandInfo { name: "Dickson", is_wilderness: false },
    LandInfo { name: "Lake Koshkonong", is_wilderness: false },
    LandInfo { name: "Adtalan", is_wilderness: false },
    LandInfo { name: "Lizard Mound", is_wilderness: false },
    LandInfo { name: "Red Wing", is_wilderness: true },
    LandInfo { name: "Ho-Chunk Homeland", is_wilderness: false },
    // Shawnee warpath
    LandInfo { name: "Angel", is_wilderness: false },
    LandInfo { name: "Fort Ancient", is_wilderness: false },
    LandInfo { name: "Portsmouth", is_wilderness: false },
    LandInfo { name: "Serpent Mound", is_wilderness: true },
    LandInfo { name: "Newark", is_wilderness: false },
    LandInfo { name: "Shawnee Homeland", is_wilderness: false },
    // Cherokee warpath
    LandInfo { name: "Pinson", is_wilderness: false },
    LandInfo { name: "Coosa", is_wilderness: true },
    LandInfo { name: "Etowah", is_wilderness: false },
    LandInfo { name: "Ocmulgee", is_wilderness: false },
    LandInfo { name: "Anhaica", is_wilderness: false },
    LandInfo { name: "Cherokee Homeland", is_wilderness: false },
    // Natchez warpath
    LandInfo { name: "Kincaid", is_wilderness: false },
    LandInfo { name: "Chucalissa", is_wilderness: false },
    LandInfo { name: "Bynum", is_wilderness: true },
    LandInfo { name: "Moundville", is_wilderness: false },
    LandInfo { name: "Bottle Creek", is_wilderness: false },
    LandInfo { name: "Natchez Homeland", is_wilderness: false },
    // Caddo warpath
    LandInfo { name: "Toltec", is_wilderness: false },
    LandInfo { name: "Poverty Point", is_wilderness: true },
    LandInfo { name: "Marksville", is_wilderness: false },
    LandInfo { name: "Spiro", is_wilderness: false },
    LandInfo { name: "Harlan", is_wilderness: false },
    LandInfo { name: "Caddo Homeland", is_wilderness: false },
];
