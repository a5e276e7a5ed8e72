//! The board aggregate.
//!
//! Holds everything that changes during a game: the turn and era, action
//! points, chiefdoms, hostile markers, peace pipes, the palisade, and the
//! warpath status derived from the active history card. Lands index the
//! fixed-size arrays by `Land::index()`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::card::{Era, HistoryCard, ModifierTarget};
use super::counter::{Chiefdom, TradeGood};
use super::land::{Land, Tribe, ALL_TRIBES, HOMELAND, LAND_COUNT, WARPATH_COUNT, WARPATH_LENGTH};

/// A segment of the Cahokia palisade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PalisadeSegment {
    pub label: &'static str,
    pub value: u8,
}

/// Palisade segments, outermost first.
pub static PALISADE: [PalisadeSegment; 6] = [
    PalisadeSegment { label: "4F", value: 4 },
    PalisadeSegment { label: "4E", value: 4 },
    PalisadeSegment { label: "4D", value: 4 },
    PalisadeSegment { label: "3C", value: 3 },
    PalisadeSegment { label: "3B", value: 3 },
    PalisadeSegment { label: "2A", value: 2 },
];

/// Starting battle values of the hostile armies, in board order.
const HOSTILE_BATTLE_VALUES: [u8; WARPATH_COUNT] = [4, 3, 2, 2, 3];

/// A hostile army marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostileMarker {
    pub land: Land,
    pub battle_value: u8,
}

/// The per-turn dice modifier set by the active card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarpathStatus {
    pub target: Option<ModifierTarget>,
    pub modifier: i8,
}

impl WarpathStatus {
    /// Derives the status from a card: +1 if ascendant, -1 otherwise, and
    /// no status at all when the card has no modifier.
    pub fn from_card(card: &HistoryCard) -> Self {
        match card.modifier {
            Some(m) => WarpathStatus {
                target: Some(m.target),
                modifier: if m.is_ascendant { 1 } else { -1 },
            },
            None => WarpathStatus::default(),
        }
    }

    /// The modifier that applies to rolls on `tribe`'s warpath.
    pub fn modifier_for(&self, tribe: Tribe) -> i8 {
        match self.target {
            Some(target) if target.covers(tribe) => self.modifier,
            _ => 0,
        }
    }
}

impl fmt::Display for WarpathStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            Some(target) => {
                let sign = if self.modifier < 0 { '-' } else { '+' };
                write!(f, "{} {} {}", target, sign, self.modifier.unsigned_abs())
            }
            None => f.write_str("None"),
        }
    }
}

/// Complete mutable game board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub turn: u32,
    pub current_era: Era,
    /// Number of the active history card.
    pub card: Option<u8>,
    pub action_points: u32,
    pub trade_goods: u32,
    pub palisade_index: usize,
    pub is_breached: bool,
    pub chiefdoms: [Option<Chiefdom>; LAND_COUNT],
    pub hostiles: [HostileMarker; WARPATH_COUNT],
    /// The Spanish army, once it has landed.
    pub spanish: Option<HostileMarker>,
    pub peace_pipes: [bool; LAND_COUNT],
    pub warpath_status: WarpathStatus,
}

impl Board {
    /// Creates the starting board: Hopewell era, no chiefdoms, hostiles on
    /// their homelands.
    pub fn new() -> Self {
        let hostiles = ALL_TRIBES.map(|tribe| HostileMarker {
            land: Land::homeland(tribe),
            battle_value: HOSTILE_BATTLE_VALUES[tribe as usize],
        });
        Board {
            turn: 0,
            current_era: Era::Hopewell,
            card: None,
            action_points: 0,
            trade_goods: 0,
            palisade_index: 0,
            is_breached: false,
            chiefdoms: [None; LAND_COUNT],
            hostiles,
            spanish: None,
            peace_pipes: [false; LAND_COUNT],
            warpath_status: WarpathStatus::default(),
        }
    }

    /// The active history card.
    pub fn card(&self) -> Option<&'static HistoryCard> {
        self.card.and_then(HistoryCard::by_number)
    }

    pub fn land(&self, tribe: Tribe, position: u8) -> Option<Land> {
        Land::at(tribe, position)
    }

    pub fn chiefdom(&self, tribe: Tribe, position: u8) -> Option<&Chiefdom> {
        self.chiefdom_at(Land::at(tribe, position)?)
    }

    pub fn chiefdom_at(&self, land: Land) -> Option<&Chiefdom> {
        self.chiefdoms[land.index()].as_ref()
    }

    pub fn chiefdom_at_mut(&mut self, land: Land) -> Option<&mut Chiefdom> {
        self.chiefdoms[land.index()].as_mut()
    }

    /// Puts a chiefdom on its land, replacing anything already there.
    pub fn place_chiefdom(&mut self, chiefdom: Chiefdom) {
        self.chiefdoms[chiefdom.land.index()] = Some(chiefdom);
    }

    pub fn hostile(&self, tribe: Tribe) -> &HostileMarker {
        &self.hostiles[tribe as usize]
    }

    /// The hostile army standing on `land`, if any.
    pub fn hostile_at(&self, land: Land) -> Option<&HostileMarker> {
        self.hostiles
            .iter()
            .chain(self.spanish.as_ref())
            .find(|h| h.land == land)
    }

    /// Moves `tribe`'s hostile marker one land in the direction of `step`.
    /// Positive steps move outward toward the homeland. The marker stays on
    /// its warpath.
    pub fn move_hostile(&mut self, tribe: Tribe, step: i32) {
        if step == 0 {
            return;
        }
        let marker = &mut self.hostiles[tribe as usize];
        let position = (marker.land.position() as i32 + step.signum()).clamp(1, WARPATH_LENGTH as i32) as u8;
        if let Some(land) = Land::at(tribe, position) {
            marker.land = land;
        }
    }

    /// The land holding `tribe`'s peace pipe, if one has been placed.
    /// Homelands never hold a pipe.
    pub fn peace_pipe(&self, tribe: Tribe) -> Option<Land> {
        (1..HOMELAND)
            .filter_map(|p| Land::at(tribe, p))
            .find(|land| self.peace_pipes[land.index()])
    }

    /// Returns true if any chiefdom on the board produces `good`.
    pub fn has_good(&self, good: TradeGood) -> bool {
        self.chiefdoms.iter().flatten().any(|c| c.good() == good)
    }

    pub fn palisade(&self) -> &'static PalisadeSegment {
        &PALISADE[self.palisade_index.min(PALISADE.len() - 1)]
    }

    pub fn chiefdom_count(&self) -> usize {
        self.chiefdoms.iter().flatten().count()
    }

    pub fn controlled_count(&self) -> usize {
        self.chiefdoms.iter().flatten().filter(|c| c.is_controlled).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::counter::CounterId;

    #[test]
    fn starting_board() {
        let board = Board::new();
        assert_eq!(board.current_era, Era::Hopewell);
        assert_eq!(board.chiefdom_count(), 0);
        assert_eq!(board.palisade().label, "4F");
        assert_eq!(board.palisade().value, 4);
        for tribe in ALL_TRIBES {
            assert_eq!(board.hostile(tribe).land, Land::homeland(tribe));
            assert_eq!(board.peace_pipe(tribe), None);
        }
        assert_eq!(board.hostile(Tribe::HoChunk).battle_value, 4);
        assert_eq!(board.hostile(Tribe::Cherokee).battle_value, 2);
        assert!(board.spanish.is_none());
    }

    #[test]
    fn move_hostile_steps_one_land_and_clamps() {
        let mut board = Board::new();
        board.move_hostile(Tribe::Natchez, 1);
        assert_eq!(board.hostile(Tribe::Natchez).land.position(), 6);
        board.move_hostile(Tribe::Natchez, -3);
        assert_eq!(board.hostile(Tribe::Natchez).land.position(), 5);
        board.move_hostile(Tribe::Natchez, 0);
        assert_eq!(board.hostile(Tribe::Natchez).land.position(), 5);
        for _ in 0..10 {
            board.move_hostile(Tribe::Natchez, -10);
        }
        assert_eq!(board.hostile(Tribe::Natchez).land.position(), 1);
        assert_eq!(board.hostile(Tribe::Natchez).land.tribe(), Tribe::Natchez);
        assert_eq!(
            board.hostile_at(Land::innermost(Tribe::Natchez)).map(|h| h.battle_value),
            Some(2)
        );
        board.move_hostile(Tribe::Natchez, 4);
        assert_eq!(board.hostile(Tribe::Natchez).land.position(), 2);
    }

    #[test]
    fn peace_pipe_lookup() {
        let mut board = Board::new();
        let land = Land::at(Tribe::Shawnee, 3).unwrap();
        board.peace_pipes[land.index()] = true;
        assert_eq!(board.peace_pipe(Tribe::Shawnee), Some(land));
        assert_eq!(board.peace_pipe(Tribe::Caddo), None);
    }

    #[test]
    fn goods_on_board() {
        let mut board = Board::new();
        let land = Land::innermost(Tribe::Cherokee);
        board.place_chiefdom(Chiefdom::new(CounterId::try_from(23).unwrap(), land));
        assert!(board.has_good(TradeGood::Seashells));
        assert!(!board.has_good(TradeGood::Obsidian));
        assert_eq!(board.chiefdom(Tribe::Cherokee, 1).map(|c| c.value()), Some(3));
    }

    #[test]
    fn warpath_status_from_cards() {
        let poverty_point = HistoryCard::by_number(1).unwrap();
        let status = WarpathStatus::from_card(poverty_point);
        assert_eq!(status.to_string(), "Caddo - 1");
        assert_eq!(status.modifier_for(Tribe::Caddo), -1);
        assert_eq!(status.modifier_for(Tribe::Shawnee), 0);

        let human_sacrifice = HistoryCard::by_number(48).unwrap();
        let status = WarpathStatus::from_card(human_sacrifice);
        assert_eq!(status.to_string(), "All + 1");
        for tribe in ALL_TRIBES {
            assert_eq!(status.modifier_for(tribe), 1);
        }

        let none = WarpathStatus::from_card(HistoryCard::by_number(37).unwrap());
        assert_eq!(none.to_string(), "None");
        assert_eq!(none.modifier_for(Tribe::HoChunk), 0);
    }

    #[test]
    fn board_round_trips_through_json() {
        let mut board = Board::new();
        board.place_chiefdom(Chiefdom::new(CounterId::try_from(3).unwrap(), Land::innermost(Tribe::Caddo)));
        board.peace_pipes[Land::innermost(Tribe::Caddo).index()] = true;
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
