//! Board representation and static game data.
//!
//! Contains the land table, chiefdom counters, history cards, the action
//! catalog, and the mutable board aggregate.

pub mod action;
pub mod card;
pub mod counter;
pub mod land;
pub mod state;

pub use action::{Action, ActionKind, ActionSpec, CostKind, Enemy, Target, TargetKind, ACTIONS};
pub use card::{Army, Era, HistoryCard, HistoryDeck, ModifierTarget, WarpathModifier, HISTORY_CARDS};
pub use counter::{Chiefdom, ChiefdomCounter, CounterId, Cup, TradeGood, CHIEFDOM_COUNTERS};
pub use land::{
    from_land_index, to_land_index, Land, Tribe, ALL_TRIBES, HOMELAND, LAND_COUNT, LAND_INFO,
    WARPATH_COUNT, WARPATH_LENGTH,
};
pub use state::{Board, HostileMarker, PalisadeSegment, WarpathStatus, PALISADE};
