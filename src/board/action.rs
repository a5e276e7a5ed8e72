//! The action catalog.
//!
//! Each player action has a short command token, a label, the kind of
//! target it takes, and how its cost is computed.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::land::{Land, Tribe};

/// The eight player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    PeacePipe,
    Incorporate,
    Build,
    Fortify,
    Attack,
    Repair,
    Powwow,
    Quit,
}

/// What an action is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    None,
    Warpath,
    Land,
    Enemy,
}

/// How an action's cost is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostKind {
    Fixed(u32),
    /// The face value of the chiefdom on the target land.
    ChiefdomValue,
    /// The value of the current palisade segment.
    PalisadeValue,
}

/// Static description of one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    pub kind: ActionKind,
    pub token: &'static str,
    pub abbr: &'static str,
    pub description: &'static str,
    pub target: TargetKind,
    pub cost: CostKind,
}

/// The action catalog, in menu order.
pub static ACTIONS: [ActionSpec; 8] = [
    ActionSpec {
        kind: ActionKind::PeacePipe,
        token: "ppa",
        abbr: "Peace Pipe",
        description: "Unopposed Peace Pipe advance",
        target: TargetKind::Warpath,
        cost: CostKind::Fixed(1),
    },
    ActionSpec {
        kind: ActionKind::Incorporate,
        token: "inc",
        abbr: "Incorporate",
        description: "Incorporate a Chiefdom",
        target: TargetKind::Warpath,
        cost: CostKind::Fixed(1),
    },
    ActionSpec {
        kind: ActionKind::Build,
        token: "mnd",
        abbr: "Mound",
        description: "Build a Mound",
        target: TargetKind::Land,
        cost: CostKind::ChiefdomValue,
    },
    ActionSpec {
        kind: ActionKind::Fortify,
        token: "frt",
        abbr: "Fortify",
        description: "Fortify Cahokia",
        target: TargetKind::None,
        cost: CostKind::Fixed(2),
    },
    ActionSpec {
        kind: ActionKind::Attack,
        token: "att",
        abbr: "Attack",
        description: "Attack Hostile Army",
        target: TargetKind::Enemy,
        cost: CostKind::Fixed(1),
    },
    ActionSpec {
        kind: ActionKind::Repair,
        token: "rep",
        abbr: "Repair",
        description: "Repair Breach",
        target: TargetKind::None,
        cost: CostKind::PalisadeValue,
    },
    ActionSpec {
        kind: ActionKind::Powwow,
        token: "pow",
        abbr: "Powwow",
        description: "Powwow",
        target: TargetKind::Warpath,
        cost: CostKind::Fixed(2),
    },
    ActionSpec {
        kind: ActionKind::Quit,
        token: "qui",
        abbr: "Quit",
        description: "Quit the Game",
        target: TargetKind::None,
        cost: CostKind::Fixed(0),
    },
];

impl ActionKind {
    pub fn spec(self) -> &'static ActionSpec {
        &ACTIONS[self as usize]
    }

    /// Looks up an action by its command token (exact, lowercase).
    pub fn from_token(token: &str) -> Option<ActionKind> {
        ACTIONS.iter().find(|a| a.token == token).map(|a| a.kind)
    }
}

/// Something an attack can be aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Enemy {
    Tribe(Tribe),
    Spanish,
}

impl fmt::Display for Enemy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Enemy::Tribe(t) => t.fmt(f),
            Enemy::Spanish => f.write_str("Spanish"),
        }
    }
}

/// A resolved action target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    None,
    Warpath(Tribe),
    Land(Land),
    Enemy(Enemy),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::None => f.write_str("None"),
            Target::Warpath(t) => t.fmt(f),
            Target::Land(l) => l.fmt(f),
            Target::Enemy(e) => e.fmt(f),
        }
    }
}

/// A validated, costed action ready to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub target: Target,
    pub cost: u32,
}

impl Action {
    pub fn spec(&self) -> &'static ActionSpec {
        self.kind.spec()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            Target::None => f.write_str(self.spec().description),
            target => write!(f, "{}: {}", self.spec().description, target),
        }
    }
}
