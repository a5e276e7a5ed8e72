//! Player command parser.
//!
//! A command is an action token followed by an optional target, for example
//! `inc hoc`, `mnd lake k`, or `qui`. The action token must match a catalog
//! token exactly (case-insensitive). Targets are resolved by unique
//! case-insensitive prefix.

use crate::board::action::{ActionKind, Enemy, Target, TargetKind};
use crate::board::land::{Land, Tribe, ALL_TRIBES};

/// Errors that can occur while parsing a player command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown action: {0:?}")]
    UnknownAction(String),

    #[error("The {0} action requires a target.")]
    MissingTarget(&'static str),

    #[error("{token:?} doesn't match {kind}.")]
    NoMatch { token: String, kind: &'static str },

    #[error("{token:?} matches more than one {what}.")]
    Ambiguous { token: String, what: &'static str },

    #[error("{0:?} doesn't match a warpath.")]
    NotWarpath(String),
}

/// Parses a command line into an action kind and its resolved target.
pub fn parse_action(input: &str) -> Result<(ActionKind, Target), ParseError> {
    let mut tokens = input.split_whitespace();
    let token = tokens.next().unwrap_or("").to_lowercase();
    let kind = ActionKind::from_token(&token).ok_or(ParseError::UnknownAction(token))?;
    let spec = kind.spec();

    let rest: Vec<&str> = tokens.collect();
    if rest.is_empty() && spec.target != TargetKind::None {
        return Err(ParseError::MissingTarget(spec.description));
    }
    let target = rest.join(" ").to_lowercase();

    let target = match spec.target {
        TargetKind::None => Target::None,
        TargetKind::Warpath => Target::Warpath(find_warpath(&target)?),
        TargetKind::Land => Target::Land(find_land(&target)?),
        TargetKind::Enemy => Target::Enemy(find_enemy(&target)?),
    };
    Ok((kind, target))
}

fn enemy_name(enemy: Enemy) -> &'static str {
    match enemy {
        Enemy::Tribe(t) => t.name(),
        Enemy::Spanish => "Spanish",
    }
}

/// Finds a tribe or the Spanish by unique prefix.
pub fn find_enemy(token: &str) -> Result<Enemy, ParseError> {
    let enemies = ALL_TRIBES.iter().map(|&t| Enemy::Tribe(t)).chain([Enemy::Spanish]);
    let found: Vec<Enemy> = enemies
        .filter(|e| enemy_name(*e).to_lowercase().starts_with(token))
        .collect();
    match found.as_slice() {
        [] => Err(ParseError::NoMatch { token: token.to_string(), kind: "an enemy" }),
        [enemy] => Ok(*enemy),
        _ => Err(ParseError::Ambiguous { token: token.to_string(), what: "tribe" }),
    }
}

/// Finds one of the five warpath tribes by unique prefix.
pub fn find_warpath(token: &str) -> Result<Tribe, ParseError> {
    match find_enemy(token) {
        Ok(Enemy::Tribe(tribe)) => Ok(tribe),
        Ok(Enemy::Spanish) => Err(ParseError::NotWarpath(token.to_string())),
        Err(ParseError::NoMatch { token, .. }) => Err(ParseError::NotWarpath(token)),
        Err(e) => Err(e),
    }
}

/// Finds a land by unique prefix of its name.
pub fn find_land(token: &str) -> Result<Land, ParseError> {
    let found: Vec<Land> = Land::all()
        .filter(|land| land.name().to_lowercase().starts_with(token))
        .collect();
    match found.as_slice() {
        [] => Err(ParseError::NoMatch { token: token.to_string(), kind: "a land" }),
        [land] => Ok(*land),
        _ => Err(ParseError::Ambiguous { token: token.to_string(), what: "land" }),
    }
}
