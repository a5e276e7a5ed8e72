//! Player command handling.
//!
//! Turns a line of player input into a catalog action and a resolved target.

pub mod parser;

pub use parser::{find_enemy, find_land, find_warpath, parse_action, ParseError};
