//! Mound Builders turn engine.
//!
//! Exposes the board model, command parser, phase driver, and batch play
//! for use by integration tests and the binary entry points.

pub mod autoplay;
pub mod board;
pub mod config;
pub mod dice;
pub mod engine;
pub mod event_log;
pub mod protocol;
pub mod resolve;

pub use dice::{Dice, ScriptedDice, SeededDice};
pub use engine::{EngineError, Game, Response};
