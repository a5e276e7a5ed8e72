//! Game driver.
//!
//! A `Game` owns every piece of mutable state for one game and serves
//! requests: each call to `handle_request` runs the phase state machine
//! from the current suspension point to the next one, which is either a
//! prompt for player input or the end of the program.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::board::action::ActionKind;
use crate::board::card::{Army, HistoryDeck};
use crate::board::counter::Cup;
use crate::board::land::{Tribe, ALL_TRIBES};
use crate::board::state::Board;
use crate::config::ConfigError;
use crate::dice::{Dice, SeededDice};
use crate::event_log::EventLog;
use crate::resolve::action::WARPATH_ACTIONS;
use crate::resolve::phase::PhaseState;

/// Fatal conditions that stop a game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),
}

/// What the game is waiting for: a prompt and an optional error to show
/// before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub prompt: String,
    pub error: Option<String>,
}

/// One warpath action as offered on one warpath.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Affordance {
    pub token: &'static str,
    pub abbr: &'static str,
    pub description: &'static str,
    pub enabled: bool,
    /// What the action would cost now, or `None` when it has no target to
    /// price.
    pub cost: Option<u32>,
}

/// The warpath actions offered on one tribe's warpath.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarpathActions {
    pub tribe: Tribe,
    pub actions: Vec<Affordance>,
}

/// Front-end view of a game between requests.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub board: &'a Board,
    pub prompt: Option<&'a str>,
    pub error: Option<&'a str>,
    pub warpath_actions: Vec<WarpathActions>,
}

/// A single game and everything it needs to resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game<D = SeededDice> {
    pub(crate) board: Board,
    pub(crate) history_deck: HistoryDeck,
    pub(crate) cup: Cup,
    pub(crate) state: PhaseState,
    pub(crate) advancing_armies: VecDeque<Army>,
    pub(crate) revolting_tribe: Option<Tribe>,
    pub(crate) log: EventLog,
    pub(crate) input: String,
    pub(crate) error: Option<String>,
    pub(crate) response: Option<Response>,
    pub(crate) dice: D,
}

impl<D: Dice> Game<D> {
    /// Creates a game with a freshly assembled history deck and a filled
    /// cup. The deck is shuffled before the cup.
    pub fn new(mut dice: D) -> Self {
        let history_deck = HistoryDeck::assemble(&mut dice);
        Game::with_history_deck(dice, history_deck)
    }

    /// Creates a game that will draw history cards from `history_deck`.
    pub fn with_history_deck(mut dice: D, history_deck: HistoryDeck) -> Self {
        let cup = Cup::filled(&mut dice);
        Game {
            board: Board::new(),
            history_deck,
            cup,
            state: PhaseState::StartOfGame,
            advancing_armies: VecDeque::new(),
            revolting_tribe: None,
            log: EventLog::new(),
            input: String::new(),
            error: None,
            response: None,
            dice,
        }
    }

    /// Runs setup and the first turn up to the first prompt.
    pub fn start(&mut self) -> Result<(), EngineError> {
        self.handle_request("")
    }

    /// Feeds one line of player input and runs to the next suspension.
    /// Does nothing once the program has ended.
    pub fn handle_request(&mut self, input: &str) -> Result<(), EngineError> {
        self.input = input.to_string();
        self.response = None;
        while self.state != PhaseState::EndProgram {
            tracing::trace!(state = ?self.state, "step");
            self.state = self.step(self.state.clone())?;
            if self.response.is_some() {
                break;
            }
        }
        Ok(())
    }

    pub(crate) fn respond(&mut self, prompt: impl Into<String>) {
        let error = self.error.take();
        self.response = Some(Response { prompt: prompt.into(), error });
    }

    /// For each warpath, the warpath actions and whether each is legal
    /// right now. Never changes the game.
    pub fn available_warpath_actions(&self) -> Vec<WarpathActions> {
        ALL_TRIBES
            .iter()
            .map(|&tribe| WarpathActions {
                tribe,
                actions: WARPATH_ACTIONS
                    .iter()
                    .map(|action| {
                        let spec = action.kind().spec();
                        Affordance {
                            token: spec.token,
                            abbr: spec.abbr,
                            description: spec.description,
                            enabled: action.is_enabled_on_warpath(&self.board, tribe),
                            cost: action.cost_on_warpath(&self.board, tribe).ok(),
                        }
                    })
                    .collect(),
            })
            .collect()
    }

    /// Returns true if `kind` can be taken on `tribe`'s warpath right now.
    pub fn is_enabled_on_warpath(&self, kind: ActionKind, tribe: Tribe) -> bool {
        kind.as_warpath_action()
            .map_or(false, |action| action.is_enabled_on_warpath(&self.board, tribe))
    }
}

impl<D> Game<D> {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn dice(&self) -> &D {
        &self.dice
    }

    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    pub fn state(&self) -> &PhaseState {
        &self.state
    }

    pub fn history_deck(&self) -> &HistoryDeck {
        &self.history_deck
    }

    pub fn cup(&self) -> &Cup {
        &self.cup
    }

    /// The pending prompt, or `None` once the program has ended.
    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.state == PhaseState::EndProgram
    }
}

impl<D: Dice> Game<D> {
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            board: &self.board,
            prompt: self.response.as_ref().map(|r| r.prompt.as_str()),
            error: self.response.as_ref().and_then(|r| r.error.as_deref()),
            warpath_actions: self.available_warpath_actions(),
        }
    }
}

impl<D: Serialize + DeserializeOwned> Game<D> {
    /// Writes the whole game as JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })
    }

    /// Reads a game written by `save`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    #[test]
    fn new_game_waits_for_start() {
        let game = Game::new(SeededDice::new(3));
        assert_eq!(game.state(), &PhaseState::StartOfGame);
        assert_eq!(game.history_deck().len(), 50);
        assert_eq!(game.cup().len(), 25);
        assert!(game.response().is_none());
        assert!(!game.is_over());
    }

    #[test]
    fn preview_on_fresh_board() {
        let mut game = Game::with_history_deck(ScriptedDice::new([2]), HistoryDeck::stacked([1]));
        game.start().unwrap();
        let preview = game.available_warpath_actions();
        assert_eq!(preview.len(), 5);
        for warpath in &preview {
            let tokens: Vec<&str> = warpath.actions.iter().map(|a| a.token).collect();
            assert_eq!(tokens, vec!["ppa", "inc"]);
            // Every innermost land holds an uncontrolled chiefdom after setup.
            assert!(!warpath.actions[0].enabled);
            assert!(warpath.actions[1].enabled);
            assert_eq!(warpath.actions[0].cost, Some(1));
            assert_eq!(warpath.actions[1].cost, Some(1));
        }
        assert!(game.is_enabled_on_warpath(ActionKind::Incorporate, Tribe::Natchez));
        assert!(!game.is_enabled_on_warpath(ActionKind::Build, Tribe::Natchez));
    }

    #[test]
    fn snapshot_serializes() {
        let mut game = Game::with_history_deck(ScriptedDice::new([2]), HistoryDeck::stacked([1]));
        game.start().unwrap();
        let value = serde_json::to_value(game.snapshot()).unwrap();
        assert_eq!(value["prompt"], "[1 APs] Enter action");
        assert!(value["error"].is_null());
        assert_eq!(value["warpath_actions"].as_array().map(Vec::len), Some(5));
        assert_eq!(value["board"]["turn"], 1);
    }

    #[test]
    fn saved_game_with_unknown_card_does_not_load() {
        let mut game = Game::with_history_deck(ScriptedDice::new([2]), HistoryDeck::stacked([1, 2]));
        game.start().unwrap();
        let mut value = serde_json::to_value(&game).unwrap();
        assert_eq!(value["history_deck"], serde_json::json!([2]));
        value["history_deck"] = serde_json::json!([2, 77]);
        assert!(serde_json::from_value::<Game<ScriptedDice>>(value).is_err());
    }

    #[test]
    fn handle_request_after_end_is_a_no_op() {
        let mut game = Game::with_history_deck(ScriptedDice::default(), HistoryDeck::stacked([]));
        game.start().unwrap();
        assert!(game.is_over());
        let lines = game.log().len();
        game.handle_request("ppa hoc").unwrap();
        assert!(game.is_over());
        assert!(game.response().is_none());
        assert_eq!(game.log().len(), lines);
    }
}
