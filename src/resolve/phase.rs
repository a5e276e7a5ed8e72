//! Turn-phase sequencing.
//!
//! Each `PhaseState` does its work in `Game::step` and returns the state
//! to run next. States that need player input set a response, which makes
//! the driver loop in `Game::handle_request` suspend.
//!
//! Turn flow:
//! - StartOfTurn -> HistoryPhase -> EconomicPhase (or a special event)
//! - HostilesPhase -> AdvanceHostile (once per army) -> RevoltPhase
//! - ActionPhase -> GetNextAction <-> ProcessAction / ResolveAction
//! - EndOfTurnPhase -> StartOfTurn

use serde::{Deserialize, Serialize};

use super::action::{prepare_action, ActionError, Resolver};
use crate::board::action::{Action, ActionKind};
use crate::board::card::Era;
use crate::board::counter::Chiefdom;
use crate::board::land::{Land, ALL_TRIBES};
use crate::board::state::WarpathStatus;
use crate::dice::Dice;
use crate::engine::{EngineError, Game};
use crate::protocol::parser::parse_action;

/// A point in the turn sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseState {
    StartOfGame,
    StartOfTurn,
    HistoryPhase,
    EconomicPhase,
    BlackBannerEvent,
    SpanishEvent,
    HostilesPhase,
    AdvanceHostile,
    RevoltPhase,
    ActionPhase,
    GetNextAction,
    ProcessAction,
    ResolveAction(Action),
    VerifyQuit,
    EndOfTurnPhase,
    EndOfGame,
    EndProgram,
}

impl PhaseState {
    /// Returns true if the game is suspended here waiting for player input.
    pub fn awaits_input(&self) -> bool {
        matches!(self, PhaseState::ProcessAction | PhaseState::VerifyQuit)
    }
}

impl<D: Dice> Game<D> {
    /// Runs one state and returns the next.
    pub(crate) fn step(&mut self, state: PhaseState) -> Result<PhaseState, EngineError> {
        let next = match state {
            PhaseState::StartOfGame => self.start_of_game(),
            PhaseState::StartOfTurn => {
                self.board.turn += 1;
                self.log.phase(format!("Turn {}:", self.board.turn));
                PhaseState::HistoryPhase
            }
            PhaseState::HistoryPhase => self.history_phase(),
            PhaseState::EconomicPhase => self.economic_phase(),
            PhaseState::BlackBannerEvent => return Err(EngineError::Unimplemented("The black banner event")),
            PhaseState::SpanishEvent => return Err(EngineError::Unimplemented("The Spanish event")),
            PhaseState::HostilesPhase => self.hostiles_phase(),
            PhaseState::AdvanceHostile => match self.advancing_armies.pop_front() {
                Some(army) => {
                    self.log.event(format!("{} army advance deferred.", army));
                    PhaseState::AdvanceHostile
                }
                None => {
                    self.log.event("No advancing armies.");
                    PhaseState::RevoltPhase
                }
            },
            PhaseState::RevoltPhase => {
                self.revolt_phase();
                PhaseState::ActionPhase
            }
            PhaseState::ActionPhase => {
                self.log.phase("Action Phase:");
                PhaseState::GetNextAction
            }
            PhaseState::GetNextAction => {
                if self.board.action_points < 1 {
                    PhaseState::EndOfTurnPhase
                } else {
                    self.respond(format!("[{} APs] Enter action", self.board.action_points));
                    PhaseState::ProcessAction
                }
            }
            PhaseState::ProcessAction => self.process_action(),
            PhaseState::ResolveAction(action) => self.resolve_action(action),
            PhaseState::VerifyQuit => {
                if self.input.trim().eq_ignore_ascii_case("y") {
                    PhaseState::EndOfGame
                } else {
                    PhaseState::GetNextAction
                }
            }
            PhaseState::EndOfTurnPhase => {
                self.log.phase("End of Turn Phase:");
                PhaseState::StartOfTurn
            }
            PhaseState::EndOfGame => {
                self.log.phase("Game over.");
                PhaseState::EndProgram
            }
            PhaseState::EndProgram => PhaseState::EndProgram,
        };
        Ok(next)
    }

    fn start_of_game(&mut self) -> PhaseState {
        self.log.phase("Setup:");
        for tribe in ALL_TRIBES {
            let land = Land::innermost(tribe);
            let Some(counter) = self.cup.draw() else {
                break;
            };
            let chiefdom = Chiefdom::new(counter, land);
            self.board.place_chiefdom(chiefdom);
            self.log.event(format!("Land {}: {}", land, chiefdom));
        }
        PhaseState::StartOfTurn
    }

    fn history_phase(&mut self) -> PhaseState {
        self.log.phase("History Phase:");
        let Some(card) = self.history_deck.draw() else {
            self.board.card = None;
            self.log.event("The history deck is exhausted.");
            return PhaseState::EndOfGame;
        };
        self.board.card = Some(card.number);
        self.log.event(format!("Drew {}", card));

        if card.era != Era::Generic && card.era > self.board.current_era {
            self.board.current_era = card.era;
            self.log.event(format!("The {} era begins.", card.era));
        }

        if card.is_avaricia {
            PhaseState::BlackBannerEvent
        } else if card.is_spanish {
            PhaseState::SpanishEvent
        } else {
            PhaseState::EconomicPhase
        }
    }

    fn economic_phase(&mut self) -> PhaseState {
        self.log.phase("Economic Phase:");
        let Some(card) = self.board.card() else {
            return PhaseState::HostilesPhase;
        };
        if card.is_white {
            let points = u32::from(card.action_points);
            self.board.action_points += points;
            self.log.event(format!("White AP number, APs added: {}", points));
        } else {
            let base = (i64::from(self.board.trade_goods) - i64::from(card.action_points)).max(1) as u32;
            self.log.event(format!(
                "Black AP number: {}, trade goods: {}, APs added: {}",
                card.action_points, self.board.trade_goods, base
            ));
            let mut total = base;
            for &good in card.resource_bonus {
                if self.board.has_good(good) {
                    total += 1;
                    self.log.event(format!("Resource bonus: 1 AP for {}", good));
                }
            }
            self.board.action_points += total;
            self.log.event(format!("Total APs added: {}", total));
        }
        PhaseState::HostilesPhase
    }

    fn hostiles_phase(&mut self) -> PhaseState {
        self.log.phase("Hostiles Phase:");
        let Some(card) = self.board.card() else {
            return PhaseState::RevoltPhase;
        };
        self.board.warpath_status = WarpathStatus::from_card(card);
        self.log.event(format!("Warpath status is {}", self.board.warpath_status));

        self.advancing_armies = card.advancing_armies.iter().copied().collect();
        self.revolting_tribe = card.revolt;
        PhaseState::AdvanceHostile
    }

    fn revolt_phase(&mut self) {
        let Some(tribe) = self.revolting_tribe.take() else {
            return;
        };
        self.log.event(format!("{} tribe is revolting.", tribe));
        let roll = self.dice.roll().clamp(1, 6);
        let Some(land) = Land::at(tribe, roll) else {
            return;
        };
        self.log.event(format!("{} rolled, land = {}", roll, land));

        if land.is_wilderness() {
            self.log.event("No revolt in wilderness.");
            return;
        }
        if land.is_homeland() {
            self.log.event("No revolt in tribal homeland.");
            return;
        }
        match self.board.chiefdom_at(land) {
            Some(c) if c.is_controlled => {
                if c.is_green_bird() {
                    self.log.event("Green Birdman people love you and do not revolt.");
                } else {
                    self.log.event("Peace Pipe retreat deferred.");
                    self.log.event(format!("{} army advance deferred.", tribe));
                }
            }
            _ if self.board.current_era == Era::Hopewell => {
                self.log.event("Land is uncontrolled; revolt has no effect.");
            }
            _ => {
                self.log.event(format!("{} forces retreat deferred.", tribe));
            }
        }
    }

    fn process_action(&mut self) -> PhaseState {
        let prepared = parse_action(&self.input)
            .map_err(ActionError::from)
            .and_then(|(kind, target)| prepare_action(&self.board, kind, target));
        match prepared {
            Ok(action) => {
                tracing::debug!(%action, "action accepted");
                PhaseState::ResolveAction(action)
            }
            Err(e) => {
                tracing::debug!(error = %e, "action rejected");
                self.error = Some(e.to_string());
                PhaseState::GetNextAction
            }
        }
    }

    fn resolve_action(&mut self, action: Action) -> PhaseState {
        if action.kind == ActionKind::Quit {
            self.respond("Do you really want to quit (Y/N)?");
            return PhaseState::VerifyQuit;
        }
        let mut resolver = Resolver {
            board: &mut self.board,
            cup: &mut self.cup,
            log: &mut self.log,
            dice: &mut self.dice,
        };
        if let Err(e) = resolver.resolve(&action) {
            self.error = Some(e.to_string());
        }
        PhaseState::GetNextAction
    }
}
