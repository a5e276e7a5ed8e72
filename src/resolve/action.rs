//! Action validation and resolution.
//!
//! `prepare_action` turns a parsed command into a costed `Action` without
//! touching the board. `Resolver` applies an action's effect. The two
//! warpath actions (peace-pipe advance and incorporation) also implement
//! `WarpathAction`, whose `check` is the read-only legality test shared by
//! resolution and the availability preview.

use crate::board::action::{Action, ActionKind, CostKind, Target};
use crate::board::card::Era;
use crate::board::counter::{Chiefdom, Cup};
use crate::board::land::{Land, Tribe, HOMELAND};
use crate::board::state::Board;
use crate::dice::Dice;
use crate::event_log::EventLog;
use crate::protocol::parser::ParseError;

/// Validation failures. None of these change the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("This action costs {cost} APs, but you only have {available}.")]
    NotEnoughPoints { cost: u32, available: u32 },

    #[error("This action is only allowed during the Hopewell era.")]
    HopewellOnly,

    #[error("Peace Pipe on {0} cannot be advanced.")]
    PipeBlocked(Land),

    #[error("Cannot advance Peace Pipe; chiefdom in {0} must be incorporated first.")]
    MustIncorporate(Land),

    #[error("{0} cannot contain a chiefdom.")]
    Wilderness(Land),

    #[error("{0} does not contain a chiefdom.")]
    NoChiefdom(Land),

    #[error("The chiefdom in {0} is already incorporated.")]
    AlreadyControlled(Land),

    #[error("The {0} action cannot take that target.")]
    TargetMismatch(&'static str),
}

/// Computes what `kind` costs against `target` on the current board.
pub fn action_cost(board: &Board, kind: ActionKind, target: Target) -> Result<u32, ActionError> {
    let spec = kind.spec();
    match spec.cost {
        CostKind::Fixed(cost) => Ok(cost),
        CostKind::ChiefdomValue => match target {
            Target::Land(land) => board
                .chiefdom_at(land)
                .map(|c| u32::from(c.value()))
                .ok_or(ActionError::NoChiefdom(land)),
            _ => Err(ActionError::TargetMismatch(spec.description)),
        },
        CostKind::PalisadeValue => Ok(u32::from(board.palisade().value)),
    }
}

/// Computes the cost of `kind` against `target` and checks it against the
/// available action points.
pub fn prepare_action(board: &Board, kind: ActionKind, target: Target) -> Result<Action, ActionError> {
    let cost = action_cost(board, kind, target)?;
    if cost > board.action_points {
        return Err(ActionError::NotEnoughPoints { cost, available: board.action_points });
    }
    Ok(Action { kind, target, cost })
}

/// A peace-pipe move on one warpath. `from` is `None` when the warpath has
/// no pipe yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipeMove {
    pub from: Option<Land>,
    pub to: Land,
}

/// Finds the current pipe land on `tribe`'s warpath and the land it would
/// advance to. Pipes never advance onto the homeland.
pub fn next_pipe_land(board: &Board, tribe: Tribe) -> (Option<Land>, Option<Land>) {
    match board.peace_pipe(tribe) {
        None => (None, Some(Land::innermost(tribe))),
        Some(from) if from.position() < HOMELAND - 1 => (Some(from), from.outward()),
        Some(from) => (Some(from), None),
    }
}

/// An action aimed at a warpath whose legality can be previewed.
pub trait WarpathAction: Sync {
    fn kind(&self) -> ActionKind;

    /// Checks legality on `tribe`'s warpath and returns the pipe move the
    /// action would make. Never mutates.
    fn check(&self, board: &Board, tribe: Tribe) -> Result<PipeMove, ActionError>;

    /// The cost of taking this action on `tribe`'s warpath. A chiefdom-value
    /// cost is read from the land the pipe would move to.
    fn cost_on_warpath(&self, board: &Board, tribe: Tribe) -> Result<u32, ActionError> {
        let target = match self.kind().spec().cost {
            CostKind::ChiefdomValue => Target::Land(self.check(board, tribe)?.to),
            _ => Target::Warpath(tribe),
        };
        action_cost(board, self.kind(), target)
    }

    fn is_enabled_on_warpath(&self, board: &Board, tribe: Tribe) -> bool {
        self.check(board, tribe).is_ok()
            && self
                .cost_on_warpath(board, tribe)
                .map_or(false, |cost| cost <= board.action_points)
    }
}

fn check_common(board: &Board, tribe: Tribe) -> Result<(Option<Land>, Option<Land>), ActionError> {
    if board.current_era != Era::Hopewell {
        return Err(ActionError::HopewellOnly);
    }
    if board.action_points < 1 {
        return Err(ActionError::NotEnoughPoints { cost: 1, available: board.action_points });
    }
    Ok(next_pipe_land(board, tribe))
}

/// Unopposed peace-pipe advance.
pub struct PeacePipeAdvance;

impl WarpathAction for PeacePipeAdvance {
    fn kind(&self) -> ActionKind {
        ActionKind::PeacePipe
    }

    fn check(&self, board: &Board, tribe: Tribe) -> Result<PipeMove, ActionError> {
        let (from, to) = check_common(board, tribe)?;
        let to = match (from, to) {
            (_, Some(to)) => to,
            (Some(from), None) => return Err(ActionError::PipeBlocked(from)),
            (None, None) => return Err(ActionError::PipeBlocked(Land::innermost(tribe))),
        };
        if to.is_wilderness() {
            return Ok(PipeMove { from, to });
        }
        match board.chiefdom_at(to) {
            Some(c) if !c.is_mounded && !c.is_controlled => Err(ActionError::MustIncorporate(to)),
            _ => Ok(PipeMove { from, to }),
        }
    }
}

/// Incorporation of the next chiefdom out along a warpath.
pub struct Incorporate;

impl WarpathAction for Incorporate {
    fn kind(&self) -> ActionKind {
        ActionKind::Incorporate
    }

    fn check(&self, board: &Board, tribe: Tribe) -> Result<PipeMove, ActionError> {
        let (from, to) = check_common(board, tribe)?;
        let to = match (from, to) {
            (_, Some(to)) => to,
            (Some(from), None) => return Err(ActionError::PipeBlocked(from)),
            (None, None) => return Err(ActionError::PipeBlocked(Land::innermost(tribe))),
        };
        if to.is_wilderness() {
            return Err(ActionError::Wilderness(to));
        }
        match board.chiefdom_at(to) {
            None => Err(ActionError::NoChiefdom(to)),
            Some(c) if c.is_controlled => Err(ActionError::AlreadyControlled(to)),
            Some(_) => Ok(PipeMove { from, to }),
        }
    }
}

/// Every action kind that implements `WarpathAction`, in catalog order.
pub static WARPATH_ACTIONS: [&dyn WarpathAction; 2] = [&PeacePipeAdvance, &Incorporate];

impl ActionKind {
    /// Returns the warpath capability of this action, if it has one.
    pub fn as_warpath_action(self) -> Option<&'static dyn WarpathAction> {
        WARPATH_ACTIONS.iter().copied().find(|a| a.kind() == self)
    }
}

/// Applies actions to the parts of a game they touch.
pub struct Resolver<'a, D: Dice> {
    pub board: &'a mut Board,
    pub cup: &'a mut Cup,
    pub log: &'a mut EventLog,
    pub dice: &'a mut D,
}

impl<'a, D: Dice> Resolver<'a, D> {
    /// Resolves `action`. On error nothing has changed. Quit is handled by
    /// the phase driver and never reaches here.
    pub fn resolve(&mut self, action: &Action) -> Result<(), ActionError> {
        match (action.kind, action.target) {
            (ActionKind::PeacePipe, Target::Warpath(tribe)) => {
                let step = PeacePipeAdvance.check(self.board, tribe)?;
                self.advance_peace_pipe(step);
            }
            (ActionKind::Incorporate, Target::Warpath(tribe)) => {
                let step = Incorporate.check(self.board, tribe)?;
                self.incorporate(tribe, step);
            }
            (ActionKind::PeacePipe | ActionKind::Incorporate, _) => {
                return Err(ActionError::TargetMismatch(action.spec().description));
            }
            _ => {
                self.log.event(format!("{}: no effect yet.", action));
            }
        }
        self.board.action_points = self.board.action_points.saturating_sub(action.cost);
        Ok(())
    }

    fn incorporate(&mut self, tribe: Tribe, step: PipeMove) {
        let roll = if step.from.is_some() {
            let (r1, r2) = (self.dice.roll(), self.dice.roll());
            let r = r1.max(r2);
            self.log.event(format!("Busk roll on {} warpath: {} and {}, choosing {}.", tribe, r1, r2, r));
            r
        } else {
            let r = self.dice.roll();
            self.log.event(format!("Diplomacy roll on {} warpath: {}.", tribe, r));
            r
        };

        let Some(chiefdom) = self.board.chiefdom_at(step.to) else {
            return;
        };
        let mut value = i32::from(chiefdom.value());
        let modifier = self.board.warpath_status.modifier_for(tribe);
        if modifier != 0 {
            self.log.event(format!(
                "{} status modifies chiefdom's value of {}.",
                self.board.warpath_status, value
            ));
            value += i32::from(modifier);
        }

        if i32::from(roll) > value {
            self.log.event(format!("{} exceeded value of {}; incorporation succeeded.", roll, value));
            if let Some(c) = self.board.chiefdom_at_mut(step.to) {
                c.is_controlled = true;
            }
            self.advance_peace_pipe(step);
        } else {
            self.log.event(format!("{} didn't exceed value of {}; incorporation failed.", roll, value));
        }
    }

    /// Moves the pipe and, in the Hopewell era, discovers a chiefdom on the
    /// next land out if it is empty, settled land.
    fn advance_peace_pipe(&mut self, step: PipeMove) {
        match step.from {
            None => self.log.event(format!("Placed new Peace Pipe on {}.", step.to)),
            Some(from) => {
                self.log.event(format!("Advanced Peace Pipe from {} to {}.", from, step.to));
                self.board.peace_pipes[from.index()] = false;
            }
        }
        self.board.peace_pipes[step.to.index()] = true;

        if self.board.current_era != Era::Hopewell {
            return;
        }
        let Some(next) = step.to.outward().filter(|l| !l.is_homeland() && !l.is_wilderness()) else {
            return;
        };
        if self.board.chiefdom_at(next).is_some() {
            return;
        }
        match self.cup.draw() {
            Some(counter) => {
                let chiefdom = Chiefdom::new(counter, next);
                self.board.place_chiefdom(chiefdom);
                self.log.event(format!("Placed new chiefdom ({}) in {}.", chiefdom, next));
            }
            None => self.log.event(format!("The cup is empty; no chiefdom discovered in {}.", next)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::counter::CounterId;
    use crate::board::state::WarpathStatus;
    use crate::board::card::ModifierTarget;
    use crate::dice::ScriptedDice;

    fn board_with_points(points: u32) -> Board {
        let mut board = Board::new();
        board.action_points = points;
        board
    }

    fn place(board: &mut Board, tribe: Tribe, position: u8, counter: u8) -> Land {
        let land = Land::at(tribe, position).unwrap();
        board.place_chiefdom(Chiefdom::new(CounterId::try_from(counter).unwrap(), land));
        land
    }

    #[test]
    fn prepare_fixed_cost() {
        let board = board_with_points(1);
        let action = prepare_action(&board, ActionKind::PeacePipe, Target::Warpath(Tribe::HoChunk)).unwrap();
        assert_eq!(action.cost, 1);
        assert_eq!(
            prepare_action(&board, ActionKind::Powwow, Target::Warpath(Tribe::HoChunk)),
            Err(ActionError::NotEnoughPoints { cost: 2, available: 1 })
        );
    }

    #[test]
    fn prepare_chiefdom_value_cost() {
        let mut board = board_with_points(5);
        let land = place(&mut board, Tribe::Caddo, 1, 4);
        let action = prepare_action(&board, ActionKind::Build, Target::Land(land)).unwrap();
        assert_eq!(action.cost, 4);

        let empty = Land::at(Tribe::Caddo, 3).unwrap();
        assert_eq!(
            prepare_action(&board, ActionKind::Build, Target::Land(empty)),
            Err(ActionError::NoChiefdom(empty))
        );
    }

    #[test]
    fn prepare_palisade_cost() {
        let mut board = board_with_points(3);
        assert!(matches!(
            prepare_action(&board, ActionKind::Repair, Target::None),
            Err(ActionError::NotEnoughPoints { cost: 4, .. })
        ));
        board.palisade_index = 5;
        assert_eq!(prepare_action(&board, ActionKind::Repair, Target::None).map(|a| a.cost), Ok(2));
    }

    #[test]
    fn cost_without_the_points_check() {
        let mut board = board_with_points(0);
        let land = place(&mut board, Tribe::Natchez, 1, 8);
        assert_eq!(action_cost(&board, ActionKind::Build, Target::Land(land)), Ok(4));
        assert_eq!(action_cost(&board, ActionKind::Repair, Target::None), Ok(4));
        assert_eq!(action_cost(&board, ActionKind::Powwow, Target::Warpath(Tribe::Natchez)), Ok(2));
        assert_eq!(
            action_cost(&board, ActionKind::Build, Target::Warpath(Tribe::Natchez)),
            Err(ActionError::TargetMismatch("Build a Mound"))
        );
    }

    struct MoundOnWarpath;

    impl WarpathAction for MoundOnWarpath {
        fn kind(&self) -> ActionKind {
            ActionKind::Build
        }

        fn check(&self, board: &Board, tribe: Tribe) -> Result<PipeMove, ActionError> {
            Incorporate.check(board, tribe)
        }
    }

    #[test]
    fn warpath_cost_follows_the_target_chiefdom() {
        let mut board = board_with_points(3);
        place(&mut board, Tribe::Caddo, 1, 4);
        place(&mut board, Tribe::HoChunk, 1, 1);
        assert_eq!(MoundOnWarpath.cost_on_warpath(&board, Tribe::Caddo), Ok(4));
        assert_eq!(MoundOnWarpath.cost_on_warpath(&board, Tribe::HoChunk), Ok(2));
        assert!(!MoundOnWarpath.is_enabled_on_warpath(&board, Tribe::Caddo));
        assert!(MoundOnWarpath.is_enabled_on_warpath(&board, Tribe::HoChunk));
        assert_eq!(Incorporate.cost_on_warpath(&board, Tribe::Caddo), Ok(1));
    }

    #[test]
    fn pipe_advance_checks() {
        let mut board = board_with_points(1);
        let dickson = place(&mut board, Tribe::HoChunk, 1, 0);
        assert_eq!(
            PeacePipeAdvance.check(&board, Tribe::HoChunk),
            Err(ActionError::MustIncorporate(dickson))
        );
        assert_eq!(
            Incorporate.check(&board, Tribe::HoChunk),
            Ok(PipeMove { from: None, to: dickson })
        );

        board.current_era = Era::Mississippian;
        assert_eq!(Incorporate.check(&board, Tribe::HoChunk), Err(ActionError::HopewellOnly));
        assert_eq!(PeacePipeAdvance.check(&board, Tribe::HoChunk), Err(ActionError::HopewellOnly));
    }

    #[test]
    fn pipe_stops_before_homeland() {
        let mut board = board_with_points(2);
        let red_wing = Land::at(Tribe::HoChunk, 5).unwrap();
        board.peace_pipes[red_wing.index()] = true;
        assert_eq!(
            PeacePipeAdvance.check(&board, Tribe::HoChunk),
            Err(ActionError::PipeBlocked(red_wing))
        );
        assert_eq!(
            Incorporate.check(&board, Tribe::HoChunk),
            Err(ActionError::PipeBlocked(red_wing))
        );
    }

    #[test]
    fn incorporate_needs_a_chiefdom() {
        let mut board = board_with_points(1);
        let poverty_point = Land::at(Tribe::Caddo, 2).unwrap();
        board.peace_pipes[Land::innermost(Tribe::Caddo).index()] = true;
        assert_eq!(Incorporate.check(&board, Tribe::Caddo), Err(ActionError::Wilderness(poverty_point)));

        let kincaid = Land::innermost(Tribe::Natchez);
        assert_eq!(Incorporate.check(&board, Tribe::Natchez), Err(ActionError::NoChiefdom(kincaid)));

        place(&mut board, Tribe::Natchez, 1, 2);
        board.chiefdom_at_mut(kincaid).unwrap().is_controlled = true;
        assert_eq!(Incorporate.check(&board, Tribe::Natchez), Err(ActionError::AlreadyControlled(kincaid)));
        assert!(PeacePipeAdvance.is_enabled_on_warpath(&board, Tribe::Natchez));
    }

    #[test]
    fn out_of_points_disables_warpath_actions() {
        let board = board_with_points(0);
        assert!(!PeacePipeAdvance.is_enabled_on_warpath(&board, Tribe::Shawnee));
        assert!(!Incorporate.is_enabled_on_warpath(&board, Tribe::Shawnee));
    }

    #[test]
    fn warpath_capability_lookup() {
        assert_eq!(ActionKind::PeacePipe.as_warpath_action().map(|a| a.kind()), Some(ActionKind::PeacePipe));
        assert_eq!(ActionKind::Incorporate.as_warpath_action().map(|a| a.kind()), Some(ActionKind::Incorporate));
        for kind in [ActionKind::Build, ActionKind::Fortify, ActionKind::Attack, ActionKind::Repair, ActionKind::Powwow, ActionKind::Quit] {
            assert!(kind.as_warpath_action().is_none());
        }
    }

    #[test]
    fn roll_equal_to_value_fails() {
        let mut board = board_with_points(2);
        let toltec = place(&mut board, Tribe::Caddo, 1, 4);
        board.warpath_status = WarpathStatus { target: Some(ModifierTarget::Tribe(Tribe::Caddo)), modifier: -1 };
        let mut cup = Cup::default();
        let mut log = EventLog::new();
        let mut dice = ScriptedDice::new([3, 4]);
        let action = Action { kind: ActionKind::Incorporate, target: Target::Warpath(Tribe::Caddo), cost: 1 };

        let mut resolver = Resolver { board: &mut board, cup: &mut cup, log: &mut log, dice: &mut dice };
        resolver.resolve(&action).unwrap();
        assert!(!resolver.board.chiefdom_at(toltec).unwrap().is_controlled);
        assert_eq!(resolver.board.peace_pipe(Tribe::Caddo), None);
        assert_eq!(resolver.board.action_points, 1);

        resolver.resolve(&action).unwrap();
        assert!(resolver.board.chiefdom_at(toltec).unwrap().is_controlled);
        assert_eq!(resolver.board.peace_pipe(Tribe::Caddo), Some(toltec));
        assert_eq!(resolver.board.action_points, 0);

        assert_eq!(
            log.lines(),
            &[
                "  Diplomacy roll on Caddo warpath: 3.",
                "  Caddo - 1 status modifies chiefdom's value of 4.",
                "  3 didn't exceed value of 3; incorporation failed.",
                "  Diplomacy roll on Caddo warpath: 4.",
                "  Caddo - 1 status modifies chiefdom's value of 4.",
                "  4 exceeded value of 3; incorporation succeeded.",
                "  Placed new Peace Pipe on Toltec (Caddo 1).",
            ]
        );
    }

    #[test]
    fn busk_roll_keeps_the_higher_die() {
        let mut board = board_with_points(1);
        board.peace_pipes[Land::innermost(Tribe::Shawnee).index()] = true;
        let fort_ancient = place(&mut board, Tribe::Shawnee, 2, 24);
        let mut cup = Cup::filled(&mut ScriptedDice::default());
        let mut log = EventLog::new();
        let mut dice = ScriptedDice::new([5, 2]);
        let action = Action { kind: ActionKind::Incorporate, target: Target::Warpath(Tribe::Shawnee), cost: 1 };

        Resolver { board: &mut board, cup: &mut cup, log: &mut log, dice: &mut dice }
            .resolve(&action)
            .unwrap();

        assert_eq!(board.peace_pipe(Tribe::Shawnee), Some(fort_ancient));
        let portsmouth = Land::at(Tribe::Shawnee, 3).unwrap();
        assert_eq!(board.chiefdom_at(portsmouth).map(|c| u8::from(c.counter)), Some(0));
        assert_eq!(log.lines()[0], "  Busk roll on Shawnee warpath: 5 and 2, choosing 5.");
        assert_eq!(log.lines()[2], "  Advanced Peace Pipe from Angel (Shawnee 1) to Fort Ancient (Shawnee 2).");
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn no_discovery_into_wilderness_or_with_empty_cup() {
        let mut board = board_with_points(2);
        let mut cup = Cup::default();
        let mut log = EventLog::new();
        let mut dice = ScriptedDice::default();
        let ppa = Action { kind: ActionKind::PeacePipe, target: Target::Warpath(Tribe::Cherokee), cost: 1 };

        let mut resolver = Resolver { board: &mut board, cup: &mut cup, log: &mut log, dice: &mut dice };
        // Pinson is empty, Coosa beyond it is wilderness.
        resolver.resolve(&ppa).unwrap();
        assert_eq!(resolver.board.peace_pipe(Tribe::Cherokee), Some(Land::innermost(Tribe::Cherokee)));
        assert_eq!(resolver.board.chiefdom_count(), 0);

        // Into Coosa; Etowah beyond is settled land but the cup is empty.
        resolver.resolve(&ppa).unwrap();
        assert_eq!(resolver.board.chiefdom_count(), 0);
        assert_eq!(resolver.board.action_points, 0);
        assert!(log.lines().last().unwrap().contains("The cup is empty"));
    }

    #[test]
    fn placeholder_actions_spend_points() {
        let mut board = board_with_points(3);
        let mut cup = Cup::default();
        let mut log = EventLog::new();
        let mut dice = ScriptedDice::default();
        let action = Action { kind: ActionKind::Fortify, target: Target::None, cost: 2 };
        Resolver { board: &mut board, cup: &mut cup, log: &mut log, dice: &mut dice }
            .resolve(&action)
            .unwrap();
        assert_eq!(board.action_points, 1);
        assert_eq!(log.lines(), &["  Fortify Cahokia: no effect yet."]);
    }

    #[test]
    fn failed_check_changes_nothing() {
        let mut board = board_with_points(1);
        place(&mut board, Tribe::HoChunk, 1, 0);
        let before = board.clone();
        let mut cup = Cup::default();
        let mut log = EventLog::new();
        let mut dice = ScriptedDice::default();
        let action = Action { kind: ActionKind::PeacePipe, target: Target::Warpath(Tribe::HoChunk), cost: 1 };
        let err = Resolver { board: &mut board, cup: &mut cup, log: &mut log, dice: &mut dice }
            .resolve(&action)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot advance Peace Pipe; chiefdom in Dickson (HoChunk 1) must be incorporated first."
        );
        assert_eq!(board, before);
        assert!(log.is_empty());
    }
}
