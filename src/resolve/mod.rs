//! Turn sequencing and action resolution.
//!
//! `phase` drives the per-turn state machine; `action` validates, costs,
//! and applies player actions.

pub mod action;
pub mod phase;

pub use action::{
    action_cost, next_pipe_land, prepare_action, ActionError, Incorporate, PeacePipeAdvance, PipeMove, Resolver,
    WarpathAction, WARPATH_ACTIONS,
};
pub use phase::PhaseState;
