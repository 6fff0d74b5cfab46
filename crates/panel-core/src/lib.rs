//! # panel-core
//!
//! Core library for Panelboard: the in-memory model of an electrical
//! distribution board and the engine that decides where a batch of switches
//! goes.
//!
//! A board holds an ordered row of compartments; each compartment holds a
//! vertical stack of DIN-rail modules; each module holds a horizontal row of
//! switches.  Every level is capacity-constrained along one axis (board:
//! width, compartment: height, module: width).  The
//! [`place_switch_batch`](domain::board::Board::place_switch_batch) operation
//! fits a homogeneous batch of switches into that structure using three
//! escalating strategies, building new modules when the existing ones run
//! out of room, and refuses — without touching anything — when the board as
//! a whole cannot take the batch.
//!
//! This crate has zero dependencies on OS APIs, UI frameworks, or storage.
//! The companion crate `panel-planner` wraps it in copy-on-write
//! transactions for the editing UI.

pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `panel_core::Board` instead of `panel_core::domain::board::Board`.
pub use domain::board::Board;
pub use domain::compartment::Compartment;
pub use domain::dimensions::{
    Axis, Dimensions, DimensionsPatch, SWITCH_DEPTH, SWITCH_HEIGHT, SWITCH_UNIT_WIDTH,
};
pub use domain::error::{BoardError, CapacityError, PrefixError};
pub use domain::id::{CompartmentId, EntityId, ModuleId, SwitchId};
pub use domain::module::Module;
pub use domain::placement::SwitchBatch;
pub use domain::registry::{Keyed, Registry};
pub use domain::switch::{Switch, SwitchPrefix};
