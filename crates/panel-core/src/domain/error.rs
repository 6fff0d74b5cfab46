//! Error types for board operations.
//!
//! Two failure classes exist and are deliberately kept apart:
//!
//! - [`BoardError`] — consistency faults: operating on an id that is not
//!   registered, a detached back-reference, an out-of-range index.  These
//!   indicate a programming or state error in the caller and abort the
//!   operation.
//!
//! - [`CapacityError`] — expected, recoverable refusals: not enough free
//!   width for a compartment, no room anywhere for a switch batch, shrinking
//!   a board below what its contents require.  Every operation that can
//!   refuse on capacity guarantees that *no* state was mutated when it does.
//!
//! Operations that can fail both ways return [`BoardError`], which wraps
//! [`CapacityError`] transparently; callers distinguish the classes by
//! matching [`BoardError::Capacity`].

use thiserror::Error;

use crate::domain::dimensions::Axis;
use crate::domain::id::{CompartmentId, ModuleId, SwitchId};

/// Fatal-to-operation faults plus wrapped capacity refusals.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoardError {
    /// No switch with this id is registered.
    #[error("unknown switch id: {0}")]
    UnknownSwitch(SwitchId),

    /// No module with this id is registered.
    #[error("unknown module id: {0}")]
    UnknownModule(ModuleId),

    /// No compartment with this id is registered.
    #[error("unknown compartment id: {0}")]
    UnknownCompartment(CompartmentId),

    /// The switch exists but carries no owning-module back-reference.
    #[error("switch {0} is not attached to any module")]
    DetachedSwitch(SwitchId),

    /// The module exists but carries no owning-compartment back-reference.
    #[error("module {0} is not attached to any compartment")]
    DetachedModule(ModuleId),

    /// The switch's back-reference points at a module that does not list it.
    #[error("switch {switch} is not in the sequence of module {module}")]
    SwitchNotInModule { switch: SwitchId, module: ModuleId },

    /// The module's back-reference points at a compartment that does not
    /// list it.
    #[error("module {module} is not in the sequence of compartment {compartment}")]
    ModuleNotInCompartment {
        module: ModuleId,
        compartment: CompartmentId,
    },

    /// A positional argument is outside the container's sequence.
    #[error("index {index} out of bounds for sequence of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A switch prefix code could not be parsed.
    #[error(transparent)]
    Prefix(#[from] PrefixError),

    /// A capacity refusal from a nested check.
    #[error(transparent)]
    Capacity(#[from] CapacityError),
}

/// Expected, recoverable capacity refusals.
///
/// Returning one of these guarantees the operation mutated nothing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CapacityError {
    /// A new compartment is wider than the board's remaining free width.
    #[error("compartment width {requested} exceeds free board width {free}")]
    InsufficientBoardWidth { requested: f64, free: f64 },

    /// A new compartment exceeds the board along a non-capacity axis.
    #[error("compartment {axis} {requested} exceeds board {axis} {limit}")]
    CompartmentExceedsBoard {
        axis: Axis,
        requested: f64,
        limit: f64,
    },

    /// A switch is wider than the target module's free width.
    #[error("switch width {needed} exceeds free module width {free}")]
    SwitchDoesNotFit { needed: f64, free: f64 },

    /// A module is taller than the target compartment's free height.
    #[error("module height {needed} exceeds free compartment height {free}")]
    ModuleDoesNotFit { needed: f64, free: f64 },

    /// A homogeneous batch does not fit into one container as a whole.
    #[error("batch of {count} does not fit: only {capacity} slot(s) available")]
    BatchDoesNotFit { count: usize, capacity: usize },

    /// Even with new modules in every compartment, the board cannot take the
    /// whole switch batch.
    #[error(
        "batch of {count} switch(es) does not fit anywhere on the board \
         (total capacity including new modules: {capacity})"
    )]
    BoardExhausted { count: usize, capacity: usize },

    /// A dimension shrink would no longer contain the existing compartments.
    #[error("cannot shrink {axis} to {requested}: contents require at least {minimum}")]
    ShrinkBelowMinimum {
        axis: Axis,
        requested: f64,
        minimum: f64,
    },
}

/// A switch prefix code that does not match `<size>X<rating>A`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid switch prefix {code:?}: expected <size>X<rating>A, e.g. \"3X16A\"")]
pub struct PrefixError {
    /// The rejected input.
    pub code: String,
}
