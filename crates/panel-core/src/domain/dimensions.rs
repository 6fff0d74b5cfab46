//! Physical dimensions shared by every board entity.
//!
//! All entities on a distribution board — the board itself, its compartments,
//! their DIN-rail modules, and the switches clipped onto a rail — occupy a
//! rectangular volume described by [`Dimensions`].  No unit system is
//! enforced; every value on one board simply has to use the same unit
//! (millimetres in practice).
//!
//! # Capacity comparisons and floating point
//!
//! Capacity bookkeeping works with sums and differences of widths and
//! heights, so two values that are mathematically equal can differ by a few
//! ULPs after a chain of additions.  All "does it fit" and "how many fit"
//! decisions therefore go through [`fits`] and [`slot_count`], which allow a
//! small tolerance.  Without the tolerance, a rail with exactly one switch
//! width of free space left could report zero free slots.

use std::fmt;

/// Width of one switch size-class unit on a DIN rail.
///
/// A switch with prefix `3X16A` is three units wide, i.e. `3.0 * SWITCH_UNIT_WIDTH`.
pub const SWITCH_UNIT_WIDTH: f64 = 17.5;

/// Default switch height; also the height of a newly created module, since a
/// module is exactly one rail of switches.
pub const SWITCH_HEIGHT: f64 = 90.0;

/// Default switch depth.
pub const SWITCH_DEPTH: f64 = 70.0;

/// Tolerance used by all capacity comparisons.
pub(crate) const CAPACITY_EPSILON: f64 = 1e-6;

/// The three axes of a [`Dimensions`] value.
///
/// Used in error reporting: each container level constrains capacity along
/// exactly one axis (board: width, compartment: height, module: width).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
    Depth,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height"),
            Axis::Depth => write!(f, "depth"),
        }
    }
}

/// A width × height × depth triple.  All fields are positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions {
    /// Creates a new dimension triple.
    ///
    /// Negative or zero extents are a caller bug; they are debug-asserted
    /// rather than validated at runtime because every construction site is
    /// either a constant, a validated config value, or derived from an
    /// already-valid parent entity.
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        debug_assert!(width > 0.0 && height > 0.0 && depth > 0.0);
        Self {
            width,
            height,
            depth,
        }
    }

    /// Returns a copy with the patch fields applied on top of `self`.
    pub fn patched(&self, patch: DimensionsPatch) -> Self {
        Self {
            width: patch.width.unwrap_or(self.width),
            height: patch.height.unwrap_or(self.height),
            depth: patch.depth.unwrap_or(self.depth),
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {} × {}", self.width, self.height, self.depth)
    }
}

/// A partial update to a [`Dimensions`] value.
///
/// Fields left as `None` keep their current value.  Used by the board resize
/// operation and by switch dimension overrides, both of which accept any
/// subset of the three axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DimensionsPatch {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
}

impl DimensionsPatch {
    /// A patch that changes only the width.
    pub fn width(width: f64) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    /// A patch that changes only the height.
    pub fn height(height: f64) -> Self {
        Self {
            height: Some(height),
            ..Self::default()
        }
    }

    /// A patch that changes only the depth.
    pub fn depth(depth: f64) -> Self {
        Self {
            depth: Some(depth),
            ..Self::default()
        }
    }
}

/// Returns `true` if an item of extent `needed` fits into `available` space.
pub(crate) fn fits(needed: f64, available: f64) -> bool {
    needed <= available + CAPACITY_EPSILON
}

/// Returns how many items of extent `item` fit side by side into `available`
/// space.
///
/// Returns 0 for a non-positive item extent rather than dividing by zero.
pub(crate) fn slot_count(available: f64, item: f64) -> usize {
    if item <= 0.0 || available <= 0.0 {
        return 0;
    }
    ((available + CAPACITY_EPSILON) / item).floor() as usize
}
