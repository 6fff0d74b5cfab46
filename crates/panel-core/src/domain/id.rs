//! Typed entity identifiers.
//!
//! Every entity on the board carries an id assigned by its registry:
//! switches are `s1`, `s2`, …, modules `m1`, `m2`, …, compartments `c1`,
//! `c2`, ….  Ids are small integers behind a typed newtype, so a
//! [`SwitchId`] can never be confused with a [`ModuleId`] at compile time,
//! and the textual code is only produced for display.
//!
//! Ids also serve as *weak back-references*: a switch records the id of the
//! module it sits in, and a module records the id of its compartment.  A
//! back-reference never implies ownership — the entity lives in its
//! registry, and a stale id simply fails lookup there.

use std::fmt;
use std::hash::Hash;

/// Common interface of the three id types, used by the generic registry for
/// monotonic id generation.
pub trait EntityId: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display {
    /// The id handed out by an empty registry (`s1` / `m1` / `c1`).
    const FIRST: Self;

    /// The numeric part of the id.
    fn index(self) -> u32;

    /// Builds an id from its numeric part.
    fn from_index(index: u32) -> Self;

    /// The id one past this one.
    fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

/// Identifier of a [`Switch`](crate::domain::switch::Switch), rendered as `s{n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SwitchId(u32);

impl EntityId for SwitchId {
    const FIRST: Self = SwitchId(1);

    fn index(self) -> u32 {
        self.0
    }

    fn from_index(index: u32) -> Self {
        SwitchId(index)
    }
}

impl fmt::Display for SwitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Identifier of a [`Module`](crate::domain::module::Module), rendered as `m{n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleId(u32);

impl EntityId for ModuleId {
    const FIRST: Self = ModuleId(1);

    fn index(self) -> u32 {
        self.0
    }

    fn from_index(index: u32) -> Self {
        ModuleId(index)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// Identifier of a [`Compartment`](crate::domain::compartment::Compartment),
/// rendered as `c{n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompartmentId(u32);

impl EntityId for CompartmentId {
    const FIRST: Self = CompartmentId(1);

    fn index(self) -> u32 {
        self.0
    }

    fn from_index(index: u32) -> Self {
        CompartmentId(index)
    }
}

impl fmt::Display for CompartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_ids_render_with_type_prefix() {
        assert_eq!(SwitchId::FIRST.to_string(), "s1");
        assert_eq!(ModuleId::FIRST.to_string(), "m1");
        assert_eq!(CompartmentId::FIRST.to_string(), "c1");
    }

    #[test]
    fn test_next_increments_numeric_part() {
        assert_eq!(SwitchId::FIRST.next().to_string(), "s2");
        assert_eq!(SwitchId::from_index(10).next(), SwitchId::from_index(11));
    }

    #[test]
    fn test_ids_order_by_numeric_part() {
        assert!(SwitchId::from_index(2) < SwitchId::from_index(10));
    }
}
