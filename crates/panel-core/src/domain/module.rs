//! The module — one DIN rail holding a horizontal row of switches.
//!
//! A module's capacity axis is its *width*.  It keeps the occupied width in
//! sync on every insert and removal so that the invariant
//! `occupied_width + free_width == dimensions.width` holds after every
//! operation, and `occupied_width` always equals the sum of the contained
//! switch widths.
//!
//! The module stores switch *ids* in left-to-right order; the switch values
//! themselves live in the board's switch registry.  Operations that change
//! the bookkeeping therefore take the affected [`Switch`] as `&mut` so the
//! back-reference and the width sum stay consistent in one place.

use crate::domain::dimensions::{fits, slot_count, Dimensions};
use crate::domain::error::{BoardError, CapacityError};
use crate::domain::id::{CompartmentId, ModuleId, SwitchId};
use crate::domain::registry::Keyed;
use crate::domain::switch::Switch;

/// A fixed-width container of an ordered switch row.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    id: ModuleId,
    pub name: String,
    pub feed: String,
    dimensions: Dimensions,
    switches: Vec<SwitchId>,
    occupied_width: f64,
    owning_compartment: Option<CompartmentId>,
}

impl Module {
    /// Creates an empty module.
    pub fn new(
        id: ModuleId,
        name: impl Into<String>,
        feed: impl Into<String>,
        dimensions: Dimensions,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            feed: feed.into(),
            dimensions,
            switches: Vec::new(),
            occupied_width: 0.0,
            owning_compartment: None,
        }
    }

    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Convenience accessor for the non-capacity axis that matters one level
    /// up: a compartment stacks modules by height.
    pub fn height(&self) -> f64 {
        self.dimensions.height
    }

    pub fn occupied_width(&self) -> f64 {
        self.occupied_width
    }

    pub fn free_width(&self) -> f64 {
        self.dimensions.width - self.occupied_width
    }

    /// Switch ids in left-to-right order.
    pub fn switch_ids(&self) -> &[SwitchId] {
        &self.switches
    }

    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.switches.is_empty()
    }

    /// The compartment this module currently sits in, if any.
    pub fn owning_compartment(&self) -> Option<CompartmentId> {
        self.owning_compartment
    }

    /// Returns `true` if the switch fits into the remaining free width.
    pub fn can_add_switch(&self, switch: &Switch) -> bool {
        fits(switch.width(), self.free_width())
    }

    /// How many switches of the given width would still fit.
    ///
    /// Precondition of every batch operation: all switches in one batch
    /// share one width (a placement batch is always a single size class), so
    /// only that width is consulted.
    pub fn batch_capacity(&self, switch_width: f64) -> usize {
        slot_count(self.free_width(), switch_width)
    }

    /// Inserts a switch at `index` (append when `None`), updates the width
    /// bookkeeping, and points the switch's back-reference at this module.
    ///
    /// # Errors
    ///
    /// [`CapacityError::SwitchDoesNotFit`] when the free width is too small;
    /// [`BoardError::IndexOutOfBounds`] for an index past the end.  Nothing
    /// is mutated on failure.
    pub fn add_switch(&mut self, switch: &mut Switch, index: Option<usize>) -> Result<(), BoardError> {
        if !self.can_add_switch(switch) {
            return Err(CapacityError::SwitchDoesNotFit {
                needed: switch.width(),
                free: self.free_width(),
            }
            .into());
        }
        let at = index.unwrap_or(self.switches.len());
        if at > self.switches.len() {
            return Err(BoardError::IndexOutOfBounds {
                index: at,
                len: self.switches.len(),
            });
        }

        self.switches.insert(at, switch.id());
        self.occupied_width += switch.width();
        switch.set_owning_module(Some(self.id));
        Ok(())
    }

    /// Appends a homogeneous batch of switches, all or nothing.
    ///
    /// All switches must share one width (only the first is consulted for
    /// the capacity check, per the batch precondition).
    ///
    /// # Errors
    ///
    /// [`CapacityError::BatchDoesNotFit`] when fewer free slots exist than
    /// batch elements; no switch is added in that case.
    pub fn add_switches(&mut self, switches: &mut [Switch]) -> Result<(), BoardError> {
        let Some(first) = switches.first() else {
            return Ok(());
        };
        debug_assert!(
            switches.iter().all(|s| s.width() == first.width()),
            "switch batches must be homogeneous in width"
        );

        let capacity = self.batch_capacity(first.width());
        if capacity < switches.len() {
            return Err(CapacityError::BatchDoesNotFit {
                count: switches.len(),
                capacity,
            }
            .into());
        }
        for switch in switches {
            self.add_switch(switch, None)?;
        }
        Ok(())
    }

    /// Detaches the given switch: removes its id from the sequence, clears
    /// its back-reference, and releases its width.
    ///
    /// # Errors
    ///
    /// [`BoardError::SwitchNotInModule`] when the id is not in this module's
    /// sequence; nothing is mutated in that case.
    pub fn remove_switch(&mut self, switch: &mut Switch) -> Result<(), BoardError> {
        let position = self
            .switches
            .iter()
            .position(|&id| id == switch.id())
            .ok_or(BoardError::SwitchNotInModule {
                switch: switch.id(),
                module: self.id,
            })?;

        self.switches.remove(position);
        self.occupied_width -= switch.width();
        switch.set_owning_module(None);
        Ok(())
    }

    /// Returns the switch id at `index`.
    ///
    /// # Errors
    ///
    /// [`BoardError::IndexOutOfBounds`] when the index is past the end.
    pub fn switch_id_at(&self, index: usize) -> Result<SwitchId, BoardError> {
        self.switches
            .get(index)
            .copied()
            .ok_or(BoardError::IndexOutOfBounds {
                index,
                len: self.switches.len(),
            })
    }

    /// Width bookkeeping adjustment when a contained switch is resized in
    /// place.  The caller has already checked the free width.
    pub(crate) fn apply_switch_width_delta(&mut self, delta: f64) {
        self.occupied_width += delta;
    }

    /// Back-reference maintenance; called only by the owning compartment.
    pub(crate) fn set_owning_compartment(&mut self, compartment: Option<CompartmentId>) {
        self.owning_compartment = compartment;
    }
}

impl Keyed<ModuleId> for Module {
    fn key(&self) -> ModuleId {
        self.id
    }
}
