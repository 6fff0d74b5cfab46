//! The compartment — a vertical stack of modules.
//!
//! Structurally this mirrors [`Module`](crate::domain::module::Module) one
//! level up: the capacity axis is *height* instead of width, and the
//! contained type is the module instead of the switch.  The invariant
//! `occupied_height + free_height == dimensions.height` holds after every
//! operation.

use crate::domain::dimensions::{fits, slot_count, Dimensions};
use crate::domain::error::{BoardError, CapacityError};
use crate::domain::id::{CompartmentId, ModuleId};
use crate::domain::module::Module;
use crate::domain::registry::Keyed;

/// A fixed-height container of an ordered module stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Compartment {
    id: CompartmentId,
    pub name: String,
    pub feed: String,
    dimensions: Dimensions,
    modules: Vec<ModuleId>,
    occupied_height: f64,
}

impl Compartment {
    /// Creates an empty compartment.
    pub fn new(
        id: CompartmentId,
        name: impl Into<String>,
        feed: impl Into<String>,
        dimensions: Dimensions,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            feed: feed.into(),
            dimensions,
            modules: Vec::new(),
            occupied_height: 0.0,
        }
    }

    pub fn id(&self) -> CompartmentId {
        self.id
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn occupied_height(&self) -> f64 {
        self.occupied_height
    }

    pub fn free_height(&self) -> f64 {
        self.dimensions.height - self.occupied_height
    }

    /// Module ids in top-to-bottom order.
    pub fn module_ids(&self) -> &[ModuleId] {
        &self.modules
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Returns `true` if the module fits into the remaining free height.
    pub fn can_add_module(&self, module: &Module) -> bool {
        fits(module.height(), self.free_height())
    }

    /// How many modules of the given height would still fit.
    ///
    /// Same homogeneous-batch precondition as
    /// [`Module::batch_capacity`](crate::domain::module::Module::batch_capacity):
    /// a module batch shares one height, so only that height is consulted.
    pub fn batch_capacity(&self, module_height: f64) -> usize {
        slot_count(self.free_height(), module_height)
    }

    /// Inserts a module at `index` (append when `None`), updates the height
    /// bookkeeping, and points the module's back-reference at this
    /// compartment.
    ///
    /// # Errors
    ///
    /// [`CapacityError::ModuleDoesNotFit`] when the free height is too
    /// small; [`BoardError::IndexOutOfBounds`] for an index past the end.
    /// Nothing is mutated on failure.
    pub fn add_module(&mut self, module: &mut Module, index: Option<usize>) -> Result<(), BoardError> {
        if !self.can_add_module(module) {
            return Err(CapacityError::ModuleDoesNotFit {
                needed: module.height(),
                free: self.free_height(),
            }
            .into());
        }
        let at = index.unwrap_or(self.modules.len());
        if at > self.modules.len() {
            return Err(BoardError::IndexOutOfBounds {
                index: at,
                len: self.modules.len(),
            });
        }

        self.modules.insert(at, module.id());
        self.occupied_height += module.height();
        module.set_owning_compartment(Some(self.id));
        Ok(())
    }

    /// Detaches the given module: removes its id from the sequence, clears
    /// its back-reference, and releases its height.
    ///
    /// # Errors
    ///
    /// [`BoardError::ModuleNotInCompartment`] when the id is not in this
    /// compartment's sequence; nothing is mutated in that case.
    pub fn remove_module(&mut self, module: &mut Module) -> Result<(), BoardError> {
        let position = self
            .modules
            .iter()
            .position(|&id| id == module.id())
            .ok_or(BoardError::ModuleNotInCompartment {
                module: module.id(),
                compartment: self.id,
            })?;

        self.modules.remove(position);
        self.occupied_height -= module.height();
        module.set_owning_compartment(None);
        Ok(())
    }

    /// Returns the module id at `index`.
    ///
    /// # Errors
    ///
    /// [`BoardError::IndexOutOfBounds`] when the index is past the end.
    pub fn module_id_at(&self, index: usize) -> Result<ModuleId, BoardError> {
        self.modules
            .get(index)
            .copied()
            .ok_or(BoardError::IndexOutOfBounds {
                index,
                len: self.modules.len(),
            })
    }

    /// Detaches every module at once and returns their ids in stack order.
    ///
    /// Used by cascading deletes: the caller removes the returned ids (and
    /// their switches) from the registries.  The modules' back-references
    /// are *not* cleared here because the module values live in the
    /// registry; a cascading delete destroys them right after.
    pub fn remove_all_modules(&mut self) -> Vec<ModuleId> {
        self.occupied_height = 0.0;
        std::mem::take(&mut self.modules)
    }
}

impl Keyed<CompartmentId> for Compartment {
    fn key(&self) -> CompartmentId {
        self.id
    }
}
