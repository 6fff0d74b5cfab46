//! The board — top-level container and entry point for every mutation.
//!
//! A board owns three flat registries (switches, modules, compartments) plus
//! an ordered *display sequence* of compartment ids that determines
//! left-to-right rendering order independently of registry iteration order.
//! The capacity axis at this level is width: every compartment consumes its
//! width from the board's `free_width`.
//!
//! # Copy-on-write discipline
//!
//! Because containers reference entities by id and the registries own the
//! values, a derived [`Clone`] of a board is a complete structurally
//! independent deep copy: same ids, same order, no shared state.  Callers
//! that need transactional semantics clone the board, mutate the clone, and
//! publish it only on success (see the planner crate's `BoardStore`).
//!
//! # Failure semantics
//!
//! Every operation validates before it mutates.  A returned error — fatal or
//! capacity — means the board is exactly as it was before the call.

use crate::domain::compartment::Compartment;
use crate::domain::dimensions::{fits, Axis, Dimensions, DimensionsPatch};
use crate::domain::error::{BoardError, CapacityError};
use crate::domain::id::{CompartmentId, ModuleId, SwitchId};
use crate::domain::module::Module;
use crate::domain::registry::Registry;
use crate::domain::switch::Switch;

/// The board entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub name: String,
    pub(crate) dimensions: Dimensions,
    pub(crate) free_width: f64,
    /// Display sequence: compartment ids in left-to-right order.
    pub(crate) layout: Vec<CompartmentId>,
    pub(crate) compartments: Registry<CompartmentId, Compartment>,
    pub(crate) modules: Registry<ModuleId, Module>,
    pub(crate) switches: Registry<SwitchId, Switch>,
}

impl Board {
    /// Creates an empty board with the full width free.
    pub fn new(name: impl Into<String>, dimensions: Dimensions) -> Self {
        Self {
            name: name.into(),
            dimensions,
            free_width: dimensions.width,
            layout: Vec::new(),
            compartments: Registry::new(),
            modules: Registry::new(),
            switches: Registry::new(),
        }
    }

    // ── Read surface ──────────────────────────────────────────────────────────

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn free_width(&self) -> f64 {
        self.free_width
    }

    pub fn occupied_width(&self) -> f64 {
        self.dimensions.width - self.free_width
    }

    /// Compartment ids in display (left-to-right) order.
    pub fn layout(&self) -> &[CompartmentId] {
        &self.layout
    }

    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn compartment_count(&self) -> usize {
        self.compartments.len()
    }

    /// Looks up a switch; unknown ids are a reported error, never a silent
    /// empty result.
    pub fn switch(&self, id: SwitchId) -> Result<&Switch, BoardError> {
        self.switches.get(id).ok_or(BoardError::UnknownSwitch(id))
    }

    pub fn module(&self, id: ModuleId) -> Result<&Module, BoardError> {
        self.modules.get(id).ok_or(BoardError::UnknownModule(id))
    }

    pub fn compartment(&self, id: CompartmentId) -> Result<&Compartment, BoardError> {
        self.compartments
            .get(id)
            .ok_or(BoardError::UnknownCompartment(id))
    }

    /// All switches in registry (id) order.
    pub fn switches(&self) -> impl Iterator<Item = &Switch> {
        self.switches.iter()
    }

    /// All modules in registry (id) order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    /// All compartments in registry (id) order.
    pub fn compartments(&self) -> impl Iterator<Item = &Compartment> {
        self.compartments.iter()
    }

    /// The modules of a compartment in stack order.
    pub fn modules_of(&self, id: CompartmentId) -> Result<Vec<&Module>, BoardError> {
        let compartment = self.compartment(id)?;
        compartment
            .module_ids()
            .iter()
            .map(|&mid| self.module(mid))
            .collect()
    }

    /// The switches of a module in left-to-right order.
    pub fn switches_of(&self, id: ModuleId) -> Result<Vec<&Switch>, BoardError> {
        let module = self.module(id)?;
        module
            .switch_ids()
            .iter()
            .map(|&sid| self.switch(sid))
            .collect()
    }

    // ── Compartment construction ──────────────────────────────────────────────

    /// Registers a new compartment, appends it to the display sequence, and
    /// consumes its width from `free_width`.
    ///
    /// # Errors
    ///
    /// [`CapacityError::CompartmentExceedsBoard`] when the requested height
    /// or depth exceeds the board's, [`CapacityError::InsufficientBoardWidth`]
    /// when the requested width exceeds the current free width.  Nothing is
    /// mutated on failure.
    pub fn create_compartment(
        &mut self,
        name: impl Into<String>,
        feed: impl Into<String>,
        dimensions: Dimensions,
    ) -> Result<CompartmentId, CapacityError> {
        if !fits(dimensions.height, self.dimensions.height) {
            return Err(CapacityError::CompartmentExceedsBoard {
                axis: Axis::Height,
                requested: dimensions.height,
                limit: self.dimensions.height,
            });
        }
        if !fits(dimensions.depth, self.dimensions.depth) {
            return Err(CapacityError::CompartmentExceedsBoard {
                axis: Axis::Depth,
                requested: dimensions.depth,
                limit: self.dimensions.depth,
            });
        }
        if !fits(dimensions.width, self.free_width) {
            return Err(CapacityError::InsufficientBoardWidth {
                requested: dimensions.width,
                free: self.free_width,
            });
        }

        let id = self.compartments.next_id();
        self.compartments
            .insert(Compartment::new(id, name, feed, dimensions));
        self.layout.push(id);
        self.free_width -= dimensions.width;
        tracing::debug!(%id, width = dimensions.width, free = self.free_width, "compartment created");
        Ok(id)
    }

    // ── Cascading deletes ─────────────────────────────────────────────────────

    /// Removes a switch from its module and from the switch registry.
    ///
    /// # Errors
    ///
    /// [`BoardError::UnknownSwitch`] for an unregistered id,
    /// [`BoardError::DetachedSwitch`] when no owning module can be found.
    pub fn delete_switch(&mut self, id: SwitchId) -> Result<(), BoardError> {
        let module_id = self
            .switch(id)?
            .owning_module()
            .ok_or(BoardError::DetachedSwitch(id))?;
        let module = self.module(module_id)?;
        if !module.switch_ids().contains(&id) {
            return Err(BoardError::SwitchNotInModule {
                switch: id,
                module: module_id,
            });
        }

        // Validated above; from here on nothing can fail.
        let mut switch = self
            .switches
            .remove(id)
            .ok_or(BoardError::UnknownSwitch(id))?;
        let module = self
            .modules
            .get_mut(module_id)
            .ok_or(BoardError::UnknownModule(module_id))?;
        module.remove_switch(&mut switch)?;
        tracing::debug!(switch = %id, module = %module_id, "switch deleted");
        Ok(())
    }

    /// Removes a module, all its switches, and its compartment attachment.
    ///
    /// # Errors
    ///
    /// [`BoardError::UnknownModule`] for an unregistered id,
    /// [`BoardError::DetachedModule`] when no owning compartment can be
    /// found.
    pub fn delete_module_with_switches(&mut self, id: ModuleId) -> Result<(), BoardError> {
        let compartment_id = self
            .module(id)?
            .owning_compartment()
            .ok_or(BoardError::DetachedModule(id))?;
        let compartment = self.compartment(compartment_id)?;
        if !compartment.module_ids().contains(&id) {
            return Err(BoardError::ModuleNotInCompartment {
                module: id,
                compartment: compartment_id,
            });
        }

        let mut module = self
            .modules
            .remove(id)
            .ok_or(BoardError::UnknownModule(id))?;
        let removed_switches = self.switches.remove_many(module.switch_ids());
        let compartment = self
            .compartments
            .get_mut(compartment_id)
            .ok_or(BoardError::UnknownCompartment(compartment_id))?;
        compartment.remove_module(&mut module)?;
        tracing::debug!(
            module = %id,
            compartment = %compartment_id,
            switches = removed_switches,
            "module deleted with switches"
        );
        Ok(())
    }

    /// Removes a compartment, all its modules, all their switches, and the
    /// compartment's display-sequence entry; the freed width is returned to
    /// `free_width`.
    ///
    /// # Errors
    ///
    /// [`BoardError::UnknownCompartment`] for an unregistered id.
    pub fn delete_compartment_and_modules(&mut self, id: CompartmentId) -> Result<(), BoardError> {
        let mut compartment = self
            .compartments
            .remove(id)
            .ok_or(BoardError::UnknownCompartment(id))?;

        let mut removed_switches = 0;
        let module_ids = compartment.remove_all_modules();
        for module_id in &module_ids {
            if let Some(module) = self.modules.remove(*module_id) {
                removed_switches += self.switches.remove_many(module.switch_ids());
            }
        }

        self.layout.retain(|&c| c != id);
        self.free_width += compartment.dimensions().width;
        tracing::debug!(
            compartment = %id,
            modules = module_ids.len(),
            switches = removed_switches,
            free = self.free_width,
            "compartment deleted with modules"
        );
        Ok(())
    }

    /// Deletes every compartment (and transitively everything else).
    pub fn clear_board(&mut self) -> Result<(), BoardError> {
        let ids: Vec<CompartmentId> = self.compartments.ids().collect();
        for id in ids {
            self.delete_compartment_and_modules(id)?;
        }
        Ok(())
    }

    // ── Reordering and moves ──────────────────────────────────────────────────

    /// Moves the compartment at display position `from` to position `to`.
    ///
    /// Affects only the display sequence; registries and capacity
    /// bookkeeping are untouched.
    pub fn reorder_compartment(&mut self, from: usize, to: usize) -> Result<(), BoardError> {
        let len = self.layout.len();
        let out_of_bounds = |index| BoardError::IndexOutOfBounds { index, len };
        if from >= len {
            return Err(out_of_bounds(from));
        }
        if to >= len {
            return Err(out_of_bounds(to));
        }

        let id = self.layout.remove(from);
        self.layout.insert(to, id);
        Ok(())
    }

    /// Moves the module at `source_index` of one compartment to
    /// `dest_index` of another (or the same) compartment.
    ///
    /// # Errors
    ///
    /// Fatal errors for unknown ids and out-of-range indices;
    /// [`CapacityError::ModuleDoesNotFit`] when the destination compartment
    /// lacks the height.  A move within one compartment never fails on
    /// capacity.  Nothing is mutated on failure.
    pub fn move_module(
        &mut self,
        source: CompartmentId,
        source_index: usize,
        dest: CompartmentId,
        dest_index: usize,
    ) -> Result<(), BoardError> {
        let module_id = self.compartment(source)?.module_id_at(source_index)?;
        let module_height = self.module(module_id)?.height();
        let dest_compartment = self.compartment(dest)?;

        // After detaching from the source, a same-compartment sequence is one
        // shorter; the destination index is validated against that state.
        let dest_len = if source == dest {
            dest_compartment.module_count() - 1
        } else {
            dest_compartment.module_count()
        };
        if dest_index > dest_len {
            return Err(BoardError::IndexOutOfBounds {
                index: dest_index,
                len: dest_len,
            });
        }
        if source != dest && !fits(module_height, dest_compartment.free_height()) {
            return Err(CapacityError::ModuleDoesNotFit {
                needed: module_height,
                free: dest_compartment.free_height(),
            }
            .into());
        }

        let module = self
            .modules
            .get_mut(module_id)
            .ok_or(BoardError::UnknownModule(module_id))?;
        let source_compartment = self
            .compartments
            .get_mut(source)
            .ok_or(BoardError::UnknownCompartment(source))?;
        source_compartment.remove_module(module)?;
        let dest_compartment = self
            .compartments
            .get_mut(dest)
            .ok_or(BoardError::UnknownCompartment(dest))?;
        dest_compartment.add_module(module, Some(dest_index))?;
        Ok(())
    }

    /// Moves the switch at `source_index` of one module to `dest_index` of
    /// another (or the same) module.
    ///
    /// Same contract as [`move_module`](Self::move_module), with width as
    /// the capacity axis.
    pub fn move_switch(
        &mut self,
        source: ModuleId,
        source_index: usize,
        dest: ModuleId,
        dest_index: usize,
    ) -> Result<(), BoardError> {
        let switch_id = self.module(source)?.switch_id_at(source_index)?;
        let switch_width = self.switch(switch_id)?.width();
        let dest_module = self.module(dest)?;

        let dest_len = if source == dest {
            dest_module.switch_count() - 1
        } else {
            dest_module.switch_count()
        };
        if dest_index > dest_len {
            return Err(BoardError::IndexOutOfBounds {
                index: dest_index,
                len: dest_len,
            });
        }
        if source != dest && !fits(switch_width, dest_module.free_width()) {
            return Err(CapacityError::SwitchDoesNotFit {
                needed: switch_width,
                free: dest_module.free_width(),
            }
            .into());
        }

        let switch = self
            .switches
            .get_mut(switch_id)
            .ok_or(BoardError::UnknownSwitch(switch_id))?;
        let source_module = self
            .modules
            .get_mut(source)
            .ok_or(BoardError::UnknownModule(source))?;
        source_module.remove_switch(switch)?;
        let dest_module = self
            .modules
            .get_mut(dest)
            .ok_or(BoardError::UnknownModule(dest))?;
        dest_module.add_switch(switch, Some(dest_index))?;
        Ok(())
    }

    // ── Resizing ──────────────────────────────────────────────────────────────

    /// Applies a partial dimension update to the board.
    ///
    /// Each axis can be shrunk only down to the minimum still containing the
    /// existing compartments: width down to the sum of compartment widths,
    /// height and depth down to the maximum compartment height/depth.  All
    /// three floors are validated before any field is applied.
    ///
    /// # Errors
    ///
    /// [`CapacityError::ShrinkBelowMinimum`] naming the violating axis;
    /// nothing is mutated in that case.
    pub fn resize(&mut self, patch: DimensionsPatch) -> Result<(), CapacityError> {
        let target = self.dimensions.patched(patch);

        let min_width: f64 = self
            .layout
            .iter()
            .filter_map(|&id| self.compartments.get(id))
            .map(|c| c.dimensions().width)
            .sum();
        let min_height = self
            .compartments
            .iter()
            .map(|c| c.dimensions().height)
            .fold(0.0, f64::max);
        let min_depth = self
            .compartments
            .iter()
            .map(|c| c.dimensions().depth)
            .fold(0.0, f64::max);

        for (axis, requested, minimum) in [
            (Axis::Width, target.width, min_width),
            (Axis::Height, target.height, min_height),
            (Axis::Depth, target.depth, min_depth),
        ] {
            if !fits(minimum, requested) {
                return Err(CapacityError::ShrinkBelowMinimum {
                    axis,
                    requested,
                    minimum,
                });
            }
        }

        self.dimensions = target;
        self.free_width = target.width - min_width;
        tracing::debug!(dimensions = %self.dimensions, free = self.free_width, "board resized");
        Ok(())
    }

    /// Applies a partial dimension update to a switch.
    ///
    /// A width change for a placed switch goes through the owning module's
    /// free-width check and adjusts the module's bookkeeping; height/depth
    /// changes are unconstrained.
    ///
    /// # Errors
    ///
    /// [`BoardError::UnknownSwitch`] for an unregistered id;
    /// [`CapacityError::SwitchDoesNotFit`] when the width increase exceeds
    /// the owning module's free width.  Nothing is mutated on failure.
    pub fn resize_switch(&mut self, id: SwitchId, patch: DimensionsPatch) -> Result<(), BoardError> {
        let (owner, old_width) = {
            let switch = self.switch(id)?;
            (switch.owning_module(), switch.width())
        };

        let width_delta = match (patch.width, owner) {
            (Some(new_width), Some(module_id)) => {
                let module = self.module(module_id)?;
                let delta = new_width - old_width;
                if delta > 0.0 && !fits(delta, module.free_width()) {
                    return Err(CapacityError::SwitchDoesNotFit {
                        needed: delta,
                        free: module.free_width(),
                    }
                    .into());
                }
                Some((module_id, delta))
            }
            _ => None,
        };

        let switch = self
            .switches
            .get_mut(id)
            .ok_or(BoardError::UnknownSwitch(id))?;
        switch.apply_dimensions(patch);
        if let Some((module_id, delta)) = width_delta {
            let module = self
                .modules
                .get_mut(module_id)
                .ok_or(BoardError::UnknownModule(module_id))?;
            module.apply_switch_width_delta(delta);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dimensions::{SWITCH_HEIGHT, SWITCH_UNIT_WIDTH};
    use crate::domain::id::EntityId;
    use crate::domain::placement::SwitchBatch;

    fn make_board() -> Board {
        Board::new("HV1", Dimensions::new(525.0, 950.0, 210.0))
    }

    fn compartment_dims() -> Dimensions {
        Dimensions::new(175.0, 300.0, 210.0)
    }

    /// Board with one compartment and one empty 10-unit rail inside it.
    fn board_with_rail() -> (Board, CompartmentId, ModuleId) {
        let mut board = make_board();
        let cid = board
            .create_compartment("Feld 1", "L1", compartment_dims())
            .unwrap();
        let mid = {
            let id = board.modules.next_id();
            let mut module = Module::new(
                id,
                "Module m1",
                "L1",
                Dimensions::new(175.0, SWITCH_HEIGHT, 210.0),
            );
            let compartment = board.compartments.get_mut(cid).unwrap();
            compartment.add_module(&mut module, None).unwrap();
            board.modules.insert(module)
        };
        (board, cid, mid)
    }

    fn batch(count: usize, code: &str) -> SwitchBatch {
        SwitchBatch {
            count,
            name: None,
            description: "breaker".to_string(),
            prefix: code.parse().unwrap(),
            feed: "L1".to_string(),
        }
    }

    // ── create_compartment ────────────────────────────────────────────────────

    #[test]
    fn test_create_compartment_consumes_free_width_and_extends_layout() {
        let mut board = make_board();

        let id = board
            .create_compartment("Feld 1", "L1", compartment_dims())
            .unwrap();

        assert_eq!(board.layout(), &[id]);
        assert_eq!(board.free_width(), 525.0 - 175.0);
        assert_eq!(board.compartment_count(), 1);
    }

    #[test]
    fn test_create_compartment_rejects_excess_height() {
        let mut board = make_board();

        let err = board
            .create_compartment("Feld 1", "L1", Dimensions::new(175.0, 1000.0, 210.0))
            .unwrap_err();

        assert!(matches!(
            err,
            CapacityError::CompartmentExceedsBoard {
                axis: Axis::Height,
                ..
            }
        ));
        assert_eq!(board.compartment_count(), 0);
        assert_eq!(board.free_width(), 525.0);
    }

    #[test]
    fn test_create_compartment_rejects_excess_depth() {
        let mut board = make_board();

        let err = board
            .create_compartment("Feld 1", "L1", Dimensions::new(175.0, 300.0, 500.0))
            .unwrap_err();

        assert!(matches!(
            err,
            CapacityError::CompartmentExceedsBoard {
                axis: Axis::Depth,
                ..
            }
        ));
    }

    #[test]
    fn test_create_compartment_rejects_insufficient_width() {
        let mut board = make_board();
        board
            .create_compartment("Feld 1", "L1", Dimensions::new(400.0, 300.0, 210.0))
            .unwrap();

        let err = board
            .create_compartment("Feld 2", "L1", compartment_dims())
            .unwrap_err();

        assert!(matches!(err, CapacityError::InsufficientBoardWidth { .. }));
        assert_eq!(board.compartment_count(), 1);
        assert_eq!(board.free_width(), 125.0);
    }

    // ── Deletes ───────────────────────────────────────────────────────────────

    #[test]
    fn test_delete_switch_removes_from_registry_and_module() {
        let (mut board, _, mid) = board_with_rail();
        let ids = board.place_switch_batch(&batch(2, "2X16A")).unwrap();

        board.delete_switch(ids[0]).unwrap();

        assert_eq!(board.switch_count(), 1);
        assert_eq!(board.module(mid).unwrap().switch_ids(), &[ids[1]]);
        assert_eq!(
            board.module(mid).unwrap().occupied_width(),
            2.0 * SWITCH_UNIT_WIDTH
        );
    }

    #[test]
    fn test_delete_switch_unknown_id_is_an_error() {
        let (mut board, _, _) = board_with_rail();
        let before = board.clone();

        let err = board.delete_switch(SwitchId::from_index(99)).unwrap_err();

        assert_eq!(err, BoardError::UnknownSwitch(SwitchId::from_index(99)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_delete_module_with_switches_cascades() {
        let (mut board, cid, mid) = board_with_rail();
        board.place_switch_batch(&batch(3, "2X16A")).unwrap();

        board.delete_module_with_switches(mid).unwrap();

        assert_eq!(board.module_count(), 0);
        assert_eq!(board.switch_count(), 0);
        let compartment = board.compartment(cid).unwrap();
        assert!(compartment.is_empty());
        assert_eq!(compartment.occupied_height(), 0.0);
    }

    #[test]
    fn test_delete_module_unknown_id_is_an_error() {
        let (mut board, _, _) = board_with_rail();
        let before = board.clone();

        let err = board
            .delete_module_with_switches(ModuleId::from_index(42))
            .unwrap_err();

        assert_eq!(err, BoardError::UnknownModule(ModuleId::from_index(42)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_delete_compartment_cascades_and_restores_width() {
        let (mut board, cid, _) = board_with_rail();
        board.place_switch_batch(&batch(3, "2X16A")).unwrap();

        board.delete_compartment_and_modules(cid).unwrap();

        assert_eq!(board.compartment_count(), 0);
        assert_eq!(board.module_count(), 0);
        assert_eq!(board.switch_count(), 0);
        assert!(board.layout().is_empty());
        assert_eq!(board.free_width(), 525.0);
    }

    #[test]
    fn test_clear_board_empties_every_registry() {
        let (mut board, _, _) = board_with_rail();
        board
            .create_compartment("Feld 2", "L2", compartment_dims())
            .unwrap();
        board.place_switch_batch(&batch(2, "1X10A")).unwrap();

        board.clear_board().unwrap();

        assert_eq!(board.compartment_count(), 0);
        assert_eq!(board.module_count(), 0);
        assert_eq!(board.switch_count(), 0);
        assert_eq!(board.free_width(), board.dimensions().width);
    }

    // ── Reordering and moves ──────────────────────────────────────────────────

    #[test]
    fn test_reorder_compartment_changes_display_sequence_only() {
        let mut board = make_board();
        let a = board
            .create_compartment("A", "L1", compartment_dims())
            .unwrap();
        let b = board
            .create_compartment("B", "L1", compartment_dims())
            .unwrap();
        let c = board
            .create_compartment("C", "L1", compartment_dims())
            .unwrap();

        board.reorder_compartment(0, 2).unwrap();

        assert_eq!(board.layout(), &[b, c, a]);
        assert_eq!(board.free_width(), 0.0);
    }

    #[test]
    fn test_reorder_compartment_rejects_out_of_range_indices() {
        let mut board = make_board();
        board
            .create_compartment("A", "L1", compartment_dims())
            .unwrap();

        let err = board.reorder_compartment(0, 3).unwrap_err();

        assert_eq!(err, BoardError::IndexOutOfBounds { index: 3, len: 1 });
    }

    #[test]
    fn test_move_module_between_compartments_updates_bookkeeping() {
        let (mut board, source, mid) = board_with_rail();
        let dest = board
            .create_compartment("Feld 2", "L2", compartment_dims())
            .unwrap();

        board.move_module(source, 0, dest, 0).unwrap();

        assert!(board.compartment(source).unwrap().is_empty());
        assert_eq!(board.compartment(dest).unwrap().module_ids(), &[mid]);
        assert_eq!(
            board.module(mid).unwrap().owning_compartment(),
            Some(dest)
        );
        assert_eq!(
            board.compartment(dest).unwrap().occupied_height(),
            SWITCH_HEIGHT
        );
    }

    #[test]
    fn test_move_module_rejects_full_destination() {
        let (mut board, source, _) = board_with_rail();
        // Destination too short for any rail
        let dest = board
            .create_compartment("Low", "L2", Dimensions::new(175.0, 50.0, 210.0))
            .unwrap();
        let before = board.clone();

        let err = board.move_module(source, 0, dest, 0).unwrap_err();

        assert!(matches!(
            err,
            BoardError::Capacity(CapacityError::ModuleDoesNotFit { .. })
        ));
        assert_eq!(board, before);
    }

    #[test]
    fn test_move_switch_within_module_reorders() {
        let (mut board, _, mid) = board_with_rail();
        let ids = board.place_switch_batch(&batch(3, "1X10A")).unwrap();

        board.move_switch(mid, 0, mid, 2).unwrap();

        assert_eq!(
            board.module(mid).unwrap().switch_ids(),
            &[ids[1], ids[2], ids[0]]
        );
    }

    #[test]
    fn test_move_switch_rejects_full_destination() {
        let (mut board, cid, source) = board_with_rail();
        board.place_switch_batch(&batch(10, "1X10A")).unwrap();
        // Second rail, fill it completely too
        let dest = {
            let id = board.modules.next_id();
            let mut module = Module::new(
                id,
                "Module m2",
                "L1",
                Dimensions::new(175.0, SWITCH_HEIGHT, 210.0),
            );
            let compartment = board.compartments.get_mut(cid).unwrap();
            compartment.add_module(&mut module, None).unwrap();
            board.modules.insert(module)
        };
        board.place_switch_batch(&batch(10, "1X10A")).unwrap();
        let before = board.clone();

        let err = board.move_switch(source, 0, dest, 0).unwrap_err();

        assert!(matches!(
            err,
            BoardError::Capacity(CapacityError::SwitchDoesNotFit { .. })
        ));
        assert_eq!(board, before);
    }

    // ── Resizing ──────────────────────────────────────────────────────────────

    #[test]
    fn test_resize_grows_free_width() {
        let mut board = make_board();
        board
            .create_compartment("A", "L1", compartment_dims())
            .unwrap();

        board.resize(DimensionsPatch::width(700.0)).unwrap();

        assert_eq!(board.dimensions().width, 700.0);
        assert_eq!(board.free_width(), 700.0 - 175.0);
    }

    #[test]
    fn test_resize_shrink_to_exact_minimum_succeeds() {
        let mut board = make_board();
        board
            .create_compartment("A", "L1", compartment_dims())
            .unwrap();
        board
            .create_compartment("B", "L1", compartment_dims())
            .unwrap();

        board.resize(DimensionsPatch::width(350.0)).unwrap();

        assert_eq!(board.free_width(), 0.0);
    }

    #[test]
    fn test_resize_below_width_minimum_is_rejected_atomically() {
        let mut board = make_board();
        board
            .create_compartment("A", "L1", compartment_dims())
            .unwrap();
        let before = board.clone();

        // Width floor is violated; the valid height change must not be
        // applied either.
        let err = board
            .resize(DimensionsPatch {
                width: Some(100.0),
                height: Some(800.0),
                depth: None,
            })
            .unwrap_err();

        assert!(matches!(
            err,
            CapacityError::ShrinkBelowMinimum {
                axis: Axis::Width,
                ..
            }
        ));
        assert_eq!(board, before);
    }

    #[test]
    fn test_resize_below_height_minimum_is_rejected() {
        let mut board = make_board();
        board
            .create_compartment("A", "L1", compartment_dims())
            .unwrap();

        let err = board.resize(DimensionsPatch::height(200.0)).unwrap_err();

        assert!(matches!(
            err,
            CapacityError::ShrinkBelowMinimum {
                axis: Axis::Height,
                ..
            }
        ));
    }

    #[test]
    fn test_resize_empty_board_allows_any_positive_dimensions() {
        let mut board = make_board();

        board
            .resize(DimensionsPatch {
                width: Some(10.0),
                height: Some(10.0),
                depth: Some(10.0),
            })
            .unwrap();

        assert_eq!(board.dimensions(), Dimensions::new(10.0, 10.0, 10.0));
        assert_eq!(board.free_width(), 10.0);
    }

    #[test]
    fn test_resize_switch_width_checks_owning_module() {
        let (mut board, _, mid) = board_with_rail();
        let ids = board.place_switch_batch(&batch(1, "9X16A")).unwrap();

        // 1 unit free; growing the switch by 2 units must fail
        let err = board
            .resize_switch(ids[0], DimensionsPatch::width(11.0 * SWITCH_UNIT_WIDTH))
            .unwrap_err();
        assert!(matches!(
            err,
            BoardError::Capacity(CapacityError::SwitchDoesNotFit { .. })
        ));

        // Growing by the one free unit succeeds and books the width
        board
            .resize_switch(ids[0], DimensionsPatch::width(10.0 * SWITCH_UNIT_WIDTH))
            .unwrap();
        assert_eq!(board.module(mid).unwrap().free_width(), 0.0);
        assert_eq!(
            board.switch(ids[0]).unwrap().width(),
            10.0 * SWITCH_UNIT_WIDTH
        );
    }

    // ── Clone ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_clone_is_structurally_independent() {
        let (mut board, cid, _) = board_with_rail();
        board.place_switch_batch(&batch(2, "2X16A")).unwrap();

        let mut copy = board.clone();
        assert_eq!(copy, board);

        copy.delete_compartment_and_modules(cid).unwrap();

        assert_eq!(board.compartment_count(), 1, "original must be untouched");
        assert_eq!(board.switch_count(), 2);
        assert_eq!(copy.compartment_count(), 0);
    }
}
