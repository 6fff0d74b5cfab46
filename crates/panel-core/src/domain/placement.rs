//! The placement engine: fitting a homogeneous switch batch onto the board.
//!
//! Placing a batch is attempted in three escalating strategies:
//!
//! 1. **Single-module fit** — the first module (in registry order) whose
//!    free width takes the entire batch gets all of it.  Cheapest and most
//!    locality-preserving.
//! 2. **Multi-module spread** — if no single module suffices but the free
//!    slots across all existing modules do, the batch is distributed
//!    greedily in registry order, filling each module's slots before moving
//!    on.
//! 3. **Grow-and-fit** — otherwise, new modules (one rail each, sized to
//!    the switch height and the compartment's width/depth) are planned per
//!    compartment in registry order, as many as each compartment's free
//!    height takes, until the remainder of the batch is covered.
//!
//! The whole operation is *planned* against an immutable board first; only a
//! fully feasible plan is executed.  If even strategy 3 cannot cover the
//! batch, the operation fails with [`CapacityError::BoardExhausted`] and the
//! board is untouched — all or nothing, never a partial placement.

use tracing::debug;

use crate::domain::board::Board;
use crate::domain::dimensions::{slot_count, Dimensions, SWITCH_HEIGHT};
use crate::domain::error::{BoardError, CapacityError};
use crate::domain::id::{CompartmentId, ModuleId, SwitchId};
use crate::domain::module::Module;
use crate::domain::switch::{Switch, SwitchPrefix};

/// Parameters for one switch batch, as collected by the input form.
///
/// A batch is always a single size class: every created switch shares the
/// prefix and therefore the width.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchBatch {
    /// Number of switches to create and place.
    pub count: usize,
    /// Display name for each created switch; defaults to the prefix code.
    pub name: Option<String>,
    pub description: String,
    pub prefix: SwitchPrefix,
    pub feed: String,
}

impl SwitchBatch {
    fn switch_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.prefix.code())
    }
}

/// One module receiving part of a spread batch.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ModuleFill {
    module: ModuleId,
    count: usize,
}

/// One new module to be built during grow-and-fit.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlannedModule {
    compartment: CompartmentId,
    dimensions: Dimensions,
    count: usize,
}

/// A fully feasible placement, computed before any mutation.
#[derive(Debug, Clone, PartialEq)]
enum PlacementPlan {
    /// Strategy 1: the whole batch goes into one existing module.
    SingleModule { module: ModuleId },
    /// Strategy 2: the batch is spread over existing modules.
    Spread { fills: Vec<ModuleFill> },
    /// Strategy 3: existing modules take what they can; new modules are
    /// built for the remainder.
    Grow {
        fills: Vec<ModuleFill>,
        new_modules: Vec<PlannedModule>,
    },
}

impl Board {
    /// Creates `batch.count` switches and places them on the board using the
    /// three-strategy escalation described in the module docs.
    ///
    /// Returns the created switch ids in placement order.
    ///
    /// # Errors
    ///
    /// [`CapacityError::BoardExhausted`] when existing modules plus every
    /// buildable new module still cannot hold the batch; the board is left
    /// unmutated.
    pub fn place_switch_batch(&mut self, batch: &SwitchBatch) -> Result<Vec<SwitchId>, BoardError> {
        if batch.count == 0 {
            return Ok(Vec::new());
        }
        let switch_width = batch.prefix.unit_width();

        let plan = self.plan_placement(batch.count, switch_width)?;
        match &plan {
            PlacementPlan::SingleModule { module } => {
                debug!(count = batch.count, module = %module, "placing batch in a single module");
            }
            PlacementPlan::Spread { fills } => {
                debug!(count = batch.count, modules = fills.len(), "spreading batch over existing modules");
            }
            PlacementPlan::Grow { fills, new_modules } => {
                debug!(
                    count = batch.count,
                    existing = fills.len(),
                    new_modules = new_modules.len(),
                    "growing board with new modules for batch"
                );
            }
        }

        self.execute_plan(batch, plan)
    }

    /// Computes a feasible plan without touching any state.
    fn plan_placement(&self, count: usize, switch_width: f64) -> Result<PlacementPlan, CapacityError> {
        // Strategy 1: one module that takes everything.
        for module in self.modules.iter() {
            if module.batch_capacity(switch_width) >= count {
                return Ok(PlacementPlan::SingleModule {
                    module: module.id(),
                });
            }
        }

        // Strategy 2: greedy spread over existing free slots.
        let mut fills = Vec::new();
        let mut covered = 0;
        for module in self.modules.iter() {
            if covered == count {
                break;
            }
            let capacity = module.batch_capacity(switch_width);
            if capacity == 0 {
                continue;
            }
            let take = capacity.min(count - covered);
            fills.push(ModuleFill {
                module: module.id(),
                count: take,
            });
            covered += take;
        }
        if covered == count {
            return Ok(PlacementPlan::Spread { fills });
        }

        // Strategy 3: build new modules for the remainder, compartment by
        // compartment in registry order.
        let mut new_modules = Vec::new();
        let mut remaining = count - covered;
        for compartment in self.compartments.iter() {
            if remaining == 0 {
                break;
            }
            let rail_dims = Dimensions::new(
                compartment.dimensions().width,
                SWITCH_HEIGHT,
                compartment.dimensions().depth,
            );
            let slots_per_rail = slot_count(rail_dims.width, switch_width);
            if slots_per_rail == 0 {
                continue;
            }
            let mut buildable = compartment.batch_capacity(rail_dims.height);
            while remaining > 0 && buildable > 0 {
                let take = slots_per_rail.min(remaining);
                new_modules.push(PlannedModule {
                    compartment: compartment.id(),
                    dimensions: rail_dims,
                    count: take,
                });
                remaining -= take;
                buildable -= 1;
            }
        }

        if remaining > 0 {
            return Err(CapacityError::BoardExhausted {
                count,
                capacity: count - remaining,
            });
        }
        Ok(PlacementPlan::Grow { fills, new_modules })
    }

    /// Executes a plan that `plan_placement` has already proven feasible.
    fn execute_plan(
        &mut self,
        batch: &SwitchBatch,
        plan: PlacementPlan,
    ) -> Result<Vec<SwitchId>, BoardError> {
        let mut created = Vec::with_capacity(batch.count);
        match plan {
            PlacementPlan::SingleModule { module } => {
                self.fill_module(batch, module, batch.count, &mut created)?;
            }
            PlacementPlan::Spread { fills } => {
                for fill in fills {
                    self.fill_module(batch, fill.module, fill.count, &mut created)?;
                }
            }
            PlacementPlan::Grow { fills, new_modules } => {
                // Existing modules first, then the new rails are built and
                // attached, then the remainder flows into them.
                for fill in &fills {
                    self.fill_module(batch, fill.module, fill.count, &mut created)?;
                }
                let mut built = Vec::with_capacity(new_modules.len());
                for planned in &new_modules {
                    let id = self.modules.next_id();
                    let mut module =
                        Module::new(id, format!("Module {id}"), batch.feed.clone(), planned.dimensions);
                    let compartment = self
                        .compartments
                        .get_mut(planned.compartment)
                        .ok_or(BoardError::UnknownCompartment(planned.compartment))?;
                    compartment.add_module(&mut module, None)?;
                    built.push(self.modules.insert(module));
                }
                for (planned, module_id) in new_modules.iter().zip(built) {
                    self.fill_module(batch, module_id, planned.count, &mut created)?;
                }
            }
        }
        debug!(placed = created.len(), "switch batch placed");
        Ok(created)
    }

    /// Creates `count` switches from the batch parameters and appends them
    /// to the given module.
    fn fill_module(
        &mut self,
        batch: &SwitchBatch,
        module_id: ModuleId,
        count: usize,
        created: &mut Vec<SwitchId>,
    ) -> Result<(), BoardError> {
        for _ in 0..count {
            let id = self.switches.next_id();
            let mut switch = Switch::new(
                id,
                batch.switch_name(),
                batch.description.clone(),
                batch.prefix.clone(),
                batch.feed.clone(),
            );
            let module = self
                .modules
                .get_mut(module_id)
                .ok_or(BoardError::UnknownModule(module_id))?;
            module.add_switch(&mut switch, None)?;
            created.push(self.switches.insert(switch));
        }
        Ok(())
    }
}
