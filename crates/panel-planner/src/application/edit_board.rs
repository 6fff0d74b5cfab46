//! EditBoardUseCase: copy-on-write transactions over the live board.
//!
//! Every edit the planner makes goes through [`BoardStore::transaction`]: the
//! store clones the published board, hands the clone to the edit closure, and
//! publishes the clone only if the closure succeeds.  A refused or failed edit
//! discards the clone, so the published board is never observed half-mutated —
//! subscribers either see the state before the edit or the state after it.
//!
//! # Why clone instead of editing in place? (for beginners)
//!
//! The domain operations already guarantee that a *single* refused operation
//! leaves the board untouched.  But an edit at this layer is often a sequence
//! (create a compartment, then place a batch into it), and if step two fails
//! the board must roll back past step one as well.  Because `Board` stores its
//! entities in flat id-indexed registries, `Board::clone()` is a complete deep
//! copy with no shared state, which makes "work on a copy, swap on success"
//! both correct and cheap at board scale (hundreds of switches, not millions).

use panel_core::{
    Board, BoardError, CompartmentId, Dimensions, DimensionsPatch, ModuleId, SwitchBatch,
    SwitchId,
};
use tracing::{debug, info};

/// Receives the new board state after every committed transaction.
///
/// The UI bridge implements this to re-render; tests implement it (via
/// `mockall`) to observe publication.
#[cfg_attr(test, mockall::automock)]
pub trait PublishListener: Send {
    /// Called after a transaction commits.  `revision` increases by one per
    /// committed transaction and never repeats within a store's lifetime.
    fn board_published(&mut self, board: &Board, revision: u64);
}

/// Owns the live board and serialises all edits through transactions.
pub struct BoardStore {
    board: Board,
    revision: u64,
    listeners: Vec<Box<dyn PublishListener>>,
}

impl BoardStore {
    /// Creates a store around an initial board at revision 0.
    pub fn new(board: Board) -> Self {
        Self {
            board,
            revision: 0,
            listeners: Vec::new(),
        }
    }

    /// The currently published board.  Reads never require a transaction.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of transactions committed so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers a listener that is notified on every commit.
    pub fn subscribe(&mut self, listener: Box<dyn PublishListener>) {
        self.listeners.push(listener);
    }

    /// Runs `edit` against a working copy of the board.
    ///
    /// On `Ok` the working copy replaces the published board, the revision is
    /// bumped, and all listeners are notified.  On `Err` the working copy is
    /// dropped and the published board is untouched.
    ///
    /// # Errors
    ///
    /// Propagates whatever the edit closure returns.
    pub fn transaction<T>(
        &mut self,
        edit: impl FnOnce(&mut Board) -> Result<T, BoardError>,
    ) -> Result<T, BoardError> {
        let mut working = self.board.clone();
        match edit(&mut working) {
            Ok(value) => {
                self.board = working;
                self.revision += 1;
                debug!(revision = self.revision, "board transaction committed");
                for listener in &mut self.listeners {
                    listener.board_published(&self.board, self.revision);
                }
                Ok(value)
            }
            Err(e) => {
                debug!(error = %e, "board transaction discarded");
                Err(e)
            }
        }
    }

    // ── Convenience entry points ──────────────────────────────────────────────
    //
    // One wrapper per board operation, so callers that perform a single edit
    // do not have to spell out the transaction closure.

    /// Adds a compartment and publishes the result.
    pub fn create_compartment(
        &mut self,
        name: impl Into<String>,
        feed: impl Into<String>,
        dimensions: Dimensions,
    ) -> Result<CompartmentId, BoardError> {
        let (name, feed) = (name.into(), feed.into());
        info!(name = %name, "creating compartment");
        self.transaction(|board| {
            board
                .create_compartment(name, feed, dimensions)
                .map_err(BoardError::from)
        })
    }

    /// Places a switch batch and publishes the result.
    pub fn place_switch_batch(&mut self, batch: &SwitchBatch) -> Result<Vec<SwitchId>, BoardError> {
        info!(count = batch.count, prefix = %batch.prefix, "placing switch batch");
        self.transaction(|board| board.place_switch_batch(batch))
    }

    /// Deletes a single switch.
    pub fn delete_switch(&mut self, id: SwitchId) -> Result<(), BoardError> {
        info!(switch = %id, "deleting switch");
        self.transaction(|board| board.delete_switch(id))
    }

    /// Deletes a module together with every switch on it.
    pub fn delete_module(&mut self, id: ModuleId) -> Result<(), BoardError> {
        info!(module = %id, "deleting module");
        self.transaction(|board| board.delete_module_with_switches(id))
    }

    /// Deletes a compartment together with its modules and their switches.
    pub fn delete_compartment(&mut self, id: CompartmentId) -> Result<(), BoardError> {
        info!(compartment = %id, "deleting compartment");
        self.transaction(|board| board.delete_compartment_and_modules(id))
    }

    /// Removes every compartment from the board.
    pub fn clear_board(&mut self) -> Result<(), BoardError> {
        info!("clearing board");
        self.transaction(Board::clear_board)
    }

    /// Moves a compartment within the display sequence.
    pub fn reorder_compartment(&mut self, from: usize, to: usize) -> Result<(), BoardError> {
        self.transaction(|board| board.reorder_compartment(from, to))
    }

    /// Moves a module between (or within) compartments.
    pub fn move_module(
        &mut self,
        source: CompartmentId,
        source_index: usize,
        dest: CompartmentId,
        dest_index: usize,
    ) -> Result<(), BoardError> {
        self.transaction(|board| board.move_module(source, source_index, dest, dest_index))
    }

    /// Moves a switch between (or within) modules.
    pub fn move_switch(
        &mut self,
        source: ModuleId,
        source_index: usize,
        dest: ModuleId,
        dest_index: usize,
    ) -> Result<(), BoardError> {
        self.transaction(|board| board.move_switch(source, source_index, dest, dest_index))
    }

    /// Resizes the board enclosure.
    pub fn resize_board(&mut self, patch: DimensionsPatch) -> Result<(), BoardError> {
        self.transaction(|board| board.resize(patch).map_err(BoardError::from))
    }

    /// Resizes a single switch.
    pub fn resize_switch(&mut self, id: SwitchId, patch: DimensionsPatch) -> Result<(), BoardError> {
        self.transaction(|board| board.resize_switch(id, patch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_core::CapacityError;

    fn store() -> BoardStore {
        BoardStore::new(Board::new("HV1", Dimensions::new(525.0, 950.0, 210.0)))
    }

    fn compartment_dims() -> Dimensions {
        Dimensions::new(175.0, 300.0, 210.0)
    }

    fn batch(count: usize) -> SwitchBatch {
        SwitchBatch {
            count,
            name: None,
            description: "breaker".to_string(),
            prefix: "1X10A".parse().unwrap(),
            feed: "L1".to_string(),
        }
    }

    #[test]
    fn test_committed_transaction_bumps_revision() {
        let mut store = store();
        assert_eq!(store.revision(), 0);

        store
            .create_compartment("Feld 1", "L1", compartment_dims())
            .unwrap();
        assert_eq!(store.revision(), 1);

        store.place_switch_batch(&batch(3)).unwrap();
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn test_failed_transaction_keeps_board_and_revision() {
        let mut store = store();
        store
            .create_compartment("Feld 1", "L1", compartment_dims())
            .unwrap();
        let before = store.board().clone();
        let revision = store.revision();

        let err = store.place_switch_batch(&batch(10_000)).unwrap_err();

        assert!(matches!(
            err,
            BoardError::Capacity(CapacityError::BoardExhausted { .. })
        ));
        assert_eq!(store.board(), &before);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_multi_step_transaction_rolls_back_as_a_unit() {
        let mut store = store();
        store
            .create_compartment("Feld 1", "L1", compartment_dims())
            .unwrap();
        let before = store.board().clone();
        let revision = store.revision();

        // Step one succeeds on the working copy, step two fails: neither
        // may reach the published board.
        let result = store.transaction(|board| {
            board.create_compartment(
                "Feld 2".to_string(),
                "L2".to_string(),
                compartment_dims(),
            )?;
            board.place_switch_batch(&batch(10_000))?;
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(store.board(), &before);
        assert_eq!(store.board().compartment_count(), 1);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_listener_is_notified_once_per_commit_with_increasing_revision() {
        let mut listener = MockPublishListener::new();
        let mut seq = mockall::Sequence::new();
        listener
            .expect_board_published()
            .withf(|board, revision| *revision == 1 && board.compartment_count() == 1)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        listener
            .expect_board_published()
            .withf(|board, revision| *revision == 2 && board.switch_count() == 3)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut store = store();
        store.subscribe(Box::new(listener));

        store
            .create_compartment("Feld 1", "L1", compartment_dims())
            .unwrap();
        store.place_switch_batch(&batch(3)).unwrap();
    }

    #[test]
    fn test_listener_is_not_notified_on_discarded_transaction() {
        let mut listener = MockPublishListener::new();
        listener.expect_board_published().times(0);

        let mut store = store();
        store.subscribe(Box::new(listener));

        assert!(store.place_switch_batch(&batch(1)).is_err());
    }

    #[test]
    fn test_convenience_wrappers_drive_the_published_board() {
        let mut store = store();
        let c1 = store
            .create_compartment("Feld 1", "L1", compartment_dims())
            .unwrap();
        let c2 = store
            .create_compartment("Feld 2", "L2", compartment_dims())
            .unwrap();
        let ids = store.place_switch_batch(&batch(4)).unwrap();

        store.reorder_compartment(0, 1).unwrap();
        assert_eq!(store.board().layout(), &[c2, c1]);

        store.move_module(c1, 0, c2, 0).unwrap();
        assert_eq!(store.board().compartment(c2).unwrap().module_count(), 1);

        store.delete_switch(ids[0]).unwrap();
        assert_eq!(store.board().switch_count(), 3);

        store.delete_compartment(c2).unwrap();
        assert_eq!(store.board().switch_count(), 0);

        store.clear_board().unwrap();
        assert_eq!(store.board().compartment_count(), 0);
    }
}
