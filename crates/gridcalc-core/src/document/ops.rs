use log::debug;

use super::Document;
use crate::error::{GridError, Result};
use crate::store::GridState;
use gridcalc_engine::engine::{Cell, CellId};

impl Document {
    /// Commit the text a user entered into a cell.
    ///
    /// The text is trimmed and stored; a formula (leading `=`) is evaluated
    /// against current display values, then every formula cell is recomputed
    /// and the resulting state persisted. Formula problems never fail the
    /// commit; they show up as display markers.
    ///
    /// Errors: the cell is outside the grid (nothing changes), or writing the
    /// new state to storage failed (the in-memory state is already updated).
    pub fn commit_edit(&mut self, id: CellId, raw_text: &str) -> Result<GridState> {
        if !self.dims().contains(&id) {
            return Err(GridError::OutOfBounds {
                row: id.row,
                col: id.col,
            });
        }

        let raw = raw_text.trim();
        let display = self.compute_display(raw);
        debug!("Commit {id}: raw={raw:?} display={display:?}");
        self.store.set(id, Cell::new(raw, display))?;

        self.recalculate();

        let snapshot = self.store.snapshot();
        self.persist(&snapshot)?;
        Ok(snapshot)
    }

    /// [`Document::commit_edit`] addressed by label (e.g. `"B3"`).
    pub fn commit_label(&mut self, label: &str, raw_text: &str) -> Result<GridState> {
        let id = self.resolve_label(label)?;
        self.commit_edit(id, raw_text)
    }
}
