//! Cell storage.
//!
//! - [`CellStore`] - The single owner of all cell state, bounds-checked
//! - [`GridState`] - Immutable snapshot handed to rendering and persistence
//!
//! Both are keyed by [`CellId`] in a `BTreeMap`, so iteration is row-major.
//! Cells never given content are absent and read as empty.

use std::collections::BTreeMap;

use log::warn;

use crate::error::{GridError, Result};
use gridcalc_engine::engine::{Cell, CellId, GridDims};

/// Snapshot of every stored cell at one point in time.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GridState {
    cells: BTreeMap<CellId, Cell>,
}

impl GridState {
    pub fn from_cells<I>(cells: I) -> GridState
    where
        I: IntoIterator<Item = (CellId, Cell)>,
    {
        GridState {
            cells: cells.into_iter().collect(),
        }
    }

    pub fn get(&self, id: &CellId) -> Option<&Cell> {
        self.cells.get(id)
    }

    /// Display value of a cell, empty for cells never set.
    pub fn display(&self, id: &CellId) -> &str {
        self.cells.get(id).map_or("", |cell| cell.display.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CellId, &Cell)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Sparse, bounds-checked mapping from cell to stored cell.
#[derive(Clone, Debug)]
pub struct CellStore {
    dims: GridDims,
    cells: BTreeMap<CellId, Cell>,
}

impl CellStore {
    pub fn new(dims: GridDims) -> CellStore {
        CellStore {
            dims,
            cells: BTreeMap::new(),
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    fn check_bounds(&self, id: &CellId) -> Result<()> {
        if self.dims.contains(id) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                row: id.row,
                col: id.col,
            })
        }
    }

    /// The stored cell, or an empty one if the cell was never set.
    pub fn get(&self, id: &CellId) -> Result<Cell> {
        self.check_bounds(id)?;
        Ok(self.cells.get(id).cloned().unwrap_or_default())
    }

    /// Borrow a stored cell without the empty-cell fallback.
    pub fn lookup(&self, id: &CellId) -> Option<&Cell> {
        self.cells.get(id)
    }

    pub fn set(&mut self, id: CellId, cell: Cell) -> Result<()> {
        self.check_bounds(&id)?;
        self.cells.insert(id, cell);
        Ok(())
    }

    /// Overwrite only the display of an already stored cell.
    pub(crate) fn set_display(&mut self, id: &CellId, display: String) {
        if let Some(cell) = self.cells.get_mut(id) {
            cell.display = display;
        }
    }

    pub fn snapshot(&self) -> GridState {
        GridState {
            cells: self.cells.clone(),
        }
    }

    /// Replace all cells with a snapshot. Entries outside this store's grid are dropped.
    pub fn restore(&mut self, state: GridState) {
        let before = state.len();
        let dims = self.dims;
        self.cells = state
            .cells
            .into_iter()
            .filter(|(id, _)| dims.contains(id))
            .collect();
        let dropped = before - self.cells.len();
        if dropped > 0 {
            warn!("Dropped {dropped} restored cell(s) outside the {}x{} grid", dims.rows, dims.cols);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CellId, &Cell)> {
        self.cells.iter()
    }

    /// Formula cells in row-major order.
    pub fn formula_ids(&self) -> Vec<CellId> {
        self.cells
            .iter()
            .filter(|(_, cell)| cell.is_formula())
            .map(|(id, _)| *id)
            .collect()
    }

    /// `(cell, expression)` for every formula cell, row-major.
    pub fn formulas(&self) -> impl Iterator<Item = (CellId, &str)> {
        self.cells
            .iter()
            .filter_map(|(id, cell)| cell.formula().map(|formula| (*id, formula)))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
