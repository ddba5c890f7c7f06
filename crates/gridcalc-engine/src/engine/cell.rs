//! Cell data structures for the spreadsheet grid.
//!
//! - [`Cell`] - The stored unit: the text the user entered plus its last computed display
//! - [`CellKind`] - Which state a cell is in (empty, literal, or formula)

use serde::{Deserialize, Serialize};

/// Display marker for a formula the evaluator rejected.
pub const ERROR_MARKER: &str = "ERROR";
/// Display marker for a formula on (or downstream of) a reference cycle.
pub const CIRCULAR_MARKER: &str = "CIRCULAR_REF";
/// Display marker for a formula with a reference outside the grid (strict mode).
pub const REF_ERROR_MARKER: &str = "REF_ERROR";

/// Conceptual state of a cell. Every edit moves a cell directly to a new
/// `Literal` or `Formula`; there are no intermediate states.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CellKind {
    Empty,
    Literal,
    Formula,
}

/// A stored cell. `display` equals `raw` for literals and holds the
/// evaluation result (or a marker) for formulas.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub raw: String,
    pub display: String,
}

impl Cell {
    pub fn new(raw: impl Into<String>, display: impl Into<String>) -> Cell {
        Cell {
            raw: raw.into(),
            display: display.into(),
        }
    }

    /// A literal cell shows its raw text verbatim.
    pub fn literal(raw: &str) -> Cell {
        Cell::new(raw, raw)
    }

    pub fn kind(&self) -> CellKind {
        if self.raw.is_empty() {
            CellKind::Empty
        } else if self.is_formula() {
            CellKind::Formula
        } else {
            CellKind::Literal
        }
    }

    pub fn is_formula(&self) -> bool {
        self.raw.starts_with('=')
    }

    /// The expression after the leading `=`, if this is a formula cell.
    pub fn formula(&self) -> Option<&str> {
        self.raw.strip_prefix('=')
    }
}
