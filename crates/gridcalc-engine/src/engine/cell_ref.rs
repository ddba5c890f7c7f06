//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell labels
//! (e.g., "A1", "B2", "J10") and zero-indexed row/column coordinates.
//!
//! Labels are one uppercase column letter followed by a 1-based row number.
//! Whether a label names a real cell depends on the grid dimensions, so the
//! bounded lookup lives on [`GridDims`].
//!
//! # Examples
//!
//! ```
//! use gridcalc_engine::engine::{CellId, GridDims};
//!
//! let dims = GridDims::default();
//! let cell = dims.label_to_id("B3").unwrap();
//! assert_eq!(cell.row, 2); // 0-indexed
//! assert_eq!(cell.col, 1);
//! assert_eq!(dims.id_to_label(&cell), "B3");
//! assert!(dims.label_to_id("K1").is_none()); // column 10 is outside a 10x10 grid
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Largest number of columns a single-letter label can address.
pub const MAX_COLS: usize = 26;

/// A grid position by row and column indices (0-indexed).
///
/// Ordering is row-major, which is also the order of a recalculation pass.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellId {
    pub row: usize,
    pub col: usize,
}

impl CellId {
    pub fn new(row: usize, col: usize) -> CellId {
        CellId { row, col }
    }

    /// Parse a label without any bounds check beyond the single-letter column.
    /// Returns None if the input does not look like `[A-Z][0-9]+` or names row 0.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(label: &str) -> Option<CellId> {
        Self::parse_label(label)
    }

    fn parse_label(label: &str) -> Option<CellId> {
        let caps = label_re().captures(label)?;
        let letter = caps["letter"].as_bytes()[0];
        let col = (letter - b'A') as usize;
        let row = caps["number"].parse::<usize>().ok()?.checked_sub(1)?;

        Some(CellId::new(row, col))
    }

    /// Convert a column index to its letter (0 -> A, 25 -> Z).
    /// Callers guarantee `col < MAX_COLS`.
    pub fn col_to_letter(col: usize) -> char {
        debug_assert!(col < MAX_COLS, "column {col} has no single-letter label");
        (b'A' + (col % MAX_COLS) as u8) as char
    }

    /// Key used by the persisted grid format: `"<row>-<col>"`, 0-based.
    pub fn storage_key(&self) -> String {
        format!("{}-{}", self.row, self.col)
    }

    /// Inverse of [`CellId::storage_key`].
    pub fn from_storage_key(key: &str) -> Option<CellId> {
        let (row, col) = key.split_once('-')?;
        Some(CellId::new(row.parse().ok()?, col.parse().ok()?))
    }
}

impl std::str::FromStr for CellId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s).ok_or_else(|| format!("Invalid cell label: {}", s))
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellId::col_to_letter(self.col), self.row + 1)
    }
}

fn label_re() -> &'static Regex {
    static LABEL_RE: OnceLock<Regex> = OnceLock::new();
    LABEL_RE.get_or_init(|| {
        Regex::new(r"^(?<letter>[A-Z])(?<number>[0-9]+)$").expect("cell label regex must compile")
    })
}

/// Fixed grid dimensions. Every [`CellId`] handed out by the resolver
/// satisfies `row < rows` and `col < cols`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridDims {
    pub rows: usize,
    pub cols: usize,
}

impl GridDims {
    pub const DEFAULT_ROWS: usize = 10;
    pub const DEFAULT_COLS: usize = 10;

    /// Returns None unless `rows >= 1` and `1 <= cols <= 26`.
    pub fn new(rows: usize, cols: usize) -> Option<GridDims> {
        if rows == 0 || cols == 0 || cols > MAX_COLS {
            return None;
        }
        Some(GridDims { rows, cols })
    }

    pub fn contains(&self, id: &CellId) -> bool {
        id.row < self.rows && id.col < self.cols
    }

    /// Resolve a label to an in-grid cell, or None for "no such cell".
    pub fn label_to_id(&self, label: &str) -> Option<CellId> {
        CellId::from_str(label).filter(|id| self.contains(id))
    }

    /// Label for an in-grid cell.
    pub fn id_to_label(&self, id: &CellId) -> String {
        id.to_string()
    }

    /// All cells of the grid in row-major order.
    pub fn ids(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| CellId::new(row, col)))
    }
}

impl Default for GridDims {
    fn default() -> Self {
        GridDims {
            rows: Self::DEFAULT_ROWS,
            cols: Self::DEFAULT_COLS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_str_columns() {
        assert_eq!(CellId::from_str("A1"), Some(CellId::new(0, 0)));
        assert_eq!(CellId::from_str("B1"), Some(CellId::new(0, 1)));
        assert_eq!(CellId::from_str("Z1"), Some(CellId::new(0, 25)));
    }

    #[test]
    fn test_from_str_rows() {
        assert_eq!(CellId::from_str("A10").unwrap().row, 9);
        assert_eq!(CellId::from_str("A100").unwrap().row, 99);
        assert_eq!(CellId::from_str("C01"), Some(CellId::new(0, 2)));
    }

    #[test]
    fn test_from_str_invalid_inputs() {
        assert!(CellId::from_str("").is_none());
        assert!(CellId::from_str("123").is_none());
        assert!(CellId::from_str("A").is_none());
        assert!(CellId::from_str("A0").is_none());
        assert!(CellId::from_str("1A").is_none());
        assert!(CellId::from_str("A 1").is_none());
        assert!(CellId::from_str("a1").is_none());
        assert!(CellId::from_str("AA1").is_none());
        assert!(CellId::from_str("A1x").is_none());
    }

    #[test]
    fn test_label_to_id_respects_bounds() {
        let dims = GridDims::default();
        assert_eq!(dims.label_to_id("J10"), Some(CellId::new(9, 9)));
        assert!(dims.label_to_id("K1").is_none());
        assert!(dims.label_to_id("A11").is_none());
        assert!(dims.label_to_id("A99999999999999999999999").is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(CellId::new(0, 0).to_string(), "A1");
        assert_eq!(CellId::new(4, 2).to_string(), "C5");
        assert_eq!(CellId::new(9, 25).to_string(), "Z10");
    }

    #[test]
    fn test_storage_key_roundtrip() {
        let id = CellId::new(3, 7);
        assert_eq!(id.storage_key(), "3-7");
        assert_eq!(CellId::from_storage_key("3-7"), Some(id));
        assert!(CellId::from_storage_key("3_7").is_none());
        assert!(CellId::from_storage_key("-1-2").is_none());
        assert!(CellId::from_storage_key("a-b").is_none());
    }

    #[test]
    fn test_dims_validation() {
        assert!(GridDims::new(10, 10).is_some());
        assert!(GridDims::new(1, 26).is_some());
        assert!(GridDims::new(0, 10).is_none());
        assert!(GridDims::new(10, 0).is_none());
        assert!(GridDims::new(10, 27).is_none());
    }

    #[test]
    fn test_ids_are_row_major() {
        let dims = GridDims::new(2, 3).unwrap();
        let labels: Vec<String> = dims.ids().map(|id| id.to_string()).collect();
        assert_eq!(labels, ["A1", "B1", "C1", "A2", "B2", "C2"]);
    }

    #[test]
    fn test_ordering_is_row_major() {
        assert!(CellId::new(0, 9) < CellId::new(1, 0));
        assert!(CellId::new(1, 0) < CellId::new(1, 1));
    }

    proptest! {
        #[test]
        fn prop_label_roundtrip(label in "[A-J]([1-9]|10)") {
            let dims = GridDims::default();
            let id = dims.label_to_id(&label).unwrap();
            prop_assert_eq!(dims.id_to_label(&id), label);
        }

        #[test]
        fn prop_out_of_bounds_labels_rejected(label in "([K-Z][0-9]{1,3}|[A-J](1[1-9]|[2-9][0-9]))") {
            prop_assert!(GridDims::default().label_to_id(&label).is_none());
        }

        #[test]
        fn prop_malformed_labels_rejected(label in "[a-z0-9 _+*-]{0,4}") {
            prop_assert!(GridDims::default().label_to_id(&label).is_none());
        }
    }
}
