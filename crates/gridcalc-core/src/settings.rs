//! Document settings.
//!
//! Every field has a default, so an empty config file (or none at all) yields a
//! 10x10 grid with single-pass recalculation stored under the `spreadsheet` slot.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use gridcalc_engine::engine::GridDims;

pub const DEFAULT_SLOT: &str = "spreadsheet";

/// How formula cells are recomputed after an edit.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecalcMode {
    /// One row-major pass; a formula reading a later cell sees its pre-pass value.
    #[default]
    Linear,
    /// Topological order over the reference graph; cycles display `CIRCULAR_REF`.
    Dependency,
}

/// What a reference to a cell outside the grid (or a non-cell label) reads as.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedRefs {
    #[default]
    Zero,
    /// The whole formula displays `REF_ERROR`.
    Error,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub rows: usize,
    pub cols: usize,
    pub slot: String,
    pub recalc: RecalcMode,
    pub unresolved_refs: UnresolvedRefs,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            rows: GridDims::DEFAULT_ROWS,
            cols: GridDims::DEFAULT_COLS,
            slot: DEFAULT_SLOT.to_string(),
            recalc: RecalcMode::default(),
            unresolved_refs: UnresolvedRefs::default(),
        }
    }
}

impl Settings {
    pub fn dims(&self) -> Result<GridDims> {
        GridDims::new(self.rows, self.cols).ok_or(GridError::InvalidDimensions {
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Check dimensions and the slot name. Slot names become file names, so
    /// only ASCII letters, digits, `-` and `_` are accepted.
    pub fn validate(&self) -> Result<()> {
        self.dims()?;
        let slot_ok = !self.slot.is_empty()
            && self
                .slot
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !slot_ok {
            return Err(GridError::InvalidSlot(self.slot.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.dims().unwrap(), GridDims::default());
        assert_eq!(settings.slot, "spreadsheet");
        assert_eq!(settings.recalc, RecalcMode::Linear);
        assert_eq!(settings.unresolved_refs, UnresolvedRefs::Zero);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"rows": 20, "recalc": "dependency"}"#).unwrap();
        assert_eq!(settings.rows, 20);
        assert_eq!(settings.cols, 10);
        assert_eq!(settings.recalc, RecalcMode::Dependency);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(serde_json::from_str::<Settings>(r#"{"colour": "red"}"#).is_err());
    }

    #[test]
    fn test_invalid_dimensions() {
        let settings = Settings {
            cols: 27,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(GridError::InvalidDimensions { rows: 10, cols: 27 })
        ));
    }

    #[test]
    fn test_invalid_slot() {
        for slot in ["", "../escape", "a/b", "with space"] {
            let settings = Settings {
                slot: slot.to_string(),
                ..Settings::default()
            };
            assert!(matches!(settings.validate(), Err(GridError::InvalidSlot(_))), "{slot:?}");
        }
    }
}
