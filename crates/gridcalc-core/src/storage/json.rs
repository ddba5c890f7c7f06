//! JSON slot format.
//!
//! A grid is stored as one JSON object mapping `"<row>-<col>"` (0-based) to
//! `{"raw": ..., "display": ...}`:
//!
//! ```json
//! {"0-0": {"raw": "5", "display": "5"}, "0-1": {"raw": "=A1+1", "display": "6"}}
//! ```

use std::collections::BTreeMap;

use log::warn;

use crate::error::Result;
use crate::store::GridState;
use gridcalc_engine::engine::{Cell, CellId};

/// Serialize a snapshot to the slot format.
pub fn encode_state(state: &GridState) -> Result<String> {
    let entries: BTreeMap<String, &Cell> = state
        .iter()
        .map(|(id, cell)| (id.storage_key(), cell))
        .collect();
    Ok(serde_json::to_string(&entries)?)
}

/// Parse the slot format. Keys that are not `<row>-<col>` are skipped with a
/// warning; anything that is not an object of `{raw, display}` records is an error.
pub fn decode_state(text: &str) -> Result<GridState> {
    let entries: BTreeMap<String, Cell> = serde_json::from_str(text)?;
    let cells = entries.into_iter().filter_map(|(key, cell)| {
        let id = CellId::from_storage_key(&key);
        if id.is_none() {
            warn!("Skipping stored cell with malformed key {key:?}");
        }
        id.map(|id| (id, cell))
    });
    Ok(GridState::from_cells(cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_uses_row_col_keys() {
        let state = GridState::from_cells([
            (CellId::new(0, 0), Cell::literal("5")),
            (CellId::new(0, 1), Cell::new("=A1+1", "6")),
        ]);
        assert_eq!(
            encode_state(&state).unwrap(),
            r#"{"0-0":{"raw":"5","display":"5"},"0-1":{"raw":"=A1+1","display":"6"}}"#
        );
    }

    #[test]
    fn test_decode_reads_original_layout() {
        let state =
            decode_state(r#"{"2-3": {"raw": "=1/0", "display": "ERROR"}, "9-9": {"raw": "x", "display": "x"}}"#)
                .unwrap();
        assert_eq!(state.len(), 2);
        assert_eq!(state.get(&CellId::new(2, 3)), Some(&Cell::new("=1/0", "ERROR")));
        assert_eq!(state.display(&CellId::new(9, 9)), "x");
    }

    #[test]
    fn test_decode_skips_bad_keys() {
        let state = decode_state(r#"{"A1": {"raw": "1", "display": "1"}, "0-0": {"raw": "2", "display": "2"}}"#)
            .unwrap();
        assert_eq!(state.len(), 1);
        assert_eq!(state.display(&CellId::new(0, 0)), "2");
    }

    #[test]
    fn test_decode_rejects_malformed_text() {
        assert!(decode_state("not json").is_err());
        assert!(decode_state("[1, 2]").is_err());
        assert!(decode_state(r#"{"0-0": {"raw": "1"}}"#).is_err());
    }

    #[test]
    fn test_empty_object_is_empty_grid() {
        assert!(decode_state("{}").unwrap().is_empty());
    }
}
