use log::{debug, error, warn};

use super::Document;
use crate::error::Result;
use crate::storage::{decode_state, encode_state};
use crate::store::GridState;

impl Document {
    /// Restore the configured slot into the store. Never fails: a missing slot,
    /// an unreadable medium or malformed text all leave an empty grid.
    pub(crate) fn load_state(&mut self) {
        let Some(storage) = &self.storage else {
            return;
        };
        let slot = &self.settings.slot;

        let text = match storage.read_slot(slot) {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!("No saved state in slot {slot:?}, starting empty");
                return;
            }
            Err(e) => {
                warn!("Could not read slot {slot:?}, starting empty: {e}");
                return;
            }
        };

        match decode_state(&text) {
            Ok(state) => {
                debug!("Restored {} cell(s) from slot {slot:?}", state.len());
                self.store.restore(state);
            }
            Err(e) => warn!("Saved state in slot {slot:?} is malformed, starting empty: {e}"),
        }
    }

    /// Write a snapshot to the configured slot (no-op without storage).
    pub(crate) fn persist(&mut self, state: &GridState) -> Result<()> {
        let Some(storage) = self.storage.as_mut() else {
            return Ok(());
        };
        let text = encode_state(state)?;
        if let Err(e) = storage.write_slot(&self.settings.slot, &text) {
            error!("Could not save slot {:?}: {e}", self.settings.slot);
            return Err(e.into());
        }
        Ok(())
    }
}
