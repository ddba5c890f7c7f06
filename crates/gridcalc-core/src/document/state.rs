use crate::error::{GridError, Result};
use crate::settings::Settings;
use crate::storage::SlotStorage;
use crate::store::{CellStore, GridState};
use gridcalc_engine::engine::{Cell, CellId, Evaluator, GridDims, RhaiEvaluator};

/// UI-agnostic session state for one grid.
///
/// The document is the only writer of its [`CellStore`]. Every edit goes through
/// [`Document::commit_edit`], which runs to completion (recalculation and
/// persistence included) before returning a [`GridState`] snapshot. Hosts that
/// share a document between threads must hold one lock across a whole commit.
pub struct Document {
    pub(crate) settings: Settings,
    pub(crate) store: CellStore,
    /// Evaluates substituted formula expressions
    pub(crate) evaluator: Box<dyn Evaluator + Send>,
    /// Where snapshots are persisted after each commit; None keeps state in memory only
    pub(crate) storage: Option<Box<dyn SlotStorage + Send>>,
}

impl Document {
    /// Create an empty, unpersisted document evaluating formulas with Rhai.
    ///
    /// This constructor is side-effect free: it does not touch any storage.
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let dims = settings.dims()?;
        Ok(Document {
            settings,
            store: CellStore::new(dims),
            evaluator: Box::new(RhaiEvaluator::new()),
            storage: None,
        })
    }

    /// Create a document backed by `storage`, restoring whatever the configured
    /// slot holds. Missing or unreadable state starts an empty grid.
    pub fn open(settings: Settings, storage: Box<dyn SlotStorage + Send>) -> Result<Self> {
        let mut doc = Self::new(settings)?;
        doc.storage = Some(storage);
        doc.load_state();
        Ok(doc)
    }

    /// Replace the expression evaluator.
    pub fn with_evaluator(mut self, evaluator: Box<dyn Evaluator + Send>) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn dims(&self) -> GridDims {
        self.store.dims()
    }

    /// Cell named by `label` (e.g. `"B3"`), if it lies inside this grid.
    pub fn resolve_label(&self, label: &str) -> Result<CellId> {
        self.dims()
            .label_to_id(label)
            .ok_or_else(|| GridError::UnknownCell(label.to_string()))
    }

    /// Stored cell (empty if never set). Out-of-grid ids read as empty.
    pub fn cell(&self, id: &CellId) -> Cell {
        self.store.get(id).unwrap_or_default()
    }

    /// Display value of a cell, empty if never set.
    pub fn display(&self, id: &CellId) -> String {
        self.cell(id).display
    }

    pub fn snapshot(&self) -> GridState {
        self.store.snapshot()
    }

    pub fn is_persistent(&self) -> bool {
        self.storage.is_some()
    }
}
