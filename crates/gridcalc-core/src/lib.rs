//! gridcalc-core - UI-agnostic document model, recalculation + storage.

pub mod document;
pub mod error;
pub mod settings;
pub mod storage;
pub mod store;

pub use document::Document;
pub use error::{GridError, Result};
pub use settings::{RecalcMode, Settings, UnresolvedRefs};
pub use storage::{DirStorage, MemoryStorage, SlotStorage};
pub use store::{CellStore, GridState};

pub use gridcalc_engine::engine::{Cell, CellId, CellKind, GridDims};
