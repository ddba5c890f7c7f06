//! Spreadsheet engine API.
//!
//! This module provides the computation pieces the recalculation engine is built from:
//!
//! - [`Cell`], [`CellKind`] - Stored cell state (raw text + display value)
//! - [`CellId`], [`GridDims`] - Reference resolution (A1 labels ↔ row/col indices)
//! - [`tokenize`], [`substitute_references`] - Split formulas into reference and text tokens
//! - [`Evaluator`], [`RhaiEvaluator`] - Evaluate substituted expressions
//! - [`DependencyGraph`], [`detect_cycle`] - Dependency ordering and cycle detection
//! - [`format_dynamic`] - Format values for display

mod cell;
mod cell_ref;
mod cycle;
mod deps;
mod eval;
mod format;
mod preprocess;

pub use cell::{CIRCULAR_MARKER, Cell, CellKind, ERROR_MARKER, REF_ERROR_MARKER};
pub use cell_ref::{CellId, GridDims, MAX_COLS};
pub use cycle::detect_cycle;
pub use deps::{DependencyGraph, RecalcOrder, extract_dependencies};
pub use eval::{Evaluator, RhaiEvaluator, create_engine, normalize_expression};
pub use format::{format_dynamic, format_number};
pub use preprocess::{Token, references, substitute_references, tokenize};

pub use rhai::Dynamic;
