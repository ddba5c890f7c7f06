use log::{debug, trace, warn};

use super::Document;
use crate::settings::{RecalcMode, UnresolvedRefs};
use gridcalc_engine::engine::{
    CIRCULAR_MARKER, CellId, DependencyGraph, ERROR_MARKER, REF_ERROR_MARKER, detect_cycle,
    substitute_references,
};

impl Document {
    /// Display for freshly entered (already trimmed) raw text, computed
    /// against the store's current display values.
    pub(crate) fn compute_display(&self, raw: &str) -> String {
        match raw.strip_prefix('=') {
            Some(formula) => self.evaluate_formula(formula),
            None => raw.to_string(),
        }
    }

    /// Substitute every reference with the referenced cell's current display,
    /// then evaluate. Never fails: problems become display markers.
    fn evaluate_formula(&self, formula: &str) -> String {
        let mut unresolved = Vec::new();
        let substituted = substitute_references(formula, |label| {
            self.reference_value(label).unwrap_or_else(|| {
                unresolved.push(label.to_string());
                "0".to_string()
            })
        });

        if !unresolved.is_empty() && self.settings.unresolved_refs == UnresolvedRefs::Error {
            trace!("Unresolved reference(s) {unresolved:?} in {formula:?}");
            return REF_ERROR_MARKER.to_string();
        }

        match self.evaluator.evaluate(&substituted) {
            Ok(display) => display,
            Err(e) => {
                trace!("Evaluating {substituted:?} failed: {e}");
                ERROR_MARKER.to_string()
            }
        }
    }

    /// Value substituted for a reference label. None when the label names no
    /// cell of this grid; cells that are unset (or display nothing) read as `0`.
    fn reference_value(&self, label: &str) -> Option<String> {
        let id = self.dims().label_to_id(label)?;
        let display = self
            .store
            .lookup(&id)
            .map(|cell| cell.display.as_str())
            .filter(|display| !display.is_empty())
            .unwrap_or("0");
        Some(display.to_string())
    }

    fn recompute(&mut self, id: &CellId) {
        let Some(raw) = self.store.lookup(id).map(|cell| cell.raw.clone()) else {
            return;
        };
        let display = self.compute_display(&raw);
        trace!("{id} = {display:?}");
        self.store.set_display(id, display);
    }

    /// Recompute every formula cell after an edit, using the configured mode.
    pub(crate) fn recalculate(&mut self) {
        match self.settings.recalc {
            RecalcMode::Linear => self.linear_pass(),
            RecalcMode::Dependency => self.dependency_pass(),
        }
    }

    /// One row-major sweep. Each formula sees displays already updated earlier
    /// in the sweep, and pre-sweep displays for cells after it. Runs each
    /// formula exactly once, so reference cycles cannot loop.
    fn linear_pass(&mut self) {
        let formulas = self.store.formula_ids();
        debug!("Linear recalculation of {} formula cell(s)", formulas.len());
        for id in &formulas {
            self.recompute(id);
        }
    }

    /// Recompute in dependency order; formulas on or behind a cycle show
    /// `CIRCULAR_REF` instead of a value.
    fn dependency_pass(&mut self) {
        let graph = DependencyGraph::build(self.store.formulas(), &self.dims());
        let order = graph.recalc_order();
        debug!(
            "Ordered recalculation of {} formula cell(s), {} blocked by cycles",
            order.ordered.len(),
            order.blocked.len()
        );

        for id in &order.ordered {
            self.recompute(id);
        }

        let cycle = order.blocked.first().and_then(|first| detect_cycle(first, &graph));
        if let Some(path) = cycle {
            warn!("Circular reference: {}", format_path(&path));
        }
        for id in &order.blocked {
            self.store.set_display(id, CIRCULAR_MARKER.to_string());
        }
    }

    /// Cycle reachable from `id` through formula references, if any, as a list
    /// of cells starting at `id` and ending at the first repeated cell.
    pub fn cycle_at(&self, id: &CellId) -> Option<Vec<CellId>> {
        let graph = DependencyGraph::build(self.store.formulas(), &self.dims());
        detect_cycle(id, &graph)
    }
}

fn format_path(path: &[CellId]) -> String {
    path.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
