//! Dependency extraction and ordering for formula cells.
//!
//! Parses formula text to find the cells a formula reads, and builds the graph
//! used by dependency-ordered recalculation:
//!
//! - [`extract_dependencies`] - references of one formula, resolved to cells
//! - [`DependencyGraph`] - formula cell -> referenced cells, with a topological order

use std::collections::{BTreeMap, BTreeSet};

use super::cell_ref::{CellId, GridDims};
use super::preprocess::references;

/// Extract all in-grid cell references from a formula expression as dependencies.
/// Duplicates are kept; references outside `dims` are dropped.
pub fn extract_dependencies(formula: &str, dims: &GridDims) -> Vec<CellId> {
    references(formula)
        .into_iter()
        .filter_map(|label| dims.label_to_id(label))
        .collect()
}

/// Edges from each formula cell to the distinct cells its formula references.
#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
    precedents: BTreeMap<CellId, BTreeSet<CellId>>,
}

/// Result of ordering a [`DependencyGraph`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RecalcOrder {
    /// Formula cells in an order where each comes after every formula it reads.
    pub ordered: Vec<CellId>,
    /// Formula cells on a cycle or reading (transitively) from one, row-major.
    pub blocked: Vec<CellId>,
}

impl DependencyGraph {
    /// Build the graph from `(cell, formula expression)` pairs.
    pub fn build<'a, I>(formulas: I, dims: &GridDims) -> DependencyGraph
    where
        I: IntoIterator<Item = (CellId, &'a str)>,
    {
        let precedents = formulas
            .into_iter()
            .map(|(id, formula)| (id, extract_dependencies(formula, dims).into_iter().collect()))
            .collect();
        DependencyGraph { precedents }
    }

    /// Cells referenced by `id`'s formula (empty for non-formula cells).
    pub fn precedents_of(&self, id: &CellId) -> impl Iterator<Item = &CellId> {
        self.precedents.get(id).into_iter().flatten()
    }

    pub fn is_formula(&self, id: &CellId) -> bool {
        self.precedents.contains_key(id)
    }

    /// Kahn's algorithm over formula cells; ready cells are taken row-major so
    /// the order is deterministic.
    pub fn recalc_order(&self) -> RecalcOrder {
        let mut pending: BTreeMap<CellId, usize> = BTreeMap::new();
        let mut dependents: BTreeMap<CellId, Vec<CellId>> = BTreeMap::new();

        for (cell, precedents) in &self.precedents {
            let formula_precedents = precedents.iter().filter(|p| self.is_formula(p));
            let mut count = 0;
            for precedent in formula_precedents {
                count += 1;
                dependents.entry(*precedent).or_default().push(*cell);
            }
            pending.insert(*cell, count);
        }

        let mut ready: BTreeSet<CellId> = pending
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(cell, _)| *cell)
            .collect();
        let mut ordered = Vec::with_capacity(pending.len());

        while let Some(cell) = ready.pop_first() {
            ordered.push(cell);
            for dependent in dependents.get(&cell).into_iter().flatten() {
                if let Some(count) = pending.get_mut(dependent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.insert(*dependent);
                    }
                }
            }
        }

        let done: BTreeSet<CellId> = ordered.iter().copied().collect();
        let blocked = self
            .precedents
            .keys()
            .filter(|cell| !done.contains(cell))
            .copied()
            .collect();

        RecalcOrder { ordered, blocked }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(label: &str) -> CellId {
        CellId::from_str(label).unwrap()
    }

    fn graph(formulas: &[(&str, &str)]) -> DependencyGraph {
        DependencyGraph::build(
            formulas.iter().map(|(cell, formula)| (id(cell), *formula)),
            &GridDims::default(),
        )
    }

    #[test]
    fn test_extract_dependencies() {
        let dims = GridDims::default();
        assert!(extract_dependencies("10 + 20", &dims).is_empty());
        assert_eq!(
            extract_dependencies("A1 + B1 + C2", &dims),
            vec![id("A1"), id("B1"), id("C2")]
        );
        assert_eq!(extract_dependencies("A1 + A1", &dims).len(), 2);
    }

    #[test]
    fn test_extract_dependencies_drops_out_of_grid() {
        let dims = GridDims::default();
        assert_eq!(extract_dependencies("K1 + A11 + AA1 + B2", &dims), vec![id("B2")]);
    }

    #[test]
    fn test_order_follows_dependencies_not_position() {
        // A1 reads B1 which reads C1: row-major would be A1, B1, C1.
        let g = graph(&[("A1", "B1+1"), ("B1", "C1+1"), ("C1", "2")]);
        let order = g.recalc_order();
        assert_eq!(order.ordered, vec![id("C1"), id("B1"), id("A1")]);
        assert!(order.blocked.is_empty());
    }

    #[test]
    fn test_independent_cells_stay_row_major() {
        let g = graph(&[("B2", "1"), ("A1", "2"), ("C1", "3")]);
        assert_eq!(g.recalc_order().ordered, vec![id("A1"), id("C1"), id("B2")]);
    }

    #[test]
    fn test_cycle_and_downstream_are_blocked() {
        let g = graph(&[("A1", "B1"), ("B1", "A1"), ("C1", "A1+1"), ("D1", "5")]);
        let order = g.recalc_order();
        assert_eq!(order.ordered, vec![id("D1")]);
        assert_eq!(order.blocked, vec![id("A1"), id("B1"), id("C1")]);
    }

    #[test]
    fn test_self_reference_is_blocked() {
        let g = graph(&[("A1", "A1+1")]);
        assert_eq!(g.recalc_order().blocked, vec![id("A1")]);
    }
}
