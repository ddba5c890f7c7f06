use std::collections::HashSet;

use super::{CellId, DependencyGraph};

/// Detect a circular dependency reachable from a cell.
/// Returns Some(cycle_path) if a cycle is found, None otherwise. The path starts
/// at `start` and ends with the first cell visited twice.
pub fn detect_cycle(start: &CellId, graph: &DependencyGraph) -> Option<Vec<CellId>> {
    let mut visiting = HashSet::new();
    let mut path = Vec::new();

    if detect_cycle_dfs(start, graph, &mut visiting, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn detect_cycle_dfs(
    current: &CellId,
    graph: &DependencyGraph,
    visiting: &mut HashSet<CellId>,
    path: &mut Vec<CellId>,
) -> bool {
    if visiting.contains(current) {
        path.push(*current);
        return true;
    }

    if !graph.is_formula(current) {
        return false;
    }

    visiting.insert(*current);
    path.push(*current);

    for dep in graph.precedents_of(current) {
        if detect_cycle_dfs(dep, graph, visiting, path) {
            return true;
        }
    }

    path.pop();
    visiting.remove(current);
    false
}
