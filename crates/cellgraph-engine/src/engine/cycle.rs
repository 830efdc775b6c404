//! Recalculation order and circular dependency detection.
//!
//! When a cell changes, it and every cell that transitively depends on it
//! must be recomputed, each one after everything it depends on. A depth-first
//! walk along the dependents edges from the changed cell produces that order;
//! reaching the changed cell again along the way means the change closed a
//! cycle through it.

use std::collections::HashSet;
use thiserror::Error;

use super::graph::DependencyGraph;

/// The walk from `cell` led back to `cell`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Circular dependency through {cell}")]
pub struct CycleError {
    pub cell: String,
}

/// Compute the recalculation order for a change to `start`.
///
/// Returns `start` followed by every cell that transitively depends on it,
/// each appearing once and before all of its own dependents. Fails if any
/// path of dependents leads back to `start`.
pub fn recalculation_order(
    graph: &DependencyGraph,
    start: &str,
) -> Result<Vec<String>, CycleError> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut finished: Vec<&str> = Vec::new();
    // (cell, its dependents, index of the next dependent to visit)
    let mut stack: Vec<(&str, Vec<&str>, usize)> = Vec::new();

    visited.insert(start);
    stack.push((start, graph.dependents(start).collect(), 0));

    while let Some((cell, dependents, next)) = stack.last_mut() {
        let Some(&dependent) = dependents.get(*next) else {
            finished.push(*cell);
            stack.pop();
            continue;
        };
        *next += 1;

        if dependent == start {
            return Err(CycleError {
                cell: start.to_string(),
            });
        }
        if visited.insert(dependent) {
            stack.push((dependent, graph.dependents(dependent).collect(), 0));
        }
    }

    Ok(finished.into_iter().rev().map(str::to_string).collect())
}
