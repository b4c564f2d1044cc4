//! Deterministic checks on finished colorings.

use crate::graph::Graph;
use thiserror::Error;

/// Reasons a coloring is not a proper coloring of a graph.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ColoringError {
    /// The coloring does not assign exactly one color per node.
    #[error("coloring has {got} entries, graph has {expected} nodes")]
    LengthMismatch {
        /// Number of nodes in the graph.
        expected: usize,
        /// Number of entries in the coloring.
        got: usize,
    },
    /// Both endpoints of an edge received the same color.
    #[error("edge ({u}, {v}) has both endpoints colored {color}")]
    Conflict {
        /// First endpoint.
        u: usize,
        /// Second endpoint.
        v: usize,
        /// The shared color.
        color: usize,
    },
}

/// Number of colors a coloring reports: `max(color) + 1`, or `0` when empty.
#[inline]
pub fn color_count(coloring: &[usize]) -> usize {
    coloring.iter().max().map_or(0, |&m| m + 1)
}

/// Checks that `coloring` gives every node a color and no edge a repeated one.
///
/// # Errors
/// Returns the first violation found, scanning edges in `(u, v)` order with `u < v`.
pub fn validate_coloring(graph: &Graph, coloring: &[usize]) -> Result<(), ColoringError> {
    if coloring.len() != graph.node_count() {
        return Err(ColoringError::LengthMismatch {
            expected: graph.node_count(),
            got: coloring.len(),
        });
    }
    for (u, v) in graph.edges() {
        if coloring[u] == coloring[v] {
            return Err(ColoringError::Conflict {
                u,
                v,
                color: coloring[u],
            });
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
