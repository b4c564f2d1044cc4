//! Variable and value ordering for the branch-and-bound search.

use crate::domain::Domain;
use crate::graph::Graph;
use std::cmp::Ordering;

/// Picks the next node to branch on.
///
/// Among nodes with `assigned[v] == false`: fewest remaining colors first, then
/// highest degree, then lowest index. Returns `None` once every node is assigned.
pub fn next_node(graph: &Graph, domain: &Domain, assigned: &[bool]) -> Option<usize> {
    debug_assert_eq!(assigned.len(), graph.node_count());

    let mut best: Option<(usize, usize, usize)> = None;
    for v in (0..graph.node_count()).filter(|&v| !assigned[v]) {
        let key = (v, domain.size(v), graph.degree(v));
        best = match best {
            Some(b) if prefer(b, key) != Ordering::Greater => Some(b),
            _ => Some(key),
        };
    }
    best.map(|(v, _, _)| v)
}

/// `Less` if `a = (node, size, degree)` should be branched on before `b`.
#[inline]
fn prefer(a: (usize, usize, usize), b: (usize, usize, usize)) -> Ordering {
    a.1.cmp(&b.1)
        .then_with(|| b.2.cmp(&a.2))
        .then_with(|| a.0.cmp(&b.0))
}

/// Colors to try for `node`, stored in **descending** order.
///
/// The candidates are the colors already committed somewhere (some node's only
/// remaining color) that `node` still allows, plus one fresh color: the smallest
/// uncommitted one, admitted only if it is below `upper_bound` and allowed for
/// `node`. Offering a single fresh color skips colorings that differ only by a
/// renaming of unused colors.
///
/// The search pops from the end, so colors are tried smallest first.
pub fn candidate_colors(domain: &Domain, node: usize, upper_bound: usize) -> Vec<usize> {
    let committed = domain.committed_colors();
    let fresh = committed.iter().position(|&c| !c).unwrap_or(committed.len());

    let mut out: Vec<usize> = domain
        .colors(node)
        .take_while(|&c| c < upper_bound)
        .filter(|&c| committed[c] || c == fresh)
        .collect();
    out.reverse();
    out
}

// ============================================================================
// Tests
// ============================================================================
