//! Forward-checking propagation of a forced color choice.

use crate::domain::{Domain, Infeasible};
use crate::graph::Graph;
use std::collections::VecDeque;

/// Forces `node` to `color` and propagates the consequences through the graph.
///
/// Steps:
/// 1. Copy `domain` and drop every color `>= upper_bound` from every node.
/// 2. Reject `color` if the node no longer allows it, otherwise make it the node's
///    only color.
/// 3. Drain a queue of newly fixed `(node, color)` pairs: each neighbor loses that
///    color, and a neighbor left with a single color is queued in turn.
///
/// The input domain is never modified; the caller keeps it as its backtracking
/// snapshot.
///
/// # Errors
/// Returns [`Infeasible`] as soon as some node has no color left, or when `color`
/// is not allowed for `node` under `upper_bound`.
pub fn propagate(
    graph: &Graph,
    domain: &Domain,
    node: usize,
    color: usize,
    upper_bound: usize,
) -> Result<Domain, Infeasible> {
    debug_assert_eq!(graph.node_count(), domain.node_count());

    let mut next = domain.clone();
    next.restrict_below(upper_bound)?;
    if !next.contains(node, color) {
        return Err(Infeasible);
    }
    next.assign(node, color);

    let mut queue = VecDeque::with_capacity(graph.degree(node) + 1);
    queue.push_back((node, color));
    while let Some((v, c)) = queue.pop_front() {
        for &w in graph.neighbors(v) {
            if !next.remove(w, c) {
                continue;
            }
            match next.size(w) {
                0 => return Err(Infeasible),
                1 => {
                    if let Some(forced) = next.single(w) {
                        queue.push_back((w, forced));
                    }
                }
                _ => {}
            }
        }
    }

    Ok(next)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn path(n: usize) -> Graph {
        Graph::from_edges(n, (1..n).map(|v| (v - 1, v))).unwrap()
    }

    #[test]
    fn forced_color_is_removed_from_neighbors() {
        let g = Graph::from_edges(4, [(0, 1), (0, 2)]).unwrap();
        let d = Domain::full(4, 4);
        let out = propagate(&g, &d, 0, 1, 4).unwrap();
        assert_eq!(out.single(0), Some(1));
        assert!(!out.contains(1, 1));
        assert!(!out.contains(2, 1));
        assert!(out.contains(3, 1));
        assert_eq!(out.size(3), 4);
    }

    #[test]
    fn input_domain_is_not_mutated() {
        let g = Graph::complete(3);
        let d = Domain::full(3, 3);
        let before = d.clone();
        let _ = propagate(&g, &d, 0, 0, 3).unwrap();
        let _ = propagate(&g, &d, 1, 2, 2);
        assert_eq!(d, before);
    }

    #[test]
    fn singletons_cascade_along_a_path() {
        // Two colors on a path: fixing one end fixes everything.
        let g = path(6);
        let d = Domain::full(6, 2);
        let out = propagate(&g, &d, 0, 0, 2).unwrap();
        assert_eq!(out.assignment(), Some(vec![0, 1, 0, 1, 0, 1]));
    }

    #[test]
    fn triangle_with_two_colors_is_infeasible() {
        let g = Graph::complete(3);
        let d = Domain::full(3, 3);
        assert_eq!(propagate(&g, &d, 0, 0, 2), Err(Infeasible));
    }

    #[test]
    fn odd_cycle_with_two_colors_is_infeasible() {
        let g = Graph::cycle(5);
        let d = Domain::full(5, 2);
        assert_eq!(propagate(&g, &d, 0, 1, 2), Err(Infeasible));
    }

    #[test]
    fn even_cycle_with_two_colors_is_feasible() {
        let g = Graph::cycle(6);
        let d = Domain::full(6, 2);
        let out = propagate(&g, &d, 3, 0, 2).unwrap();
        assert_eq!(out.assignment(), Some(vec![1, 0, 1, 0, 1, 0]));
    }

    #[test]
    fn color_at_or_above_bound_is_rejected() {
        let g = Graph::empty(2);
        let d = Domain::full(2, 5);
        assert_eq!(propagate(&g, &d, 0, 3, 3), Err(Infeasible));
        assert!(propagate(&g, &d, 0, 2, 3).is_ok());
    }

    #[test]
    fn removed_color_is_rejected() {
        let g = Graph::from_edges(2, [(0, 1)]).unwrap();
        let d = propagate(&g, &Domain::full(2, 3), 0, 1, 3).unwrap();
        assert_eq!(propagate(&g, &d, 1, 1, 3), Err(Infeasible));
        assert!(propagate(&g, &d, 1, 0, 3).is_ok());
    }

    #[test]
    fn bound_tightening_wipes_out_committed_node() {
        let g = Graph::empty(2);
        let d = propagate(&g, &Domain::full(2, 4), 0, 3, 4).unwrap();
        assert_eq!(propagate(&g, &d, 1, 0, 3), Err(Infeasible));
    }

    #[test]
    fn restriction_applies_to_untouched_nodes() {
        let g = Graph::empty(3);
        let d = Domain::full(3, 6);
        let out = propagate(&g, &d, 0, 0, 2).unwrap();
        assert_eq!(out.size(1), 2);
        assert_eq!(out.size(2), 2);
    }
}
