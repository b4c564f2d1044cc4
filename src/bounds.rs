//! Cheap bounds computed before the exact search starts.
//!
//! - [`dsatur`] produces a valid coloring whose color count seeds the upper bound.
//! - [`greedy_clique`] produces a clique; no coloring can use fewer colors than its
//!   size, so reaching it proves optimality early.

use crate::domain::Domain;
use crate::graph::Graph;
use crate::ordering::next_node;

/// Greedy DSATUR coloring.
///
/// Repeatedly colors the uncolored node with the most distinct neighbor colors
/// (ties: highest degree, then lowest index) with the smallest color its neighbors
/// do not use. The saturation bookkeeping is a [`Domain`] of width `n`: a node's
/// saturation is `n` minus its remaining domain size.
pub fn dsatur(graph: &Graph) -> Vec<usize> {
    let n = graph.node_count();
    let mut domain = Domain::full(n, n);
    let mut colored = vec![false; n];
    let mut coloring = vec![0usize; n];

    while let Some(v) = next_node(graph, &domain, &colored) {
        // A node has at most n - 1 neighbors, so one of the n colors is always left.
        let color = domain.colors(v).next().unwrap_or(0);
        coloring[v] = color;
        colored[v] = true;
        for &w in graph.neighbors(v) {
            if !colored[w] {
                domain.remove(w, color);
            }
        }
    }
    coloring
}

/// Greedy maximal clique, restarted from every node.
///
/// Each restart grows a clique from one seed by repeatedly adding the
/// highest-degree common neighbor (lowest index on ties). The largest clique over
/// all seeds is returned, sorted ascending.
pub fn greedy_clique(graph: &Graph) -> Vec<usize> {
    let mut best: Vec<usize> = Vec::new();

    let mut seeds: Vec<usize> = (0..graph.node_count()).collect();
    seeds.sort_by_key(|&v| (std::cmp::Reverse(graph.degree(v)), v));

    for seed in seeds {
        // A clique through `seed` has at most deg(seed) + 1 members.
        if graph.degree(seed) < best.len() {
            break;
        }
        let mut clique = vec![seed];
        let mut candidates: Vec<usize> = graph.neighbors(seed).to_vec();
        while let Some(pick) = candidates
            .iter()
            .copied()
            .max_by_key(|&v| (graph.degree(v), std::cmp::Reverse(v)))
        {
            clique.push(pick);
            candidates = intersect_sorted(&candidates, graph.neighbors(pick));
        }
        if clique.len() > best.len() {
            best = clique;
        }
    }

    best.sort_unstable();
    best
}

/// Intersection of two ascending slices.
fn intersect_sorted(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
