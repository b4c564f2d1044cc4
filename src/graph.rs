//! Undirected graph model and the plain-text problem format.
//!
//! The graph is built once from an edge list and is read-only afterwards. Neighbor
//! lists are kept sorted, so `has_edge` is a binary search and every traversal order
//! is deterministic.

use rand::Rng;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Graph
// ============================================================================

/// Errors raised while building a [`Graph`] from an edge list.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge endpoint is not in `[0, node_count)`.
    #[error("edge ({u}, {v}) references a node outside 0..{node_count}")]
    NodeOutOfRange {
        /// First endpoint.
        u: usize,
        /// Second endpoint.
        v: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// An edge joins a node to itself; such a graph has no proper coloring.
    #[error("self-loop at node {node}")]
    SelfLoop {
        /// The looping node.
        node: usize,
    },
}

/// An immutable undirected graph on nodes `0..n`.
///
/// Invariants:
/// - adjacency is symmetric and loop-free,
/// - `neighbors[v]` is sorted ascending and free of duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    neighbors: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Graph {
    /// Builds a graph from `(u, v)` pairs. Duplicate and reversed edges are collapsed.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfRange`] if an endpoint is `>= node_count`, and
    /// [`GraphError::SelfLoop`] for an edge `(v, v)`.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut neighbors = vec![Vec::new(); node_count];
        for (u, v) in edges {
            if u >= node_count || v >= node_count {
                return Err(GraphError::NodeOutOfRange { u, v, node_count });
            }
            if u == v {
                return Err(GraphError::SelfLoop { node: u });
            }
            neighbors[u].push(v);
            neighbors[v].push(u);
        }

        let mut twice = 0usize;
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
            twice += list.len();
        }

        Ok(Self {
            neighbors,
            edge_count: twice / 2,
        })
    }

    /// Creates a graph with `n` nodes and no edges.
    pub fn empty(n: usize) -> Self {
        Self {
            neighbors: vec![Vec::new(); n],
            edge_count: 0,
        }
    }

    /// Creates the complete graph `K_n`.
    pub fn complete(n: usize) -> Self {
        let neighbors = (0..n)
            .map(|v| (0..n).filter(|&w| w != v).collect())
            .collect();
        Self {
            neighbors,
            edge_count: n * n.saturating_sub(1) / 2,
        }
    }

    /// Creates the cycle `C_n` (`n >= 3`); smaller `n` yields a path.
    pub fn cycle(n: usize) -> Self {
        let edges = (0..n).map(|v| (v, (v + 1) % n)).filter(|&(u, v)| u != v);
        // Endpoints are always in range and never equal after the filter.
        Self::from_edges(n, edges).unwrap_or_else(|_| Self::empty(n))
    }

    /// Samples an Erdős–Rényi graph `G(n, p)`.
    pub fn random<R: Rng>(rng: &mut R, n: usize, p: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&p), "p must be in [0, 1]");

        let mut neighbors = vec![Vec::new(); n];
        let mut edge_count = 0;
        for u in 0..n {
            for v in (u + 1)..n {
                if rng.random_bool(p) {
                    neighbors[u].push(v);
                    neighbors[v].push(u);
                    edge_count += 1;
                }
            }
        }
        // Pushed in ascending order for both endpoints, so lists are already sorted.
        Self {
            neighbors,
            edge_count,
        }
    }

    /// Number of nodes.
    #[inline(always)]
    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of distinct undirected edges.
    #[inline(always)]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Sorted neighbor list of `v`.
    #[inline(always)]
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.neighbors[v]
    }

    /// Degree of `v`.
    #[inline(always)]
    pub fn degree(&self, v: usize) -> usize {
        self.neighbors[v].len()
    }

    /// Largest degree in the graph (`0` for an empty node set).
    pub fn max_degree(&self) -> usize {
        self.neighbors.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Returns whether the edge `(u, v)` exists.
    #[inline]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        debug_assert!(u < self.node_count() && v < self.node_count());
        self.neighbors[u].binary_search(&v).is_ok()
    }

    /// Iterates every edge once as `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbors
            .iter()
            .enumerate()
            .flat_map(|(u, list)| list.iter().filter(move |&&v| u < v).map(move |&v| (u, v)))
    }

    /// Writes the graph in the problem format: `n m` followed by one `u v` line per edge.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "{} {}", self.node_count(), self.edge_count())?;
        for (u, v) in self.edges() {
            writeln!(w, "{u} {v}")?;
        }
        Ok(())
    }

    /// Saves the graph to a file in the problem format.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn save_to_file(&self, filename: impl AsRef<Path>) -> io::Result<()> {
        let f = fs::File::create(filename)?;
        self.write_to(io::BufWriter::new(f))
    }

    /// Loads a problem file (see [`parse_problem`]).
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is malformed.
    pub fn load_from_file(filename: impl AsRef<Path>) -> Result<Self, ParseError> {
        let text = fs::read_to_string(filename)?;
        parse_problem(&text)
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Errors encountered while reading a problem description.
#[derive(Debug, Error)]
pub enum ParseError {
    /// No non-blank line was found.
    #[error("problem text is empty")]
    Empty,
    /// The first line is not `node_count edge_count`.
    #[error("malformed header {line:?}: expected `<node_count> <edge_count>`")]
    BadHeader {
        /// The offending line.
        line: String,
    },
    /// An edge line is not two node indices.
    #[error("malformed edge on line {line_no}: {line:?}")]
    BadEdge {
        /// 1-based line number.
        line_no: usize,
        /// The offending line.
        line: String,
    },
    /// Fewer edge lines than the header declared.
    #[error("header declares {declared} edges but only {found} were given")]
    MissingEdges {
        /// Edge count from the header.
        declared: usize,
        /// Edge lines actually present.
        found: usize,
    },
    /// The edges do not describe a valid graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Reading the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Parses the plain-text problem format.
///
/// Rules:
/// - The first non-blank line is `node_count edge_count`.
/// - The next `edge_count` lines are `u v` pairs of 0-based node indices.
/// - Blank lines are skipped; lines after the declared edges are ignored.
///
/// # Errors
/// Returns an error if the header or an edge line is malformed, edges are missing,
/// or an edge is out of range or a self-loop.
pub fn parse_problem(text: &str) -> Result<Graph, ParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (_, header) = lines.next().ok_or(ParseError::Empty)?;
    let (node_count, edge_count) = parse_pair(header).ok_or_else(|| ParseError::BadHeader {
        line: header.to_string(),
    })?;

    let mut edges = Vec::new();
    for (line_no, line) in lines.take(edge_count) {
        let edge = parse_pair(line).ok_or_else(|| ParseError::BadEdge {
            line_no,
            line: line.to_string(),
        })?;
        edges.push(edge);
    }
    if edges.len() < edge_count {
        return Err(ParseError::MissingEdges {
            declared: edge_count,
            found: edges.len(),
        });
    }

    Ok(Graph::from_edges(node_count, edges)?)
}

/// Parses exactly two whitespace-separated unsigned integers.
fn parse_pair(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let a = parts.next()?.parse().ok()?;
    let b = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((a, b))
}

// ============================================================================
// Tests
// ============================================================================
