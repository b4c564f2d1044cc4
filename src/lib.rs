//! # gcolor
//!
//! An exact solver for minimum graph coloring: assign each node a color so that
//! adjacent nodes differ, using as few colors as possible, within a time budget.
//!
//! This crate provides:
//! - An immutable adjacency-list graph with a plain-text problem format.
//! - Per-node color domains stored as `u64` bitset rows.
//! - Forward-checking propagation of a forced color choice.
//! - An iterative depth-first branch-and-bound search (explicit frame stack,
//!   shrinking upper bound, cooperative timeout).
//! - Greedy bounds: a DSATUR coloring to seed the search and a greedy clique to
//!   prove optimality early.
//!
//! ## Quick Start
//!
//! ```
//! use gcolor::graph::parse_problem;
//! use gcolor::search::{solve, SearchConfig};
//!
//! // A 5-cycle needs three colors.
//! let graph = parse_problem("5 5\n0 1\n1 2\n2 3\n3 4\n4 0\n").unwrap();
//! let solution = solve(&graph, &SearchConfig::default());
//!
//! assert!(solution.optimal);
//! assert_eq!(solution.color_count(), 3);
//! assert!(solution.to_string().starts_with("3 1\n"));
//! ```
//!
//! ## Anytime Behaviour
//!
//! ```
//! use gcolor::graph::Graph;
//! use gcolor::search::{solve, SearchConfig};
//! use gcolor::validate::validate_coloring;
//! use std::time::Duration;
//!
//! let graph = Graph::complete(4);
//! let cfg = SearchConfig::exhaustive().with_timeout(Some(Duration::ZERO));
//! let solution = solve(&graph, &cfg);
//!
//! // Out of time before the first branch: the fallback coloring is still valid.
//! assert!(!solution.optimal);
//! assert!(validate_coloring(&graph, &solution.coloring).is_ok());
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: Graph model, problem-text parsing, random instances.
//! - [`domain`]: Bitset color domains.
//! - [`propagate`]: Forward-checking propagation.
//! - [`ordering`]: Branching node and candidate color order.
//! - [`bounds`]: DSATUR upper bound and greedy clique lower bound.
//! - [`search`]: Branch-and-bound engine, configuration, solution format.
//! - [`validate`]: Coloring checks.
//!
//! ## Performance Notes
//!
//! - Every branch copies the whole domain; rows are `u64` words, so a copy is
//!   `n * ceil(n / 64)` words.
//! - The search is single-threaded. The `gcolor` binary solves several files in
//!   parallel, one search per file.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::inline_always)] // Intentional for hot-path code
#![allow(clippy::many_single_char_names)] // Graph-theory variable names
#![allow(clippy::doc_markdown)]
#![allow(clippy::multiple_crate_versions)] // Cargo.lock management is external

pub mod bounds;
pub mod domain;
pub mod graph;
pub mod ordering;
pub mod propagate;
pub mod search;
pub mod validate;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::domain::{Domain, Infeasible};
    pub use crate::graph::{parse_problem, Graph, GraphError, ParseError};
    pub use crate::search::{format_solution, solve, solve_with_timeout, SearchConfig, Solution};
    pub use crate::validate::{color_count, validate_coloring, ColoringError};
}
