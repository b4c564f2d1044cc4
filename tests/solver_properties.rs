// End-to-end properties of the solver through the public API.

use gcolor::prelude::*;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use std::time::Duration;

fn configs() -> [SearchConfig; 2] {
    [SearchConfig::exhaustive(), SearchConfig::default()]
}

/// Complete bipartite graph `K_{a,b}`.
fn complete_bipartite(a: usize, b: usize) -> Graph {
    let edges = (0..a).flat_map(|u| (a..a + b).map(move |v| (u, v)));
    Graph::from_edges(a + b, edges).unwrap()
}

mod validity {
    use super::*;

    #[test]
    fn random_graphs_get_proper_colorings() {
        let mut rng = XorShiftRng::seed_from_u64(0x1234_5678);
        for _ in 0..25 {
            let g = Graph::random(&mut rng, 18, 0.35);
            for cfg in configs() {
                let sol = solve(&g, &cfg);
                assert!(sol.optimal);
                assert_eq!(validate_coloring(&g, &sol.coloring), Ok(()));
                assert_eq!(sol.color_count(), color_count(&sol.coloring));
            }
        }
    }

    #[test]
    fn both_configs_agree_on_the_optimum() {
        let mut rng = XorShiftRng::seed_from_u64(0xFACE);
        for _ in 0..15 {
            let g = Graph::random(&mut rng, 20, 0.5);
            let [bare, tuned] = configs().map(|cfg| solve(&g, &cfg));
            assert_eq!(bare.color_count(), tuned.color_count());
        }
    }
}

mod known_families {
    use super::*;

    #[test]
    fn complete_graphs_need_n_colors() {
        for n in 1..=7 {
            for cfg in configs() {
                let sol = solve(&Graph::complete(n), &cfg);
                assert!(sol.optimal, "K{n}");
                assert_eq!(sol.color_count(), n, "K{n}");
            }
        }
    }

    #[test]
    fn even_cycles_are_two_colorable() {
        for n in [4, 6, 10, 16] {
            for cfg in configs() {
                let sol = solve(&Graph::cycle(n), &cfg);
                assert!(sol.optimal);
                assert!(sol.color_count() <= 2);
            }
        }
    }

    #[test]
    fn bipartite_graphs_are_two_colorable() {
        for (a, b) in [(1, 1), (2, 3), (4, 4), (3, 7)] {
            let (coloring, optimal) = solve_with_timeout(&complete_bipartite(a, b), None);
            assert!(optimal);
            assert_eq!(color_count(&coloring), 2);
        }
    }

    #[test]
    fn edgeless_graphs_use_one_color() {
        for k in [1, 2, 9, 40] {
            for cfg in configs() {
                let sol = solve(&Graph::empty(k), &cfg);
                assert!(sol.optimal);
                assert_eq!(sol.color_count(), 1);
                assert!(sol.coloring.iter().all(|&c| c == 0));
            }
        }
    }
}

mod anytime {
    use super::*;

    #[test]
    fn tiny_timeout_still_returns_valid_coloring() {
        let mut rng = XorShiftRng::seed_from_u64(0xABCD);
        let g = Graph::random(&mut rng, 150, 0.5);
        for cfg in configs() {
            let sol = solve(&g, &cfg.with_timeout(Some(Duration::ZERO)));
            assert!(!sol.optimal);
            assert_eq!(validate_coloring(&g, &sol.coloring), Ok(()));
            assert!(sol.color_count() <= g.node_count());
        }
    }

    #[test]
    fn short_timeout_stops_a_hard_search() {
        let mut rng = XorShiftRng::seed_from_u64(0x0DDBA11);
        let g = Graph::random(&mut rng, 120, 0.5);
        let sol = solve(
            &g,
            &SearchConfig::exhaustive().with_timeout(Some(Duration::from_millis(50))),
        );
        assert!(!sol.optimal);
        assert_eq!(validate_coloring(&g, &sol.coloring), Ok(()));
        let hist = &sol.stats.improvements;
        assert!(hist.windows(2).all(|w| w[1] < w[0]));
    }
}

mod interchange {
    use super::*;

    #[test]
    fn solve_from_problem_text() {
        let text = "4 3\n0 1\n1 2\n1 3\n";
        let g = parse_problem(text).unwrap();
        let sol = solve(&g, &SearchConfig::default());
        let out = sol.to_string();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("2 1"));
        let colors: Vec<usize> = lines
            .next()
            .unwrap()
            .split(' ')
            .map(|c| c.parse().unwrap())
            .collect();
        assert_eq!(colors.len(), 4);
        assert_eq!(validate_coloring(&g, &colors), Ok(()));
    }

    #[test]
    fn format_solution_is_bit_exact() {
        assert_eq!(format_solution(&[0, 1, 0, 2], true), "3 1\n0 1 0 2");
        assert_eq!(format_solution(&[3, 2, 1, 0], false), "4 0\n3 2 1 0");
    }
}

mod determinism {
    use super::*;

    #[test]
    fn repeated_runs_report_the_same_count() {
        let mut rng = XorShiftRng::seed_from_u64(77);
        let g = Graph::random(&mut rng, 24, 0.3);
        let counts: Vec<usize> = (0..3)
            .map(|_| solve(&g, &SearchConfig::default()).color_count())
            .collect();
        assert!(counts.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn same_seed_gives_same_instance_and_coloring() {
        let g1 = Graph::random(&mut XorShiftRng::seed_from_u64(5), 30, 0.4);
        let g2 = Graph::random(&mut XorShiftRng::seed_from_u64(5), 30, 0.4);
        assert_eq!(g1, g2);
        let cfg = SearchConfig::default();
        assert_eq!(solve(&g1, &cfg).coloring, solve(&g2, &cfg).coloring);
    }
}
