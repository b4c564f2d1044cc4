use gcolor::graph::Graph;
use gcolor::search::{solve, SearchConfig, Solution};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;
use std::time::Duration;

/// Five minutes per instance.
const DEFAULT_TIMEOUT_SECS: f64 = 300.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut cfg = SearchConfig {
        timeout: Some(Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS)),
        ..SearchConfig::default()
    };
    let mut files: Vec<String> = Vec::new();
    let mut random: Option<(usize, f64)> = None;
    let mut seed: Option<u64> = None;
    let mut emit = false;
    let mut save: Option<String> = None;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--timeout" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                let secs: f64 = v.parse().unwrap_or_else(|_| usage_and_exit(2));
                cfg.timeout = if secs > 0.0 {
                    Some(Duration::try_from_secs_f64(secs).unwrap_or_else(|_| usage_and_exit(2)))
                } else {
                    None
                };
                i += 2;
            }
            "--no-seed" => {
                cfg.seed_with_greedy = false;
                i += 1;
            }
            "--no-clique-bound" => {
                cfg.clique_bound = false;
                i += 1;
            }
            "--random" => {
                let n = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                let p = args.get(i + 2).unwrap_or_else(|| usage_and_exit(2));
                let n: usize = n.parse().unwrap_or_else(|_| usage_and_exit(2));
                let p: f64 = p.parse().unwrap_or_else(|_| usage_and_exit(2));
                if !(0.0..=1.0).contains(&p) {
                    usage_and_exit(2);
                }
                random = Some((n, p));
                i += 3;
            }
            "--seed" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                seed = Some(v.parse().unwrap_or_else(|_| usage_and_exit(2)));
                i += 2;
            }
            "--emit" => {
                emit = true;
                i += 1;
            }
            "--save" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                save = Some(v.clone());
                i += 2;
            }
            "--help" | "-h" => usage_and_exit(0),
            flag if flag.starts_with("--") => usage_and_exit(2),
            path => {
                files.push(path.to_string());
                i += 1;
            }
        }
    }

    if let Some((n, p)) = random {
        let mut rng = SmallRng::seed_from_u64(seed.unwrap_or_else(rand::random::<u64>));
        let graph = Graph::random(&mut rng, n, p);
        if let Some(path) = &save {
            if let Err(e) = graph.save_to_file(path) {
                eprintln!("Failed to save instance to {path}: {e}");
                std::process::exit(1);
            }
            log::info!("Saved instance to {path}");
        }
        if emit {
            if let Err(e) = graph.write_to(std::io::stdout().lock()) {
                eprintln!("Failed to write instance: {e}");
                std::process::exit(1);
            }
            return;
        }
        report(&solve(&graph, &cfg));
        return;
    }

    if files.is_empty() {
        eprintln!("This solver requires an input file (e.g. gcolor ./data/gc_4_1).");
        usage_and_exit(2);
    }

    // One single-threaded search per file.
    let results: Vec<_> = files
        .par_iter()
        .map(|path| Graph::load_from_file(path).map(|g| solve(&g, &cfg)))
        .collect();

    let mut failed = false;
    for (path, result) in files.iter().zip(results) {
        if files.len() > 1 {
            println!("# {path}");
        }
        match result {
            Ok(solution) => report(&solution),
            Err(e) => {
                eprintln!("{path}: {e}");
                failed = true;
            }
        }
    }
    if failed {
        std::process::exit(1);
    }
}

fn report(solution: &Solution) {
    log::info!(
        "{} colors ({}), {} iterations in {:.3}s",
        solution.color_count(),
        if solution.optimal { "optimal" } else { "timeout" },
        solution.stats.iterations,
        solution.stats.elapsed.as_secs_f64()
    );
    println!("{solution}");
}

fn usage_and_exit(code: i32) -> ! {
    eprintln!(
        "Usage:\n  gcolor [--timeout SECS] [--no-seed] [--no-clique-bound] FILE...\n  gcolor --random N P [--seed SEED] [--save PATH] [--emit] [--timeout SECS]\n\nOptions:\n  --timeout SECS       Wall-clock budget per instance; 0 disables it (default: 300)\n  --no-seed            Start from one color per node instead of a DSATUR coloring\n  --no-clique-bound    Do not stop early when a greedy clique proves optimality\n  --random N P         Solve a random G(N, P) instance instead of reading files\n  --seed SEED          Deterministic seed for --random\n  --save PATH          With --random, also write the instance to PATH\n  --emit               With --random, print the instance instead of solving it\n"
    );
    std::process::exit(code)
}
