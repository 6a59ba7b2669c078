use std::time::Instant;

use monopoly::env_config;
use monopoly::simulation::run_simulation;
use monopoly::summary::{run_statistics, save_statistics, summarize};

const DEFAULT_TURNS: usize = 30;
const DEFAULT_WORKERS: usize = 20;
const DEFAULT_SEED: u64 = 42;

const USAGE: &str =
    "Usage: monopoly-simulate [--turns N] [--workers N] [--seed S] [--output DIR]";

fn parse_args() -> (usize, usize, u64, Option<String>) {
    let args: Vec<String> = std::env::args().collect();
    let mut turns = DEFAULT_TURNS;
    let mut workers = DEFAULT_WORKERS;
    let mut seed = DEFAULT_SEED;
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--turns" => {
                i += 1;
                if i < args.len() {
                    turns = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --turns value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--workers" => {
                i += 1;
                if i < args.len() {
                    workers = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --workers value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --seed value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--output" => {
                i += 1;
                if i < args.len() {
                    output = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                println!();
                println!("Options:");
                println!("  --turns N     Turns per simulated player (default: {})", DEFAULT_TURNS);
                println!("  --workers N   Number of independent players (default: {})", DEFAULT_WORKERS);
                println!("  --seed S      RNG seed (default: {})", DEFAULT_SEED);
                println!("  --output DIR  Write landing statistics JSON to DIR");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("{}", USAGE);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if turns < 1 {
        eprintln!("Error: --turns must be at least 1");
        std::process::exit(1);
    }
    if workers < 1 {
        eprintln!("Error: --workers must be at least 1");
        std::process::exit(1);
    }

    (turns, workers, seed, output)
}

fn main() {
    let (turns, workers, seed, output) = parse_args();
    let num_threads = env_config::init_rayon_threads();

    let total_turns = turns as u64 * workers as u64;
    println!(
        "Monopoly landing-frequency simulation ({} workers x {} turns, {} threads)",
        workers, turns, num_threads
    );

    let start = Instant::now();
    let histogram = run_simulation(turns, workers, seed);
    let elapsed = start.elapsed();

    let per_turn_ns = elapsed.as_secs_f64() * 1e9 / total_turns as f64;
    let throughput = total_turns as f64 / elapsed.as_secs_f64();

    println!("  Elapsed:     {:.1} ms", elapsed.as_secs_f64() * 1000.0);
    println!("  Per turn:    {:.0} ns", per_turn_ns);
    println!("  Throughput:  {:.0} turns/sec", throughput);
    println!();

    let mut stats = summarize(&histogram);
    stats.sort_by(|a, b| b.count.cmp(&a.count).then(a.index.cmp(&b.index)));

    println!("Landing frequencies ({} turns total):", histogram.total());
    println!("  {:<26} {:>8} {:>8}", "Cell", "Count", "Percent");
    for stat in &stats {
        println!(
            "  {:<26} {:>8} {:>7.1}%",
            stat.name, stat.count, stat.percent
        );
    }

    if let Some(ref output_dir) = output {
        let json_path = format!("{}/landing_statistics.json", output_dir);
        let record = run_statistics(&histogram, turns, workers, seed);
        save_statistics(&record, &json_path);
        println!();
        println!("  Statistics saved: {}", json_path);
    }
}
