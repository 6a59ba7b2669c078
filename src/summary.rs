//! Summarizing a run: per-cell shares and the serializable run record.
//!
//! [`summarize`] turns raw landing counts into `(index, name, count,
//! percent)` tuples for the presentation layer. [`RunStatistics`] bundles a
//! whole run (configuration, seed, per-cell stats) for JSON export.

use serde::Serialize;

use crate::board::cell_name;
use crate::simulation::Histogram;

/// One cell's share of all landings.
#[derive(Debug, Clone, Serialize)]
pub struct CellStat {
    pub index: usize,
    pub name: &'static str,
    pub count: u64,
    /// 100 * count / total; 0.0 for every cell when no turns were run.
    pub percent: f64,
}

/// Serializable record of one complete run.
#[derive(Serialize)]
pub struct RunStatistics {
    pub turns_per_worker: usize,
    pub worker_count: usize,
    pub seed: u64,
    pub total_turns: u64,
    pub cells: Vec<CellStat>,
}

/// Per-cell stats in board order. A zero-total histogram yields 0.0 percent
/// everywhere rather than dividing by zero.
pub fn summarize(histogram: &Histogram) -> Vec<CellStat> {
    let total = histogram.total();
    histogram
        .iter()
        .map(|(index, count)| {
            let percent = if total == 0 {
                0.0
            } else {
                100.0 * count as f64 / total as f64
            };
            CellStat {
                index,
                name: cell_name(index),
                count,
                percent,
            }
        })
        .collect()
}

/// Build the exportable run record.
pub fn run_statistics(
    histogram: &Histogram,
    turns_per_worker: usize,
    worker_count: usize,
    seed: u64,
) -> RunStatistics {
    RunStatistics {
        turns_per_worker,
        worker_count,
        seed,
        total_turns: histogram.total(),
        cells: summarize(histogram),
    }
}

/// Save a run record as pretty-printed JSON, creating parent directories.
pub fn save_statistics(stats: &RunStatistics, path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let json = serde_json::to_string_pretty(stats).expect("Failed to serialize statistics");
    std::fs::write(path, json).expect("Failed to write statistics file");
}
