//! Parallel simulation: workers, turn sequences, and the landing histogram.
//!
//! Each worker is one independent simulated player: a fresh
//! [`PlayerState`](crate::turn::PlayerState), a private [`SeededDice`] stream
//! derived from the run seed plus the worker index, and a bounded
//! [`TurnSequence`] of exactly `turns_per_worker` positions. Workers fold
//! their own positions into private [`Histogram`]s which are merged with an
//! associative reduce — no locks, no shared mutable state.
//!
//! A turn's state depends on the previous turn's state, so there is no
//! parallelism inside a worker; all parallelism is across workers.

use rayon::prelude::*;

use crate::board::BOARD_SIZE;
use crate::dice::{DiceSource, SeededDice};
use crate::turn::{take_turn, PlayerState};

/// Landing counts per board cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; BOARD_SIZE],
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    /// All-zero histogram.
    pub fn new() -> Self {
        Self {
            counts: [0; BOARD_SIZE],
        }
    }

    /// Count one landing on `index`.
    #[inline(always)]
    pub fn record(&mut self, index: usize) {
        self.counts[index] += 1;
    }

    /// Landings on `index`.
    #[inline(always)]
    pub fn count(&self, index: usize) -> u64 {
        self.counts[index]
    }

    /// Total landings across all cells.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Cell-wise sum. Commutative and associative, so worker results can be
    /// merged in any order.
    pub fn merge(mut self, other: Histogram) -> Histogram {
        for (a, b) in self.counts.iter_mut().zip(other.counts.iter()) {
            *a += b;
        }
        self
    }

    /// `(index, count)` in board order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.counts.iter().copied().enumerate()
    }
}

/// Bounded turn generator: yields the cell occupied after each of exactly
/// `turn_count` turns, computed on demand.
pub struct TurnSequence<D: DiceSource> {
    state: PlayerState,
    dice: D,
    remaining: usize,
}

impl<D: DiceSource> TurnSequence<D> {
    /// Start a fresh player with `turn_count` turns to play.
    pub fn new(turn_count: usize, dice: D) -> Self {
        Self {
            state: PlayerState::default(),
            dice,
            remaining: turn_count,
        }
    }
}

impl<D: DiceSource> Iterator for TurnSequence<D> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.state = take_turn(self.state, &mut self.dice);
        Some(self.state.position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Run one player for `turn_count` turns, folding every visited cell into a
/// private histogram. Total over its inputs — a worker cannot fail.
pub fn run_worker(turn_count: usize, dice: impl DiceSource) -> Histogram {
    let mut histogram = Histogram::new();
    for position in TurnSequence::new(turn_count, dice) {
        histogram.record(position);
    }
    histogram
}

/// Run `worker_count` independent players of `turns_per_worker` turns each
/// in parallel and merge their histograms. The result's total is exactly
/// `turns_per_worker * worker_count`.
///
/// Worker `i` rolls from `SeededDice::new(seed.wrapping_add(i))`, so runs
/// are reproducible and workers share no entropy state.
pub fn run_simulation(turns_per_worker: usize, worker_count: usize, seed: u64) -> Histogram {
    assert!(turns_per_worker >= 1, "turns_per_worker must be >= 1");
    assert!(worker_count >= 1, "worker_count must be >= 1");

    (0..worker_count)
        .into_par_iter()
        .map(|i| {
            let dice = SeededDice::new(seed.wrapping_add(i as u64));
            run_worker(turns_per_worker, dice)
        })
        .reduce(Histogram::new, Histogram::merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CELL_JAIL;
    use crate::dice::ScriptedDice;

    #[test]
    fn test_turn_sequence_length() {
        let positions: Vec<usize> = TurnSequence::new(50, SeededDice::new(3)).collect();
        assert_eq!(positions.len(), 50);
        assert!(positions.iter().all(|&p| p < BOARD_SIZE));
    }

    #[test]
    fn test_turn_sequence_scripted() {
        // (3,5) → 8, then (2,4) → 14.
        let dice = ScriptedDice::from_faces(&[3, 5, 2, 4]);
        let positions: Vec<usize> = TurnSequence::new(2, dice).collect();
        assert_eq!(positions, vec![8, 14]);
    }

    #[test]
    fn test_worker_histogram_total() {
        let histogram = run_worker(200, SeededDice::new(9));
        assert_eq!(histogram.total(), 200);
    }

    #[test]
    fn test_merge_is_cellwise_sum() {
        let mut a = Histogram::new();
        let mut b = Histogram::new();
        a.record(0);
        a.record(CELL_JAIL);
        b.record(CELL_JAIL);
        let merged = a.merge(b);
        assert_eq!(merged.count(0), 1);
        assert_eq!(merged.count(CELL_JAIL), 2);
        assert_eq!(merged.total(), 3);
    }

    #[test]
    fn test_simulation_total_count() {
        let histogram = run_simulation(30, 20, 42);
        assert_eq!(histogram.total(), 600);
    }

    #[test]
    fn test_simulation_deterministic() {
        let a = run_simulation(100, 8, 7);
        let b = run_simulation(100, 8, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_workers_are_independent_streams() {
        // A different seed must not reproduce the same visit counts for a
        // run of this size.
        let a = run_simulation(200, 4, 1);
        let b = run_simulation(200, 4, 2);
        assert_ne!(a, b);
    }
}
