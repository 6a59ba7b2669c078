//! Dice rolling and the randomness seam.
//!
//! Every simulated player owns a [`DiceSource`] — its private entropy stream.
//! The production implementation is [`SeededDice`] (one `SmallRng` per
//! worker, seeded from the run seed plus the worker index, so workers are
//! independent and a run is reproducible). [`ScriptedDice`] replays an
//! explicit sequence of outcomes for tests and debugging.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

use crate::cards::DECK_SIZE;

/// One two-dice roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRoll {
    /// Sum of both dice, 2..=12.
    pub total: u8,
    /// Both dice showed the same face.
    pub is_double: bool,
}

/// Outcome of rolling with a doubles-reroll budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollOutcome {
    /// Accumulated total of all rolls this turn, including prior doubles.
    Moved(u8),
    /// The reroll budget ran out while still rolling doubles: go to jail.
    ThreeDoubles,
}

/// Private entropy stream of one simulated player.
pub trait DiceSource {
    /// One die face, uniform in 1..=6.
    fn roll_die(&mut self) -> u8;

    /// One deck slot, uniform in 0..DECK_SIZE.
    fn deck_slot(&mut self) -> usize;

    /// Two independent dice, with the doubles flag.
    fn roll_two(&mut self) -> DiceRoll {
        let a = self.roll_die();
        let b = self.roll_die();
        DiceRoll {
            total: a + b,
            is_double: a == b,
        }
    }
}

/// `SmallRng`-backed dice, seeded per worker.
pub struct SeededDice {
    rng: SmallRng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl DiceSource for SeededDice {
    #[inline(always)]
    fn roll_die(&mut self) -> u8 {
        self.rng.random_range(1..=6)
    }

    #[inline(always)]
    fn deck_slot(&mut self) -> usize {
        self.rng.random_range(0..DECK_SIZE)
    }
}

/// Replays explicit die faces and deck slots in order.
///
/// Panics when the script runs dry — an exhausted script is a bug in the
/// caller, not a recoverable condition.
pub struct ScriptedDice {
    faces: VecDeque<u8>,
    slots: VecDeque<usize>,
}

impl ScriptedDice {
    /// Script only die faces (for turns that never draw a card).
    pub fn from_faces(faces: &[u8]) -> Self {
        Self {
            faces: faces.iter().copied().collect(),
            slots: VecDeque::new(),
        }
    }

    /// Script die faces and deck slots.
    pub fn new(faces: &[u8], slots: &[usize]) -> Self {
        Self {
            faces: faces.iter().copied().collect(),
            slots: slots.iter().copied().collect(),
        }
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        let face = self.faces.pop_front().expect("scripted dice exhausted");
        assert!((1..=6).contains(&face), "scripted face out of range: {}", face);
        face
    }

    fn deck_slot(&mut self) -> usize {
        let slot = self.slots.pop_front().expect("scripted deck slots exhausted");
        assert!(slot < DECK_SIZE, "scripted slot out of range: {}", slot);
        slot
    }
}

/// Roll two dice repeatedly while doubles come up, spending one reroll per
/// double. A non-double ends the turn's rolling and yields the accumulated
/// total; exhausting the budget on a double yields [`RollOutcome::ThreeDoubles`]
/// (three consecutive doubles in one turn send the player to jail regardless
/// of position).
pub fn roll_with_doubles_budget(dice: &mut impl DiceSource, max_rerolls: u8) -> RollOutcome {
    let mut budget = max_rerolls;
    let mut total: u8 = 0;
    loop {
        let roll = dice.roll_two();
        if !roll.is_double {
            return RollOutcome::Moved(total + roll.total);
        }
        budget -= 1;
        if budget == 0 {
            return RollOutcome::ThreeDoubles;
        }
        total += roll.total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_die_range() {
        let mut dice = SeededDice::new(99);
        for _ in 0..10_000 {
            let d = dice.roll_die();
            assert!((1..=6).contains(&d), "die out of range: {}", d);
        }
    }

    #[test]
    fn test_roll_die_distribution() {
        let mut dice = SeededDice::new(42);
        let mut counts = [0u64; 6];
        let n = 60_000;
        for _ in 0..n {
            counts[(dice.roll_die() - 1) as usize] += 1;
        }
        let expected = n as f64 / 6.0;
        for (face, &count) in counts.iter().enumerate() {
            let ratio = count as f64 / expected;
            assert!(
                ratio > 0.95 && ratio < 1.05,
                "face {} has count {} (expected ~{:.0}, ratio {:.3})",
                face + 1,
                count,
                expected,
                ratio
            );
        }
    }

    #[test]
    fn test_roll_two_doubles_flag() {
        let mut dice = ScriptedDice::from_faces(&[3, 3, 2, 5]);
        let first = dice.roll_two();
        assert_eq!(first, DiceRoll { total: 6, is_double: true });
        let second = dice.roll_two();
        assert_eq!(second, DiceRoll { total: 7, is_double: false });
    }

    #[test]
    fn test_seeded_deterministic() {
        let mut a = SeededDice::new(123);
        let mut b = SeededDice::new(123);
        for _ in 0..100 {
            assert_eq!(a.roll_die(), b.roll_die());
            assert_eq!(a.deck_slot(), b.deck_slot());
        }
    }

    #[test]
    fn test_budget_roll_plain_total() {
        let mut dice = ScriptedDice::from_faces(&[3, 5]);
        assert_eq!(roll_with_doubles_budget(&mut dice, 3), RollOutcome::Moved(8));
    }

    #[test]
    fn test_budget_roll_accumulates_doubles() {
        // (2,2) double, (1,1) double, (3,4) stop: 4 + 2 + 7 = 13.
        let mut dice = ScriptedDice::from_faces(&[2, 2, 1, 1, 3, 4]);
        assert_eq!(roll_with_doubles_budget(&mut dice, 3), RollOutcome::Moved(13));
    }

    #[test]
    fn test_budget_roll_three_doubles() {
        let mut dice = ScriptedDice::from_faces(&[1, 1, 2, 2, 3, 3]);
        assert_eq!(
            roll_with_doubles_budget(&mut dice, 3),
            RollOutcome::ThreeDoubles
        );
    }
}
