//! The per-turn player state machine.
//!
//! [`take_turn`] maps a [`PlayerState`] to the state after exactly one turn:
//! jail handling, dice rolling with the doubles-reroll budget, and card
//! resolution for chance / community chest landings. The machine is total —
//! no input reachable from [`PlayerState::default`] can make it fail.
//!
//! ## Jail ordering
//!
//! The jail sentence is decremented at the start of the branch, but the
//! branch itself is gated on the jail flag *before* the decrement. So a
//! three-turn sentence allows exactly three escape attempts (3 → 2 → 1 → 0),
//! the fourth turn finds the counter at zero and rolls normally, and a
//! double rolled on the final jail turn still escapes and moves even though
//! the counter reaches zero that same turn.

use crate::board::{advance, cell_name, offset, CELL_GO_TO_JAIL, CELL_JAIL};
use crate::cards::{draw_chance, draw_community_chest, Card};
use crate::dice::{roll_with_doubles_budget, DiceSource, RollOutcome};

/// Doubles-reroll budget at the start of every turn.
pub const MAX_ROLLS: u8 = 3;

/// Jail sentence length in turns.
pub const JAIL_SENTENCE: u8 = 3;

/// One player's complete state between turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerState {
    /// Current cell index, always in 0..BOARD_SIZE.
    pub position: usize,
    /// Doubles-reroll budget left this turn, reset to [`MAX_ROLLS`] each turn.
    pub rolls_remaining: u8,
    /// Banked get-out-of-jail-free cards.
    pub get_out_of_jail_free_cards: u8,
    /// Turns left to serve; nonzero means currently in jail.
    pub turns_left_in_jail: u8,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: 0,
            rolls_remaining: MAX_ROLLS,
            get_out_of_jail_free_cards: 0,
            turns_left_in_jail: 0,
        }
    }
}

impl PlayerState {
    /// Currently serving a jail sentence.
    #[inline(always)]
    pub fn in_jail(&self) -> bool {
        self.turns_left_in_jail > 0
    }
}

/// Put the player in jail: move to the jail cell and start a full sentence.
/// Card-forced and landed-on-go-to-jail transitions both come through here.
#[inline(always)]
fn send_to_jail(mut state: PlayerState) -> PlayerState {
    state.position = CELL_JAIL;
    state.turns_left_in_jail = JAIL_SENTENCE;
    state
}

/// Apply one drawn card. `MoveBy` and `AdvanceTo` relocate without
/// re-triggering the destination cell's own landing effects.
fn apply_card(mut state: PlayerState, card: Card, dice: &mut impl DiceSource) -> PlayerState {
    match card {
        Card::AdvanceTo(index) => {
            state.position = index;
            state
        }
        Card::GoToJail => send_to_jail(state),
        Card::MoveBy(delta) => {
            state.position = offset(state.position, delta);
            state
        }
        Card::GetOutOfJailFree => {
            state.get_out_of_jail_free_cards += 1;
            state
        }
        Card::DrawChanceCard => {
            let chained = draw_chance(dice);
            apply_card(state, chained, dice)
        }
        Card::NoEffect => state,
    }
}

/// Resolve the cell the dice landed on. Only dice-roll landings get here;
/// card-driven movement is final.
fn resolve_landing(state: PlayerState, dice: &mut impl DiceSource) -> PlayerState {
    if state.position == CELL_GO_TO_JAIL {
        return send_to_jail(state);
    }
    match cell_name(state.position) {
        "chance" => {
            let card = draw_chance(dice);
            apply_card(state, card, dice)
        }
        "community-chest" => {
            let card = draw_community_chest(dice);
            apply_card(state, card, dice)
        }
        _ => state,
    }
}

/// Advance one player by exactly one turn.
pub fn take_turn(state: PlayerState, dice: &mut impl DiceSource) -> PlayerState {
    let mut state = state;
    state.rolls_remaining = MAX_ROLLS;

    if state.in_jail() {
        state.turns_left_in_jail -= 1;

        if state.get_out_of_jail_free_cards > 0 {
            // The card frees without moving; the turn ends here.
            state.get_out_of_jail_free_cards -= 1;
            state.turns_left_in_jail = 0;
            return state;
        }

        // One escape attempt per jailed turn.
        let roll = dice.roll_two();
        if roll.is_double {
            state.turns_left_in_jail = 0;
            state.rolls_remaining -= 1;
            state.position = advance(state.position, roll.total);
            return resolve_landing(state, dice);
        }
        // Failed attempt: stay put. The decrement above times the sentence
        // out after three failures.
        return state;
    }

    match roll_with_doubles_budget(dice, state.rolls_remaining) {
        RollOutcome::ThreeDoubles => send_to_jail(state),
        RollOutcome::Moved(total) => {
            state.position = advance(state.position, total);
            resolve_landing(state, dice)
        }
    }
}
