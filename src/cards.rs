//! The two event-card decks as fixed probability tables.
//!
//! Each deck has [`DECK_SIZE`] equally likely slots and is drawn with
//! replacement — an infinite i.i.d. table, not a shuffled finite stack. Only
//! effects that move the player or touch jail state are modeled; money cards
//! (pay/collect/repairs) collapse to [`Card::NoEffect`] because they cannot
//! influence landing statistics.

use crate::board::{CELL_GO, CELL_MAYFAIR, CELL_OLD_KENT_ROAD, CELL_TRAFALGAR_SQUARE};
use crate::dice::DiceSource;

/// Slots per deck.
pub const DECK_SIZE: usize = 16;

/// One drawn card effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Card {
    /// Teleport to the cell at this index. The destination's own landing
    /// effects are not re-evaluated.
    AdvanceTo(usize),
    /// Immediate jail transition.
    GoToJail,
    /// Move by a signed number of cells, wrapping the board.
    MoveBy(i8),
    /// Bank one get-out-of-jail-free card.
    GetOutOfJailFree,
    /// Draw and apply one chance card (community chest only; the chance deck
    /// never contains this, so the recursion is one level deep).
    DrawChanceCard,
    /// No position effect.
    NoEffect,
}

/// Chance deck: 6 position effects, 10 blanks.
pub const CHANCE_DECK: [Card; DECK_SIZE] = [
    Card::AdvanceTo(CELL_MAYFAIR),
    Card::AdvanceTo(CELL_GO),
    Card::GoToJail,
    Card::MoveBy(-3),
    Card::GetOutOfJailFree,
    Card::AdvanceTo(CELL_TRAFALGAR_SQUARE),
    Card::NoEffect,
    Card::NoEffect,
    Card::NoEffect,
    Card::NoEffect,
    Card::NoEffect,
    Card::NoEffect,
    Card::NoEffect,
    Card::NoEffect,
    Card::NoEffect,
    Card::NoEffect,
];

/// Community chest deck: 5 position effects, 11 blanks.
pub const COMMUNITY_CHEST_DECK: [Card; DECK_SIZE] = [
    Card::GetOutOfJailFree,
    Card::AdvanceTo(CELL_GO),
    Card::GoToJail,
    Card::DrawChanceCard,
    Card::AdvanceTo(CELL_OLD_KENT_ROAD),
    Card::NoEffect,
    Card::NoEffect,
    Card::NoEffect,
    Card::NoEffect,
    Card::NoEffect,
    Card::NoEffect,
    Card::NoEffect,
    Card::NoEffect,
    Card::NoEffect,
    Card::NoEffect,
    Card::NoEffect,
];

/// One uniform draw from the chance deck.
#[inline(always)]
pub fn draw_chance(dice: &mut impl DiceSource) -> Card {
    CHANCE_DECK[dice.deck_slot()]
}

/// One uniform draw from the community chest deck.
#[inline(always)]
pub fn draw_community_chest(dice: &mut impl DiceSource) -> Card {
    COMMUNITY_CHEST_DECK[dice.deck_slot()]
}
