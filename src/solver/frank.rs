//! The published source-count tables and their derived helpers. The numbers
//! answer "how many sources of a color does a deck need to pay N pips of it
//! on turn T at least 90% of the time" and must be preserved exactly.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::card::constraint::Constraint;
use crate::card::types::{ColorCombination, DeckSize, Turn};

/// Raised when the tables have no row for a pip-count / turn pair
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no published source count for {pips} colored pips on turn {turn}")]
pub struct UnsatisfiableConstraint {
    pub pips: u32,
    pub turn: Turn,
}

/// Required sources per deck size for one table row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SourceCounts {
    forty: u32,
    sixty: u32,
    eighty: u32,
    ninety_nine: u32,
}

impl SourceCounts {
    const fn new(forty: u32, sixty: u32, eighty: u32, ninety_nine: u32) -> SourceCounts {
        SourceCounts { forty, sixty, eighty, ninety_nine }
    }

    fn for_size(self, deck_size: DeckSize) -> u32 {
        match deck_size {
            DeckSize::Forty => self.forty,
            DeckSize::Sixty => self.sixty,
            DeckSize::Eighty => self.eighty,
            DeckSize::NinetyNine => self.ninety_nine,
        }
    }
}

// Rows that double as overflow fallbacks
const SINGLE_PIP_TURN_SIX: SourceCounts = SourceCounts::new(6, 9, 12, 14);
const QUADRUPLE_PIP_TURN_FOUR: SourceCounts = SourceCounts::new(17, 24, 34, 39);

fn entry(pips: u32, turn: Turn) -> Result<SourceCounts, UnsatisfiableConstraint> {
    let counts = match (pips, turn) {
        (1, 1) => SourceCounts::new(9, 14, 19, 19),  // C
        (1, 2) => SourceCounts::new(9, 13, 18, 19),  // 1C
        (2, 2) => SourceCounts::new(14, 21, 28, 30), // CC
        (1, 3) => SourceCounts::new(8, 12, 16, 18),  // 2C
        (2, 3) => SourceCounts::new(12, 18, 25, 28), // 1CC
        (3, 3) => SourceCounts::new(16, 23, 32, 36), // CCC
        (1, 4) => SourceCounts::new(7, 10, 15, 16),  // 3C
        (2, 4) => SourceCounts::new(11, 16, 23, 26), // 2CC
        (3, 4) => SourceCounts::new(14, 21, 29, 33), // 1CCC
        (4, 4) => QUADRUPLE_PIP_TURN_FOUR,           // CCCC
        (1, 5) => SourceCounts::new(6, 9, 14, 15),   // 4C
        (2, 5) => SourceCounts::new(10, 15, 20, 23), // 3CC
        (3, 5) => SourceCounts::new(13, 19, 26, 30), // 2CCC
        (4, 5) => SourceCounts::new(15, 22, 31, 36), // 1CCCC
        (1, 6) => SINGLE_PIP_TURN_SIX,               // 5C
        (2, 6) => SourceCounts::new(9, 13, 19, 22),  // 4CC
        (3, 6) => SourceCounts::new(10, 16, 22, 26), // 3CCC
        (2, 7) => SourceCounts::new(8, 12, 17, 20),  // 5CC
        (3, 7) => SourceCounts::new(10, 16, 22, 26), // 4CCC
        _ => return Err(UnsatisfiableConstraint { pips, turn }),
    };
    Ok(counts)
}

/// Required sources for every color combination of a constraint
pub fn frank(
    constraint: &Constraint,
    deck_size: DeckSize,
) -> Result<BTreeMap<ColorCombination, u32>, UnsatisfiableConstraint> {
    let mut required = BTreeMap::new();
    for combination in constraint.color_combinations() {
        let counts = entry(combination.pip_count(), constraint.turn)?;
        required.insert(combination, counts.for_size(deck_size));
    }
    Ok(required)
}

/// How many lands a deck needs to hit its drops for a cost of this size on
/// this turn. Beyond the tables, the four-pips-on-four row stands in.
pub fn num_lands(mana_value: u32, turn: Turn, deck_size: DeckSize) -> u32 {
    entry(mana_value, turn)
        .unwrap_or(QUADRUPLE_PIP_TURN_FOUR)
        .for_size(deck_size)
}

/// How many untapped lands a turn-T cast wants in play. Beyond turn six the
/// turn-six row stands in.
pub fn need_untapped(turn: Turn, deck_size: DeckSize) -> u32 {
    entry(1, turn)
        .unwrap_or(SINGLE_PIP_TURN_SIX)
        .for_size(deck_size)
}

pub fn num_lands_required(constraint: &Constraint, deck_size: DeckSize) -> u32 {
    num_lands(constraint.required.mana_value(), constraint.turn, deck_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::constraint::{card, card_on};
    use crate::card::types::Color::{Black as B, Blue as U, Green as G, Red as R, White as W};
    use crate::card::types::{Color, DeckSize};

    fn cc(colors: &[Color]) -> ColorCombination {
        colors.iter().copied().collect()
    }

    #[test]
    fn test_frank_single_pip() {
        let required = frank(&card("U").unwrap(), DeckSize::Sixty).unwrap();
        assert_eq!(required, [(cc(&[U]), 14)].into_iter().collect());

        let required = frank(&card("1G").unwrap(), DeckSize::Sixty).unwrap();
        assert_eq!(required, [(cc(&[G]), 13)].into_iter().collect());
    }

    #[test]
    fn test_frank_double_pip() {
        let required = frank(&card("WW").unwrap(), DeckSize::Sixty).unwrap();
        assert_eq!(
            required,
            [(cc(&[W]), 13), (cc(&[W, W]), 21)].into_iter().collect()
        );

        let required = frank(&card("2WW@6").unwrap(), DeckSize::Sixty).unwrap();
        assert_eq!(
            required,
            [(cc(&[W]), 9), (cc(&[W, W]), 13)].into_iter().collect()
        );
    }

    #[test]
    fn test_frank_triple_pip() {
        let required = frank(&card("RRB").unwrap(), DeckSize::Sixty).unwrap();
        assert_eq!(
            required,
            [
                (cc(&[R]), 12),
                (cc(&[B]), 12),
                (cc(&[R, R]), 18),
                (cc(&[R, B]), 18),
                (cc(&[R, R, B]), 23),
            ]
            .into_iter()
            .collect()
        );
    }

    #[test]
    fn test_frank_other_deck_sizes() {
        let required = frank(&card("U").unwrap(), DeckSize::Forty).unwrap();
        assert_eq!(required[&cc(&[U])], 9);
        let required = frank(&card("U").unwrap(), DeckSize::NinetyNine).unwrap();
        assert_eq!(required[&cc(&[U])], 19);
    }

    #[test]
    fn test_frank_unsatisfiable() {
        assert_eq!(
            frank(&card_on("WW", 1).unwrap(), DeckSize::Sixty),
            Err(UnsatisfiableConstraint { pips: 2, turn: 1 })
        );
        assert!(frank(&card("WUBRG").unwrap(), DeckSize::Sixty).is_err());
    }

    #[test]
    fn test_frank_is_pure() {
        let constraint = card("RRB").unwrap();
        assert_eq!(
            frank(&constraint, DeckSize::Sixty),
            frank(&constraint, DeckSize::Sixty)
        );
    }

    #[test]
    fn test_need_untapped() {
        assert_eq!(need_untapped(1, DeckSize::Sixty), 14);
        assert_eq!(need_untapped(2, DeckSize::Sixty), 13);
        assert_eq!(need_untapped(6, DeckSize::Sixty), 9);
        // No row past turn six; the turn-six row stands in
        assert_eq!(need_untapped(7, DeckSize::Sixty), 9);
        assert_eq!(need_untapped(2, DeckSize::Forty), 9);
    }

    #[test]
    fn test_num_lands() {
        assert_eq!(num_lands(1, 1, DeckSize::Sixty), 14);
        assert_eq!(num_lands(2, 2, DeckSize::Sixty), 21);
        assert_eq!(num_lands(3, 3, DeckSize::Sixty), 23);
        assert_eq!(num_lands(4, 4, DeckSize::Sixty), 24);
        // Overflow falls back to four pips on turn four
        assert_eq!(num_lands(5, 5, DeckSize::Sixty), 24);
        assert_eq!(num_lands(1, 9, DeckSize::Sixty), 24);
    }

    #[test]
    fn test_num_lands_required() {
        assert_eq!(num_lands_required(&card("1UW").unwrap(), DeckSize::Sixty), 23);
        assert_eq!(num_lands_required(&card("W").unwrap(), DeckSize::Sixty), 14);
    }
}
