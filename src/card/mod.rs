pub mod constraint;
pub mod types;

pub use constraint::{card, card_on, Constraint, ConstraintParseError, Deck};
pub use types::{Color, ColorCombination, DeckSize, ManaCost, Pip, Turn, MAX_DECK_SIZE};
