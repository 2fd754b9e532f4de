use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use crate::card::types::{Color, ColorCombination, DeckSize, ManaCost, Pip, Turn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintParseError {
    #[error("empty casting cost")]
    Empty,
    #[error("unrecognized mana symbol '{symbol}' in \"{spec}\"")]
    UnrecognizedSymbol { symbol: char, spec: String },
    #[error("invalid turn in \"{spec}\"")]
    InvalidTurn { spec: String },
    #[error("generic cost too large in \"{spec}\"")]
    GenericTooLarge { spec: String },
}

/// A single requirement: be able to pay `required` on `turn`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Constraint {
    pub required: ManaCost,
    pub turn: Turn,
}

impl Constraint {
    pub fn new(required: ManaCost, turn: Turn) -> Constraint {
        Constraint { required, turn }
    }

    /// A constraint due the turn its cost naturally comes online
    pub fn on_curve(required: ManaCost) -> Constraint {
        let turn = required.mana_value();
        Constraint { required, turn }
    }

    pub fn color_combinations(&self) -> BTreeSet<ColorCombination> {
        self.required.color_combinations()
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{} {}", self.turn, self.required)
    }
}

/// Parse shorthand like "R", "2WW" or "XX2WW", cast on curve.
/// An explicit "@turn" suffix overrides the turn: "U@2".
pub fn card(spec: &str) -> Result<Constraint, ConstraintParseError> {
    let (cost_spec, turn) = match spec.split_once('@') {
        Some((cost, turn_spec)) => {
            let turn: Turn = turn_spec
                .parse()
                .map_err(|_| ConstraintParseError::InvalidTurn {
                    spec: spec.to_string(),
                })?;
            (cost, Some(turn))
        }
        None => (spec, None),
    };
    let cost = parse_cost(cost_spec)?;
    Ok(match turn {
        Some(turn) => Constraint::new(cost, turn),
        None => Constraint::on_curve(cost),
    })
}

/// Parse shorthand with an explicit turn, e.g. the cost U wanted on turn 2
pub fn card_on(spec: &str, turn: Turn) -> Result<Constraint, ConstraintParseError> {
    Ok(Constraint::new(parse_cost(spec)?, turn))
}

fn parse_cost(spec: &str) -> Result<ManaCost, ConstraintParseError> {
    if spec.is_empty() {
        return Err(ConstraintParseError::Empty);
    }
    // Colored letters run to the end of the spec; everything before them is
    // X pips followed by a generic amount.
    let chars: Vec<char> = spec.chars().collect();
    let mut split = chars.len();
    while split > 0 {
        match Color::from_code(chars[split - 1]) {
            Some(_) => split -= 1,
            None => break,
        }
    }
    let mut pips = Vec::new();
    let mut digits = String::new();
    for &symbol in &chars[..split] {
        if symbol == 'X' && digits.is_empty() {
            pips.push(Pip::Variable);
        } else if symbol.is_ascii_digit() {
            digits.push(symbol);
        } else {
            return Err(ConstraintParseError::UnrecognizedSymbol {
                symbol,
                spec: spec.to_string(),
            });
        }
    }
    if !digits.is_empty() {
        let generic: u32 = digits
            .parse()
            .map_err(|_| ConstraintParseError::GenericTooLarge {
                spec: spec.to_string(),
            })?;
        if generic > 0 {
            pips.push(Pip::Generic(generic));
        }
    }
    for &symbol in &chars[split..] {
        match Color::from_code(symbol) {
            Some(color) => pips.push(Pip::Colored(color)),
            None => {
                return Err(ConstraintParseError::UnrecognizedSymbol {
                    symbol,
                    spec: spec.to_string(),
                })
            }
        }
    }
    if pips.is_empty() {
        return Err(ConstraintParseError::Empty);
    }
    Ok(ManaCost::new(pips))
}

/// A full set of casting requirements plus the deck size they live in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    pub constraints: BTreeSet<Constraint>,
    pub deck_size: DeckSize,
}

impl Deck {
    pub fn new(constraints: impl IntoIterator<Item = Constraint>, deck_size: DeckSize) -> Deck {
        Deck {
            constraints: constraints.into_iter().collect(),
            deck_size,
        }
    }

    /// Union of colored pips across every constraint
    pub fn colors(&self) -> BTreeSet<Color> {
        self.constraints
            .iter()
            .flat_map(|constraint| constraint.required.colored_pips())
            .collect()
    }

    pub fn max_turn(&self) -> Turn {
        self.constraints
            .iter()
            .map(|constraint| constraint.turn)
            .max()
            .unwrap_or(0)
    }
}
