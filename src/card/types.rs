use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Game turns are 1-based; turn 0 never exists.
pub type Turn = u32;

/// No supported format plays more than 100 cards.
pub const MAX_DECK_SIZE: u32 = 100;

/// The five colors of mana plus colorless
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "C")]
    Colorless,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Colorless,
    ];

    /// Convert to the single character representation
    pub fn code(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Colorless => 'C',
        }
    }

    /// Parse a single mana symbol letter
    pub fn from_code(code: char) -> Option<Color> {
        match code {
            'W' => Some(Color::White),
            'U' => Some(Color::Blue),
            'B' => Some(Color::Black),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'C' => Some(Color::Colorless),
            _ => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Blue => 1,
            Color::Black => 2,
            Color::Red => 3,
            Color::Green => 4,
            Color::Colorless => 5,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Supported deck sizes; the source-count tables only cover these four
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeckSize {
    Forty,
    Sixty,
    Eighty,
    NinetyNine,
}

impl DeckSize {
    pub fn card_count(self) -> u32 {
        match self {
            DeckSize::Forty => 40,
            DeckSize::Sixty => 60,
            DeckSize::Eighty => 80,
            DeckSize::NinetyNine => 99,
        }
    }

    pub fn from_card_count(count: u32) -> Option<DeckSize> {
        match count {
            40 => Some(DeckSize::Forty),
            60 => Some(DeckSize::Sixty),
            80 => Some(DeckSize::Eighty),
            99 => Some(DeckSize::NinetyNine),
            _ => None,
        }
    }
}

impl fmt::Display for DeckSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.card_count())
    }
}

/// A single symbol in a casting cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pip {
    Colored(Color),
    Generic(u32),
    /// The X in costs like X1B; counts one toward mana value
    Variable,
}

impl Pip {
    pub fn mana_value(self) -> u32 {
        match self {
            Pip::Colored(_) => 1,
            Pip::Generic(n) => n,
            Pip::Variable => 1,
        }
    }
}

impl fmt::Display for Pip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pip::Colored(color) => write!(f, "{color}"),
            Pip::Generic(n) => write!(f, "{n}"),
            Pip::Variable => write!(f, "X"),
        }
    }
}

/// An ordered sequence of pips, e.g. 2WW
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ManaCost {
    pips: Vec<Pip>,
}

impl ManaCost {
    pub fn new(pips: Vec<Pip>) -> ManaCost {
        ManaCost { pips }
    }

    /// A cost of repeated single colored pips, e.g. WWW
    pub fn colored(colors: &[Color]) -> ManaCost {
        ManaCost {
            pips: colors.iter().map(|&c| Pip::Colored(c)).collect(),
        }
    }

    pub fn pips(&self) -> &[Pip] {
        &self.pips
    }

    pub fn mana_value(&self) -> u32 {
        self.pips.iter().map(|pip| pip.mana_value()).sum()
    }

    pub fn colored_pips(&self) -> Vec<Color> {
        self.pips
            .iter()
            .filter_map(|pip| match pip {
                Pip::Colored(color) => Some(*color),
                _ => None,
            })
            .collect()
    }

    /// True when any pip can be paid with mana of any color
    pub fn has_generic(&self) -> bool {
        self.pips
            .iter()
            .any(|pip| matches!(pip, Pip::Generic(_) | Pip::Variable))
    }

    /// Every non-empty sub-multiset of the colored pips. RRB yields
    /// {B}, {R}, {BR}, {RR}, {BRR}.
    pub fn color_combinations(&self) -> BTreeSet<ColorCombination> {
        let mut counts = [0u8; 6];
        for color in self.colored_pips() {
            counts[color.index()] += 1;
        }
        let mut partial: Vec<[u8; 6]> = vec![[0u8; 6]];
        for (i, &available) in counts.iter().enumerate() {
            if available == 0 {
                continue;
            }
            partial = partial
                .iter()
                .flat_map(|base| {
                    (0..=available).map(move |taken| {
                        let mut chosen = *base;
                        chosen[i] = taken;
                        chosen
                    })
                })
                .collect();
        }
        partial
            .into_iter()
            .filter(|counts| counts.iter().any(|&n| n > 0))
            .map(|counts| ColorCombination { counts })
            .collect()
    }
}

impl fmt::Display for ManaCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pip in &self.pips {
            write!(f, "{pip}")?;
        }
        Ok(())
    }
}

/// A multiset of colored pips; the unit against which source counts are
/// checked. {R, B} and {B, R} are the same combination.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ColorCombination {
    counts: [u8; 6],
}

impl ColorCombination {
    pub fn pip_count(&self) -> u32 {
        self.counts.iter().map(|&n| n as u32).sum()
    }

    pub fn count_of(&self, color: Color) -> u32 {
        self.counts[color.index()] as u32
    }

    pub fn contains(&self, color: Color) -> bool {
        self.count_of(color) > 0
    }

    /// True when the combination is exactly one pip of the given color
    pub fn is_single(&self, color: Color) -> bool {
        self.pip_count() == 1 && self.contains(color)
    }

    pub fn is_empty(&self) -> bool {
        self.pip_count() == 0
    }

    /// Distinct colors present, in WUBRGC order
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        Color::ALL.into_iter().filter(|&c| self.contains(c))
    }
}

impl FromIterator<Color> for ColorCombination {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> ColorCombination {
        let mut counts = [0u8; 6];
        for color in iter {
            counts[color.index()] += 1;
        }
        ColorCombination { counts }
    }
}

impl fmt::Display for ColorCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in Color::ALL {
            for _ in 0..self.count_of(color) {
                write!(f, "{color}")?;
            }
        }
        Ok(())
    }
}

impl serde::Serialize for ColorCombination {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
