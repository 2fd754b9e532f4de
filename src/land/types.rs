use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::card::types::{Color, ColorCombination, MAX_DECK_SIZE};

/// One of the five basic land types a typeline can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BasicLandType {
    pub name: &'static str,
    pub produces: Color,
}

pub const PLAINS_TYPE: BasicLandType = BasicLandType {
    name: "Plains",
    produces: Color::White,
};
pub const ISLAND_TYPE: BasicLandType = BasicLandType {
    name: "Island",
    produces: Color::Blue,
};
pub const SWAMP_TYPE: BasicLandType = BasicLandType {
    name: "Swamp",
    produces: Color::Black,
};
pub const MOUNTAIN_TYPE: BasicLandType = BasicLandType {
    name: "Mountain",
    produces: Color::Red,
};
pub const FOREST_TYPE: BasicLandType = BasicLandType {
    name: "Forest",
    produces: Color::Green,
};

pub const ALL_BASIC_LAND_TYPES: [BasicLandType; 5] = [
    PLAINS_TYPE,
    ISLAND_TYPE,
    SWAMP_TYPE,
    MOUNTAIN_TYPE,
    FOREST_TYPE,
];

/// Behavioral archetypes. The kind decides when a land enters untapped and
/// which color combinations its copies can count toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandKind {
    /// Always untapped, counts toward anything it produces
    Basic,
    /// Always enters tapped
    Tapland,
    /// Untapped when enough in-play lands share its basic types
    Check,
    /// Untapped when the deck runs enough lands sharing its basic types
    Snarl,
    /// Turns one mana of its colors into two; needs a source to feed it
    Filter,
    /// Always untapped at the cost of life
    Pain,
    /// Untapped from turn three when the deck runs enough basics
    Tango,
    /// A tapland with basic land types on its typeline
    Bicycle,
    /// Always untapped for either of its colors
    RiverOfTears,
}

/// A catalog entry. Identity, ordering and hashing go by name.
#[derive(Debug, Clone, Copy)]
pub struct Land {
    pub name: &'static str,
    pub typeline: &'static str,
    pub produces: &'static [Color],
    pub painful: bool,
    pub kind: LandKind,
}

impl Land {
    /// Basics escape the four-copy rule
    pub fn max_copies(&self) -> u32 {
        if self.typeline.starts_with("Basic Land") {
            MAX_DECK_SIZE
        } else {
            4
        }
    }

    pub fn can_produce(&self, color: Color) -> bool {
        self.produces.contains(&color)
    }

    pub fn produces_any(&self, combination: &ColorCombination) -> bool {
        self.produces.iter().any(|&c| combination.contains(c))
    }

    /// Basic land types mentioned on the typeline
    pub fn basic_land_types(&self) -> Vec<BasicLandType> {
        ALL_BASIC_LAND_TYPES
            .iter()
            .filter(|t| self.typeline.contains(t.name))
            .copied()
            .collect()
    }

    /// The types that would satisfy this land's battlefield or hand check
    pub fn basic_land_types_needed(&self) -> Vec<BasicLandType> {
        ALL_BASIC_LAND_TYPES
            .iter()
            .filter(|t| self.can_produce(t.produces))
            .copied()
            .collect()
    }

    pub fn has_any_basic_land_type(&self, types: &[BasicLandType]) -> bool {
        let own = self.basic_land_types();
        types.iter().any(|t| own.contains(t))
    }
}

impl PartialEq for Land {
    fn eq(&self, other: &Land) -> bool {
        self.name == other.name
    }
}

impl Eq for Land {}

impl PartialOrd for Land {
    fn partial_cmp(&self, other: &Land) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Land {
    fn cmp(&self, other: &Land) -> Ordering {
        self.name.cmp(other.name)
    }
}

impl Hash for Land {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Land {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl serde::Serialize for Land {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}
