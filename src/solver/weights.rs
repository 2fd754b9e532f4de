use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::card::types::Turn;

/// Signed weights over the four quality measures of a manabase. Positive
/// rewards, negative penalizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    pub mana_spend: i64,
    pub total_lands: i64,
    pub pain: i64,
    pub total_colored_sources: i64,
}

pub const DEFAULT_WEIGHTS: Weights = Weights {
    mana_spend: 6,
    total_lands: -10,
    pain: -2,
    total_colored_sources: 1,
};

impl Default for Weights {
    fn default() -> Weights {
        DEFAULT_WEIGHTS
    }
}

#[derive(Error, Debug)]
pub enum WeightsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl Weights {
    /// Load weights from a JSON file like
    /// `{"mana_spend": 6, "total_lands": -10, "pain": -2, "total_colored_sources": 1}`
    pub fn from_file(path: &str) -> Result<Weights, WeightsError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Rescale a raw mana-spend total onto 0..21 so spends over different
/// numbers of turns compare. A deck that misses every drop maps to 0.
pub fn normalized_mana_spend(max_turn: Turn, mana_spend: u32) -> u32 {
    if max_turn == 0 {
        return 0;
    }
    let floor = max_turn * (max_turn - 1) / 2;
    let scale = 21 / max_turn;
    mana_spend.saturating_sub(floor) * scale
}
