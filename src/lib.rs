//! # mtg-manabase
//!
//! mtg-manabase chooses how many copies of each candidate land a deck should
//! play. A deck is described as a set of casting-cost constraints ("I want to
//! cast 2WW on turn four"); the crate turns those into an integer program over
//! the published Karsten source-count tables and solves for the manabase that
//! meets every requirement while maximizing a tunable quality score.

pub mod card;
pub mod cli;
pub mod land;
pub mod solver;

#[cfg(test)]
mod integration_tests;
