//! Command-line front end: parse casting costs, run a solve against the
//! catalog, and print or serialize the chosen manabase.

use clap::Parser;
use thiserror::Error;

use crate::card::constraint::{card, Constraint, ConstraintParseError, Deck};
use crate::card::types::DeckSize;
use crate::land::catalog;
use crate::solver::{solve, Manabase, ModelError, Weights, WeightsError, DEFAULT_WEIGHTS};

#[derive(Parser, Debug)]
#[command(
    name = "mtg-manabase",
    about = "Choose an optimal manabase for a set of casting-cost constraints"
)]
pub struct Args {
    /// Casting costs with an optional turn, e.g. "2WW" or "U@2"
    #[arg(required = true)]
    pub spells: Vec<String>,

    /// Deck size: 40, 60, 80 or 99
    #[arg(long, default_value_t = 60)]
    pub deck_size: u32,

    /// Pin a land count before solving, e.g. --force "10 Plains" (repeatable)
    #[arg(long = "force")]
    pub forced: Vec<String>,

    /// Objective weight for mana spent over the early turns
    #[arg(long, default_value_t = DEFAULT_WEIGHTS.mana_spend, allow_negative_numbers = true)]
    pub spend_weight: i64,

    /// Objective weight for the number of lands played
    #[arg(long, default_value_t = DEFAULT_WEIGHTS.total_lands, allow_negative_numbers = true)]
    pub lands_weight: i64,

    /// Objective weight for painful lands
    #[arg(long, default_value_t = DEFAULT_WEIGHTS.pain, allow_negative_numbers = true)]
    pub pain_weight: i64,

    /// Objective weight for extra colored sources
    #[arg(long, default_value_t = DEFAULT_WEIGHTS.total_colored_sources, allow_negative_numbers = true)]
    pub sources_weight: i64,

    /// Read all four weights from a JSON file instead of the flags
    #[arg(long)]
    pub weights_file: Option<String>,

    /// Emit the solution as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Parse(#[from] ConstraintParseError),
    #[error("{0}")]
    Model(#[from] ModelError),
    #[error("{0}")]
    Weights(#[from] WeightsError),
    #[error("deck size {0} is not one of 40, 60, 80, 99")]
    BadDeckSize(u32),
    #[error("--force wants \"COUNT LAND_NAME\", got \"{0}\"")]
    BadForce(String),
    #[error("unknown land: {0}")]
    UnknownLand(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn run(args: &Args) -> Result<(), CliError> {
    let deck_size =
        DeckSize::from_card_count(args.deck_size).ok_or(CliError::BadDeckSize(args.deck_size))?;
    let constraints: Vec<Constraint> = args
        .spells
        .iter()
        .map(|spec| card(spec))
        .collect::<Result<_, _>>()?;
    let deck = Deck::new(constraints, deck_size);

    let weights = match &args.weights_file {
        Some(path) => Weights::from_file(path)?,
        None => Weights {
            mana_spend: args.spend_weight,
            total_lands: args.lands_weight,
            pain: args.pain_weight,
            total_colored_sources: args.sources_weight,
        },
    };

    let mut forced = Manabase::new();
    for spec in &args.forced {
        let (land, copies) = parse_forced(spec)?;
        forced.insert(land, copies);
    }

    match solve(&deck, weights, &catalog::all_lands(), &forced)? {
        Some(solution) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&solution)?);
            } else {
                for constraint in &deck.constraints {
                    println!("{constraint}");
                }
                println!();
                print!("{solution}");
            }
        }
        None => println!("No solution found"),
    }
    Ok(())
}

fn parse_forced(spec: &str) -> Result<(&'static crate::land::types::Land, u32), CliError> {
    let (count, name) = spec
        .trim()
        .split_once(' ')
        .ok_or_else(|| CliError::BadForce(spec.to_string()))?;
    let copies: u32 = count
        .parse()
        .map_err(|_| CliError::BadForce(spec.to_string()))?;
    let land = catalog::LANDS_BY_NAME
        .get(name.trim())
        .copied()
        .ok_or_else(|| CliError::UnknownLand(name.trim().to_string()))?;
    Ok((land, copies))
}
