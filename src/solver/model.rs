//! Model construction: decision variables keyed by structured names, linear
//! constraints over them, and the weighted objective. Solving happens in
//! [`crate::solver::solve`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::card::constraint::{Constraint, Deck};
use crate::card::types::{Color, ColorCombination, DeckSize, Turn};
use crate::land::types::{Land, LandKind};

use super::expr::{LinConstraint, LinExpr, VarId};
use super::frank::{frank, need_untapped, num_lands, num_lands_required, UnsatisfiableConstraint};
use super::weights::Weights;

/// Exceeds any land-count sum; total lands are capped at the deck size
pub(crate) const BIG_M: i64 = 200;

/// Offset keeping typical objective values positive
const OBJECTIVE_OFFSET: i64 = 1000;

/// A chosen manabase, or a set of counts to pin before solving
pub type Manabase = BTreeMap<&'static Land, u32>;

/// The two sides of a filter land's output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterPiece {
    /// Two pips of the first produced color
    DoubleFirst,
    /// One pip of each produced color
    Mixed,
    /// Two pips of the second produced color
    DoubleSecond,
    /// Input mana of the first color fed to the filter
    ConsumedFirst,
    /// Input mana of the second color fed to the filter
    ConsumedSecond,
}

/// Structured variable names. Every decision variable in a model is
/// registered under exactly one key; creating the same key twice is an error.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum VarKey {
    /// Copies of a land in the manabase
    Count(&'static str),
    /// Published requirement for a combination on a turn
    Required { turn: Turn, combination: ColorCombination },
    /// Sources counting toward a combination on a turn
    Sources { turn: Turn, combination: ColorCombination },
    /// Untapped lands a cost wants in play on its turn
    RequiredUntapped { turn: Turn, cost: ColorCombination },
    /// Untapped lands available to a cost on its turn
    UntappedSources { turn: Turn, cost: ColorCombination },
    /// A land's enters-untapped condition holds on a turn
    Active { land: &'static str, turn: Turn },
    /// Copies of a land assumed untapped on a turn
    MakesMana { land: &'static str, turn: Turn },
    /// One of a filter's output/input quantities for a specific cost
    FilterPiece { land: &'static str, turn: Turn, cost: ColorCombination, piece: FilterPiece },
    /// Enough untapped lands to use all mana on a turn
    EnoughUntapped { turn: Turn },
    ManaSpendOnTurn { turn: Turn },
    TotalLands,
    MinLands,
    Pain,
    TotalColoredSources,
    ManaSpend,
    MaxManaSpend,
    Objective,
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("model variable already exists for {0:?}")]
    KeyCollision(VarKey),
    #[error(transparent)]
    Unsatisfiable(#[from] UnsatisfiableConstraint),
    #[error("candidate land set is empty")]
    NoCandidateLands,
    #[error("no candidate land produces any of the deck's colors")]
    NoViableLands,
    #[error("deck has no constraints")]
    NoConstraints,
    #[error("deck has no colored mana requirements")]
    NoColors,
    #[error("{0} is required before turn 1")]
    InvalidTurn(Constraint),
    #[error("forced land {0} is not in the candidate set")]
    ForcedLandMissing(&'static str),
    #[error("forced {count} copies of {land}; at most {max} allowed")]
    ForcedLandOverMax { land: &'static str, count: u32, max: u32 },
    #[error("solver failed: {0}")]
    SolverFailure(String),
}

/// What a requirement row counts
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Combination(ColorCombination),
    Untapped(ColorCombination),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Combination(combination) => write!(f, "{combination}"),
            Resource::Untapped(cost) if cost.is_empty() => write!(f, "untapped"),
            Resource::Untapped(cost) => write!(f, "{cost} untapped"),
        }
    }
}

/// One requirement the solver must satisfy, kept around so the solution can
/// report who provided what
#[derive(Debug, Clone)]
pub(crate) struct Requirement {
    pub(crate) turn: Turn,
    pub(crate) resource: Resource,
    pub(crate) required: u32,
    pub(crate) total: LinExpr,
    pub(crate) contributions: Vec<(&'static str, LinExpr)>,
}

#[derive(Debug, Clone)]
pub(crate) struct VarDef {
    pub(crate) key: VarKey,
    pub(crate) lower: i64,
    pub(crate) upper: i64,
}

/// Variable ids the solution extractor needs back out of the model
#[derive(Debug, Clone, Copy)]
pub(crate) struct Aggregates {
    pub(crate) total_lands: VarId,
    pub(crate) pain: VarId,
    pub(crate) total_colored_sources: VarId,
    pub(crate) mana_spend: VarId,
    pub(crate) objective: VarId,
    pub(crate) min_lands: u32,
    pub(crate) max_mana_spend: u32,
    pub(crate) max_turn: Turn,
}

/// A model under construction: the variable registry, the constraint store
/// and the candidate land variables
pub struct Model<'a> {
    pub deck: &'a Deck,
    pub weights: Weights,
    pub lands: BTreeMap<&'static Land, VarId>,
    pub(crate) vars: Vec<VarDef>,
    pub(crate) constraints: Vec<LinConstraint>,
    pub(crate) requirements: Vec<Requirement>,
    pub(crate) objective: LinExpr,
    pub(crate) aggregates: Option<Aggregates>,
    index: BTreeMap<VarKey, VarId>,
}

impl<'a> Model<'a> {
    /// Validate the inputs and set up one count variable per given land.
    /// The candidate set is modeled as passed; [`define_model`] narrows it to
    /// viable lands first. Forced counts are pinned here.
    pub fn new(
        deck: &'a Deck,
        candidates: &BTreeSet<&'static Land>,
        weights: Weights,
        forced: &Manabase,
    ) -> Result<Model<'a>, ModelError> {
        if candidates.is_empty() {
            return Err(ModelError::NoCandidateLands);
        }
        if deck.constraints.is_empty() {
            return Err(ModelError::NoConstraints);
        }
        if let Some(constraint) = deck.constraints.iter().find(|c| c.turn < 1) {
            return Err(ModelError::InvalidTurn(constraint.clone()));
        }
        if deck.colors().is_empty() {
            return Err(ModelError::NoColors);
        }
        for (&land, &count) in forced {
            if !candidates.contains(land) {
                return Err(ModelError::ForcedLandMissing(land.name));
            }
            if count > land.max_copies() {
                return Err(ModelError::ForcedLandOverMax {
                    land: land.name,
                    count,
                    max: land.max_copies(),
                });
            }
        }

        let mut model = Model {
            deck,
            weights,
            lands: BTreeMap::new(),
            vars: Vec::new(),
            constraints: Vec::new(),
            requirements: Vec::new(),
            objective: LinExpr::default(),
            aggregates: None,
            index: BTreeMap::new(),
        };
        for &land in candidates {
            let count = model.new_int_var(VarKey::Count(land.name), 0, land.max_copies() as i64)?;
            model.lands.insert(land, count);
        }
        for (&land, &count) in forced {
            if let Some(&var) = model.lands.get(land) {
                model.add(LinExpr::from(var).equals(count as i64));
            }
        }
        Ok(model)
    }

    pub fn deck_size(&self) -> DeckSize {
        self.deck.deck_size
    }

    pub fn lookup(&self, key: &VarKey) -> Option<VarId> {
        self.index.get(key).copied()
    }

    /// Register a fresh integer variable under a key
    pub fn new_int_var(&mut self, key: VarKey, lower: i64, upper: i64) -> Result<VarId, ModelError> {
        if self.index.contains_key(&key) {
            return Err(ModelError::KeyCollision(key));
        }
        Ok(self.int_var_cached(key, lower, upper))
    }

    pub fn new_bool_var(&mut self, key: VarKey) -> Result<VarId, ModelError> {
        self.new_int_var(key, 0, 1)
    }

    pub fn add(&mut self, constraint: LinConstraint) {
        self.constraints.push(constraint);
    }

    pub(crate) fn int_var_cached(&mut self, key: VarKey, lower: i64, upper: i64) -> VarId {
        if let Some(&var) = self.index.get(&key) {
            return var;
        }
        let var = VarId(self.vars.len());
        self.vars.push(VarDef {
            key: key.clone(),
            lower,
            upper,
        });
        self.index.insert(key, var);
        var
    }

    /// A cached boolean that is 1 exactly when `sum >= threshold`
    pub(crate) fn reify_at_least(&mut self, key: VarKey, sum: LinExpr, threshold: i64) -> VarId {
        if let Some(flag) = self.lookup(&key) {
            return flag;
        }
        let flag = self.int_var_cached(key, 0, 1);
        self.add((sum.clone() - LinExpr::term(flag, BIG_M)).geq(threshold - BIG_M));
        self.add((sum - LinExpr::term(flag, BIG_M)).leq(threshold - 1));
        flag
    }

    /// A cached integer equal to `count` while `active` is 1 and 0 otherwise
    pub(crate) fn gate_count(
        &mut self,
        key: VarKey,
        count: VarId,
        upper: i64,
        active: VarId,
    ) -> VarId {
        if let Some(gated) = self.lookup(&key) {
            return gated;
        }
        let gated = self.int_var_cached(key, 0, upper);
        self.add((LinExpr::from(gated) - LinExpr::from(count)).leq(0));
        self.add((LinExpr::from(gated) - LinExpr::from(count) - LinExpr::term(active, upper)).geq(-upper));
        self.add((LinExpr::from(gated) - LinExpr::term(active, upper)).leq(0));
        gated
    }
}

/// Trim the candidate set to lands worth modeling: non-basics must match two
/// of the deck's colors, basics one, and 3+ color lands stay out of one- and
/// two-color decks.
pub fn viable_lands(
    colors: &BTreeSet<Color>,
    lands: &BTreeSet<&'static Land>,
) -> BTreeSet<&'static Land> {
    lands
        .iter()
        .filter(|land| {
            if colors.len() <= 2 && land.produces.len() > 2 {
                return false;
            }
            let matching = land.produces.iter().filter(|c| colors.contains(c)).count();
            matching >= 2 || (matching >= 1 && land.kind == LandKind::Basic)
        })
        .copied()
        .collect()
}

/// Build the full model for a deck: per-combination source requirements,
/// per-cost untapped requirements, deck-level totals, the mana-spend ladder
/// and the weighted objective.
pub fn define_model<'a>(
    deck: &'a Deck,
    candidates: &BTreeSet<&'static Land>,
    weights: Weights,
    forced: &Manabase,
) -> Result<Model<'a>, ModelError> {
    if candidates.is_empty() {
        return Err(ModelError::NoCandidateLands);
    }
    if deck.colors().is_empty() {
        return Err(ModelError::NoColors);
    }
    for &land in forced.keys() {
        if !candidates.contains(land) {
            return Err(ModelError::ForcedLandMissing(land.name));
        }
    }
    // forced lands are modeled even when the viability filter would drop them
    let mut viable = viable_lands(&deck.colors(), candidates);
    viable.extend(forced.keys().copied());
    if viable.is_empty() {
        return Err(ModelError::NoViableLands);
    }
    let mut model = Model::new(deck, &viable, weights, forced)?;
    let deck_size = deck.deck_size;
    let lands: Vec<&'static Land> = model.lands.keys().copied().collect();

    for constraint in &deck.constraints {
        let required = frank(constraint, deck_size)?;
        let mut per_land = Vec::with_capacity(lands.len());
        for &land in &lands {
            per_land.push((land, land.add_to_model(&mut model, constraint)));
        }
        for (combination, &count_required) in &required {
            let sources_key = VarKey::Sources {
                turn: constraint.turn,
                combination: combination.clone(),
            };
            if model.lookup(&sources_key).is_some() {
                // an earlier constraint already pinned this turn/combination
                continue;
            }
            let required_var = model.new_int_var(
                VarKey::Required {
                    turn: constraint.turn,
                    combination: combination.clone(),
                },
                count_required as i64,
                count_required as i64,
            )?;
            let mut total = LinExpr::default();
            let mut contributions = Vec::new();
            for (land, contribution_map) in &per_land {
                if let Some(expr) = contribution_map.get(combination) {
                    if !expr.is_zero() {
                        total += expr.clone();
                        contributions.push((land.name, expr.clone()));
                    }
                }
            }
            debug!(
                "T{} {}: {} sources required from {} lands",
                constraint.turn,
                combination,
                count_required,
                contributions.len()
            );
            let sources = model.new_int_var(sources_key, 0, deck_size.card_count() as i64)?;
            model.add((LinExpr::from(sources) - total).equals(0));
            model.add((LinExpr::from(sources) - LinExpr::from(required_var)).geq(0));
            model.requirements.push(Requirement {
                turn: constraint.turn,
                resource: Resource::Combination(combination.clone()),
                required: count_required,
                total: LinExpr::from(sources),
                contributions,
            });
        }

        // an on-curve cost additionally wants enough lands entering untapped
        if constraint.turn == constraint.required.mana_value() {
            let cost: ColorCombination = constraint.required.colored_pips().into_iter().collect();
            let untapped_key = VarKey::UntappedSources {
                turn: constraint.turn,
                cost: cost.clone(),
            };
            if model.lookup(&untapped_key).is_none() {
                let needed = need_untapped(constraint.turn, deck_size);
                let required_var = model.new_int_var(
                    VarKey::RequiredUntapped {
                        turn: constraint.turn,
                        cost: cost.clone(),
                    },
                    needed as i64,
                    needed as i64,
                )?;
                // generic pips accept anything; purely colored costs only
                // count lands making one of the needed colors
                let generic_ok = constraint.required.has_generic();
                let mut total = LinExpr::default();
                let mut contributions = Vec::new();
                for &land in &lands {
                    if !generic_ok && !land.produces.iter().any(|&c| cost.contains(c)) {
                        continue;
                    }
                    let expr = land.untapped_rules(&mut model, constraint.turn);
                    if !expr.is_zero() {
                        total += expr.clone();
                        contributions.push((land.name, expr));
                    }
                }
                let sources =
                    model.new_int_var(untapped_key, 0, deck_size.card_count() as i64)?;
                model.add((LinExpr::from(sources) - total).equals(0));
                model.add((LinExpr::from(sources) - LinExpr::from(required_var)).geq(0));
                model.requirements.push(Requirement {
                    turn: constraint.turn,
                    resource: Resource::Untapped(cost),
                    required: needed,
                    total: LinExpr::from(sources),
                    contributions,
                });
            }
        }
    }

    let count_sum: LinExpr = model.lands.values().map(|&v| LinExpr::from(v)).sum();
    let total_lands = model.new_int_var(VarKey::TotalLands, 0, deck_size.card_count() as i64)?;
    model.add((LinExpr::from(total_lands) - count_sum).equals(0));
    let min_lands = deck
        .constraints
        .iter()
        .map(|c| num_lands_required(c, deck_size))
        .max()
        .unwrap_or(0);
    let min_lands_var = model.new_int_var(VarKey::MinLands, min_lands as i64, min_lands as i64)?;
    model.add((LinExpr::from(total_lands) - LinExpr::from(min_lands_var)).geq(0));

    let pain_sum: LinExpr = model
        .lands
        .iter()
        .filter(|(land, _)| land.painful)
        .map(|(_, &v)| LinExpr::from(v))
        .sum();
    let pain = model.new_int_var(VarKey::Pain, 0, deck_size.card_count() as i64)?;
    model.add((LinExpr::from(pain) - pain_sum).equals(0));

    // a land producing several of the deck's colors counts once per color
    let colors = deck.colors();
    let mut sources_sum = LinExpr::default();
    for &color in &colors {
        for (land, &var) in &model.lands {
            if land.can_produce(color) {
                sources_sum += LinExpr::from(var);
            }
        }
    }
    let total_colored_sources = model.new_int_var(
        VarKey::TotalColoredSources,
        0,
        5 * deck_size.card_count() as i64,
    )?;
    model.add((LinExpr::from(total_colored_sources) - sources_sum).equals(0));

    // credit each early turn where every drop can be made untapped
    let max_turn = deck.max_turn();
    let mut spend_sum = LinExpr::default();
    let mut max_spend = 0u32;
    for turn in 1..=max_turn {
        let mut untapped = LinExpr::default();
        for &land in &lands {
            untapped += land.untapped_rules(&mut model, turn);
        }
        let needed = num_lands(turn, turn, deck_size);
        let enough = model.reify_at_least(VarKey::EnoughUntapped { turn }, untapped, needed as i64);
        let spend_turn =
            model.new_int_var(VarKey::ManaSpendOnTurn { turn }, turn as i64 - 1, turn as i64)?;
        model.add((LinExpr::from(spend_turn) - LinExpr::from(enough)).equals(turn as i64 - 1));
        spend_sum += LinExpr::from(spend_turn);
        max_spend += turn;
    }
    let mana_spend = model.new_int_var(VarKey::ManaSpend, 0, max_spend as i64)?;
    model.add((LinExpr::from(mana_spend) - spend_sum).equals(0));
    model.new_int_var(VarKey::MaxManaSpend, max_spend as i64, max_spend as i64)?;

    let objective = model.new_int_var(VarKey::Objective, -1_000_000, 1_000_000)?;
    let weighted = LinExpr::from(mana_spend) * weights.mana_spend
        + LinExpr::from(total_lands) * weights.total_lands
        + LinExpr::from(pain) * weights.pain
        + LinExpr::from(total_colored_sources) * weights.total_colored_sources;
    model.add((LinExpr::from(objective) - weighted).equals(OBJECTIVE_OFFSET));
    model.objective = LinExpr::from(objective);
    model.aggregates = Some(Aggregates {
        total_lands,
        pain,
        total_colored_sources,
        mana_spend,
        objective,
        min_lands,
        max_mana_spend: max_spend,
        max_turn,
    });

    debug!(
        "defined model: {} variables, {} constraints, {} requirements",
        model.vars.len(),
        model.constraints.len(),
        model.requirements.len()
    );
    Ok(model)
}
