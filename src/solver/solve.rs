//! The solver driver: lowers a built model to a mixed-integer program, runs
//! it, and freezes the assignment into a [`Solution`].

use std::collections::BTreeSet;
use std::fmt;

use good_lp::{
    constraint, default_solver, variable, variables, Expression, ResolutionError, Solution as _,
    SolverModel, Variable,
};
use log::debug;
use serde::Serialize;

use crate::card::constraint::Deck;
use crate::card::types::Turn;
use crate::land::catalog;
use crate::land::types::Land;

use super::expr::{LinConstraint, LinExpr, Relation, VarId};
use super::model::{define_model, Manabase, Model, ModelError, Resource};
use super::weights::{normalized_mana_spend, Weights};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveStatus {
    Optimal,
    /// A solution that satisfies every requirement without a proof of
    /// optimality, e.g. from a time-limited run
    Feasible,
}

/// One satisfied requirement, with the lands that provided it
#[derive(Debug, Clone, Serialize)]
pub struct RequirementReport {
    pub turn: Turn,
    pub resource: Resource,
    pub required: u32,
    pub sources: u32,
    pub providing: Vec<String>,
}

/// The frozen result of a successful solve
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub status: SolveStatus,
    /// Lands with a positive count only
    pub lands: Manabase,
    pub total_lands: u32,
    pub min_lands: u32,
    pub pain: u32,
    pub total_colored_sources: u32,
    pub mana_spend: u32,
    pub max_mana_spend: u32,
    pub max_turn: Turn,
    pub objective: i64,
    pub requirements: Vec<RequirementReport>,
}

impl Solution {
    /// Manabases for the same deck and weights compare by this
    pub fn score(&self) -> i64 {
        self.objective
    }

    /// The solution's mana spend on the 0..21 scale
    pub fn normalized_mana_spend(&self) -> u32 {
        normalized_mana_spend(self.max_turn, self.mana_spend)
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<(&Land, u32)> = self.lands.iter().map(|(&l, &c)| (l, c)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name.cmp(b.0.name)));
        for (land, copies) in &entries {
            writeln!(f, "{copies:>3} {land}")?;
        }
        writeln!(
            f,
            "{} lands (minimum {}), {} pain, mana spend {}/{}, objective {}",
            self.total_lands,
            self.min_lands,
            self.pain,
            self.mana_spend,
            self.max_mana_spend,
            self.objective
        )?;
        for requirement in &self.requirements {
            writeln!(
                f,
                "T{} {}: {} sources for {} required ({})",
                requirement.turn,
                requirement.resource,
                requirement.sources,
                requirement.required,
                requirement.providing.join(", ")
            )?;
        }
        Ok(())
    }
}

/// Build and solve the model for a deck. Returns `Ok(None)` when no manabase
/// can satisfy every requirement.
pub fn solve(
    deck: &Deck,
    weights: Weights,
    candidates: &BTreeSet<&'static Land>,
    forced: &Manabase,
) -> Result<Option<Solution>, ModelError> {
    let model = define_model(deck, candidates, weights, forced)?;
    solve_model(model)
}

/// [`solve`] against the built-in land catalog with nothing pinned
pub fn solve_with_catalog(deck: &Deck, weights: Weights) -> Result<Option<Solution>, ModelError> {
    solve(deck, weights, &catalog::all_lands(), &Manabase::new())
}

/// Run the backing solver over a fully defined model
pub fn solve_model(model: Model) -> Result<Option<Solution>, ModelError> {
    let Some(aggregates) = model.aggregates else {
        return Err(ModelError::SolverFailure(
            "model has no objective; build it with define_model".to_string(),
        ));
    };

    let mut problem = variables!();
    let lowered: Vec<Variable> = model
        .vars
        .iter()
        .map(|def| {
            problem.add(
                variable()
                    .integer()
                    .min(def.lower as f64)
                    .max(def.upper as f64),
            )
        })
        .collect();
    let objective = to_expression(&model.objective, &lowered);
    let mut solver = problem.maximise(objective).using(default_solver);
    for lin in &model.constraints {
        solver = solver.with(to_constraint(lin, &lowered));
    }
    let solved = match solver.solve() {
        Ok(solved) => solved,
        Err(ResolutionError::Infeasible) => {
            debug!("no feasible manabase");
            return Ok(None);
        }
        Err(error) => return Err(ModelError::SolverFailure(error.to_string())),
    };
    let assignment: Vec<i64> = lowered
        .iter()
        .map(|&var| solved.value(var).round() as i64)
        .collect();
    let value = |var: VarId| assignment[var.index()];

    let mut lands = Manabase::new();
    for (&land, &var) in &model.lands {
        let copies = value(var);
        if copies > 0 {
            lands.insert(land, copies as u32);
        }
    }
    let requirements = model
        .requirements
        .iter()
        .map(|requirement| RequirementReport {
            turn: requirement.turn,
            resource: requirement.resource.clone(),
            required: requirement.required,
            sources: requirement.total.eval(&assignment) as u32,
            providing: requirement
                .contributions
                .iter()
                .filter_map(|(name, expr)| {
                    let provided = expr.eval(&assignment);
                    (provided > 0).then(|| format!("{provided} {name}"))
                })
                .collect(),
        })
        .collect();

    let solution = Solution {
        status: SolveStatus::Optimal,
        lands,
        total_lands: value(aggregates.total_lands) as u32,
        min_lands: aggregates.min_lands,
        pain: value(aggregates.pain) as u32,
        total_colored_sources: value(aggregates.total_colored_sources) as u32,
        mana_spend: value(aggregates.mana_spend) as u32,
        max_mana_spend: aggregates.max_mana_spend,
        max_turn: aggregates.max_turn,
        objective: value(aggregates.objective),
        requirements,
    };
    debug!(
        "solved: {} lands, objective {}",
        solution.total_lands, solution.objective
    );
    Ok(Some(solution))
}

fn to_expression(expr: &LinExpr, lowered: &[Variable]) -> Expression {
    let mut out = Expression::default();
    for (var, coefficient) in expr.terms() {
        out += (coefficient as f64) * lowered[var.index()];
    }
    out
}

fn to_constraint(lin: &LinConstraint, lowered: &[Variable]) -> good_lp::Constraint {
    let lhs = to_expression(&lin.lhs, lowered);
    let rhs = (lin.rhs - lin.lhs.constant_part()) as f64;
    match lin.relation {
        Relation::Geq => constraint!(lhs >= rhs),
        Relation::Leq => constraint!(lhs <= rhs),
        Relation::Eq => constraint!(lhs == rhs),
    }
}
