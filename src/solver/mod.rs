pub mod expr;
pub mod frank;
pub mod lands;
pub mod model;
pub mod solve;
pub mod weights;

pub use expr::{LinConstraint, LinExpr, Relation, VarId};
pub use frank::{frank, need_untapped, num_lands, num_lands_required, UnsatisfiableConstraint};
pub use model::{define_model, viable_lands, FilterPiece, Manabase, Model, ModelError, Resource, VarKey};
pub use solve::{solve, solve_model, solve_with_catalog, RequirementReport, Solution, SolveStatus};
pub use weights::{normalized_mana_spend, Weights, WeightsError, DEFAULT_WEIGHTS};
