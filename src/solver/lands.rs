//! What each land kind contributes to a model: when its copies are in play
//! untapped, and which color combinations they count toward.

use std::collections::BTreeMap;

use crate::card::constraint::Constraint;
use crate::card::types::{Color, ColorCombination, Pip, Turn};
use crate::land::types::{Land, LandKind};

use super::expr::{LinExpr, VarId};
use super::frank::{need_untapped, num_lands};
use super::model::{FilterPiece, Model, VarKey, BIG_M};

impl Land {
    /// A linear expression for how many copies of this land are in play and
    /// untapped by `turn`. Conditional kinds get one reified boolean per
    /// (land, turn), cached in the model's variable store.
    pub fn untapped_rules(&self, model: &mut Model, turn: Turn) -> LinExpr {
        let Some(&count) = model.lands.get(self) else {
            return LinExpr::default();
        };
        match self.kind {
            LandKind::Basic | LandKind::Pain | LandKind::RiverOfTears => LinExpr::from(count),
            LandKind::Tapland | LandKind::Bicycle => LinExpr::default(),
            LandKind::Check => {
                if turn <= 1 {
                    return LinExpr::default();
                }
                let needed = need_untapped(turn, model.deck_size()) as i64;
                self.typed_land_gate(model, turn, count, needed)
            }
            // A snarl wants one of its types in hand; the deck running enough
            // of them stands in for that
            LandKind::Snarl => {
                let needed = num_lands(turn, turn, model.deck_size()) as i64;
                self.typed_land_gate(model, turn, count, needed)
            }
            LandKind::Filter => {
                if turn <= 1 {
                    return LinExpr::default();
                }
                let active = self.filter_active(model, turn);
                let gated = model.gate_count(
                    VarKey::MakesMana { land: self.name, turn },
                    count,
                    self.max_copies() as i64,
                    active,
                );
                LinExpr::from(gated)
            }
            LandKind::Tango => {
                if turn <= 2 {
                    return LinExpr::default();
                }
                let basics: LinExpr = model
                    .lands
                    .iter()
                    .filter(|(land, _)| land.kind == LandKind::Basic)
                    .map(|(_, &var)| LinExpr::from(var))
                    .sum();
                let needed = num_lands(2, turn - 1, model.deck_size()) as i64;
                let active =
                    model.reify_at_least(VarKey::Active { land: self.name, turn }, basics, needed);
                let gated = model.gate_count(
                    VarKey::MakesMana { land: self.name, turn },
                    count,
                    self.max_copies() as i64,
                    active,
                );
                LinExpr::from(gated)
            }
        }
    }

    /// For each color combination the constraint cares about, how much this
    /// land adds to its source count
    pub fn add_to_model(
        &self,
        model: &mut Model,
        constraint: &Constraint,
    ) -> BTreeMap<ColorCombination, LinExpr> {
        let mut contributions = BTreeMap::new();
        for combination in constraint.color_combinations() {
            let expr = self.contribution(model, constraint, &combination);
            contributions.insert(combination, expr);
        }
        contributions
    }

    fn contribution(
        &self,
        model: &mut Model,
        constraint: &Constraint,
        combination: &ColorCombination,
    ) -> LinExpr {
        let Some(&count) = model.lands.get(self) else {
            return LinExpr::default();
        };
        match self.kind {
            LandKind::Basic | LandKind::Check | LandKind::Snarl | LandKind::Pain => {
                if self.produces_any(combination) {
                    LinExpr::from(count)
                } else {
                    LinExpr::default()
                }
            }
            LandKind::Tapland | LandKind::Bicycle => {
                if constraint.turn > 1 && self.produces_any(combination) {
                    LinExpr::from(count)
                } else {
                    LinExpr::default()
                }
            }
            LandKind::Tango => {
                if constraint.turn > 1 && self.produces_any(combination) {
                    LinExpr::from(count)
                } else {
                    LinExpr::default()
                }
            }
            LandKind::RiverOfTears => {
                if combination.contains(Color::Blue) || combination.contains(Color::Black) {
                    LinExpr::from(count)
                } else {
                    LinExpr::default()
                }
            }
            LandKind::Filter => self.filter_contribution(model, constraint, combination, count),
        }
    }

    fn filter_contribution(
        &self,
        model: &mut Model,
        constraint: &Constraint,
        combination: &ColorCombination,
        count: VarId,
    ) -> LinExpr {
        let &[first, second] = self.produces else {
            // catalog filters produce exactly two colors
            return if self.produces_any(combination) {
                LinExpr::from(count)
            } else {
                LinExpr::default()
            };
        };
        if combination.count_of(first) >= 2 {
            LinExpr::from(self.filter_piece(model, constraint, count, FilterPiece::DoubleFirst))
        } else if combination.contains(first) && combination.contains(second) {
            LinExpr::from(self.filter_piece(model, constraint, count, FilterPiece::Mixed))
        } else if combination.count_of(second) >= 2 {
            LinExpr::from(self.filter_piece(model, constraint, count, FilterPiece::DoubleSecond))
        } else if (combination.is_single(first) || combination.is_single(second))
            && !single_color_impossible(constraint, self.produces)
        {
            LinExpr::from(count)
        } else if combination.contains(Color::Colorless) {
            LinExpr::from(count)
        } else {
            LinExpr::default()
        }
    }

    /// The five quantities describing what this filter's copies do for one
    /// constraint, created together on first use
    fn filter_piece(
        &self,
        model: &mut Model,
        constraint: &Constraint,
        count: VarId,
        piece: FilterPiece,
    ) -> VarId {
        let cost: ColorCombination = constraint.required.colored_pips().into_iter().collect();
        let turn = constraint.turn;
        let key = |piece| VarKey::FilterPiece {
            land: self.name,
            turn,
            cost: cost.clone(),
            piece,
        };
        if let Some(var) = model.lookup(&key(piece)) {
            return var;
        }
        let max = self.max_copies() as i64;
        let double_first = model.int_var_cached(key(FilterPiece::DoubleFirst), 0, 2 * max);
        let mixed = model.int_var_cached(key(FilterPiece::Mixed), 0, 2 * max);
        let double_second = model.int_var_cached(key(FilterPiece::DoubleSecond), 0, 2 * max);
        let consumed_first = model.int_var_cached(key(FilterPiece::ConsumedFirst), 0, max);
        let consumed_second = model.int_var_cached(key(FilterPiece::ConsumedSecond), 0, max);
        let active = self.filter_active(model, turn);

        let outputs =
            LinExpr::from(double_first) + LinExpr::from(mixed) + LinExpr::from(double_second);
        let consumed = LinExpr::from(consumed_first) + LinExpr::from(consumed_second);
        // two mana come out for every one fed in
        model.add((outputs.clone() - consumed.clone() * 2).equals(0));
        // while active, every copy nets exactly one colored mana
        let net = outputs - consumed - LinExpr::from(count);
        model.add((net.clone() - LinExpr::term(active, BIG_M)).geq(-BIG_M));
        model.add((net + LinExpr::term(active, BIG_M)).leq(BIG_M));
        for (piece_var, per_copy) in [
            (double_first, 2),
            (mixed, 2),
            (double_second, 2),
            (consumed_first, 1),
            (consumed_second, 1),
        ] {
            // never more than the copies can tap for, and nothing while inactive
            model.add((LinExpr::from(piece_var) - LinExpr::term(count, per_copy)).leq(0));
            model.add((LinExpr::from(piece_var) - LinExpr::term(active, per_copy * max)).leq(0));
        }
        match piece {
            FilterPiece::DoubleFirst => double_first,
            FilterPiece::Mixed => mixed,
            FilterPiece::DoubleSecond => double_second,
            FilterPiece::ConsumedFirst => consumed_first,
            FilterPiece::ConsumedSecond => consumed_second,
        }
    }

    /// A filter makes colored mana on a turn when the deck runs enough other
    /// lands of its colors to feed it. Other filters only count from turn
    /// three on.
    fn filter_active(&self, model: &mut Model, turn: Turn) -> VarId {
        let key = VarKey::Active { land: self.name, turn };
        if let Some(flag) = model.lookup(&key) {
            return flag;
        }
        let enabling: LinExpr = model
            .lands
            .iter()
            .filter(|(land, _)| {
                land.name != self.name
                    && land.produces.iter().any(|c| self.produces.contains(c))
                    && !(turn <= 2 && land.kind == LandKind::Filter)
            })
            .map(|(_, &var)| LinExpr::from(var))
            .sum();
        let needed = need_untapped(turn, model.deck_size()) as i64;
        model.reify_at_least(key, enabling, needed)
    }

    fn typed_land_gate(
        &self,
        model: &mut Model,
        turn: Turn,
        count: VarId,
        needed: i64,
    ) -> LinExpr {
        let wanted = self.basic_land_types_needed();
        let enabling: LinExpr = model
            .lands
            .iter()
            .filter(|(land, _)| land.has_any_basic_land_type(&wanted))
            .map(|(_, &var)| LinExpr::from(var))
            .sum();
        let active = model.reify_at_least(VarKey::Active { land: self.name, turn }, enabling, needed);
        let gated = model.gate_count(
            VarKey::MakesMana { land: self.name, turn },
            count,
            self.max_copies() as i64,
            active,
        );
        LinExpr::from(gated)
    }
}

fn single_color_impossible(constraint: &Constraint, produces: &[Color]) -> bool {
    // A fully colored two-pip cost cast on turn two leaves no mana to feed
    // the filter unless its second pip is one of the filter's colors
    let pips = constraint.required.pips();
    constraint.turn == 2
        && pips.len() == 2
        && constraint.required.colored_pips().len() == 2
        && match pips[1] {
            Pip::Colored(color) => !produces.contains(&color),
            _ => false,
        }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::card::constraint::{card, card_on, Deck};
    use crate::card::types::Color::{Blue as U, White as W};
    use crate::card::types::DeckSize;
    use crate::land::catalog::{
        FETID_HEATH, GLACIAL_FORTRESS, ISLAND, MYSTIC_GATE, PLAINS, PORT_TOWN, PRAIRIE_STREAM,
        RESTLESS_ANCHORAGE, SWAMP,
    };
    use crate::solver::model::Manabase;
    use crate::solver::weights::DEFAULT_WEIGHTS;

    fn cc(colors: &[Color]) -> ColorCombination {
        colors.iter().copied().collect()
    }

    fn model_with<'a>(deck: &'a Deck, lands: &[&'static Land]) -> Model<'a> {
        let candidates: BTreeSet<&'static Land> = lands.iter().copied().collect();
        Model::new(deck, &candidates, DEFAULT_WEIGHTS, &Manabase::new()).unwrap()
    }

    #[test]
    fn test_tango_contributions() {
        let turn_one = card("U@1").unwrap();
        let deck = Deck::new([turn_one.clone()], DeckSize::Sixty);
        let mut model = model_with(&deck, &[&PLAINS, &ISLAND, &PRAIRIE_STREAM]);

        let contributions = PRAIRIE_STREAM.add_to_model(&mut model, &turn_one);
        assert!(contributions[&cc(&[U])].is_zero());

        let turn_three = card("2U").unwrap();
        let contributions = PRAIRIE_STREAM.add_to_model(&mut model, &turn_three);
        let count = model.lands[&PRAIRIE_STREAM];
        assert_eq!(contributions[&cc(&[U])], LinExpr::from(count));
    }

    #[test]
    fn test_filter_contributions() {
        let constraint = card("WU").unwrap();
        let deck = Deck::new([constraint.clone()], DeckSize::Sixty);
        let mut model = model_with(&deck, &[&PLAINS, &ISLAND, &MYSTIC_GATE]);

        let contributions = MYSTIC_GATE.add_to_model(&mut model, &constraint);
        let count = model.lands[&MYSTIC_GATE];
        assert_eq!(contributions[&cc(&[W])], LinExpr::from(count));
        assert_eq!(contributions[&cc(&[U])], LinExpr::from(count));

        let mixed = model
            .lookup(&VarKey::FilterPiece {
                land: "Mystic Gate",
                turn: 2,
                cost: cc(&[W, U]),
                piece: FilterPiece::Mixed,
            })
            .unwrap();
        assert_eq!(contributions[&cc(&[W, U])], LinExpr::from(mixed));
    }

    #[test]
    fn test_filter_impossible_single_color() {
        // On turn two WB can't lean on Mystic Gate for its W
        let constraint = card("WB").unwrap();
        let deck = Deck::new([card("WU").unwrap()], DeckSize::Sixty);
        let mut model = model_with(&deck, &[&PLAINS, &ISLAND, &MYSTIC_GATE]);
        let contributions = MYSTIC_GATE.add_to_model(&mut model, &constraint);
        assert!(contributions[&cc(&[W])].is_zero());

        // Fetid Heath produces the second pip, so its W single still counts
        let deck = Deck::new([constraint.clone()], DeckSize::Sixty);
        let mut model = model_with(&deck, &[&PLAINS, &SWAMP, &FETID_HEATH]);
        let contributions = FETID_HEATH.add_to_model(&mut model, &constraint);
        let count = model.lands[&FETID_HEATH];
        assert_eq!(contributions[&cc(&[W])], LinExpr::from(count));
    }

    #[test]
    fn test_filter_double_pip_uses_pieces() {
        let constraint = card("WW").unwrap();
        let deck = Deck::new([constraint.clone()], DeckSize::Sixty);
        let mut model = model_with(&deck, &[&PLAINS, &ISLAND, &MYSTIC_GATE]);
        let contributions = MYSTIC_GATE.add_to_model(&mut model, &constraint);
        let double_first = model
            .lookup(&VarKey::FilterPiece {
                land: "Mystic Gate",
                turn: 2,
                cost: cc(&[W, W]),
                piece: FilterPiece::DoubleFirst,
            })
            .unwrap();
        assert_eq!(contributions[&cc(&[W, W])], LinExpr::from(double_first));
    }

    #[test]
    fn test_untapped_rules_by_kind() {
        let deck = Deck::new([card("WU").unwrap()], DeckSize::Sixty);
        let mut model = model_with(
            &deck,
            &[
                &PLAINS,
                &ISLAND,
                &GLACIAL_FORTRESS,
                &PORT_TOWN,
                &RESTLESS_ANCHORAGE,
            ],
        );

        let count = model.lands[&PLAINS];
        assert_eq!(PLAINS.untapped_rules(&mut model, 1), LinExpr::from(count));

        assert!(RESTLESS_ANCHORAGE.untapped_rules(&mut model, 3).is_zero());

        // checks are never untapped on turn one; snarls can be
        assert!(GLACIAL_FORTRESS.untapped_rules(&mut model, 1).is_zero());
        let fortress_turn_two = GLACIAL_FORTRESS.untapped_rules(&mut model, 2);
        let gated = model
            .lookup(&VarKey::MakesMana { land: "Glacial Fortress", turn: 2 })
            .unwrap();
        assert_eq!(fortress_turn_two, LinExpr::from(gated));

        let port_town_turn_one = PORT_TOWN.untapped_rules(&mut model, 1);
        let gated = model
            .lookup(&VarKey::MakesMana { land: "Port Town", turn: 1 })
            .unwrap();
        assert_eq!(port_town_turn_one, LinExpr::from(gated));
    }

    #[test]
    fn test_untapped_rules_cached_per_turn() {
        let deck = Deck::new([card("WU").unwrap()], DeckSize::Sixty);
        let mut model = model_with(&deck, &[&PLAINS, &ISLAND, &GLACIAL_FORTRESS]);
        let first = GLACIAL_FORTRESS.untapped_rules(&mut model, 2);
        let vars_after_first = model.vars.len();
        let second = GLACIAL_FORTRESS.untapped_rules(&mut model, 2);
        assert_eq!(first, second);
        assert_eq!(model.vars.len(), vars_after_first);
    }

    #[test]
    fn test_single_color_impossible() {
        let gate = [W, U];
        assert!(single_color_impossible(&card("WB").unwrap(), &gate));
        assert!(!single_color_impossible(&card("WW").unwrap(), &gate));
        assert!(!single_color_impossible(&card("1W").unwrap(), &gate));
        // only the turn-two cast is impossible
        assert!(!single_color_impossible(&card_on("WB", 3).unwrap(), &gate));
    }
}
