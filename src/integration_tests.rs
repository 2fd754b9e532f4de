//! End-to-end solves over the built-in catalog, pinning known-optimal
//! manabases for small decks.

use std::collections::BTreeSet;

use crate::card::constraint::{card, card_on, Deck};
use crate::card::types::DeckSize;
use crate::land::catalog::{
    self, BATTLEFIELD_FORGE, CELESTIAL_COLONNADE, FETID_HEATH, IRRIGATED_FARMLAND, ISLAND,
    MYSTIC_GATE, PLAINS, PORT_TOWN, PRAIRIE_STREAM, RIVER_OF_TEARS, SWAMP, VIVID_CRAG,
};
use crate::land::types::Land;
use crate::solver::{
    solve, solve_with_catalog, Manabase, ModelError, Resource, SolveStatus, Weights,
    DEFAULT_WEIGHTS,
};

fn land_set(list: &[&'static Land]) -> BTreeSet<&'static Land> {
    list.iter().copied().collect()
}

fn azorius_taxes() -> Deck {
    Deck::new(
        [
            card("W").unwrap(),
            card("UW").unwrap(),
            card("WW").unwrap(),
            card("1UW").unwrap(),
        ],
        DeckSize::Sixty,
    )
}

fn necrotic_ooze() -> Deck {
    Deck::new(
        [
            card_on("B", 2).unwrap(),
            card("UB").unwrap(),
            card("WB").unwrap(),
            card("2B").unwrap(),
            card("3U").unwrap(),
            card("2BB").unwrap(),
        ],
        DeckSize::Sixty,
    )
}

fn ooze_tapped_manabase() -> Manabase {
    [
        (&CELESTIAL_COLONNADE, 2u32),
        (&IRRIGATED_FARMLAND, 1),
        (&PRAIRIE_STREAM, 4),
        (&VIVID_CRAG, 4),
        (&MYSTIC_GATE, 1),
        (&FETID_HEATH, 2),
        (&RIVER_OF_TEARS, 4),
        (&SWAMP, 6),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_mono_white() {
    let deck = Deck::new([card("W").unwrap()], DeckSize::Sixty);
    let candidates = land_set(&[&PLAINS, &ISLAND, &MYSTIC_GATE]);
    let solution = solve(&deck, DEFAULT_WEIGHTS, &candidates, &Manabase::new())
        .unwrap()
        .unwrap();
    assert_eq!(solution.status, SolveStatus::Optimal);
    assert_eq!(solution.lands.get(&PLAINS), Some(&14));
    assert!(solution.lands.get(&ISLAND).is_none());
    assert!(solution.lands.get(&MYSTIC_GATE).is_none());
    assert_eq!(solution.total_lands, 14);
    assert_eq!(solution.min_lands, 14);
}

#[test]
fn test_azorius_taxes() {
    let solution = solve_with_catalog(&azorius_taxes(), DEFAULT_WEIGHTS)
        .unwrap()
        .unwrap();
    assert_eq!(solution.status, SolveStatus::Optimal);
    assert_eq!(solution.total_lands, 23);
    assert_eq!(solution.lands.get(&PORT_TOWN), Some(&4));
    assert_eq!(solution.lands.get(&PLAINS), Some(&10));
}

#[test]
fn test_counter_weenie() {
    let deck = Deck::new([card("WW").unwrap(), card("UU").unwrap()], DeckSize::Sixty);
    let solution = solve_with_catalog(&deck, DEFAULT_WEIGHTS).unwrap().unwrap();
    assert_eq!(solution.status, SolveStatus::Optimal);
    assert_eq!(solution.lands.get(&MYSTIC_GATE), Some(&4));
}

#[test]
fn test_boros_burn() {
    let deck = Deck::new(
        [card("W").unwrap(), card("R").unwrap(), card("WR").unwrap()],
        DeckSize::Sixty,
    );
    let solution = solve_with_catalog(&deck, DEFAULT_WEIGHTS).unwrap().unwrap();
    assert_eq!(solution.lands.get(&BATTLEFIELD_FORGE), Some(&4));
}

#[test]
fn test_tango_rewards_light_early_requirements() {
    let candidates = land_set(&[&PLAINS, &ISLAND, &PRAIRIE_STREAM]);

    // Turn-two costs with a generic pip leave room for a tango land
    let light = Deck::new([card("1W").unwrap(), card("1U").unwrap()], DeckSize::Sixty);
    let solution = solve(&light, DEFAULT_WEIGHTS, &candidates, &Manabase::new())
        .unwrap()
        .unwrap();
    assert_eq!(solution.lands.get(&PRAIRIE_STREAM), Some(&4));

    // Turn-one casts can't use a land that enters tapped that early
    let intense = Deck::new([card("W").unwrap(), card("U").unwrap()], DeckSize::Sixty);
    let solution = solve(&intense, DEFAULT_WEIGHTS, &candidates, &Manabase::new())
        .unwrap()
        .unwrap();
    assert!(solution.lands.get(&PRAIRIE_STREAM).is_none());
}

#[test]
fn test_river_of_tears_in_necrotic_ooze() {
    let solution = solve_with_catalog(&necrotic_ooze(), DEFAULT_WEIGHTS)
        .unwrap()
        .unwrap();
    assert_eq!(solution.status, SolveStatus::Optimal);
    assert_eq!(solution.lands.get(&RIVER_OF_TEARS), Some(&4));
}

#[test]
fn test_deterministic_objective() {
    let first = solve_with_catalog(&azorius_taxes(), DEFAULT_WEIGHTS)
        .unwrap()
        .unwrap();
    let second = solve_with_catalog(&azorius_taxes(), DEFAULT_WEIGHTS)
        .unwrap()
        .unwrap();
    assert_eq!(first.objective, second.objective);
    assert_eq!(first.lands, second.lands);
}

#[test]
fn test_more_spend_weight_never_lowers_mana_spend() {
    let deck = azorius_taxes();
    let low = solve_with_catalog(&deck, DEFAULT_WEIGHTS).unwrap().unwrap();
    let high = solve_with_catalog(
        &deck,
        Weights {
            mana_spend: 20,
            ..DEFAULT_WEIGHTS
        },
    )
    .unwrap()
    .unwrap();
    assert!(high.mana_spend >= low.mana_spend);
}

#[test]
fn test_forced_lands_are_pinned_and_scored() {
    let deck = Deck::new([card("W").unwrap()], DeckSize::Sixty);
    let tight: Manabase = [(&PLAINS, 14u32)].into_iter().collect();
    let bloated: Manabase = [(&PLAINS, 18u32)].into_iter().collect();
    let good = solve(&deck, DEFAULT_WEIGHTS, &catalog::all_lands(), &tight)
        .unwrap()
        .unwrap();
    let bad = solve(&deck, DEFAULT_WEIGHTS, &catalog::all_lands(), &bloated)
        .unwrap()
        .unwrap();
    assert_eq!(good.lands.get(&PLAINS), Some(&14));
    assert_eq!(bad.lands.get(&PLAINS), Some(&18));
    assert!(good.score() > bad.score());
}

#[test]
fn test_mana_spend_of_a_tapped_manabase() {
    // A manabase full of taplands misses every drop over turns one to four
    let solution = solve(
        &necrotic_ooze(),
        DEFAULT_WEIGHTS,
        &catalog::all_lands(),
        &ooze_tapped_manabase(),
    )
    .unwrap()
    .unwrap();
    assert_eq!(solution.mana_spend, 6);
    assert_eq!(solution.max_mana_spend, 10);
    assert_eq!(solution.normalized_mana_spend(), 0);
}

#[test]
fn test_untapped_manabase_outscores_tapped_one() {
    let deck = necrotic_ooze();
    let untapped: Manabase = [
        (&catalog::SUNKEN_RUINS, 4u32),
        (&FETID_HEATH, 4),
        (&PLAINS, 4),
        (&ISLAND, 4),
        (&RIVER_OF_TEARS, 4),
        (&VIVID_CRAG, 1),
        (&catalog::CAVES_OF_KOILOS, 4),
    ]
    .into_iter()
    .collect();
    let good = solve(&deck, DEFAULT_WEIGHTS, &catalog::all_lands(), &untapped)
        .unwrap()
        .unwrap();
    let bad = solve(
        &deck,
        DEFAULT_WEIGHTS,
        &catalog::all_lands(),
        &ooze_tapped_manabase(),
    )
    .unwrap()
    .unwrap();
    assert!(good.normalized_mana_spend() > bad.normalized_mana_spend());
    assert!(good.score() > bad.score());
}

#[test]
fn test_five_pip_cost_has_no_published_numbers() {
    let deck = Deck::new([card("WUBRG").unwrap()], DeckSize::Sixty);
    assert!(matches!(
        solve_with_catalog(&deck, DEFAULT_WEIGHTS),
        Err(ModelError::Unsatisfiable(_))
    ));
}

#[test]
fn test_solution_reports_every_requirement() {
    let deck = Deck::new([card("W").unwrap()], DeckSize::Sixty);
    let candidates = land_set(&[&PLAINS, &ISLAND, &MYSTIC_GATE]);
    let solution = solve(&deck, DEFAULT_WEIGHTS, &candidates, &Manabase::new())
        .unwrap()
        .unwrap();
    assert_eq!(solution.requirements.len(), 2);
    for requirement in &solution.requirements {
        assert!(requirement.sources >= requirement.required);
        assert_eq!(requirement.turn, 1);
    }
    let combination_row = solution
        .requirements
        .iter()
        .find(|r| matches!(r.resource, Resource::Combination(_)))
        .unwrap();
    assert_eq!(combination_row.required, 14);
    assert_eq!(combination_row.providing, vec!["14 Plains".to_string()]);
}

#[test]
fn test_solves_are_independent_across_threads() {
    let first = std::thread::spawn(|| {
        let deck = Deck::new([card("WW").unwrap(), card("UU").unwrap()], DeckSize::Sixty);
        solve_with_catalog(&deck, DEFAULT_WEIGHTS).unwrap().unwrap()
    });
    let second = std::thread::spawn(|| {
        let deck = Deck::new([card("W").unwrap(), card("R").unwrap()], DeckSize::Sixty);
        solve_with_catalog(&deck, DEFAULT_WEIGHTS).unwrap().unwrap()
    });
    assert_eq!(
        first.join().unwrap().lands.get(&MYSTIC_GATE),
        Some(&4)
    );
    assert!(second.join().unwrap().total_lands >= 14);
}
