//! Population bonus integration tests.
//!
//! These tests verify the per-kind registry:
//! - Bonuses follow the triangular numbers
//! - Lifecycle edges update counts exactly once
//! - Repeated lifecycle edges are rejected instead of corrupting counts

use ccg_combat::effects::{triangular, PopulationRegistry};
use ccg_combat::games::ducks::{self, BANDIT, LAD, SHERIFF};
use ccg_combat::view::InstantPresenter;
use ccg_combat::{CombatConfig, CombatError, EntityId};
use proptest::prelude::*;

/// Test the first few bonuses.
#[test]
fn test_bonus_is_triangular() {
    let mut registry = PopulationRegistry::new();
    let mut bonuses = vec![registry.bonus(LAD)];
    for card in 10..14 {
        registry.increment(LAD, EntityId(card)).unwrap();
        bonuses.push(registry.bonus(LAD));
    }
    assert_eq!(bonuses, vec![0, 1, 3, 6, 10]);
}

/// Test that playing and removing Lads keeps the registry in step with
/// the table.
#[test]
fn test_lifecycle_drives_counts() {
    let mut arena = ducks::arena(CombatConfig::default(), InstantPresenter::new());
    let lads = ducks::deal(&mut arena, BANDIT, &[LAD, LAD, LAD]).unwrap();
    assert_eq!(arena.board().population().count(LAD), 3);
    assert_eq!(arena.board().population().bonus(LAD), 6);

    arena.remove_card(lads[1]).unwrap();
    assert_eq!(arena.board().population().count(LAD), 2);
    assert!(!arena.board().population().is_member(LAD, lads[1]));

    // Lads on the other side count toward the same kind
    ducks::deal(&mut arena, SHERIFF, &[LAD]).unwrap();
    assert_eq!(arena.board().population().count(LAD), 3);
}

/// Test that removing a card twice fails instead of decrementing twice.
#[test]
fn test_second_removal_fails() {
    let mut arena = ducks::arena(CombatConfig::default(), InstantPresenter::new());
    let lad = ducks::deal(&mut arena, BANDIT, &[LAD]).unwrap()[0];

    arena.remove_card(lad).unwrap();
    assert_eq!(arena.remove_card(lad), Err(CombatError::NotOnTable(lad)));
    assert_eq!(arena.board().population().count(LAD), 0);
}

/// Test that a Lad killed in combat is counted out.
#[test]
fn test_death_decrements() {
    let mut arena = ducks::arena(CombatConfig::default(), InstantPresenter::new());
    let lad = ducks::deal(&mut arena, BANDIT, &[LAD]).unwrap()[0];
    let gatling = ducks::deal(&mut arena, SHERIFF, &[ducks::GATLING]).unwrap()[0];

    // Gatling deals 2; a lone Lad shrugs off 1 and has 2 power
    arena.run_attack(gatling).unwrap();
    assert_eq!(arena.board().card(lad).unwrap().current_power, 1);
    arena.run_attack(gatling).unwrap();
    assert!(!arena.board().card(lad).unwrap().is_in_play());
    assert_eq!(arena.board().population().count(LAD), 0);
}

proptest! {
    /// Invariant: `bonus = n(n+1)/2` and each member adds one more than the last.
    #[test]
    fn triangular_steps(n in 0u32..1000) {
        prop_assert_eq!(triangular(n), i64::from(n) * (i64::from(n) + 1) / 2);
        prop_assert_eq!(triangular(n + 1) - triangular(n), i64::from(n) + 1);
    }

    /// Invariant: any interleaving of joins and leaves keeps count equal
    /// to live members and never goes negative.
    #[test]
    fn count_tracks_members(ops in prop::collection::vec((any::<bool>(), 0u32..6), 0..64)) {
        let mut registry = PopulationRegistry::new();
        let mut live = std::collections::BTreeSet::new();

        for (join, card) in ops {
            let card = EntityId(card);
            let result = if join {
                registry.increment(LAD, card)
            } else {
                registry.decrement(LAD, card)
            };
            let accepted = if join { live.insert(card) } else { live.remove(&card) };
            prop_assert_eq!(result.is_ok(), accepted);
            prop_assert_eq!(registry.count(LAD) as usize, live.len());
            prop_assert_eq!(registry.bonus(LAD), triangular(live.len() as u32));
        }
    }
}
