//! Combat engine integration tests.
//!
//! Every scenario pins its dice with `ScriptedDice`.

use wager_arena::cards::{CardTemplate, CreatureInstance, EffectSpec};
use wager_arena::combat::{
    defense_block, dice_count, initiative, strike, DieOutcome, Duel, StepKind,
};
use wager_arena::core::{Config, CreatureSlot, ScriptedDice, SlotPair};

fn creature(template: CardTemplate) -> CreatureInstance {
    CreatureInstance::from_template(&template)
}

fn run_duel(
    creatures: &mut SlotPair<CreatureInstance>,
    dice: &mut ScriptedDice,
) -> (Duel, Vec<wager_arena::combat::StepReport>) {
    let config = Config::default();
    let mut duel = Duel::begin(creatures, dice);
    let mut reports = Vec::new();
    while let Some(report) = duel.step(creatures, &config, dice) {
        reports.push(report);
    }
    (duel, reports)
}

// =============================================================================
// Tiers
// =============================================================================

#[test]
fn test_attack_tier_edges() {
    let config = Config::default();
    assert_eq!(dice_count(6, &config), 1);
    assert_eq!(dice_count(7, &config), 2);
    assert_eq!(dice_count(14, &config), 2);
    assert_eq!(dice_count(15, &config), 3);
}

#[test]
fn test_custom_tiers() {
    let config = Config {
        attack_tier_1_max: 3,
        attack_tier_2_max: 5,
        defense_tier_1_max: 1,
        defense_tier_2_max: 2,
        ..Config::default()
    };
    assert_eq!(dice_count(4, &config), 2);
    assert_eq!(dice_count(6, &config), 3);
    assert_eq!(defense_block(2, &config), 2);
    assert_eq!(defense_block(3, &config), 3);
}

// =============================================================================
// Initiative
// =============================================================================

/// Equal attack: one die decides, nothing else is rolled.
#[test]
fn test_initiative_tie_consumes_single_die() {
    let a = creature(CardTemplate::creature("a", 10, 9, 0, 1));
    let b = creature(CardTemplate::creature("b", 10, 9, 0, 1));

    let mut dice = ScriptedDice::new([4, 1]);
    assert_eq!(initiative(&a, &b, &mut dice), CreatureSlot::First);
    assert_eq!(dice.remaining(), 1);

    assert_eq!(initiative(&a, &b, &mut dice), CreatureSlot::Second);
    assert_eq!(dice.remaining(), 0);
}

#[test]
fn test_initiative_uses_current_attack() {
    let template = CardTemplate::creature("a", 20, 5, 0, 1)
        .with_dynamic_stat(15, vec![EffectSpec::new("inc", "/attack", 2)]);
    let boosted = creature(template);
    let plain = creature(CardTemplate::creature("b", 10, 6, 0, 1));
    let mut dice = ScriptedDice::new([]);

    assert_eq!(initiative(&boosted, &plain, &mut dice), CreatureSlot::First);
}

// =============================================================================
// Full duels
// =============================================================================

/// A stun costs the victim exactly one step, then roles keep alternating.
#[test]
fn test_stun_skips_one_step() {
    let mut creatures = SlotPair::new(
        creature(CardTemplate::creature("dwarf", 10, 5, 0, 1).with_stun_chance(&[6])),
        creature(CardTemplate::creature("goblin", 12, 4, 0, 1)),
    );
    // dwarf 6 (stun), goblin skipped, dwarf 4, goblin 3, dwarf 3 -> goblin at -1
    let mut dice = ScriptedDice::new([6, 4, 3, 3]);

    let (duel, reports) = run_duel(&mut creatures, &mut dice);

    let kinds: Vec<_> = reports.iter().map(|r| (r.attacker, r.strike.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            (CreatureSlot::First, StepKind::Attack),
            (CreatureSlot::Second, StepKind::StunnedSkip),
            (CreatureSlot::First, StepKind::Attack),
            (CreatureSlot::Second, StepKind::Attack),
            (CreatureSlot::First, StepKind::Attack),
        ]
    );
    assert_eq!(reports[0].strike.rolls[0].outcome, DieOutcome::Stun);
    assert_eq!(duel.winner(), Some(CreatureSlot::First));
    assert_eq!(creatures[CreatureSlot::Second].current_health, -1);
    assert!(!creatures[CreatureSlot::Second].is_stunned);
}

#[test]
fn test_barrier_charges_drain_one_per_strike() {
    let mut creatures = SlotPair::new(
        creature(CardTemplate::creature("ogre", 30, 10, 0, 1)),
        creature(CardTemplate::creature("mage", 9, 1, 0, 1).with_magic_barrier(2)),
    );
    // ogre: [5, 2] -> 5 absorbed; mage: 1; ogre: [6, 6] -> 6 absorbed; mage: 1; ogre: [3, 4]
    let mut dice = ScriptedDice::new([5, 2, 1, 6, 6, 1, 3, 4]);

    let (duel, reports) = run_duel(&mut creatures, &mut dice);

    assert_eq!(reports[0].strike.barrier_absorbed, Some(5));
    assert_eq!(reports[0].strike.final_damage, 2);
    assert_eq!(reports[2].strike.barrier_absorbed, Some(6));
    assert_eq!(reports[2].strike.final_damage, 6);
    assert_eq!(reports[4].strike.barrier_absorbed, None);
    assert_eq!(reports[4].strike.final_damage, 7);
    assert_eq!(creatures[CreatureSlot::Second].magic_barrier, 0);
    assert_eq!(duel.winner(), Some(CreatureSlot::First));
}

#[test]
fn test_vampire_outlasts_equal_opponent() {
    let mut creatures = SlotPair::new(
        creature(CardTemplate::creature("plain", 6, 4, 0, 1)),
        creature(CardTemplate::creature("vampire", 6, 4, 0, 1).with_vampirism(3)),
    );
    // tie roll 2 -> plain first; plain 3, vampire 3 (+3), plain 3, vampire 3 (+3)
    let mut dice = ScriptedDice::new([2, 3, 3, 3, 3]);

    let (duel, reports) = run_duel(&mut creatures, &mut dice);

    assert_eq!(reports.len(), 4);
    assert_eq!(reports[1].strike.vampirism_heal, 3);
    assert_eq!(duel.winner(), Some(CreatureSlot::Second));
    assert_eq!(creatures[CreatureSlot::Second].current_health, 6);
}

#[test]
fn test_orc_misses_still_roll() {
    let config = Config::default();
    let mut orc = creature(CardTemplate::creature("orc", 20, 12, 0, 1).with_miss_chance(&[1, 2]));
    let mut target = creature(CardTemplate::creature("t", 20, 1, 2, 1));
    let mut dice = ScriptedDice::new([1, 2]);

    let report = strike(&mut orc, &mut target, &config, &mut dice);

    assert!(report.rolls.iter().all(|r| r.outcome == DieOutcome::Miss));
    assert_eq!(report.raw_damage, 0);
    assert_eq!(report.damage_reduction, 1);
    assert_eq!(report.final_damage, 0);
    assert_eq!(target.current_health, 20);
}
