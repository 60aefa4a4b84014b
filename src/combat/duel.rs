//! Automated duel between the two creatures.
//!
//! ## Initiative
//!
//! The creature with strictly higher current attack strikes first. On a tie
//! one die is rolled: even gives the first slot the initiative, odd the
//! second. No other roll is involved.
//!
//! ## Strike
//!
//! One step of the duel, attacker against defender:
//!
//! 1. A stunned attacker loses the step and its stun is cleared.
//! 2. The attacker rolls `dice_count(attack)` dice one at a time. A face in
//!    its miss set deals nothing. A face in its stun set stuns the defender
//!    and still deals damage.
//! 3. A defender with barrier charges absorbs the single highest hitting
//!    die and spends one charge.
//! 4. The remaining dice are summed, the defense block is subtracted
//!    (floored at 0) and the result comes off the defender's health.
//! 5. A vampire attacker that dealt damage heals by its vampirism amount.
//!
//! Health changes during a duel never trigger a dynamic stat recompute.
//!
//! ## Example
//!
//! ```
//! use wager_arena::cards::{CardTemplate, CreatureInstance};
//! use wager_arena::combat::Duel;
//! use wager_arena::core::{Config, CreatureSlot, ScriptedDice, SlotPair};
//!
//! let config = Config::default();
//! let mut creatures = SlotPair::new(
//!     CreatureInstance::from_template(&CardTemplate::creature("wolf", 4, 5, 0, 3)),
//!     CreatureInstance::from_template(&CardTemplate::creature("rat", 3, 2, 0, 1)),
//! );
//! let mut dice = ScriptedDice::new([6]);
//!
//! let mut duel = Duel::begin(&creatures, &mut dice);
//! assert_eq!(duel.attacker(), CreatureSlot::First);
//!
//! let report = duel.step(&mut creatures, &config, &mut dice).unwrap();
//! assert_eq!(report.strike.final_damage, 6);
//! assert_eq!(duel.winner(), Some(CreatureSlot::First));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::tiers::{defense_block, dice_count};
use crate::cards::CreatureInstance;
use crate::core::{Config, CreatureSlot, RandomSource, SlotPair};

/// Steps a headless resolution may take before the duel is declared stalled.
pub const MAX_DUEL_STEPS: u32 = 10_000;

/// What a single die did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DieOutcome {
    Hit,
    Miss,
    /// Hit that also stunned the defender.
    Stun,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieRoll {
    pub face: u8,
    pub outcome: DieOutcome,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    /// The attacker rolled.
    Attack,
    /// The attacker was stunned and lost the step.
    StunnedSkip,
}

/// Outcome of one strike, as seen by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrikeReport {
    pub kind: StepKind,
    /// Every die rolled, in roll order.
    pub rolls: SmallVec<[DieRoll; 3]>,
    /// Face removed by the defender's magic barrier.
    pub barrier_absorbed: Option<u8>,
    pub raw_damage: i32,
    pub damage_reduction: i32,
    pub final_damage: i32,
    pub vampirism_heal: i32,
    /// Whether this strike left the defender stunned.
    pub defender_stunned: bool,
    pub defender_health: i32,
    /// The defender is down.
    pub finished: bool,
}

impl StrikeReport {
    fn skipped(defender: &CreatureInstance) -> Self {
        Self {
            kind: StepKind::StunnedSkip,
            rolls: SmallVec::new(),
            barrier_absorbed: None,
            raw_damage: 0,
            damage_reduction: 0,
            final_damage: 0,
            vampirism_heal: 0,
            defender_stunned: defender.is_stunned,
            defender_health: defender.current_health,
            finished: false,
        }
    }
}

/// Pick the slot that strikes first.
pub fn initiative<R: RandomSource>(
    first: &CreatureInstance,
    second: &CreatureInstance,
    rng: &mut R,
) -> CreatureSlot {
    match first.current_attack.cmp(&second.current_attack) {
        std::cmp::Ordering::Greater => CreatureSlot::First,
        std::cmp::Ordering::Less => CreatureSlot::Second,
        std::cmp::Ordering::Equal => {
            if rng.roll_die() % 2 == 0 {
                CreatureSlot::First
            } else {
                CreatureSlot::Second
            }
        }
    }
}

/// Resolve one strike of `attacker` against `defender`.
pub fn strike<R: RandomSource>(
    attacker: &mut CreatureInstance,
    defender: &mut CreatureInstance,
    config: &Config,
    rng: &mut R,
) -> StrikeReport {
    if attacker.is_stunned {
        attacker.is_stunned = false;
        return StrikeReport::skipped(defender);
    }

    let mut rolls: SmallVec<[DieRoll; 3]> = SmallVec::new();
    let mut hits: SmallVec<[u8; 3]> = SmallVec::new();

    for _ in 0..dice_count(attacker.current_attack, config) {
        let face = rng.roll_die();
        let outcome = if attacker.misses_on(face) {
            DieOutcome::Miss
        } else if attacker.stuns_on(face) {
            defender.is_stunned = true;
            DieOutcome::Stun
        } else {
            DieOutcome::Hit
        };
        if outcome != DieOutcome::Miss {
            hits.push(face);
        }
        rolls.push(DieRoll { face, outcome });
    }

    let mut barrier_absorbed = None;
    if defender.magic_barrier > 0 {
        let highest = hits
            .iter()
            .enumerate()
            .max_by_key(|&(i, &face)| (face, std::cmp::Reverse(i)))
            .map(|(i, _)| i);
        if let Some(index) = highest {
            barrier_absorbed = Some(hits.remove(index));
            defender.magic_barrier -= 1;
        }
    }

    let raw_damage: i32 = hits.iter().map(|&face| i32::from(face)).sum();
    let damage_reduction = defense_block(defender.current_defense, config);
    let final_damage = (raw_damage - damage_reduction).max(0);
    defender.current_health -= final_damage;

    let mut vampirism_heal = 0;
    if attacker.vampirism > 0 && final_damage > 0 {
        attacker.current_health += attacker.vampirism;
        vampirism_heal = attacker.vampirism;
    }

    StrikeReport {
        kind: StepKind::Attack,
        rolls,
        barrier_absorbed,
        raw_damage,
        damage_reduction,
        final_damage,
        vampirism_heal,
        defender_stunned: defender.is_stunned,
        defender_health: defender.current_health,
        finished: defender.current_health <= 0,
    }
}

/// One step of a running duel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// 1-based step number.
    pub step: u32,
    pub attacker: CreatureSlot,
    pub defender: CreatureSlot,
    pub strike: StrikeReport,
}

impl StepReport {
    /// Whether this step ended the duel.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.strike.finished
    }
}

/// Duel progress: who strikes next and who won.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duel {
    attacker: CreatureSlot,
    steps: u32,
    winner: Option<CreatureSlot>,
}

impl Duel {
    /// Start a duel, rolling initiative.
    pub fn begin<R: RandomSource>(creatures: &SlotPair<CreatureInstance>, rng: &mut R) -> Self {
        let attacker = initiative(
            &creatures[CreatureSlot::First],
            &creatures[CreatureSlot::Second],
            rng,
        );
        Self {
            attacker,
            steps: 0,
            winner: None,
        }
    }

    /// Slot that strikes on the next step.
    #[must_use]
    pub fn attacker(&self) -> CreatureSlot {
        self.attacker
    }

    /// Steps taken so far.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    #[must_use]
    pub fn winner(&self) -> Option<CreatureSlot> {
        self.winner
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    /// Play one step. Returns `None` once the duel has a winner.
    pub fn step<R: RandomSource>(
        &mut self,
        creatures: &mut SlotPair<CreatureInstance>,
        config: &Config,
        rng: &mut R,
    ) -> Option<StepReport> {
        if self.is_finished() {
            return None;
        }

        let attacker = self.attacker;
        let (attacking, defending) = creatures.pair_mut(attacker);
        let strike = strike(attacking, defending, config, rng);
        self.steps += 1;

        debug!(
            step = self.steps,
            attacker = %attacker,
            kind = ?strike.kind,
            damage = strike.final_damage,
            defender_health = strike.defender_health,
            "duel step"
        );

        if strike.finished {
            self.winner = Some(attacker);
        } else {
            self.attacker = attacker.other();
        }

        Some(StepReport {
            step: self.steps,
            attacker,
            defender: attacker.other(),
            strike,
        })
    }
}
