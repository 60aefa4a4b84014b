//! Creature instances - per-battle creature state.
//!
//! A `CreatureInstance` is built once from a creature `CardTemplate` when a
//! battle starts and discarded when it resolves. It tracks current stats,
//! the wager-derived bonus RP, betting lockout and special properties.
//!
//! ## Stat floors
//!
//! After any card mutation or dynamic recompute:
//! `current_attack >= 1`, `current_defense >= 0`, `current_rate_points >= 1`.
//! Health has no floor; combat may drive it negative.
//!
//! ## Dynamic stats
//!
//! Threshold bonuses are recomputed from scratch on every call to
//! `recalculate_dynamic_stats`: the previously applied bonus is rolled
//! back first, so repeated calls never stack.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::template::{CardId, CardTemplate, DynamicStatThreshold};
use crate::effects::{Effect, Stat};

/// Die faces that trigger a creature property (miss, stun).
pub type FaceSet = SmallVec<[u8; 6]>;

/// Attack/defense/RP bonus currently granted by dynamic thresholds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBonus {
    pub attack: i32,
    pub defense: i32,
    pub rate_points: i32,
}

impl StatBonus {
    fn add(&mut self, stat: Stat, amount: i32) {
        match stat {
            Stat::Attack => self.attack += amount,
            Stat::Defense => self.defense += amount,
            Stat::RatePoints => self.rate_points += amount,
            // Thresholds key off health; they never grant it.
            Stat::Health => {}
        }
    }
}

/// A creature on the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureInstance {
    /// Template this creature was built from.
    pub card_id: CardId,

    pub base_health: i32,
    pub current_health: i32,
    pub base_attack: i32,
    pub current_attack: i32,
    pub base_defense: i32,
    pub current_defense: i32,
    pub base_rate_points: i32,
    pub current_rate_points: i32,

    /// RP granted by the total stake on this creature.
    pub bonus_rate_points: i32,

    /// Bets are refused while `current_round <= betting_blocked_until_round`.
    /// 0 means never blocked.
    pub betting_blocked_until_round: u32,

    // === Special properties ===
    /// Upper bound for `current_rate_points` after a recompute. 0 = no cap.
    pub rp_limit: i32,
    pub magic_barrier: i32,
    pub vampirism: i32,
    pub miss_chance: FaceSet,
    pub stun_chance: FaceSet,
    pub thief: bool,
    pub dynamic_stats: Vec<DynamicStatThreshold>,
    pub is_stunned: bool,

    dynamic_bonus: StatBonus,
}

impl CreatureInstance {
    /// Build a fresh creature from its template.
    ///
    /// Dynamic thresholds are evaluated immediately, so a creature that
    /// starts above a threshold starts with the bonus.
    #[must_use]
    pub fn from_template(template: &CardTemplate) -> Self {
        let mut creature = Self {
            card_id: template.id.clone(),
            base_health: template.health,
            current_health: template.health,
            base_attack: template.attack,
            current_attack: template.attack,
            base_defense: template.defense,
            current_defense: template.defense,
            base_rate_points: template.rate_points,
            current_rate_points: template.rate_points,
            bonus_rate_points: 0,
            betting_blocked_until_round: 0,
            rp_limit: template.rp_limit.unwrap_or(0),
            magic_barrier: template.magic_barrier.unwrap_or(0),
            vampirism: template.vampirism.unwrap_or(0),
            miss_chance: template.miss_chance.iter().copied().collect(),
            stun_chance: template.stun_chance.iter().copied().collect(),
            thief: template.thief,
            dynamic_stats: template.dynamic_stats.clone(),
            is_stunned: false,
            dynamic_bonus: StatBonus::default(),
        };
        creature.recalculate_dynamic_stats();
        creature
    }

    /// Effective rating: recalculated RP plus the wager bonus, saturating.
    #[must_use]
    pub fn total_rp(&self) -> i32 {
        self.current_rate_points.saturating_add(self.bonus_rate_points)
    }

    /// Bonus currently contributed by dynamic thresholds.
    #[must_use]
    pub fn dynamic_bonus(&self) -> StatBonus {
        self.dynamic_bonus
    }

    /// Whether bets on this creature are refused in `round`.
    #[must_use]
    pub fn is_betting_blocked(&self, round: u32) -> bool {
        round <= self.betting_blocked_until_round
    }

    /// Whether a die face makes this creature's attack miss.
    #[must_use]
    pub fn misses_on(&self, face: u8) -> bool {
        self.miss_chance.contains(&face)
    }

    /// Whether a die face lets this creature stun its target.
    #[must_use]
    pub fn stuns_on(&self, face: u8) -> bool {
        self.stun_chance.contains(&face)
    }

    /// Add `amount` to a stat and apply the stat floors.
    ///
    /// Does not recompute dynamic stats; callers outside combat do that
    /// once after all of a card's effects have landed.
    pub fn increment(&mut self, stat: Stat, amount: i32) {
        match stat {
            Stat::Health => self.current_health += amount,
            Stat::Attack => self.current_attack = (self.current_attack + amount).max(1),
            Stat::Defense => self.current_defense = (self.current_defense + amount).max(0),
            Stat::RatePoints => {
                self.current_rate_points = (self.current_rate_points + amount).max(1);
            }
        }
    }

    /// Roll back the applied threshold bonus and re-apply it for current health.
    ///
    /// Creatures without thresholds are left untouched.
    pub fn recalculate_dynamic_stats(&mut self) {
        if self.dynamic_stats.is_empty() {
            return;
        }

        self.current_attack -= self.dynamic_bonus.attack;
        self.current_defense -= self.dynamic_bonus.defense;
        self.current_rate_points -= self.dynamic_bonus.rate_points;

        let mut bonus = StatBonus::default();
        for threshold in &self.dynamic_stats {
            if self.current_health < threshold.threshold_hp {
                continue;
            }
            for spec in &threshold.effects {
                // Only well-formed increments count; anything else in a
                // threshold list is ignored.
                if let Ok(Some(Effect::IncrementStat { stat, amount })) = Effect::parse(spec) {
                    bonus.add(stat, amount);
                }
            }
        }
        self.dynamic_bonus = bonus;

        self.current_attack = (self.current_attack + bonus.attack).max(1);
        self.current_defense = (self.current_defense + bonus.defense).max(0);

        let mut rate_points = self.current_rate_points + bonus.rate_points;
        if self.rp_limit > 0 {
            rate_points = rate_points.min(self.rp_limit);
        }
        self.current_rate_points = rate_points.max(1);
    }
}
