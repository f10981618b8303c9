//! Effect instances and their shared dispatch contract.
//!
//! An [`Effect`] is one application of an action against one target. All six
//! kinds share the same lifecycle:
//!
//! - `on_apply` runs once when the action lands
//! - `on_tick` runs every simulation step while the effect is registered
//! - `is_expired` tells the owner when to drop it
//! - `on_force_remove` undoes stat changes if a host strips the effect early
//!
//! Instantaneous kinds (Damage, Heal) resolve entirely in `on_apply` and are
//! never registered on the target.

mod modifier;
mod periodic;

pub use modifier::StatModifier;
pub use periodic::Periodic;

use crate::config::BattleConfig;
use crate::rng::RngSource;
use crate::state::CombatantId;
use crate::stats::{StatBlock, StatKind};

/// Slack for comparing accumulated simulation seconds.
pub(crate) const TIME_EPSILON: f64 = 1e-6;

/// The closed set of effect kinds.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectKind {
    Damage,
    Heal,
    DamageOverTime,
    HealOverTime,
    Buff,
    Debuff,
}

impl EffectKind {
    /// Kinds aimed at the enemy roster.
    pub const fn is_offensive(self) -> bool {
        matches!(self, Self::Damage | Self::DamageOverTime | Self::Debuff)
    }

    /// Kinds that restore ally health.
    pub const fn is_restorative(self) -> bool {
        matches!(self, Self::Heal | Self::HealOverTime)
    }

    /// Kinds that are harmful while they sit on a combatant.
    pub const fn is_debuff(self) -> bool {
        matches!(self, Self::DamageOverTime | Self::Debuff)
    }
}

/// Attacker values captured at the moment an action fires.
///
/// Effects only ever see this copy, never the attacker itself, so an effect
/// outliving its source stays valid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectSource {
    pub id: CombatantId,
    pub attack: f64,
    pub health_fraction: f64,
}

/// Parameters of an instantaneous hit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Strike {
    pub base: f64,
    pub per_attack: f64,
    pub crit_threshold: f64,
    pub crit_multiplier: f64,
    pub mitigation: f64,
}

impl Strike {
    pub fn from_config(config: &BattleConfig) -> Self {
        Self {
            base: config.base_damage,
            per_attack: config.damage_per_attack,
            crit_threshold: config.crit_health_threshold,
            crit_multiplier: config.crit_damage_multiplier,
            mitigation: config.defense_mitigation,
        }
    }

    /// Raw damage for this source and whether the hit is critical.
    ///
    /// The crit check uses the attacker's health at the moment of the hit.
    pub fn raw_damage(&self, source: &EffectSource) -> (f64, bool) {
        let raw = source.attack * self.per_attack + self.base;
        if source.health_fraction <= self.crit_threshold {
            (raw * self.crit_multiplier, true)
        } else {
            (raw, false)
        }
    }
}

/// What happened when an effect landed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ApplyReport {
    /// Health removed or restored (0 for persistent kinds).
    pub amount: f64,
    pub critical: bool,
    pub killed: bool,
    /// Stat scaled by a buff or debuff.
    pub stat: Option<StatKind>,
}

/// What happened during one `on_tick` call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Periodic ticks fired during this call.
    pub ticks: u32,
    /// Total health removed or restored by those ticks.
    pub amount: f64,
    pub killed: bool,
    /// Stat restored because a modifier expired.
    pub reverted: Option<StatKind>,
    pub expired: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum EffectBody {
    Damage(Strike),
    Heal { amount: f64 },
    DamageOverTime(Periodic),
    HealOverTime(Periodic),
    Buff(StatModifier),
    Debuff(StatModifier),
}

/// One application of an action, owned by its target while active.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    source: CombatantId,
    body: EffectBody,
}

impl Effect {
    pub fn damage(source: CombatantId, strike: Strike) -> Self {
        Self {
            source,
            body: EffectBody::Damage(strike),
        }
    }

    pub fn heal(source: CombatantId, amount: f64) -> Self {
        Self {
            source,
            body: EffectBody::Heal { amount },
        }
    }

    pub fn damage_over_time(source: CombatantId, schedule: Periodic) -> Self {
        Self {
            source,
            body: EffectBody::DamageOverTime(schedule),
        }
    }

    pub fn heal_over_time(source: CombatantId, schedule: Periodic) -> Self {
        Self {
            source,
            body: EffectBody::HealOverTime(schedule),
        }
    }

    pub fn buff(source: CombatantId, modifier: StatModifier) -> Self {
        Self {
            source,
            body: EffectBody::Buff(modifier),
        }
    }

    pub fn debuff(source: CombatantId, modifier: StatModifier) -> Self {
        Self {
            source,
            body: EffectBody::Debuff(modifier),
        }
    }

    pub fn kind(&self) -> EffectKind {
        match self.body {
            EffectBody::Damage(_) => EffectKind::Damage,
            EffectBody::Heal { .. } => EffectKind::Heal,
            EffectBody::DamageOverTime(_) => EffectKind::DamageOverTime,
            EffectBody::HealOverTime(_) => EffectKind::HealOverTime,
            EffectBody::Buff(_) => EffectKind::Buff,
            EffectBody::Debuff(_) => EffectKind::Debuff,
        }
    }

    /// Id of the combatant that applied this effect (attribution only).
    pub fn source(&self) -> CombatantId {
        self.source
    }

    /// Total lifetime in seconds; zero for instantaneous kinds.
    pub fn duration(&self) -> f64 {
        match &self.body {
            EffectBody::Damage(_) | EffectBody::Heal { .. } => 0.0,
            EffectBody::DamageOverTime(p) | EffectBody::HealOverTime(p) => p.duration(),
            EffectBody::Buff(m) | EffectBody::Debuff(m) => m.duration(),
        }
    }

    /// Seconds left before expiry.
    pub fn remaining(&self) -> f64 {
        match &self.body {
            EffectBody::Damage(_) | EffectBody::Heal { .. } => 0.0,
            EffectBody::DamageOverTime(p) | EffectBody::HealOverTime(p) => p.remaining(),
            EffectBody::Buff(m) | EffectBody::Debuff(m) => m.remaining(),
        }
    }

    /// Whether the effect must be registered on its target after applying.
    pub fn is_persistent(&self) -> bool {
        self.duration() > 0.0
    }

    pub fn is_debuff(&self) -> bool {
        self.kind().is_debuff()
    }

    pub fn is_expired(&self) -> bool {
        match &self.body {
            EffectBody::Damage(_) | EffectBody::Heal { .. } => true,
            EffectBody::DamageOverTime(p) | EffectBody::HealOverTime(p) => p.is_expired(),
            EffectBody::Buff(m) | EffectBody::Debuff(m) => m.is_expired(),
        }
    }

    /// Stat this effect currently scales, if it is an applied modifier.
    pub fn modified_stat(&self) -> Option<StatKind> {
        match &self.body {
            EffectBody::Buff(m) | EffectBody::Debuff(m) => m.applied_stat(),
            _ => None,
        }
    }

    /// Periodic schedule, for over-time kinds.
    pub fn schedule(&self) -> Option<&Periodic> {
        match &self.body {
            EffectBody::DamageOverTime(p) | EffectBody::HealOverTime(p) => Some(p),
            _ => None,
        }
    }

    /// Lands the effect on `target`.
    pub fn on_apply<R: RngSource + ?Sized>(
        &mut self,
        source: &EffectSource,
        target: &mut StatBlock,
        rng: &mut R,
    ) -> ApplyReport {
        match &mut self.body {
            EffectBody::Damage(strike) => {
                let (raw, critical) = strike.raw_damage(source);
                let outcome = target.apply_damage(raw, strike.mitigation);
                ApplyReport {
                    amount: outcome.dealt,
                    critical,
                    killed: outcome.killed,
                    stat: None,
                }
            }
            EffectBody::Heal { amount } => ApplyReport {
                amount: target.heal(*amount),
                ..ApplyReport::default()
            },
            EffectBody::DamageOverTime(schedule) | EffectBody::HealOverTime(schedule) => {
                schedule.start();
                ApplyReport::default()
            }
            EffectBody::Buff(modifier) | EffectBody::Debuff(modifier) => ApplyReport {
                stat: Some(modifier.apply(target, rng)),
                ..ApplyReport::default()
            },
        }
    }

    /// Advances the effect by `dt` seconds against its owner.
    pub fn on_tick(&mut self, target: &mut StatBlock, dt: f64) -> TickReport {
        let mut report = TickReport::default();
        match &mut self.body {
            EffectBody::Damage(_) | EffectBody::Heal { .. } => {}
            EffectBody::DamageOverTime(schedule) => {
                report.ticks = schedule.advance(dt);
                for _ in 0..report.ticks {
                    let outcome = target.apply_damage(schedule.per_tick(), schedule.mitigation());
                    report.amount += outcome.dealt;
                    report.killed |= outcome.killed;
                }
            }
            EffectBody::HealOverTime(schedule) => {
                report.ticks = schedule.advance(dt);
                for _ in 0..report.ticks {
                    report.amount += target.heal(schedule.per_tick());
                }
            }
            EffectBody::Buff(modifier) | EffectBody::Debuff(modifier) => {
                report.reverted = modifier.advance(target, dt);
            }
        }
        report.expired = self.is_expired();
        report
    }

    /// Strips the effect early, restoring any stat it scaled.
    pub fn on_force_remove(&mut self, target: &mut StatBlock) -> Option<StatKind> {
        match &mut self.body {
            EffectBody::Buff(modifier) | EffectBody::Debuff(modifier) => modifier.revert(target),
            _ => None,
        }
    }
}
