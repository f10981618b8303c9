//! Per-combatant repertoire of effect producers.
//!
//! A catalog is built once at spawn from the combatant's own stats. Anything
//! derived from stats (the total of a damage-over-time) is frozen at that
//! point; later buffs to attack do not change it.

use crate::config::BattleConfig;
use crate::effect::{Effect, EffectKind, Periodic, StatModifier, Strike};
use crate::error::ConfigError;
use crate::state::CombatantId;
use crate::stats::{StatBlock, StatKind};

/// Declarative action entry, as written in rosters and config files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionSpec {
    Damage,
    Heal,
    DamageOverTime,
    HealOverTime,
    /// Buff a stat; `None` picks one at random on each application.
    Buff(Option<StatKind>),
    /// Debuff a stat; `None` picks one at random on each application.
    Debuff(Option<StatKind>),
}

impl ActionSpec {
    /// Repertoire given to spawned combatants: one of every kind.
    pub const STANDARD: [ActionSpec; 6] = [
        ActionSpec::Damage,
        ActionSpec::Heal,
        ActionSpec::DamageOverTime,
        ActionSpec::HealOverTime,
        ActionSpec::Buff(None),
        ActionSpec::Debuff(None),
    ];

    pub const fn kind(self) -> EffectKind {
        match self {
            Self::Damage => EffectKind::Damage,
            Self::Heal => EffectKind::Heal,
            Self::DamageOverTime => EffectKind::DamageOverTime,
            Self::HealOverTime => EffectKind::HealOverTime,
            Self::Buff(_) => EffectKind::Buff,
            Self::Debuff(_) => EffectKind::Debuff,
        }
    }
}

/// Effect producer: a validated template that stamps out fresh [`Effect`]s.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionTemplate {
    Damage(Strike),
    Heal { amount: f64 },
    DamageOverTime(Periodic),
    HealOverTime(Periodic),
    Buff(StatModifier),
    Debuff(StatModifier),
}

impl ActionTemplate {
    /// Validates and freezes one action for a combatant with `stats`.
    pub fn build(spec: ActionSpec, config: &BattleConfig, stats: &StatBlock) -> Result<Self, ConfigError> {
        let template = match spec {
            ActionSpec::Damage => Self::Damage(Strike::from_config(config)),
            ActionSpec::Heal => Self::Heal {
                amount: config.base_heal,
            },
            ActionSpec::DamageOverTime => Self::DamageOverTime(Periodic::new(
                "damage_over_time",
                config.hit_damage(stats.attack()) * config.dot_multiplier,
                config.dot_duration,
                config.dot_interval,
                config.defense_mitigation,
            )?),
            ActionSpec::HealOverTime => Self::HealOverTime(Periodic::new(
                "heal_over_time",
                config.base_heal * config.hot_multiplier,
                config.hot_duration,
                config.hot_interval,
                config.defense_mitigation,
            )?),
            ActionSpec::Buff(stat) => Self::Buff(StatModifier::new(
                stat,
                config.buff_multiplier,
                config.buff_duration,
            )?),
            ActionSpec::Debuff(stat) => Self::Debuff(StatModifier::new(
                stat,
                config.debuff_multiplier,
                config.debuff_duration,
            )?),
        };
        Ok(template)
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Damage(_) => EffectKind::Damage,
            Self::Heal { .. } => EffectKind::Heal,
            Self::DamageOverTime(_) => EffectKind::DamageOverTime,
            Self::HealOverTime(_) => EffectKind::HealOverTime,
            Self::Buff(_) => EffectKind::Buff,
            Self::Debuff(_) => EffectKind::Debuff,
        }
    }

    /// Produces a fresh effect instance attributed to `source`.
    pub fn instantiate(&self, source: CombatantId) -> Effect {
        match self {
            Self::Damage(strike) => Effect::damage(source, *strike),
            Self::Heal { amount } => Effect::heal(source, *amount),
            Self::DamageOverTime(schedule) => Effect::damage_over_time(source, schedule.clone()),
            Self::HealOverTime(schedule) => Effect::heal_over_time(source, schedule.clone()),
            Self::Buff(modifier) => Effect::buff(source, modifier.clone()),
            Self::Debuff(modifier) => Effect::debuff(source, modifier.clone()),
        }
    }
}

/// Ordered, immutable repertoire of one combatant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionCatalog {
    actions: Vec<ActionTemplate>,
}

impl ActionCatalog {
    /// Builds a repertoire from specs; any invalid entry fails the whole build.
    pub fn build(specs: &[ActionSpec], config: &BattleConfig, stats: &StatBlock) -> Result<Self, ConfigError> {
        let actions = specs
            .iter()
            .map(|spec| ActionTemplate::build(*spec, config, stats))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { actions })
    }

    /// One of every action kind.
    pub fn standard(config: &BattleConfig, stats: &StatBlock) -> Result<Self, ConfigError> {
        Self::build(&ActionSpec::STANDARD, config, stats)
    }

    pub fn repertoire(&self) -> &[ActionTemplate] {
        &self.actions
    }

    pub fn get(&self, index: usize) -> Option<&ActionTemplate> {
        self.actions.get(index)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// True if any entry targets enemies (Damage, DamageOverTime, Debuff).
    pub fn has_offensive(&self) -> bool {
        self.actions.iter().any(|action| action.kind().is_offensive())
    }
}
