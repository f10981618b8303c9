//! Battle configuration constants and tunable parameters.
//!
//! Every number the simulation uses lives here so hosts can override it at
//! construction time. Defaults reproduce the reference balance: stats around
//! 50 on a 1-100 scale, 100 health, and a 2-10 second action cadence.

use crate::error::ConfigError;

/// Tunable parameters shared by the catalog, the scheduler and the setup step.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BattleConfig {
    // ===== base stats (setup) =====
    /// Max health assigned to spawned combatants.
    pub base_health: f64,
    pub base_attack: f64,
    pub base_defense: f64,
    pub base_speed: f64,
    /// Fraction each spawned stat may deviate from its base (0 = identical agents).
    pub stat_variance: f64,

    // ===== damage model =====
    /// Health fraction at or below which an attacker's hits are critical.
    pub crit_health_threshold: f64,
    pub crit_damage_multiplier: f64,
    /// Damage reduction per point of defense (`1 - defense * coeff`).
    pub defense_mitigation: f64,
    pub base_damage: f64,
    /// Extra raw damage per point of attack.
    pub damage_per_attack: f64,
    pub base_heal: f64,

    // ===== over-time effects =====
    pub dot_duration: f64,
    pub dot_interval: f64,
    /// Total DoT damage = hit damage at spawn × this multiplier.
    pub dot_multiplier: f64,
    pub hot_duration: f64,
    pub hot_interval: f64,
    /// Total HoT healing = base heal × this multiplier.
    pub hot_multiplier: f64,

    // ===== stat modifiers =====
    pub buff_multiplier: f64,
    pub buff_duration: f64,
    pub debuff_multiplier: f64,
    pub debuff_duration: f64,

    // ===== scheduling =====
    /// Countdown before a combatant's first action.
    pub start_cooldown: f64,
    /// Action interval = base - per_speed × speed, floored at `min_action_interval`.
    pub action_interval_base: f64,
    pub action_interval_per_speed: f64,
    pub min_action_interval: f64,
}

impl BattleConfig {
    pub const DEFAULT_BASE_HEALTH: f64 = 100.0;
    pub const DEFAULT_BASE_STAT: f64 = 50.0;
    pub const DEFAULT_STAT_VARIANCE: f64 = 0.2;
    pub const DEFAULT_CRIT_HEALTH_THRESHOLD: f64 = 0.4;
    pub const DEFAULT_CRIT_DAMAGE_MULTIPLIER: f64 = 2.0;
    pub const DEFAULT_DEFENSE_MITIGATION: f64 = 0.0025;
    pub const DEFAULT_BASE_DAMAGE: f64 = 25.0;
    pub const DEFAULT_DAMAGE_PER_ATTACK: f64 = 0.01;
    pub const DEFAULT_BASE_HEAL: f64 = 25.0;
    pub const DEFAULT_OVER_TIME_DURATION: f64 = 7.0;
    pub const DEFAULT_OVER_TIME_INTERVAL: f64 = 1.0;
    pub const DEFAULT_OVER_TIME_MULTIPLIER: f64 = 1.5;
    pub const DEFAULT_BUFF_MULTIPLIER: f64 = 1.2;
    pub const DEFAULT_DEBUFF_MULTIPLIER: f64 = 0.8;
    pub const DEFAULT_MODIFIER_DURATION: f64 = 5.0;
    pub const DEFAULT_START_COOLDOWN: f64 = 1.0;
    pub const DEFAULT_ACTION_INTERVAL_BASE: f64 = 10.0;
    pub const DEFAULT_ACTION_INTERVAL_PER_SPEED: f64 = 0.08;
    pub const DEFAULT_MIN_ACTION_INTERVAL: f64 = 0.1;

    pub fn new() -> Self {
        Self {
            base_health: Self::DEFAULT_BASE_HEALTH,
            base_attack: Self::DEFAULT_BASE_STAT,
            base_defense: Self::DEFAULT_BASE_STAT,
            base_speed: Self::DEFAULT_BASE_STAT,
            stat_variance: Self::DEFAULT_STAT_VARIANCE,
            crit_health_threshold: Self::DEFAULT_CRIT_HEALTH_THRESHOLD,
            crit_damage_multiplier: Self::DEFAULT_CRIT_DAMAGE_MULTIPLIER,
            defense_mitigation: Self::DEFAULT_DEFENSE_MITIGATION,
            base_damage: Self::DEFAULT_BASE_DAMAGE,
            damage_per_attack: Self::DEFAULT_DAMAGE_PER_ATTACK,
            base_heal: Self::DEFAULT_BASE_HEAL,
            dot_duration: Self::DEFAULT_OVER_TIME_DURATION,
            dot_interval: Self::DEFAULT_OVER_TIME_INTERVAL,
            dot_multiplier: Self::DEFAULT_OVER_TIME_MULTIPLIER,
            hot_duration: Self::DEFAULT_OVER_TIME_DURATION,
            hot_interval: Self::DEFAULT_OVER_TIME_INTERVAL,
            hot_multiplier: Self::DEFAULT_OVER_TIME_MULTIPLIER,
            buff_multiplier: Self::DEFAULT_BUFF_MULTIPLIER,
            buff_duration: Self::DEFAULT_MODIFIER_DURATION,
            debuff_multiplier: Self::DEFAULT_DEBUFF_MULTIPLIER,
            debuff_duration: Self::DEFAULT_MODIFIER_DURATION,
            start_cooldown: Self::DEFAULT_START_COOLDOWN,
            action_interval_base: Self::DEFAULT_ACTION_INTERVAL_BASE,
            action_interval_per_speed: Self::DEFAULT_ACTION_INTERVAL_PER_SPEED,
            min_action_interval: Self::DEFAULT_MIN_ACTION_INTERVAL,
        }
    }

    /// Raw hit damage for an attacker with the given attack stat (before crit).
    pub fn hit_damage(&self, attack: f64) -> f64 {
        attack * self.damage_per_attack + self.base_damage
    }

    /// Seconds between actions for a combatant with the given speed.
    pub fn action_interval(&self, speed: f64) -> f64 {
        let interval = self.action_interval_base - self.action_interval_per_speed * speed;
        if interval.is_nan() {
            return self.min_action_interval;
        }
        interval.max(self.min_action_interval)
    }

    /// Rejects values the simulation cannot run with.
    ///
    /// Nothing is clamped: a bad value is reported with the field name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("base_health", self.base_health)?;
        non_negative("base_attack", self.base_attack)?;
        non_negative("base_defense", self.base_defense)?;
        non_negative("base_speed", self.base_speed)?;
        if !(0.0..1.0).contains(&self.stat_variance) {
            return Err(ConfigError::OutOfRange {
                field: "stat_variance",
                value: self.stat_variance,
            });
        }
        if !(0.0..=1.0).contains(&self.crit_health_threshold) {
            return Err(ConfigError::OutOfRange {
                field: "crit_health_threshold",
                value: self.crit_health_threshold,
            });
        }
        positive("crit_damage_multiplier", self.crit_damage_multiplier)?;
        non_negative("defense_mitigation", self.defense_mitigation)?;
        non_negative("base_damage", self.base_damage)?;
        non_negative("damage_per_attack", self.damage_per_attack)?;
        non_negative("base_heal", self.base_heal)?;
        non_negative("dot_multiplier", self.dot_multiplier)?;
        non_negative("hot_multiplier", self.hot_multiplier)?;
        positive("buff_multiplier", self.buff_multiplier)?;
        positive("debuff_multiplier", self.debuff_multiplier)?;
        positive("buff_duration", self.buff_duration)?;
        positive("debuff_duration", self.debuff_duration)?;
        check_timing("damage_over_time", self.dot_duration, self.dot_interval)?;
        check_timing("heal_over_time", self.hot_duration, self.hot_interval)?;
        positive("start_cooldown", self.start_cooldown)?;
        positive("min_action_interval", self.min_action_interval)?;
        if !self.action_interval_base.is_finite() || !self.action_interval_per_speed.is_finite() {
            return Err(ConfigError::OutOfRange {
                field: "action_interval",
                value: self.action_interval_base,
            });
        }
        Ok(())
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

/// Periodic timing rule shared with the catalog: both values positive and at
/// least one whole tick inside the duration.
pub(crate) fn check_timing(
    effect: &'static str,
    duration: f64,
    interval: f64,
) -> Result<(), ConfigError> {
    let valid = duration.is_finite()
        && interval.is_finite()
        && duration > 0.0
        && interval > 0.0
        && interval <= duration;
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidTiming {
            effect,
            duration,
            interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(BattleConfig::default().validate().is_ok());
    }

    #[test]
    fn action_interval_scales_with_speed_and_is_floored() {
        let config = BattleConfig::default();
        assert!((config.action_interval(0.0) - 10.0).abs() < 1e-9);
        assert!((config.action_interval(50.0) - 6.0).abs() < 1e-9);
        assert!((config.action_interval(100.0) - 2.0).abs() < 1e-9);
        assert_eq!(config.action_interval(10_000.0), config.min_action_interval);
    }

    #[test]
    fn rejects_zero_interval() {
        let config = BattleConfig {
            dot_interval: 0.0,
            ..BattleConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTiming {
                effect: "damage_over_time",
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_positive_health() {
        let config = BattleConfig {
            base_health: 0.0,
            ..BattleConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "base_health",
                value: 0.0
            })
        );
    }
}
