//! Health pool and combat stats of a single combatant.

use crate::error::ConfigError;

/// The three stats a buff or debuff can scale.
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
pub enum StatKind {
    /// Raises hit and damage-over-time output.
    Attack,
    /// Mitigates incoming damage.
    Defense,
    /// Shortens the action interval.
    Speed,
}

impl StatKind {
    /// All modifiable stats, in draw order for random selection.
    pub const ALL: [StatKind; 3] = [StatKind::Attack, StatKind::Defense, StatKind::Speed];
}

/// Result of routing raw damage through a [`StatBlock`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DamageOutcome {
    /// Health actually removed after mitigation and clamping.
    pub dealt: f64,
    /// True only for the hit that moved health from above zero to zero.
    pub killed: bool,
}

/// Mutable numeric state of one combatant.
///
/// Invariant: `0 <= current_health <= max_health` at all times. Once health
/// reaches zero the block is dead; damage and healing become no-ops.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    max_health: f64,
    current_health: f64,
    attack: f64,
    defense: f64,
    speed: f64,
}

impl StatBlock {
    /// Creates a block at full health.
    pub fn new(max_health: f64, attack: f64, defense: f64, speed: f64) -> Result<Self, ConfigError> {
        if !max_health.is_finite() || max_health <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "max_health",
                value: max_health,
            });
        }
        for (field, value) in [("attack", attack), ("defense", defense), ("speed", speed)] {
            if !value.is_finite() {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        Ok(Self {
            max_health,
            current_health: max_health,
            attack,
            defense,
            speed,
        })
    }

    /// Starts the block at a specific health value, clamped into `[0, max]`.
    #[must_use]
    pub fn with_current_health(mut self, health: f64) -> Self {
        self.current_health = if health.is_nan() {
            self.max_health
        } else {
            health.clamp(0.0, self.max_health)
        };
        self
    }

    pub fn max_health(&self) -> f64 {
        self.max_health
    }

    pub fn current_health(&self) -> f64 {
        self.current_health
    }

    pub fn health_fraction(&self) -> f64 {
        self.current_health / self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0.0
    }

    pub fn attack(&self) -> f64 {
        self.attack
    }

    pub fn defense(&self) -> f64 {
        self.defense
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn stat(&self, kind: StatKind) -> f64 {
        match kind {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
        }
    }

    /// Multiplies one stat in place. Buffs pass `m`, expiry passes `1/m`.
    pub fn scale_stat(&mut self, kind: StatKind, factor: f64) {
        match kind {
            StatKind::Attack => self.attack *= factor,
            StatKind::Defense => self.defense *= factor,
            StatKind::Speed => self.speed *= factor,
        }
    }

    /// Divides one stat in place, undoing an earlier [`scale_stat`](Self::scale_stat).
    pub fn unscale_stat(&mut self, kind: StatKind, factor: f64) {
        match kind {
            StatKind::Attack => self.attack /= factor,
            StatKind::Defense => self.defense /= factor,
            StatKind::Speed => self.speed /= factor,
        }
    }

    /// Applies mitigated damage.
    ///
    /// `dealt = max(0, raw × (1 − defense × mitigation))`, clamped so health
    /// never drops below zero. Damage against a dead block changes nothing.
    pub fn apply_damage(&mut self, raw: f64, mitigation: f64) -> DamageOutcome {
        if !self.is_alive() || !raw.is_finite() {
            return DamageOutcome::default();
        }

        let mitigated = (raw * (1.0 - self.defense * mitigation)).max(0.0);
        let before = self.current_health;
        self.current_health = (before - mitigated).max(0.0);

        DamageOutcome {
            dealt: before - self.current_health,
            killed: !self.is_alive(),
        }
    }

    /// Restores health up to the maximum; returns the amount actually restored.
    pub fn heal(&mut self, amount: f64) -> f64 {
        if !self.is_alive() || !amount.is_finite() || amount <= 0.0 {
            return 0.0;
        }
        let before = self.current_health;
        self.current_health = (before + amount).min(self.max_health);
        self.current_health - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MITIGATION: f64 = 0.0025;

    fn block() -> StatBlock {
        StatBlock::new(100.0, 50.0, 50.0, 50.0).unwrap()
    }

    #[test]
    fn rejects_non_positive_max_health() {
        assert!(StatBlock::new(0.0, 1.0, 1.0, 1.0).is_err());
        assert!(StatBlock::new(-5.0, 1.0, 1.0, 1.0).is_err());
        assert!(StatBlock::new(f64::NAN, 1.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn damage_is_mitigated_by_defense() {
        let mut stats = block();
        let outcome = stats.apply_damage(40.0, MITIGATION);
        // 40 × (1 − 50 × 0.0025) = 35
        assert!((outcome.dealt - 35.0).abs() < 1e-9);
        assert!((stats.current_health() - 65.0).abs() < 1e-9);
        assert!(!outcome.killed);
    }

    #[test]
    fn overwhelming_defense_floors_damage_at_zero() {
        let mut stats = StatBlock::new(100.0, 10.0, 1_000.0, 10.0).unwrap();
        let outcome = stats.apply_damage(50.0, MITIGATION);
        assert_eq!(outcome.dealt, 0.0);
        assert_eq!(stats.current_health(), 100.0);
    }

    #[test]
    fn death_fires_exactly_once() {
        let mut stats = block();
        let first = stats.apply_damage(1_000.0, MITIGATION);
        assert!(first.killed);
        assert_eq!(stats.current_health(), 0.0);

        let second = stats.apply_damage(1_000.0, MITIGATION);
        assert_eq!(second, DamageOutcome::default());
        assert_eq!(stats.current_health(), 0.0);
    }

    #[test]
    fn heal_clamps_to_max_and_ignores_dead() {
        let mut stats = block().with_current_health(90.0);
        assert!((stats.heal(25.0) - 10.0).abs() < 1e-9);
        assert_eq!(stats.current_health(), 100.0);

        let mut dead = block().with_current_health(0.0);
        assert_eq!(dead.heal(25.0), 0.0);
        assert!(!dead.is_alive());
    }

    #[test]
    fn scale_then_unscale_restores_stat() {
        let mut stats = block();
        stats.scale_stat(StatKind::Speed, 1.2);
        assert!((stats.speed() - 60.0).abs() < 1e-9);
        stats.unscale_stat(StatKind::Speed, 1.2);
        assert!((stats.speed() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn stat_kind_parses_case_insensitively() {
        assert_eq!("Defense".parse::<StatKind>().unwrap(), StatKind::Defense);
        assert_eq!(StatKind::Attack.to_string(), "attack");
    }
}
