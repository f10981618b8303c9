//! Multiplicative stat modifiers backing buffs and debuffs.

use crate::error::ConfigError;
use crate::rng::RngSource;
use crate::stats::{StatBlock, StatKind};

use super::TIME_EPSILON;

/// A timed stat multiplier that owns its own revert.
///
/// The multiplier is applied once on apply and its inverse once on expiry or
/// forced removal. Stacked modifiers on one stat therefore commute.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    /// Requested stat; `None` draws one at apply time.
    stat: Option<StatKind>,
    multiplier: f64,
    duration: f64,
    elapsed: f64,
    /// Stat actually scaled, set on apply.
    applied: Option<StatKind>,
    reverted: bool,
}

impl StatModifier {
    pub fn new(stat: Option<StatKind>, multiplier: f64, duration: f64) -> Result<Self, ConfigError> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(ConfigError::InvalidMultiplier { multiplier });
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "modifier_duration",
                value: duration,
            });
        }
        Ok(Self {
            stat,
            multiplier,
            duration,
            elapsed: 0.0,
            applied: None,
            reverted: false,
        })
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Stat this instance scaled, once applied.
    pub fn applied_stat(&self) -> Option<StatKind> {
        self.applied
    }

    pub fn remaining(&self) -> f64 {
        (self.duration - self.elapsed).max(0.0)
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.duration - TIME_EPSILON
    }

    /// Scales the target stat and starts the countdown.
    pub(crate) fn apply<R: RngSource + ?Sized>(&mut self, target: &mut StatBlock, rng: &mut R) -> StatKind {
        let stat = match self.stat {
            Some(stat) => stat,
            None => StatKind::ALL[rng.range_usize(StatKind::ALL.len())],
        };
        target.scale_stat(stat, self.multiplier);
        self.applied = Some(stat);
        self.reverted = false;
        self.elapsed = 0.0;
        stat
    }

    /// Counts down; reverts on the call that reaches expiry.
    pub(crate) fn advance(&mut self, target: &mut StatBlock, dt: f64) -> Option<StatKind> {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        if self.is_expired() {
            self.revert(target)
        } else {
            None
        }
    }

    /// Divides the scaled stat back, at most once per apply.
    pub(crate) fn revert(&mut self, target: &mut StatBlock) -> Option<StatKind> {
        let stat = self.applied.filter(|_| !self.reverted)?;
        target.unscale_stat(stat, self.multiplier);
        self.reverted = true;
        Some(stat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PcgRng;

    fn target() -> StatBlock {
        StatBlock::new(100.0, 40.0, 30.0, 20.0).unwrap()
    }

    #[test]
    fn rejects_non_positive_multiplier() {
        assert!(StatModifier::new(None, 0.0, 5.0).is_err());
        assert!(StatModifier::new(None, -1.2, 5.0).is_err());
        assert!(StatModifier::new(None, 1.2, 0.0).is_err());
    }

    #[test]
    fn reverts_exactly_once() {
        let mut stats = target();
        let mut rng = PcgRng::new(1);
        let mut modifier = StatModifier::new(Some(StatKind::Attack), 1.5, 2.0).unwrap();

        modifier.apply(&mut stats, &mut rng);
        assert!((stats.attack() - 60.0).abs() < 1e-9);

        assert_eq!(modifier.advance(&mut stats, 1.0), None);
        assert_eq!(modifier.advance(&mut stats, 1.0), Some(StatKind::Attack));
        assert!((stats.attack() - 40.0).abs() < 1e-9);

        assert_eq!(modifier.advance(&mut stats, 1.0), None);
        assert_eq!(modifier.revert(&mut stats), None);
        assert!((stats.attack() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn revert_before_apply_is_a_no_op() {
        let mut stats = target();
        let mut modifier = StatModifier::new(Some(StatKind::Speed), 0.5, 2.0).unwrap();
        assert_eq!(modifier.revert(&mut stats), None);
        assert_eq!(stats, target());
    }

    #[test]
    fn unspecified_stat_is_drawn_once() {
        let mut stats = target();
        let mut rng = PcgRng::new(99);
        let mut modifier = StatModifier::new(None, 0.8, 1.0).unwrap();
        let chosen = modifier.apply(&mut stats, &mut rng);
        assert_eq!(modifier.applied_stat(), Some(chosen));
        assert_eq!(modifier.advance(&mut stats, 5.0), Some(chosen));
    }
}
