//! Tick schedule for damage-over-time and heal-over-time effects.

use crate::config::check_timing;
use crate::error::ConfigError;

use super::TIME_EPSILON;

/// Fixed-amount periodic schedule.
///
/// The total magnitude is split over the whole number of intervals that fit
/// in the duration. A tick fires each time the elapsed time crosses the next
/// multiple of `interval`; a leftover partial interval never fires.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Periodic {
    per_tick: f64,
    interval: f64,
    duration: f64,
    total_ticks: u32,
    fired: u32,
    elapsed: f64,
    mitigation: f64,
}

impl Periodic {
    /// Builds a schedule delivering `total` over `duration`, one tick every `interval`.
    ///
    /// `mitigation` is the defense coefficient used when the ticks deal damage.
    pub fn new(
        effect: &'static str,
        total: f64,
        duration: f64,
        interval: f64,
        mitigation: f64,
    ) -> Result<Self, ConfigError> {
        check_timing(effect, duration, interval)?;
        if !total.is_finite() || total < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "over_time_total",
                value: total,
            });
        }

        let total_ticks = (duration / interval + TIME_EPSILON).floor() as u32;
        let per_tick = round_cents(total / total_ticks as f64);

        Ok(Self {
            per_tick,
            interval,
            duration,
            total_ticks,
            fired: 0,
            elapsed: 0.0,
            mitigation,
        })
    }

    pub fn per_tick(&self) -> f64 {
        self.per_tick
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn total_ticks(&self) -> u32 {
        self.total_ticks
    }

    pub fn ticks_fired(&self) -> u32 {
        self.fired
    }

    pub(crate) fn mitigation(&self) -> f64 {
        self.mitigation
    }

    /// Seconds left before the schedule expires.
    pub fn remaining(&self) -> f64 {
        (self.duration - self.elapsed).max(0.0)
    }

    /// Seconds until the next tick, or `None` once every tick has fired.
    pub fn next_tick_in(&self) -> Option<f64> {
        (self.fired < self.total_ticks)
            .then(|| ((self.fired + 1) as f64 * self.interval - self.elapsed).max(0.0))
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.duration - TIME_EPSILON
    }

    /// Restarts the schedule at full duration.
    pub(crate) fn start(&mut self) {
        self.fired = 0;
        self.elapsed = 0.0;
    }

    /// Advances elapsed time and returns how many ticks became due.
    ///
    /// A single large `dt` fires every whole interval it spans.
    pub(crate) fn advance(&mut self, dt: f64) -> u32 {
        if self.is_expired() {
            return 0;
        }
        self.elapsed = (self.elapsed + dt).min(self.duration);

        let due = ((self.elapsed / self.interval + TIME_EPSILON).floor() as u32).min(self.total_ticks);
        let newly_due = due.saturating_sub(self.fired);
        self.fired = self.fired.max(due);
        newly_due
    }
}

/// Rounds to two decimal places.
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_total_over_whole_ticks() {
        let periodic = Periodic::new("dot", 38.25, 7.0, 1.0, 0.0).unwrap();
        assert_eq!(periodic.total_ticks(), 7);
        assert!((periodic.per_tick() - 5.46).abs() < 1e-9);
    }

    #[test]
    fn non_integer_ratio_drops_the_partial_interval() {
        let periodic = Periodic::new("dot", 30.0, 5.5, 2.0, 0.0).unwrap();
        assert_eq!(periodic.total_ticks(), 2);
        assert!((periodic.per_tick() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn fires_on_interval_boundaries() {
        let mut periodic = Periodic::new("hot", 10.0, 4.0, 1.0, 0.0).unwrap();
        periodic.start();
        assert_eq!(periodic.advance(0.5), 0);
        assert_eq!(periodic.advance(0.5), 1);
        assert_eq!(periodic.advance(0.99), 0);
        assert!((periodic.next_tick_in().unwrap() - 0.01).abs() < 1e-9);
        assert_eq!(periodic.advance(2.5), 3);
        assert!(periodic.is_expired());
        assert_eq!(periodic.ticks_fired(), 4);
        assert_eq!(periodic.next_tick_in(), None);
    }

    #[test]
    fn small_steps_accumulate_without_missing_ticks() {
        let mut periodic = Periodic::new("dot", 7.0, 7.0, 1.0, 0.0).unwrap();
        periodic.start();
        let fired: u32 = (0..70).map(|_| periodic.advance(0.1)).sum();
        assert_eq!(fired, 7);
        assert!(periodic.is_expired());
    }

    #[test]
    fn rejects_bad_timing() {
        assert!(Periodic::new("dot", 10.0, 5.0, 0.0, 0.0).is_err());
        assert!(Periodic::new("dot", 10.0, 0.0, 1.0, 0.0).is_err());
        assert!(Periodic::new("dot", 10.0, 5.0, -1.0, 0.0).is_err());
        assert!(Periodic::new("dot", 10.0, 1.0, 2.0, 0.0).is_err());
    }
}
