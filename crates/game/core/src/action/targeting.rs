//! Target selection policy.
//!
//! Selection is re-run every time an action fires and never cached. It makes
//! exactly one attempt: when nothing qualifies the action is abandoned for
//! this step instead of retried.
//!
//! | Action kind                       | Target                                        |
//! |-----------------------------------|-----------------------------------------------|
//! | Damage, DamageOverTime, Debuff    | random living enemy                           |
//! | Heal, HealOverTime                | random living ally below the crit threshold   |
//! | Buff                              | random living ally                            |
//!
//! Healers with no offensive action fall back to the most injured ally.

use crate::effect::EffectKind;
use crate::rng::RngSource;
use crate::state::{Combatant, CombatantId};

/// Stateless targeting policy parameterized by the crit health threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetSelector {
    crit_threshold: f64,
}

impl TargetSelector {
    pub fn new(crit_threshold: f64) -> Self {
        Self { crit_threshold }
    }

    /// Picks a target for `actor` firing an action of `kind`.
    ///
    /// `allies` is the actor's own roster (the actor included) and `enemies`
    /// the opposing one. Dead members of either are ignored.
    pub fn select<R: RngSource + ?Sized>(
        &self,
        actor: &Combatant,
        kind: EffectKind,
        allies: &[Combatant],
        enemies: &[Combatant],
        rng: &mut R,
    ) -> Option<CombatantId> {
        let living_allies: Vec<&Combatant> = allies.iter().filter(|c| c.is_alive()).collect();

        match kind {
            EffectKind::Damage | EffectKind::DamageOverTime | EffectKind::Debuff => {
                let living_enemies: Vec<&Combatant> =
                    enemies.iter().filter(|c| c.is_alive()).collect();
                pick(&living_enemies, rng)
            }
            EffectKind::Heal | EffectKind::HealOverTime => {
                let critical: Vec<&Combatant> = living_allies
                    .iter()
                    .copied()
                    .filter(|c| c.stats().health_fraction() < self.crit_threshold)
                    .collect();
                if !critical.is_empty() {
                    return pick(&critical, rng);
                }
                if actor.catalog().has_offensive() {
                    return None;
                }
                most_injured(&living_allies)
            }
            EffectKind::Buff => pick(&living_allies, rng),
        }
    }
}

fn pick<R: RngSource + ?Sized>(candidates: &[&Combatant], rng: &mut R) -> Option<CombatantId> {
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.range_usize(candidates.len())].id())
}

/// Lowest health fraction; ties go to the earliest roster entry.
fn most_injured(candidates: &[&Combatant]) -> Option<CombatantId> {
    let mut best: Option<&Combatant> = None;
    for &candidate in candidates {
        let better = match best {
            None => true,
            Some(current) => {
                candidate.stats().health_fraction() < current.stats().health_fraction()
            }
        };
        if better {
            best = Some(candidate);
        }
    }
    best.map(Combatant::id)
}
