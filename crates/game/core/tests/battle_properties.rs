use battle_core::{
    ActionSpec, BattleConfig, BattleEvent, BattleOutcome, BattleSimulation, Combatant,
    CombatantId, Effect, EffectSource, PcgRng, Periodic, StatBlock, StatKind, StatModifier, Team,
};

const TOLERANCE: f64 = 1e-9;

fn spawn(id: u32, team: Team, stats: StatBlock, actions: &[ActionSpec]) -> Combatant {
    Combatant::spawn(
        CombatantId(id),
        format!("{team}_{id}"),
        team,
        stats,
        actions,
        &BattleConfig::default(),
    )
    .expect("valid combatant")
}

fn baseline() -> StatBlock {
    StatBlock::new(100.0, 50.0, 50.0, 50.0).expect("valid stats")
}

fn skirmish(seed: u64) -> BattleSimulation {
    let stats = |health: f64, attack: f64, defense: f64, speed: f64| {
        StatBlock::new(health, attack, defense, speed).expect("valid stats")
    };
    let players = vec![
        spawn(0, Team::Player, stats(110.0, 55.0, 42.0, 61.0), &ActionSpec::STANDARD),
        spawn(1, Team::Player, stats(92.0, 47.0, 58.0, 44.0), &ActionSpec::STANDARD),
        spawn(2, Team::Player, stats(101.0, 60.0, 51.0, 39.0), &ActionSpec::STANDARD),
    ];
    let enemies = vec![
        spawn(3, Team::Enemy, stats(97.0, 52.0, 45.0, 57.0), &ActionSpec::STANDARD),
        spawn(4, Team::Enemy, stats(118.0, 41.0, 49.0, 50.0), &ActionSpec::STANDARD),
        spawn(5, Team::Enemy, stats(86.0, 58.0, 55.0, 48.0), &ActionSpec::STANDARD),
    ];
    BattleSimulation::new(BattleConfig::default(), players, enemies, seed).expect("valid battle")
}

fn source() -> EffectSource {
    EffectSource {
        id: CombatantId(0),
        attack: 50.0,
        health_fraction: 1.0,
    }
}

#[test]
fn test_health_stays_within_bounds() {
    let mut sim = skirmish(17);
    for _ in 0..20_000 {
        let outcome = sim.advance(0.25);
        for combatant in sim.players().iter().chain(sim.enemies()) {
            let stats = combatant.stats();
            assert!(stats.current_health() >= 0.0, "{} below zero", combatant.name());
            assert!(
                stats.current_health() <= stats.max_health(),
                "{} above max",
                combatant.name()
            );
        }
        if outcome.is_finished() {
            break;
        }
    }
}

#[test]
fn test_death_is_reported_once() {
    let mut sim = skirmish(5);
    let mut deaths = Vec::new();
    for _ in 0..20_000 {
        let outcome = sim.advance(0.5);
        for event in sim.drain_events() {
            if let BattleEvent::CombatantDied { id, .. } = event {
                assert!(!deaths.contains(&id), "{id} died twice");
                deaths.push(id);
            }
        }
        if outcome.is_finished() {
            break;
        }
    }

    let mut corpse = baseline().with_current_health(0.0);
    let before = corpse.clone();
    let outcome = corpse.apply_damage(40.0, 0.0025);
    assert!(!outcome.killed);
    assert_eq!(outcome.dealt, 0.0);
    assert_eq!(corpse, before);
}

#[test]
fn test_modifiers_restore_every_stat() {
    let multipliers = [0.05, 0.3, 0.8, 1.0, 1.2, 2.5, 4.99, 5.0];
    let mut rng = PcgRng::new(1);
    for stat in StatKind::ALL {
        for multiplier in multipliers {
            let mut target = StatBlock::new(100.0, 47.3, 52.9, 61.7).expect("valid stats");
            let before = target.stat(stat);

            let modifier = StatModifier::new(Some(stat), multiplier, 5.0).expect("valid modifier");
            let mut effect = if multiplier >= 1.0 {
                Effect::buff(CombatantId(0), modifier)
            } else {
                Effect::debuff(CombatantId(0), modifier)
            };
            let report = effect.on_apply(&source(), &mut target, &mut rng);
            assert_eq!(report.stat, Some(stat));
            assert!((target.stat(stat) - before * multiplier).abs() < TOLERANCE);

            let tick = effect.on_tick(&mut target, 5.0);
            assert!(tick.expired);
            assert_eq!(tick.reverted, Some(stat));
            assert!(
                (target.stat(stat) - before).abs() < TOLERANCE,
                "{stat} x{multiplier} drifted to {}",
                target.stat(stat)
            );
        }
    }
}

#[test]
fn test_over_time_totals_match_configured_magnitude() {
    let timings = [(7.0, 1.0), (7.0, 1.5), (5.0, 0.3), (2.5, 1.0), (1.0, 1.0)];
    for (duration, interval) in timings {
        let total = 38.25;

        let schedule = Periodic::new("damage_over_time", total, duration, interval, 0.0)
            .expect("valid timing");
        let per_tick = schedule.per_tick();
        let mut effect = Effect::damage_over_time(CombatantId(0), schedule);
        let mut target = StatBlock::new(10_000.0, 0.0, 0.0, 0.0).expect("valid stats");
        effect.on_apply(&source(), &mut target, &mut PcgRng::new(0));

        let mut dealt = 0.0;
        while !effect.is_expired() {
            dealt += effect.on_tick(&mut target, 0.1).amount;
        }
        assert!(
            (dealt - total).abs() <= per_tick,
            "{duration}/{interval}: dealt {dealt}"
        );

        let schedule =
            Periodic::new("heal_over_time", total, duration, interval, 0.0).expect("valid timing");
        let mut effect = Effect::heal_over_time(CombatantId(0), schedule);
        let mut target = StatBlock::new(10_000.0, 0.0, 0.0, 0.0)
            .expect("valid stats")
            .with_current_health(1.0);
        effect.on_apply(&source(), &mut target, &mut PcgRng::new(0));

        let mut healed = 0.0;
        while !effect.is_expired() {
            healed += effect.on_tick(&mut target, 0.1).amount;
        }
        assert!(
            (healed - total).abs() <= per_tick,
            "{duration}/{interval}: healed {healed}"
        );
    }
}

#[test]
fn test_fixed_seed_replays_identically() {
    let run = |seed: u64| {
        let mut sim = skirmish(seed);
        let mut log = Vec::new();
        for _ in 0..20_000 {
            let outcome = sim.advance(0.2);
            log.extend(sim.drain_events());
            if outcome.is_finished() {
                break;
            }
        }
        (sim.outcome(), log)
    };

    let (first_outcome, first_log) = run(42);
    let (second_outcome, second_log) = run(42);
    assert_eq!(first_outcome, second_outcome);
    assert_eq!(first_log, second_log);
    assert!(!first_log.is_empty());
}

#[test]
fn test_empty_roster_finishes_on_first_advance() {
    let mut sim = BattleSimulation::new(
        BattleConfig::default(),
        vec![spawn(0, Team::Player, baseline(), &[ActionSpec::Damage])],
        vec![],
        0,
    )
    .expect("valid battle");
    assert_eq!(sim.advance(0.016), BattleOutcome::Finished { winner: Team::Player });

    let mut sim = BattleSimulation::new(
        BattleConfig::default(),
        vec![],
        vec![spawn(1, Team::Enemy, baseline(), &[ActionSpec::Damage])],
        0,
    )
    .expect("valid battle");
    assert_eq!(sim.advance(0.016), BattleOutcome::Finished { winner: Team::Enemy });
}

#[test]
fn test_one_on_one_damage_duel() {
    let mut sim = BattleSimulation::new(
        BattleConfig::default(),
        vec![spawn(0, Team::Player, baseline(), &[ActionSpec::Damage])],
        vec![spawn(1, Team::Enemy, baseline(), &[ActionSpec::Damage])],
        7,
    )
    .expect("valid battle");

    let health = |sim: &BattleSimulation, id: u32| {
        sim.combatant(CombatantId(id))
            .map(|combatant| combatant.stats().current_health())
            .expect("combatant present")
    };

    // (50 × 0.01 + 25) × (1 − 50 × 0.0025) = 22.3125 per hit; both act at
    // t = 1 and then every 10 − 0.08 × 50 = 6 seconds, player first. At
    // t = 13 the enemy is already below the crit threshold when it swings.
    let expected = [(1, 77.6875, 77.6875), (7, 55.375, 55.375), (13, 10.75, 33.0625)];
    let mut second = 0;
    for (at, player, enemy) in expected {
        while second < at {
            assert_eq!(sim.advance(1.0), BattleOutcome::Running);
            second += 1;
        }
        assert!((health(&sim, 0) - player).abs() < TOLERANCE, "player at t={at}");
        assert!((health(&sim, 1) - enemy).abs() < TOLERANCE, "enemy at t={at}");
    }
    let events = sim.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        BattleEvent::ActionResolved { actor: CombatantId(1), critical: true, clock, .. }
            if (*clock - 13.0).abs() < TOLERANCE
    )));

    // At t = 19 the player crits too and the 44.625 hit is clamped to what
    // the enemy has left.
    while second < 19 {
        assert_eq!(sim.advance(1.0), BattleOutcome::Running);
        second += 1;
    }
    assert_eq!(health(&sim, 1), 0.0);
    assert!((health(&sim, 0) - 10.75).abs() < TOLERANCE);

    let events = sim.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        BattleEvent::ActionResolved { actor: CombatantId(0), critical: true, amount, .. }
            if (*amount - 33.0625).abs() < TOLERANCE
    )));
    assert!(events.iter().any(|event| matches!(
        event,
        BattleEvent::CombatantDied { id: CombatantId(1), killer: Some(CombatantId(0)), .. }
    )));

    assert_eq!(sim.advance(1.0), BattleOutcome::Finished { winner: Team::Player });
    assert!(sim.enemies().is_empty());
}

#[test]
fn test_random_stat_debuff_restores_only_the_chosen_stat() {
    let mut chosen = Vec::new();
    for seed in 0..32 {
        let mut rng = PcgRng::new(seed);
        let mut target = StatBlock::new(100.0, 47.3, 52.9, 61.7).expect("valid stats");
        let before = target.clone();

        let modifier = StatModifier::new(None, 0.8, 5.0).expect("valid modifier");
        let mut effect = Effect::debuff(CombatantId(3), modifier);
        let stat = effect
            .on_apply(&source(), &mut target, &mut rng)
            .stat
            .expect("debuff picks a stat");
        chosen.push(stat);

        for other in StatKind::ALL {
            let expected = if other == stat {
                before.stat(other) * 0.8
            } else {
                before.stat(other)
            };
            assert!((target.stat(other) - expected).abs() < TOLERANCE);
        }

        effect.on_tick(&mut target, 2.5);
        effect.on_tick(&mut target, 2.5);
        assert!(effect.is_expired());
        for other in StatKind::ALL {
            assert!((target.stat(other) - before.stat(other)).abs() < TOLERANCE);
        }
    }
    for stat in StatKind::ALL {
        assert!(chosen.contains(&stat), "{stat} never chosen");
    }
}

#[test]
fn test_large_step_fires_every_elapsed_interval() {
    let schedule = Periodic::new("damage_over_time", 35.0, 7.0, 1.0, 0.0).expect("valid timing");
    let mut effect = Effect::damage_over_time(CombatantId(0), schedule);
    let mut target = baseline();
    effect.on_apply(&source(), &mut target, &mut PcgRng::new(0));

    let report = effect.on_tick(&mut target, 3.0);
    assert_eq!(report.ticks, 3);
    assert!((report.amount - 15.0).abs() < TOLERANCE);

    let report = effect.on_tick(&mut target, 60.0);
    assert_eq!(report.ticks, 4);
    assert!(report.expired);
    assert!((target.current_health() - 65.0).abs() < TOLERANCE);

    // Same rule through the scheduler: one DoT, then a three-second step.
    let mut sim = BattleSimulation::new(
        BattleConfig::default(),
        vec![spawn(0, Team::Player, baseline(), &[ActionSpec::DamageOverTime])],
        vec![spawn(1, Team::Enemy, baseline(), &[])],
        0,
    )
    .expect("valid battle");
    sim.advance(1.0);
    sim.drain_events();
    sim.advance(3.0);

    let per_tick = ((25.5_f64 * 1.5 / 7.0) * 100.0).round() / 100.0;
    let ticks: Vec<(u32, f64)> = sim
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            BattleEvent::PeriodicTick { ticks, amount, .. } => Some((ticks, amount)),
            _ => None,
        })
        .collect();
    assert_eq!(ticks.len(), 1);
    assert_eq!(ticks[0].0, 3);
    assert!((ticks[0].1 - 3.0 * per_tick * 0.875).abs() < 1e-6);
}
