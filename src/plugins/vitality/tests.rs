use std::time::Duration;

use bevy::prelude::*;

use crate::common::team::Team;
use crate::common::test_utils::{advance_ticks, drain_messages, ensure_messages, run_system_once};
use crate::common::tunables::HealthTuning;
use crate::plugins::clock::{Scheduler, SimClock};
use crate::plugins::hud::StatusUpdate;

use super::components::{DamageOutcome, Regenerate, Vitality};
use super::messages::{DamageRequest, EnemyDefeated, GameOver, HealRequest};
use super::systems;

const PLAYER_TUNING: HealthTuning = HealthTuning { max_health: 100.0, regen_rate: 5.0, regen_delay_secs: 2.0 };

fn vitality_world() -> World {
    let mut world = World::new();
    world.insert_resource(SimClock::from_hz(64.0));
    world.init_resource::<Scheduler<Regenerate>>();
    ensure_messages::<DamageRequest>(&mut world);
    ensure_messages::<HealRequest>(&mut world);
    ensure_messages::<EnemyDefeated>(&mut world);
    ensure_messages::<GameOver>(&mut world);
    ensure_messages::<StatusUpdate>(&mut world);
    world
}

/// Advance `secs` of simulated time one tick at a time, running regeneration each tick.
fn run_for(world: &mut World, secs: f32) {
    let ticks = world.resource::<SimClock>().ticks_for(Duration::from_secs_f32(secs));
    for _ in 0..ticks {
        advance_ticks(world, 1);
        run_system_once(world, systems::run_regeneration);
    }
}

fn health_updates(world: &mut World) -> Vec<f32> {
    drain_messages::<StatusUpdate>(world)
        .into_iter()
        .filter_map(|u| match u {
            StatusUpdate::Health(h) => Some(h),
            _ => None,
        })
        .collect()
}

#[test]
fn damage_then_regenerates_in_steps_until_full() {
    let mut world = vitality_world();
    let player = world.spawn(Vitality::new(Team::Player, &PLAYER_TUNING)).id();

    world.write_message(DamageRequest { target: player, amount: 30.0, source: None });
    run_system_once(&mut world, systems::apply_damage_requests);
    assert_eq!(world.get::<Vitality>(player).unwrap().current(), 70.0);
    assert_eq!(health_updates(&mut world), vec![70.0]);

    run_for(&mut world, 1.9);
    assert_eq!(world.get::<Vitality>(player).unwrap().current(), 70.0, "nothing before the delay");

    run_for(&mut world, 0.1);
    assert_eq!(world.get::<Vitality>(player).unwrap().current(), 75.0);

    run_for(&mut world, 10.0);
    let v = world.get::<Vitality>(player).unwrap();
    assert_eq!(v.current(), 100.0);
    assert!(!v.regeneration_pending());
    assert_eq!(health_updates(&mut world), vec![75.0, 80.0, 85.0, 90.0, 95.0, 100.0]);
}

#[test]
fn new_damage_restarts_the_regeneration_delay() {
    let mut world = vitality_world();
    let player = world.spawn(Vitality::new(Team::Player, &PLAYER_TUNING)).id();

    world.write_message(DamageRequest { target: player, amount: 30.0, source: None });
    run_system_once(&mut world, systems::apply_damage_requests);
    run_for(&mut world, 1.5);

    world.write_message(DamageRequest { target: player, amount: 10.0, source: None });
    run_system_once(&mut world, systems::apply_damage_requests);
    assert_eq!(world.resource::<Scheduler<Regenerate>>().len(), 1, "one regeneration task per entity");

    run_for(&mut world, 1.5);
    assert_eq!(world.get::<Vitality>(player).unwrap().current(), 60.0);
    run_for(&mut world, 0.5);
    assert_eq!(world.get::<Vitality>(player).unwrap().current(), 65.0);
}

#[test]
fn lethal_damage_on_an_enemy_signals_defeat_once() {
    let mut world = vitality_world();
    let tuning = HealthTuning { max_health: 10.0, regen_rate: 1.0, regen_delay_secs: 1.0 };
    let enemy = world.spawn(Vitality::new(Team::Enemy, &tuning)).id();

    world.write_message(DamageRequest { target: enemy, amount: 15.0, source: None });
    world.write_message(DamageRequest { target: enemy, amount: 15.0, source: None });
    run_system_once(&mut world, systems::apply_damage_requests);

    let v = world.get::<Vitality>(enemy).unwrap();
    assert_eq!(v.current(), -5.0);
    assert!(!v.regeneration_pending());
    assert!(world.resource::<Scheduler<Regenerate>>().is_empty());
    assert_eq!(drain_messages::<EnemyDefeated>(&mut world), vec![EnemyDefeated { enemy }]);
    assert!(drain_messages::<GameOver>(&mut world).is_empty());
    assert!(drain_messages::<StatusUpdate>(&mut world).is_empty());
}

#[test]
fn lethal_damage_on_the_player_signals_game_over_without_publishing_negative_health() {
    let mut world = vitality_world();
    let player = world.spawn(Vitality::new(Team::Player, &PLAYER_TUNING)).id();

    world.write_message(DamageRequest { target: player, amount: 60.0, source: None });
    world.write_message(DamageRequest { target: player, amount: 60.0, source: None });
    run_system_once(&mut world, systems::apply_damage_requests);

    assert_eq!(drain_messages::<GameOver>(&mut world), vec![GameOver { player }]);
    assert_eq!(health_updates(&mut world), vec![40.0]);
}

#[test]
fn fatal_damage_cancels_pending_regeneration() {
    let mut world = vitality_world();
    let player = world.spawn(Vitality::new(Team::Player, &PLAYER_TUNING)).id();

    world.write_message(DamageRequest { target: player, amount: 50.0, source: None });
    run_system_once(&mut world, systems::apply_damage_requests);
    assert_eq!(world.resource::<Scheduler<Regenerate>>().len(), 1);

    world.write_message(DamageRequest { target: player, amount: 50.0, source: None });
    run_system_once(&mut world, systems::apply_damage_requests);
    assert!(world.resource::<Scheduler<Regenerate>>().is_empty());

    run_for(&mut world, 5.0);
    assert_eq!(world.get::<Vitality>(player).unwrap().current(), 0.0);
}

#[test]
fn heals_clamp_at_max_and_are_idempotent_there() {
    let mut world = vitality_world();
    let player = world.spawn(Vitality::new(Team::Player, &PLAYER_TUNING)).id();

    world.write_message(DamageRequest { target: player, amount: 20.0, source: None });
    run_system_once(&mut world, systems::apply_damage_requests);
    drain_messages::<StatusUpdate>(&mut world);

    for _ in 0..3 {
        world.write_message(HealRequest { target: player, amount: 15.0 });
    }
    run_system_once(&mut world, systems::apply_heal_requests);
    assert_eq!(health_updates(&mut world), vec![95.0, 100.0, 100.0]);

    // Pending regeneration finds nothing to do.
    run_for(&mut world, 3.0);
    assert!(health_updates(&mut world).is_empty());
}

#[test]
fn heals_on_a_downed_player_publish_nothing() {
    let mut world = vitality_world();
    let player = world.spawn(Vitality::new(Team::Player, &PLAYER_TUNING)).id();

    world.write_message(DamageRequest { target: player, amount: 105.0, source: None });
    run_system_once(&mut world, systems::apply_damage_requests);
    world.write_message(HealRequest { target: player, amount: 10.0 });
    run_system_once(&mut world, systems::apply_heal_requests);

    assert_eq!(world.get::<Vitality>(player).unwrap().current(), -5.0);
    assert!(health_updates(&mut world).is_empty());
}

#[test]
fn reset_restores_max_health_and_clears_regeneration() {
    let clock = SimClock::from_hz(64.0);
    let mut tasks = Scheduler::<Regenerate>::default();
    let owner = World::new().spawn_empty().id();
    let tuning = HealthTuning { max_health: 40.0, regen_rate: 2.0, regen_delay_secs: 3.0 };
    let mut v = Vitality::new(Team::Enemy, &tuning);

    assert_eq!(v.take_damage(owner, 10.0, &clock, &mut tasks), DamageOutcome::Survived { health: 30.0 });
    assert_eq!(v.take_damage(owner, 40.0, &clock, &mut tasks), DamageOutcome::Downed { health: -10.0 });
    assert_eq!(v.take_damage(owner, 5.0, &clock, &mut tasks), DamageOutcome::Ignored);
    assert_eq!(v.add_health(100.0), None, "heals do not revive");
    assert_eq!(v.current(), -10.0);

    assert_eq!(v.reset_health(&mut tasks), 40.0);
    assert!(!v.is_downed());
    assert!(tasks.is_empty());
}
