use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::test_utils::{advance_ticks, drain_messages, ensure_messages, run_system_once};
use crate::common::tunables::Tunables;
use crate::plugins::clock::{Scheduler, SimClock};
use crate::plugins::hud::StatusUpdate;
use crate::plugins::vitality::Incapacitated;
use crate::plugins::weapons::Loadouts;
use crate::plugins::weapons::profile::WeaponCatalog;

use super::{MovementForce, Player, PlayerInput, SlowBack};

fn player_world() -> World {
    let mut world = World::new();
    let tunables = Tunables::default();
    let catalog = WeaponCatalog::builtin().unwrap();
    world.insert_resource(Loadouts::resolve(&catalog, &tunables).unwrap());
    world.insert_resource(tunables);
    world.insert_resource(SimClock::from_hz(64.0));
    world.init_resource::<Scheduler<SlowBack>>();
    ensure_messages::<StatusUpdate>(&mut world);
    world
}

#[test]
fn spawn_creates_player_and_publishes_initial_status() {
    let mut world = player_world();
    run_system_once(&mut world, super::spawn);

    assert_eq!(world.query::<&Player>().iter(&world).count(), 1);
    assert_eq!(
        drain_messages::<StatusUpdate>(&mut world),
        vec![
            StatusUpdate::Ammo(30),
            StatusUpdate::Magazines(4),
            StatusUpdate::Health(100.0),
            StatusUpdate::Speed(8.0),
        ]
    );
    assert_eq!(world.resource::<Scheduler<SlowBack>>().len(), 1);
}

#[test]
fn apply_movement_scales_axis_by_force_and_yaw() {
    let mut world = World::new();
    world.insert_resource(PlayerInput { move_axis: Vec2::new(0.0, 1.0) });
    let player = world
        .spawn((
            Player,
            LinearVelocity::ZERO,
            Transform::from_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
            MovementForce::new(4.0, 1.0),
        ))
        .id();

    run_system_once(&mut world, super::apply_movement);

    // Facing -X after a quarter turn left.
    let v = world.get::<LinearVelocity>(player).unwrap().0;
    assert!(v.abs_diff_eq(Vec3::new(-4.0, 0.0, 0.0), 1e-5));
}

#[test]
fn incapacitated_player_does_not_move() {
    let mut world = World::new();
    world.insert_resource(PlayerInput { move_axis: Vec2::new(1.0, 0.0) });
    let player = world
        .spawn((Player, Incapacitated, LinearVelocity::ZERO, Transform::default(), MovementForce::new(4.0, 1.0)))
        .id();

    run_system_once(&mut world, super::apply_movement);
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec3::ZERO);
}

#[test]
fn movement_force_multiplies_and_decays_to_floor() {
    let mut force = MovementForce::new(8.0, 2.0);
    assert_eq!(force.multiply(1.5), 12.0);
    assert_eq!(force.slow_back(4.0), 8.0);
    assert_eq!(force.slow_back(100.0), 2.0);
    assert_eq!(force.slow_back(1.0), 2.0);
}

#[test]
fn slow_back_repeats_every_second_until_the_player_is_down() {
    let mut world = player_world();
    world.resource_mut::<Tunables>().movement_slow_back = 0.5;
    run_system_once(&mut world, super::spawn);
    drain_messages::<StatusUpdate>(&mut world);
    let player = world.query_filtered::<Entity, With<Player>>().single(&world).unwrap();

    for _ in 0..2 {
        advance_ticks(&mut world, 64);
        run_system_once(&mut world, super::run_slow_back);
    }
    assert_eq!(world.get::<MovementForce>(player).unwrap().current(), 7.0);
    assert_eq!(
        drain_messages::<StatusUpdate>(&mut world),
        vec![StatusUpdate::Speed(7.5), StatusUpdate::Speed(7.0)]
    );

    world.entity_mut(player).insert(Incapacitated);
    advance_ticks(&mut world, 64);
    run_system_once(&mut world, super::run_slow_back);
    assert_eq!(world.get::<MovementForce>(player).unwrap().current(), 7.0);
    assert!(world.resource::<Scheduler<SlowBack>>().is_empty());
}
