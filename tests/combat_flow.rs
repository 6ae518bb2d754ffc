//! End-to-end combat flows on the headless app.
//!
//! Physics contacts are not relied on: impacts and damage are injected as
//! messages, the rest of the pipeline (fire control, pools, vitality, session,
//! HUD) runs for real.

mod common;

use avian3d::prelude::LinearVelocity;
use bevy::prelude::*;

use ricochet_arena::plugins::enemies::EnemyLifeState;
use ricochet_arena::plugins::hud::{AmmoReadout, HudState};
use ricochet_arena::plugins::projectiles::components::{Projectile, ProjectileState};
use ricochet_arena::plugins::projectiles::messages::ProjectileImpact;
use ricochet_arena::plugins::projectiles::pool::ProjectilePool;
use ricochet_arena::plugins::session::Session;
use ricochet_arena::plugins::vitality::{DamageRequest, Incapacitated, Vitality};
use ricochet_arena::plugins::weapons::messages::TriggerSignal;

fn in_flight(app: &mut App, owner: Entity) -> Vec<Entity> {
    app.world_mut()
        .query::<(Entity, &Projectile, &ProjectileState)>()
        .iter(app.world())
        .filter(|(_, p, s)| p.owner == owner && **s == ProjectileState::Active)
        .map(|(e, ..)| e)
        .collect()
}

fn tap_trigger(app: &mut App, shooter: Entity) {
    app.world_mut().write_message(TriggerSignal::pressed(shooter));
    app.world_mut().write_message(TriggerSignal::released(shooter));
    app.update();
}

#[test]
fn trigger_tap_spends_one_round_and_launches_one_projectile() {
    let mut app = common::app_in_game();
    let player = common::player(&mut app);

    tap_trigger(&mut app, player);

    assert_eq!(app.world().resource::<HudState>().ammo, AmmoReadout::Count(29));
    let flying = in_flight(&mut app, player);
    assert_eq!(flying.len(), 1);
    let speed = app.world().get::<LinearVelocity>(flying[0]).unwrap().0.length();
    assert!((speed - 60.0).abs() < 1e-3, "rifle muzzle speed, got {speed}");

    // Held fire was cancelled by the release: no further shots.
    common::step(&mut app, 30);
    assert_eq!(app.world().resource::<HudState>().ammo, AmmoReadout::Count(29));
}

#[test]
fn hostile_impact_damages_the_enemy_and_recycles_the_projectile() {
    let mut app = common::app_in_game();
    let player = common::player(&mut app);
    let enemy = common::enemies(&mut app)[0];

    tap_trigger(&mut app, player);
    let projectile = in_flight(&mut app, player)[0];
    assert_eq!(app.world().get::<ProjectilePool>(player).unwrap().free_len(), 99);

    app.world_mut().write_message(ProjectileImpact { projectile, struck: enemy, normal: Vec3::Z });
    app.update();

    assert_eq!(app.world().get::<Vitality>(enemy).unwrap().current(), 28.0);
    assert_eq!(*app.world().get::<ProjectileState>(projectile).unwrap(), ProjectileState::Pooled);
    assert_eq!(app.world().get::<ProjectilePool>(player).unwrap().free_len(), 100);
}

#[test]
fn defeated_enemy_scores_then_revives() {
    let mut app = common::app_in_game();
    let enemy = common::enemies(&mut app)[0];

    app.world_mut().write_message(DamageRequest { target: enemy, amount: 100.0, source: None });
    app.update();

    assert_eq!(*app.world().get::<EnemyLifeState>(enemy).unwrap(), EnemyLifeState::Dormant);
    assert!(app.world().get::<Incapacitated>(enemy).is_some());
    let hud = app.world().resource::<HudState>();
    assert_eq!(hud.score, 1);
    assert!((hud.speed - 8.8).abs() < 1e-4);

    // Revive delay is 2 s (128 steps).
    common::step(&mut app, 130);
    assert_eq!(*app.world().get::<EnemyLifeState>(enemy).unwrap(), EnemyLifeState::Alive);
    assert!(app.world().get::<Incapacitated>(enemy).is_none());
    assert_eq!(app.world().get::<Vitality>(enemy).unwrap().current(), 40.0);
}

#[test]
fn player_damage_regenerates_after_the_delay() {
    let mut app = common::app_in_game();
    let player = common::player(&mut app);

    app.world_mut().write_message(DamageRequest { target: player, amount: 30.0, source: None });
    app.update();
    assert_eq!(app.world().resource::<HudState>().health, 70.0);

    common::step(&mut app, 130);
    assert_eq!(app.world().resource::<HudState>().health, 75.0);
}

#[test]
fn player_death_ends_the_session_once() {
    let mut app = common::app_in_game();
    let player = common::player(&mut app);

    app.world_mut().write_message(DamageRequest { target: player, amount: 500.0, source: None });
    app.update();

    assert!(!app.world().resource::<Session>().playing());
    assert!(app.world().get::<Incapacitated>(player).is_some());
    let hud = app.world().resource::<HudState>();
    assert_eq!(hud.final_score, Some(0));
    assert_eq!(hud.health, 100.0, "lethal health is never published");

    // Input is disabled for the rest of the session.
    tap_trigger(&mut app, player);
    assert_eq!(app.world().resource::<HudState>().ammo, AmmoReadout::Count(30));
    assert!(in_flight(&mut app, player).is_empty());
}
