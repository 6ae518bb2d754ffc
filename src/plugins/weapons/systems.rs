//! Fire-control systems.
//!
//! ```text
//!   FixedSet::Signals  apply_trigger_signals, apply_magazine_grants
//!   FixedSet::Tasks    run_weapon_tasks (cooldown / reload / held fire)
//!                         │
//!                         v  SpawnProjectileRequest
//!   FixedSet::Allocate projectiles::allocate_projectiles
//! ```
//!
//! Only the player's weapon publishes HUD status.

use bevy::prelude::*;

use crate::plugins::clock::{Scheduler, SimClock};
use crate::plugins::hud::StatusUpdate;
use crate::plugins::vitality::Incapacitated;

use super::Muzzle;
use super::fire_control::{FireControl, ReloadOutcome, ShotOutcome, WeaponTask};
use super::messages::{GrantMagazines, SpawnProjectileRequest, Trigger, TriggerSignal};

/// Turn a fired shot into a projectile request (and an ammo readout for the player).
fn dispatch_shot(
    owner: Entity,
    fire: &FireControl,
    shooter_tf: &Transform,
    muzzle: &Muzzle,
    outcome: ShotOutcome,
    spawns: &mut MessageWriter<SpawnProjectileRequest>,
    status: &mut MessageWriter<StatusUpdate>,
) {
    let ShotOutcome::Fired { bullets_left } = outcome else {
        debug!("{owner}: shot -> {outcome:?}");
        return;
    };

    let profile = fire.profile();
    spawns.write(SpawnProjectileRequest {
        owner,
        team: fire.team(),
        pose: muzzle.world_pose(shooter_tf),
        speed: profile.muzzle_force,
        damage: profile.damage,
        ricochet: profile.ricochet(),
    });

    if fire.team().is_player() {
        status.write(StatusUpdate::Ammo(bullets_left));
    }
}

fn publish_reload(fire: &FireControl, outcome: ReloadOutcome, status: &mut MessageWriter<StatusUpdate>) {
    if !fire.team().is_player() {
        return;
    }
    match outcome {
        ReloadOutcome::Started { .. } => {
            status.write(StatusUpdate::Reloading);
        }
        ReloadOutcome::Finished { bullets_left, magazines_left } => {
            status.write(StatusUpdate::Ammo(bullets_left));
            status.write(StatusUpdate::Magazines(magazines_left));
        }
        ReloadOutcome::Ignored(_) => {}
    }
}

pub fn apply_trigger_signals(
    clock: Res<SimClock>,
    mut tasks: ResMut<Scheduler<WeaponTask>>,
    mut signals: MessageReader<TriggerSignal>,
    mut shooters: Query<(&mut FireControl, &Transform, &Muzzle), Without<Incapacitated>>,
    mut spawns: MessageWriter<SpawnProjectileRequest>,
    mut status: MessageWriter<StatusUpdate>,
) {
    for signal in signals.read() {
        let Ok((mut fire, tf, muzzle)) = shooters.get_mut(signal.shooter) else {
            // Incapacitated or unarmed shooters ignore their trigger.
            continue;
        };

        match signal.trigger {
            Trigger::Pressed => {
                let outcome = fire.press(signal.shooter, &clock, &mut tasks);
                dispatch_shot(signal.shooter, &fire, tf, muzzle, outcome, &mut spawns, &mut status);
            }
            Trigger::Released => {
                fire.release(&mut tasks);
            }
            Trigger::Reload => {
                let outcome = fire.reload(signal.shooter, &clock, &mut tasks);
                debug!("{}: reload -> {outcome:?}", signal.shooter);
                publish_reload(&fire, outcome, &mut status);
            }
        }
    }
}

pub fn apply_magazine_grants(
    mut grants: MessageReader<GrantMagazines>,
    mut shooters: Query<&mut FireControl>,
    mut status: MessageWriter<StatusUpdate>,
) {
    for grant in grants.read() {
        let Ok(mut fire) = shooters.get_mut(grant.target) else {
            continue;
        };
        let magazines = fire.add_magazines(grant.amount);
        if fire.team().is_player() {
            status.write(StatusUpdate::Magazines(magazines));
        }
    }
}

/// Drain every weapon task due this tick.
pub fn run_weapon_tasks(
    clock: Res<SimClock>,
    mut tasks: ResMut<Scheduler<WeaponTask>>,
    mut shooters: Query<(&mut FireControl, &Transform, &Muzzle)>,
    mut spawns: MessageWriter<SpawnProjectileRequest>,
    mut status: MessageWriter<StatusUpdate>,
) {
    while let Some((handle, task)) = tasks.pop_due(clock.now()) {
        match task {
            WeaponTask::CooldownElapsed(owner) => {
                if let Ok((mut fire, _, _)) = shooters.get_mut(owner) {
                    fire.cooldown_elapsed(handle);
                }
            }
            WeaponTask::ReloadFinished(owner) => {
                let Ok((mut fire, _, _)) = shooters.get_mut(owner) else {
                    continue;
                };
                if let Some(outcome) = fire.reload_finished(handle) {
                    publish_reload(&fire, outcome, &mut status);
                }
            }
            WeaponTask::HeldFire(owner) => {
                let Ok((mut fire, tf, muzzle)) = shooters.get_mut(owner) else {
                    continue;
                };
                if let Some(outcome) = fire.held_fire_due(handle, owner, &clock, &mut tasks) {
                    dispatch_shot(owner, &fire, tf, muzzle, outcome, &mut spawns, &mut status);
                }
            }
        }
    }
}
