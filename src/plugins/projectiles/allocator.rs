//! Spawn consumer: lease projectiles from the shooter's pool and launch them.
//!
//! This is the only system that pops from a pool. An empty free list is not an
//! error: the pool grows by exactly one projectile for that request.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::clock::{Scheduler, SimClock};
use crate::plugins::weapons::messages::SpawnProjectileRequest;

use super::components::{LastVelocity, PooledProjectile, Projectile, ProjectileState};
use super::lifetime::ProjectileExpiry;
use super::pool::{ProjectilePool, active_layers, pooled_projectile};

pub fn allocate_projectiles(
    mut commands: Commands,
    clock: Res<SimClock>,
    tunables: Res<Tunables>,
    mut expiries: ResMut<Scheduler<ProjectileExpiry>>,
    mut requests: MessageReader<SpawnProjectileRequest>,
    mut pools: Query<&mut ProjectilePool>,
    projectiles: Query<&Projectile, With<PooledProjectile>>,
) {
    let lifetime = std::time::Duration::from_secs_f32(tunables.projectile_lifetime_secs);

    for req in requests.read() {
        let Ok(mut pool) = pools.get_mut(req.owner) else {
            warn!("{}: shot requested without a projectile pool", req.owner);
            continue;
        };

        let (entity, mut projectile) = match pool.pop_free() {
            // Warm-up spawns from this same step may not be visible to the query yet.
            Some(e) => (
                e,
                projectiles
                    .get(e)
                    .cloned()
                    .unwrap_or_else(|_| Projectile::pooled(req.owner, req.team)),
            ),
            None => {
                let e = commands
                    .spawn(pooled_projectile(req.owner, req.team, tunables.projectile_radius))
                    .id();
                pool.note_spawned();
                debug!("{}: projectile pool grew to {}", req.owner, pool.spawned());
                (e, Projectile::pooled(req.owner, req.team))
            }
        };

        let flight = projectile.launch(req.damage, req.ricochet);
        let velocity = *req.pose.forward() * req.speed;

        commands.entity(entity).insert((
            projectile,
            ProjectileState::Active,
            req.pose,
            LinearVelocity(velocity),
            LastVelocity(velocity),
            Visibility::Visible,
            active_layers(req.team),
        ));

        expiries.schedule_after(&clock, lifetime, ProjectileExpiry { projectile: entity, flight });
    }
}
