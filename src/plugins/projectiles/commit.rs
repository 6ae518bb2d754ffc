//! Return commit: recycle finished flights back into their owner's pool.
//!
//! This system owns the pooled invariants. A pooled projectile is:
//! - hidden
//! - at rest (zero velocity, identity pose)
//! - colliding with nothing (filters empty)
//!
//! Centralizing these writes here keeps every return path consistent.

use avian3d::prelude::*;
use bevy::prelude::*;

use super::components::{LastVelocity, PooledProjectile, Projectile, ProjectileState};
use super::pool::{ProjectilePool, inactive_layers};

pub fn return_to_pool_commit(
    mut commands: Commands,
    mut pools: Query<&mut ProjectilePool>,
    mut q: Query<
        (
            Entity,
            &Projectile,
            &mut ProjectileState,
            &mut Transform,
            &mut LinearVelocity,
            &mut LastVelocity,
            &mut Visibility,
            &mut CollisionLayers,
        ),
        With<PooledProjectile>,
    >,
) {
    for (e, projectile, mut state, mut tf, mut vel, mut last, mut vis, mut layers) in &mut q {
        if *state != ProjectileState::PendingReturn {
            continue;
        }

        let Ok(mut pool) = pools.get_mut(projectile.owner) else {
            // Owner is gone; nobody will lease this again.
            warn!("{e}: owner {} has no pool, despawning projectile", projectile.owner);
            commands.entity(e).despawn();
            continue;
        };

        *state = ProjectileState::Pooled;
        *tf = Transform::IDENTITY;
        vel.0 = Vec3::ZERO;
        last.0 = Vec3::ZERO;
        *vis = Visibility::Hidden;
        *layers = inactive_layers(projectile.team);

        pool.push_free(e);
    }
}
