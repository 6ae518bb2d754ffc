//! Flight bookkeeping on the fixed step: lifetime expiry and pre-physics velocity capture.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::plugins::clock::{Scheduler, SimClock};

use super::components::{LastVelocity, PooledProjectile, Projectile, ProjectileState};

/// Forced return of one flight once its lifetime runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileExpiry {
    pub projectile: Entity,
    pub flight: u32,
}

pub fn expire_projectiles(
    clock: Res<SimClock>,
    mut expiries: ResMut<Scheduler<ProjectileExpiry>>,
    mut projectiles: Query<(&Projectile, &mut ProjectileState), With<PooledProjectile>>,
) {
    while let Some((_, expiry)) = expiries.pop_due(clock.now()) {
        let Ok((projectile, mut state)) = projectiles.get_mut(expiry.projectile) else {
            continue;
        };
        // Stale: the projectile came back and was relaunched since.
        if projectile.flight != expiry.flight || *state != ProjectileState::Active {
            continue;
        }
        *state = ProjectileState::PendingReturn;
    }
}

pub fn record_last_velocity(
    mut projectiles: Query<(&ProjectileState, &LinearVelocity, &mut LastVelocity), With<PooledProjectile>>,
) {
    for (state, velocity, mut last) in &mut projectiles {
        if *state == ProjectileState::Active {
            last.0 = velocity.0;
        }
    }
}
