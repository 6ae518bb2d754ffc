//! Projectiles: per-shooter pools, flight, ricochet and impact resolution.
//!
//! # Data flow
//! ```text
//!   FixedUpdate
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) FixedSet::Tasks     expire_projectiles                                │
//!│      - pops ProjectileExpiry tasks, Active -> PendingReturn (same flight)  │
//!│                                                                            │
//!│  (B) FixedSet::Allocate  warm_projectile_pools -> allocate_projectiles     │
//!│      - reads: SpawnProjectileRequest messages                              │
//!│      - mutates: ProjectilePool.free (pop, or grow by one)                  │
//!│      - writes: Projectile, state, pose, velocity, visibility, layers       │
//!│                                                                            │
//!│  (C) FixedSet::Motion    record_last_velocity                              │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedPostUpdate (after Avian collision events)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (D) ResolveSet::Impacts gather_projectile_impacts                         │
//!│                          -> resolve_projectile_impacts                     │
//!│      - hostile target: DamageRequest + PendingReturn                       │
//!│      - otherwise: ricochet (reflect last velocity) or PendingReturn        │
//!│                                                                            │
//!│  (E) ResolveSet::Commit  return_to_pool_commit                             │
//!│      - writes the pooled invariants, pushes back to the owner's pool       │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fire control never borrows a pool. It only writes `SpawnProjectileRequest`,
//! and the allocator is the single writer that pops from pools.

pub mod allocator;
pub mod collision;
pub mod commit;
pub mod components;
pub mod lifetime;
pub mod messages;
pub mod pool;

use bevy::prelude::*;

use crate::plugins::clock::{FixedSet, ResolveSet, Scheduler};

use lifetime::ProjectileExpiry;

pub fn plugin(app: &mut App) {
    app.init_resource::<Scheduler<ProjectileExpiry>>()
        .add_message::<messages::ProjectileImpact>();

    app.add_systems(
        FixedUpdate,
        (
            lifetime::expire_projectiles.in_set(FixedSet::Tasks),
            (pool::warm_projectile_pools, allocator::allocate_projectiles)
                .chain()
                .in_set(FixedSet::Allocate),
            lifetime::record_last_velocity.in_set(FixedSet::Motion),
        ),
    );

    app.add_systems(
        FixedPostUpdate,
        (
            (collision::gather_projectile_impacts, collision::resolve_projectile_impacts)
                .chain()
                .in_set(ResolveSet::Impacts),
            commit::return_to_pool_commit.in_set(ResolveSet::Commit),
        ),
    );
}
