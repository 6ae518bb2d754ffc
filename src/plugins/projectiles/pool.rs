//! Per-shooter projectile pools.
//!
//! Every armed combatant carries its own [`ProjectilePool`]. Projectiles are spawned
//! once (warm-up, or one at a time when a lease finds the free list empty) and are
//! never despawned while their owner lives.
//!
//! Pooled projectiles keep every physics component. "Disabled" means empty
//! collision filters, not a structural change.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, team::Team, tunables::Tunables};
use crate::plugins::weapons::fire_control::FireControl;

use super::components::{LastVelocity, PooledProjectile, Projectile, ProjectileState};

/// Free list of one shooter's projectiles. Most recently returned is reused first.
#[derive(Component, Debug, Default)]
pub struct ProjectilePool {
    free: Vec<Entity>,
    spawned: usize,
}

impl ProjectilePool {
    #[inline]
    pub fn pop_free(&mut self) -> Option<Entity> {
        self.free.pop()
    }

    #[inline]
    pub fn push_free(&mut self, projectile: Entity) {
        debug_assert!(!self.free.contains(&projectile), "projectile returned to its pool twice");
        self.free.push(projectile);
    }

    /// Record a freshly spawned projectile that goes straight into flight.
    #[inline]
    pub fn note_spawned(&mut self) {
        self.spawned += 1;
    }

    /// Record a freshly spawned projectile and park it in the free list.
    pub fn adopt(&mut self, projectile: Entity) {
        self.note_spawned();
        self.push_free(projectile);
    }

    #[inline]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Total projectiles this pool owns, free or in flight.
    #[inline]
    pub fn spawned(&self) -> usize {
        self.spawned
    }

    #[inline]
    pub fn in_flight(&self) -> usize {
        self.spawned - self.free.len()
    }
}

#[inline]
pub fn active_layers(team: Team) -> CollisionLayers {
    match team {
        Team::Player => CollisionLayers::new(Layer::PlayerProjectile, [Layer::World, Layer::Enemy]),
        Team::Enemy => CollisionLayers::new(Layer::EnemyProjectile, [Layer::World, Layer::Player, Layer::Enemy]),
    }
}

/// Collides with nothing, so pooled projectiles never raise collision events.
#[inline]
pub fn inactive_layers(team: Team) -> CollisionLayers {
    CollisionLayers::new(Layer::projectile(team), [] as [Layer; 0])
}

pub fn pooled_projectile(owner: Entity, team: Team, radius: f32) -> impl Bundle {
    (
        (
            Name::new("Projectile(Pooled)"),
            PooledProjectile,
            ProjectileState::Pooled,
            Projectile::pooled(owner, team),
            LastVelocity::default(),
            Transform::IDENTITY,
            Visibility::Hidden,
            DespawnOnExit(GameState::InGame),
        ),
        (
            RigidBody::Dynamic,
            Collider::sphere(radius),
            GravityScale(0.0),
            inactive_layers(team),
            Restitution::new(1.0).with_combine_rule(CoefficientCombine::Max),
            Friction::ZERO,
            LinearVelocity(Vec3::ZERO),
            SweptCcd::default(),
            CollisionEventsEnabled,
        ),
    )
}

/// Pre-spawn a pool for every newly armed shooter.
pub fn warm_projectile_pools(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut shooters: Query<(Entity, &FireControl, &mut ProjectilePool), Added<ProjectilePool>>,
) {
    for (owner, fire, mut pool) in &mut shooters {
        let size = fire.profile().pool_warm_size();
        for _ in 0..size {
            let projectile = commands
                .spawn(pooled_projectile(owner, fire.team(), tunables.projectile_radius))
                .id();
            pool.adopt(projectile);
        }
        debug!("{owner}: warmed projectile pool with {size}");
    }
}
