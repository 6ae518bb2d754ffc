//! Enemies plugin: stationary sentries with vitality and a weapon.
//!
//! Enemies are never despawned during a session. A defeated enemy goes
//! [`EnemyLifeState::Dormant`] (hidden, non-interacting, incapacitated) and the
//! session mediator revives it after a delay, the same recycle-don't-destroy
//! approach the projectile pools use.
//!
//! There is no decision-making here; sentries fire only when something sends
//! them a `TriggerSignal`.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, team::Team, tunables::Tunables};
use crate::plugins::projectiles::pool::ProjectilePool;
use crate::plugins::vitality::Vitality;
use crate::plugins::weapons::fire_control::FireControl;
use crate::plugins::weapons::{Loadouts, Muzzle};

const SENTRY_POSTS: [Vec3; 4] = [
    Vec3::new(-12.0, 1.0, -14.0),
    Vec3::new(12.0, 1.0, -14.0),
    Vec3::new(0.0, 1.0, -8.0),
    Vec3::new(-14.0, 1.0, 0.0),
];
const MUZZLE_OFFSET: Vec3 = Vec3::new(0.0, 0.5, -0.7);

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy;

/// Enemy lifecycle.
///
/// - Alive: visible, collidable, can fire.
/// - Dormant: defeated and waiting for revival.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyLifeState {
    #[default]
    Alive,
    Dormant,
}

#[inline]
pub fn enemy_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::Enemy,
        [Layer::World, Layer::Player, Layer::PlayerProjectile, Layer::EnemyProjectile],
    )
}

/// Dormant enemies stay in the world but collide with nothing.
#[inline]
pub fn non_interacting_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [] as [Layer; 0])
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_enemies);
}

fn spawn_enemies(mut commands: Commands, tunables: Res<Tunables>, loadouts: Res<Loadouts>) {
    for (i, post) in SENTRY_POSTS.into_iter().enumerate() {
        commands.spawn((
            (
                Name::new(format!("Sentry{i}")),
                Enemy,
                EnemyLifeState::Alive,
                Transform::from_translation(post).looking_at(Vec3::new(0.0, post.y, 0.0), Vec3::Y),
                Visibility::Visible,
                DespawnOnExit(GameState::InGame),
            ),
            (RigidBody::Static, Collider::capsule(0.5, 1.0), enemy_layers()),
            (
                Vitality::new(Team::Enemy, &tunables.enemy_health),
                FireControl::new(loadouts.enemy.clone(), Team::Enemy),
                ProjectilePool::default(),
                Muzzle::new(MUZZLE_OFFSET),
            ),
        ));
    }
    debug!("Spawned {} sentries", SENTRY_POSTS.len());
}
