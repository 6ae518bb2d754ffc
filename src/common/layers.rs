//! Collision layers.

use avian3d::prelude::*;

use super::team::Team;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    Player,
    Enemy,
    PlayerProjectile,
    EnemyProjectile,
}

impl Layer {
    /// Body layer a combatant of `team` lives on.
    #[inline]
    pub fn body(team: Team) -> Self {
        match team {
            Team::Player => Layer::Player,
            Team::Enemy => Layer::Enemy,
        }
    }

    /// Layer that projectiles fired by `team` live on.
    #[inline]
    pub fn projectile(team: Team) -> Self {
        match team {
            Team::Player => Layer::PlayerProjectile,
            Team::Enemy => Layer::EnemyProjectile,
        }
    }
}
