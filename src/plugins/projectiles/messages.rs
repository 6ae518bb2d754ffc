//! Impacts extracted from physics collision events.
//!
//! Splitting extraction from resolution keeps the ricochet / damage rules testable
//! without running the physics pipeline: tests write `ProjectileImpact` directly.

use bevy::prelude::*;

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileImpact {
    pub projectile: Entity,
    /// Gameplay owner of whatever was struck (rigid body if any, else the collider).
    pub struck: Entity,
    /// Contact normal pointing away from the struck surface, toward the projectile.
    pub normal: Vec3,
}
