use bevy::prelude::*;

use crate::common::team::Team;

/// Marker for every pool-owned projectile entity, active or not.
#[derive(Component, Debug, Clone, Copy)]
pub struct PooledProjectile;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileState {
    /// Sitting in its pool's free list: hidden, still, colliding with nothing.
    #[default]
    Pooled,
    Active,
    /// Flight is over; the commit system will return it this step.
    PendingReturn,
}

/// Per-weapon ricochet settings copied into each flight.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RicochetRules {
    pub enabled: bool,
    /// Damage multiplier applied per bounce, in (0, 1].
    pub damage_falloff: f32,
    pub max_bounces: u32,
}

/// Velocity captured before the physics step. Collision response has already
/// altered `LinearVelocity` by the time an impact is resolved.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct LastVelocity(pub Vec3);

/// Result of one collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Impact {
    /// Struck a hostile combatant: deal `damage` and end the flight.
    Hit { damage: f32 },
    /// Bounced off; keep flying with `velocity`.
    Ricochet { velocity: Vec3 },
    /// Out of bounces (or ricochet disabled); end the flight.
    Spent,
}

#[derive(Component, Debug, Clone)]
pub struct Projectile {
    /// Shooter whose pool owns this projectile.
    pub owner: Entity,
    pub team: Team,
    pub damage: f32,
    pub bounces_left: u32,
    pub ricochet: RicochetRules,
    /// Incremented on every launch. Lifetime tasks carry the flight they were armed
    /// for, so a task from an earlier flight never ends a later one.
    pub flight: u32,
}

impl Projectile {
    pub fn pooled(owner: Entity, team: Team) -> Self {
        Self {
            owner,
            team,
            damage: 0.0,
            bounces_left: 0,
            ricochet: RicochetRules::default(),
            flight: 0,
        }
    }

    /// Reset damage and ricochet budget for a new flight.
    pub fn launch(&mut self, damage: f32, ricochet: RicochetRules) -> u32 {
        self.damage = damage;
        self.ricochet = ricochet;
        self.bounces_left = ricochet.max_bounces;
        self.flight = self.flight.wrapping_add(1);
        self.flight
    }

    /// Resolve one collision.
    ///
    /// A hostile target always takes the hit, whatever the remaining ricochet
    /// budget. Otherwise the projectile bounces while it has budget left: the
    /// pre-impact velocity is reflected about `normal` keeping its speed, the
    /// budget drops by one and damage is scaled by the falloff.
    pub fn impact(&mut self, last_velocity: Vec3, normal: Vec3, hostile: bool) -> Impact {
        if hostile {
            return Impact::Hit { damage: self.damage };
        }
        if !self.ricochet.enabled || self.bounces_left == 0 {
            return Impact::Spent;
        }

        let speed = last_velocity.length().max(0.0);
        let dir = last_velocity.normalize_or_zero();
        let n = normal.normalize_or_zero();
        let reflected = dir - 2.0 * dir.dot(n) * n;

        self.bounces_left -= 1;
        self.damage *= self.ricochet.damage_falloff;
        Impact::Ricochet { velocity: reflected * speed }
    }
}
