//! Collision handling for projectiles.
//!
//! `gather_projectile_impacts` turns Avian `CollisionStart` events into
//! [`ProjectileImpact`] messages (one per projectile per step), and
//! `resolve_projectile_impacts` applies the hit / ricochet / spent rules.

use avian3d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::plugins::vitality::{DamageRequest, Vitality};

use super::components::{Impact, LastVelocity, PooledProjectile, Projectile, ProjectileState};
use super::messages::ProjectileImpact;

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget { collider: ev.collider1, body: ev.body1 },
        CollisionTarget { collider: ev.collider2, body: ev.body2 },
    )
}

/// Contact normal oriented against the incoming velocity.
///
/// Falls back to the reversed velocity when the narrow phase has no manifold for
/// the pair (e.g. the contact was already lost by the time we look).
fn contact_normal(collisions: &Collisions, projectile: Entity, other: Entity, incoming: Vec3) -> Vec3 {
    let normal = collisions
        .get(projectile, other)
        .and_then(|pair| {
            let manifold = pair.manifolds.first()?;
            // Manifold normals point from collider1 to collider2.
            Some(if pair.collider1 == projectile { -manifold.normal } else { manifold.normal })
        })
        .unwrap_or(-incoming);

    let normal = normal.normalize_or_zero();
    if normal.dot(incoming) > 0.0 { -normal } else { normal }
}

pub fn gather_projectile_impacts(
    mut started: MessageReader<CollisionStart>,
    collisions: Collisions,
    projectiles: Query<(&ProjectileState, &LastVelocity), With<PooledProjectile>>,
    mut impacts: MessageWriter<ProjectileImpact>,
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let p1 = projectiles.contains(t1.collider);
        let p2 = projectiles.contains(t2.collider);
        // Projectile-on-projectile and non-projectile contacts are physics only.
        if !(p1 ^ p2) {
            continue;
        }
        let (projectile, other) = if p1 { (t1, t2) } else { (t2, t1) };

        if !seen.insert(projectile.collider) {
            continue;
        }

        let Ok((state, last)) = projectiles.get(projectile.collider) else {
            continue;
        };
        if *state != ProjectileState::Active {
            continue;
        }

        impacts.write(ProjectileImpact {
            projectile: projectile.collider,
            struck: other.gameplay_owner(),
            normal: contact_normal(&collisions, projectile.collider, other.collider, last.0),
        });
    }
}

pub fn resolve_projectile_impacts(
    mut impacts: MessageReader<ProjectileImpact>,
    mut projectiles: Query<
        (&mut Projectile, &mut ProjectileState, &LastVelocity, &mut LinearVelocity),
        With<PooledProjectile>,
    >,
    vitality: Query<&Vitality>,
    mut damage: MessageWriter<DamageRequest>,
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for impact in impacts.read() {
        if !seen.insert(impact.projectile) {
            continue;
        }
        let Ok((mut projectile, mut state, last, mut velocity)) = projectiles.get_mut(impact.projectile) else {
            continue;
        };
        if *state != ProjectileState::Active {
            continue;
        }

        // Anything without vitality, or on the same team, is just a surface.
        let hostile = vitality
            .get(impact.struck)
            .is_ok_and(|target| target.team() != projectile.team);

        match projectile.impact(last.0, impact.normal, hostile) {
            Impact::Hit { damage: amount } => {
                damage.write(DamageRequest {
                    target: impact.struck,
                    amount,
                    source: Some(projectile.owner),
                });
                *state = ProjectileState::PendingReturn;
            }
            Impact::Ricochet { velocity: v } => {
                velocity.0 = v;
            }
            Impact::Spent => {
                *state = ProjectileState::PendingReturn;
            }
        }
    }
}
