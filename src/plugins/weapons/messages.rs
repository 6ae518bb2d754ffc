//! Weapon-facing messages.
//!
//! Producers (input, AI, the session mediator) never touch `FireControl` directly.
//! They enqueue a [`TriggerSignal`] and the fire-control systems apply it on the
//! next fixed step.

use bevy::prelude::*;

use crate::common::team::Team;
use crate::plugins::projectiles::components::RicochetRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Pressed,
    Released,
    Reload,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerSignal {
    pub shooter: Entity,
    pub trigger: Trigger,
}

impl TriggerSignal {
    #[inline]
    pub fn pressed(shooter: Entity) -> Self {
        Self { shooter, trigger: Trigger::Pressed }
    }

    #[inline]
    pub fn released(shooter: Entity) -> Self {
        Self { shooter, trigger: Trigger::Released }
    }

    #[inline]
    pub fn reload(shooter: Entity) -> Self {
        Self { shooter, trigger: Trigger::Reload }
    }
}

/// Ammo pickup.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrantMagazines {
    pub target: Entity,
    pub amount: u32,
}

/// One shot that left the barrel and now needs a pooled projectile.
///
/// Written by fire control, consumed by the projectile allocator (the only
/// system that mutates a pool).
#[derive(Message, Debug, Clone, Copy)]
pub struct SpawnProjectileRequest {
    pub owner: Entity,
    pub team: Team,
    /// World-space muzzle pose. The projectile flies along its forward axis.
    pub pose: Transform,
    pub speed: f32,
    pub damage: f32,
    pub ricochet: RicochetRules,
}
