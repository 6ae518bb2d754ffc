//! Vitality: health, damage intake, delayed regeneration and defeat signalling.
//!
//! Shared by every combatant. Outcomes leave this module as messages:
//! ```text
//!   DamageRequest ──> Vitality::take_damage ──┬─ survived: restart regeneration
//!                                             ├─ enemy downed:  EnemyDefeated
//!                                             └─ player downed: GameOver
//! ```
//! Regeneration is a chain of [`Regenerate`] tasks: the first one fires after the
//! regeneration delay, then one per second until health is full.

pub mod components;
pub mod messages;
pub mod systems;

pub use components::{DamageOutcome, Incapacitated, Regenerate, Vitality};
pub use messages::{DamageRequest, EnemyDefeated, GameOver, HealRequest};

use bevy::prelude::*;

use crate::plugins::clock::{FixedSet, ResolveSet, Scheduler};

pub fn plugin(app: &mut App) {
    app.init_resource::<Scheduler<Regenerate>>()
        .add_message::<DamageRequest>()
        .add_message::<HealRequest>()
        .add_message::<EnemyDefeated>()
        .add_message::<GameOver>();

    app.add_systems(
        FixedUpdate,
        (
            systems::apply_heal_requests.in_set(FixedSet::Signals),
            systems::run_regeneration.in_set(FixedSet::Tasks),
        ),
    );
    app.add_systems(FixedPostUpdate, systems::apply_damage_requests.in_set(ResolveSet::Damage));
}

#[cfg(test)]
mod tests;
