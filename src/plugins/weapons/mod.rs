//! Weapons: profiles, fire control and shot dispatch.
//!
//! Data flow:
//! ```text
//!   input / AI ──TriggerSignal──> FireControl (ammo, cooldown, reload)
//!                                     │ ShotOutcome::Fired
//!                                     v
//!                          SpawnProjectileRequest ──> projectile pool
//! ```
//!
//! Weapon configuration is validated once while the plugin is built. A bad table
//! (unknown fire mode, out-of-range value, missing kind) aborts startup.

pub mod fire_control;
pub mod messages;
pub mod profile;
pub mod systems;

use std::sync::Arc;

use bevy::prelude::*;

use crate::common::error::ConfigError;
use crate::common::tunables::Tunables;
use crate::plugins::clock::{FixedSet, Scheduler};

use fire_control::WeaponTask;
use profile::{WeaponCatalog, WeaponProfile};

/// Where shots leave the shooter, relative to the shooter's transform.
#[derive(Component, Debug, Clone, Copy)]
pub struct Muzzle {
    pub local: Transform,
}

impl Muzzle {
    pub fn new(offset: Vec3) -> Self {
        Self { local: Transform::from_translation(offset) }
    }

    #[inline]
    pub fn world_pose(&self, shooter: &Transform) -> Transform {
        shooter.mul_transform(self.local)
    }
}

/// Profiles resolved for each side at startup.
#[derive(Resource, Debug, Clone)]
pub struct Loadouts {
    pub player: Arc<WeaponProfile>,
    pub enemy: Arc<WeaponProfile>,
}

impl Loadouts {
    pub fn resolve(catalog: &WeaponCatalog, tunables: &Tunables) -> Result<Self, ConfigError> {
        Ok(Self {
            player: catalog.get(&tunables.player_weapon)?,
            enemy: catalog.get(&tunables.enemy_weapon)?,
        })
    }
}

pub fn plugin(app: &mut App) {
    let catalog = WeaponCatalog::builtin().unwrap_or_else(|err| panic!("invalid weapon table: {err}"));
    let loadouts = Loadouts::resolve(&catalog, app.world().resource::<Tunables>())
        .unwrap_or_else(|err| panic!("invalid loadout: {err}"));
    info!(
        "Weapons loaded: [{}], player={} enemy={}",
        catalog.kinds().collect::<Vec<_>>().join(", "),
        app.world().resource::<Tunables>().player_weapon,
        app.world().resource::<Tunables>().enemy_weapon,
    );

    app.insert_resource(catalog)
        .insert_resource(loadouts)
        .init_resource::<Scheduler<WeaponTask>>()
        .add_message::<messages::TriggerSignal>()
        .add_message::<messages::GrantMagazines>()
        .add_message::<messages::SpawnProjectileRequest>();

    app.add_systems(
        FixedUpdate,
        (
            (systems::apply_trigger_signals, systems::apply_magazine_grants).in_set(FixedSet::Signals),
            systems::run_weapon_tasks.in_set(FixedSet::Tasks),
        ),
    );
}
