//! Weapon profiles: immutable ballistics + fire-control parameters per weapon kind.
//!
//! Profiles are loaded once from TOML and shared as `Arc<WeaponProfile>` by every
//! combatant carrying that weapon. Nothing mutates them at runtime.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;

use crate::common::error::ConfigError;
use crate::plugins::projectiles::components::RicochetRules;

/// Built-in weapon table.
pub const BUILTIN_WEAPONS: &str = include_str!("../../../assets/weapons.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireMode {
    /// One shot per trigger press.
    SinglePress,
    /// Shots repeat every `time_between_shots` while the trigger is held.
    HeldAutomatic,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeaponProfile {
    pub damage: f32,
    pub magazine_size: u32,
    pub magazines_unlimited: bool,
    #[serde(default)]
    pub magazines_start: u32,
    #[serde(default)]
    pub magazines_max: u32,
    pub time_between_shots: f32,
    pub reload_time: f32,
    pub fire_mode: FireMode,
    pub muzzle_force: f32,
    pub ricochet_enabled: bool,
    pub ricochet_damage_falloff: f32,
    pub ricochet_max_bounces: u32,
}

impl WeaponProfile {
    #[inline]
    pub fn shot_interval(&self) -> Duration {
        Duration::from_secs_f32(self.time_between_shots)
    }

    #[inline]
    pub fn reload_duration(&self) -> Duration {
        Duration::from_secs_f32(self.reload_time)
    }

    #[inline]
    pub fn ricochet(&self) -> RicochetRules {
        RicochetRules {
            enabled: self.ricochet_enabled,
            damage_falloff: self.ricochet_damage_falloff,
            max_bounces: self.ricochet_max_bounces,
        }
    }

    /// Projectiles to pre-spawn for one carrier: enough for two magazines' worth of
    /// sustained fire, kept within [10, 100].
    pub fn pool_warm_size(&self) -> usize {
        (self.magazine_size as f32 / self.time_between_shots * 2.0).clamp(10.0, 100.0) as usize
    }

    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let out_of_range = |field: &'static str, value: f64, range: &'static str| ConfigError::OutOfRange {
            weapon: name.to_owned(),
            field,
            value,
            range,
        };

        if !(self.time_between_shots > 0.0 && self.time_between_shots.is_finite()) {
            return Err(out_of_range("time_between_shots", self.time_between_shots as f64, "(0, inf)"));
        }
        if !(self.reload_time >= 0.0 && self.reload_time.is_finite()) {
            return Err(out_of_range("reload_time", self.reload_time as f64, "[0, inf)"));
        }
        if !(self.damage >= 0.0) {
            return Err(out_of_range("damage", self.damage as f64, "[0, inf)"));
        }
        if !(self.muzzle_force >= 0.0) {
            return Err(out_of_range("muzzle_force", self.muzzle_force as f64, "[0, inf)"));
        }
        if !(self.ricochet_damage_falloff > 0.0 && self.ricochet_damage_falloff <= 1.0) {
            return Err(out_of_range(
                "ricochet_damage_falloff",
                self.ricochet_damage_falloff as f64,
                "(0, 1]",
            ));
        }
        if !self.magazines_unlimited && self.magazines_start > self.magazines_max {
            return Err(out_of_range("magazines_start", self.magazines_start as f64, "[0, magazines_max]"));
        }
        Ok(())
    }
}

/// Every known weapon kind, validated.
#[derive(Resource, Debug, Clone)]
pub struct WeaponCatalog {
    profiles: BTreeMap<String, Arc<WeaponProfile>>,
}

impl WeaponCatalog {
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN_WEAPONS)
    }

    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, WeaponProfile> = toml::from_str(src)?;
        for (name, profile) in &raw {
            profile.validate(name)?;
        }
        Ok(Self {
            profiles: raw.into_iter().map(|(k, v)| (k, Arc::new(v))).collect(),
        })
    }

    pub fn get(&self, kind: &str) -> Result<Arc<WeaponProfile>, ConfigError> {
        self.profiles
            .get(kind)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownWeapon(kind.to_owned()))
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}
