//! Tunable gameplay constants.

use bevy::prelude::*;

/// Health pool and regeneration settings for one kind of combatant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthTuning {
    pub max_health: f32,
    /// Health restored per regeneration tick (one tick per second).
    pub regen_rate: f32,
    /// Seconds after the last hit before regeneration starts.
    pub regen_delay_secs: f32,
}

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    /// Simulation ticks per second.
    pub fixed_hz: f64,
    pub length_unit: f32,

    pub player_weapon: String,
    pub enemy_weapon: String,
    pub player_health: HealthTuning,
    pub enemy_health: HealthTuning,

    pub movement_force: f32,
    /// Force lost every second while the session runs.
    pub movement_slow_back: f32,
    pub movement_force_floor: f32,
    pub defeat_speed_multiplier: f32,
    pub enemy_revive_secs: f32,

    pub projectile_lifetime_secs: f32,
    pub projectile_radius: f32,
    /// Muzzle position relative to the shooter's origin.
    pub muzzle_offset: Vec3,
    pub mouse_sensitivity: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            fixed_hz: 64.0,
            length_unit: 1.0,
            player_weapon: "rifle".into(),
            enemy_weapon: "sentry".into(),
            player_health: HealthTuning { max_health: 100.0, regen_rate: 5.0, regen_delay_secs: 2.0 },
            enemy_health: HealthTuning { max_health: 40.0, regen_rate: 2.0, regen_delay_secs: 3.0 },
            movement_force: 8.0,
            movement_slow_back: 0.05,
            movement_force_floor: 2.0,
            defeat_speed_multiplier: 1.1,
            enemy_revive_secs: 2.0,
            projectile_lifetime_secs: 5.0,
            projectile_radius: 0.05,
            muzzle_offset: Vec3::new(0.25, 0.6, -0.7),
            mouse_sensitivity: 0.002,
        }
    }
}
