//! Feature plugins.

use bevy::prelude::*;

pub mod clock;
pub mod core;
pub mod enemies;
pub mod hud;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod session;
pub mod vitality;
pub mod weapons;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
///
/// `core` goes first: later plugins read `Tunables` while building.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    clock::plugin(app);
    physics::plugin(app);
    hud::plugin(app);
    weapons::plugin(app);
    projectiles::plugin(app);
    vitality::plugin(app);
    session::plugin(app);
    world::plugin(app);
    player::plugin(app);
    enemies::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
