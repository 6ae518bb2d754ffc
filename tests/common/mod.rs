//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - `ricochet_arena::game::configure_headless` installs the gameplay plugins.
//! - Time advances by exactly one fixed step per `app.update()`.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::mesh::MeshPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use ricochet_arena::plugins::enemies::Enemy;
use ricochet_arena::plugins::player::Player;

pub const STEP: Duration = Duration::from_nanos(15_625_000); // 1/64 s

pub fn app_headless() -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so SceneSpawner exists.
    // MeshPlugin so avian's collider cache can read `AssetEvent<Mesh>`.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
        MeshPlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));

    ricochet_arena::game::configure_headless(&mut app);
    // `app.update()` is driven manually, so finalize plugins as `App::run` would.
    app.finish();
    app.cleanup();
    app
}

/// Headless app that has entered the game and spawned everything.
pub fn app_in_game() -> App {
    let mut app = app_headless();
    app.update();
    app
}

pub fn step(app: &mut App, updates: usize) {
    for _ in 0..updates {
        app.update();
    }
}

pub fn player(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Player>>()
        .single(app.world())
        .expect("exactly one player")
}

pub fn enemies(app: &mut App) -> Vec<Entity> {
    app.world_mut()
        .query_filtered::<Entity, With<Enemy>>()
        .iter(app.world())
        .collect()
}
