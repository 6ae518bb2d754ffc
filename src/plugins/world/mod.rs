//! World plugin: spawns the arena (floor, perimeter walls, cover pillars).
//!
//! Every arena piece is a static collider on `Layer::World`, so projectiles of
//! both teams ricochet off it. Geometry is collider-only here; meshes are
//! attached by the render-only lighting plugin.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};

pub const HALF_EXTENT: f32 = 20.0;
const WALL_HEIGHT: f32 = 4.0;
const THICKNESS: f32 = 0.5;

/// A box-shaped piece of static arena geometry with full extents `size`.
#[derive(Component, Debug, Clone, Copy)]
pub struct ArenaSurface {
    pub size: Vec3,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_arena);
}

#[inline]
pub fn world_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::World,
        [Layer::Player, Layer::Enemy, Layer::PlayerProjectile, Layer::EnemyProjectile],
    )
}

fn spawn_arena(mut commands: Commands) {
    let mut spawn_box = |name: &str, center: Vec3, size: Vec3| {
        commands.spawn((
            Name::new(name.to_owned()),
            ArenaSurface { size },
            Transform::from_translation(center),
            Visibility::default(),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            world_layers(),
            DespawnOnExit(GameState::InGame),
        ));
    };

    let span = HALF_EXTENT * 2.0 + THICKNESS * 2.0;
    let wall_y = WALL_HEIGHT * 0.5;
    let edge = HALF_EXTENT + THICKNESS * 0.5;

    spawn_box("Floor", Vec3::new(0.0, -THICKNESS * 0.5, 0.0), Vec3::new(span, THICKNESS, span));
    spawn_box("WallNorth", Vec3::new(0.0, wall_y, -edge), Vec3::new(span, WALL_HEIGHT, THICKNESS));
    spawn_box("WallSouth", Vec3::new(0.0, wall_y, edge), Vec3::new(span, WALL_HEIGHT, THICKNESS));
    spawn_box("WallWest", Vec3::new(-edge, wall_y, 0.0), Vec3::new(THICKNESS, WALL_HEIGHT, span));
    spawn_box("WallEast", Vec3::new(edge, wall_y, 0.0), Vec3::new(THICKNESS, WALL_HEIGHT, span));

    // Cover pillars, good for ricochets.
    [(-6.0, -6.0), (6.0, -6.0), (-6.0, 6.0), (6.0, 6.0)]
        .into_iter()
        .enumerate()
        .for_each(|(i, (x, z))| {
            spawn_box(
                &format!("Pillar{i}"),
                Vec3::new(x, WALL_HEIGHT * 0.5, z),
                Vec3::new(1.5, WALL_HEIGHT, 1.5),
            );
        });
}
