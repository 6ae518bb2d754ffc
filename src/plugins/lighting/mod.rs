//! Lighting and visuals (render-only).
//!
//! Gameplay entities are spawned without meshes so they work headless. This
//! plugin lights the arena and attaches meshes as those entities appear.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::enemies::Enemy;
use crate::plugins::projectiles::components::PooledProjectile;
use crate::plugins::session::DeathEffect;
use crate::plugins::world::ArenaSurface;

/// Shared material handles, created once.
#[derive(Resource)]
struct Palette {
    surface: Handle<StandardMaterial>,
    enemy: Handle<StandardMaterial>,
    projectile: Handle<StandardMaterial>,
    effect: Handle<StandardMaterial>,
    projectile_mesh: Handle<Mesh>,
    effect_mesh: Handle<Mesh>,
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, load_palette)
        .add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(Update, decorate);
}

fn load_palette(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(Palette {
        surface: materials.add(Color::srgb(0.25, 0.27, 0.33)),
        enemy: materials.add(Color::srgb(0.85, 0.25, 0.2)),
        projectile: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.85, 0.3),
            emissive: LinearRgba::rgb(4.0, 3.0, 1.0),
            ..default()
        }),
        effect: materials.add(Color::srgba(1.0, 0.5, 0.2, 0.6)),
        projectile_mesh: meshes.add(Sphere::new(tunables.projectile_radius)),
        effect_mesh: meshes.add(Sphere::new(0.6)),
    });
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 20.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
        DespawnOnExit(GameState::InGame),
    ));
}

#[allow(clippy::type_complexity)]
fn decorate(
    mut commands: Commands,
    palette: Res<Palette>,
    mut meshes: ResMut<Assets<Mesh>>,
    q_surfaces: Query<(Entity, &ArenaSurface), Added<ArenaSurface>>,
    q_enemies: Query<Entity, Added<Enemy>>,
    q_projectiles: Query<Entity, Added<PooledProjectile>>,
    q_effects: Query<Entity, Added<DeathEffect>>,
) {
    for (e, surface) in &q_surfaces {
        let mesh = meshes.add(Cuboid::from_size(surface.size));
        commands
            .entity(e)
            .insert((Mesh3d(mesh), MeshMaterial3d(palette.surface.clone())));
    }
    for e in &q_enemies {
        let mesh = meshes.add(Capsule3d::new(0.5, 1.0));
        commands
            .entity(e)
            .insert((Mesh3d(mesh), MeshMaterial3d(palette.enemy.clone())));
    }
    for e in &q_projectiles {
        commands.entity(e).insert((
            Mesh3d(palette.projectile_mesh.clone()),
            MeshMaterial3d(palette.projectile.clone()),
        ));
    }
    for e in &q_effects {
        commands
            .entity(e)
            .insert((Mesh3d(palette.effect_mesh.clone()), MeshMaterial3d(palette.effect.clone())));
    }
}
