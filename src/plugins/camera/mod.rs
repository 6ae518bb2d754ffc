//! First-person camera (render-only).
//!
//! The camera is a child of the player, so yaw comes for free from the body's
//! transform. Pitch is copied from `Look` every frame.
//!
//! ```text
//! Added<Player>: attach MainCamera child at eye height
//! PostUpdate:    follow_pitch (before transform propagation)
//! ```

use bevy::prelude::*;

use crate::plugins::player::{Look, Player};

const EYE_HEIGHT: f32 = 0.7;

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(Update, attach_camera).add_systems(
        PostUpdate,
        follow_pitch.before(TransformSystems::Propagate),
    );
}

fn attach_camera(mut commands: Commands, q_new: Query<Entity, Added<Player>>) {
    for player in &q_new {
        commands.entity(player).with_child((
            Name::new("MainCamera"),
            MainCamera,
            Camera3d::default(),
            Transform::from_xyz(0.0, EYE_HEIGHT, 0.0),
        ));
    }
}

fn follow_pitch(
    q_player: Query<(&Look, &Children), (With<Player>, Changed<Look>)>,
    mut q_cam: Query<&mut Transform, With<MainCamera>>,
) {
    for (look, children) in &q_player {
        for child in children.iter() {
            if let Ok(mut tf) = q_cam.get_mut(child) {
                tf.rotation = Quat::from_rotation_x(look.pitch);
            }
        }
    }
}
