//! Player plugin.
//!
//! Pipeline:
//! - Update: sample keyboard + mouse into `PlayerInput`, apply look, write trigger signals
//! - FixedUpdate: apply velocity to the kinematic body; decay movement force once a second
//!
//! Input resources are optional so the plugin also runs in headless apps.

use avian3d::prelude::*;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, team::Team, tunables::Tunables};
use crate::plugins::clock::{FixedSet, Scheduler, SimClock};
use crate::plugins::hud::StatusUpdate;
use crate::plugins::projectiles::pool::ProjectilePool;
use crate::plugins::vitality::{Incapacitated, Vitality};
use crate::plugins::weapons::fire_control::FireControl;
use crate::plugins::weapons::messages::TriggerSignal;
use crate::plugins::weapons::{Loadouts, Muzzle};

const PITCH_LIMIT: f32 = 1.45;
const SPAWN_POINT: Vec3 = Vec3::new(0.0, 1.0, 12.0);

#[derive(Component)]
pub struct Player;

/// First-person view angles. Yaw turns the body; pitch only tilts the muzzle
/// (and the camera, when rendering).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Look {
    pub yaw: f32,
    pub pitch: f32,
}

/// Locomotion strength. Grows when an enemy is defeated, bleeds away over time.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MovementForce {
    current: f32,
    floor: f32,
}

impl MovementForce {
    pub fn new(current: f32, floor: f32) -> Self {
        Self { current, floor }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn multiply(&mut self, factor: f32) -> f32 {
        self.current *= factor;
        self.current
    }

    /// Lose `amount`, never dropping below the floor.
    pub fn slow_back(&mut self, amount: f32) -> f32 {
        self.current = (self.current - amount).max(self.floor);
        self.current
    }
}

/// Once-a-second movement force decay for the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlowBack(pub Entity);

#[derive(Resource, Default, Debug)]
pub struct PlayerInput {
    pub move_axis: Vec2,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .init_resource::<Scheduler<SlowBack>>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            Update,
            (gather_input, apply_look, trigger_input).run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedUpdate,
            (
                run_slow_back.in_set(FixedSet::Tasks),
                apply_movement.in_set(FixedSet::Motion),
            ),
        );
}

fn spawn(
    mut commands: Commands,
    tunables: Res<Tunables>,
    loadouts: Res<Loadouts>,
    clock: Res<SimClock>,
    mut slow_back: ResMut<Scheduler<SlowBack>>,
    mut status: MessageWriter<StatusUpdate>,
) {
    let fire = FireControl::new(loadouts.player.clone(), Team::Player);
    let vitality = Vitality::new(Team::Player, &tunables.player_health);
    let force = MovementForce::new(tunables.movement_force, tunables.movement_force_floor);

    status.write_batch([
        StatusUpdate::Ammo(fire.bullets_left()),
        StatusUpdate::Magazines(fire.magazines_left()),
        StatusUpdate::Health(vitality.current()),
        StatusUpdate::Speed(force.current()),
    ]);

    let player = commands
        .spawn((
            (
                Name::new("Player"),
                Player,
                Look::default(),
                Transform::from_translation(SPAWN_POINT),
                Visibility::default(),
                DespawnOnExit(GameState::InGame),
            ),
            (
                RigidBody::Kinematic,
                Collider::capsule(0.4, 1.0),
                CollisionLayers::new(Layer::Player, [Layer::World, Layer::Enemy, Layer::EnemyProjectile]),
                LinearVelocity::ZERO,
            ),
            (
                force,
                vitality,
                fire,
                ProjectilePool::default(),
                Muzzle::new(tunables.muzzle_offset),
            ),
        ))
        .id();

    slow_back.schedule_after(&clock, std::time::Duration::from_secs(1), SlowBack(player));
    info!("Player spawned at {SPAWN_POINT}");
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    let Some(keys) = keys else {
        return;
    };
    let mut axis = Vec2::ZERO;

    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }

    input.move_axis = axis.normalize_or_zero();
}

fn apply_look(
    motion: Option<Res<AccumulatedMouseMotion>>,
    tunables: Res<Tunables>,
    mut q_player: Query<(&mut Look, &mut Transform, &mut Muzzle), (With<Player>, Without<Incapacitated>)>,
) {
    let Some(motion) = motion else {
        return;
    };
    let Ok((mut look, mut tf, mut muzzle)) = q_player.single_mut() else {
        return;
    };
    if motion.delta == Vec2::ZERO {
        return;
    }

    look.yaw -= motion.delta.x * tunables.mouse_sensitivity;
    look.pitch = (look.pitch - motion.delta.y * tunables.mouse_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);

    tf.rotation = Quat::from_rotation_y(look.yaw);
    muzzle.local.rotation = Quat::from_rotation_x(look.pitch);
}

fn trigger_input(
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    q_player: Query<Entity, (With<Player>, Without<Incapacitated>)>,
    mut signals: MessageWriter<TriggerSignal>,
) {
    let Ok(player) = q_player.single() else {
        return;
    };

    if let Some(mouse) = mouse {
        if mouse.just_pressed(MouseButton::Left) {
            signals.write(TriggerSignal::pressed(player));
        }
        if mouse.just_released(MouseButton::Left) {
            signals.write(TriggerSignal::released(player));
        }
    }
    if keys.is_some_and(|k| k.just_pressed(KeyCode::KeyR)) {
        signals.write(TriggerSignal::reload(player));
    }
}

fn apply_movement(
    input: Res<PlayerInput>,
    mut q_player: Query<(&mut LinearVelocity, &Transform, &MovementForce), (With<Player>, Without<Incapacitated>)>,
) {
    let Ok((mut vel, tf, force)) = q_player.single_mut() else {
        return;
    };
    // Screen-up on the move axis is the body's forward (-Z).
    let local = Vec3::new(input.move_axis.x, 0.0, -input.move_axis.y);
    vel.0 = tf.rotation * local * force.current();
}

pub fn run_slow_back(
    clock: Res<SimClock>,
    tunables: Res<Tunables>,
    mut tasks: ResMut<Scheduler<SlowBack>>,
    mut q_player: Query<&mut MovementForce, Without<Incapacitated>>,
    mut status: MessageWriter<StatusUpdate>,
) {
    while let Some((_, SlowBack(owner))) = tasks.pop_due(clock.now()) {
        // Stops for good once the player is down.
        let Ok(mut force) = q_player.get_mut(owner) else {
            continue;
        };
        let before = force.current();
        let now = force.slow_back(tunables.movement_slow_back);
        if now != before {
            status.write(StatusUpdate::Speed(now));
        }
        tasks.schedule_after(&clock, std::time::Duration::from_secs(1), SlowBack(owner));
    }
}

#[cfg(test)]
mod tests;
