//! Combat mediator: session-level reactions to defeat signals.
//!
//! ```text
//!   EnemyDefeated ──> hide + non-interacting + dormant, death effect,
//!                     score += 1, player movement force *= multiplier,
//!                     schedule Revive ──(enemy_revive_secs)──> reset + re-enable
//!   GameOver      ──> (once) stop play, incapacitate the player, publish final score
//! ```

use std::time::Duration;

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::clock::{FixedSet, ResolveSet, Scheduler, SimClock};
use crate::plugins::enemies::{Enemy, EnemyLifeState, enemy_layers, non_interacting_layers};
use crate::plugins::hud::StatusUpdate;
use crate::plugins::player::{MovementForce, Player};
use crate::plugins::vitality::{EnemyDefeated, GameOver, Incapacitated, Regenerate, Vitality};
use crate::plugins::weapons::fire_control::{FireControl, WeaponTask};

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    playing: bool,
    score: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self { playing: true, score: 0 }
    }
}

impl Session {
    #[inline]
    pub fn playing(&self) -> bool {
        self.playing
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }
}

/// Bring a dormant enemy back and clear its death effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revive {
    pub enemy: Entity,
    pub effect: Entity,
}

/// Transient marker left where an enemy went down.
#[derive(Component, Debug, Clone, Copy)]
pub struct DeathEffect;

pub fn plugin(app: &mut App) {
    app.init_resource::<Session>()
        .init_resource::<Scheduler<Revive>>()
        .add_systems(OnEnter(GameState::InGame), reset_session)
        .add_systems(FixedUpdate, run_revivals.in_set(FixedSet::Tasks))
        .add_systems(
            FixedPostUpdate,
            (handle_enemy_defeats, handle_game_over).chain().in_set(ResolveSet::Session),
        );
}

fn reset_session(mut commands: Commands) {
    commands.insert_resource(Session::default());
}

pub fn handle_enemy_defeats(
    mut commands: Commands,
    clock: Res<SimClock>,
    tunables: Res<Tunables>,
    mut session: ResMut<Session>,
    mut revivals: ResMut<Scheduler<Revive>>,
    mut weapon_tasks: ResMut<Scheduler<WeaponTask>>,
    mut defeats: MessageReader<EnemyDefeated>,
    mut enemies: Query<
        (&Transform, &mut Visibility, &mut CollisionLayers, &mut EnemyLifeState, &mut FireControl),
        With<Enemy>,
    >,
    mut players: Query<&mut MovementForce, With<Player>>,
    mut status: MessageWriter<StatusUpdate>,
) {
    for EnemyDefeated { enemy } in defeats.read().copied() {
        let Ok((tf, mut vis, mut layers, mut life, mut fire)) = enemies.get_mut(enemy) else {
            continue;
        };
        if *life == EnemyLifeState::Dormant {
            continue;
        }

        *life = EnemyLifeState::Dormant;
        *vis = Visibility::Hidden;
        *layers = non_interacting_layers();
        fire.release(&mut weapon_tasks);
        commands.entity(enemy).insert(Incapacitated);

        let effect = commands
            .spawn((
                Name::new("DeathEffect"),
                DeathEffect,
                Transform::from_translation(tf.translation),
                Visibility::Visible,
                DespawnOnExit(GameState::InGame),
            ))
            .id();
        revivals.schedule_after(
            &clock,
            Duration::from_secs_f32(tunables.enemy_revive_secs),
            Revive { enemy, effect },
        );

        if !session.playing {
            continue;
        }
        session.score += 1;
        status.write(StatusUpdate::Score(session.score));
        info!("{enemy} defeated, score {}", session.score);

        for mut force in &mut players {
            let speed = force.multiply(tunables.defeat_speed_multiplier);
            status.write(StatusUpdate::Speed(speed));
        }
    }
}

pub fn handle_game_over(
    mut commands: Commands,
    mut session: ResMut<Session>,
    mut weapon_tasks: ResMut<Scheduler<WeaponTask>>,
    mut overs: MessageReader<GameOver>,
    mut players: Query<(&mut FireControl, &mut LinearVelocity), With<Player>>,
    mut status: MessageWriter<StatusUpdate>,
) {
    for GameOver { player } in overs.read().copied() {
        if !session.playing {
            continue;
        }
        session.playing = false;

        if let Ok((mut fire, mut vel)) = players.get_mut(player) {
            fire.release(&mut weapon_tasks);
            vel.0 = Vec3::ZERO;
            commands.entity(player).insert(Incapacitated);
        }

        info!("Game over, final score {}", session.score);
        status.write(StatusUpdate::SessionOver { score: session.score });
    }
}

pub fn run_revivals(
    mut commands: Commands,
    clock: Res<SimClock>,
    mut revivals: ResMut<Scheduler<Revive>>,
    mut regen_tasks: ResMut<Scheduler<Regenerate>>,
    mut enemies: Query<(&mut Visibility, &mut CollisionLayers, &mut EnemyLifeState, &mut Vitality), With<Enemy>>,
    effects: Query<(), With<DeathEffect>>,
) {
    while let Some((_, Revive { enemy, effect })) = revivals.pop_due(clock.now()) {
        if effects.contains(effect) {
            commands.entity(effect).despawn();
        }
        let Ok((mut vis, mut layers, mut life, mut vitality)) = enemies.get_mut(enemy) else {
            continue;
        };

        vitality.reset_health(&mut regen_tasks);
        *life = EnemyLifeState::Alive;
        *vis = Visibility::Visible;
        *layers = enemy_layers();
        commands.entity(enemy).remove::<Incapacitated>();
        debug!("{enemy} revived");
    }
}
