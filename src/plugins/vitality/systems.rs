use bevy::prelude::*;

use crate::common::team::Team;
use crate::plugins::clock::{Scheduler, SimClock};
use crate::plugins::hud::StatusUpdate;

use super::components::{DamageOutcome, Regenerate, Vitality};
use super::messages::{DamageRequest, EnemyDefeated, GameOver, HealRequest};

pub fn apply_damage_requests(
    clock: Res<SimClock>,
    mut tasks: ResMut<Scheduler<Regenerate>>,
    mut requests: MessageReader<DamageRequest>,
    mut combatants: Query<&mut Vitality>,
    mut status: MessageWriter<StatusUpdate>,
    mut defeated: MessageWriter<EnemyDefeated>,
    mut game_over: MessageWriter<GameOver>,
) {
    for req in requests.read() {
        let Ok(mut vitality) = combatants.get_mut(req.target) else {
            continue;
        };

        match vitality.take_damage(req.target, req.amount, &clock, &mut tasks) {
            DamageOutcome::Survived { health } => {
                if vitality.team().is_player() {
                    status.write(StatusUpdate::Health(health));
                }
            }
            DamageOutcome::Downed { health } => match vitality.team() {
                Team::Enemy => {
                    debug!("{} defeated at {health} by {:?}", req.target, req.source);
                    defeated.write(EnemyDefeated { enemy: req.target });
                }
                Team::Player => {
                    info!("Player {} down, hit by {:?}", req.target, req.source);
                    game_over.write(GameOver { player: req.target });
                }
            },
            DamageOutcome::Ignored => {}
        }
    }
}

pub fn apply_heal_requests(
    mut requests: MessageReader<HealRequest>,
    mut combatants: Query<&mut Vitality>,
    mut status: MessageWriter<StatusUpdate>,
) {
    for req in requests.read() {
        let Ok(mut vitality) = combatants.get_mut(req.target) else {
            continue;
        };
        let Some(health) = vitality.add_health(req.amount) else {
            continue;
        };
        if vitality.team().is_player() {
            status.write(StatusUpdate::Health(health));
        }
    }
}

pub fn run_regeneration(
    clock: Res<SimClock>,
    mut tasks: ResMut<Scheduler<Regenerate>>,
    mut combatants: Query<&mut Vitality>,
    mut status: MessageWriter<StatusUpdate>,
) {
    while let Some((handle, Regenerate(owner))) = tasks.pop_due(clock.now()) {
        let Ok(mut vitality) = combatants.get_mut(owner) else {
            continue;
        };
        let Some(health) = vitality.regenerate(handle, owner, &clock, &mut tasks) else {
            continue;
        };
        if vitality.team().is_player() {
            status.write(StatusUpdate::Health(health));
        }
    }
}
