use bevy::prelude::*;

use super::*;
use crate::common::test_utils::run_system_once;

#[test]
fn folds_updates_in_order() {
    let mut world = World::new();
    world.init_resource::<Messages<StatusUpdate>>();
    world.init_resource::<HudState>();

    world.write_message(StatusUpdate::Ammo(30));
    world.write_message(StatusUpdate::Reloading);
    world.write_message(StatusUpdate::Magazines(3));
    world.write_message(StatusUpdate::Health(70.0));
    world.write_message(StatusUpdate::Score(2));

    run_system_once(&mut world, apply_status_updates);

    let hud = world.resource::<HudState>();
    assert_eq!(hud.ammo, AmmoReadout::Reloading);
    assert_eq!(hud.magazines, 3);
    assert_eq!(hud.health, 70.0);
    assert_eq!(hud.score, 2);
    assert_eq!(hud.final_score, None);
}

#[test]
fn session_over_records_final_score() {
    let mut world = World::new();
    world.init_resource::<Messages<StatusUpdate>>();
    world.init_resource::<HudState>();

    world.write_message(StatusUpdate::SessionOver { score: 4 });
    run_system_once(&mut world, apply_status_updates);

    assert_eq!(world.resource::<HudState>().final_score, Some(4));
}
