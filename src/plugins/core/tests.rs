use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::core;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert_eq!(app.world().resource::<Tunables>().fixed_hz, 64.0);
    assert!(app.world().get_resource::<ClearColor>().is_some());
}

#[test]
fn keeps_tunables_inserted_beforehand() {
    let mut app = App::new();
    app.insert_resource(Tunables { enemy_revive_secs: 0.5, ..default() });
    core::plugin(&mut app);
    assert_eq!(app.world().resource::<Tunables>().enemy_revive_secs, 0.5);
}
