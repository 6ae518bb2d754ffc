//! Test helpers.
//!
//! Systems under test run through `World::run_system_once`; commands they queue are
//! applied by `world.flush()` before assertions.

use bevy::ecs::message::{Message, Messages};
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::plugins::clock::SimClock;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Create the message buffer for `M` if missing.
pub fn ensure_messages<M: Message>(world: &mut World) {
    if world.get_resource::<Messages<M>>().is_none() {
        world.init_resource::<Messages<M>>();
    }
}

/// Take every buffered `M`, oldest first.
pub fn drain_messages<M: Message>(world: &mut World) -> Vec<M> {
    ensure_messages::<M>(world);
    world.resource_mut::<Messages<M>>().drain().collect()
}

/// Advance the simulation clock by `ticks` without running any tasks.
pub fn advance_ticks(world: &mut World, ticks: u64) {
    let mut clock = world.resource_mut::<SimClock>();
    for _ in 0..ticks {
        clock.advance();
    }
}
