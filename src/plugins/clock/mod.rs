//! Simulation clock + cooperative task queue.
//!
//! Every "wait N seconds, then resume" behaviour in the combat core (shot cooldown,
//! reload, regeneration ticks, projectile lifetime, held fire, enemy revival) is a
//! task sitting in a [`Scheduler`]. Nothing sleeps and nothing runs on another thread:
//!
//! ```text
//!   FixedUpdate
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │ FixedSet::Clock    advance_clock          (SimClock.now += 1)  │
//!   │ FixedSet::Signals  input / heal / grant messages               │
//!   │ FixedSet::Tasks    each owner drains its Scheduler<T>          │
//!   │                    (pop_due in resume-tick order)              │
//!   │ FixedSet::Allocate projectile pool lease + activation          │
//!   │ FixedSet::Motion   movement, last-velocity capture             │
//!   └───────────────────────────────────────────────────────────────┘
//!   FixedPostUpdate (after physics collision events)
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │ ResolveSet::Impacts  collisions -> hit / ricochet / spent      │
//!   │ ResolveSet::Damage   vitality state machine                    │
//!   │ ResolveSet::Session  combat mediator (defeat / game over)      │
//!   │ ResolveSet::Commit   return projectiles to their pools         │
//!   └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! A task is keyed by `(resume tick, sequence)`, so tasks due on the same tick pop in
//! the order they were scheduled. Repeating tasks re-enqueue themselves from their
//! handler. A [`TaskHandle`] is the cancellation token: cancelling removes exactly
//! that entry.

use std::collections::BTreeMap;
use std::time::Duration;

use avian3d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};

/// One fixed simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tick(pub u64);

#[derive(Resource, Debug, Clone, Copy)]
pub struct SimClock {
    now: Tick,
    step: Duration,
}

impl SimClock {
    pub fn from_hz(hz: f64) -> Self {
        Self { now: Tick(0), step: Duration::from_secs_f64(1.0 / hz) }
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }

    #[inline]
    pub fn step(&self) -> Duration {
        self.step
    }

    #[inline]
    pub fn advance(&mut self) {
        self.now.0 += 1;
    }

    /// Whole ticks needed to cover `delay`. Never less than one, so a task never
    /// resumes inside the tick that scheduled it.
    pub fn ticks_for(&self, delay: Duration) -> u64 {
        let ticks = delay.as_secs_f64() / self.step.as_secs_f64();
        // Absorb float noise such as 2.0 / 0.1 = 20.000000000000004.
        ((ticks - 1e-6).ceil() as u64).max(1)
    }

    #[inline]
    pub fn after(&self, delay: Duration) -> Tick {
        Tick(self.now.0 + self.ticks_for(delay))
    }
}

/// Cancellation token for one scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle {
    due: Tick,
    seq: u64,
}

impl TaskHandle {
    #[inline]
    pub fn due(&self) -> Tick {
        self.due
    }
}

/// Timer queue for one family of tasks.
#[derive(Resource, Debug)]
pub struct Scheduler<T: Send + Sync + 'static> {
    queue: BTreeMap<(Tick, u64), T>,
    next_seq: u64,
}

impl<T: Send + Sync + 'static> Default for Scheduler<T> {
    fn default() -> Self {
        Self { queue: BTreeMap::new(), next_seq: 0 }
    }
}

impl<T: Send + Sync + 'static> Scheduler<T> {
    pub fn schedule_at(&mut self, due: Tick, task: T) -> TaskHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((due, seq), task);
        TaskHandle { due, seq }
    }

    pub fn schedule_after(&mut self, clock: &SimClock, delay: Duration, task: T) -> TaskHandle {
        self.schedule_at(clock.after(delay), task)
    }

    /// Remove a pending task. Returns `None` if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> Option<T> {
        self.queue.remove(&(handle.due, handle.seq))
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.queue.contains_key(&(handle.due, handle.seq))
    }

    /// Pop the earliest task whose resume tick is `<= now`.
    pub fn pop_due(&mut self, now: Tick) -> Option<(TaskHandle, T)> {
        let (&(due, _), _) = self.queue.first_key_value()?;
        if due > now {
            return None;
        }
        self.queue
            .pop_first()
            .map(|((due, seq), task)| (TaskHandle { due, seq }, task))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Ordering of fixed-step gameplay work.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedSet {
    Clock,
    Signals,
    Tasks,
    Allocate,
    Motion,
}

/// Ordering of collision consequences, after the physics step.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveSet {
    Impacts,
    Damage,
    Session,
    Commit,
}

pub fn plugin(app: &mut App) {
    let hz = app.world().resource::<Tunables>().fixed_hz;
    app.insert_resource(Time::<Fixed>::from_hz(hz))
        .insert_resource(SimClock::from_hz(hz));

    app.configure_sets(
        FixedUpdate,
        (
            FixedSet::Clock,
            FixedSet::Signals,
            FixedSet::Tasks,
            FixedSet::Allocate,
            FixedSet::Motion,
        )
            .chain()
            .run_if(in_state(GameState::InGame)),
    );
    app.configure_sets(
        FixedPostUpdate,
        (
            ResolveSet::Impacts,
            ResolveSet::Damage,
            ResolveSet::Session,
            ResolveSet::Commit,
        )
            .chain()
            .after(CollisionEventSystems)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(FixedUpdate, advance_clock.in_set(FixedSet::Clock));
}

pub fn advance_clock(mut clock: ResMut<SimClock>) {
    clock.advance();
}
