use std::time::Duration;

use bevy::prelude::*;

use crate::common::{team::Team, tunables::HealthTuning};
use crate::plugins::clock::{Scheduler, SimClock, TaskHandle};

/// One regeneration step for the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regenerate(pub Entity);

/// Marker: the combatant is downed (dormant enemy, or player after game over)
/// and ignores its trigger.
#[derive(Component, Debug, Clone, Copy)]
pub struct Incapacitated;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    Survived { health: f32 },
    /// Health crossed zero with this hit. Reported once; `health` may be negative.
    Downed { health: f32 },
    /// Already downed; the hit changes nothing.
    Ignored,
}

#[derive(Component, Debug, Clone)]
pub struct Vitality {
    team: Team,
    max_health: f32,
    current: f32,
    regen_rate: f32,
    regen_delay: Duration,
    regen: Option<TaskHandle>,
}

impl Vitality {
    /// Seconds between regeneration steps once regeneration has started.
    pub const REGEN_INTERVAL: Duration = Duration::from_secs(1);

    pub fn new(team: Team, tuning: &HealthTuning) -> Self {
        Self {
            team,
            max_health: tuning.max_health,
            current: tuning.max_health,
            regen_rate: tuning.regen_rate,
            regen_delay: Duration::from_secs_f32(tuning.regen_delay_secs.max(0.0)),
            regen: None,
        }
    }

    #[inline]
    pub fn team(&self) -> Team {
        self.team
    }

    /// Raw health. Goes negative on the killing blow; never published that way.
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    #[inline]
    pub fn is_downed(&self) -> bool {
        self.current <= 0.0
    }

    #[inline]
    pub fn regeneration_pending(&self) -> bool {
        self.regen.is_some()
    }

    pub fn take_damage(
        &mut self,
        owner: Entity,
        amount: f32,
        clock: &SimClock,
        tasks: &mut Scheduler<Regenerate>,
    ) -> DamageOutcome {
        if self.is_downed() {
            return DamageOutcome::Ignored;
        }

        self.current -= amount;
        if let Some(pending) = self.regen.take() {
            tasks.cancel(pending);
        }

        if self.is_downed() {
            return DamageOutcome::Downed { health: self.current };
        }

        self.regen = Some(tasks.schedule_after(clock, self.regen_delay, Regenerate(owner)));
        DamageOutcome::Survived { health: self.current }
    }

    /// One regeneration step. Returns the new health, or `None` for a stale task
    /// or when there was nothing to restore.
    pub fn regenerate(
        &mut self,
        handle: TaskHandle,
        owner: Entity,
        clock: &SimClock,
        tasks: &mut Scheduler<Regenerate>,
    ) -> Option<f32> {
        if self.regen != Some(handle) {
            return None;
        }
        self.regen = None;
        if self.is_downed() || self.current >= self.max_health {
            return None;
        }

        self.current = (self.current + self.regen_rate).min(self.max_health);
        if self.current < self.max_health {
            self.regen = Some(tasks.schedule_after(clock, Self::REGEN_INTERVAL, Regenerate(owner)));
        }
        Some(self.current)
    }

    /// Heal, clamped to max. A downed combatant stays down and gets `None`.
    pub fn add_health(&mut self, amount: f32) -> Option<f32> {
        if self.is_downed() {
            return None;
        }
        self.current = (self.current + amount).min(self.max_health);
        Some(self.current)
    }

    pub fn reset_health(&mut self, tasks: &mut Scheduler<Regenerate>) -> f32 {
        if let Some(pending) = self.regen.take() {
            tasks.cancel(pending);
        }
        self.current = self.max_health;
        self.current
    }
}
