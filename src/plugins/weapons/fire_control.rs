//! Fire control: trigger handling, ammo bookkeeping and reload sequencing.
//!
//! `FireControl` is a plain state machine stored as a component on the shooter.
//! It never touches the projectile pool itself: a successful shot returns
//! [`ShotOutcome::Fired`] and the caller turns that into a spawn request.
//! Every timed transition (cooldown, reload, held-fire repeat) is a [`WeaponTask`]
//! in the shared scheduler, and the component keeps the handle of each one it
//! owns so stale tasks are recognised and ignored.

use std::sync::Arc;

use bevy::prelude::*;

use crate::common::team::Team;
use crate::plugins::clock::{Scheduler, SimClock, TaskHandle, Tick};

use super::profile::{FireMode, WeaponProfile};

/// Timed fire-control transitions, keyed by the shooter entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponTask {
    CooldownElapsed(Entity),
    ReloadFinished(Entity),
    HeldFire(Entity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireState {
    Idle,
    Firing,
    Reloading,
}

/// Why a shot did not leave the barrel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppressed {
    Empty,
    Reloading,
    Cooldown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    Fired { bullets_left: u32 },
    Suppressed(Suppressed),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadBlocked {
    AlreadyReloading,
    MagazineFull,
    NoMagazines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Started { magazines_left: u32 },
    Finished { bullets_left: u32, magazines_left: u32 },
    Ignored(ReloadBlocked),
}

#[derive(Component, Debug, Clone)]
pub struct FireControl {
    profile: Arc<WeaponProfile>,
    team: Team,
    bullets_left: u32,
    magazines_left: u32,
    reloading: Option<TaskHandle>,
    cooldown: Option<TaskHandle>,
    hold: Option<TaskHandle>,
}

impl FireControl {
    pub fn new(profile: Arc<WeaponProfile>, team: Team) -> Self {
        let magazines_left = if profile.magazines_unlimited { 0 } else { profile.magazines_start };
        Self {
            bullets_left: profile.magazine_size,
            magazines_left,
            profile,
            team,
            reloading: None,
            cooldown: None,
            hold: None,
        }
    }

    #[inline]
    pub fn profile(&self) -> &WeaponProfile {
        &self.profile
    }

    #[inline]
    pub fn team(&self) -> Team {
        self.team
    }

    #[inline]
    pub fn bullets_left(&self) -> u32 {
        self.bullets_left
    }

    /// Meaningless for unlimited magazines (always 0).
    #[inline]
    pub fn magazines_left(&self) -> u32 {
        self.magazines_left
    }

    #[inline]
    pub fn is_reloading(&self) -> bool {
        self.reloading.is_some()
    }

    /// A cooldown whose task comes due at `now` no longer blocks, even if the
    /// task itself has not run yet this tick.
    #[inline]
    pub fn cooldown_active(&self, now: Tick) -> bool {
        self.cooldown.is_some_and(|handle| handle.due() > now)
    }

    #[inline]
    pub fn is_holding(&self) -> bool {
        self.hold.is_some()
    }

    pub fn state(&self) -> FireState {
        if self.reloading.is_some() {
            FireState::Reloading
        } else if self.hold.is_some() || self.cooldown.is_some() {
            FireState::Firing
        } else {
            FireState::Idle
        }
    }

    /// Trigger pressed. SinglePress fires once; HeldAutomatic fires now and keeps
    /// firing every `time_between_shots` until [`FireControl::release`].
    pub fn press(&mut self, owner: Entity, clock: &SimClock, tasks: &mut Scheduler<WeaponTask>) -> ShotOutcome {
        match self.profile.fire_mode {
            FireMode::SinglePress => self.shoot(owner, clock, tasks),
            FireMode::HeldAutomatic => {
                if let Some(stale) = self.hold.take() {
                    tasks.cancel(stale);
                }
                let outcome = self.shoot(owner, clock, tasks);
                self.hold = Some(tasks.schedule_after(clock, self.profile.shot_interval(), WeaponTask::HeldFire(owner)));
                outcome
            }
        }
    }

    /// Trigger released. Cancels the held-fire task started by the matching press.
    pub fn release(&mut self, tasks: &mut Scheduler<WeaponTask>) -> bool {
        match self.hold.take() {
            Some(handle) => {
                tasks.cancel(handle);
                true
            }
            None => false,
        }
    }

    /// Held-fire repeat came due. Returns `None` for a task this trigger no longer owns.
    pub fn held_fire_due(
        &mut self,
        handle: TaskHandle,
        owner: Entity,
        clock: &SimClock,
        tasks: &mut Scheduler<WeaponTask>,
    ) -> Option<ShotOutcome> {
        if self.hold != Some(handle) {
            return None;
        }
        let outcome = self.shoot(owner, clock, tasks);
        self.hold = Some(tasks.schedule_after(clock, self.profile.shot_interval(), WeaponTask::HeldFire(owner)));
        Some(outcome)
    }

    /// Attempt one shot.
    ///
    /// An empty magazine suppresses the shot. Enemies additionally start a reload
    /// on the spot, but still wait for it to finish before the next shot.
    pub fn shoot(&mut self, owner: Entity, clock: &SimClock, tasks: &mut Scheduler<WeaponTask>) -> ShotOutcome {
        if self.bullets_left == 0 {
            if self.team == Team::Enemy {
                let reload = self.reload(owner, clock, tasks);
                debug!("{owner}: empty magazine, automatic reload -> {reload:?}");
            }
            return ShotOutcome::Suppressed(Suppressed::Empty);
        }
        if self.reloading.is_some() {
            return ShotOutcome::Suppressed(Suppressed::Reloading);
        }
        if self.cooldown_active(clock.now()) {
            return ShotOutcome::Suppressed(Suppressed::Cooldown);
        }
        if let Some(elapsed) = self.cooldown.take() {
            tasks.cancel(elapsed);
        }

        self.bullets_left -= 1;
        self.cooldown = Some(tasks.schedule_after(clock, self.profile.shot_interval(), WeaponTask::CooldownElapsed(owner)));
        ShotOutcome::Fired { bullets_left: self.bullets_left }
    }

    pub fn cooldown_elapsed(&mut self, handle: TaskHandle) {
        if self.cooldown == Some(handle) {
            self.cooldown = None;
        }
    }

    /// Begin a reload. The magazine count drops immediately; the bullets arrive
    /// after `reload_time`.
    pub fn reload(&mut self, owner: Entity, clock: &SimClock, tasks: &mut Scheduler<WeaponTask>) -> ReloadOutcome {
        if self.reloading.is_some() {
            return ReloadOutcome::Ignored(ReloadBlocked::AlreadyReloading);
        }
        if self.bullets_left == self.profile.magazine_size {
            return ReloadOutcome::Ignored(ReloadBlocked::MagazineFull);
        }
        if !self.profile.magazines_unlimited {
            if self.magazines_left == 0 {
                return ReloadOutcome::Ignored(ReloadBlocked::NoMagazines);
            }
            self.magazines_left -= 1;
        }

        self.reloading = Some(tasks.schedule_after(clock, self.profile.reload_duration(), WeaponTask::ReloadFinished(owner)));
        ReloadOutcome::Started { magazines_left: self.magazines_left }
    }

    pub fn reload_finished(&mut self, handle: TaskHandle) -> Option<ReloadOutcome> {
        if self.reloading != Some(handle) {
            return None;
        }
        self.reloading = None;
        self.bullets_left = self.profile.magazine_size;
        Some(ReloadOutcome::Finished {
            bullets_left: self.bullets_left,
            magazines_left: self.magazines_left,
        })
    }

    /// Add magazines, clamped to the configured maximum. Returns the new count.
    pub fn add_magazines(&mut self, amount: u32) -> u32 {
        self.magazines_left = self.magazines_left.saturating_add(amount).min(self.profile.magazines_max);
        self.magazines_left
    }
}
