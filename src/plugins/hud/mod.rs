//! Presentation boundary.
//!
//! Gameplay publishes [`StatusUpdate`] messages and never reads anything back.
//! This plugin folds them into [`HudState`], which is what widgets would bind to.

use bevy::prelude::*;

/// One-way status publication from the combat core.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum StatusUpdate {
    Ammo(u32),
    Reloading,
    Magazines(u32),
    Health(f32),
    Speed(f32),
    Score(u32),
    SessionOver { score: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AmmoReadout {
    #[default]
    Unknown,
    Count(u32),
    Reloading,
}

/// Latest published values.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct HudState {
    pub ammo: AmmoReadout,
    pub magazines: u32,
    pub health: f32,
    pub speed: f32,
    pub score: u32,
    pub final_score: Option<u32>,
}

pub fn plugin(app: &mut App) {
    app.add_message::<StatusUpdate>()
        .init_resource::<HudState>()
        .add_systems(Update, apply_status_updates);
}

pub fn apply_status_updates(mut updates: MessageReader<StatusUpdate>, mut hud: ResMut<HudState>) {
    for update in updates.read() {
        match *update {
            StatusUpdate::Ammo(n) => hud.ammo = AmmoReadout::Count(n),
            StatusUpdate::Reloading => hud.ammo = AmmoReadout::Reloading,
            StatusUpdate::Magazines(n) => hud.magazines = n,
            StatusUpdate::Health(h) => hud.health = h,
            StatusUpdate::Speed(s) => hud.speed = s,
            StatusUpdate::Score(s) => hud.score = s,
            StatusUpdate::SessionOver { score } => {
                info!("Session over, final score {score}");
                hud.final_score = Some(score);
            }
        }
    }
}

#[cfg(test)]
mod tests;
