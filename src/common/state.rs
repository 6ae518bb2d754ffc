//! Top-level app state.
//!
//! Everything spawned for a round (arena, combatants, pools, effects) carries
//! `DespawnOnExit(GameState::InGame)`; the session resets on entry.

use bevy::prelude::*;

#[derive(States, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    InGame,
}
