use bevy::prelude::*;

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: f32,
    /// Shooter, when known.
    pub source: Option<Entity>,
}

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct HealRequest {
    pub target: Entity,
    pub amount: f32,
}

/// An enemy's health crossed zero.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyDefeated {
    pub enemy: Entity,
}

/// The player's health crossed zero.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub player: Entity,
}
