//! Combat allegiance.

/// Which side a combatant (or a projectile it fired) fights for.
///
/// Projectiles only deal damage to entities of the other team; same-team
/// contacts are treated like any neutral surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    #[inline]
    pub fn is_player(self) -> bool {
        matches!(self, Team::Player)
    }
}
