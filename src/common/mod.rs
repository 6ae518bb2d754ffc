//! Common, shared types.

pub mod error;
pub mod layers;
pub mod state;
pub mod team;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
