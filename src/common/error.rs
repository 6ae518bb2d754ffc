//! Configuration errors.
//!
//! The simulation itself never fails: expected no-ops (shooting while reloading,
//! reloading a full magazine) are plain branches. Only configuration loaded at
//! startup can be invalid, and that aborts setup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The weapon table is not valid TOML, or a field has the wrong shape
    /// (including an unrecognized `fire_mode`).
    #[error("failed to parse weapon table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown weapon kind `{0}`")]
    UnknownWeapon(String),

    #[error("weapon `{weapon}`: `{field}` = {value} is outside {range}")]
    OutOfRange {
        weapon: String,
        field: &'static str,
        value: f64,
        range: &'static str,
    },
}
