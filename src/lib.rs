//! Ship Mods - directional power-mod scheduling for a space-flight action game
//!
//! Core modules:
//! - `sim`: Deterministic mod activation scheduler (selection, charge, cooldowns)
//! - `health`: Ship health, damage drain and respawn timing
//! - `hazards`: Damage sources and health pickups that feed the health model
//! - `config`: Data-driven ship loadout and health tuning

pub mod config;
pub mod hazards;
pub mod health;
pub mod sim;

pub use config::{ConfigError, ShipConfig};
pub use health::{HealthConfig, HealthEvent, ShipHealth};

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz physics step)
    pub const SIM_DT: f32 = 1.0 / 50.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Number of directional mod slots on the ship
    pub const MOD_SLOT_COUNT: usize = 4;
}

/// True once `elapsed` has reached `target`.
///
/// Timers sum their `f32` steps into an `f64`, which holds the running total
/// exactly for any realistic session length, so the comparison needs no slack.
#[inline]
pub fn timer_reached(elapsed: f64, target: f32) -> bool {
    elapsed >= f64::from(target)
}
