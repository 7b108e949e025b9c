//! Ship configuration: mod loadout and health tuning
//!
//! Loaded from a JSON file; every field falls back to the stock ship.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MOD_SLOT_COUNT;
use crate::health::HealthConfig;
use crate::sim::{
    BuiltinHandle, BuiltinMod, ModBinding, ModDescriptor, ModEventSink, ModHandles, ModScheduler,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("expected 4 mod slots (left, up, right, down), found {0}")]
    SlotCount(usize),
    #[error("mod slot {slot}: {field} must be finite and non-negative, got {value}")]
    InvalidDescriptor {
        slot: usize,
        field: &'static str,
        value: f32,
    },
    #[error("health: invalid {field} ({value})")]
    InvalidHealth { field: &'static str, value: f32 },
}

/// One configured mod slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModSlotConfig {
    pub kind: BuiltinMod,
    #[serde(flatten)]
    pub descriptor: ModDescriptor,
}

impl ModSlotConfig {
    pub fn new(kind: BuiltinMod, descriptor: ModDescriptor) -> Self {
        Self { kind, descriptor }
    }

    fn bind(&self) -> (ModBinding, BuiltinHandle) {
        let (capability, handle) = self.kind.bind();
        (ModBinding::new(capability, self.descriptor), handle)
    }
}

/// Complete ship configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Left, Up, Right, Down; `null` leaves a slot empty
    pub mods: Vec<Option<ModSlotConfig>>,
    pub health: HealthConfig,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            mods: vec![
                Some(ModSlotConfig::new(
                    BuiltinMod::PulseLaser,
                    ModDescriptor::new(0.0, 2.0, 0.0),
                )),
                None,
                Some(ModSlotConfig::new(
                    BuiltinMod::SolarSail,
                    ModDescriptor::new(3.0, 1.0, 3.0),
                )),
                Some(ModSlotConfig::new(
                    BuiltinMod::ShieldRegen,
                    ModDescriptor::default(),
                )),
            ],
            health: HealthConfig::default(),
        }
    }
}

impl ShipConfig {
    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!("Loaded ship config from {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mods.len() != MOD_SLOT_COUNT {
            return Err(ConfigError::SlotCount(self.mods.len()));
        }
        for (slot, m) in self.mods.iter().enumerate() {
            if let Some((field, value)) = m.as_ref().and_then(|m| m.descriptor.invalid_field()) {
                return Err(ConfigError::InvalidDescriptor { slot, field, value });
            }
        }
        if let Some((field, value)) = self.health.invalid_field() {
            return Err(ConfigError::InvalidHealth { field, value });
        }
        Ok(())
    }

    /// Instantiate the configured mods into a scheduler
    pub fn build_scheduler<S: ModEventSink>(&self, sink: S) -> Result<ModScheduler<S>, ConfigError> {
        self.build(sink).map(|(scheduler, _)| scheduler)
    }

    /// Instantiate the configured mods into a scheduler, keeping handles to
    /// their state for the flight controller
    pub fn build<S: ModEventSink>(
        &self,
        sink: S,
    ) -> Result<(ModScheduler<S>, ModHandles), ConfigError> {
        self.validate()?;
        let mut bindings: [Option<ModBinding>; MOD_SLOT_COUNT] = Default::default();
        let mut handles: [Option<BuiltinHandle>; MOD_SLOT_COUNT] = Default::default();
        for (i, slot) in self.mods.iter().enumerate() {
            if let Some((binding, handle)) = slot.as_ref().map(ModSlotConfig::bind) {
                bindings[i] = Some(binding);
                handles[i] = Some(handle);
            }
        }
        Ok((ModScheduler::new(bindings, sink), ModHandles::new(handles)))
    }
}
