//! Built-in ship mods
//!
//! Effects on ship movement are applied by the flight controller; these types
//! only track the state that controller reads.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use serde::{Deserialize, Serialize};

use super::capability::{ClickMod, HoldMod, ModCapability, PassiveMod, ShipEnvironment};
use super::direction::ModDirection;
use crate::consts::MOD_SLOT_COUNT;

/// Mods that can be named in a ship config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinMod {
    SolarSail,
    PulseLaser,
    ShieldRegen,
}

impl BuiltinMod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinMod::SolarSail => "solar_sail",
            BuiltinMod::PulseLaser => "pulse_laser",
            BuiltinMod::ShieldRegen => "shield_regen",
        }
    }

    /// Create a fresh capability with default tuning
    pub fn instantiate(&self) -> ModCapability {
        self.bind().0
    }

    /// Create a fresh capability plus a handle that reads (and tweaks) its
    /// state while it is bound to the scheduler
    pub fn bind(&self) -> (ModCapability, BuiltinHandle) {
        match self {
            BuiltinMod::SolarSail => {
                let sail = Rc::new(RefCell::new(SolarSailMod::default()));
                (
                    ModCapability::hold(sail.clone()),
                    BuiltinHandle::SolarSail(sail),
                )
            }
            BuiltinMod::PulseLaser => {
                let laser = Rc::new(RefCell::new(PulseLaserMod::default()));
                (
                    ModCapability::click(laser.clone()),
                    BuiltinHandle::PulseLaser(laser),
                )
            }
            BuiltinMod::ShieldRegen => {
                let regen = Rc::new(RefCell::new(ShieldRegenMod::default()));
                (
                    ModCapability::passive(regen.clone()),
                    BuiltinHandle::ShieldRegen(regen),
                )
            }
        }
    }
}

/// Shared state of a bound built-in mod
#[derive(Debug, Clone)]
pub enum BuiltinHandle {
    SolarSail(Rc<RefCell<SolarSailMod>>),
    PulseLaser(Rc<RefCell<PulseLaserMod>>),
    ShieldRegen(Rc<RefCell<ShieldRegenMod>>),
}

/// Handles for every built-in mod on the ship, by slot
#[derive(Debug, Clone, Default)]
pub struct ModHandles {
    slots: [Option<BuiltinHandle>; MOD_SLOT_COUNT],
}

impl ModHandles {
    pub fn new(slots: [Option<BuiltinHandle>; MOD_SLOT_COUNT]) -> Self {
        Self { slots }
    }

    pub fn get(&self, direction: ModDirection) -> Option<&BuiltinHandle> {
        self.slots[direction.index()].as_ref()
    }

    /// First solar sail on the ship
    pub fn solar_sail(&self) -> Option<&Rc<RefCell<SolarSailMod>>> {
        self.slots.iter().find_map(|h| match h {
            Some(BuiltinHandle::SolarSail(m)) => Some(m),
            _ => None,
        })
    }

    pub fn pulse_laser(&self) -> Option<&Rc<RefCell<PulseLaserMod>>> {
        self.slots.iter().find_map(|h| match h {
            Some(BuiltinHandle::PulseLaser(m)) => Some(m),
            _ => None,
        })
    }

    pub fn shield_regen(&self) -> Option<&Rc<RefCell<ShieldRegenMod>>> {
        self.slots.iter().find_map(|h| match h {
            Some(BuiltinHandle::ShieldRegen(m)) => Some(m),
            _ => None,
        })
    }
}

/// Solar sail: trades turning for thrust while held.
///
/// The sail's boost timer stands still while the ship rides a solar current.
#[derive(Debug, Clone)]
pub struct SolarSailMod {
    /// Pitch and yaw torque are divided by this while sailing
    pub pitch_yaw_divisor: f32,
    /// Thrust is multiplied by this while sailing
    pub thrust_multiplier: f32,
    sailing: bool,
    /// Charge delivered by the last completed sail
    last_charge: f32,
}

impl Default for SolarSailMod {
    fn default() -> Self {
        Self {
            pitch_yaw_divisor: 2.0,
            thrust_multiplier: 1.5,
            sailing: false,
            last_charge: 0.0,
        }
    }
}

impl SolarSailMod {
    pub fn is_sailing(&self) -> bool {
        self.sailing
    }

    pub fn last_charge(&self) -> f32 {
        self.last_charge
    }

    /// Multiplier on max thrust (1.0 when stowed)
    pub fn thrust_scale(&self) -> f32 {
        if self.sailing {
            self.thrust_multiplier
        } else {
            1.0
        }
    }

    /// Multiplier on pitch/yaw torque (1.0 when stowed)
    pub fn turn_scale(&self) -> f32 {
        if self.sailing && self.pitch_yaw_divisor > 0.0 {
            1.0 / self.pitch_yaw_divisor
        } else {
            1.0
        }
    }
}

impl HoldMod for SolarSailMod {
    fn name(&self) -> &'static str {
        BuiltinMod::SolarSail.as_str()
    }

    fn on_hold(&mut self) {
        self.sailing = true;
        debug!("Solar sail deployed");
    }

    fn on_release(&mut self, charge: f32) {
        self.sailing = false;
        self.last_charge = charge;
        debug!("Solar sail stowed after {:.2}s", charge);
    }

    fn should_suspend_timeout(&self, env: &ShipEnvironment) -> bool {
        self.sailing && env.in_solar_current
    }
}

/// Pulse laser: one shot per click
#[derive(Debug, Clone, Default)]
pub struct PulseLaserMod {
    shots_fired: u32,
}

impl PulseLaserMod {
    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }
}

impl ClickMod for PulseLaserMod {
    fn name(&self) -> &'static str {
        BuiltinMod::PulseLaser.as_str()
    }

    fn on_click(&mut self) {
        self.shots_fired += 1;
        debug!("Pulse laser fired (shot {})", self.shots_fired);
    }
}

/// Shield regeneration, always on. Regenerates faster inside solar currents.
#[derive(Debug, Clone)]
pub struct ShieldRegenMod {
    pub regen_per_second: f32,
    pub current_multiplier: f32,
    pub max_shield: f32,
    shield: f32,
}

impl Default for ShieldRegenMod {
    fn default() -> Self {
        Self {
            regen_per_second: 5.0,
            current_multiplier: 2.0,
            max_shield: 50.0,
            shield: 0.0,
        }
    }
}

impl ShieldRegenMod {
    pub fn shield(&self) -> f32 {
        self.shield
    }

    /// Soak up as much of `damage` as the shield holds. Returns what gets through.
    pub fn absorb(&mut self, damage: i32) -> i32 {
        let soaked = (self.shield.floor() as i32).clamp(0, damage.max(0));
        self.shield -= soaked as f32;
        damage - soaked
    }
}

impl PassiveMod for ShieldRegenMod {
    fn name(&self) -> &'static str {
        BuiltinMod::ShieldRegen.as_str()
    }

    fn on_passive(&mut self, env: &ShipEnvironment, dt: f32) {
        let rate = if env.in_solar_current {
            self.regen_per_second * self.current_multiplier
        } else {
            self.regen_per_second
        };
        self.shield = (self.shield + rate * dt).min(self.max_shield);
    }
}
