//! Deterministic mod scheduler module
//!
//! All mod activation logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, advanced explicitly by `tick`
//! - Stable slot iteration order (Left, Up, Right, Down)
//! - No rendering, audio or input-device dependencies

pub mod capability;
pub mod direction;
pub mod events;
pub mod mods;
pub mod scheduler;
pub mod slot;
pub mod tick;

pub use capability::{
    ClickMod, HoldMod, ModBinding, ModCapability, ModDescriptor, ModKind, PassiveMod,
    ShipEnvironment,
};
pub use direction::{DirectionError, ModDirection};
pub use events::{ModEvent, ModEventSink, NullSink};
pub use mods::{
    BuiltinHandle, BuiltinMod, ModHandles, PulseLaserMod, ShieldRegenMod, SolarSailMod,
};
pub use scheduler::{ActivateOutcome, IgnoreReason, ModScheduler, SelectOutcome};
pub use slot::ModSlot;
pub use tick::{ActivationInput, TickInput, TickOutcome, step};
