//! Mod capabilities and their static descriptors
//!
//! A mod implements exactly one of three activation shapes:
//! - Passive: runs every fixed tick, whether selected or not
//! - Click: fires once per press edge, then cools down
//! - Hold: activates on press, finalizes on release with the accumulated charge

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// External conditions sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipEnvironment {
    /// Ship is currently inside a solar current segment
    pub in_solar_current: bool,
}

/// Mod that is invoked every fixed tick
pub trait PassiveMod {
    fn name(&self) -> &'static str;

    fn on_passive(&mut self, env: &ShipEnvironment, dt: f32);
}

/// Mod with a one-to-one press-to-effect mapping
pub trait ClickMod {
    fn name(&self) -> &'static str;

    fn on_click(&mut self);
}

/// Mod that must be held down to function
pub trait HoldMod {
    fn name(&self) -> &'static str;

    /// Called once on the press edge
    fn on_hold(&mut self);

    /// Called once when the hold ends (release, timeout or forced), with the
    /// charge accumulated while held
    fn on_release(&mut self, charge: f32);

    /// While this returns true the max-hold countdown does not advance
    fn should_suspend_timeout(&self, _env: &ShipEnvironment) -> bool {
        false
    }
}

// A mod whose state is read outside the scheduler (flight controller, HUD) is
// bound as `Rc<RefCell<M>>` and the caller keeps a clone of the `Rc`.

impl<M: PassiveMod> PassiveMod for Rc<RefCell<M>> {
    fn name(&self) -> &'static str {
        self.borrow().name()
    }

    fn on_passive(&mut self, env: &ShipEnvironment, dt: f32) {
        self.borrow_mut().on_passive(env, dt);
    }
}

impl<M: ClickMod> ClickMod for Rc<RefCell<M>> {
    fn name(&self) -> &'static str {
        self.borrow().name()
    }

    fn on_click(&mut self) {
        self.borrow_mut().on_click();
    }
}

impl<M: HoldMod> HoldMod for Rc<RefCell<M>> {
    fn name(&self) -> &'static str {
        self.borrow().name()
    }

    fn on_hold(&mut self) {
        self.borrow_mut().on_hold();
    }

    fn on_release(&mut self, charge: f32) {
        self.borrow_mut().on_release(charge);
    }

    fn should_suspend_timeout(&self, env: &ShipEnvironment) -> bool {
        self.borrow().should_suspend_timeout(env)
    }
}

/// Activation kind, without the behavior payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModKind {
    Passive,
    Click,
    Hold,
}

/// The behavior bound to a slot
pub enum ModCapability {
    Passive(Box<dyn PassiveMod>),
    Click(Box<dyn ClickMod>),
    Hold(Box<dyn HoldMod>),
}

impl ModCapability {
    pub fn passive(m: impl PassiveMod + 'static) -> Self {
        ModCapability::Passive(Box::new(m))
    }

    pub fn click(m: impl ClickMod + 'static) -> Self {
        ModCapability::Click(Box::new(m))
    }

    pub fn hold(m: impl HoldMod + 'static) -> Self {
        ModCapability::Hold(Box::new(m))
    }

    pub fn kind(&self) -> ModKind {
        match self {
            ModCapability::Passive(_) => ModKind::Passive,
            ModCapability::Click(_) => ModKind::Click,
            ModCapability::Hold(_) => ModKind::Hold,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ModCapability::Passive(m) => m.name(),
            ModCapability::Click(m) => m.name(),
            ModCapability::Hold(m) => m.name(),
        }
    }
}

impl fmt::Debug for ModCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModCapability")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

/// Static per-mod tuning
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModDescriptor {
    /// Maximum charge in seconds of hold (0 = no charge mechanic)
    pub max_charge: f32,
    /// Cooldown after use, in seconds
    pub cooldown: f32,
    /// Maximum hold time in seconds (0 = unbounded)
    pub max_hold_time: f32,
}

impl ModDescriptor {
    pub fn new(max_charge: f32, cooldown: f32, max_hold_time: f32) -> Self {
        Self {
            max_charge,
            cooldown,
            max_hold_time,
        }
    }

    /// First field that is negative or not finite, if any
    pub fn invalid_field(&self) -> Option<(&'static str, f32)> {
        [
            ("max_charge", self.max_charge),
            ("cooldown", self.cooldown),
            ("max_hold_time", self.max_hold_time),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite() || *v < 0.0)
    }
}

/// A capability together with its descriptor, as bound to one slot
#[derive(Debug)]
pub struct ModBinding {
    pub capability: ModCapability,
    pub descriptor: ModDescriptor,
}

impl ModBinding {
    pub fn new(capability: ModCapability, descriptor: ModDescriptor) -> Self {
        Self {
            capability,
            descriptor,
        }
    }
}
