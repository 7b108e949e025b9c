//! A single directional mod slot and its cooldown countdown

use super::capability::{ModBinding, ModCapability, ModDescriptor, ModKind};
use crate::timer_reached;

/// Result of advancing a running cooldown by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum CooldownStep {
    /// Still counting, normalized progress in `[0, 1)`
    Progress(f32),
    /// Countdown finished this tick
    Ended,
}

/// One of the four slots on the ship.
///
/// A slot is usable iff it has a capability bound, is not locked out externally,
/// and has no cooldown running.
#[derive(Debug)]
pub struct ModSlot {
    capability: Option<ModCapability>,
    descriptor: ModDescriptor,
    /// External lockout (e.g. out of stamina), independent of cooldown
    locked_out: bool,
    /// Seconds elapsed in the running cooldown, `None` when not cooling down
    cooldown_elapsed: Option<f64>,
}

impl ModSlot {
    pub fn empty() -> Self {
        Self {
            capability: None,
            descriptor: ModDescriptor::default(),
            locked_out: false,
            cooldown_elapsed: None,
        }
    }

    pub fn bound(binding: ModBinding) -> Self {
        Self {
            capability: Some(binding.capability),
            descriptor: binding.descriptor,
            locked_out: false,
            cooldown_elapsed: None,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.capability.is_some()
    }

    pub fn kind(&self) -> Option<ModKind> {
        self.capability.as_ref().map(ModCapability::kind)
    }

    pub fn name(&self) -> Option<&str> {
        self.capability.as_ref().map(ModCapability::name)
    }

    pub fn descriptor(&self) -> &ModDescriptor {
        &self.descriptor
    }

    pub fn usable(&self) -> bool {
        self.is_bound() && !self.locked_out && self.cooldown_elapsed.is_none()
    }

    pub fn is_cooling_down(&self) -> bool {
        self.cooldown_elapsed.is_some()
    }

    /// Seconds into the running cooldown (0 when idle)
    pub fn cooldown_elapsed(&self) -> f32 {
        self.cooldown_elapsed.unwrap_or(0.0) as f32
    }

    /// Normalized cooldown progress, `None` when not cooling down
    pub fn cooldown_progress(&self) -> Option<f32> {
        let elapsed = self.cooldown_elapsed?;
        if self.descriptor.cooldown > 0.0 {
            Some((elapsed / f64::from(self.descriptor.cooldown)).min(1.0) as f32)
        } else {
            Some(1.0)
        }
    }

    pub(crate) fn capability(&self) -> Option<&ModCapability> {
        self.capability.as_ref()
    }

    pub(crate) fn capability_mut(&mut self) -> Option<&mut ModCapability> {
        self.capability.as_mut()
    }

    /// Lock or unlock the slot. Empty slots stay unusable either way.
    pub(crate) fn set_locked_out(&mut self, locked: bool) {
        if self.is_bound() {
            self.locked_out = locked;
        }
    }

    /// Start (or restart) the cooldown. Returns true if it completed at once
    /// because the cooldown duration is zero.
    pub(crate) fn start_cooldown(&mut self) -> bool {
        if timer_reached(0.0, self.descriptor.cooldown) {
            self.cooldown_elapsed = None;
            true
        } else {
            self.cooldown_elapsed = Some(0.0);
            false
        }
    }

    pub(crate) fn advance_cooldown(&mut self, dt: f32) -> Option<CooldownStep> {
        let elapsed = self.cooldown_elapsed.as_mut()?;
        *elapsed += f64::from(dt);
        if timer_reached(*elapsed, self.descriptor.cooldown) {
            self.cooldown_elapsed = None;
            Some(CooldownStep::Ended)
        } else {
            let progress = *elapsed / f64::from(self.descriptor.cooldown);
            Some(CooldownStep::Progress(progress as f32))
        }
    }
}
