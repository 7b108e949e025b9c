//! Outbound scheduler events for presentation and audio collaborators

use serde::{Deserialize, Serialize};

use super::direction::ModDirection;

/// Something observable happened in the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ModEvent {
    /// Previously selected slot lost the selection
    ModDeselected(ModDirection),
    /// Selection moved to this slot
    ModSwitched(ModDirection),
    /// Click fired, or hold started
    ModActivated(ModDirection),
    /// Hold finalized with the given charge
    ModReleased(ModDirection, f32),
    ModCooldownStarted(ModDirection),
    /// Normalized cooldown progress in `[0, 1)`
    ModCooldownProgress(ModDirection, f32),
    ModCooldownEnded(ModDirection),
}

/// Receiver of scheduler events
pub trait ModEventSink {
    fn emit(&mut self, event: ModEvent);
}

impl ModEventSink for Vec<ModEvent> {
    fn emit(&mut self, event: ModEvent) {
        self.push(event);
    }
}

/// Sink that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ModEventSink for NullSink {
    fn emit(&mut self, _event: ModEvent) {}
}
