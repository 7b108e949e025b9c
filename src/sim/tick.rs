//! Fixed timestep scheduler step
//!
//! Advances the scheduler and then applies that tick's input, so every tick
//! runs in the same order: passives, charge, cooldowns, hold timeout,
//! selection request, activation.

use super::capability::ShipEnvironment;
use super::direction::ModDirection;
use super::events::ModEventSink;
use super::scheduler::{ActivateOutcome, ModScheduler, SelectOutcome};

/// State change of the activation control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationInput {
    pub pressed: bool,
    /// Released-to-pressed transition
    pub press_edge: bool,
}

impl ActivationInput {
    pub fn press() -> Self {
        Self {
            pressed: true,
            press_edge: true,
        }
    }

    pub fn held() -> Self {
        Self {
            pressed: true,
            press_edge: false,
        }
    }

    pub fn release() -> Self {
        Self {
            pressed: false,
            press_edge: false,
        }
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional mod selection (d-pad / number keys)
    pub select: Option<ModDirection>,
    /// Activation control changed state this tick
    pub activate: Option<ActivationInput>,
    /// Paused, or piloting something other than the ship
    pub blocked: bool,
    pub environment: ShipEnvironment,
}

/// What the tick's input did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickOutcome {
    pub select: Option<SelectOutcome>,
    pub activate: Option<ActivateOutcome>,
}

/// Advance the scheduler by one fixed timestep, then apply `input`
pub fn step<S: ModEventSink>(
    scheduler: &mut ModScheduler<S>,
    input: &TickInput,
    dt: f32,
) -> TickOutcome {
    scheduler.set_blocked(input.blocked);
    scheduler.tick(dt, &input.environment);

    let select = input.select.map(|dir| scheduler.select_mod(dir));
    let activate = input
        .activate
        .map(|a| scheduler.activate(a.pressed, a.press_edge));

    TickOutcome { select, activate }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::capability::{ModBinding, ModDescriptor};
    use crate::sim::events::ModEvent;
    use crate::sim::mods::BuiltinMod;
    use crate::sim::scheduler::IgnoreReason;

    fn sail_and_laser() -> ModScheduler {
        ModScheduler::new(
            [
                Some(ModBinding::new(
                    BuiltinMod::SolarSail.instantiate(),
                    ModDescriptor::new(3.0, 1.0, 1.0),
                )),
                None,
                Some(ModBinding::new(
                    BuiltinMod::PulseLaser.instantiate(),
                    ModDescriptor::new(0.0, 0.5, 0.0),
                )),
                None,
            ],
            Vec::new(),
        )
    }

    #[test]
    fn test_step_selects_before_activating() {
        let mut s = sail_and_laser();
        let input = TickInput {
            select: Some(ModDirection::Right),
            activate: Some(ActivationInput::press()),
            ..Default::default()
        };
        let outcome = step(&mut s, &input, SIM_DT);
        assert_eq!(outcome.select, Some(SelectOutcome::Switched));
        assert_eq!(outcome.activate, Some(ActivateOutcome::Clicked));
        assert!(!s.slot(ModDirection::Right).usable());
    }

    #[test]
    fn test_blocked_input_is_ignored() {
        let mut s = sail_and_laser();
        let input = TickInput {
            activate: Some(ActivationInput::press()),
            blocked: true,
            ..Default::default()
        };
        let outcome = step(&mut s, &input, SIM_DT);
        assert_eq!(
            outcome.activate,
            Some(ActivateOutcome::Ignored(IgnoreReason::Blocked))
        );
        assert!(!s.is_charging());
    }

    #[test]
    fn test_sail_timeout_frozen_in_current() {
        let mut s = sail_and_laser();
        step(
            &mut s,
            &TickInput {
                activate: Some(ActivationInput::press()),
                ..Default::default()
            },
            0.25,
        );
        assert!(s.is_charging());

        // Riding a current: far past max hold time, still sailing
        let in_current = TickInput {
            environment: ShipEnvironment {
                in_solar_current: true,
            },
            ..Default::default()
        };
        for _ in 0..8 {
            step(&mut s, &in_current, 0.25);
        }
        assert!(s.is_charging());
        assert_eq!(s.current_charge(), 2.0);

        // Leave the current: 1s later the sail is stowed, charge capped at max
        for _ in 0..3 {
            step(&mut s, &TickInput::default(), 0.25);
        }
        assert!(s.is_charging());
        step(&mut s, &TickInput::default(), 0.25);
        assert!(!s.is_charging());

        let events = s.drain_events();
        assert!(events.contains(&ModEvent::ModReleased(ModDirection::Left, 3.0)));
    }

    #[test]
    fn test_held_input_does_not_retrigger() {
        let mut s = sail_and_laser();
        step(
            &mut s,
            &TickInput {
                activate: Some(ActivationInput::press()),
                ..Default::default()
            },
            0.25,
        );
        let outcome = step(
            &mut s,
            &TickInput {
                activate: Some(ActivationInput::held()),
                ..Default::default()
            },
            0.25,
        );
        assert_eq!(
            outcome.activate,
            Some(ActivateOutcome::Ignored(IgnoreReason::NotPressEdge))
        );
        assert_eq!(s.current_charge(), 0.25);

        let outcome = step(
            &mut s,
            &TickInput {
                activate: Some(ActivationInput::release()),
                ..Default::default()
            },
            0.25,
        );
        assert_eq!(
            outcome.activate,
            Some(ActivateOutcome::Released { charge: 0.5 })
        );
    }
}
