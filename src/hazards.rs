//! Environmental damage sources and health pickups

use serde::{Deserialize, Serialize};

use crate::health::ShipHealth;
use crate::timer_reached;

/// Flat damage dealt by touching an object (spikes, crusher jaws)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDamage {
    pub base_damage: i32,
}

impl ContactDamage {
    pub fn calculate_damage(&self) -> i32 {
        self.base_damage
    }

    pub fn apply(&self, health: &mut ShipHealth) {
        health.take_damage(self.calculate_damage());
    }
}

/// Sweeping laser that burns the ship while its beam is on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserDamage {
    pub damage: i32,
    /// Seconds between damage pulses
    pub interval: f32,
    /// Seconds since the last pulse, `None` while the beam is off the ship
    #[serde(skip)]
    since_pulse: Option<f64>,
}

impl LaserDamage {
    pub fn new(damage: i32, interval: f32) -> Self {
        Self {
            damage,
            interval,
            since_pulse: None,
        }
    }

    pub fn is_damaging(&self) -> bool {
        self.since_pulse.is_some()
    }

    /// Advance one tick. The first tick the beam hits deals damage at once,
    /// then every `interval` while it stays on. Returns damage dealt this tick.
    pub fn update(&mut self, beam_on_ship: bool, dt: f32, health: &mut ShipHealth) -> i32 {
        if !beam_on_ship || health.is_dead() {
            self.since_pulse = None;
            return 0;
        }

        let pulse = match self.since_pulse.as_mut() {
            None => true,
            Some(since) => {
                *since += f64::from(dt);
                timer_reached(*since, self.interval)
            }
        };
        if !pulse {
            return 0;
        }

        self.since_pulse = Some(0.0);
        health.take_damage(self.damage);
        if health.goal() <= 0 {
            self.since_pulse = None;
        }
        self.damage
    }
}

/// Health pack floating in the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthPickup {
    pub restoration: i32,
    /// Comes back after `recharge_time`; otherwise consumed on first use
    pub rechargeable: bool,
    pub recharge_time: f32,
    #[serde(skip)]
    state: PickupState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum PickupState {
    #[default]
    Ready,
    Recharging {
        elapsed: f64,
    },
    Consumed,
}

impl HealthPickup {
    pub fn new(restoration: i32, rechargeable: bool, recharge_time: f32) -> Self {
        Self {
            restoration,
            rechargeable,
            recharge_time,
            state: PickupState::Ready,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state == PickupState::Ready
    }

    pub fn is_consumed(&self) -> bool {
        self.state == PickupState::Consumed
    }

    /// Take the pickup. Returns the health it restores, or `None` if it is not
    /// available right now.
    pub fn collect(&mut self) -> Option<i32> {
        if !self.is_ready() {
            return None;
        }
        self.state = if self.rechargeable {
            PickupState::Recharging { elapsed: 0.0 }
        } else {
            PickupState::Consumed
        };
        Some(self.restoration)
    }

    /// Collect into `health` if available
    pub fn apply(&mut self, health: &mut ShipHealth) -> bool {
        match self.collect() {
            Some(amount) => {
                health.gain_health(amount);
                true
            }
            None => false,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if let PickupState::Recharging { elapsed } = &mut self.state {
            *elapsed += f64::from(dt);
            if timer_reached(*elapsed, self.recharge_time) {
                self.state = PickupState::Ready;
            }
        }
    }
}
