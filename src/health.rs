//! Ship health: damage, healing, velocity damage and respawn
//!
//! Damage and healing move a health *goal* immediately; the displayed health
//! follows it after a short delay at a fixed rate. The ship dies when the
//! displayed health reaches zero and respawns at full health after a delay.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::timer_reached;

/// Collision speed at or above `threshold` deals `damage`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityBand {
    pub threshold: f32,
    pub damage: i32,
}

/// Health tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub max_health: i32,
    /// Seconds before displayed health starts moving toward the goal
    pub drain_delay: f32,
    /// Displayed health change per second
    pub drain_rate: f32,
    /// Collisions deal damage based on impact speed
    pub velocity_damage: bool,
    pub velocity_bands: Vec<VelocityBand>,
    /// Seconds from death to respawn (explosion, fade out, fade in)
    pub respawn_delay: f32,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            drain_delay: 0.25,
            drain_rate: 30.0,
            velocity_damage: true,
            velocity_bands: vec![
                VelocityBand {
                    threshold: 20.0,
                    damage: 5,
                },
                VelocityBand {
                    threshold: 40.0,
                    damage: 15,
                },
                VelocityBand {
                    threshold: 60.0,
                    damage: 40,
                },
            ],
            respawn_delay: 1.43,
        }
    }
}

impl HealthConfig {
    /// First field outside its valid range, if any
    pub fn invalid_field(&self) -> Option<(&'static str, f32)> {
        if self.max_health <= 0 {
            return Some(("max_health", self.max_health as f32));
        }
        if !self.drain_rate.is_finite() || self.drain_rate <= 0.0 {
            return Some(("drain_rate", self.drain_rate));
        }
        if let Some(band) = self.velocity_bands.iter().find(|b| b.damage <= 0) {
            return Some(("velocity_bands.damage", band.damage as f32));
        }
        [
            ("drain_delay", self.drain_delay),
            ("respawn_delay", self.respawn_delay),
        ]
        .into_iter()
        .chain(
            self.velocity_bands
                .iter()
                .map(|b| ("velocity_bands.threshold", b.threshold)),
        )
        .find(|(_, v)| !v.is_finite() || *v < 0.0)
    }
}

/// Health changes for HUD, camera shake and audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthEvent {
    Damaged { amount: i32 },
    Healed { amount: i32 },
    Died,
    Respawned,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drain {
    /// Seconds waited so far; the display moves once this reaches the delay
    waited: f64,
    /// Fractional health points carried between ticks
    carry: f32,
}

/// The player ship's health
#[derive(Debug, Clone)]
pub struct ShipHealth {
    config: HealthConfig,
    health: i32,
    goal: i32,
    drain: Option<Drain>,
    regen_carry: f32,
    /// Seconds since death, `None` while alive
    dead_for: Option<f64>,
    events: Vec<HealthEvent>,
}

impl ShipHealth {
    pub fn new(config: HealthConfig) -> Self {
        let max = config.max_health;
        Self {
            config,
            health: max,
            goal: max,
            drain: None,
            regen_carry: 0.0,
            dead_for: None,
            events: Vec::new(),
        }
    }

    /// Displayed health
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Health the display is moving toward
    pub fn goal(&self) -> i32 {
        self.goal
    }

    pub fn max_health(&self) -> i32 {
        self.config.max_health
    }

    pub fn is_dead(&self) -> bool {
        self.dead_for.is_some()
    }

    pub fn is_draining(&self) -> bool {
        self.drain.is_some()
    }

    /// Displayed health as a fraction of max (for the health bar)
    pub fn fraction(&self) -> f32 {
        self.health as f32 / self.config.max_health as f32
    }

    pub fn drain_events(&mut self) -> Vec<HealthEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn take_damage(&mut self, amount: i32) {
        if self.is_dead() || amount <= 0 {
            return;
        }
        self.goal = (self.goal - amount).max(0);
        self.events.push(HealthEvent::Damaged { amount });
        debug!("Ship took {} damage (goal {})", amount, self.goal);
        self.start_drain();
    }

    pub fn gain_health(&mut self, amount: i32) {
        if self.is_dead() || amount <= 0 {
            return;
        }
        let before = self.goal;
        self.goal = (self.goal + amount).min(self.config.max_health);
        if self.goal > before {
            self.events.push(HealthEvent::Healed {
                amount: self.goal - before,
            });
        }
        if self.health != self.goal {
            self.start_drain();
        }
    }

    /// Heal `per_second` points per second, carrying fractions between calls
    pub fn regenerate(&mut self, per_second: f32, dt: f32) {
        if self.is_dead() {
            return;
        }
        self.regen_carry += per_second * dt;
        if self.regen_carry >= 1.0 {
            let whole = self.regen_carry.floor();
            self.regen_carry -= whole;
            self.gain_health(whole as i32);
        }
    }

    /// Apply collision damage for an impact at `speed`.
    ///
    /// Only the highest band crossed applies. A hit that would be lethal leaves
    /// the ship at 1 hp instead, unless it is already at 1 hp.
    /// Returns the damage dealt.
    pub fn velocity_damage(&mut self, speed: f32) -> Option<i32> {
        if !self.config.velocity_damage || self.is_dead() {
            return None;
        }
        let band = self
            .config
            .velocity_bands
            .iter()
            .filter(|b| speed >= b.threshold)
            .max_by(|a, b| {
                a.threshold
                    .partial_cmp(&b.threshold)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })?;

        let damage = if band.damage >= self.goal {
            (self.goal - 1).max(1)
        } else {
            band.damage
        };
        self.take_damage(damage);
        Some(damage)
    }

    /// Kill the ship outright (crushers)
    pub fn instant_death(&mut self) {
        if !self.is_dead() {
            self.die();
        }
    }

    /// Advance drain and respawn timers by one fixed step
    pub fn tick(&mut self, dt: f32) {
        if let Some(dead_for) = self.dead_for.as_mut() {
            *dead_for += f64::from(dt);
            if timer_reached(*dead_for, self.config.respawn_delay) {
                self.respawn();
            }
            return;
        }

        let Some(mut drain) = self.drain else {
            return;
        };
        if !timer_reached(drain.waited, self.config.drain_delay) {
            drain.waited += f64::from(dt);
            self.drain = Some(drain);
            return;
        }

        drain.carry += dt * self.config.drain_rate;
        let step = drain.carry.floor() as i32;
        drain.carry -= step as f32;
        if self.health > self.goal {
            self.health = (self.health - step).max(self.goal);
        } else {
            self.health = (self.health + step).min(self.goal);
        }

        if self.health <= 0 {
            self.die();
        } else if self.health == self.goal {
            self.drain = None;
        } else {
            self.drain = Some(drain);
        }
    }

    fn start_drain(&mut self) {
        if self.drain.is_none() {
            self.drain = Some(Drain {
                waited: 0.0,
                carry: 0.0,
            });
        }
    }

    fn die(&mut self) {
        info!("Ship destroyed");
        self.health = 0;
        self.goal = 0;
        self.drain = None;
        self.regen_carry = 0.0;
        self.dead_for = Some(0.0);
        self.events.push(HealthEvent::Died);
    }

    fn respawn(&mut self) {
        info!("Ship respawned");
        self.health = self.config.max_health;
        self.goal = self.config.max_health;
        self.dead_for = None;
        self.events.push(HealthEvent::Respawned);
    }
}
