//! The four fixed mod directions

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MOD_SLOT_COUNT;

/// Direction a mod slot is bound to. Slot order is Left, Up, Right, Down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModDirection {
    Left,
    Up,
    Right,
    Down,
}

/// Raw slot index outside `0..4`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DirectionError {
    #[error("mod slot index {0} is out of range (expected 0..4)")]
    OutOfRange(usize),
}

impl ModDirection {
    /// All directions in slot order
    pub const ALL: [ModDirection; MOD_SLOT_COUNT] = [
        ModDirection::Left,
        ModDirection::Up,
        ModDirection::Right,
        ModDirection::Down,
    ];

    /// Slot index (Left = 0 ... Down = 3)
    pub fn index(self) -> usize {
        match self {
            ModDirection::Left => 0,
            ModDirection::Up => 1,
            ModDirection::Right => 2,
            ModDirection::Down => 3,
        }
    }

    /// Selector wheel angle in degrees (Left = 0, each step rotates -90)
    pub fn wheel_angle(self) -> f32 {
        (self.index() as f32 * -90.0 + 360.0) % 360.0
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModDirection::Left => "left",
            ModDirection::Up => "up",
            ModDirection::Right => "right",
            ModDirection::Down => "down",
        }
    }
}

impl TryFrom<usize> for ModDirection {
    type Error = DirectionError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        ModDirection::ALL
            .get(index)
            .copied()
            .ok_or(DirectionError::OutOfRange(index))
    }
}

impl fmt::Display for ModDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
