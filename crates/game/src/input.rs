//! Pilot input for a single tick.
//!
//! Held controls are a bit set, like a compact network command. Discrete
//! actions (pickup/drop, restart) are edge-triggered by the simulation, so
//! holding them across ticks fires them once.

use serde::{Deserialize, Serialize};

/// Control bits held during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlightInput(pub u16);

impl FlightInput {
    /// Main rotor thrust. Alone it climbs; with a direction it translates.
    pub const THROTTLE: u16 = 1 << 0;

    pub const DESCEND: u16 = 1 << 1;

    /// Rotate counter-clockwise seen from above.
    pub const YAW_LEFT: u16 = 1 << 2;

    pub const YAW_RIGHT: u16 = 1 << 3;

    /// Pitch nose down and move along the heading.
    pub const FORWARD: u16 = 1 << 4;

    pub const BACKWARD: u16 = 1 << 5;

    /// Roll left and move sideways.
    pub const STRAFE_LEFT: u16 = 1 << 6;

    pub const STRAFE_RIGHT: u16 = 1 << 7;

    /// Pick up a touched package or drop a carried one.
    pub const ACTION: u16 = 1 << 8;

    /// Abandon the episode and generate a new field.
    pub const RESTART: u16 = 1 << 9;

    /// Input with the given bits held.
    #[inline]
    pub const fn with(bits: u16) -> Self {
        Self(bits)
    }

    /// Check if a control is held.
    #[inline]
    pub fn pressed(self, bits: u16) -> bool {
        (self.0 & bits) != 0
    }

    #[inline]
    pub fn press(&mut self, bits: u16) {
        self.0 |= bits;
    }

    #[inline]
    pub fn release(&mut self, bits: u16) {
        self.0 &= !bits;
    }

    /// Pitch input held.
    pub fn pitching(self) -> bool {
        self.pressed(Self::FORWARD | Self::BACKWARD)
    }

    /// Roll input held.
    pub fn rolling(self) -> bool {
        self.pressed(Self::STRAFE_LEFT | Self::STRAFE_RIGHT)
    }

    /// Any of the four directional controls held.
    pub fn has_direction(self) -> bool {
        self.pitching() || self.rolling()
    }

    /// Bits set here that were not set in `previous`.
    pub fn just_pressed(self, previous: FlightInput, bits: u16) -> bool {
        self.pressed(bits) && !previous.pressed(bits)
    }
}
