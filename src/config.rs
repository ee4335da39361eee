//! Lamp configuration

use crate::driver::Polarity;
use crate::state::DEFAULT_FADE_RATE;

/// Status indicator heartbeat: a short pulse once per period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heartbeat {
    /// Pulse period in milliseconds, zero disables the heartbeat
    pub period_ms: u32,
    /// Pulse width in milliseconds
    pub pulse_ms: u32,
}

impl Heartbeat {
    pub const DEFAULT: Self = Self {
        period_ms: 1000,
        pulse_ms: 10,
    };

    pub const DISABLED: Self = Self {
        period_ms: 0,
        pulse_ms: 0,
    };

    /// Indicator edge at millisecond `time`: `Some(true)` on, `Some(false)` off
    pub const fn at(self, time: u32) -> Option<bool> {
        if self.period_ms == 0 {
            return None;
        }
        let phase = time % self.period_ms;
        if phase == 0 {
            Some(true)
        } else if phase == self.pulse_ms {
            Some(false)
        } else {
            None
        }
    }
}

impl Default for Heartbeat {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration for the lamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LampConfig {
    /// Fade rate at boot
    pub fade_rate: u16,
    pub heartbeat: Heartbeat,
    /// Status LED wiring
    pub status_polarity: Polarity,
}

impl LampConfig {
    pub const fn new() -> Self {
        Self {
            fade_rate: DEFAULT_FADE_RATE,
            heartbeat: Heartbeat::DEFAULT,
            status_polarity: Polarity::ActiveLow,
        }
    }
}

impl Default for LampConfig {
    fn default() -> Self {
        Self::new()
    }
}
