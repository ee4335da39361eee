//! Fade and blink animation
//!
//! The engine is a pure per-tick transform over [`DeviceState`]. The caller
//! gates it on the timer's `updated` flag, so it runs at most once per
//! elapsed millisecond.

use crate::LampDriver;
use crate::config::Heartbeat;
use crate::state::{Blink, Channels, DeviceState};

/// What the blink overlay asks for on a given tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPhase {
    /// No blink edge this tick
    Idle,
    /// Start of a period: show the current color
    Show,
    /// Duty elapsed: show black for this render only
    Dark,
}

impl BlinkPhase {
    /// Blink edge for millisecond `time`.
    ///
    /// `Dark` wins when both edges coincide (`duty == 0`). A duty of at
    /// least the period never produces a `Dark` edge.
    #[allow(clippy::cast_lossless)]
    pub const fn at(blink: Blink, time: u32) -> Self {
        if !blink.is_enabled() {
            return Self::Idle;
        }
        let phase = time % blink.period as u32;
        if phase == blink.duty as u32 {
            Self::Dark
        } else if phase == 0 {
            Self::Show
        } else {
            Self::Idle
        }
    }
}

/// Outcome of one engine tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// A fade step changed at least one channel
    pub faded: bool,
    /// Color pushed to the serializer, if any
    pub rendered: Option<Channels>,
}

/// Per-millisecond fade/blink/heartbeat step
#[derive(Debug, Clone, Copy, Default)]
pub struct FadeBlinkEngine {
    heartbeat: Heartbeat,
}

impl FadeBlinkEngine {
    pub const fn new(heartbeat: Heartbeat) -> Self {
        Self { heartbeat }
    }

    /// Advance the animation for millisecond `time`
    pub fn tick<D: LampDriver>(
        &self,
        state: &mut DeviceState,
        time: u32,
        driver: &mut D,
    ) -> TickResult {
        let faded = state.step_fade();

        let phase = BlinkPhase::at(state.blink, time);
        let rendered = match phase {
            BlinkPhase::Dark => Some(Channels::BLACK),
            BlinkPhase::Show => Some(state.current),
            BlinkPhase::Idle if faded => Some(state.current),
            BlinkPhase::Idle => None,
        };
        if let Some(color) = rendered {
            driver.write(color);
        }

        if let Some(on) = self.heartbeat.at(time) {
            driver.set_status_led(on);
        }

        TickResult { faded, rendered }
    }
}
