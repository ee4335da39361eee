//! Device state shared by the command interpreter and the fade engine
//!
//! There is exactly one [`DeviceState`] per lamp. It is owned by the main
//! loop and never touched from interrupt context, so it needs no locking.

/// Default per-millisecond fade step
pub const DEFAULT_FADE_RATE: u16 = 256;

/// 16-bit red/green/blue channel triple
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Channels {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl Channels {
    /// All channels off
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(red: u16, green: u16, blue: u16) -> Self {
        Self { red, green, blue }
    }

    /// Move every channel toward `target` by at most `rate`.
    ///
    /// Returns `true` if any channel changed.
    pub fn step_toward(&mut self, target: Self, rate: u16) -> bool {
        let red = step_channel(&mut self.red, target.red, rate);
        let green = step_channel(&mut self.green, target.green, rate);
        let blue = step_channel(&mut self.blue, target.blue, rate);
        red || green || blue
    }
}

/// Saturating linear ramp of a single channel, never overshooting
fn step_channel(current: &mut u16, target: u16, rate: u16) -> bool {
    if *current == target {
        return false;
    }
    if *current < target {
        *current += (target - *current).min(rate);
    } else {
        *current -= (*current - target).min(rate);
    }
    true
}

/// Blink parameters in milliseconds
///
/// A zero period disables blinking. `duty <= period` is not enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blink {
    pub duty: u16,
    pub period: u16,
}

impl Blink {
    pub const DISABLED: Self = Self { duty: 0, period: 0 };

    pub const fn is_enabled(self) -> bool {
        self.period > 0
    }
}

/// Mutable lamp state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceState {
    /// Rendered channel values
    pub current: Channels,
    /// Fade destination
    pub target: Channels,
    /// Maximum step per millisecond, always non-zero
    fade_rate: u16,
    /// Whether commit lights the status indicator
    pub status: bool,
    pub blink: Blink,
}

impl DeviceState {
    /// Boot state: everything off, default fade rate, blink disabled
    pub const fn new() -> Self {
        Self::with_fade_rate(DEFAULT_FADE_RATE)
    }

    /// Boot state with a custom initial fade rate
    ///
    /// A zero rate falls back to [`DEFAULT_FADE_RATE`].
    pub const fn with_fade_rate(fade_rate: u16) -> Self {
        Self {
            current: Channels::BLACK,
            target: Channels::BLACK,
            fade_rate: if fade_rate == 0 {
                DEFAULT_FADE_RATE
            } else {
                fade_rate
            },
            status: false,
            blink: Blink::DISABLED,
        }
    }

    pub const fn fade_rate(&self) -> u16 {
        self.fade_rate
    }

    /// Set the fade rate.
    ///
    /// Zero never reaches the rate: it freezes the fade instead by snapping
    /// targets to the current color.
    pub fn set_fade_rate(&mut self, rate: u16) {
        if rate == 0 {
            self.cancel_fade();
        } else {
            self.fade_rate = rate;
        }
    }

    /// Stop any in-flight fade without changing the rendered color
    pub fn cancel_fade(&mut self) {
        self.target = self.current;
    }

    /// Whether current and target differ
    pub fn is_fading(&self) -> bool {
        self.current != self.target
    }

    /// Advance `current` one step toward `target`
    pub fn step_fade(&mut self) -> bool {
        self.current.step_toward(self.target, self.fade_rate)
    }
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}
