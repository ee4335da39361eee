//! Output driver abstraction
//!
//! The engine and interpreter only talk to a [`LampDriver`]. The stock
//! implementation, [`Ws2812Lamp`], gamma-corrects the color, repeats it over a
//! chain of `N` LEDs and hands the frame to any [`SmartLedsWrite`] backend.

use embedded_hal::digital::{OutputPin, PinState};
use smart_leds::{RGB8, SmartLedsWrite};

use crate::config::LampConfig;
use crate::gamma::correct_channels;
use crate::state::Channels;

/// Abstract lamp hardware
///
/// Implement this trait to support different hardware platforms.
pub trait LampDriver {
    /// Render a 16-bit color on the RGB LED(s). Never fails from the
    /// caller's point of view.
    fn write(&mut self, color: Channels);

    /// Switch the status indicator
    fn set_status_led(&mut self, on: bool);
}

/// Electrical polarity of the status indicator pin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Polarity {
    /// Driving the pin low lights the LED
    #[default]
    ActiveLow,
    ActiveHigh,
}

impl Polarity {
    pub const fn pin_state(self, on: bool) -> PinState {
        match (self, on) {
            (Self::ActiveHigh, true) | (Self::ActiveLow, false) => PinState::High,
            (Self::ActiveHigh, false) | (Self::ActiveLow, true) => PinState::Low,
        }
    }
}

/// WS2812 chain plus a GPIO status LED
pub struct Ws2812Lamp<W, S, const N: usize = 1> {
    leds: W,
    status: S,
    polarity: Polarity,
}

impl<W, S, const N: usize> Ws2812Lamp<W, S, N>
where
    W: SmartLedsWrite<Color = RGB8>,
    S: OutputPin,
{
    pub const fn new(leds: W, status: S, polarity: Polarity) -> Self {
        Self {
            leds,
            status,
            polarity,
        }
    }

    /// Build with the status polarity from `config`
    pub const fn from_config(leds: W, status: S, config: &LampConfig) -> Self {
        Self::new(leds, status, config.status_polarity)
    }

    pub fn release(self) -> (W, S) {
        (self.leds, self.status)
    }
}

impl<W, S, const N: usize> LampDriver for Ws2812Lamp<W, S, N>
where
    W: SmartLedsWrite<Color = RGB8>,
    S: OutputPin,
{
    fn write(&mut self, color: Channels) {
        let frame = [correct_channels(color); N];
        // No presence detection on the bus, nothing useful to do on error
        let _ = self.leds.write(frame);
    }

    fn set_status_led(&mut self, on: bool) {
        let _ = self.status.set_state(self.polarity.pin_state(on));
    }
}
