//! Lamp orchestrator
//!
//! Owns the device state and the output driver and exposes the three entry
//! points the firmware needs: the main-loop [`Lamp::poll`], the transport's
//! setup callback [`Lamp::setup`] and the bus reset hook [`Lamp::usb_reset`].
//!
//! # Usage
//!
//! ```ignore
//! static TIMER: TickTimer = TickTimer::new();
//!
//! let mut lamp = Lamp::new(driver, &LampConfig::default());
//! lamp.start();
//!
//! loop {
//!     usb.poll(|setup| lamp.setup(setup));
//!     lamp.poll(&TIMER);
//! }
//! ```

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::LampDriver;
use crate::command::CommandInterpreter;
use crate::config::LampConfig;
use crate::engine::{FadeBlinkEngine, TickResult};
use crate::protocol::PACKET_LEN;
use crate::state::{Channels, DeviceState};
use crate::timer::TickTimer;

/// Clock recalibration run on every USB bus reset
pub trait OscillatorCalibration {
    fn calibrate(&mut self);
}

/// A USB lamp: state, animation engine, command interpreter and hardware
pub struct Lamp<D: LampDriver> {
    driver: D,
    state: DeviceState,
    engine: FadeBlinkEngine,
    interpreter: CommandInterpreter,
}

impl<D: LampDriver> Lamp<D> {
    pub const fn new(driver: D, config: &LampConfig) -> Self {
        Self {
            driver,
            state: DeviceState::with_fade_rate(config.fade_rate),
            engine: FadeBlinkEngine::new(config.heartbeat),
            interpreter: CommandInterpreter::new(),
        }
    }

    /// Power-on: make sure the LED is dark and light the indicator.
    ///
    /// The heartbeat's off edge ends this boot blink 10 ms in.
    pub fn start(&mut self) {
        self.driver.write(Channels::BLACK);
        self.driver.set_status_led(true);
    }

    /// Main-loop step.
    ///
    /// Runs the engine once if the timer reported a new millisecond.
    pub fn poll(&mut self, timer: &TickTimer) -> Option<TickResult> {
        let now = timer.read_and_clear();
        if !now.updated {
            return None;
        }
        Some(self.tick(now.time))
    }

    /// Run the engine for millisecond `time` unconditionally
    pub fn tick(&mut self, time: u32) -> TickResult {
        self.engine.tick(&mut self.state, time, &mut self.driver)
    }

    /// Transport callback for a control setup packet with CRC trailer.
    ///
    /// Returns the response length.
    pub fn setup(&mut self, raw: &[u8; PACKET_LEN]) -> usize {
        self.interpreter
            .handle(raw, &mut self.state, &mut self.driver)
    }

    /// Transport hook for a USB bus reset
    pub fn usb_reset<C: OscillatorCalibration>(&mut self, calibration: &mut C) {
        #[cfg(feature = "esp32-log")]
        println!("[Lamp.usb_reset] recalibrating oscillator");
        calibration.calibrate();
    }

    pub const fn state(&self) -> &DeviceState {
        &self.state
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn release(self) -> D {
        self.driver
    }
}
