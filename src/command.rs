//! Command interpreter
//!
//! Turns inbound setup packets into [`DeviceState`] mutations. Called
//! synchronously from the USB transport for every control setup packet, so
//! nothing here blocks. Corrupted packets and unknown opcodes are dropped
//! silently; every path returns a zero-length response.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::LampDriver;
use crate::protocol::{Channel, PACKET_LEN, Request, SetupPacket};
use crate::state::{Blink, Channels, DeviceState};

/// Response length reported back to the transport (no data stage)
pub const NO_DATA: usize = 0;

/// Decodes control requests into state changes
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandInterpreter;

impl CommandInterpreter {
    pub const fn new() -> Self {
        Self
    }

    /// Handle one raw setup packet including its CRC trailer.
    ///
    /// Returns the response length for the transport.
    pub fn handle<D: LampDriver>(
        &self,
        raw: &[u8; PACKET_LEN],
        state: &mut DeviceState,
        driver: &mut D,
    ) -> usize {
        let packet = match SetupPacket::parse(raw) {
            Ok(packet) => packet,
            Err(_err) => {
                #[cfg(feature = "esp32-log")]
                println!("[CommandInterpreter.handle] dropping packet: {:?}", _err);
                return NO_DATA;
            }
        };

        match Request::from_packet(&packet) {
            Some(request) => Self::apply(request, state, driver),
            None => {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[CommandInterpreter.handle] ignoring opcode {:?}",
                    packet.request
                );
            }
        }
        NO_DATA
    }

    /// Apply a decoded request
    pub fn apply<D: LampDriver>(request: Request, state: &mut DeviceState, driver: &mut D) {
        match request {
            Request::Reset => Self::reset(state, driver),
            Request::Commit => Self::commit(state, driver),
            Request::SetStatus(on) => state.status = on,
            Request::SetChannel(channel, value) => {
                *channel_mut(&mut state.current, channel) = value;
                state.cancel_fade();
            }
            Request::FadeChannel(channel, value) => {
                *channel_mut(&mut state.target, channel) = value;
            }
            Request::SetFadeRate(rate) => state.set_fade_rate(rate),
            Request::SetBlink { duty, period } => {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[CommandInterpreter.apply] blink duty={:?} period={:?}",
                    duty, period
                );
                state.blink = Blink { duty, period };
                if period == 0 {
                    driver.write(state.current);
                }
            }
        }
    }

    /// Everything off, then commit
    pub fn reset<D: LampDriver>(state: &mut DeviceState, driver: &mut D) {
        state.current = Channels::BLACK;
        state.target = Channels::BLACK;
        state.status = false;
        Self::commit(state, driver);
    }

    /// Apply status, render the current color and cancel any fade
    pub fn commit<D: LampDriver>(state: &mut DeviceState, driver: &mut D) {
        #[cfg(feature = "esp32-log")]
        println!("[CommandInterpreter.commit] {:?}", state.current);
        driver.set_status_led(state.status);
        driver.write(state.current);
        state.cancel_fade();
    }
}

fn channel_mut(channels: &mut Channels, channel: Channel) -> &mut u16 {
    match channel {
        Channel::Red => &mut channels.red,
        Channel::Green => &mut channels.green,
        Channel::Blue => &mut channels.blue,
    }
}
