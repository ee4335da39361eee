//! WS2812 single-wire serializer
//!
//! Every bit occupies a fixed slot. The line goes high at the start of the
//! slot and falls early for a `0` or late for a `1`. Bytes go out MSB first in
//! green, red, blue order. A frame is sent with interrupts masked and is
//! followed by a quiet period so the LEDs latch the new color.
//!
//! [`BitBangWs2812`] drives a plain GPIO and busy-waits a cycle count between
//! edges. Targets with an RMT/PIO/SPI peripheral can plug their own
//! [`SmartLedsWrite`] implementation into [`crate::driver::Ws2812Lamp`]
//! instead.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use smart_leds::{RGB8, SmartLedsWrite};

/// High time of a `0` bit
pub const T0H_NS: u32 = 350;

/// High time of a `1` bit
pub const T1H_NS: u32 = 900;

/// Total bit slot
pub const SLOT_NS: u32 = 1250;

/// Allowed deviation for each of the above
pub const TOLERANCE_NS: u32 = 150;

/// Minimum quiet line time that latches the frame
pub const LATCH: Duration = Duration::from_micros(50);

/// Bits per LED frame
pub const FRAME_BITS: usize = 24;

/// Busy-wait for an exact number of CPU cycles
///
/// On Cortex-M this maps to `cortex_m::asm::delay`, on AVR to a counted
/// `nop` loop.
pub trait CycleDelay {
    fn delay_cycles(&mut self, cycles: u32);
}

/// Bit timing expressed in CPU cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitTiming {
    /// Cycles the line stays high for a `0`
    pub zero_high: u32,
    /// Cycles the line stays high for a `1`
    pub one_high: u32,
    /// Cycles of a full bit slot
    pub slot: u32,
    /// Cycles spent in each pin write and loop step, taken off every wait
    pub overhead: u32,
}

impl BitTiming {
    /// Derive cycle counts for a core clock, rounding to the nearest cycle
    pub const fn for_clock(clock_hz: u32) -> Self {
        Self {
            zero_high: ns_to_cycles(T0H_NS, clock_hz),
            one_high: ns_to_cycles(T1H_NS, clock_hz),
            slot: ns_to_cycles(SLOT_NS, clock_hz),
            overhead: 0,
        }
    }

    /// Account for `cycles` of pin-write overhead per phase
    pub const fn with_overhead(self, cycles: u32) -> Self {
        Self {
            overhead: cycles,
            ..self
        }
    }

    /// Busy-wait after the rising edge of `bit`
    pub const fn high_wait(self, bit: bool) -> u32 {
        self.high(bit).saturating_sub(self.overhead)
    }

    /// Busy-wait after the falling edge of `bit`
    pub const fn low_wait(self, bit: bool) -> u32 {
        self.low(bit).saturating_sub(self.overhead)
    }

    /// Cycles the line stays low after the high phase of `bit`
    pub const fn low(self, bit: bool) -> u32 {
        self.slot.saturating_sub(self.high(bit))
    }

    /// Cycles the line stays high for `bit`
    pub const fn high(self, bit: bool) -> u32 {
        if bit { self.one_high } else { self.zero_high }
    }
}

#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
const fn ns_to_cycles(ns: u32, clock_hz: u32) -> u32 {
    ((ns as u64 * clock_hz as u64 + 500_000_000) / 1_000_000_000) as u32
}

/// Convert cycles back to nanoseconds for a given clock
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn cycles_to_ns(cycles: u32, clock_hz: u32) -> u32 {
    (cycles as u64 * 1_000_000_000 / clock_hz as u64) as u32
}

/// Wire order of a color: green, red, blue
#[inline]
pub const fn grb_bytes(color: RGB8) -> [u8; 3] {
    [color.g, color.r, color.b]
}

/// Bit-banged WS2812 output on a single GPIO
pub struct BitBangWs2812<P, C, D> {
    pin: P,
    cycles: C,
    delay: D,
    timing: BitTiming,
}

impl<P, C, D> BitBangWs2812<P, C, D>
where
    P: OutputPin,
    C: CycleDelay,
    D: DelayNs,
{
    /// Create a serializer for a core running at `clock_hz`
    pub const fn new(pin: P, cycles: C, delay: D, clock_hz: u32) -> Self {
        Self::with_timing(pin, cycles, delay, BitTiming::for_clock(clock_hz))
    }

    pub const fn with_timing(pin: P, cycles: C, delay: D, timing: BitTiming) -> Self {
        Self {
            pin,
            cycles,
            delay,
            timing,
        }
    }

    pub const fn timing(&self) -> BitTiming {
        self.timing
    }

    /// Release the underlying peripherals
    pub fn release(self) -> (P, C, D) {
        (self.pin, self.cycles, self.delay)
    }

    fn send_byte(&mut self, byte: u8) -> Result<(), P::Error> {
        for shift in (0..8).rev() {
            let bit = byte & (1 << shift) != 0;
            self.pin.set_high()?;
            self.cycles.delay_cycles(self.timing.high_wait(bit));
            self.pin.set_low()?;
            self.cycles.delay_cycles(self.timing.low_wait(bit));
        }
        Ok(())
    }
}

impl<P, C, D> SmartLedsWrite for BitBangWs2812<P, C, D>
where
    P: OutputPin,
    C: CycleDelay,
    D: DelayNs,
{
    type Error = P::Error;
    type Color = RGB8;

    /// Send one frame per color, then hold the line low for the latch time.
    ///
    /// The whole chain goes out inside one critical section: a gap longer
    /// than a few microseconds between LEDs would latch early.
    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let sent: Result<(), P::Error> = critical_section::with(|_| {
            for color in iterator {
                for byte in grb_bytes(color.into()) {
                    self.send_byte(byte)?;
                }
            }
            Ok(())
        });
        // Latch even after a pin error so the next frame starts clean
        #[allow(clippy::cast_possible_truncation)]
        self.delay.delay_us(LATCH.as_micros() as u32);
        sent
    }
}
