//! Millisecond tick timer
//!
//! The counter is advanced from the compare-match interrupt and read by the
//! main loop. Both sides go through a `critical-section` mutex so the
//! `{time, updated}` pair is never observed half-written.
//!
//! Ticks whose interrupt fires while interrupts are masked (for example
//! during a serializer frame) are lost. The counter does not catch up.

use core::cell::Cell;

use critical_section::Mutex;
use embassy_time::Instant;

/// Reference clock of the original board (16.5 MHz internal RC after USB sync)
pub const REFERENCE_CLOCK_HZ: u32 = 16_500_000;

/// Reference hardware prescaler
pub const REFERENCE_PRESCALER: u32 = 128;

/// Snapshot of the timer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeVal {
    /// Milliseconds since boot, wrapping after ~49 days
    pub time: u32,
    /// Set by the interrupt, cleared by [`TickTimer::read_and_clear`]
    pub updated: bool,
}

impl TimeVal {
    pub const fn new(time: u32) -> Self {
        Self {
            time,
            updated: false,
        }
    }

    /// Counter value as an `embassy_time` instant
    #[allow(clippy::cast_lossless)]
    pub const fn instant(self) -> Instant {
        Instant::from_millis(self.time as u64)
    }
}

/// Compare-match configuration for a 1 ms hardware tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// Counts per millisecond after the prescaler
    pub counts: u32,
    pub prescaler: u32,
}

impl TimerConfig {
    /// Derive the tick length from a clock frequency and prescaler.
    ///
    /// The count is rounded to the nearest integer, so 16.5 MHz / 128 gives
    /// 129 counts (128.9 exact).
    #[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
    pub const fn for_clock(clock_hz: u32, prescaler: u32) -> Self {
        let per_ms = prescaler as u64 * 1000;
        let counts = (clock_hz as u64 + per_ms / 2) / per_ms;
        Self {
            counts: counts as u32,
            prescaler,
        }
    }

    /// Value for the compare register (counts from 0 to `counts - 1`)
    pub const fn compare_value(self) -> u32 {
        self.counts.saturating_sub(1)
    }

    /// Actual tick period in nanoseconds for the given clock
    #[allow(clippy::cast_lossless)]
    pub const fn tick_ns(self, clock_hz: u32) -> u64 {
        self.counts as u64 * self.prescaler as u64 * 1_000_000_000 / clock_hz as u64
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::for_clock(REFERENCE_CLOCK_HZ, REFERENCE_PRESCALER)
    }
}

/// Interrupt-shared millisecond counter
///
/// Intended to live in a `static`:
///
/// ```ignore
/// static TIMER: TickTimer = TickTimer::new();
///
/// #[interrupt]
/// fn TIMER1_COMPA() {
///     TIMER.on_compare_match();
/// }
/// ```
pub struct TickTimer {
    inner: Mutex<Cell<TimeVal>>,
}

impl TickTimer {
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Timer whose counter starts at `time` instead of zero
    pub const fn starting_at(time: u32) -> Self {
        Self {
            inner: Mutex::new(Cell::new(TimeVal::new(time))),
        }
    }

    /// Compare-match handler. Call from the timer interrupt only.
    pub fn on_compare_match(&self) {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let value = cell.get();
            cell.set(TimeVal {
                time: value.time.wrapping_add(1),
                updated: true,
            });
        });
    }

    /// Take a snapshot and clear the `updated` flag in one critical section
    pub fn read_and_clear(&self) -> TimeVal {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let value = cell.get();
            if value.updated {
                cell.set(TimeVal::new(value.time));
            }
            value
        })
    }

    /// Peek at the flag without clearing it
    pub fn is_updated(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).get().updated)
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new()
    }
}
