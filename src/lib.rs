#![no_std]

pub mod command;
pub mod config;
pub mod driver;
pub mod engine;
pub mod gamma;
pub mod lamp;
pub mod protocol;
pub mod state;
pub mod timer;
pub mod ws2812;

pub use command::CommandInterpreter;
pub use config::{Heartbeat, LampConfig};
pub use driver::{LampDriver, Polarity, Ws2812Lamp};
pub use engine::{BlinkPhase, FadeBlinkEngine, TickResult};
pub use lamp::{Lamp, OscillatorCalibration};
pub use protocol::{Opcode, PacketError, Request, SetupPacket};
pub use state::{Blink, Channels, DeviceState};
pub use timer::{TickTimer, TimeVal, TimerConfig};
pub use ws2812::{BitBangWs2812, BitTiming, CycleDelay};

pub use embassy_time::{Duration, Instant};
pub use smart_leds::RGB8;
