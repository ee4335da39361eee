//! Vendor control-transfer protocol
//!
//! Each command is a vendor OUT control request without a data stage:
//! `bRequest` carries the opcode, `wValue` and `wIndex` the parameters. The
//! transport appends the 2-byte CRC-16/USB of the setup packet, and a packet
//! is accepted only if the CRC over all ten bytes leaves the fixed residue.

use crc::{CRC_16_USB, Crc};

/// USB vendor id of the lamp
pub const VENDOR_ID: u16 = 0xF055;

/// USB product id of the lamp
pub const PRODUCT_ID: u16 = 0x49D9;

/// Setup packet length without the trailer
pub const SETUP_LEN: usize = 8;

/// Setup packet length including the CRC trailer
pub const PACKET_LEN: usize = SETUP_LEN + 2;

/// CRC-16/USB residue of a packet with a valid trailer
pub const CRC_RESIDUE: u16 = 0x4FFE;

/// `bmRequestType` for host-to-device vendor requests addressed to the device
pub const REQUEST_TYPE_VENDOR_OUT: u8 = 0x40;

/// Fade speed used by host tools when none is given
pub const DEFAULT_FADE_SPEED: u16 = 256;

const OPCODE_RESET: u8 = 0;
const OPCODE_COMMIT: u8 = 1;
const OPCODE_SET_STATUS: u8 = 2;
const OPCODE_SET_RED: u8 = 3;
const OPCODE_SET_GREEN: u8 = 4;
const OPCODE_SET_BLUE: u8 = 5;
const OPCODE_FADE_RED: u8 = 6;
const OPCODE_FADE_GREEN: u8 = 7;
const OPCODE_FADE_BLUE: u8 = 8;
const OPCODE_SET_FADE_RATE: u8 = 9;
const OPCODE_SET_BLINK: u8 = 10;

/// CRC-16/USB (reflected 0x8005, init 0xFFFF, inverted output)
const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_USB);

/// CRC-16/USB checksum of `data`
pub fn crc16(data: &[u8]) -> u16 {
    CRC16.checksum(data)
}

/// Color channel addressed by an opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// Known opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    /// Everything off, then commit
    Reset = OPCODE_RESET,
    /// Apply status and render the current color, cancelling any fade
    Commit = OPCODE_COMMIT,
    SetStatus = OPCODE_SET_STATUS,
    SetRed = OPCODE_SET_RED,
    SetGreen = OPCODE_SET_GREEN,
    SetBlue = OPCODE_SET_BLUE,
    FadeRed = OPCODE_FADE_RED,
    FadeGreen = OPCODE_FADE_GREEN,
    FadeBlue = OPCODE_FADE_BLUE,
    SetFadeRate = OPCODE_SET_FADE_RATE,
    /// `wValue` is the duty, `wIndex` the period
    SetBlink = OPCODE_SET_BLINK,
}

impl Opcode {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            OPCODE_RESET => Self::Reset,
            OPCODE_COMMIT => Self::Commit,
            OPCODE_SET_STATUS => Self::SetStatus,
            OPCODE_SET_RED => Self::SetRed,
            OPCODE_SET_GREEN => Self::SetGreen,
            OPCODE_SET_BLUE => Self::SetBlue,
            OPCODE_FADE_RED => Self::FadeRed,
            OPCODE_FADE_GREEN => Self::FadeGreen,
            OPCODE_FADE_BLUE => Self::FadeBlue,
            OPCODE_SET_FADE_RATE => Self::SetFadeRate,
            OPCODE_SET_BLINK => Self::SetBlink,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }
}

/// Error returned for a packet that fails the integrity check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketError {
    /// CRC residue mismatch
    Corrupted { residue: u16 },
}

/// Decoded setup packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupPacket {
    pub request_type: u8,
    /// Raw opcode
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub length: u16,
}

impl SetupPacket {
    /// Vendor OUT request without data stage
    pub const fn vendor(request: u8, value: u16, index: u16) -> Self {
        Self {
            request_type: REQUEST_TYPE_VENDOR_OUT,
            request,
            value,
            index,
            length: 0,
        }
    }

    /// Validate the CRC trailer and decode the setup fields
    pub fn parse(raw: &[u8; PACKET_LEN]) -> Result<Self, PacketError> {
        let residue = crc16(raw);
        if residue != CRC_RESIDUE {
            return Err(PacketError::Corrupted { residue });
        }
        Ok(Self {
            request_type: raw[0],
            request: raw[1],
            value: u16::from_le_bytes([raw[2], raw[3]]),
            index: u16::from_le_bytes([raw[4], raw[5]]),
            length: u16::from_le_bytes([raw[6], raw[7]]),
        })
    }

    /// Setup bytes followed by a valid little-endian CRC trailer
    pub fn encode(&self) -> [u8; PACKET_LEN] {
        let [value_lo, value_hi] = self.value.to_le_bytes();
        let [index_lo, index_hi] = self.index.to_le_bytes();
        let [length_lo, length_hi] = self.length.to_le_bytes();
        let mut raw = [
            self.request_type,
            self.request,
            value_lo,
            value_hi,
            index_lo,
            index_hi,
            length_lo,
            length_hi,
            0,
            0,
        ];
        let [crc_lo, crc_hi] = crc16(&raw[..SETUP_LEN]).to_le_bytes();
        raw[SETUP_LEN] = crc_lo;
        raw[SETUP_LEN + 1] = crc_hi;
        raw
    }

    pub const fn opcode(&self) -> Option<Opcode> {
        Opcode::from_raw(self.request)
    }
}

/// Typed command, as issued by a host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Reset,
    Commit,
    SetStatus(bool),
    SetChannel(Channel, u16),
    FadeChannel(Channel, u16),
    SetFadeRate(u16),
    SetBlink { duty: u16, period: u16 },
}

impl Request {
    /// Opcode, `wValue` and `wIndex` of this request
    #[allow(clippy::cast_lossless)]
    pub const fn to_raw(self) -> (u8, u16, u16) {
        match self {
            Self::Reset => (OPCODE_RESET, 0, 0),
            Self::Commit => (OPCODE_COMMIT, 0, 0),
            Self::SetStatus(on) => (OPCODE_SET_STATUS, on as u16, 0),
            Self::SetChannel(channel, value) => {
                let opcode = match channel {
                    Channel::Red => OPCODE_SET_RED,
                    Channel::Green => OPCODE_SET_GREEN,
                    Channel::Blue => OPCODE_SET_BLUE,
                };
                (opcode, value, 0)
            }
            Self::FadeChannel(channel, value) => {
                let opcode = match channel {
                    Channel::Red => OPCODE_FADE_RED,
                    Channel::Green => OPCODE_FADE_GREEN,
                    Channel::Blue => OPCODE_FADE_BLUE,
                };
                (opcode, value, 0)
            }
            Self::SetFadeRate(rate) => (OPCODE_SET_FADE_RATE, rate, 0),
            Self::SetBlink { duty, period } => (OPCODE_SET_BLINK, duty, period),
        }
    }

    /// Decode a setup packet into a typed request
    pub const fn from_packet(packet: &SetupPacket) -> Option<Self> {
        let Some(opcode) = packet.opcode() else {
            return None;
        };
        let value = packet.value;
        Some(match opcode {
            Opcode::Reset => Self::Reset,
            Opcode::Commit => Self::Commit,
            Opcode::SetStatus => Self::SetStatus(value != 0),
            Opcode::SetRed => Self::SetChannel(Channel::Red, value),
            Opcode::SetGreen => Self::SetChannel(Channel::Green, value),
            Opcode::SetBlue => Self::SetChannel(Channel::Blue, value),
            Opcode::FadeRed => Self::FadeChannel(Channel::Red, value),
            Opcode::FadeGreen => Self::FadeChannel(Channel::Green, value),
            Opcode::FadeBlue => Self::FadeChannel(Channel::Blue, value),
            Opcode::SetFadeRate => Self::SetFadeRate(value),
            Opcode::SetBlink => Self::SetBlink {
                duty: value,
                period: packet.index,
            },
        })
    }

    pub const fn to_packet(self) -> SetupPacket {
        let (request, value, index) = self.to_raw();
        SetupPacket::vendor(request, value, index)
    }
}

/// Error from host-side request builders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// Blink duty longer than its period
    DutyExceedsPeriod,
}

/// Set a color immediately: three channel writes and a commit
pub const fn set_color(red: u16, green: u16, blue: u16) -> [Request; 4] {
    [
        Request::SetChannel(Channel::Red, red),
        Request::SetChannel(Channel::Green, green),
        Request::SetChannel(Channel::Blue, blue),
        Request::Commit,
    ]
}

/// Fade to a color. `speed` defaults to [`DEFAULT_FADE_SPEED`].
pub const fn fade_to(red: u16, green: u16, blue: u16, speed: Option<u16>) -> [Request; 4] {
    let speed = match speed {
        Some(speed) => speed,
        None => DEFAULT_FADE_SPEED,
    };
    [
        Request::SetFadeRate(speed),
        Request::FadeChannel(Channel::Red, red),
        Request::FadeChannel(Channel::Green, green),
        Request::FadeChannel(Channel::Blue, blue),
    ]
}

/// Blink with `duty` ms on per `period` ms.
///
/// Without a period the argument is the period and the duty is half of it.
pub const fn blink(duty: u16, period: Option<u16>) -> Result<Request, RequestError> {
    let (duty, period) = match period {
        Some(period) => (duty, period),
        None => (duty / 2, duty),
    };
    if duty > period {
        return Err(RequestError::DutyExceedsPeriod);
    }
    Ok(Request::SetBlink { duty, period })
}

/// Stop blinking
pub const fn blink_off() -> Request {
    Request::SetBlink { duty: 0, period: 0 }
}

/// Switch the status indicator and commit
pub const fn status(on: bool) -> [Request; 2] {
    [Request::SetStatus(on), Request::Commit]
}

/// Everything off
pub const fn off() -> Request {
    Request::Reset
}
