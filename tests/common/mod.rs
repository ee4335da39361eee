#![allow(dead_code)]

use myrtio_usb_lamp::{Channels, LampDriver};

/// Something the lamp did to its hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Write(Channels),
    Status(bool),
}

/// Driver that records every call instead of touching hardware
#[derive(Debug, Default)]
pub struct RecordingDriver {
    pub events: Vec<Event>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colors pushed to the serializer, in order
    pub fn writes(&self) -> Vec<Channels> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Write(color) => Some(*color),
                Event::Status(_) => None,
            })
            .collect()
    }

    /// Indicator changes, in order
    pub fn status_changes(&self) -> Vec<bool> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Status(on) => Some(*on),
                Event::Write(_) => None,
            })
            .collect()
    }

    pub fn last_write(&self) -> Option<Channels> {
        self.writes().last().copied()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl LampDriver for RecordingDriver {
    fn write(&mut self, color: Channels) {
        self.events.push(Event::Write(color));
    }

    fn set_status_led(&mut self, on: bool) {
        self.events.push(Event::Status(on));
    }
}
