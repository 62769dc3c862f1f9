//! Session configuration.

use crate::model::{Mode, SensorModel};

/// Default wait after each bus command, in milliseconds.
pub const DEFAULT_SETTLE_DELAY_MS: u32 = 10;
pub const DEFAULT_SCAN_SPEED: u8 = 0;
pub const DEFAULT_RESOLUTION: u8 = 12;

/// Parameters of a sensor session that the caller may choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The I2C address of the sensor.
    pub address: u8,
    /// The mode set by `init`.
    pub mode: Mode,
    /// Wait after each command before the next register access.
    pub settle_delay_ms: u32,
    /// Scan speed set by `init`, 0 (fastest) to 3.
    pub scan_speed: u8,
    /// Scan resolution in bits set by `init`, 9 to 16.
    pub resolution: u8,
}

impl Config {
    /// The factory address of `model`, centroid mode and default timing.
    pub const fn for_model(model: SensorModel) -> Self {
        Self {
            address: model.parameters().default_address,
            mode: Mode::Centroid,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            scan_speed: DEFAULT_SCAN_SPEED,
            resolution: DEFAULT_RESOLUTION,
        }
    }

    /// Use a non-default I2C address, e.g. when the address pads are bridged.
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_settle_delay_ms(mut self, settle_delay_ms: u32) -> Self {
        self.settle_delay_ms = settle_delay_ms;
        self
    }

    pub fn with_scan_settings(mut self, speed: u8, resolution: u8) -> Self {
        self.scan_speed = speed;
        self.resolution = resolution;
        self
    }
}
