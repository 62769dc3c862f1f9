//! Commands accepted by the command register.

use crate::model::Mode;
use crate::reg::*;

/// Slowest scan speed accepted by the sensor.
pub const MAX_SCAN_SPEED: u8 = 3;
/// Scan resolution bounds, in bits.
pub const MIN_RESOLUTION: u8 = 9;
pub const MAX_RESOLUTION: u8 = 16;
/// Prescaler bounds.
pub const MIN_PRESCALER: u8 = 1;
pub const MAX_PRESCALER: u8 = 8;

/// A command for the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    /// Select what the data register returns.
    Mode(Mode),
    /// Scan speed (0 fastest to 3 slowest) and resolution in bits.
    ScanSettings { speed: u8, resolution: u8 },
    Prescaler(u8),
    /// Noise threshold used in centroid and diff modes.
    NoiseThreshold(u8),
    Idac(u8),
    /// Take the current readings as the new baseline.
    BaselineUpdate,
    /// Smallest touch size that is reported.
    MinimumSize(u16),
    /// Interval of automatic scans, used together with the EVT pin.
    AutoScanInterval(u16),
    /// Make the next read return `[reserved, device type, firmware]`.
    Identify,
}

impl Command {
    /// Scan settings with `speed` and `resolution` clamped to what the sensor
    /// accepts.
    pub fn scan_settings(speed: u8, resolution: u8) -> Self {
        let clamped_speed = speed.min(MAX_SCAN_SPEED);
        let clamped_resolution = resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION);
        if clamped_speed != speed || clamped_resolution != resolution {
            log::debug!(
                "trill: scan settings ({speed}, {resolution}) clamped to ({clamped_speed}, {clamped_resolution})"
            );
        }
        Self::ScanSettings {
            speed: clamped_speed,
            resolution: clamped_resolution,
        }
    }

    /// Prescaler clamped to `1..=8`.
    pub fn prescaler(prescaler: u8) -> Self {
        let clamped = prescaler.clamp(MIN_PRESCALER, MAX_PRESCALER);
        if clamped != prescaler {
            log::debug!("trill: prescaler {prescaler} clamped to {clamped}");
        }
        Self::Prescaler(clamped)
    }

    /// The command code written first.
    pub fn code(&self) -> u8 {
        match self {
            Self::None => COMMAND_NONE,
            Self::Mode(_) => COMMAND_MODE,
            Self::ScanSettings { .. } => COMMAND_SCAN_SETTINGS,
            Self::Prescaler(_) => COMMAND_PRESCALER,
            Self::NoiseThreshold(_) => COMMAND_NOISE_THRESHOLD,
            Self::Idac(_) => COMMAND_IDAC,
            Self::BaselineUpdate => COMMAND_BASELINE_UPDATE,
            Self::MinimumSize(_) => COMMAND_MINIMUM_SIZE,
            Self::AutoScanInterval(_) => COMMAND_AUTO_SCAN_INTERVAL,
            Self::Identify => COMMAND_IDENTIFY,
        }
    }

    /// The bytes of a write to `register` carrying this command.
    pub fn frame(&self, register: u8) -> CommandFrame {
        let mut inner = [register, self.code(), 0, 0];
        let params = match *self {
            Self::None | Self::BaselineUpdate | Self::Identify => 0,
            Self::Mode(mode) => {
                inner[2] = mode as u8;
                1
            }
            Self::Prescaler(value) | Self::NoiseThreshold(value) | Self::Idac(value) => {
                inner[2] = value;
                1
            }
            Self::ScanSettings { speed, resolution } => {
                inner[2] = speed;
                inner[3] = resolution;
                2
            }
            Self::MinimumSize(value) | Self::AutoScanInterval(value) => {
                let [hi, lo] = value.to_be_bytes();
                inner[2] = hi;
                inner[3] = lo;
                2
            }
        };
        CommandFrame {
            inner,
            len: 2 + params,
        }
    }
}

/// A command register write: register address, command code, parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame {
    inner: [u8; 4],
    len: usize,
}

impl CommandFrame {
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner[..self.len]
    }
}
