//! Register addresses and command codes.

/// Commands are written here.
pub const REG_COMMAND: u8 = 0x00;
/// Scan data and identification responses are read from here.
pub const REG_DATA: u8 = 0x04;

pub const COMMAND_NONE: u8 = 0x00;
pub const COMMAND_MODE: u8 = 0x01;
pub const COMMAND_SCAN_SETTINGS: u8 = 0x02;
pub const COMMAND_PRESCALER: u8 = 0x03;
pub const COMMAND_NOISE_THRESHOLD: u8 = 0x04;
pub const COMMAND_IDAC: u8 = 0x05;
pub const COMMAND_BASELINE_UPDATE: u8 = 0x06;
pub const COMMAND_MINIMUM_SIZE: u8 = 0x07;
pub const COMMAND_AUTO_SCAN_INTERVAL: u8 = 0x10;
pub const COMMAND_IDENTIFY: u8 = 0xFF;

/// Extra wait after `IDENTIFY` on top of the settle delay.
pub const IDENTIFY_EXTRA_DELAY_MS: u32 = 15;
/// Wait between pointing at the data register and sending `IDENTIFY`.
pub const IDENTIFY_POINTER_DELAY_MS: u32 = 10;
