//! Static parameters of the Trill sensor models.

use crate::reg::{REG_COMMAND, REG_DATA};
use crate::touch::centroid_len;

/// The largest number of samples a single scan can carry.
pub const MAX_SCAN_WORDS: usize = 30;

/// Whether a sensor reports touches along one axis or two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    /// One-directional (Bar, Craft, Ring, Flex).
    OneAxis,
    /// Two-directional (Square, Hex).
    TwoAxis,
}

/// The data a sensor returns from its data register.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Touch positions and sizes.
    Centroid = 0x00,
    /// Raw per-channel capacitance.
    Raw = 0x01,
    /// Per-channel baseline.
    Baseline = 0x02,
    /// Per-channel difference to the baseline.
    Diff = 0x03,
}

/// A member of the Trill sensor family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorModel {
    Bar,
    Square,
    Craft,
    Ring,
    Hex,
    Flex,
}

/// Per-model constants. These never change after a session is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelParameters {
    /// The code the sensor reports when asked to identify itself.
    pub device_type: u8,
    /// Factory I2C address.
    pub default_address: u8,
    /// Number of capacitive channels.
    pub channels: usize,
    /// Number of touch slots reported in centroid mode.
    pub max_touches: usize,
    pub geometry: Geometry,
    /// Position range as `(x, y)`.
    pub size: (u16, u16),
    pub command_register: u8,
    pub data_register: u8,
}

const fn params(
    device_type: u8,
    default_address: u8,
    channels: usize,
    max_touches: usize,
    geometry: Geometry,
    size: (u16, u16),
) -> ModelParameters {
    ModelParameters {
        device_type,
        default_address,
        channels,
        max_touches,
        geometry,
        size,
        command_register: REG_COMMAND,
        data_register: REG_DATA,
    }
}

const BAR: ModelParameters = params(1, 0x20, 26, 5, Geometry::OneAxis, (1, 3200));
const SQUARE: ModelParameters = params(2, 0x28, 30, 4, Geometry::TwoAxis, (1792, 1792));
const CRAFT: ModelParameters = params(3, 0x30, 30, 5, Geometry::OneAxis, (1, 4096));
const RING: ModelParameters = params(4, 0x38, 28, 5, Geometry::OneAxis, (1, 3584));
const HEX: ModelParameters = params(5, 0x40, 30, 4, Geometry::TwoAxis, (1664, 1920));
const FLEX: ModelParameters = params(6, 0x48, 30, 5, Geometry::OneAxis, (1, 3712));

impl SensorModel {
    /// All known models, in device type order.
    pub const ALL: [SensorModel; 6] = [
        Self::Bar,
        Self::Square,
        Self::Craft,
        Self::Ring,
        Self::Hex,
        Self::Flex,
    ];

    /// The static parameters of this model.
    pub const fn parameters(self) -> ModelParameters {
        match self {
            Self::Bar => BAR,
            Self::Square => SQUARE,
            Self::Craft => CRAFT,
            Self::Ring => RING,
            Self::Hex => HEX,
            Self::Flex => FLEX,
        }
    }

    /// Looks up a model by the code it reports on identification.
    pub fn from_device_type(code: u8) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|model| model.parameters().device_type == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bar => "Bar",
            Self::Square => "Square",
            Self::Craft => "Craft",
            Self::Ring => "Ring",
            Self::Hex => "Hex",
            Self::Flex => "Flex",
        }
    }
}

impl ModelParameters {
    /// Number of samples one scan returns in `mode`.
    pub fn scan_len(&self, mode: Mode) -> usize {
        match mode {
            Mode::Centroid => centroid_len(self.geometry, self.max_touches),
            Mode::Raw | Mode::Baseline | Mode::Diff => self.channels,
        }
    }
}
