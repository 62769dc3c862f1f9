//! A `no_std` driver for the Trill family of capacitive touch sensors.
//!
//! The driver writes commands to the sensor's command register, reads scan
//! data from its data register and decodes centroid scans into touches. Bar,
//! Craft, Ring and Flex report touches along one axis; Square and Hex report
//! two.
//!
//! # Usage
//!
//! The session needs an I2C peripheral implementing
//! `embedded_hal::i2c::I2c` and a delay provider implementing
//! `embedded_hal::delay::DelayNs`. With the `async` feature the same session
//! is available in [`asynch`] over the `embedded-hal-async` traits.
//!
//! ```no_run
//! # fn run<I2C, D>(i2c: I2C, delay: D) -> Result<(), trill_touch::Error<I2C::Error>>
//! # where
//! #     I2C: embedded_hal::i2c::I2c,
//! #     D: embedded_hal::delay::DelayNs,
//! # {
//! use trill_touch::{SensorModel, Touches, TrillSensor};
//!
//! let mut bar = TrillSensor::new(i2c, delay, SensorModel::Bar);
//! bar.init()?;
//!
//! loop {
//!     if let Touches::OneAxis(touches) = bar.read_touches()? {
//!         for touch in touches.iter() {
//!             log::info!("position {} size {}", touch.position, touch.size);
//!         }
//!     }
//! }
//! # }
//! ```
//!
//! Decoding is available on its own for scans obtained elsewhere:
//!
//! ```
//! use trill_touch::{touch, Geometry};
//!
//! let scan = [120, -1, 340, -1, -1, 50, 0, 80, 0, 0];
//! let touches = touch::decode(Geometry::OneAxis, 5, &scan).unwrap();
//! assert_eq!(touches.len(), 2);
//! ```

#![cfg_attr(not(test), no_std)]

pub mod command;
pub mod conf;
pub mod model;
pub mod reg;
pub mod sensor;
pub mod touch;

#[cfg(feature = "async")]
pub mod asynch;

mod err;
#[cfg(test)]
mod test_util;

pub use conf::Config;
pub use err::Error;
pub use model::{Geometry, Mode, ModelParameters, SensorModel};
pub use sensor::{Identity, ScanData, TrillSensor};
pub use touch::{LayoutError, Touch1D, Touch2D, Touches};
