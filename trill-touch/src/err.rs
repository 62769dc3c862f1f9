//! Error types for the Trill driver.

use core::fmt::{self, Debug};

use crate::model::Mode;
use crate::touch::LayoutError;

/// The main error type for the Trill driver.
pub enum Error<TI2CERR> {
    /// The I2C transfer failed.
    Transport(TI2CERR),
    /// Scan data did not match the expected layout.
    Layout(LayoutError),
    /// Touches were requested while the sensor is not in centroid mode.
    UnsupportedMode(Mode),
}

impl<TI2CERR: Debug> Debug for Error<TI2CERR> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "Transport({err:?})"),
            Self::Layout(err) => write!(f, "Layout({err:?})"),
            Self::UnsupportedMode(mode) => write!(f, "UnsupportedMode({mode:?})"),
        }
    }
}

impl<TI2CERR: PartialEq> PartialEq for Error<TI2CERR> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Transport(a), Self::Transport(b)) => a == b,
            (Self::Layout(a), Self::Layout(b)) => a == b,
            (Self::UnsupportedMode(a), Self::UnsupportedMode(b)) => a == b,
            _ => false,
        }
    }
}

impl<TI2CERR> From<LayoutError> for Error<TI2CERR> {
    fn from(err: LayoutError) -> Self {
        Error::Layout(err)
    }
}

/// Logs a failed transfer and wraps the bus error.
pub(crate) fn transport<TI2CERR: Debug>(what: &'static str) -> impl FnOnce(TI2CERR) -> Error<TI2CERR> {
    move |err| {
        log::warn!("trill: error {what}: {err:?}");
        Error::Transport(err)
    }
}
