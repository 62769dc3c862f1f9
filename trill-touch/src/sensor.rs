//! Blocking session with a Trill sensor.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};
use heapless::Vec;

use crate::command::Command;
use crate::conf::Config;
use crate::err::{transport, Error};
use crate::model::{Geometry, Mode, ModelParameters, SensorModel, MAX_SCAN_WORDS};
use crate::reg::{IDENTIFY_EXTRA_DELAY_MS, IDENTIFY_POINTER_DELAY_MS};
use crate::touch::{self, LayoutError, Touches};

/// The samples of one scan, in wire order.
pub type ScanData = Vec<i16, MAX_SCAN_WORDS>;

/// What a sensor reports about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    /// Device type code; 0 means unknown.
    pub device_type: u8,
    pub firmware_version: u8,
}

impl Identity {
    /// Parses the `[reserved, device type, firmware]` response.
    pub fn from_response(response: [u8; 3]) -> Self {
        Self {
            device_type: response[1],
            firmware_version: response[2],
        }
    }

    /// The model the device type code names, if it is a known one.
    pub fn model(&self) -> Option<SensorModel> {
        SensorModel::from_device_type(self.device_type)
    }

    pub fn type_name(&self) -> &'static str {
        self.model().map_or("Unknown", SensorModel::name)
    }
}

/// Converts big-endian words into samples.
pub(crate) fn parse_scan(bytes: &[u8]) -> Result<ScanData, LayoutError> {
    let mut data = ScanData::new();
    for word in bytes.chunks_exact(2) {
        data.push(i16::from_be_bytes([word[0], word[1]]))
            .map_err(|_| LayoutError::Length {
                expected: MAX_SCAN_WORDS,
                actual: bytes.len() / 2,
            })?;
    }
    Ok(data)
}

/// Number of bytes to read for a scan in `mode`.
pub(crate) fn scan_bytes(params: &ModelParameters, mode: Mode) -> usize {
    let words = params.scan_len(mode);
    debug_assert!(words <= MAX_SCAN_WORDS);
    2 * words
}

/// Wait after `IDENTIFY` before the response can be read.
pub(crate) fn identify_delay_ms(config: &Config) -> u32 {
    config
        .settle_delay_ms
        .saturating_add(IDENTIFY_EXTRA_DELAY_MS)
}

/// Decodes a scan into touches, refusing modes without centroid data.
pub(crate) fn decode_scan<E>(
    params: &ModelParameters,
    mode: Mode,
    data: &[i16],
) -> Result<Touches, Error<E>> {
    if mode != Mode::Centroid {
        return Err(Error::UnsupportedMode(mode));
    }
    Ok(touch::decode(params.geometry, params.max_touches, data)?)
}

pub(crate) fn log_identity(model: SensorModel, identity: &Identity) {
    log::debug!(
        "trill: type {} with firmware version {}",
        identity.type_name(),
        identity.firmware_version
    );
    if identity.model() != Some(model) {
        log::warn!(
            "trill: connected device does not identify as {}",
            model.name()
        );
    }
}

/// A session with one Trill sensor on a blocking I2C bus.
///
/// All bus traffic goes through `&mut self`, so a session never has more
/// than one command or read in flight. Sharing the bus with other devices is
/// up to the `I2C` implementation.
pub struct TrillSensor<I2C, D> {
    i2c: I2C,
    delay: D,
    model: SensorModel,
    params: ModelParameters,
    config: Config,
    mode: Mode,
    identity: Option<Identity>,
}

impl<I2C, D> TrillSensor<I2C, D>
where
    I2C: I2c<SevenBitAddress>,
    D: DelayNs,
{
    /// Creates a session with the factory configuration of `model`.
    ///
    /// No bus traffic happens until `init` or another command is issued.
    pub fn new(i2c: I2C, delay: D, model: SensorModel) -> Self {
        Self::with_config(i2c, delay, model, Config::for_model(model))
    }

    /// Creates a session with a custom configuration.
    ///
    /// The sensor is assumed to be in `config.mode` already; call `init` to
    /// make it so.
    pub fn with_config(i2c: I2C, delay: D, model: SensorModel, config: Config) -> Self {
        Self {
            i2c,
            delay,
            model,
            params: model.parameters(),
            config,
            mode: config.mode,
            identity: None,
        }
    }

    /// Brings the sensor up: sets the configured mode and scan settings, then
    /// updates the baseline.
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        log::trace!("trill::init {} at {:#04x}", self.model.name(), self.config.address);
        self.set_mode(self.config.mode)?;
        self.set_scan_settings(self.config.scan_speed, self.config.resolution)?;
        self.update_baseline()?;
        log::trace!("trill::init done");
        Ok(())
    }

    pub fn model(&self) -> SensorModel {
        self.model
    }

    pub fn model_parameters(&self) -> &ModelParameters {
        &self.params
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn address(&self) -> u8 {
        self.config.address
    }

    /// The mode last set on the sensor.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Position range as `(x, y)`.
    pub fn size(&self) -> (u16, u16) {
        self.params.size
    }

    pub fn num_channels(&self) -> usize {
        self.params.channels
    }

    pub fn max_touches(&self) -> usize {
        self.params.max_touches
    }

    pub fn geometry(&self) -> Geometry {
        self.params.geometry
    }

    pub fn is_1d(&self) -> bool {
        self.params.geometry == Geometry::OneAxis
    }

    pub fn is_2d(&self) -> bool {
        self.params.geometry == Geometry::TwoAxis
    }

    /// Writes `command` to the command register and waits for it to settle.
    pub fn command(&mut self, command: Command) -> Result<(), Error<I2C::Error>> {
        log::trace!("trill::command {command:?}");
        let frame = command.frame(self.params.command_register);
        self.i2c
            .write(self.config.address, frame.as_bytes())
            .map_err(transport("writing command"))?;
        self.delay.delay_ms(self.config.settle_delay_ms);
        Ok(())
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<(), Error<I2C::Error>> {
        self.command(Command::Mode(mode))?;
        self.mode = mode;
        Ok(())
    }

    /// Sets scan speed (0 to 3) and resolution (9 to 16 bits). Values out of
    /// range are clamped.
    pub fn set_scan_settings(&mut self, speed: u8, resolution: u8) -> Result<(), Error<I2C::Error>> {
        self.command(Command::scan_settings(speed, resolution))
    }

    pub fn update_baseline(&mut self) -> Result<(), Error<I2C::Error>> {
        self.command(Command::BaselineUpdate)
    }

    /// Sets the prescaler (1 to 8). Values out of range are clamped.
    pub fn set_prescaler(&mut self, prescaler: u8) -> Result<(), Error<I2C::Error>> {
        self.command(Command::prescaler(prescaler))
    }

    pub fn set_noise_threshold(&mut self, threshold: u8) -> Result<(), Error<I2C::Error>> {
        self.command(Command::NoiseThreshold(threshold))
    }

    pub fn set_idac_value(&mut self, value: u8) -> Result<(), Error<I2C::Error>> {
        self.command(Command::Idac(value))
    }

    pub fn set_minimum_touch_size(&mut self, size: u16) -> Result<(), Error<I2C::Error>> {
        self.command(Command::MinimumSize(size))
    }

    pub fn set_auto_scan_interval(&mut self, interval: u16) -> Result<(), Error<I2C::Error>> {
        self.command(Command::AutoScanInterval(interval))
    }

    /// Asks the sensor for its type and firmware version.
    ///
    /// A device that reports a different type than the session's model is
    /// logged, not rejected.
    pub fn identify(&mut self) -> Result<Identity, Error<I2C::Error>> {
        self.i2c
            .write(self.config.address, &[self.params.data_register])
            .map_err(transport("pointing at data register"))?;
        self.delay.delay_ms(IDENTIFY_POINTER_DELAY_MS);

        let frame = Command::Identify.frame(self.params.command_register);
        self.i2c
            .write(self.config.address, frame.as_bytes())
            .map_err(transport("writing identify"))?;
        self.delay.delay_ms(identify_delay_ms(&self.config));

        let mut response = [0u8; 3];
        self.i2c
            .read(self.config.address, &mut response)
            .map_err(transport("reading identity"))?;

        let identity = Identity::from_response(response);
        log_identity(self.model, &identity);
        self.identity = Some(identity);
        Ok(identity)
    }

    /// The identity of the sensor, identifying it on first use.
    pub fn identity(&mut self) -> Result<Identity, Error<I2C::Error>> {
        match self.identity {
            Some(identity) => Ok(identity),
            None => self.identify(),
        }
    }

    /// The model the sensor identifies as, or `None` for an unknown type code.
    pub fn device_type(&mut self) -> Result<Option<SensorModel>, Error<I2C::Error>> {
        Ok(self.identity()?.model())
    }

    pub fn firmware_version(&mut self) -> Result<u8, Error<I2C::Error>> {
        Ok(self.identity()?.firmware_version)
    }

    /// Reads the latest scan in the current mode.
    ///
    /// The sample count is fixed by the model and mode: `2 * max_touches` or
    /// `4 * max_touches` in centroid mode, one per channel otherwise.
    pub fn request_scan(&mut self) -> Result<ScanData, Error<I2C::Error>> {
        let len = scan_bytes(&self.params, self.mode);
        let register = [self.params.data_register];

        self.i2c
            .write(self.config.address, &register)
            .map_err(transport("pointing at data register"))?;
        self.delay.delay_ms(self.config.settle_delay_ms);

        let mut buf = [0u8; 2 * MAX_SCAN_WORDS];
        self.i2c
            .write_read(self.config.address, &register, &mut buf[..len])
            .map_err(transport("reading scan data"))?;

        Ok(parse_scan(&buf[..len])?)
    }

    /// Reads a scan and decodes it into touches.
    ///
    /// Fails with `UnsupportedMode`, without bus traffic, unless the sensor is
    /// in centroid mode.
    pub fn read_touches(&mut self) -> Result<Touches, Error<I2C::Error>> {
        if self.mode != Mode::Centroid {
            return Err(Error::UnsupportedMode(self.mode));
        }
        let data = self.request_scan()?;
        decode_scan(&self.params, self.mode, &data)
    }

    /// Ends the session, handing back the bus and delay.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}
