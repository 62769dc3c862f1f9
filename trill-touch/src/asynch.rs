//! Asynchronous session with a Trill sensor.
//!
//! Same protocol as [`crate::sensor::TrillSensor`], over the
//! `embedded-hal-async` traits. The settle delays become awaits on the
//! injected delay provider.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::command::Command;
use crate::conf::Config;
use crate::err::{transport, Error};
use crate::model::{Geometry, Mode, ModelParameters, SensorModel, MAX_SCAN_WORDS};
use crate::reg::IDENTIFY_POINTER_DELAY_MS;
use crate::sensor::{
    decode_scan, identify_delay_ms, log_identity, parse_scan, scan_bytes, Identity, ScanData,
};
use crate::touch::Touches;

/// A session with one Trill sensor on an async I2C bus.
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
    pub fn new(i2c: I2C, delay: D, model: SensorModel) -> Self {
        Self::with_config(i2c, delay, model, Config::for_model(model))
    }

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

    /// Sets the configured mode and scan settings, then updates the baseline.
    pub async fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        log::trace!("trill::init {} at {:#04x}", self.model.name(), self.config.address);
        self.set_mode(self.config.mode).await?;
        self.set_scan_settings(self.config.scan_speed, self.config.resolution)
            .await?;
        self.update_baseline().await?;
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

    pub fn mode(&self) -> Mode {
        self.mode
    }

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

    pub async fn command(&mut self, command: Command) -> Result<(), Error<I2C::Error>> {
        log::trace!("trill::command {command:?}");
        let frame = command.frame(self.params.command_register);
        self.i2c
            .write(self.config.address, frame.as_bytes())
            .await
            .map_err(transport("writing command"))?;
        self.delay.delay_ms(self.config.settle_delay_ms).await;
        Ok(())
    }

    pub async fn set_mode(&mut self, mode: Mode) -> Result<(), Error<I2C::Error>> {
        self.command(Command::Mode(mode)).await?;
        self.mode = mode;
        Ok(())
    }

    pub async fn set_scan_settings(
        &mut self,
        speed: u8,
        resolution: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.command(Command::scan_settings(speed, resolution)).await
    }

    pub async fn update_baseline(&mut self) -> Result<(), Error<I2C::Error>> {
        self.command(Command::BaselineUpdate).await
    }

    pub async fn set_prescaler(&mut self, prescaler: u8) -> Result<(), Error<I2C::Error>> {
        self.command(Command::prescaler(prescaler)).await
    }

    pub async fn set_noise_threshold(&mut self, threshold: u8) -> Result<(), Error<I2C::Error>> {
        self.command(Command::NoiseThreshold(threshold)).await
    }

    pub async fn set_idac_value(&mut self, value: u8) -> Result<(), Error<I2C::Error>> {
        self.command(Command::Idac(value)).await
    }

    pub async fn set_minimum_touch_size(&mut self, size: u16) -> Result<(), Error<I2C::Error>> {
        self.command(Command::MinimumSize(size)).await
    }

    pub async fn set_auto_scan_interval(&mut self, interval: u16) -> Result<(), Error<I2C::Error>> {
        self.command(Command::AutoScanInterval(interval)).await
    }

    /// Asks the sensor for its type and firmware version.
    pub async fn identify(&mut self) -> Result<Identity, Error<I2C::Error>> {
        self.i2c
            .write(self.config.address, &[self.params.data_register])
            .await
            .map_err(transport("pointing at data register"))?;
        self.delay.delay_ms(IDENTIFY_POINTER_DELAY_MS).await;

        let frame = Command::Identify.frame(self.params.command_register);
        self.i2c
            .write(self.config.address, frame.as_bytes())
            .await
            .map_err(transport("writing identify"))?;
        self.delay.delay_ms(identify_delay_ms(&self.config)).await;

        let mut response = [0u8; 3];
        self.i2c
            .read(self.config.address, &mut response)
            .await
            .map_err(transport("reading identity"))?;

        let identity = Identity::from_response(response);
        log_identity(self.model, &identity);
        self.identity = Some(identity);
        Ok(identity)
    }

    pub async fn identity(&mut self) -> Result<Identity, Error<I2C::Error>> {
        match self.identity {
            Some(identity) => Ok(identity),
            None => self.identify().await,
        }
    }

    pub async fn device_type(&mut self) -> Result<Option<SensorModel>, Error<I2C::Error>> {
        Ok(self.identity().await?.model())
    }

    pub async fn firmware_version(&mut self) -> Result<u8, Error<I2C::Error>> {
        Ok(self.identity().await?.firmware_version)
    }

    /// Reads the latest scan in the current mode.
    pub async fn request_scan(&mut self) -> Result<ScanData, Error<I2C::Error>> {
        let len = scan_bytes(&self.params, self.mode);
        let register = [self.params.data_register];

        self.i2c
            .write(self.config.address, &register)
            .await
            .map_err(transport("pointing at data register"))?;
        self.delay.delay_ms(self.config.settle_delay_ms).await;

        let mut buf = [0u8; 2 * MAX_SCAN_WORDS];
        self.i2c
            .write_read(self.config.address, &register, &mut buf[..len])
            .await
            .map_err(transport("reading scan data"))?;

        Ok(parse_scan(&buf[..len])?)
    }

    /// Reads a scan and decodes it into touches. Centroid mode only.
    pub async fn read_touches(&mut self) -> Result<Touches, Error<I2C::Error>> {
        if self.mode != Mode::Centroid {
            return Err(Error::UnsupportedMode(self.mode));
        }
        let data = self.request_scan().await?;
        decode_scan(&self.params, self.mode, &data)
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{be_words, Delays};
    use crate::touch::{Touch1D, Touch2D};
    use embassy_futures::block_on;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn init_then_read_touches() {
        let scan = be_words(&[-1, -1, -1, 1500, -1, 0, 0, 0, 90, 0]);
        let expectations = [
            I2cTransaction::write(0x48, vec![0x00, 0x01, 0x00]),
            I2cTransaction::write(0x48, vec![0x00, 0x02, 0x00, 12]),
            I2cTransaction::write(0x48, vec![0x00, 0x06]),
            I2cTransaction::write(0x48, vec![0x04]),
            I2cTransaction::write_read(0x48, vec![0x04], scan),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let delays = Delays::default();

        let mut flex = TrillSensor::new(i2c.clone(), delays.clone(), SensorModel::Flex);
        block_on(flex.init()).unwrap();
        let touches = block_on(flex.read_touches()).unwrap();

        assert_eq!(
            touches.as_1d().unwrap(),
            &[Touch1D {
                position: 1500,
                size: 90
            }]
        );
        assert_eq!(delays.taken(), vec![10, 10, 10, 10]);
        i2c.done();
    }

    #[test]
    fn identify() {
        let expectations = [
            I2cTransaction::write(0x28, vec![0x04]),
            I2cTransaction::write(0x28, vec![0x00, 0xFF]),
            I2cTransaction::read(0x28, vec![0x00, 2, 1]),
        ];
        let mut i2c = I2cMock::new(&expectations);

        let mut square = TrillSensor::new(i2c.clone(), Delays::default(), SensorModel::Square);

        assert_eq!(block_on(square.firmware_version()), Ok(1));
        assert_eq!(block_on(square.device_type()), Ok(Some(SensorModel::Square)));
        i2c.done();
    }

    #[test]
    fn unsupported_mode_and_transport_error() {
        let expectations =
            [I2cTransaction::write(0x20, vec![0x00, 0x01, 0x02]).with_error(ErrorKind::Other)];
        let mut i2c = I2cMock::new(&expectations);
        let config = Config::for_model(SensorModel::Bar).with_mode(Mode::Raw);

        let mut bar = TrillSensor::with_config(i2c.clone(), Delays::default(), SensorModel::Bar, config);

        assert_eq!(
            block_on(bar.read_touches()),
            Err(Error::UnsupportedMode(Mode::Raw))
        );
        assert_eq!(
            block_on(bar.set_mode(Mode::Baseline)),
            Err(Error::Transport(ErrorKind::Other))
        );
        assert_eq!(bar.mode(), Mode::Raw);
        i2c.done();
    }

    #[test]
    fn read_touches_two_axis() {
        let scan = be_words(&[
            -1, 900, -1, -1, 0, 40, 0, 0, //
            0, 500, 0, 0, 0, 60, 0, 0,
        ]);
        let expectations = [
            I2cTransaction::write(0x40, vec![0x04]),
            I2cTransaction::write_read(0x40, vec![0x04], scan),
        ];
        let mut i2c = I2cMock::new(&expectations);

        let mut hex = TrillSensor::new(i2c.clone(), Delays::default(), SensorModel::Hex);
        let touches = block_on(hex.read_touches()).unwrap();

        assert_eq!(
            touches.as_2d().unwrap(),
            &[Touch2D {
                x: 500,
                y: 900,
                x_size: 60,
                y_size: 40
            }]
        );
        i2c.done();
    }

    #[test]
    fn raw_scan_reads_one_word_per_channel() {
        let samples: std::vec::Vec<i16> = (0..26).map(|i| 400 - i * 30).collect();
        let expectations = [
            I2cTransaction::write(0x20, vec![0x00, 0x01, 0x01]),
            I2cTransaction::write(0x20, vec![0x04]),
            I2cTransaction::write_read(0x20, vec![0x04], be_words(&samples)),
        ];
        let mut i2c = I2cMock::new(&expectations);

        let mut bar = TrillSensor::new(i2c.clone(), Delays::default(), SensorModel::Bar);
        block_on(bar.set_mode(Mode::Raw)).unwrap();
        let scan = block_on(bar.request_scan()).unwrap();

        assert_eq!(scan.as_slice(), samples.as_slice());
        i2c.done();
    }

    #[test]
    fn commands_are_framed_and_settled() {
        let expectations = [
            I2cTransaction::write(0x38, vec![0x00, 0x02, 3, 16]),
            I2cTransaction::write(0x38, vec![0x00, 0x03, 1]),
            I2cTransaction::write(0x38, vec![0x00, 0x04, 60]),
            I2cTransaction::write(0x38, vec![0x00, 0x05, 100]),
            I2cTransaction::write(0x38, vec![0x00, 0x07, 0x02, 0x58]),
            I2cTransaction::write(0x38, vec![0x00, 0x10, 0x01, 0x00]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let delays = Delays::default();
        let config = Config::for_model(SensorModel::Ring).with_settle_delay_ms(4);

        let mut ring = TrillSensor::with_config(i2c.clone(), delays.clone(), SensorModel::Ring, config);
        block_on(ring.set_scan_settings(5, 20)).unwrap();
        block_on(ring.set_prescaler(0)).unwrap();
        block_on(ring.set_noise_threshold(60)).unwrap();
        block_on(ring.set_idac_value(100)).unwrap();
        block_on(ring.set_minimum_touch_size(600)).unwrap();
        block_on(ring.set_auto_scan_interval(256)).unwrap();

        assert_eq!(delays.taken(), vec![4; 6]);
        i2c.done();
    }

    #[test]
    fn identify_saturates_long_settle_delay() {
        let expectations = [
            I2cTransaction::write(0x28, vec![0x04]),
            I2cTransaction::write(0x28, vec![0x00, 0xFF]),
            I2cTransaction::read(0x28, vec![0x00, 2, 1]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let delays = Delays::default();
        let config = Config::for_model(SensorModel::Square).with_settle_delay_ms(u32::MAX - 1);

        let mut square =
            TrillSensor::with_config(i2c.clone(), delays.clone(), SensorModel::Square, config);
        block_on(square.identify()).unwrap();

        assert_eq!(delays.taken(), vec![10, u32::MAX]);
        i2c.done();
    }

    #[test]
    fn static_parameters() {
        let expectations: [I2cTransaction; 0] = [];
        let i2c = I2cMock::new(&expectations);
        let craft = TrillSensor::new(i2c, Delays::default(), SensorModel::Craft);

        assert_eq!(craft.size(), (1, 4096));
        assert_eq!(craft.num_channels(), 30);
        assert_eq!(craft.max_touches(), 5);
        assert!(craft.is_1d());
        assert_eq!(craft.address(), 0x30);

        let (mut i2c, _) = craft.release();
        i2c.done();
    }
}
