//! Driver for the Sensirion SEN5x environmental sensor node.
//!
//! The SEN50 measures particulate matter, the SEN54 adds humidity,
//! temperature and a VOC index, the SEN55 adds a NOx index on top. All three
//! speak the same I²C protocol: 16-bit big-endian command words, and data
//! words that are each followed by a CRC-8 byte.
//!
//! The bus is reached through the [`Transport`] trait. [`I2cTransport`]
//! implements it for any embedded-hal I²C bus. Delays use
//! [`embedded_hal::delay::DelayNs`] and diagnostics go through the `log`
//! facade.
//!
//! ```
//! use embedded_hal_mock::eh1::delay::NoopDelay;
//! use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};
//! use sen5x_driver::{I2cTransport, Sen5x, Variant};
//!
//! let i2c = I2cMock::new(&[
//!     Transaction::write(0x69, vec![0xd3, 0x04]),
//!     Transaction::write(0x69, vec![0x00, 0x21]),
//! ]);
//! let mut sensor = Sen5x::new(I2cTransport::new(i2c.clone()), NoopDelay::new());
//! sensor.set_variant(Variant::Sen55);
//! sensor.init()?;
//! sensor.start_measurement()?;
//! # let mut i2c = i2c;
//! # i2c.done();
//! # Ok::<(), sen5x_driver::Error<embedded_hal::i2c::ErrorKind>>(())
//! ```
#![cfg_attr(not(test), no_std)]

mod command;
pub mod config;
pub mod convert;
mod crc;
mod error;
mod transport;
mod types;

#[cfg(test)]
mod tests;

pub use command::{Command, DEFAULT_SETTLE_MS};
pub use config::{
    AlgorithmTuning, RhtAccelerationMode, TemperatureCompensation,
    TemperatureCompensationRegister,
};
pub use crc::crc8;
pub use error::Error;
pub use transport::{I2cTransport, Transport};
pub use types::*;

use embedded_hal::delay::DelayNs;
use log::{debug, error};

use crate::crc::{first_bad_chunk, frame_word, CHUNK_LEN};

/// Bus address in the 8-bit convention used by [`Transport`] (0x69 << 1).
pub const ADDRESS: u8 = 0x69 << 1;

/// Longest payload that fits one write transfer after the command word.
pub const MAX_PAYLOAD_LEN: usize = 30;

/// Longest CRC-framed response the driver reads (16 words).
const MAX_RESPONSE_LEN: usize = 16 * CHUNK_LEN;

/// Static information about the chip and this driver.
pub fn info() -> ChipInfo {
    ChipInfo {
        chip_name: "Sensirion SEN5X",
        manufacturer_name: "Sensirion",
        interface: "IIC",
        supply_voltage_min_v: 4.5,
        supply_voltage_max_v: 5.5,
        max_current_ma: 100.0,
        temperature_min: -10.0,
        temperature_max: 60.0,
        driver_version: env!("CARGO_PKG_VERSION"),
    }
}

/// SEN5x driver handle.
///
/// Either construct it with both capabilities through [`Sen5x::new`], or
/// start from [`Sen5x::default`] and link them one at a time. [`Sen5x::init`]
/// refuses to run until both are present.
pub struct Sen5x<T, D> {
    transport: Option<T>,
    delay: Option<D>,
    variant: Variant,
    initialized: bool,
}

impl<T, D> Default for Sen5x<T, D> {
    fn default() -> Self {
        Sen5x {
            transport: None,
            delay: None,
            variant: Variant::default(),
            initialized: false,
        }
    }
}

impl<T, D> Sen5x<T, D>
where
    T: Transport,
    D: DelayNs,
{
    pub fn new(transport: T, delay: D) -> Self {
        Sen5x {
            transport: Some(transport),
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn link_transport(&mut self, transport: T) {
        self.transport = Some(transport);
    }

    pub fn link_delay(&mut self, delay: D) {
        self.delay = Some(delay);
    }

    /// Selects the chip variant. Does not touch the bus.
    pub fn set_variant(&mut self, variant: Variant) {
        self.variant = variant;
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Destroys the handle and gives back the linked capabilities.
    pub fn release(self) -> (Option<T>, Option<D>) {
        (self.transport, self.delay)
    }

    /// Opens the transport and soft-resets the sensor.
    ///
    /// If the reset cannot be sent the transport is closed again.
    pub fn init(&mut self) -> Result<(), Error<T::Error>> {
        if self.transport.is_none() {
            error!("sen5x: transport is not linked.");
            return Err(Error::MissingCapability);
        }
        if self.delay.is_none() {
            error!("sen5x: delay is not linked.");
            return Err(Error::MissingCapability);
        }

        self.transport_mut()?.open().map_err(|e| {
            error!("sen5x: transport open failed: {:?}", e);
            Error::Transport(e)
        })?;

        if let Err(e) = self.send(Command::Reset) {
            error!("sen5x: reset failed.");
            if let Some(transport) = self.transport.as_mut() {
                let _ = transport.close();
            }
            return Err(reset_failed(e));
        }

        self.initialized = true;
        debug!("sen5x: initialized as {:?}", self.variant);
        Ok(())
    }

    /// Soft-resets the sensor and closes the transport.
    ///
    /// If the reset cannot be sent the transport is left open and the handle
    /// stays initialized.
    pub fn deinit(&mut self) -> Result<(), Error<T::Error>> {
        self.check_initialized()?;

        self.send(Command::Reset).map_err(|e| {
            error!("sen5x: reset failed.");
            reset_failed(e)
        })?;

        self.transport_mut()?.close().map_err(|e| {
            error!("sen5x: transport close failed: {:?}", e);
            Error::Transport(e)
        })?;

        self.initialized = false;
        Ok(())
    }

    /// Starts continuous measurement of all signals the variant supports.
    pub fn start_measurement(&mut self) -> Result<(), Error<T::Error>> {
        self.check_initialized()?;
        self.send(Command::StartMeasurement)
    }

    /// Starts measuring humidity, temperature and gas only, with the fan and
    /// laser off. Not available on the SEN50.
    pub fn start_measurement_without_pm(&mut self) -> Result<(), Error<T::Error>> {
        self.check_initialized()?;
        if self.variant == Variant::Sen50 {
            error!("sen5x: sen50 has no rht/gas-only mode.");
            return Err(Error::UnsupportedVariant);
        }
        self.send(Command::StartMeasurementWithoutPm)
    }

    pub fn stop_measurement(&mut self) -> Result<(), Error<T::Error>> {
        self.check_initialized()?;
        self.send(Command::StopMeasurement)
    }

    pub fn read_data_ready_flag(&mut self) -> Result<DataReadyFlag, Error<T::Error>> {
        self.check_initialized()?;
        let [flag] = self.read_words::<1>(Command::ReadDataReadyFlag)?;
        Ok(if flag & 0x01 == 0 {
            DataReadyFlag::NotReady
        } else {
            DataReadyFlag::Available
        })
    }

    /// Reads the latest measurement of a SEN55.
    pub fn read_sen55(&mut self) -> Result<Sen55Data, Error<T::Error>> {
        self.check_initialized()?;
        self.require_variant(Variant::Sen55)?;
        let words = self.read_measurement::<8>(Command::ReadMeasuredValues)?;
        Ok(MeasuredValuesRaw::from_words(words).into())
    }

    /// Reads the latest measurement of a SEN54.
    pub fn read_sen54(&mut self) -> Result<Sen54Data, Error<T::Error>> {
        self.check_initialized()?;
        self.require_variant(Variant::Sen54)?;
        let words = self.read_measurement::<8>(Command::ReadMeasuredValues)?;
        Ok(MeasuredValuesRaw::from_words(words).into())
    }

    /// Reads the latest measurement of a SEN50.
    pub fn read_sen50(&mut self) -> Result<Sen50Data, Error<T::Error>> {
        self.check_initialized()?;
        self.require_variant(Variant::Sen50)?;
        let words = self.read_measurement::<8>(Command::ReadMeasuredValues)?;
        Ok(MeasuredValuesRaw::from_words(words).into())
    }

    /// Reads mass and number concentrations and the typical particle size.
    pub fn read_pm_values(&mut self) -> Result<PmValues, Error<T::Error>> {
        self.check_initialized()?;
        let words = self.read_measurement::<10>(Command::ReadMeasuredPmValues)?;
        Ok(PmValuesRaw::from_words(words).into())
    }

    /// Reads uncompensated humidity and temperature and the raw gas signals.
    /// Not available on the SEN50.
    pub fn read_raw_values(&mut self) -> Result<RawValues, Error<T::Error>> {
        self.check_initialized()?;
        if self.variant == Variant::Sen50 {
            error!("sen5x: sen50 has no raw values.");
            return Err(Error::UnsupportedVariant);
        }
        let words = self.read_measurement::<4>(Command::ReadMeasuredRawValues)?;
        Ok(RawValuesRaw::from_words(words).into())
    }

    /// Writes the temperature compensation parameters.
    ///
    /// Accepts either register values or a [`TemperatureCompensation`] in
    /// engineering units. Values that do not fit the registers give
    /// [`Error::InvalidArgument`].
    pub fn set_temperature_compensation<C>(
        &mut self,
        compensation: C,
    ) -> Result<(), Error<T::Error>>
    where
        C: TryInto<TemperatureCompensationRegister>,
        C::Error: core::fmt::Debug,
    {
        self.check_initialized()?;
        let register = compensation.try_into().map_err(|reason| {
            error!("sen5x: {:?}.", reason);
            Error::InvalidArgument
        })?;
        self.write_words(
            Command::TemperatureCompensation,
            &[
                register.offset as u16,
                register.normalized_slope as u16,
                register.time_constant,
            ],
        )
    }

    pub fn get_temperature_compensation(
        &mut self,
    ) -> Result<TemperatureCompensationRegister, Error<T::Error>> {
        self.check_initialized()?;
        let [offset, normalized_slope, time_constant] =
            self.read_words::<3>(Command::TemperatureCompensation)?;
        Ok(TemperatureCompensationRegister {
            offset: offset as i16,
            normalized_slope: normalized_slope as i16,
            time_constant,
        })
    }

    /// Sets the warm start behavior, 0 (cold start, default) to 65535
    /// (warm start).
    pub fn set_warm_start(&mut self, param: u16) -> Result<(), Error<T::Error>> {
        self.check_initialized()?;
        self.write_words(Command::WarmStart, &[param])
    }

    pub fn get_warm_start(&mut self) -> Result<u16, Error<T::Error>> {
        self.check_initialized()?;
        let [param] = self.read_words::<1>(Command::WarmStart)?;
        Ok(param)
    }

    pub fn set_voc_algorithm_tuning(
        &mut self,
        tuning: &AlgorithmTuning,
    ) -> Result<(), Error<T::Error>> {
        self.check_initialized()?;
        tuning.validate_voc().map_err(|reason| {
            error!("sen5x: {}.", reason);
            Error::InvalidArgument
        })?;
        self.write_words(Command::VocAlgorithmTuning, &tuning.words())
    }

    pub fn get_voc_algorithm_tuning(&mut self) -> Result<AlgorithmTuning, Error<T::Error>> {
        self.check_initialized()?;
        let words = self.read_words::<6>(Command::VocAlgorithmTuning)?;
        Ok(AlgorithmTuning::from_words(words))
    }

    /// Writes the NOx algorithm tuning.
    ///
    /// The NOx algorithm requires a learning time gain of 12 hours and an
    /// initial standard deviation of 50.
    pub fn set_nox_algorithm_tuning(
        &mut self,
        tuning: &AlgorithmTuning,
    ) -> Result<(), Error<T::Error>> {
        self.check_initialized()?;
        tuning.validate_nox().map_err(|reason| {
            error!("sen5x: {}.", reason);
            Error::InvalidArgument
        })?;
        self.write_words(Command::NoxAlgorithmTuning, &tuning.words())
    }

    pub fn get_nox_algorithm_tuning(&mut self) -> Result<AlgorithmTuning, Error<T::Error>> {
        self.check_initialized()?;
        let words = self.read_words::<6>(Command::NoxAlgorithmTuning)?;
        Ok(AlgorithmTuning::from_words(words))
    }

    pub fn set_rht_acceleration_mode(
        &mut self,
        mode: RhtAccelerationMode,
    ) -> Result<(), Error<T::Error>> {
        self.check_initialized()?;
        self.write_words(Command::RhtAccelerationMode, &[mode as u16])
    }

    pub fn get_rht_acceleration_mode(&mut self) -> Result<RhtAccelerationMode, Error<T::Error>> {
        self.check_initialized()?;
        let [mode] = self.read_words::<1>(Command::RhtAccelerationMode)?;
        RhtAccelerationMode::try_from(mode).map_err(|raw| {
            error!("sen5x: unknown rht acceleration mode {}.", raw);
            Error::InvalidArgument
        })
    }

    /// Restores a VOC algorithm state saved with
    /// [`Sen5x::get_voc_algorithm_state`], to skip the learning phase.
    pub fn set_voc_algorithm_state(&mut self, state: [u16; 4]) -> Result<(), Error<T::Error>> {
        self.check_initialized()?;
        self.write_words(Command::VocAlgorithmState, &state)
    }

    pub fn get_voc_algorithm_state(&mut self) -> Result<[u16; 4], Error<T::Error>> {
        self.check_initialized()?;
        self.read_words::<4>(Command::VocAlgorithmState)
    }

    /// Runs the fan at maximum speed for about 10 seconds. The caller waits
    /// for completion.
    pub fn start_fan_cleaning(&mut self) -> Result<(), Error<T::Error>> {
        self.check_initialized()?;
        self.send(Command::StartFanCleaning)
    }

    /// Sets the auto cleaning interval in seconds.
    ///
    /// See [`config::AUTO_CLEANING_INTERVAL_RANGE`]. Use
    /// [`Sen5x::disable_auto_cleaning_interval`] to turn it off.
    pub fn set_auto_cleaning_interval(&mut self, seconds: u32) -> Result<(), Error<T::Error>> {
        self.check_initialized()?;
        if !config::AUTO_CLEANING_INTERVAL_RANGE.contains(&seconds) {
            error!("sen5x: auto cleaning interval {} s is invalid.", seconds);
            return Err(Error::InvalidArgument);
        }
        self.write_interval(seconds)
    }

    pub fn get_auto_cleaning_interval(&mut self) -> Result<u32, Error<T::Error>> {
        self.check_initialized()?;
        let [high, low] = self.read_words::<2>(Command::AutoCleaningInterval)?;
        Ok((u32::from(high) << 16) | u32::from(low))
    }

    pub fn disable_auto_cleaning_interval(&mut self) -> Result<(), Error<T::Error>> {
        self.check_initialized()?;
        self.write_interval(0)
    }

    pub fn get_product_name(&mut self) -> Result<Identifier, Error<T::Error>> {
        self.check_initialized()?;
        self.read_identifier(Command::ReadProductName)
    }

    pub fn get_serial_number(&mut self) -> Result<Identifier, Error<T::Error>> {
        self.check_initialized()?;
        self.read_identifier(Command::ReadSerialNumber)
    }

    /// Firmware version.
    pub fn get_version(&mut self) -> Result<u8, Error<T::Error>> {
        self.check_initialized()?;
        let [version] = self.read_words::<1>(Command::ReadVersion)?;
        Ok((version >> 8) as u8)
    }

    pub fn get_device_status(&mut self) -> Result<DeviceStatus, Error<T::Error>> {
        self.check_initialized()?;
        let [high, low] = self.read_words::<2>(Command::ReadDeviceStatus)?;
        Ok(DeviceStatus((u32::from(high) << 16) | u32::from(low)))
    }

    pub fn clear_device_status(&mut self) -> Result<(), Error<T::Error>> {
        self.check_initialized()?;
        self.send(Command::ClearDeviceStatus)
    }

    /// Soft reset. The sensor returns to idle mode.
    pub fn reset(&mut self) -> Result<(), Error<T::Error>> {
        self.check_initialized()?;
        self.send(Command::Reset)
    }

    /// Writes `payload` after an arbitrary command word.
    ///
    /// The payload is sent as is, the caller adds the CRC bytes.
    pub fn set_reg(&mut self, command: u16, payload: &[u8]) -> Result<(), Error<T::Error>> {
        self.check_initialized()?;
        self.write(command, payload, DEFAULT_SETTLE_MS)
    }

    /// Sends an arbitrary command word and reads the response into `buffer`
    /// without checking CRC bytes.
    pub fn get_reg(&mut self, command: u16, buffer: &mut [u8]) -> Result<(), Error<T::Error>> {
        self.check_initialized()?;
        self.read(command, buffer, DEFAULT_SETTLE_MS)
    }

    fn check_initialized(&self) -> Result<(), Error<T::Error>> {
        if self.initialized {
            Ok(())
        } else {
            error!("sen5x: handle is not initialized.");
            Err(Error::NotInitialized)
        }
    }

    fn require_variant(&self, variant: Variant) -> Result<(), Error<T::Error>> {
        if self.variant == variant {
            Ok(())
        } else {
            error!("sen5x: {:?} read called on {:?}.", variant, self.variant);
            Err(Error::UnsupportedVariant)
        }
    }

    fn transport_mut(&mut self) -> Result<&mut T, Error<T::Error>> {
        self.transport.as_mut().ok_or(Error::MissingCapability)
    }

    fn bus(&mut self) -> Result<(&mut T, &mut D), Error<T::Error>> {
        match (self.transport.as_mut(), self.delay.as_mut()) {
            (Some(transport), Some(delay)) => Ok((transport, delay)),
            _ => Err(Error::MissingCapability),
        }
    }

    /// One write transfer: command word then `payload`, then the settle
    /// delay.
    fn write(
        &mut self,
        command: u16,
        payload: &[u8],
        settle_ms: u32,
    ) -> Result<(), Error<T::Error>> {
        if payload.len() > MAX_PAYLOAD_LEN {
            error!(
                "sen5x: payload of {} bytes exceeds {} bytes.",
                payload.len(),
                MAX_PAYLOAD_LEN
            );
            return Err(Error::InvalidArgument);
        }
        let mut buffer = [0u8; 2 + MAX_PAYLOAD_LEN];
        buffer[..2].copy_from_slice(&command.to_be_bytes());
        buffer[2..2 + payload.len()].copy_from_slice(payload);

        debug!(
            "sen5x: write command 0x{:04X} with {} payload bytes",
            command,
            payload.len()
        );
        let (transport, delay) = self.bus()?;
        transport.write(ADDRESS, &buffer[..2 + payload.len()]).map_err(|e| {
            error!("sen5x: write command 0x{:04X} failed: {:?}", command, e);
            Error::Transport(e)
        })?;
        delay.delay_ms(settle_ms);
        Ok(())
    }

    /// Sends the command word, waits, then fills `buffer`.
    fn read(
        &mut self,
        command: u16,
        buffer: &mut [u8],
        settle_ms: u32,
    ) -> Result<(), Error<T::Error>> {
        debug!(
            "sen5x: read command 0x{:04X} expecting {} bytes",
            command,
            buffer.len()
        );
        let (transport, delay) = self.bus()?;
        transport.write(ADDRESS, &command.to_be_bytes()).map_err(|e| {
            error!("sen5x: write command 0x{:04X} failed: {:?}", command, e);
            Error::Transport(e)
        })?;
        delay.delay_ms(settle_ms);
        transport.read(ADDRESS, buffer).map_err(|e| {
            error!("sen5x: read after command 0x{:04X} failed: {:?}", command, e);
            Error::Transport(e)
        })
    }

    fn send(&mut self, command: Command) -> Result<(), Error<T::Error>> {
        self.write(command.raw(), &[], command.settle_ms())
    }

    fn write_words(&mut self, command: Command, words: &[u16]) -> Result<(), Error<T::Error>> {
        let mut payload = [0u8; MAX_PAYLOAD_LEN];
        let len = words.len() * CHUNK_LEN;
        if len > MAX_PAYLOAD_LEN {
            return Err(Error::InvalidArgument);
        }
        for (chunk, word) in payload.chunks_mut(CHUNK_LEN).zip(words) {
            frame_word(chunk, *word);
        }
        self.write(command.raw(), &payload[..len], command.settle_ms())
    }

    /// Reads `N` CRC-checked words. Nothing is decoded unless every chunk
    /// passes.
    fn read_words<const N: usize>(
        &mut self,
        command: Command,
    ) -> Result<[u16; N], Error<T::Error>> {
        let mut buffer = [0u8; MAX_RESPONSE_LEN];
        let len = N * CHUNK_LEN;
        if len > MAX_RESPONSE_LEN {
            return Err(Error::InvalidArgument);
        }
        let buffer = &mut buffer[..len];
        self.read(command.raw(), buffer, command.settle_ms())?;
        sensirion_i2c::crc8::validate(buffer).map_err(|_| {
            error!(
                "sen5x: crc check failed in word {:?} of command 0x{:04X}.",
                first_bad_chunk(buffer),
                command.raw()
            );
            Error::CrcMismatch
        })?;
        Ok(convert::words::<N>(buffer))
    }

    /// Checks the data ready flag, then reads `N` words of measurement data.
    fn read_measurement<const N: usize>(
        &mut self,
        command: Command,
    ) -> Result<[u16; N], Error<T::Error>> {
        if self.read_data_ready_flag()? == DataReadyFlag::NotReady {
            error!("sen5x: data is not ready.");
            return Err(Error::DataNotReady);
        }
        self.read_words::<N>(command)
    }

    fn read_identifier(&mut self, command: Command) -> Result<Identifier, Error<T::Error>> {
        let words = self.read_words::<16>(command)?;
        let mut bytes = [0u8; 32];
        for (pair, word) in bytes.chunks_mut(2).zip(words) {
            pair.copy_from_slice(&word.to_be_bytes());
        }
        Ok(Identifier(bytes))
    }

    fn write_interval(&mut self, seconds: u32) -> Result<(), Error<T::Error>> {
        self.write_words(
            Command::AutoCleaningInterval,
            &[(seconds >> 16) as u16, seconds as u16],
        )
    }
}

/// A failed reset write is reported as a reset failure.
fn reset_failed<E: core::fmt::Debug>(e: Error<E>) -> Error<E> {
    match e {
        Error::Transport(e) => Error::ResetFailed(e),
        other => other,
    }
}
