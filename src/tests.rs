use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

use super::*;

const SENSOR_ADDR: u8 = 0x69;

type MockSen5x = Sen5x<I2cTransport<I2cMock>, NoopDelay>;

fn framed(words: &[u16]) -> Vec<u8> {
    words
        .iter()
        .flat_map(|word| {
            let [hi, lo] = word.to_be_bytes();
            [hi, lo, crc8(&[hi, lo])]
        })
        .collect()
}

fn command(command: Command) -> Transaction {
    Transaction::write(SENSOR_ADDR, command.raw().to_be_bytes().to_vec())
}

fn command_with(command: Command, words: &[u16]) -> Transaction {
    let mut bytes = command.raw().to_be_bytes().to_vec();
    bytes.extend(framed(words));
    Transaction::write(SENSOR_ADDR, bytes)
}

fn response(command: Command, bytes: Vec<u8>) -> [Transaction; 2] {
    [
        Transaction::write(SENSOR_ADDR, command.raw().to_be_bytes().to_vec()),
        Transaction::read(SENSOR_ADDR, bytes),
    ]
}

fn data_ready(ready: bool) -> [Transaction; 2] {
    response(Command::ReadDataReadyFlag, framed(&[ready as u16]))
}

/// A handle that went through `init`, followed by `expectations`.
fn initialized(variant: Variant, expectations: &[Transaction]) -> (MockSen5x, I2cMock) {
    let mut all = vec![command(Command::Reset)];
    all.extend_from_slice(expectations);
    let i2c = I2cMock::new(&all);
    let mut sensor = Sen5x::new(I2cTransport::new(i2c.clone()), NoopDelay::new());
    sensor.set_variant(variant);
    sensor.init().unwrap();
    (sensor, i2c)
}

fn measured_values() -> Vec<u8> {
    framed(&[100, 125, 130, 141, 4550, 4700, 1000, 10])
}

#[derive(Debug, Default)]
struct FakeState {
    fail_open: bool,
    fail_close: bool,
    fail_writes: bool,
    opened: usize,
    closed: usize,
    writes: Vec<Vec<u8>>,
    responses: VecDeque<Vec<u8>>,
}

/// Transport whose state stays reachable after it moved into the handle.
#[derive(Debug, Default, Clone)]
struct FakeTransport(Rc<RefCell<FakeState>>);

impl Transport for FakeTransport {
    type Error = &'static str;

    fn open(&mut self) -> Result<(), Self::Error> {
        let mut state = self.0.borrow_mut();
        state.opened += 1;
        if state.fail_open {
            Err("open")
        } else {
            Ok(())
        }
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        let mut state = self.0.borrow_mut();
        state.closed += 1;
        if state.fail_close {
            Err("close")
        } else {
            Ok(())
        }
    }

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        assert_eq!(address, ADDRESS);
        let mut state = self.0.borrow_mut();
        state.writes.push(bytes.to_vec());
        if state.fail_writes {
            Err("write")
        } else {
            Ok(())
        }
    }

    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        assert_eq!(address, ADDRESS);
        let bytes = self.0.borrow_mut().responses.pop_front().ok_or("read")?;
        buffer.copy_from_slice(&bytes);
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
struct RecordingDelay(Rc<RefCell<Vec<u32>>>);

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(ms);
    }
}

fn fake() -> (Sen5x<FakeTransport, RecordingDelay>, FakeTransport, RecordingDelay) {
    let transport = FakeTransport::default();
    let delay = RecordingDelay::default();
    let sensor = Sen5x::new(transport.clone(), delay.clone());
    (sensor, transport, delay)
}

#[test]
fn init_resets_sensor() {
    let (sensor, mut i2c) = initialized(Variant::Sen55, &[]);
    assert!(sensor.is_initialized());
    assert_eq!(sensor.variant(), Variant::Sen55);
    i2c.done();
}

#[test]
fn init_requires_linked_capabilities() {
    let transport = FakeTransport::default();
    let mut sensor = Sen5x::<FakeTransport, RecordingDelay>::default();
    assert_eq!(sensor.init(), Err(Error::MissingCapability));

    sensor.link_transport(transport.clone());
    assert_eq!(sensor.init(), Err(Error::MissingCapability));
    assert_eq!(transport.0.borrow().opened, 0);

    sensor.link_delay(RecordingDelay::default());
    assert_eq!(sensor.init(), Ok(()));
    assert_eq!(transport.0.borrow().opened, 1);
}

#[test]
fn init_reports_open_failure() {
    let (mut sensor, transport, _) = fake();
    transport.0.borrow_mut().fail_open = true;
    assert_eq!(sensor.init(), Err(Error::Transport("open")));
    assert!(transport.0.borrow().writes.is_empty());
    assert!(!sensor.is_initialized());
}

#[test]
fn init_closes_transport_when_reset_fails() {
    let (mut sensor, transport, _) = fake();
    transport.0.borrow_mut().fail_writes = true;
    assert_eq!(sensor.init(), Err(Error::ResetFailed("write")));
    assert_eq!(transport.0.borrow().closed, 1);
    assert!(!sensor.is_initialized());
}

#[test]
fn deinit_leaves_transport_open_when_reset_fails() {
    let (mut sensor, transport, _) = fake();
    sensor.init().unwrap();
    transport.0.borrow_mut().fail_writes = true;

    assert_eq!(sensor.deinit(), Err(Error::ResetFailed("write")));
    assert_eq!(transport.0.borrow().closed, 0);
    assert!(sensor.is_initialized());
}

#[test]
fn deinit_reports_close_failure() {
    let (mut sensor, transport, _) = fake();
    sensor.init().unwrap();
    transport.0.borrow_mut().fail_close = true;

    assert_eq!(sensor.deinit(), Err(Error::Transport("close")));
    assert!(sensor.is_initialized());
}

#[test]
fn deinit_resets_and_closes() {
    let (mut sensor, transport, _) = fake();
    sensor.init().unwrap();
    assert_eq!(sensor.deinit(), Ok(()));
    assert!(!sensor.is_initialized());

    let state = transport.0.borrow();
    assert_eq!(state.closed, 1);
    assert_eq!(state.writes, vec![vec![0xd3, 0x04], vec![0xd3, 0x04]]);
    drop(state);

    assert_eq!(sensor.start_measurement(), Err(Error::NotInitialized));

    let (released, delay) = sensor.release();
    assert!(Rc::ptr_eq(&released.unwrap().0, &transport.0));
    assert!(delay.is_some());
}

#[test]
fn deinit_requires_init() {
    let (mut sensor, transport, _) = fake();
    assert_eq!(sensor.deinit(), Err(Error::NotInitialized));
    assert_eq!(transport.0.borrow().closed, 0);
}

#[test]
fn operations_require_init() {
    let mut i2c = I2cMock::new(&[]);
    let mut sensor: MockSen5x = Sen5x::new(I2cTransport::new(i2c.clone()), NoopDelay::new());

    assert_eq!(sensor.start_measurement(), Err(Error::NotInitialized));
    assert_eq!(sensor.read_data_ready_flag(), Err(Error::NotInitialized));
    assert_eq!(sensor.get_serial_number(), Err(Error::NotInitialized));
    assert_eq!(
        sensor.set_voc_algorithm_tuning(&AlgorithmTuning::voc_default().index_offset(0)),
        Err(Error::NotInitialized)
    );
    i2c.done();
}

#[test]
fn variant_accessors_work_before_init() {
    let mut sensor = Sen5x::<FakeTransport, RecordingDelay>::default();
    assert_eq!(sensor.variant(), Variant::Sen50);
    sensor.set_variant(Variant::Sen54);
    assert_eq!(sensor.variant(), Variant::Sen54);
    assert!(!sensor.is_initialized());
}

#[test]
fn measure_and_read_sen55() {
    let mut expectations = vec![command(Command::StartMeasurement)];
    expectations.extend(data_ready(true));
    expectations.extend(response(Command::ReadMeasuredValues, measured_values()));
    let (mut sensor, mut i2c) = initialized(Variant::Sen55, &expectations);

    sensor.start_measurement().unwrap();
    let data = sensor.read_sen55().unwrap();

    assert_eq!(data.pm1_0, 10.0);
    assert_eq!(data.pm2_5, 12.5);
    assert_eq!(data.pm10_0, 14.1);
    assert_eq!(data.humidity, 45.5);
    assert_eq!(data.temperature, 23.5);
    assert_eq!(data.voc_index, 100.0);
    assert_eq!(data.nox_index, 1.0);
    assert!(data.pm_valid);
    assert_eq!(data.raw.pm1_0, 100);
    i2c.done();
}

#[test]
fn read_sen54_and_sen50() {
    let mut expectations = Vec::new();
    expectations.extend(data_ready(true));
    expectations.extend(response(Command::ReadMeasuredValues, measured_values()));
    let (mut sensor, mut i2c) = initialized(Variant::Sen54, &expectations);
    let data = sensor.read_sen54().unwrap();
    assert_eq!(data.voc_index, 100.0);
    assert_eq!(data.pm4_0, 13.0);
    i2c.done();

    let (mut sensor, mut i2c) = initialized(Variant::Sen50, &expectations);
    let data = sensor.read_sen50().unwrap();
    assert_eq!(data.pm1_0, 10.0);
    assert!(data.pm_valid);
    i2c.done();
}

#[test]
fn variant_gating_happens_before_bus_activity() {
    let (mut sensor, mut i2c) = initialized(Variant::Sen50, &[]);
    assert_eq!(sensor.read_sen55(), Err(Error::UnsupportedVariant));
    assert_eq!(sensor.read_sen54(), Err(Error::UnsupportedVariant));
    assert_eq!(sensor.read_raw_values(), Err(Error::UnsupportedVariant));
    assert_eq!(sensor.start_measurement_without_pm(), Err(Error::UnsupportedVariant));
    i2c.done();

    let (mut sensor, mut i2c) = initialized(Variant::Sen55, &[]);
    assert_eq!(sensor.read_sen50(), Err(Error::UnsupportedVariant));
    i2c.done();
}

#[test]
fn gated_read_issues_no_transport_call() {
    let (mut sensor, transport, _) = fake();
    sensor.init().unwrap();
    let writes_after_init = transport.0.borrow().writes.len();

    assert_eq!(sensor.read_sen55(), Err(Error::UnsupportedVariant));
    assert_eq!(transport.0.borrow().writes.len(), writes_after_init);
}

#[test]
fn start_without_pm_on_sen54() {
    let (mut sensor, mut i2c) =
        initialized(Variant::Sen54, &[command(Command::StartMeasurementWithoutPm)]);
    sensor.start_measurement_without_pm().unwrap();
    i2c.done();
}

#[test]
fn corrupted_chunk_fails_whole_read() {
    let mut bytes = measured_values();
    bytes[23] ^= 0xff;
    let mut expectations = Vec::new();
    expectations.extend(data_ready(true));
    expectations.extend(response(Command::ReadMeasuredValues, bytes));
    let (mut sensor, mut i2c) = initialized(Variant::Sen55, &expectations);

    assert_eq!(sensor.read_sen55(), Err(Error::CrcMismatch));
    i2c.done();
}

#[test]
fn data_not_ready() {
    let (mut sensor, mut i2c) = initialized(Variant::Sen55, &data_ready(false));
    assert_eq!(sensor.read_sen55(), Err(Error::DataNotReady));
    i2c.done();
}

#[test]
fn data_ready_flag_is_crc_checked() {
    let (mut sensor, mut i2c) = initialized(
        Variant::Sen55,
        &response(Command::ReadDataReadyFlag, vec![0x00, 0x01, 0x00]),
    );
    assert_eq!(sensor.read_data_ready_flag(), Err(Error::CrcMismatch));
    i2c.done();
}

#[test]
fn data_ready_flag_uses_lowest_bit() {
    let (mut sensor, mut i2c) = initialized(
        Variant::Sen55,
        &response(Command::ReadDataReadyFlag, framed(&[0x0101])),
    );
    assert_eq!(sensor.read_data_ready_flag(), Ok(DataReadyFlag::Available));
    i2c.done();
}

#[test]
fn read_pm_values() {
    let mut expectations = Vec::new();
    expectations.extend(data_ready(true));
    expectations.extend(response(
        Command::ReadMeasuredPmValues,
        framed(&[10, 20, 30, 40, 50, 60, 70, 80, 90, 550]),
    ));
    let (mut sensor, mut i2c) = initialized(Variant::Sen50, &expectations);

    let pm = sensor.read_pm_values().unwrap();
    assert!(pm.pm_valid);
    assert_eq!(pm.pm2_5, 2.0);
    assert_eq!(pm.number_pm2_5, 7.0);
    assert_eq!(pm.typical_particle_size, 0.55);
    i2c.done();
}

#[test]
fn read_raw_values() {
    let mut expectations = Vec::new();
    expectations.extend(data_ready(true));
    expectations.extend(response(
        Command::ReadMeasuredRawValues,
        framed(&[5000, 0x7fff, 31000, 0xffff]),
    ));
    let (mut sensor, mut i2c) = initialized(Variant::Sen55, &expectations);

    let raw = sensor.read_raw_values().unwrap();
    assert_eq!(raw.humidity, 50.0);
    assert!(raw.temperature.is_nan());
    assert_eq!(raw.voc, 31000.0);
    assert!(raw.nox.is_nan());
    i2c.done();
}

#[test]
fn transport_errors_are_surfaced() {
    let (mut sensor, mut i2c) = initialized(
        Variant::Sen55,
        &[
            Transaction::write(SENSOR_ADDR, vec![0x02, 0x02]),
            Transaction::read(SENSOR_ADDR, vec![0; 3]).with_error(ErrorKind::Other),
            command(Command::StopMeasurement).with_error(ErrorKind::Other),
        ],
    );
    assert_eq!(sensor.read_data_ready_flag(), Err(Error::Transport(ErrorKind::Other)));
    assert_eq!(sensor.stop_measurement(), Err(Error::Transport(ErrorKind::Other)));
    i2c.done();
}

#[test]
fn voc_tuning_rejects_out_of_range_without_bus_activity() {
    let (mut sensor, mut i2c) = initialized(Variant::Sen55, &[]);
    let tuning = AlgorithmTuning::voc_default().index_offset(0);
    assert_eq!(sensor.set_voc_algorithm_tuning(&tuning), Err(Error::InvalidArgument));
    i2c.done();
}

#[test]
fn voc_tuning_accepts_upper_bounds() {
    let (mut sensor, mut i2c) = initialized(
        Variant::Sen55,
        &[command_with(
            Command::VocAlgorithmTuning,
            &[250, 1000, 1000, 3000, 5000, 1000],
        )],
    );
    let tuning = AlgorithmTuning {
        index_offset: 250,
        learning_time_offset_hour: 1000,
        learning_time_gain_hour: 1000,
        gating_max_duration_minute: 3000,
        std_initial: 5000,
        gain_factor: 1000,
    };
    assert_eq!(sensor.set_voc_algorithm_tuning(&tuning), Ok(()));
    i2c.done();
}

#[test]
fn nox_tuning_requires_fixed_parameters() {
    let (mut sensor, mut i2c) = initialized(
        Variant::Sen55,
        &[command_with(Command::NoxAlgorithmTuning, &[1, 12, 12, 720, 50, 230])],
    );
    let base = AlgorithmTuning::nox_default();
    assert_eq!(
        sensor.set_nox_algorithm_tuning(&base.learning_time_gain_hour(13)),
        Err(Error::InvalidArgument)
    );
    assert_eq!(
        sensor.set_nox_algorithm_tuning(&base.std_initial(10)),
        Err(Error::InvalidArgument)
    );
    assert_eq!(sensor.set_nox_algorithm_tuning(&base), Ok(()));
    i2c.done();
}

#[test]
fn get_algorithm_tuning() {
    let mut expectations = Vec::new();
    expectations.extend(response(
        Command::VocAlgorithmTuning,
        framed(&[100, 12, 12, 180, 50, 230]),
    ));
    expectations.extend(response(
        Command::NoxAlgorithmTuning,
        framed(&[1, 12, 12, 720, 50, 230]),
    ));
    let (mut sensor, mut i2c) = initialized(Variant::Sen55, &expectations);

    assert_eq!(
        sensor.get_voc_algorithm_tuning(),
        Ok(AlgorithmTuning::voc_default())
    );
    assert_eq!(
        sensor.get_nox_algorithm_tuning(),
        Ok(AlgorithmTuning::nox_default())
    );
    i2c.done();
}

#[test]
fn temperature_compensation() {
    let mut expectations = vec![command_with(
        Command::TemperatureCompensation,
        &[(-300i16) as u16, 100, 600],
    )];
    expectations.extend(response(
        Command::TemperatureCompensation,
        framed(&[(-300i16) as u16, 100, 600]),
    ));
    let (mut sensor, mut i2c) = initialized(Variant::Sen54, &expectations);

    sensor
        .set_temperature_compensation(TemperatureCompensation {
            offset: -1.5,
            normalized_slope: 0.01,
            time_constant: 600.0,
        })
        .unwrap();
    let register = sensor.get_temperature_compensation().unwrap();
    assert_eq!(
        register,
        TemperatureCompensationRegister {
            offset: -300,
            normalized_slope: 100,
            time_constant: 600,
        }
    );
    assert_eq!(register.to_data().offset, -1.5);
    i2c.done();
}

#[test]
fn unrepresentable_compensation_is_rejected_before_bus_activity() {
    let (mut sensor, mut i2c) = initialized(Variant::Sen55, &[]);
    let valid = TemperatureCompensation {
        offset: -1.5,
        normalized_slope: 0.01,
        time_constant: 600.0,
    };

    for compensation in [
        TemperatureCompensation {
            offset: 200.0,
            ..valid
        },
        TemperatureCompensation {
            normalized_slope: f32::NAN,
            ..valid
        },
        TemperatureCompensation {
            time_constant: -1.0,
            ..valid
        },
    ] {
        assert_eq!(
            sensor.set_temperature_compensation(compensation),
            Err(Error::InvalidArgument)
        );
    }
    i2c.done();
}

#[test]
fn compensation_register_is_written_as_is() {
    let (mut sensor, mut i2c) = initialized(
        Variant::Sen55,
        &[command_with(Command::TemperatureCompensation, &[0x7fff, 0x8000, 0])],
    );
    sensor
        .set_temperature_compensation(TemperatureCompensationRegister {
            offset: i16::MAX,
            normalized_slope: i16::MIN,
            time_constant: 0,
        })
        .unwrap();
    i2c.done();
}

#[test]
fn warm_start_and_acceleration_mode() {
    let mut expectations = vec![command_with(Command::WarmStart, &[0xffff])];
    expectations.extend(response(Command::WarmStart, framed(&[0xffff])));
    expectations.push(command_with(Command::RhtAccelerationMode, &[2]));
    expectations.extend(response(Command::RhtAccelerationMode, framed(&[1])));
    expectations.extend(response(Command::RhtAccelerationMode, framed(&[7])));
    let (mut sensor, mut i2c) = initialized(Variant::Sen55, &expectations);

    sensor.set_warm_start(0xffff).unwrap();
    assert_eq!(sensor.get_warm_start(), Ok(0xffff));
    sensor
        .set_rht_acceleration_mode(RhtAccelerationMode::Medium)
        .unwrap();
    assert_eq!(
        sensor.get_rht_acceleration_mode(),
        Ok(RhtAccelerationMode::High)
    );
    assert_eq!(
        sensor.get_rht_acceleration_mode(),
        Err(Error::InvalidArgument)
    );
    i2c.done();
}

#[test]
fn voc_algorithm_state() {
    let state = [0x1234, 0x5678, 0x9abc, 0xdef0];
    let mut expectations = vec![command_with(Command::VocAlgorithmState, &state)];
    expectations.extend(response(Command::VocAlgorithmState, framed(&state)));
    let (mut sensor, mut i2c) = initialized(Variant::Sen55, &expectations);

    sensor.set_voc_algorithm_state(state).unwrap();
    assert_eq!(sensor.get_voc_algorithm_state(), Ok(state));
    i2c.done();
}

#[test]
fn auto_cleaning_interval() {
    let mut expectations = vec![command_with(
        Command::AutoCleaningInterval,
        &[0x0009, 0x3a80],
    )];
    expectations.extend(response(Command::AutoCleaningInterval, framed(&[0x0009, 0x3a80])));
    expectations.push(command_with(Command::AutoCleaningInterval, &[0, 0]));
    expectations.push(command(Command::StartFanCleaning));
    let (mut sensor, mut i2c) = initialized(Variant::Sen50, &expectations);

    assert_eq!(sensor.set_auto_cleaning_interval(9), Err(Error::InvalidArgument));
    assert_eq!(
        sensor.set_auto_cleaning_interval(604_801),
        Err(Error::InvalidArgument)
    );
    sensor
        .set_auto_cleaning_interval(config::DEFAULT_AUTO_CLEANING_INTERVAL)
        .unwrap();
    assert_eq!(
        sensor.get_auto_cleaning_interval(),
        Ok(config::DEFAULT_AUTO_CLEANING_INTERVAL)
    );
    sensor.disable_auto_cleaning_interval().unwrap();
    sensor.start_fan_cleaning().unwrap();
    i2c.done();
}

#[test]
fn identification_strings() {
    let mut name = [0u16; 16];
    name[0] = u16::from_be_bytes(*b"SE");
    name[1] = u16::from_be_bytes(*b"N5");
    name[2] = u16::from_be_bytes([b'5', 0]);
    let mut serial = [0u16; 16];
    for (word, pair) in serial.iter_mut().zip(b"F3A9C1D2E4B56789".chunks(2)) {
        *word = u16::from_be_bytes([pair[0], pair[1]]);
    }

    let mut expectations = Vec::new();
    expectations.extend(response(Command::ReadProductName, framed(&name)));
    expectations.extend(response(Command::ReadSerialNumber, framed(&serial)));
    let (mut sensor, mut i2c) = initialized(Variant::Sen55, &expectations);

    assert_eq!(sensor.get_product_name().unwrap().as_str(), Some("SEN55"));
    assert_eq!(
        sensor.get_serial_number().unwrap().as_str(),
        Some("F3A9C1D2E4B56789")
    );
    i2c.done();
}

#[test]
fn version_and_status() {
    let mut expectations = Vec::new();
    expectations.extend(response(Command::ReadVersion, framed(&[0x0200])));
    expectations.extend(response(
        Command::ReadDeviceStatus,
        framed(&[0x0028, 0x0010]),
    ));
    expectations.push(command(Command::ClearDeviceStatus));
    expectations.push(command(Command::Reset));
    let (mut sensor, mut i2c) = initialized(Variant::Sen55, &expectations);

    assert_eq!(sensor.get_version(), Ok(2));
    let status = sensor.get_device_status().unwrap();
    assert_eq!(status.raw(), 0x0028_0010);
    assert!(status.fan_speed_warning());
    assert!(status.fan_cleaning_active());
    assert!(status.fan_error());
    assert!(!status.laser_error());
    sensor.clear_device_status().unwrap();
    sensor.reset().unwrap();
    i2c.done();
}

#[test]
fn device_status_is_crc_checked() {
    let mut bytes = framed(&[0x0000, 0x0010]);
    bytes[5] ^= 0x01;
    let (mut sensor, mut i2c) =
        initialized(Variant::Sen55, &response(Command::ReadDeviceStatus, bytes));
    assert_eq!(sensor.get_device_status(), Err(Error::CrcMismatch));
    i2c.done();
}

#[test]
fn raw_register_access() {
    let payload = framed(&[0x0064]);
    let mut write = vec![0x60, 0xc6];
    write.extend(&payload);
    let (mut sensor, mut i2c) = initialized(
        Variant::Sen55,
        &[
            Transaction::write(SENSOR_ADDR, write),
            Transaction::write(SENSOR_ADDR, vec![0xd1, 0x00]),
            Transaction::read(SENSOR_ADDR, vec![0x02, 0x00, 0xff]),
        ],
    );

    assert_eq!(sensor.set_reg(0x60c6, &[0u8; 31]), Err(Error::InvalidArgument));
    sensor.set_reg(0x60c6, &payload).unwrap();
    let mut buffer = [0u8; 3];
    sensor.get_reg(0xd100, &mut buffer).unwrap();
    // No CRC check on raw reads.
    assert_eq!(buffer, [0x02, 0x00, 0xff]);
    i2c.done();
}

#[test]
fn settle_delays() {
    let (mut sensor, transport, delay) = fake();
    sensor.set_variant(Variant::Sen55);
    sensor.init().unwrap();
    sensor.start_measurement().unwrap();
    sensor.start_measurement_without_pm().unwrap();
    transport
        .0
        .borrow_mut()
        .responses
        .push_back(framed(&[0x0400]));
    sensor.get_version().unwrap();
    sensor.stop_measurement().unwrap();

    assert_eq!(*delay.0.borrow(), vec![200, 50, 50, 20, 200]);
}

#[test]
fn chip_info() {
    let info = info();
    assert_eq!(info.chip_name, "Sensirion SEN5X");
    assert_eq!(info.interface, "IIC");
    assert_eq!(info.supply_voltage_max_v, 5.5);
}
