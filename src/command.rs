/// I²C commands understood by the SEN5x.
///
/// Read/write parameters share one command word for both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    StartMeasurement,
    StartMeasurementWithoutPm,
    StopMeasurement,
    ReadDataReadyFlag,
    ReadMeasuredValues,
    TemperatureCompensation,
    WarmStart,
    VocAlgorithmTuning,
    NoxAlgorithmTuning,
    RhtAccelerationMode,
    VocAlgorithmState,
    StartFanCleaning,
    AutoCleaningInterval,
    ReadProductName,
    ReadSerialNumber,
    ReadVersion,
    ReadDeviceStatus,
    ClearDeviceStatus,
    Reset,
    ReadMeasuredPmValues,
    ReadMeasuredRawValues,
}

impl Command {
    /// The 16-bit command word, sent big-endian.
    pub const fn raw(self) -> u16 {
        match self {
            Self::StartMeasurement => 0x0021,
            Self::StartMeasurementWithoutPm => 0x0037,
            Self::StopMeasurement => 0x0104,
            Self::ReadDataReadyFlag => 0x0202,
            Self::ReadMeasuredValues => 0x03C4,
            Self::TemperatureCompensation => 0x60B2,
            Self::WarmStart => 0x60C6,
            Self::VocAlgorithmTuning => 0x60D0,
            Self::NoxAlgorithmTuning => 0x60E1,
            Self::RhtAccelerationMode => 0x60F7,
            Self::VocAlgorithmState => 0x6181,
            Self::StartFanCleaning => 0x5607,
            Self::AutoCleaningInterval => 0x8004,
            Self::ReadProductName => 0xD014,
            Self::ReadSerialNumber => 0xD033,
            Self::ReadVersion => 0xD100,
            Self::ReadDeviceStatus => 0xD206,
            Self::ClearDeviceStatus => 0xD210,
            Self::Reset => 0xD304,
            Self::ReadMeasuredPmValues => 0x0413,
            Self::ReadMeasuredRawValues => 0x03D2,
        }
    }

    /// Time the sensor needs after this command before it accepts the next
    /// transfer.
    pub const fn settle_ms(self) -> u32 {
        match self {
            Self::StartMeasurement | Self::StartMeasurementWithoutPm => 50,
            Self::StopMeasurement | Self::Reset => 200,
            _ => DEFAULT_SETTLE_MS,
        }
    }
}

/// Settle time for plain register reads and writes.
pub const DEFAULT_SETTLE_MS: u32 = 20;
