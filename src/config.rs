use core::ops::RangeInclusive;

use crate::convert;

/// Allowed auto cleaning intervals in seconds. 0 disables auto cleaning.
pub const AUTO_CLEANING_INTERVAL_RANGE: RangeInclusive<u32> = 10..=604_800;

/// Auto cleaning interval used by the sensor after a reset (one week).
pub const DEFAULT_AUTO_CLEANING_INTERVAL: u32 = 604_800;

const INDEX_OFFSET_RANGE: RangeInclusive<i16> = 1..=250;
const LEARNING_TIME_OFFSET_RANGE: RangeInclusive<i16> = 1..=1000;
const LEARNING_TIME_GAIN_RANGE: RangeInclusive<i16> = 1..=1000;
const GATING_MAX_DURATION_RANGE: RangeInclusive<i16> = 0..=3000;
const STD_INITIAL_RANGE: RangeInclusive<i16> = 10..=5000;
const GAIN_FACTOR_RANGE: RangeInclusive<i16> = 1..=1000;

/// The NOx algorithm only accepts these values.
const NOX_LEARNING_TIME_GAIN: i16 = 12;
const NOX_STD_INITIAL: i16 = 50;

/// Tuning parameters of the VOC or NOx gas index algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlgorithmTuning {
    /// Index representing typical (average) conditions, 1..=250.
    pub index_offset: i16,
    /// Time constant to estimate the offset from the history [h], 1..=1000.
    pub learning_time_offset_hour: i16,
    /// Time constant to estimate the gain from the history [h], 1..=1000.
    /// Must be 12 for NOx.
    pub learning_time_gain_hour: i16,
    /// Maximum duration of gating [min], 0..=3000. 0 disables gating.
    pub gating_max_duration_minute: i16,
    /// Initial estimate for the standard deviation, 10..=5000.
    /// Must be 50 for NOx.
    pub std_initial: i16,
    /// Gain factor to amplify or attenuate the index output, 1..=1000.
    pub gain_factor: i16,
}

impl AlgorithmTuning {
    /// Factory defaults of the VOC algorithm.
    pub const fn voc_default() -> Self {
        AlgorithmTuning {
            index_offset: 100,
            learning_time_offset_hour: 12,
            learning_time_gain_hour: 12,
            gating_max_duration_minute: 180,
            std_initial: 50,
            gain_factor: 230,
        }
    }

    /// Factory defaults of the NOx algorithm.
    pub const fn nox_default() -> Self {
        AlgorithmTuning {
            index_offset: 1,
            learning_time_offset_hour: 12,
            learning_time_gain_hour: 12,
            gating_max_duration_minute: 720,
            std_initial: 50,
            gain_factor: 230,
        }
    }

    pub fn index_offset(mut self, index_offset: i16) -> Self {
        self.index_offset = index_offset;
        self
    }

    pub fn learning_time_offset_hour(mut self, hours: i16) -> Self {
        self.learning_time_offset_hour = hours;
        self
    }

    pub fn learning_time_gain_hour(mut self, hours: i16) -> Self {
        self.learning_time_gain_hour = hours;
        self
    }

    pub fn gating_max_duration_minute(mut self, minutes: i16) -> Self {
        self.gating_max_duration_minute = minutes;
        self
    }

    pub fn std_initial(mut self, std_initial: i16) -> Self {
        self.std_initial = std_initial;
        self
    }

    pub fn gain_factor(mut self, gain_factor: i16) -> Self {
        self.gain_factor = gain_factor;
        self
    }

    /// Checks the parameters against the VOC algorithm limits.
    ///
    /// The error names the first offending parameter.
    pub fn validate_voc(&self) -> Result<(), &'static str> {
        self.validate_common()?;
        if !LEARNING_TIME_GAIN_RANGE.contains(&self.learning_time_gain_hour) {
            return Err("learning time gain hour > 1000 or learning time gain hour < 1");
        }
        if !STD_INITIAL_RANGE.contains(&self.std_initial) {
            return Err("std initial > 5000 or std initial < 10");
        }
        Ok(())
    }

    /// Checks the parameters against the NOx algorithm limits.
    pub fn validate_nox(&self) -> Result<(), &'static str> {
        self.validate_common()?;
        if self.learning_time_gain_hour != NOX_LEARNING_TIME_GAIN {
            return Err("learning time gain hour must be 12");
        }
        if self.std_initial != NOX_STD_INITIAL {
            return Err("std initial must be 50");
        }
        Ok(())
    }

    fn validate_common(&self) -> Result<(), &'static str> {
        if !INDEX_OFFSET_RANGE.contains(&self.index_offset) {
            return Err("index offset > 250 or index offset < 1");
        }
        if !LEARNING_TIME_OFFSET_RANGE.contains(&self.learning_time_offset_hour) {
            return Err("learning time offset hour > 1000 or learning time offset hour < 1");
        }
        if !GATING_MAX_DURATION_RANGE.contains(&self.gating_max_duration_minute) {
            return Err("gating max duration minute > 3000 or gating max duration minute < 0");
        }
        if !GAIN_FACTOR_RANGE.contains(&self.gain_factor) {
            return Err("gain factor > 1000 or gain factor < 1");
        }
        Ok(())
    }

    pub(crate) fn words(&self) -> [u16; 6] {
        [
            self.index_offset as u16,
            self.learning_time_offset_hour as u16,
            self.learning_time_gain_hour as u16,
            self.gating_max_duration_minute as u16,
            self.std_initial as u16,
            self.gain_factor as u16,
        ]
    }

    pub(crate) fn from_words(words: [u16; 6]) -> Self {
        AlgorithmTuning {
            index_offset: words[0] as i16,
            learning_time_offset_hour: words[1] as i16,
            learning_time_gain_hour: words[2] as i16,
            gating_max_duration_minute: words[3] as i16,
            std_initial: words[4] as i16,
            gain_factor: words[5] as i16,
        }
    }
}

/// Temperature compensation in engineering units.
///
/// The compensated temperature is
/// `T + offset + normalized_slope * T`, low-pass filtered with
/// `time_constant`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureCompensation {
    /// Temperature offset [°C]
    pub offset: f32,
    /// Normalized temperature offset slope
    pub normalized_slope: f32,
    /// Time constant [s]
    pub time_constant: f32,
}

/// Temperature compensation as stored in the sensor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureCompensationRegister {
    /// Temperature offset [°C] [×200]
    pub offset: i16,
    /// Normalized temperature offset slope [×10000]
    pub normalized_slope: i16,
    /// Time constant [s]
    pub time_constant: u16,
}

impl TemperatureCompensation {
    /// Scales to register units.
    ///
    /// Out of range values saturate at the register limits and NaN becomes
    /// 0. Use `TryFrom` to reject them instead.
    pub fn to_register(&self) -> TemperatureCompensationRegister {
        TemperatureCompensationRegister {
            offset: convert::round_to_i16(self.offset * convert::TEMPERATURE_SCALE),
            normalized_slope: convert::round_to_i16(
                self.normalized_slope * convert::SLOPE_SCALE,
            ),
            time_constant: self.time_constant as u16,
        }
    }
}

impl TemperatureCompensationRegister {
    pub fn to_data(&self) -> TemperatureCompensation {
        TemperatureCompensation {
            offset: self.offset as f32 / convert::TEMPERATURE_SCALE,
            normalized_slope: self.normalized_slope as f32 / convert::SLOPE_SCALE,
            time_constant: self.time_constant as f32,
        }
    }
}

impl TryFrom<TemperatureCompensation> for TemperatureCompensationRegister {
    type Error = &'static str;

    fn try_from(data: TemperatureCompensation) -> Result<Self, Self::Error> {
        let offset = convert::checked_round_to_i16(data.offset * convert::TEMPERATURE_SCALE)
            .ok_or("temperature offset out of range")?;
        let normalized_slope =
            convert::checked_round_to_i16(data.normalized_slope * convert::SLOPE_SCALE)
                .ok_or("normalized temperature slope out of range")?;
        if !(0.0..65536.0).contains(&data.time_constant) {
            return Err("time constant out of range");
        }
        Ok(TemperatureCompensationRegister {
            offset,
            normalized_slope,
            time_constant: data.time_constant as u16,
        })
    }
}

impl From<TemperatureCompensationRegister> for TemperatureCompensation {
    fn from(register: TemperatureCompensationRegister) -> Self {
        register.to_data()
    }
}

/// Speed at which the RHT sensor adapts to changes, SEN54 and SEN55 only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum RhtAccelerationMode {
    #[default]
    Low = 0,
    High = 1,
    Medium = 2,
}

impl TryFrom<u16> for RhtAccelerationMode {
    type Error = u16;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Low),
            1 => Ok(Self::High),
            2 => Ok(Self::Medium),
            other => Err(other),
        }
    }
}
