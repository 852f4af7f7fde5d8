//! Fixed-point register values to engineering units.
//!
//! Every field has a marker the sensor sends when the value is not
//! available; such fields decode to NaN.

use crate::crc::CHUNK_LEN;
use crate::types::{
    MeasuredValuesRaw, PmValues, PmValuesRaw, RawValues, RawValuesRaw, Sen50Data, Sen54Data,
    Sen55Data,
};

/// "Not available" marker of unsigned fields.
pub const UNSIGNED_SENTINEL: u16 = 0xFFFF;
/// "Not available" marker of signed fields.
pub const SIGNED_SENTINEL: i16 = 0x7FFF;

pub(crate) const CONCENTRATION_SCALE: f32 = 10.0;
pub(crate) const PARTICLE_SIZE_SCALE: f32 = 1000.0;
pub(crate) const HUMIDITY_SCALE: f32 = 100.0;
pub(crate) const TEMPERATURE_SCALE: f32 = 200.0;
pub(crate) const INDEX_SCALE: f32 = 10.0;
pub(crate) const SLOPE_SCALE: f32 = 10000.0;

fn unsigned(raw: u16, scale: f32) -> f32 {
    if raw == UNSIGNED_SENTINEL {
        f32::NAN
    } else {
        raw as f32 / scale
    }
}

fn signed(raw: i16, scale: f32) -> f32 {
    if raw == SIGNED_SENTINEL {
        f32::NAN
    } else {
        raw as f32 / scale
    }
}

/// Mass or number concentration [μg/m³ or #/cm³].
pub fn concentration(raw: u16) -> f32 {
    unsigned(raw, CONCENTRATION_SCALE)
}

/// Typical particle size [μm].
pub fn particle_size(raw: u16) -> f32 {
    unsigned(raw, PARTICLE_SIZE_SCALE)
}

/// Ambient humidity [%RH].
pub fn humidity(raw: i16) -> f32 {
    signed(raw, HUMIDITY_SCALE)
}

/// Ambient temperature [°C].
pub fn temperature(raw: i16) -> f32 {
    signed(raw, TEMPERATURE_SCALE)
}

/// VOC or NOx index.
pub fn gas_index(raw: i16) -> f32 {
    signed(raw, INDEX_SCALE)
}

/// Raw VOC or NOx signal, reported undivided.
pub fn gas_ticks(raw: u16) -> f32 {
    unsigned(raw, 1.0)
}

/// Rounds half away from zero, saturating at the `i16` limits.
pub(crate) fn round_to_i16(value: f32) -> i16 {
    if value < 0.0 {
        (value - 0.5) as i16
    } else {
        (value + 0.5) as i16
    }
}

/// Like [`round_to_i16`], but `None` for NaN, infinities and values that
/// would saturate.
pub(crate) fn checked_round_to_i16(value: f32) -> Option<i16> {
    if value > -32768.5 && value < 32767.5 {
        Some(round_to_i16(value))
    } else {
        None
    }
}

/// Data words of a CRC-checked buffer.
pub(crate) fn words<const N: usize>(buffer: &[u8]) -> [u16; N] {
    let mut words = [0u16; N];
    for (word, chunk) in words.iter_mut().zip(buffer.chunks(CHUNK_LEN)) {
        *word = u16::from_be_bytes([chunk[0], chunk[1]]);
    }
    words
}

/// Converts a group of concentrations that are only meaningful together.
///
/// If any member is unavailable the whole group is NaN and invalid.
fn concentration_group<const N: usize>(raw: [u16; N], scales: [f32; N]) -> ([f32; N], bool) {
    if raw.contains(&UNSIGNED_SENTINEL) {
        return ([f32::NAN; N], false);
    }
    let mut values = [0.0; N];
    for ((value, raw), scale) in values.iter_mut().zip(raw).zip(scales) {
        *value = raw as f32 / scale;
    }
    (values, true)
}

impl MeasuredValuesRaw {
    pub(crate) fn from_words(words: [u16; 8]) -> Self {
        MeasuredValuesRaw {
            pm1_0: words[0],
            pm2_5: words[1],
            pm4_0: words[2],
            pm10_0: words[3],
            humidity: words[4] as i16,
            temperature: words[5] as i16,
            voc_index: words[6] as i16,
            nox_index: words[7] as i16,
        }
    }

    fn mass_concentrations(&self) -> ([f32; 4], bool) {
        concentration_group(
            [self.pm1_0, self.pm2_5, self.pm4_0, self.pm10_0],
            [CONCENTRATION_SCALE; 4],
        )
    }
}

impl From<MeasuredValuesRaw> for Sen55Data {
    fn from(raw: MeasuredValuesRaw) -> Self {
        let ([pm1_0, pm2_5, pm4_0, pm10_0], pm_valid) = raw.mass_concentrations();
        Sen55Data {
            pm1_0,
            pm2_5,
            pm4_0,
            pm10_0,
            humidity: humidity(raw.humidity),
            temperature: temperature(raw.temperature),
            voc_index: gas_index(raw.voc_index),
            nox_index: gas_index(raw.nox_index),
            pm_valid,
            raw,
        }
    }
}

impl From<MeasuredValuesRaw> for Sen54Data {
    fn from(raw: MeasuredValuesRaw) -> Self {
        let ([pm1_0, pm2_5, pm4_0, pm10_0], pm_valid) = raw.mass_concentrations();
        Sen54Data {
            pm1_0,
            pm2_5,
            pm4_0,
            pm10_0,
            humidity: humidity(raw.humidity),
            temperature: temperature(raw.temperature),
            voc_index: gas_index(raw.voc_index),
            pm_valid,
            raw,
        }
    }
}

impl From<MeasuredValuesRaw> for Sen50Data {
    fn from(raw: MeasuredValuesRaw) -> Self {
        let ([pm1_0, pm2_5, pm4_0, pm10_0], pm_valid) = raw.mass_concentrations();
        Sen50Data {
            pm1_0,
            pm2_5,
            pm4_0,
            pm10_0,
            pm_valid,
            raw,
        }
    }
}

impl PmValuesRaw {
    pub(crate) fn from_words(words: [u16; 10]) -> Self {
        PmValuesRaw {
            pm1_0: words[0],
            pm2_5: words[1],
            pm4_0: words[2],
            pm10_0: words[3],
            number_pm0_5: words[4],
            number_pm1_0: words[5],
            number_pm2_5: words[6],
            number_pm4_0: words[7],
            number_pm10_0: words[8],
            typical_particle_size: words[9],
        }
    }
}

impl From<PmValuesRaw> for PmValues {
    fn from(raw: PmValuesRaw) -> Self {
        let mut scales = [CONCENTRATION_SCALE; 10];
        scales[9] = PARTICLE_SIZE_SCALE;
        let (values, pm_valid) = concentration_group(
            [
                raw.pm1_0,
                raw.pm2_5,
                raw.pm4_0,
                raw.pm10_0,
                raw.number_pm0_5,
                raw.number_pm1_0,
                raw.number_pm2_5,
                raw.number_pm4_0,
                raw.number_pm10_0,
                raw.typical_particle_size,
            ],
            scales,
        );
        PmValues {
            pm1_0: values[0],
            pm2_5: values[1],
            pm4_0: values[2],
            pm10_0: values[3],
            number_pm0_5: values[4],
            number_pm1_0: values[5],
            number_pm2_5: values[6],
            number_pm4_0: values[7],
            number_pm10_0: values[8],
            typical_particle_size: values[9],
            pm_valid,
            raw,
        }
    }
}

impl RawValuesRaw {
    pub(crate) fn from_words(words: [u16; 4]) -> Self {
        RawValuesRaw {
            humidity: words[0] as i16,
            temperature: words[1] as i16,
            voc: words[2],
            nox: words[3],
        }
    }
}

impl From<RawValuesRaw> for RawValues {
    fn from(raw: RawValuesRaw) -> Self {
        RawValues {
            humidity: humidity(raw.humidity),
            temperature: temperature(raw.temperature),
            voc: gas_ticks(raw.voc),
            nox: gas_ticks(raw.nox),
            raw,
        }
    }
}
