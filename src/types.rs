/// SEN5x product variant.
///
/// All three share the wire protocol but populate different fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// Particulate matter only.
    #[default]
    Sen50,
    /// Particulate matter, humidity, temperature and VOC.
    Sen54,
    /// Particulate matter, humidity, temperature, VOC and NOx.
    Sen55,
}

/// Whether the sensor holds a measurement that has not been read yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataReadyFlag {
    NotReady,
    Available,
}

/// Words returned by the read measured values command, as sent by the sensor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeasuredValuesRaw {
    /// Mass Concentration PM1.0 [μg/m³] [×10]
    pub pm1_0: u16,
    /// Mass Concentration PM2.5 [μg/m³] [×10]
    pub pm2_5: u16,
    /// Mass Concentration PM4.0 [μg/m³] [×10]
    pub pm4_0: u16,
    /// Mass Concentration PM10.0 [μg/m³] [×10]
    pub pm10_0: u16,
    /// Compensated Ambient Humidity [%RH] [×100]
    pub humidity: i16,
    /// Compensated Ambient Temperature [°C] [×200]
    pub temperature: i16,
    /// VOC Index [×10]
    pub voc_index: i16,
    /// NOx Index [×10]
    pub nox_index: i16,
}

/// SEN55 sensor data.
///
/// Values the sensor could not provide are NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sen55Data {
    /// Mass Concentration PM1.0 [μg/m³]
    pub pm1_0: f32,
    /// Mass Concentration PM2.5 [μg/m³]
    pub pm2_5: f32,
    /// Mass Concentration PM4.0 [μg/m³]
    pub pm4_0: f32,
    /// Mass Concentration PM10 [μg/m³]
    pub pm10_0: f32,
    /// Compensated Ambient Humidity [%RH]
    pub humidity: f32,
    /// Compensated Ambient Temperature [°C]
    pub temperature: f32,
    /// VOC Index
    pub voc_index: f32,
    /// NOx Index
    pub nox_index: f32,
    /// False if any mass concentration was unavailable.
    pub pm_valid: bool,
    pub raw: MeasuredValuesRaw,
}

/// SEN54 sensor data. Same as [`Sen55Data`] without NOx.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sen54Data {
    /// Mass Concentration PM1.0 [μg/m³]
    pub pm1_0: f32,
    /// Mass Concentration PM2.5 [μg/m³]
    pub pm2_5: f32,
    /// Mass Concentration PM4.0 [μg/m³]
    pub pm4_0: f32,
    /// Mass Concentration PM10 [μg/m³]
    pub pm10_0: f32,
    /// Compensated Ambient Humidity [%RH]
    pub humidity: f32,
    /// Compensated Ambient Temperature [°C]
    pub temperature: f32,
    /// VOC Index
    pub voc_index: f32,
    pub pm_valid: bool,
    pub raw: MeasuredValuesRaw,
}

/// SEN50 sensor data.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sen50Data {
    /// Mass Concentration PM1.0 [μg/m³]
    pub pm1_0: f32,
    /// Mass Concentration PM2.5 [μg/m³]
    pub pm2_5: f32,
    /// Mass Concentration PM4.0 [μg/m³]
    pub pm4_0: f32,
    /// Mass Concentration PM10 [μg/m³]
    pub pm10_0: f32,
    pub pm_valid: bool,
    pub raw: MeasuredValuesRaw,
}

/// Words returned by the read measured PM values command.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PmValuesRaw {
    /// Mass Concentration PM1.0 [μg/m³] [×10]
    pub pm1_0: u16,
    /// Mass Concentration PM2.5 [μg/m³] [×10]
    pub pm2_5: u16,
    /// Mass Concentration PM4.0 [μg/m³] [×10]
    pub pm4_0: u16,
    /// Mass Concentration PM10.0 [μg/m³] [×10]
    pub pm10_0: u16,
    /// Number Concentration PM0.5 [#/cm³] [×10]
    pub number_pm0_5: u16,
    /// Number Concentration PM1.0 [#/cm³] [×10]
    pub number_pm1_0: u16,
    /// Number Concentration PM2.5 [#/cm³] [×10]
    pub number_pm2_5: u16,
    /// Number Concentration PM4.0 [#/cm³] [×10]
    pub number_pm4_0: u16,
    /// Number Concentration PM10.0 [#/cm³] [×10]
    pub number_pm10_0: u16,
    /// Typical Particle Size [μm] [×1000]
    pub typical_particle_size: u16,
}

/// Mass and number concentrations with the typical particle size.
///
/// The ten values are valid or NaN together.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PmValues {
    /// Mass Concentration PM1.0 [μg/m³]
    pub pm1_0: f32,
    /// Mass Concentration PM2.5 [μg/m³]
    pub pm2_5: f32,
    /// Mass Concentration PM4.0 [μg/m³]
    pub pm4_0: f32,
    /// Mass Concentration PM10 [μg/m³]
    pub pm10_0: f32,
    /// Number Concentration PM0.5 [#/cm³]
    pub number_pm0_5: f32,
    /// Number Concentration PM1.0 [#/cm³]
    pub number_pm1_0: f32,
    /// Number Concentration PM2.5 [#/cm³]
    pub number_pm2_5: f32,
    /// Number Concentration PM4.0 [#/cm³]
    pub number_pm4_0: f32,
    /// Number Concentration PM10 [#/cm³]
    pub number_pm10_0: f32,
    /// Typical Particle Size [μm]
    pub typical_particle_size: f32,
    pub pm_valid: bool,
    pub raw: PmValuesRaw,
}

/// Words returned by the read measured raw values command.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawValuesRaw {
    /// Raw Humidity [%RH] [×100]
    pub humidity: i16,
    /// Raw Temperature [°C] [×200]
    pub temperature: i16,
    /// Raw VOC [ticks]
    pub voc: u16,
    /// Raw NOx [ticks]
    pub nox: u16,
}

/// Uncompensated humidity and temperature with the raw gas sensor signals.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawValues {
    /// Raw Humidity [%RH]
    pub humidity: f32,
    /// Raw Temperature [°C]
    pub temperature: f32,
    /// Raw VOC [ticks]
    pub voc: f32,
    /// Raw NOx [ticks]
    pub nox: f32,
    pub raw: RawValuesRaw,
}

/// Device status register.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceStatus(pub u32);

impl DeviceStatus {
    const FAN_SPEED_WARNING: u32 = 1 << 21;
    const FAN_CLEANING_ACTIVE: u32 = 1 << 19;
    const GAS_ERROR: u32 = 1 << 7;
    const RHT_ERROR: u32 = 1 << 6;
    const LASER_ERROR: u32 = 1 << 5;
    const FAN_ERROR: u32 = 1 << 4;

    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Fan speed is too high or too low.
    pub fn fan_speed_warning(&self) -> bool {
        self.0 & Self::FAN_SPEED_WARNING != 0
    }

    pub fn fan_cleaning_active(&self) -> bool {
        self.0 & Self::FAN_CLEANING_ACTIVE != 0
    }

    /// Gas sensor error (SEN54 and SEN55).
    pub fn gas_error(&self) -> bool {
        self.0 & Self::GAS_ERROR != 0
    }

    /// Error in internal communication with the RHT sensor.
    pub fn rht_error(&self) -> bool {
        self.0 & Self::RHT_ERROR != 0
    }

    /// Laser is switched on and current is out of range.
    pub fn laser_error(&self) -> bool {
        self.0 & Self::LASER_ERROR != 0
    }

    /// Fan is switched on but the measured fan speed is 0 RPM.
    pub fn fan_error(&self) -> bool {
        self.0 & Self::FAN_ERROR != 0
    }

    /// True if any of the error flags is set. Fan cleaning is not an error.
    pub fn has_error(&self) -> bool {
        self.0
            & (Self::FAN_SPEED_WARNING
                | Self::GAS_ERROR
                | Self::RHT_ERROR
                | Self::LASER_ERROR
                | Self::FAN_ERROR)
            != 0
    }
}

/// A 32 byte ASCII identification string, NUL padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Identifier(pub [u8; 32]);

impl Identifier {
    /// Bytes up to the first NUL.
    pub fn as_bytes(&self) -> &[u8] {
        let len = self.0.iter().position(|b| *b == 0).unwrap_or(self.0.len());
        &self.0[..len]
    }

    /// The identifier as text, `None` if the sensor sent non UTF-8 bytes.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.as_bytes()).ok()
    }
}

/// Static information about the chip and this driver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipInfo {
    pub chip_name: &'static str,
    pub manufacturer_name: &'static str,
    pub interface: &'static str,
    /// Minimum supply voltage [V]
    pub supply_voltage_min_v: f32,
    /// Maximum supply voltage [V]
    pub supply_voltage_max_v: f32,
    /// Maximum supply current [mA]
    pub max_current_ma: f32,
    /// Minimum operating temperature [°C]
    pub temperature_min: f32,
    /// Maximum operating temperature [°C]
    pub temperature_max: f32,
    pub driver_version: &'static str,
}
