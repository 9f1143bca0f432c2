//! Derived parameter records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kelvin offset for Celsius conversions.
pub const T_KELVIN: f64 = 273.15;

/// One atmospheric level of the vertical profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelRecord {
    /// Model level index, 0 at the surface
    pub level: usize,
    /// Absolute temperature converted to Celsius
    pub temperature_c: f64,
    /// Level pressure (hPa)
    pub pressure_hpa: f64,
    /// Geopotential height (m)
    pub height_m: f64,
    /// Water vapour mixing ratio (g/kg)
    pub mixing_ratio_g_kg: f64,
}

/// All parameters derived for one (station, snapshot) pair.
///
/// A single derivation computes the full superset once; the database
/// sink and the TROPOSINEX sink each consume the fields they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    /// Snapshot timestamp the record is valid for
    pub valid_time: DateTime<Utc>,

    // Surface parameters
    /// 2-m temperature (Celsius)
    pub temperature_c: f64,
    /// Surface pressure (hPa)
    pub pressure_hpa: f64,
    /// Terrain height above sea level (m)
    pub height_m: f64,
    /// Accumulated precipitation, all species (mm)
    pub precipitation_mm: f64,
    /// Planetary boundary layer height (m)
    pub pbl_height_m: f64,
    /// 2-m specific humidity (g/kg)
    pub specific_humidity_g_kg: f64,

    // Integrated / delay parameters
    /// Integrated water vapour (kg/m^2)
    pub iwv_kg_m2: f64,
    /// Weighted-mean temperature Tm (K)
    pub mean_temperature_k: f64,
    /// Zenith hydrostatic delay (m)
    pub zhd_m: f64,
    /// Zenith wet delay (mm)
    pub zwd_mm: f64,
    /// Zenith total delay (mm)
    pub ztd_mm: f64,

    /// Vertical profile, one entry per model level
    pub levels: Vec<LevelRecord>,
}

impl DerivedRecord {
    /// Zenith hydrostatic delay in millimeters, as exported.
    pub fn zhd_mm(&self) -> f64 {
        self.zhd_m * 1000.0
    }

    /// Dry temperature reconstituted to Kelvin, as exported.
    pub fn temperature_k(&self) -> f64 {
        self.temperature_c + T_KELVIN
    }
}
