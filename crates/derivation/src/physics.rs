//! Physical derivations for one (station, snapshot) pair.
//!
//! All formulas operate on the WRF state variables: perturbation
//! potential temperature (T + 300 K base), perturbation plus base
//! pressure, perturbation plus base geopotential, and vapour mixing
//! ratio. Pressures are carried in hPa, mixing ratios in g/kg.

use std::f64::consts::PI;

use nwp_common::{DerivedRecord, GridCell, LevelRecord, NwpError, NwpResult, Station, T_KELVIN};
use wrf_reader::WrfSnapshot;

/// Dry-air gas constant (J/(kg K))
const RD: f64 = 287.0;
/// Water-vapour gas constant (J/(kg K))
const RV: f64 = 461.51;
/// Gravitational acceleration used for geopotential heights (m/s^2)
const GRAVITY: f64 = 9.81;
/// Base-state potential temperature offset (K)
const BASE_THETA: f64 = 300.0;

/// Highest model level included in the IWV integral. This boundary is
/// tied to the vertical grid configuration of the upstream model runs
/// and must not be generalized.
pub const IWV_TOP_LEVEL: usize = 41;

/// Derive the full parameter set for one station at one grid cell.
///
/// Computes the superset both sinks need: surface values, the zenith
/// hydrostatic delay, the vertical profile, the trapezoidal IWV
/// integral and the wet/total delay decomposition. Any missing value,
/// out-of-range access or non-finite result is an error; the caller
/// skips the station and continues.
pub fn derive_station_record(
    snapshot: &WrfSnapshot,
    station: &Station,
    cell: GridCell,
) -> NwpResult<DerivedRecord> {
    let pressure_hpa = snapshot.psfc.at(cell)? / 100.0;
    let height_m = snapshot.hgt.at(cell)?;
    let t2_k = snapshot.t2.at(cell)?;
    let temperature_c = t2_k - T_KELVIN;
    let precipitation_mm = snapshot.rainnc.at(cell)?
        + snapshot.snownc.at(cell)?
        + snapshot.graupelnc.at(cell)?
        + snapshot.hailnc.at(cell)?;
    let pbl_height_m = snapshot.pblh.at(cell)?;
    let specific_humidity_g_kg = snapshot.q2.at(cell)? * 1000.0;

    let zhd_m = zenith_hydrostatic_delay(pressure_hpa, station.altitude, height_m);

    let rd_cp = RD / (7.0 * RD / 2.0);
    let mut levels = Vec::with_capacity(snapshot.bottom_top);
    let mut iwv = 0.0;

    for k in 0..snapshot.bottom_top {
        let theta = snapshot.t.at(k, cell)? + BASE_THETA;
        let pair_hpa = (snapshot.p.at(k, cell)? + snapshot.pb.at(k, cell)?) / 100.0;
        // (100 * Pair) restores Pa for the Poisson exponent base
        let tk_c = theta * (100.0 * pair_hpa / 100000.0).powf(rd_cp) - T_KELVIN;
        let qv_g_kg = snapshot.qvapor.at(k, cell)? * 1000.0;
        let level_height_m = (snapshot.ph.at(k, cell)? + snapshot.phb.at(k, cell)?) / GRAVITY;

        levels.push(LevelRecord {
            level: k,
            temperature_c: tk_c,
            pressure_hpa: pair_hpa,
            height_m: level_height_m,
            mixing_ratio_g_kg: qv_g_kg,
        });

        // Trapezoidal vapour integral over the fixed level range; the
        // layer references level k+1
        if k <= IWV_TOP_LEVEL && k + 1 < snapshot.bottom_top {
            iwv += layer_vapor_mass(snapshot, cell, k)?;
        }
    }

    if !iwv.is_finite() || !zhd_m.is_finite() {
        return Err(NwpError::Derivation {
            station: station.name.clone(),
            message: format!("non-finite result (IWV = {}, ZHD = {})", iwv, zhd_m),
        });
    }

    // Weighted-mean temperature and the refractivity-based wet delay
    let tm_k = 70.2 + 0.72 * t2_k;
    let k1 = 1.0e6 / (RV * (3.766e5 / tm_k + 22.0));
    // Division by 100 converts cm to m
    let zwd_m = iwv / (k1 * 100.0);
    let ztd_m = zhd_m + zwd_m;

    Ok(DerivedRecord {
        valid_time: snapshot.valid_time,
        temperature_c,
        pressure_hpa,
        height_m,
        precipitation_mm,
        pbl_height_m,
        specific_humidity_g_kg,
        iwv_kg_m2: iwv,
        mean_temperature_k: tm_k,
        zhd_m,
        zwd_mm: zwd_m * 1000.0,
        ztd_mm: ztd_m * 1000.0,
        levels,
    })
}

/// Saastamoinen-style zenith hydrostatic delay (m).
///
/// The cosine term carries the station altitude in degrees, matching
/// the operational SUADA formula.
fn zenith_hydrostatic_delay(pressure_hpa: f64, station_altitude: f64, terrain_height_m: f64) -> f64 {
    let to_rad = PI / 180.0;
    0.0022768 * pressure_hpa
        / (1.0
            - 0.00266 * (2.0 * station_altitude * to_rad).cos()
            - 0.00028 * terrain_height_m / 1000.0)
}

/// Vapour mass of the layer between levels k and k+1 (kg/m^2).
fn layer_vapor_mass(snapshot: &WrfSnapshot, cell: GridCell, k: usize) -> NwpResult<f64> {
    let rho_k = vapor_density(snapshot, cell, k)?;
    let rho_kp1 = vapor_density(snapshot, cell, k + 1)?;

    let h_k = (snapshot.ph.at(k, cell)? + snapshot.phb.at(k, cell)?) / GRAVITY;
    let h_kp1 = (snapshot.ph.at(k + 1, cell)? + snapshot.phb.at(k + 1, cell)?) / GRAVITY;
    let delta_height = (h_kp1 - h_k).abs();

    Ok((rho_k + rho_kp1) / 2.0 * delta_height)
}

/// Water-vapour density at one level (via partial pressure and the
/// true temperature recovered from potential temperature).
fn vapor_density(snapshot: &WrfSnapshot, cell: GridCell, k: usize) -> NwpResult<f64> {
    let qv_g_kg = snapshot.qvapor.at(k, cell)? * 1000.0;
    let q = qv_g_kg / (qv_g_kg + 1.0);

    let pressure_pa = snapshot.p.at(k, cell)? + snapshot.pb.at(k, cell)?;
    let e = (pressure_pa / 100.0 * q) / (0.622 + 0.378 * q);

    let true_temperature_k =
        (snapshot.t.at(k, cell)? + BASE_THETA) * (pressure_pa / 100000.0).powf(2.0 / 7.0);

    Ok(e / (RV * true_temperature_k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nwp_common::GridCell;
    use test_utils::{station_at, three_level_column};

    const CELL: GridCell = GridCell { i: 0, j: 0 };

    #[test]
    fn test_surface_values() {
        let snapshot = three_level_column();
        let station = station_at(42.65, 23.38, 1164.0);

        let record = derive_station_record(&snapshot, &station, CELL).unwrap();

        assert!((record.pressure_hpa - 1000.0).abs() < 1e-9);
        assert!((record.temperature_c - (287.0 - 273.15)).abs() < 1e-9);
        assert!((record.height_m - 500.0).abs() < 1e-9);
        // All four precipitation species contribute
        assert!((record.precipitation_mm - 4.2).abs() < 1e-9);
        assert!((record.pbl_height_m - 850.0).abs() < 1e-9);
        assert!((record.specific_humidity_g_kg - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_iwv_matches_hand_computed_fixture() {
        // Three mass levels at 1000/900/800 hPa, mixing ratios of
        // 10/8/6 g/kg, geopotential heights 0/800/1600/2400 m. The
        // trapezoid spans two 800 m layers:
        //   rho_0 = 0.0067997, rho_1 = 0.0062158, rho_2 = 0.0055797
        //   IWV = 800 * ((rho_0+rho_1)/2 + (rho_1+rho_2)/2) = 9.9244
        let snapshot = three_level_column();
        let station = station_at(42.65, 23.38, 1164.0);

        let record = derive_station_record(&snapshot, &station, CELL).unwrap();

        assert!(
            (record.iwv_kg_m2 - 9.9244).abs() < 0.01,
            "IWV should match the hand-computed trapezoid, got {}",
            record.iwv_kg_m2
        );
    }

    #[test]
    fn test_iwv_non_negative_for_valid_input() {
        let snapshot = three_level_column();
        let station = station_at(42.65, 23.38, 1164.0);
        let record = derive_station_record(&snapshot, &station, CELL).unwrap();
        assert!(record.iwv_kg_m2 >= 0.0);
    }

    #[test]
    fn test_zhd_strictly_positive_over_normal_ranges() {
        for pressure_hpa in [500.0, 700.0, 850.0, 1013.25] {
            for altitude in [0.0, 500.0, 1164.0, 2925.0, 5000.0] {
                let zhd = zenith_hydrostatic_delay(pressure_hpa, altitude, altitude);
                assert!(
                    zhd > 0.0,
                    "ZHD must be positive at {} hPa / {} m, got {}",
                    pressure_hpa,
                    altitude,
                    zhd
                );
            }
        }
    }

    #[test]
    fn test_vertical_profile_shape() {
        let snapshot = three_level_column();
        let station = station_at(42.65, 23.38, 1164.0);
        let record = derive_station_record(&snapshot, &station, CELL).unwrap();

        assert_eq!(record.levels.len(), 3);
        assert_eq!(record.levels[0].level, 0);
        // Zero perturbation temperature: theta = 300 K at 1000 hPa
        // recovers 300 K = 26.85 C
        assert!((record.levels[0].temperature_c - 26.85).abs() < 1e-6);
        assert!((record.levels[0].pressure_hpa - 1000.0).abs() < 1e-9);
        assert!((record.levels[0].mixing_ratio_g_kg - 10.0).abs() < 1e-9);
        assert!((record.levels[1].height_m - 800.0).abs() < 1e-9);
        // Pressure decreases with height
        assert!(record.levels[2].pressure_hpa < record.levels[0].pressure_hpa);
    }

    #[test]
    fn test_delay_decomposition_consistency() {
        let snapshot = three_level_column();
        let station = station_at(42.65, 23.38, 1164.0);
        let record = derive_station_record(&snapshot, &station, CELL).unwrap();

        let tm = 70.2 + 0.72 * 287.0;
        assert!((record.mean_temperature_k - tm).abs() < 1e-9);

        let k1 = 1.0e6 / (RV * (3.766e5 / tm + 22.0));
        let zwd_mm = record.iwv_kg_m2 / (k1 * 100.0) * 1000.0;
        assert!((record.zwd_mm - zwd_mm).abs() < 1e-9);
        assert!((record.ztd_mm - (record.zhd_m * 1000.0 + record.zwd_mm)).abs() < 1e-9);
        assert!(record.ztd_mm > record.zwd_mm);
    }

    #[test]
    fn test_out_of_range_cell_is_an_error() {
        let snapshot = three_level_column();
        let station = station_at(42.65, 23.38, 1164.0);
        let result = derive_station_record(&snapshot, &station, GridCell { i: 5, j: 5 });
        assert!(result.is_err(), "cell outside the 1x1 grid must fail");
    }
}
