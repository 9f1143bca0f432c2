//! Synthetic model snapshots and stations.

use chrono::{DateTime, TimeZone, Utc};

use nwp_common::{GridDims, ProjectionParams, Station};
use wrf_reader::{LevelField, SurfaceField, WrfSnapshot};

const FIXTURE_PARAMS: ProjectionParams = ProjectionParams {
    truelat1: 42.0,
    truelat2: 42.0,
    stand_lon: 25.0,
    ref_lat: 42.7,
    ref_lon: 25.3,
    dx: 9000.0,
    dy: 9000.0,
};

/// Timestamp shared by all fixture snapshots.
pub fn fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2019, 1, 15, 12, 0, 0).unwrap()
}

/// A GNSS station at the given location.
pub fn station_at(latitude: f64, longitude: f64, altitude: f64) -> Station {
    Station {
        id: 1,
        name: "SOFI".to_string(),
        sensor_id: 10,
        country: Some("Bulgaria".to_string()),
        longitude,
        latitude,
        altitude,
    }
}

/// A single-column snapshot with three mass levels and round numbers.
///
/// The column sits at 1000/900/800 hPa with mixing ratios of 10/8/6
/// g/kg and staggered geopotential heights of 0/800/1600/2400 m, so
/// the vapour integral works out to 9.9244 kg/m^2 by hand. Surface
/// state: 287 K, 1000 hPa, terrain at 500 m, boundary layer at 850 m,
/// 9 g/kg near-surface vapour and 4.2 mm of accumulated precipitation
/// split over all four species.
pub fn three_level_column() -> WrfSnapshot {
    column_snapshot(GridDims {
        west_east: 1,
        south_north: 1,
    })
}

/// The `three_level_column` state replicated over a larger grid.
pub fn uniform_snapshot(dims: GridDims) -> WrfSnapshot {
    column_snapshot(dims)
}

fn column_snapshot(dims: GridDims) -> WrfSnapshot {
    let plane = dims.south_north * dims.west_east;
    let surface = |name: &str, value: f64| {
        SurfaceField::new(name, vec![value; plane], dims.south_north, dims.west_east)
            .expect("fixture surface field")
    };
    let leveled = |name: &str, per_level: &[f64]| {
        let mut data = Vec::with_capacity(per_level.len() * plane);
        for value in per_level {
            data.extend(std::iter::repeat(*value).take(plane));
        }
        LevelField::new(name, data, per_level.len(), dims.south_north, dims.west_east)
            .expect("fixture level field")
    };

    WrfSnapshot {
        valid_time: fixture_time(),
        projection: FIXTURE_PARAMS,
        dims,
        bottom_top: 3,
        t2: surface("T2", 287.0),
        psfc: surface("PSFC", 100_000.0),
        pblh: surface("PBLH", 850.0),
        hgt: surface("HGT", 500.0),
        rainnc: surface("RAINNC", 3.0),
        snownc: surface("SNOWNC", 0.7),
        graupelnc: surface("GRAUPELNC", 0.3),
        hailnc: surface("HAILNC", 0.2),
        q2: surface("Q2", 0.009),
        t: leveled("T", &[0.0, 0.0, 0.0]),
        p: leveled("P", &[0.0, 0.0, 0.0]),
        pb: leveled("PB", &[100_000.0, 90_000.0, 80_000.0]),
        // Staggered: one more level than the mass fields
        ph: leveled("PH", &[0.0, 0.0, 0.0, 0.0]),
        phb: leveled("PHB", &[0.0, 7848.0, 15696.0, 23544.0]),
        qvapor: leveled("QVAPOR", &[0.010, 0.008, 0.006]),
    }
}
