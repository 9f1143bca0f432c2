//! Loading one WRF output file into memory.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

use nwp_common::{GridDims, NwpError, NwpResult, ProjectionParams};

use crate::fields::{LevelField, SurfaceField};

/// One time step's model state: the variables the station derivation
/// reads, plus projection metadata and the snapshot timestamp.
#[derive(Debug, Clone)]
pub struct WrfSnapshot {
    pub valid_time: DateTime<Utc>,
    pub projection: ProjectionParams,
    pub dims: GridDims,
    /// Number of mass levels (`bottom_top`)
    pub bottom_top: usize,

    // Surface fields
    /// 2-m temperature (K)
    pub t2: SurfaceField,
    /// Surface pressure (Pa)
    pub psfc: SurfaceField,
    /// Planetary boundary layer height (m)
    pub pblh: SurfaceField,
    /// Terrain height (m)
    pub hgt: SurfaceField,
    /// Accumulated grid-scale rain (mm)
    pub rainnc: SurfaceField,
    /// Accumulated grid-scale snow (mm)
    pub snownc: SurfaceField,
    /// Accumulated grid-scale graupel (mm)
    pub graupelnc: SurfaceField,
    /// Accumulated grid-scale hail (mm)
    pub hailnc: SurfaceField,
    /// 2-m water vapour mixing ratio (kg/kg)
    pub q2: SurfaceField,

    // Leveled fields
    /// Perturbation potential temperature (K)
    pub t: LevelField,
    /// Perturbation pressure (Pa)
    pub p: LevelField,
    /// Base-state pressure (Pa)
    pub pb: LevelField,
    /// Perturbation geopotential (m^2/s^2)
    pub ph: LevelField,
    /// Base-state geopotential (m^2/s^2)
    pub phb: LevelField,
    /// Water vapour mixing ratio (kg/kg)
    pub qvapor: LevelField,
}

impl WrfSnapshot {
    /// Open a WRF output file and load the derivation variable set.
    pub fn open<P: AsRef<Path>>(path: P) -> NwpResult<Self> {
        let path = path.as_ref();
        let file = netcdf::open(path).map_err(|e| {
            NwpError::InvalidSnapshot(format!("failed to open {}: {}", path.display(), e))
        })?;

        let dims = GridDims {
            west_east: dimension_len(&file, "west_east")?,
            south_north: dimension_len(&file, "south_north")?,
        };

        let valid_time = read_timestamp(&file)?;

        let projection = ProjectionParams {
            truelat1: global_f64(&file, "TRUELAT1")?,
            truelat2: global_f64(&file, "TRUELAT2")?,
            stand_lon: global_f64(&file, "STAND_LON")?,
            ref_lat: global_f64(&file, "CEN_LAT")?,
            ref_lon: global_f64(&file, "CEN_LON")?,
            dx: global_f64(&file, "DX")?,
            dy: global_f64(&file, "DY")?,
        };

        let t = read_levels(&file, "T", dims)?;
        let bottom_top = t.levels();

        let snapshot = Self {
            valid_time,
            projection,
            dims,
            bottom_top,
            t2: read_surface(&file, "T2", dims)?,
            psfc: read_surface(&file, "PSFC", dims)?,
            pblh: read_surface(&file, "PBLH", dims)?,
            hgt: read_surface(&file, "HGT", dims)?,
            rainnc: read_surface(&file, "RAINNC", dims)?,
            snownc: read_surface(&file, "SNOWNC", dims)?,
            graupelnc: read_surface(&file, "GRAUPELNC", dims)?,
            hailnc: read_surface(&file, "HAILNC", dims)?,
            q2: read_surface(&file, "Q2", dims)?,
            t,
            p: read_levels(&file, "P", dims)?,
            pb: read_levels(&file, "PB", dims)?,
            ph: read_levels(&file, "PH", dims)?,
            phb: read_levels(&file, "PHB", dims)?,
            qvapor: read_levels(&file, "QVAPOR", dims)?,
        };

        debug!(
            path = %path.display(),
            valid_time = %snapshot.valid_time,
            west_east = dims.west_east,
            south_north = dims.south_north,
            bottom_top = snapshot.bottom_top,
            "Loaded WRF snapshot"
        );

        Ok(snapshot)
    }
}

/// Parse a WRF `Times` entry (`YYYY-MM-DD_HH:MM:SS`) as UTC.
pub fn parse_wrf_timestamp(raw: &str) -> NwpResult<DateTime<Utc>> {
    let trimmed = raw.trim_end_matches('\0').trim();
    let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d_%H:%M:%S")
        .map_err(|e| NwpError::InvalidTimestamp(format!("'{}': {}", trimmed, e)))?;
    Ok(Utc.from_utc_datetime(&naive))
}

fn read_timestamp(file: &netcdf::File) -> NwpResult<DateTime<Utc>> {
    let var = file
        .variable("Times")
        .ok_or_else(|| NwpError::MissingVariable("Times".to_string()))?;

    let date_str_len = var
        .dimensions()
        .last()
        .map(|d| d.len())
        .ok_or_else(|| NwpError::InvalidSnapshot("Times has no dimensions".to_string()))?;

    let raw: Vec<u8> = var
        .get_values(..)
        .map_err(|e| NwpError::InvalidSnapshot(format!("failed to read Times: {}", e)))?;
    if raw.len() < date_str_len {
        return Err(NwpError::InvalidSnapshot(
            "Times shorter than its declared length".to_string(),
        ));
    }

    let text = String::from_utf8_lossy(&raw[..date_str_len]).into_owned();
    parse_wrf_timestamp(&text)
}

fn dimension_len(file: &netcdf::File, name: &str) -> NwpResult<usize> {
    file.dimension(name)
        .map(|d| d.len())
        .ok_or_else(|| NwpError::InvalidSnapshot(format!("missing dimension {}", name)))
}

fn global_f64(file: &netcdf::File, name: &str) -> NwpResult<f64> {
    let attr = file
        .attribute(name)
        .ok_or_else(|| NwpError::MissingAttribute(name.to_string()))?;
    let value = attr
        .value()
        .map_err(|e| NwpError::InvalidSnapshot(format!("attribute {}: {}", name, e)))?;
    f64::try_from(value)
        .map_err(|e| NwpError::InvalidSnapshot(format!("attribute {} not numeric: {}", name, e)))
}

/// Read the first time slab of a 2-D surface variable.
fn read_surface(file: &netcdf::File, name: &str, dims: GridDims) -> NwpResult<SurfaceField> {
    let var = file
        .variable(name)
        .ok_or_else(|| NwpError::MissingVariable(name.to_string()))?;

    let values: Vec<f64> = var
        .get_values(..)
        .map_err(|e| NwpError::InvalidSnapshot(format!("failed to read {}: {}", name, e)))?;

    let plane = dims.south_north * dims.west_east;
    if values.len() < plane {
        return Err(NwpError::InvalidSnapshot(format!(
            "{}: {} values, need at least {}",
            name,
            values.len(),
            plane
        )));
    }

    SurfaceField::new(name, values[..plane].to_vec(), dims.south_north, dims.west_east)
}

/// Read the first time slab of a 3-D leveled variable. The level count
/// comes from the variable's own vertical dimension, so staggered
/// fields (PH, PHB) keep their extra level.
fn read_levels(file: &netcdf::File, name: &str, dims: GridDims) -> NwpResult<LevelField> {
    let var = file
        .variable(name)
        .ok_or_else(|| NwpError::MissingVariable(name.to_string()))?;

    let var_dims = var.dimensions();
    if var_dims.len() < 3 {
        return Err(NwpError::InvalidSnapshot(format!(
            "{}: expected a leveled variable, found {} dimensions",
            name,
            var_dims.len()
        )));
    }
    let levels = var_dims[var_dims.len() - 3].len();

    let values: Vec<f64> = var
        .get_values(..)
        .map_err(|e| NwpError::InvalidSnapshot(format!("failed to read {}: {}", name, e)))?;

    let slab = levels * dims.south_north * dims.west_east;
    if values.len() < slab {
        return Err(NwpError::InvalidSnapshot(format!(
            "{}: {} values, need at least {}",
            name,
            values.len(),
            slab
        )));
    }

    LevelField::new(
        name,
        values[..slab].to_vec(),
        levels,
        dims.south_north,
        dims.west_east,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wrf_timestamp() {
        let dt = parse_wrf_timestamp("2019-01-15_12:00:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2019, 1, 15, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_wrf_timestamp_trailing_nul() {
        // Times is a fixed-width char array; entries may be NUL padded
        let dt = parse_wrf_timestamp("2020-06-01_00:30:00\0\0").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2020, 6, 1, 0, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_wrf_timestamp_rejects_garbage() {
        assert!(parse_wrf_timestamp("not-a-timestamp").is_err());
        assert!(parse_wrf_timestamp("2019-13-40_99:00:00").is_err());
    }
}
