//! Projection boundary types.
//!
//! The lat/lon to grid-offset calculation is treated as an opaque
//! collaborator behind the [`GridProjector`] trait. The production
//! implementation lives in the `projection` crate; tests substitute a
//! deterministic stub.

use serde::{Deserialize, Serialize};

/// Map projection attributes carried by a WRF output file.
///
/// These are the global attributes `TRUELAT1`, `TRUELAT2`, `STAND_LON`,
/// `CEN_LAT`, `CEN_LON`, `DX` and `DY`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    /// First true latitude (degrees)
    pub truelat1: f64,
    /// Second true latitude (degrees)
    pub truelat2: f64,
    /// Standard longitude (degrees)
    pub stand_lon: f64,
    /// Reference (domain center) latitude (degrees)
    pub ref_lat: f64,
    /// Reference (domain center) longitude (degrees)
    pub ref_lon: f64,
    /// Grid spacing in X (meters)
    pub dx: f64,
    /// Grid spacing in Y (meters)
    pub dy: f64,
}

/// Horizontal grid extents of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDims {
    /// Number of grid points in the west-east (j) direction
    pub west_east: usize,
    /// Number of grid points in the south-north (i) direction
    pub south_north: usize,
}

/// A resolved discrete grid cell.
///
/// `i` indexes the south-north axis, `j` the west-east axis, matching
/// the `[i][j]` layout of WRF surface fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub i: usize,
    pub j: usize,
}

/// Opaque lat/lon to fractional grid-offset routine.
///
/// Returns `(x_offset, y_offset)` relative to the domain center, in
/// grid-cell units. The caller converts offsets to absolute indices.
pub trait GridProjector {
    fn latlon_to_offsets(&self, params: &ProjectionParams, lat: f64, lon: f64) -> (f64, f64);
}
