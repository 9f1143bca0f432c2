//! WRF netCDF snapshot reading.
//!
//! One WRF output file holds one time step of gridded model state.
//! [`WrfSnapshot`] loads the surface and leveled variables the station
//! derivation needs, together with the projection attributes, grid
//! dimensions and the snapshot timestamp.

pub mod fields;
pub mod snapshot;

pub use fields::{LevelField, SurfaceField};
pub use snapshot::{parse_wrf_timestamp, WrfSnapshot};
