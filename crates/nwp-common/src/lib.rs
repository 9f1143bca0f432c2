//! Common types shared across the WRF-to-SUADA exporter crates.

pub mod error;
pub mod projection;
pub mod record;
pub mod station;
pub mod time;

pub use error::{NwpError, NwpResult};
pub use projection::{GridCell, GridDims, GridProjector, ProjectionParams};
pub use record::{DerivedRecord, LevelRecord, T_KELVIN};
pub use station::{CountryFilter, Station};
pub use time::TroEpoch;
