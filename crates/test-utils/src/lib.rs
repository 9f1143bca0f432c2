//! Shared test utilities for the wrf-suada workspace.
//!
//! Synthetic snapshots with round numbers so derived values can be
//! checked by hand, plus deterministic stand-ins for the projection
//! boundary.

pub mod projectors;
pub mod snapshots;

pub use projectors::{FixedOffsetProjector, LinearStubProjector};
pub use snapshots::{fixture_time, station_at, three_level_column, uniform_snapshot};
