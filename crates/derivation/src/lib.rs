//! Station parameter derivation from WRF snapshots.
//!
//! The core of the exporter: nearest-grid-cell sampling, per-station
//! physical derivations (surface values, vertical profile, integrated
//! water vapour, zenith delay decomposition) and the time-step
//! pipeline that feeds derived records into a sink.

pub mod physics;
pub mod pipeline;
pub mod sampler;
pub mod sink;

pub use physics::{derive_station_record, IWV_TOP_LEVEL};
pub use pipeline::{RunSummary, TimeStepPipeline};
pub use sampler::{GridPlacement, GridSampler};
pub use sink::RecordSink;
