//! SUADA PostgreSQL access.
//!
//! Reference-table lookups (sources, stations) and the database sink
//! that upserts derived records into the NWP tables, one transaction
//! per time step.

pub mod db;
pub mod schema;
pub mod sink;

pub use db::SuadaDb;
pub use sink::DbSink;
