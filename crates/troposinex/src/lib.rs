//! TROPOSINEX text export.
//!
//! SINEX_TRO, the Solution INdependent EXchange format for
//! tropospheric and meteorological parameters. The sink accumulates
//! one row per station for the current time step and writes one `.TRO`
//! file per time step. The layout is fixed down to tabs and trailing
//! spaces; downstream parsers read it positionally.

pub mod format;
pub mod sink;

pub use sink::TroposinexSink;
