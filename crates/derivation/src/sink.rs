//! Destination for derived station records.

use async_trait::async_trait;

use nwp_common::{DerivedRecord, NwpResult, Station};

/// Receives derived records one station at a time.
///
/// `finish_time_step` is called once per input file after all of its
/// stations have been written, whether or not any record was accepted.
/// Sinks use it to commit a transaction or flush an output file.
#[async_trait]
pub trait RecordSink {
    async fn write_record(&mut self, station: &Station, record: &DerivedRecord) -> NwpResult<()>;

    async fn finish_time_step(&mut self) -> NwpResult<()>;
}
