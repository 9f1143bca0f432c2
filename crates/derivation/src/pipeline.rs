//! Per-time-step processing loop.
//!
//! One input file is one model time step. The pipeline loads the
//! snapshot, places every station on the grid, derives records for the
//! stations inside the domain and hands them to the sink, then closes
//! the time step so the sink can commit or flush.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use nwp_common::{CountryFilter, GridProjector, NwpResult, Station};
use wrf_reader::WrfSnapshot;

use crate::physics::derive_station_record;
use crate::sampler::{GridPlacement, GridSampler};
use crate::sink::RecordSink;

/// Counters for one exporter run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_failed: usize,
    pub records_written: usize,
    pub stations_outside: usize,
    pub stations_filtered: usize,
    pub stations_failed: usize,
}

pub struct TimeStepPipeline<'a, P: GridProjector + ?Sized, S: RecordSink> {
    sampler: GridSampler<'a, P>,
    sink: S,
    country: CountryFilter,
}

impl<'a, P: GridProjector + ?Sized, S: RecordSink> TimeStepPipeline<'a, P, S> {
    pub fn new(projector: &'a P, sink: S, country: CountryFilter) -> Self {
        Self {
            sampler: GridSampler::new(projector),
            sink,
            country,
        }
    }

    /// Process the given input files in order.
    ///
    /// A file that fails to load is logged and skipped; the run
    /// continues with the remaining files. Per-station failures are
    /// logged and counted without aborting the time step. Only fatal
    /// sink errors end the run early.
    pub async fn run(&mut self, files: &[PathBuf], stations: &[Station]) -> NwpResult<RunSummary> {
        let mut summary = RunSummary::default();

        for path in files {
            let snapshot = match WrfSnapshot::open(path) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable input file");
                    summary.files_failed += 1;
                    continue;
                }
            };

            info!(
                path = %path.display(),
                valid_time = %snapshot.valid_time,
                stations = stations.len(),
                "Processing time step"
            );

            self.process_snapshot(&snapshot, stations, &mut summary)
                .await?;
            self.close_time_step(&mut summary).await?;
        }

        info!(
            files_processed = summary.files_processed,
            files_failed = summary.files_failed,
            records_written = summary.records_written,
            stations_outside = summary.stations_outside,
            "Run complete"
        );
        Ok(summary)
    }

    /// Close the current time step. A commit or flush failure loses
    /// that file's output but not the rest of the run.
    async fn close_time_step(&mut self, summary: &mut RunSummary) -> NwpResult<()> {
        match self.sink.finish_time_step().await {
            Ok(()) => summary.files_processed += 1,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!(error = %e, "Failed to close time step");
                summary.files_failed += 1;
            }
        }
        Ok(())
    }

    /// Derive and write records for one loaded snapshot.
    pub async fn process_snapshot(
        &mut self,
        snapshot: &WrfSnapshot,
        stations: &[Station],
        summary: &mut RunSummary,
    ) -> NwpResult<()> {
        for station in stations {
            let cell = match self.sampler.resolve(
                &snapshot.projection,
                snapshot.dims,
                station.latitude,
                station.longitude,
            ) {
                GridPlacement::Inside(cell) => cell,
                GridPlacement::Outside { i, j } => {
                    debug!(
                        station = %station.name,
                        i,
                        j,
                        "Station outside the model domain"
                    );
                    summary.stations_outside += 1;
                    continue;
                }
            };

            if !self.country.matches(station) {
                summary.stations_filtered += 1;
                continue;
            }

            let record = match derive_station_record(snapshot, station, cell) {
                Ok(record) => record,
                Err(e) => {
                    warn!(station = %station.name, error = %e, "Derivation failed");
                    summary.stations_failed += 1;
                    continue;
                }
            };

            match self.sink.write_record(station, &record).await {
                Ok(()) => summary.records_written += 1,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(station = %station.name, error = %e, "Sink rejected record");
                    summary.stations_failed += 1;
                }
            }
        }
        Ok(())
    }
}
