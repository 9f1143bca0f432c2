//! File sink: one TROPOSINEX document per time step.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use derivation::RecordSink;
use nwp_common::{DerivedRecord, NwpResult, Station, TroEpoch};

use crate::format::{filename, render, TroRow};

/// Accumulates station rows and writes a `.TRO` file when the time
/// step closes. A time step with no accepted stations produces no
/// file.
pub struct TroposinexSink {
    out_dir: PathBuf,
    rows: Vec<TroRow>,
}

impl TroposinexSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            rows: Vec::new(),
        }
    }
}

#[async_trait]
impl RecordSink for TroposinexSink {
    async fn write_record(&mut self, station: &Station, record: &DerivedRecord) -> NwpResult<()> {
        self.rows.push(TroRow {
            name: station.name.clone(),
            longitude: station.longitude,
            latitude: station.latitude,
            altitude: station.altitude,
            iwv_kg_m2: record.iwv_kg_m2,
            pressure_hpa: record.pressure_hpa,
            specific_humidity_g_kg: record.specific_humidity_g_kg,
            temperature_k: record.temperature_k(),
            mean_temperature_k: record.mean_temperature_k,
            zhd_mm: record.zhd_mm(),
            ztd_mm: record.ztd_mm,
            zwd_mm: record.zwd_mm,
            epoch: TroEpoch::from_datetime(record.valid_time),
        });
        Ok(())
    }

    async fn finish_time_step(&mut self) -> NwpResult<()> {
        let rows = std::mem::take(&mut self.rows);
        let Some(last) = rows.last() else {
            return Ok(());
        };

        let path = self.out_dir.join(filename(last.epoch));
        tokio::fs::write(&path, render(&rows)).await?;

        info!(path = %path.display(), stations = rows.len(), "Wrote TROPOSINEX file");
        Ok(())
    }
}
