//! Database sink: upserts derived records into the NWP tables.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use derivation::RecordSink;
use nwp_common::{DerivedRecord, NwpError, NwpResult, Station};

/// Writes derived records inside one transaction per time step.
///
/// The transaction starts lazily with the first record and commits in
/// `finish_time_step`, so a time step either lands completely or not
/// at all. Re-running the exporter over the same files updates the
/// existing rows in place.
pub struct DbSink {
    pool: PgPool,
    source_id: i32,
    tx: Option<Transaction<'static, Postgres>>,
}

impl DbSink {
    pub fn new(pool: PgPool, source_id: i32) -> Self {
        Self {
            pool,
            source_id,
            tx: None,
        }
    }
}

#[async_trait]
impl RecordSink for DbSink {
    async fn write_record(&mut self, station: &Station, record: &DerivedRecord) -> NwpResult<()> {
        let tx = match self.tx {
            Some(ref mut tx) => tx,
            None => {
                let tx = self
                    .pool
                    .begin()
                    .await
                    .map_err(|e| NwpError::DatabaseError(format!("Begin failed: {}", e)))?;
                self.tx.insert(tx)
            }
        };

        upsert_surface(tx, station, record).await?;
        for level in &record.levels {
            upsert_level(tx, station, record, level).await?;
        }
        upsert_derived(tx, self.source_id, station, record).await?;

        debug!(
            station = %station.name,
            valid_time = %record.valid_time,
            levels = record.levels.len(),
            "Upserted station record"
        );
        Ok(())
    }

    async fn finish_time_step(&mut self) -> NwpResult<()> {
        if let Some(tx) = self.tx.take() {
            tx.commit()
                .await
                .map_err(|e| NwpError::DatabaseError(format!("Commit failed: {}", e)))?;
        }
        Ok(())
    }
}

const UPSERT_SURFACE_SQL: &str = r#"
    INSERT INTO nwp_in_1d (
        datetime, sensor_id,
        temperature, pressure, altitude,
        latitude, longitude,
        zhd, pbl, precipitation
    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
    ON CONFLICT (datetime, sensor_id)
    DO UPDATE SET
        temperature = EXCLUDED.temperature,
        pressure = EXCLUDED.pressure,
        altitude = EXCLUDED.altitude,
        latitude = EXCLUDED.latitude,
        longitude = EXCLUDED.longitude,
        zhd = EXCLUDED.zhd,
        pbl = EXCLUDED.pbl,
        precipitation = EXCLUDED.precipitation
"#;

const UPSERT_LEVEL_SQL: &str = r#"
    INSERT INTO nwp_in_3d (
        datetime, sensor_id, level,
        temperature, pressure,
        latitude, longitude,
        height, wv_mixing_ratio
    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
    ON CONFLICT (datetime, sensor_id, level)
    DO UPDATE SET
        temperature = EXCLUDED.temperature,
        pressure = EXCLUDED.pressure,
        latitude = EXCLUDED.latitude,
        longitude = EXCLUDED.longitude,
        height = EXCLUDED.height,
        wv_mixing_ratio = EXCLUDED.wv_mixing_ratio
"#;

const UPSERT_DERIVED_SQL: &str = r#"
    INSERT INTO nwp_out (datetime, station_id, source_mod_id, iwv)
    VALUES ($1, $2, $3, $4)
    ON CONFLICT (datetime, station_id, source_mod_id)
    DO UPDATE SET iwv = EXCLUDED.iwv
"#;

async fn upsert_surface(
    tx: &mut Transaction<'static, Postgres>,
    station: &Station,
    record: &DerivedRecord,
) -> NwpResult<()> {
    sqlx::query(UPSERT_SURFACE_SQL)
        .bind(record.valid_time)
        .bind(station.sensor_id)
        .bind(record.temperature_c)
        .bind(record.pressure_hpa)
        .bind(record.height_m)
        .bind(station.latitude)
        .bind(station.longitude)
        .bind(record.zhd_m)
        .bind(record.pbl_height_m)
        .bind(record.precipitation_mm)
        .execute(&mut **tx)
        .await
        .map_err(|e| NwpError::DatabaseError(format!("1-D upsert failed: {}", e)))?;

    Ok(())
}

async fn upsert_level(
    tx: &mut Transaction<'static, Postgres>,
    station: &Station,
    record: &DerivedRecord,
    level: &nwp_common::LevelRecord,
) -> NwpResult<()> {
    sqlx::query(UPSERT_LEVEL_SQL)
        .bind(record.valid_time)
        .bind(station.sensor_id)
        .bind(level.level as i32)
        .bind(level.temperature_c)
        .bind(level.pressure_hpa)
        .bind(station.latitude)
        .bind(station.longitude)
        .bind(level.height_m)
        .bind(level.mixing_ratio_g_kg)
        .execute(&mut **tx)
        .await
        .map_err(|e| NwpError::DatabaseError(format!("3-D upsert failed: {}", e)))?;

    Ok(())
}

async fn upsert_derived(
    tx: &mut Transaction<'static, Postgres>,
    source_id: i32,
    station: &Station,
    record: &DerivedRecord,
) -> NwpResult<()> {
    sqlx::query(UPSERT_DERIVED_SQL)
        .bind(record.valid_time)
        .bind(station.id)
        .bind(source_id)
        .bind(record.iwv_kg_m2)
        .execute(&mut **tx)
        .await
        .map_err(|e| NwpError::DatabaseError(format!("Output upsert failed: {}", e)))?;

    Ok(())
}
