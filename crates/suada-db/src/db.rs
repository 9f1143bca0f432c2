//! Connection pool and reference-table lookups.

use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use tracing::info;

use nwp_common::{NwpError, NwpResult, Station};

use crate::schema::SCHEMA_SQL;

/// SUADA database handle.
pub struct SuadaDb {
    pool: PgPool,
}

impl SuadaDb {
    /// Connect to the database behind the given URL.
    pub async fn connect(database_url: &str) -> NwpResult<Self> {
        // Sequential pipeline, one connection is enough
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .map_err(|e| NwpError::DatabaseError(format!("Connection failed: {}", e)))?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the SUADA tables if they do not exist.
    pub async fn migrate(&self) -> NwpResult<()> {
        // Simple queries run one statement at a time
        for statement in SCHEMA_SQL.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| NwpError::DatabaseError(format!("Migration failed: {}", e)))?;
            }
        }

        Ok(())
    }

    /// Resolve a model source name to its SOURCE row id.
    pub async fn source_id(&self, source_name: &str) -> NwpResult<i32> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT id FROM source WHERE name = $1")
            .bind(source_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| NwpError::DatabaseError(format!("Source lookup failed: {}", e)))?;

        row.map(|(id,)| id)
            .ok_or_else(|| NwpError::UnknownSource(source_name.to_string()))
    }

    /// Load the stations registered for a source and instrument,
    /// joined with their coordinates and sensor ids.
    pub async fn stations(
        &self,
        source_name: &str,
        instrument_name: &str,
    ) -> NwpResult<Vec<Station>> {
        let rows = sqlx::query_as::<_, StationRow>(
            "SELECT st.id AS station_id, st.name AS name, st.country AS country, \
             crd.longitude AS longitude, crd.latitude AS latitude, crd.altitude AS altitude, \
             sen.id AS sensor_id \
             FROM sensor sen \
             LEFT JOIN source so ON so.id = sen.source_id \
             LEFT JOIN station st ON st.id = sen.station_id \
             LEFT JOIN coordinate crd ON crd.station_id = st.id \
             LEFT JOIN instrument instr ON instr.id = crd.instrument_id \
             WHERE so.name = $1 AND instr.name = $2 \
             ORDER BY st.name",
        )
        .bind(source_name)
        .bind(instrument_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| NwpError::DatabaseError(format!("Station query failed: {}", e)))?;

        info!(
            source = source_name,
            instrument = instrument_name,
            count = rows.len(),
            "Loaded stations"
        );
        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

#[derive(Debug, FromRow)]
struct StationRow {
    station_id: i32,
    name: String,
    country: Option<String>,
    longitude: f64,
    latitude: f64,
    altitude: f64,
    sensor_id: i32,
}

impl From<StationRow> for Station {
    fn from(row: StationRow) -> Self {
        Station {
            id: row.station_id,
            name: row.name,
            sensor_id: row.sensor_id,
            country: row.country,
            longitude: row.longitude,
            latitude: row.latitude,
            altitude: row.altitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_row_conversion() {
        let row = StationRow {
            station_id: 7,
            name: "SOFI".to_string(),
            country: Some("Bulgaria".to_string()),
            longitude: 23.3947,
            latitude: 42.5561,
            altitude: 1119.5,
            sensor_id: 42,
        };

        let station: Station = row.into();
        assert_eq!(station.id, 7);
        assert_eq!(station.sensor_id, 42);
        assert_eq!(station.country.as_deref(), Some("Bulgaria"));
        assert!((station.altitude - 1119.5).abs() < f64::EPSILON);
    }
}
