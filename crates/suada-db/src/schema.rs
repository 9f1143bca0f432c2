//! SUADA table definitions.
//!
//! The natural keys mirror the upsert targets: one 1-D row per
//! (datetime, sensor), one 3-D row per (datetime, sensor, level) and
//! one derived-output row per (datetime, station, source).

pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS source (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS station (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    country TEXT
);

CREATE TABLE IF NOT EXISTS instrument (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS coordinate (
    id SERIAL PRIMARY KEY,
    station_id INTEGER NOT NULL REFERENCES station(id),
    instrument_id INTEGER NOT NULL REFERENCES instrument(id),
    longitude DOUBLE PRECISION NOT NULL,
    latitude DOUBLE PRECISION NOT NULL,
    altitude DOUBLE PRECISION NOT NULL
);

CREATE TABLE IF NOT EXISTS sensor (
    id SERIAL PRIMARY KEY,
    station_id INTEGER NOT NULL REFERENCES station(id),
    source_id INTEGER NOT NULL REFERENCES source(id)
);

CREATE TABLE IF NOT EXISTS nwp_in_1d (
    id BIGSERIAL PRIMARY KEY,
    datetime TIMESTAMPTZ NOT NULL,
    sensor_id INTEGER NOT NULL REFERENCES sensor(id),
    temperature DOUBLE PRECISION,
    pressure DOUBLE PRECISION,
    altitude DOUBLE PRECISION,
    latitude DOUBLE PRECISION,
    longitude DOUBLE PRECISION,
    zhd DOUBLE PRECISION,
    pbl DOUBLE PRECISION,
    precipitation DOUBLE PRECISION,
    UNIQUE (datetime, sensor_id)
);

CREATE TABLE IF NOT EXISTS nwp_in_3d (
    id BIGSERIAL PRIMARY KEY,
    datetime TIMESTAMPTZ NOT NULL,
    sensor_id INTEGER NOT NULL REFERENCES sensor(id),
    level INTEGER NOT NULL,
    temperature DOUBLE PRECISION,
    pressure DOUBLE PRECISION,
    latitude DOUBLE PRECISION,
    longitude DOUBLE PRECISION,
    height DOUBLE PRECISION,
    wv_mixing_ratio DOUBLE PRECISION,
    UNIQUE (datetime, sensor_id, level)
);

CREATE TABLE IF NOT EXISTS nwp_out (
    id BIGSERIAL PRIMARY KEY,
    datetime TIMESTAMPTZ NOT NULL,
    station_id INTEGER NOT NULL REFERENCES station(id),
    source_mod_id INTEGER NOT NULL REFERENCES source(id),
    iwv DOUBLE PRECISION,
    UNIQUE (datetime, station_id, source_mod_id)
);
"#;
