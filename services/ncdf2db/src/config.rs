//! Exporter configuration.
//!
//! Database credentials come from the environment (or a `.env` file),
//! one URL per target environment, so the prod connection string never
//! appears on the command line.

use std::env;

use anyhow::{anyhow, Result};

/// Target SUADA environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(anyhow!(
                "no such environment '{}' (possible options are 'dev' and 'prod')",
                other
            )),
        }
    }

    fn url_var(self) -> &'static str {
        match self {
            Environment::Dev => "DATABASE_URL_DEV",
            Environment::Prod => "DATABASE_URL_PROD",
        }
    }
}

/// Where derived records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Db,
    Tro,
}

impl OutputMode {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "db" => Ok(OutputMode::Db),
            "tro" => Ok(OutputMode::Tro),
            other => Err(anyhow!("not a possible output '{}' ('db' or 'tro')", other)),
        }
    }
}

/// Database URL for the selected environment.
pub fn database_url(environment: Environment) -> Result<String> {
    let var = environment.url_var();
    env::var(var).map_err(|_| anyhow!("{} is not set", var))
}
