use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

const ENV_PREFIX: &str = "SEATS";

/// Where points are stored and which catalog term is scraped.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db: String,
    pub user: Option<String>,
    pub pass: Option<String>,
    /// Catalog term code, `YYYYMM`.
    pub term: String,
    /// Base of the seat-count endpoint; the term and `/sections` are appended.
    pub seats_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 8086,
            db: "bookkeeper".to_owned(),
            user: None,
            pass: None,
            term: "202008".to_owned(),
            seats_url: "https://app.testudo.umd.edu/soc".to_owned(),
        }
    }
}

impl Config {
    /// Defaults, overridden by `file` if given, overridden by `SEATS_*` variables.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = ::config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("db", defaults.db)?
            .set_default("term", defaults.term)?
            .set_default("seats_url", defaults.seats_url)?;

        if let Some(file) = file {
            builder = builder.add_source(::config::File::from(file));
        }

        let config = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }
}
