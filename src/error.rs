use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{what} not found for {key}")]
    Parse { key: String, what: &'static str },
    #[error("seat count {value:?} of {key} is not an integer")]
    Format {
        key: String,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("batch write rejected by the store")]
    Storage(#[source] reqwest::Error),
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("invalid configuration")]
    Config(#[from] ::config::ConfigError),
}
