use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Could not read network config {path:?}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid network config: {0}")]
    ParseConfig(#[from] toml::de::Error),

    #[error("Service hours start at {first} but end at {last}")]
    InvalidServiceHours { first: u32, last: u32 },

    #[error("Service hours end at {last}, past the last usable hour {max}")]
    ServiceHoursOutOfRange { last: u32, max: u32 },

    #[error("Line {line:?} is too long: {hops} hops of {speed} minutes overflow the clock")]
    LineTooLong {
        line: String,
        speed: u32,
        hops: usize,
    },

    #[error("Invalid HHMM time {0:?}")]
    InvalidTime(String),

    #[error("Failed to write JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write CSV output: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}
