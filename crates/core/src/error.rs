use thiserror::Error;

use crate::selection::MAX_SELECTION;

/// Failures while reading or validating the country feed
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("country feed is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read country feed at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("country {country:?} has unknown continent {continent:?}")]
    UnknownContinent { country: String, continent: String },

    #[error("country {country:?} has unknown poll year {year:?}")]
    UnknownPollYear { country: String, year: String },

    #[error("country {country:?}, poll {year}: {field} ({value}) exceeds total ({total})")]
    InvalidPollCounts {
        country: String,
        year: &'static str,
        field: &'static str,
        value: u64,
        total: u64,
    },
}

/// Rejected selection edits. None of these change the committed selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("the country selector is not open")]
    DialogClosed,

    #[error("select at least one country before applying")]
    EmptySelection,

    #[error("at most {MAX_SELECTION} countries can be shown, {0} selected")]
    TooMany(usize),
}
