use chrono::NaiveDateTime;
use thiserror::Error;

use crate::types::Body;

/// Errors raised by the chart pipeline.
///
/// No stage substitutes a default value on failure; every problem surfaces here.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("unknown timezone identifier: {timezone}")]
    InvalidTimezone { timezone: String },

    #[error("{field} = {value} is outside the allowed range")]
    CoordinateRange { field: &'static str, value: f64 },

    #[error("location is missing {field}")]
    IncompleteLocation { field: &'static str },

    #[error("local time {local} does not exist in {timezone}")]
    NonexistentLocalTime {
        local: NaiveDateTime,
        timezone: String,
    },

    #[error("failed to compute position for {body}")]
    BodyComputation { body: Body },

    #[error("chart integrity check failed: {0}")]
    ChartIntegrity(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read configuration file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("chart JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
