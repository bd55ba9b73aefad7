use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

pub type PrayerResult<T> = Result<T, PrayerError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrayerError {
    #[error("invalid {field}: {value} is outside [{min}, {max}]")]
    InvalidLocation {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("unsupported calculation method '{name}', choose from: {valid}")]
    UnsupportedMethod { name: String, valid: String },

    #[error("unsupported time format '{0}', choose from: 24h, 12h")]
    UnsupportedFormat(String),

    #[error("cannot convert {date} to the Hijri calendar: {reason}")]
    DateConversion { date: NaiveDate, reason: String },
}

impl PrayerError {
    pub fn invalid_location(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::InvalidLocation {
            field,
            value,
            min,
            max,
        }
    }

    pub fn date_conversion(date: NaiveDate, reason: impl Into<String>) -> Self {
        Self::DateConversion {
            date,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceErrorKind {
    Network,
    UpstreamApi,
    Unexpected,
}

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{kind:?} error: {message}")]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub message: String,
}

impl ServiceError {
    pub fn new(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Network, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::UpstreamApi, message)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Unexpected, message)
    }
}
