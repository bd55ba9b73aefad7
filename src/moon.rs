use std::time::Duration;

use chrono::NaiveDate;
use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::ServiceError;
use crate::types::{MoonData, MoonPhase};

pub const DEFAULT_MOON_API_URL: &str = "https://devapi.qweather.com/v7/astronomy/moon";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const API_KEY_ENV: &str = "MOON_API_KEY";
pub const API_URL_ENV: &str = "MOON_API_URL";

pub trait MoonDataSource: Send + Sync {
    fn fetch(&self, longitude: f64, latitude: f64, date: NaiveDate) -> Result<MoonData, ServiceError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoonServiceConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for MoonServiceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_MOON_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl MoonServiceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Reads `MOON_API_KEY` and `MOON_API_URL`, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var(API_KEY_ENV).unwrap_or(defaults.api_key),
            base_url: std::env::var(API_URL_ENV).unwrap_or(defaults.base_url),
            timeout: defaults.timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct HttpMoonDataSource {
    config: MoonServiceConfig,
    client: Client,
}

impl HttpMoonDataSource {
    pub fn new(config: MoonServiceConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .user_agent(format!("prayer_times/{}", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServiceError::unexpected(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &MoonServiceConfig {
        &self.config
    }
}

/// Query parameters sent to the moon service.
pub fn moon_query(
    api_key: &str,
    longitude: f64,
    latitude: f64,
    date: NaiveDate,
) -> [(&'static str, String); 3] {
    [
        ("key", api_key.to_string()),
        ("location", format!("{:.2},{:.2}", longitude, latitude)),
        ("date", date.format("%Y%m%d").to_string()),
    ]
}

impl MoonDataSource for HttpMoonDataSource {
    fn fetch(&self, longitude: f64, latitude: f64, date: NaiveDate) -> Result<MoonData, ServiceError> {
        info!("requesting moon data for {} at ({}, {})", date, longitude, latitude);
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&moon_query(&self.config.api_key, longitude, latitude, date))
            .send()
            .map_err(|e| ServiceError::network(format!("moon request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::upstream(format!("moon HTTP status {}", status)));
        }

        let body = response
            .text()
            .map_err(|e| ServiceError::network(format!("failed to read moon response: {}", e)))?;
        parse_moon_response(&body)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Field {
    Text(String),
    Number(f64),
}

impl Field {
    fn as_text(&self) -> String {
        match self {
            Field::Text(s) => s.clone(),
            Field::Number(n) => n.to_string(),
        }
    }

    fn as_number(&self, what: &str) -> Result<f64, ServiceError> {
        match self {
            Field::Number(n) => Ok(*n),
            Field::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| ServiceError::unexpected(format!("{} is not numeric: '{}'", what, s))),
        }
    }
}

#[derive(Deserialize)]
struct RawPhase {
    #[serde(rename = "fxTime", default)]
    fx_time: String,
    value: Field,
    #[serde(default)]
    name: String,
    illumination: Field,
    #[serde(default)]
    icon: String,
}

#[derive(Deserialize)]
struct RawResponse {
    code: Field,
    #[serde(default)]
    moonrise: String,
    #[serde(default)]
    moonset: String,
    #[serde(rename = "moonPhase", default)]
    moon_phase: Vec<RawPhase>,
}

/// Decodes a moon-service body, checking its embedded status code.
pub fn parse_moon_response(body: &str) -> Result<MoonData, ServiceError> {
    let raw: RawResponse = serde_json::from_str(body)
        .map_err(|e| ServiceError::unexpected(format!("malformed response: {}", e)))?;

    let code = raw.code.as_text();
    if code != "200" {
        return Err(ServiceError::upstream(format!("service returned code {}", code)));
    }

    let phases = raw
        .moon_phase
        .into_iter()
        .map(|p| {
            Ok(MoonPhase {
                value: p.value.as_number("phase value")?,
                illumination: p.illumination.as_number("illumination")?,
                time: p.fx_time,
                name: p.name,
                icon: p.icon,
            })
        })
        .collect::<Result<Vec<_>, ServiceError>>()?;
    debug!("decoded {} moon phase records", phases.len());

    Ok(MoonData {
        moonrise: raw.moonrise,
        moonset: raw.moonset,
        phases,
    })
}
