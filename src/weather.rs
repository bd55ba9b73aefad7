use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::ServiceError;
use crate::types::WeatherReport;

pub const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_WEATHER_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_LANGUAGE: &str = "en";

pub const WEATHER_API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const WEATHER_API_URL_ENV: &str = "OPENWEATHER_API_URL";

pub trait WeatherSource: Send + Sync {
    fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherReport, ServiceError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherServiceConfig {
    pub api_key: String,
    pub base_url: String,
    /// Language of the `conditions` text.
    pub language: String,
    pub timeout: Duration,
}

impl Default for WeatherServiceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_WEATHER_API_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: DEFAULT_WEATHER_TIMEOUT,
        }
    }
}

impl WeatherServiceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var(WEATHER_API_KEY_ENV).unwrap_or(defaults.api_key),
            base_url: std::env::var(WEATHER_API_URL_ENV).unwrap_or(defaults.base_url),
            ..defaults
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct HttpWeatherSource {
    config: WeatherServiceConfig,
    client: Client,
}

impl HttpWeatherSource {
    pub fn new(config: WeatherServiceConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .user_agent(format!("prayer_times/{}", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServiceError::unexpected(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &WeatherServiceConfig {
        &self.config
    }
}

/// Temperatures are requested in degrees Celsius.
pub fn weather_query(
    api_key: &str,
    language: &str,
    latitude: f64,
    longitude: f64,
) -> [(&'static str, String); 5] {
    [
        ("lat", latitude.to_string()),
        ("lon", longitude.to_string()),
        ("appid", api_key.to_string()),
        ("units", "metric".to_string()),
        ("lang", language.to_string()),
    ]
}

impl WeatherSource for HttpWeatherSource {
    fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherReport, ServiceError> {
        info!("requesting weather at ({}, {})", latitude, longitude);
        let query = weather_query(&self.config.api_key, &self.config.language, latitude, longitude);
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&query)
            .send()
            .map_err(|e| ServiceError::network(format!("weather request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::upstream(format!("weather HTTP status {}", status)));
        }

        let body = response
            .text()
            .map_err(|e| ServiceError::network(format!("failed to read weather response: {}", e)))?;
        parse_weather_response(&body)
    }
}

#[derive(Deserialize)]
struct RawMain {
    temp: f64,
    humidity: i32,
}

#[derive(Deserialize)]
struct RawCondition {
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
struct RawWeather {
    main: RawMain,
    #[serde(default)]
    weather: Vec<RawCondition>,
}

pub fn parse_weather_response(body: &str) -> Result<WeatherReport, ServiceError> {
    let raw: RawWeather = serde_json::from_str(body)
        .map_err(|e| ServiceError::unexpected(format!("malformed weather response: {}", e)))?;

    let conditions = raw
        .weather
        .into_iter()
        .next()
        .map(|c| c.description.to_lowercase())
        .unwrap_or_default();
    debug!("weather {:.1}C, {}", raw.main.temp, conditions);

    Ok(WeatherReport {
        temperature_celsius: raw.main.temp,
        humidity_percent: raw.main.humidity,
        conditions,
    })
}
