use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use log::{error, info, warn};
use serde::{Serialize, Serializer};

use crate::error::{PrayerResult, ServiceError};
use crate::format::format_event;
use crate::hijri::{HijriConverter, UmmAlQura};
use crate::method::CalculationMethod;
use crate::moon::MoonDataSource;
use crate::solver;
use crate::types::{Location, MoonResult, Prayer, PrayerTimes, TimeFormat, WeatherResult};
use crate::weather::WeatherSource;

/// Stored as the Hijri date when conversion fails.
pub const HIJRI_UNAVAILABLE: &str = "unavailable";

/// Below this temperature (Celsius) a rising moon is worth a notification.
pub const LOW_TEMPERATURE_C: f64 = 5.0;
pub const LOW_TEMPERATURE_MOONRISE: &str = "Low temperature and the moon is rising.";
pub const NO_NOTIFICATIONS: &str = "No notifications.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrayerSchedule {
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub sunset: String,
    pub maghrib: String,
    pub isha: String,
    #[serde(serialize_with = "serialize_moon")]
    pub moon: MoonResult,
    /// `None` when the service has no weather source.
    #[serde(serialize_with = "serialize_weather")]
    pub weather: Option<WeatherResult>,
    pub gregorian_date: String,
    pub hijri_date: String,
    pub method: String,
    pub location: String,
    pub notification: String,
}

impl PrayerSchedule {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Fetched<'a, T> {
    Data(&'a T),
    Failed { error: &'a ServiceError },
}

impl<'a, T> From<&'a Result<T, ServiceError>> for Fetched<'a, T> {
    fn from(result: &'a Result<T, ServiceError>) -> Self {
        match result {
            Ok(data) => Fetched::Data(data),
            Err(error) => Fetched::Failed { error },
        }
    }
}

fn serialize_moon<S: Serializer>(moon: &MoonResult, serializer: S) -> Result<S::Ok, S::Error> {
    Fetched::from(moon).serialize(serializer)
}

fn serialize_weather<S: Serializer>(
    weather: &Option<WeatherResult>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    weather.as_ref().map(Fetched::from).serialize(serializer)
}

/// Notification derived from the weather and moon results.
pub fn notification(weather: Option<&WeatherResult>, moon: &MoonResult) -> String {
    let cold = matches!(weather, Some(Ok(w)) if w.temperature_celsius < LOW_TEMPERATURE_C);
    let moon_rises = matches!(moon, Ok(m) if !m.moonrise.is_empty());
    if cold && moon_rises {
        LOW_TEMPERATURE_MOONRISE.to_string()
    } else {
        NO_NOTIFICATIONS.to_string()
    }
}

pub struct PrayerScheduleService {
    location: Location,
    method: CalculationMethod,
    moon: Box<dyn MoonDataSource>,
    weather: Option<Box<dyn WeatherSource>>,
    hijri: Box<dyn HijriConverter>,
}

impl PrayerScheduleService {
    /// Resolves `method_name` in the method registry.
    pub fn new(
        location: Location,
        method_name: &str,
        moon: impl MoonDataSource + 'static,
    ) -> PrayerResult<Self> {
        let method = CalculationMethod::from_name(method_name)?;
        Ok(Self::with_method(location, method, moon))
    }

    pub fn with_method(
        location: Location,
        method: CalculationMethod,
        moon: impl MoonDataSource + 'static,
    ) -> Self {
        Self {
            location,
            method,
            moon: Box::new(moon),
            weather: None,
            hijri: Box::new(UmmAlQura),
        }
    }

    pub fn with_weather_source(mut self, weather: impl WeatherSource + 'static) -> Self {
        self.weather = Some(Box::new(weather));
        self
    }

    pub fn with_hijri_converter(mut self, hijri: impl HijriConverter + 'static) -> Self {
        self.hijri = Box::new(hijri);
        self
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn method(&self) -> CalculationMethod {
        self.method
    }

    pub fn times_at<Tz: TimeZone>(&self, dt: &DateTime<Tz>) -> PrayerTimes {
        solver::prayer_times(&self.location, dt, self.method)
    }

    /// Schedule for `date`, computed at midnight UTC.
    pub fn schedule_for_date(&self, date: NaiveDate, format: TimeFormat) -> PrayerSchedule {
        self.schedule_at(&date.and_time(NaiveTime::MIN).and_utc(), format)
    }

    /// Treats the wall-clock value as UTC.
    pub fn schedule_at_naive(&self, dt: NaiveDateTime, format: TimeFormat) -> PrayerSchedule {
        self.schedule_at(&dt.and_utc(), format)
    }

    pub fn schedule_at<Tz: TimeZone>(&self, dt: &DateTime<Tz>, format: TimeFormat) -> PrayerSchedule {
        let utc = dt.with_timezone(&Utc);
        let date = utc.date_naive();
        info!(
            "computing {} schedule for {} on {}",
            self.method.name(),
            self.location.name(),
            date
        );

        let times = self.times_at(&utc);
        let (lat, lon) = (self.location.latitude(), self.location.longitude());
        let moon = self.moon.fetch(lon, lat, date);
        if let Err(e) = &moon {
            warn!("no moon data available: {}", e);
        }
        let weather = self.weather.as_ref().map(|w| w.fetch(lat, lon));
        if let Some(Err(e)) = &weather {
            warn!("no weather data available: {}", e);
        }

        PrayerSchedule {
            fajr: format_event(times.fajr, format),
            sunrise: format_event(times.sunrise, format),
            dhuhr: format_event(times.get(Prayer::Dhuhr), format),
            asr: format_event(times.asr, format),
            sunset: format_event(times.sunset, format),
            maghrib: format_event(times.maghrib, format),
            isha: format_event(times.isha, format),
            notification: notification(weather.as_ref(), &moon),
            moon,
            weather,
            gregorian_date: date.format("%Y-%m-%d").to_string(),
            hijri_date: self.hijri_date(date),
            method: self.method.display_name().to_string(),
            location: self.location.name().to_string(),
        }
    }

    fn hijri_date(&self, date: NaiveDate) -> String {
        match self.hijri.to_hijri(date) {
            Ok(h) => h.to_string(),
            Err(e) => {
                error!("{}", e);
                HIJRI_UNAVAILABLE.to_string()
            }
        }
    }
}
