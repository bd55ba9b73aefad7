use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{PrayerError, PrayerResult};

pub const DEFAULT_LOCATION_NAME: &str = "Unknown location";

/// The timezone label is for display only; computed times are UTC.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    latitude: f64,
    longitude: f64,
    timezone: String,
    elevation: f64,
    name: String,
}

impl Location {
    pub fn new(
        latitude: f64,
        longitude: f64,
        timezone: impl Into<String>,
        elevation: f64,
        name: impl Into<String>,
    ) -> PrayerResult<Self> {
        check_range("latitude", latitude, -90.0, 90.0)?;
        check_range("longitude", longitude, -180.0, 180.0)?;
        check_range("elevation", elevation, 0.0, f64::INFINITY)?;
        Ok(Self {
            latitude,
            longitude,
            timezone: timezone.into(),
            elevation,
            name: name.into(),
        })
    }

    pub fn at(latitude: f64, longitude: f64) -> PrayerResult<Self> {
        Self::new(latitude, longitude, "UTC", 0.0, DEFAULT_LOCATION_NAME)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Metres above sea level.
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> PrayerResult<()> {
    // NaN fails the containment test as well
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(PrayerError::invalid_location(field, value, min, max))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarEphemeris {
    pub julian_day: f64,
    /// Degrees north of the celestial equator.
    pub declination: f64,
    /// Apparent minus mean solar time, in minutes.
    pub equation_of_time: f64,
    pub eccentricity: f64,
    /// Hours, in [0, 24).
    pub right_ascension: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PrayerEvent {
    /// Fractional UTC hour in [0, 24).
    Time(f64),
    /// The sun never reaches the required altitude on this date.
    NoEvent,
}

impl PrayerEvent {
    pub fn hours(self) -> Option<f64> {
        match self {
            PrayerEvent::Time(h) => Some(h),
            PrayerEvent::NoEvent => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, PrayerEvent::Time(_))
    }
}

impl From<Option<f64>> for PrayerEvent {
    fn from(hours: Option<f64>) -> Self {
        hours.map_or(PrayerEvent::NoEvent, PrayerEvent::Time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Sunset,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; 7] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Sunset,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Prayer::Fajr => "fajr",
            Prayer::Sunrise => "sunrise",
            Prayer::Dhuhr => "dhuhr",
            Prayer::Asr => "asr",
            Prayer::Sunset => "sunset",
            Prayer::Maghrib => "maghrib",
            Prayer::Isha => "isha",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrayerTimes {
    pub fajr: PrayerEvent,
    pub sunrise: PrayerEvent,
    pub dhuhr: f64,
    pub asr: PrayerEvent,
    pub sunset: PrayerEvent,
    /// Same crossing as `sunset`.
    pub maghrib: PrayerEvent,
    pub isha: PrayerEvent,
}

impl PrayerTimes {
    pub fn get(&self, prayer: Prayer) -> PrayerEvent {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => PrayerEvent::Time(self.dhuhr),
            Prayer::Asr => self.asr,
            Prayer::Sunset => self.sunset,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prayer, PrayerEvent)> + '_ {
        Prayer::ALL.iter().map(move |&p| (p, self.get(p)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TimeFormat {
    /// `HH:MM`
    #[default]
    H24,
    /// `hh:MM AM`
    H12,
}

impl FromStr for TimeFormat {
    type Err = PrayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "24h" | "24" | "h24" => Ok(TimeFormat::H24),
            "12h" | "12" | "h12" => Ok(TimeFormat::H12),
            _ => Err(PrayerError::UnsupportedFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoonPhase {
    pub time: String,
    pub value: f64,
    pub name: String,
    /// Percent of the disc illuminated.
    pub illumination: f64,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoonData {
    pub moonrise: String,
    pub moonset: String,
    pub phases: Vec<MoonPhase>,
}

pub type MoonResult = Result<MoonData, crate::error::ServiceError>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub temperature_celsius: f64,
    pub humidity_percent: i32,
    pub conditions: String,
}

pub type WeatherResult = Result<WeatherReport, crate::error::ServiceError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HijriDate {
    pub day: u32,
    /// 1 = Muharram, 12 = Dhu al-Hijjah.
    pub month: u32,
    pub year: i32,
}

pub const HIJRI_MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Ula",
    "Jumada al-Akhirah",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

impl HijriDate {
    pub fn month_name(&self) -> &'static str {
        HIJRI_MONTH_NAMES[(self.month.clamp(1, 12) - 1) as usize]
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} AH", self.day, self.month_name(), self.year)
    }
}
