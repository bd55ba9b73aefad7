pub mod ephemeris;
pub mod error;
pub mod format;
pub mod hijri;
pub mod method;
pub mod moon;
pub mod schedule;
pub mod solver;
pub mod types;
pub mod weather;

pub use ephemeris::{
    apparent_longitude, deg_to_rad, equation_of_time, julian_day, julian_day_of,
    normalize_angle, normalize_hours, orbital_eccentricity, rad_to_deg, right_ascension,
    solar_declination, solar_ephemeris, solar_ephemeris_for_jd, DEGREES_PER_HOUR, J2000,
};

pub use error::{PrayerError, PrayerResult, ServiceError, ServiceErrorKind};

pub use format::{format_event, format_hours, parse_time_24, split_hours, time_to_hours, INVALID_TIME};

pub use hijri::{HijriConverter, UmmAlQura};

pub use method::CalculationMethod;

pub use moon::{parse_moon_response, HttpMoonDataSource, MoonDataSource, MoonServiceConfig};

pub use schedule::{
    notification, PrayerSchedule, PrayerScheduleService, HIJRI_UNAVAILABLE, LOW_TEMPERATURE_C,
    LOW_TEMPERATURE_MOONRISE, NO_NOTIFICATIONS,
};

pub use solver::{
    asr_altitude, compute_prayer_times, horizon_correction, horizon_dip,
    hour_angle_for_altitude, prayer_times, solar_noon, EARTH_RADIUS_M, HORIZON_REFRACTION,
    SUNRISE_ALTITUDE,
};

pub use types::{
    HijriDate, Location, MoonData, MoonPhase, MoonResult, Prayer, PrayerEvent, PrayerTimes,
    SolarEphemeris, TimeFormat, WeatherReport, WeatherResult,
};

pub use weather::{parse_weather_response, HttpWeatherSource, WeatherServiceConfig, WeatherSource};
