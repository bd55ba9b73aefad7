use chrono::{DateTime, TimeZone};
use log::debug;

use crate::ephemeris::{self, deg_to_rad, normalize_hours, rad_to_deg, DEGREES_PER_HOUR};
use crate::method::CalculationMethod;
use crate::types::{Location, PrayerEvent, PrayerTimes, SolarEphemeris};

/// Altitude of the sun's centre at apparent sunrise/sunset: solar
/// semi-diameter plus standard refraction.
pub const SUNRISE_ALTITUDE: f64 = -0.8333;
pub const HORIZON_REFRACTION: f64 = 0.0347;
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Dip of the visible horizon seen from `elevation` metres, in degrees.
pub fn horizon_dip(elevation: f64) -> f64 {
    if elevation <= 0.0 {
        return 0.0;
    }
    rad_to_deg((EARTH_RADIUS_M / (EARTH_RADIUS_M + elevation)).acos())
}

/// Extra depression applied to the sunrise/sunset altitude.
pub fn horizon_correction(elevation: f64) -> f64 {
    HORIZON_REFRACTION + horizon_dip(elevation)
}

/// Solar noon in fractional UTC hours.
pub fn solar_noon(equation_of_time: f64) -> f64 {
    normalize_hours(12.0 - equation_of_time / 60.0)
}

/// Hour angle, in degrees, at which the sun crosses `altitude`.
///
/// `None` when the sun stays entirely above or below that altitude all day.
pub fn hour_angle_for_altitude(latitude: f64, declination: f64, altitude: f64) -> Option<f64> {
    let lat = deg_to_rad(latitude);
    let dec = deg_to_rad(declination);
    let cos_omega =
        (deg_to_rad(altitude).sin() - lat.sin() * dec.sin()) / (lat.cos() * dec.cos());

    if (-1.0..=1.0).contains(&cos_omega) {
        Some(rad_to_deg(cos_omega.acos()))
    } else {
        None
    }
}

/// Altitude at which an object's shadow is `asr_factor` lengths longer
/// than its noon shadow.
pub fn asr_altitude(asr_factor: f64, latitude: f64, declination: f64) -> f64 {
    let t = asr_factor + deg_to_rad((latitude - declination).abs()).tan();
    rad_to_deg((1.0 / t).atan())
}

fn before_noon(noon: f64, omega: Option<f64>) -> PrayerEvent {
    omega
        .map(|w| normalize_hours(noon - w / DEGREES_PER_HOUR))
        .into()
}

fn after_noon(noon: f64, omega: Option<f64>) -> PrayerEvent {
    omega
        .map(|w| normalize_hours(noon + w / DEGREES_PER_HOUR))
        .into()
}

pub fn compute_prayer_times(
    eph: &SolarEphemeris,
    location: &Location,
    method: CalculationMethod,
) -> PrayerTimes {
    let lat = location.latitude();
    let decl = eph.declination;
    let noon = solar_noon(eph.equation_of_time);

    let horizon = SUNRISE_ALTITUDE - horizon_correction(location.elevation());
    let omega_horizon = hour_angle_for_altitude(lat, decl, horizon);
    let asr = asr_altitude(method.asr_factor(), lat, decl);
    let omega_asr = hour_angle_for_altitude(lat, decl, asr);
    let omega_fajr = hour_angle_for_altitude(lat, decl, -method.fajr_angle_degrees());
    let omega_isha = hour_angle_for_altitude(lat, decl, -method.isha_angle_degrees());

    let sunset = after_noon(noon, omega_horizon);
    let times = PrayerTimes {
        fajr: before_noon(noon, omega_fajr),
        sunrise: before_noon(noon, omega_horizon),
        dhuhr: noon,
        asr: after_noon(noon, omega_asr),
        sunset,
        maghrib: sunset,
        isha: after_noon(noon, omega_isha),
    };
    debug!("{} at {}: {:?}", method.name(), location.name(), times);
    times
}

/// Ephemeris and solver in one step for a zoned instant.
pub fn prayer_times<Tz: TimeZone>(
    location: &Location,
    dt: &DateTime<Tz>,
    method: CalculationMethod,
) -> PrayerTimes {
    compute_prayer_times(&ephemeris::solar_ephemeris(dt), location, method)
}
