use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use log::debug;

use crate::types::SolarEphemeris;

pub const J2000: f64 = 2451545.0;
pub const DAYS_PER_CENTURY: f64 = 36525.0;
pub const DEGREES_PER_HOUR: f64 = 15.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Wraps into [0, 24).
pub fn normalize_hours(hours: f64) -> f64 {
    let h = hours.rem_euclid(24.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if h >= 24.0 {
        0.0
    } else {
        h
    }
}

/// Julian day of a proleptic Gregorian calendar instant.
pub fn julian_day(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    let day_fraction = (hour as f64 + minute as f64 / 60.0 + second as f64 / 3600.0) / 24.0;

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b - 1524.5
        + day_fraction
}

/// Julian day of a zoned instant, taken in UTC. Sub-second parts are ignored.
pub fn julian_day_of<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    let utc = dt.with_timezone(&Utc);
    julian_day(
        utc.year(),
        utc.month(),
        utc.day(),
        utc.hour(),
        utc.minute(),
        utc.second(),
    )
}

pub fn days_since_j2000(jd: f64) -> f64 {
    jd - J2000
}

pub fn mean_anomaly(d: f64) -> f64 {
    357.529 + 0.98560028 * d
}

pub fn mean_longitude(d: f64) -> f64 {
    280.459 + 0.98564736 * d
}

pub fn obliquity(d: f64) -> f64 {
    23.439 - 0.00000036 * d
}

/// Eccentricity of the Earth's orbit.
pub fn orbital_eccentricity(jd: f64) -> f64 {
    let t = days_since_j2000(jd) / DAYS_PER_CENTURY;
    0.016708634 - 0.000042037 * t - 0.0000001267 * t * t
}

pub fn equation_of_center(g: f64) -> f64 {
    let g_rad = deg_to_rad(g);
    1.915 * g_rad.sin() + 0.020 * (2.0 * g_rad).sin()
}

/// True longitude corrected for nutation and aberration.
pub fn apparent_longitude(d: f64) -> f64 {
    let true_longitude = mean_longitude(d) + equation_of_center(mean_anomaly(d));
    let omega = 125.04 - 1934.136 * d;
    true_longitude - 0.00569 - 0.00478 * deg_to_rad(omega).sin()
}

pub fn solar_declination(obliquity: f64, apparent_longitude: f64) -> f64 {
    let e = deg_to_rad(obliquity);
    let lambda = deg_to_rad(apparent_longitude);
    rad_to_deg((e.sin() * lambda.sin()).asin())
}

/// Right ascension in hours, [0, 24).
pub fn right_ascension(obliquity: f64, apparent_longitude: f64) -> f64 {
    let e = deg_to_rad(obliquity);
    let lambda = deg_to_rad(apparent_longitude);
    let ra = rad_to_deg((e.cos() * lambda.sin()).atan2(lambda.cos()));
    normalize_angle(ra) / DEGREES_PER_HOUR
}

/// Equation of time in minutes.
pub fn equation_of_time(d: f64, eccentricity: f64) -> f64 {
    let e = deg_to_rad(obliquity(d));
    let g = deg_to_rad(mean_anomaly(d));
    let q = deg_to_rad(mean_longitude(d));
    let y = (e / 2.0).tan().powi(2);

    let eot = y * (2.0 * q).sin() - 2.0 * eccentricity * g.sin()
        + 4.0 * eccentricity * y * g.sin() * (2.0 * q).cos()
        - 0.5 * y * y * (4.0 * q).sin()
        - 1.25 * eccentricity * eccentricity * (2.0 * g).sin();

    // 1 degree of rotation = 4 minutes
    rad_to_deg(eot) * 4.0
}

pub fn solar_ephemeris_for_jd(jd: f64) -> SolarEphemeris {
    let d = days_since_j2000(jd);
    let e = obliquity(d);
    let lambda = apparent_longitude(d);
    let eccentricity = orbital_eccentricity(jd);

    SolarEphemeris {
        julian_day: jd,
        declination: solar_declination(e, lambda),
        equation_of_time: equation_of_time(d, eccentricity),
        eccentricity,
        right_ascension: right_ascension(e, lambda),
    }
}

pub fn solar_ephemeris<Tz: TimeZone>(dt: &DateTime<Tz>) -> SolarEphemeris {
    let eph = solar_ephemeris_for_jd(julian_day_of(dt));
    debug!(
        "ephemeris jd={:.5} decl={:.4} eot={:.3}min",
        eph.julian_day, eph.declination, eph.equation_of_time
    );
    eph
}
