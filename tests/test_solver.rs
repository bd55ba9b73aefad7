use chrono::{TimeZone, Utc};

use prayer_times::ephemeris::solar_ephemeris;
use prayer_times::solver::*;
use prayer_times::types::{Location, Prayer, PrayerEvent, PrayerTimes};
use prayer_times::CalculationMethod;

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn amsterdam() -> Location {
    Location::new(52.3676, 4.9041, "Europe/Amsterdam", 2.0, "Amsterdam").unwrap()
}

fn times_on(location: &Location, y: i32, m: u32, d: u32, method: CalculationMethod) -> PrayerTimes {
    let dt = Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap();
    prayer_times(location, &dt, method)
}

fn hours(event: PrayerEvent) -> f64 {
    event.hours().expect("event should occur")
}

// ── Horizon correction ──

#[test]
fn test_horizon_dip_zero_at_sea_level() {
    assert_eq!(horizon_dip(0.0), 0.0);
    assert_eq!(horizon_dip(-5.0), 0.0);
    assert_approx!(horizon_correction(0.0), HORIZON_REFRACTION, 1e-12);
}

#[test]
fn test_horizon_dip_known_value() {
    // ~1.76 degrees from 3000 m
    assert_approx!(horizon_dip(3000.0), 1.757, 0.01);
    assert_approx!(horizon_dip(2.0), 0.0454, 0.001);
}

#[test]
fn test_horizon_dip_strictly_increasing() {
    let elevations = [1.0, 10.0, 100.0, 500.0, 1753.0, 4000.0, 8848.0];
    for w in elevations.windows(2) {
        assert!(horizon_dip(w[0]) < horizon_dip(w[1]), "{:?}", w);
    }
}

// ── Solar noon ──

#[test]
fn test_solar_noon_from_equation_of_time() {
    assert_approx!(solar_noon(0.0), 12.0, 1e-12);
    assert_approx!(solar_noon(16.4), 12.0 - 16.4 / 60.0, 1e-12);
    assert_approx!(solar_noon(-14.2), 12.0 + 14.2 / 60.0, 1e-12);
}

// ── Hour angle ──

#[test]
fn test_hour_angle_equator_equinox_horizon() {
    assert_approx!(hour_angle_for_altitude(0.0, 0.0, 0.0).unwrap(), 90.0, 1e-9);
}

#[test]
fn test_hour_angle_none_outside_domain() {
    // Midnight sun: the sun never drops to the horizon
    assert_eq!(hour_angle_for_altitude(80.0, 23.44, -0.8333), None);
    // Polar night: the sun never rises to the horizon
    assert_eq!(hour_angle_for_altitude(80.0, -23.44, -0.8333), None);
}

#[test]
fn test_hour_angle_grows_with_depression() {
    let horizon = hour_angle_for_altitude(40.0, 10.0, -0.8333).unwrap();
    let civil = hour_angle_for_altitude(40.0, 10.0, -6.0).unwrap();
    let astronomical = hour_angle_for_altitude(40.0, 10.0, -18.0).unwrap();
    assert!(horizon < civil && civil < astronomical);
}

// ── Asr altitude ──

#[test]
fn test_asr_altitude_equal_shadow() {
    // Sun overhead at noon: shadow equals object length at 45 degrees
    assert_approx!(asr_altitude(1.0, 10.0, 10.0), 45.0, 1e-9);
    assert_approx!(asr_altitude(2.0, 10.0, 10.0), (0.5_f64).atan().to_degrees(), 1e-9);
}

#[test]
fn test_asr_altitude_below_noon_altitude() {
    for &(lat, decl) in &[(52.0, 23.4), (0.0, -10.0), (-33.0, 5.0), (21.4, -20.0)] {
        let noon_altitude = 90.0 - f64::abs(lat - decl);
        assert!(asr_altitude(1.0, lat, decl) < noon_altitude);
        assert!(asr_altitude(2.0, lat, decl) < asr_altitude(1.0, lat, decl));
    }
}

// ── Amsterdam ──

#[test]
fn test_amsterdam_summer_solstice() {
    let t = times_on(&amsterdam(), 2026, 6, 21, CalculationMethod::Standard);
    let eph = solar_ephemeris(&Utc.with_ymd_and_hms(2026, 6, 21, 0, 0, 0).unwrap());

    assert_approx!(t.dhuhr, 12.0 - eph.equation_of_time / 60.0, 1e-12);
    assert_approx!(t.dhuhr, 12.0, 0.1);
    assert_approx!(hours(t.sunrise), 3.615, 0.01);
    assert_approx!(hours(t.asr), 16.439, 0.01);
    assert_approx!(hours(t.sunset), 20.442, 0.01);
    // The sun stays within ~14 degrees of the horizon all night
    assert_eq!(t.fajr, PrayerEvent::NoEvent);
    assert_eq!(t.isha, PrayerEvent::NoEvent);
}

#[test]
fn test_amsterdam_equinox_all_events() {
    let t = times_on(&amsterdam(), 2026, 3, 20, CalculationMethod::Standard);
    assert_approx!(hours(t.fajr), 4.124, 0.01);
    assert_approx!(hours(t.sunrise), 6.048, 0.01);
    assert_approx!(t.dhuhr, 12.126, 0.01);
    assert_approx!(hours(t.asr), 15.391, 0.01);
    assert_approx!(hours(t.sunset), 18.205, 0.01);
    assert_approx!(hours(t.isha), 20.010, 0.01);
}

#[test]
fn test_hanafi_asr_later_and_isha_deeper() {
    let standard = times_on(&amsterdam(), 2026, 3, 20, CalculationMethod::Standard);
    let hanafi = times_on(&amsterdam(), 2026, 3, 20, CalculationMethod::Hanafi);
    assert!(hours(hanafi.asr) > hours(standard.asr));
    assert!(hours(hanafi.isha) > hours(standard.isha));
    assert_eq!(hanafi.fajr, standard.fajr);
    assert_eq!(hanafi.sunrise, standard.sunrise);
    assert_eq!(hanafi.dhuhr, standard.dhuhr);
}

#[test]
fn test_maghrib_equals_sunset() {
    let t = times_on(&amsterdam(), 2026, 10, 1, CalculationMethod::Hanafi);
    assert_eq!(t.maghrib, t.sunset);
}

// ── Equator ──

#[test]
fn test_equator_equinox_symmetric_around_noon() {
    let equator = Location::at(0.0, 0.0).unwrap();
    let dt = Utc.with_ymd_and_hms(2026, 3, 20, 15, 0, 0).unwrap();
    let t = prayer_times(&equator, &dt, CalculationMethod::Standard);
    let morning = t.dhuhr - hours(t.sunrise);
    let evening = hours(t.sunset) - t.dhuhr;
    assert_approx!(morning, evening, 1e-9);
    // 90 degrees plus the horizon depression, at 15 degrees per hour
    assert_approx!(morning, 6.058, 0.01);
}

// ── High latitude ──

#[test]
fn test_eighty_north_midnight_sun() {
    let north = Location::at(80.0, 15.0).unwrap();
    let t = times_on(&north, 2026, 6, 21, CalculationMethod::Standard);
    assert_eq!(t.fajr, PrayerEvent::NoEvent);
    assert_eq!(t.sunrise, PrayerEvent::NoEvent);
    assert_eq!(t.sunset, PrayerEvent::NoEvent);
    assert_eq!(t.maghrib, PrayerEvent::NoEvent);
    assert_eq!(t.isha, PrayerEvent::NoEvent);
    assert!(t.dhuhr.is_finite());
    assert!(t.asr.is_valid());
}

#[test]
fn test_polar_night_has_no_sunrise() {
    let north = Location::at(80.0, 15.0).unwrap();
    let t = times_on(&north, 2026, 12, 21, CalculationMethod::Standard);
    assert_eq!(t.sunrise, PrayerEvent::NoEvent);
    assert_eq!(t.sunset, PrayerEvent::NoEvent);
}

// ── Elevation ──

#[test]
fn test_elevation_widens_daylight() {
    let low = Location::new(45.0, 0.0, "UTC", 0.0, "low").unwrap();
    let high = Location::new(45.0, 0.0, "UTC", 3000.0, "high").unwrap();
    let tl = times_on(&low, 2026, 5, 1, CalculationMethod::Standard);
    let th = times_on(&high, 2026, 5, 1, CalculationMethod::Standard);
    assert!(hours(th.sunrise) < hours(tl.sunrise));
    assert!(hours(th.sunset) > hours(tl.sunset));
    // Twilight and shadow angles are not corrected for elevation
    assert_eq!(th.fajr, tl.fajr);
    assert_eq!(th.asr, tl.asr);
    assert_eq!(th.isha, tl.isha);
}

// ── PrayerTimes accessors ──

#[test]
fn test_iter_in_canonical_order() {
    let t = times_on(&amsterdam(), 2026, 3, 20, CalculationMethod::Standard);
    let order: Vec<Prayer> = t.iter().map(|(p, _)| p).collect();
    assert_eq!(order, Prayer::ALL.to_vec());
    assert_eq!(t.get(Prayer::Dhuhr), PrayerEvent::Time(t.dhuhr));
    assert_eq!(t.get(Prayer::Isha), t.isha);
}

#[test]
fn test_compute_from_ephemeris_matches_convenience() {
    let dt = Utc.with_ymd_and_hms(2026, 7, 4, 0, 0, 0).unwrap();
    let loc = amsterdam();
    let direct = compute_prayer_times(&solar_ephemeris(&dt), &loc, CalculationMethod::Hanafi);
    assert_eq!(direct, prayer_times(&loc, &dt, CalculationMethod::Hanafi));
}
