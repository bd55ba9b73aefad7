use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::error::{PrayerError, PrayerResult};
use crate::types::HijriDate;

pub trait HijriConverter: Send + Sync {
    fn to_hijri(&self, date: NaiveDate) -> PrayerResult<HijriDate>;
}

/// Gregorian years covered by the Umm al-Qura table (1356-1500 AH).
pub const UMM_AL_QURA_YEARS: RangeInclusive<i32> = 1938..=2076;

/// Umm al-Qura calendar, backed by the `hijri_date` tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct UmmAlQura;

impl HijriConverter for UmmAlQura {
    fn to_hijri(&self, date: NaiveDate) -> PrayerResult<HijriDate> {
        if !UMM_AL_QURA_YEARS.contains(&date.year()) {
            return Err(PrayerError::date_conversion(
                date,
                format!(
                    "outside the Umm al-Qura range {}-{}",
                    UMM_AL_QURA_YEARS.start(),
                    UMM_AL_QURA_YEARS.end()
                ),
            ));
        }

        let converted = hijri_date::HijriDate::from_gr(
            date.year() as usize,
            date.month() as usize,
            date.day() as usize,
        )
        .map_err(|e| PrayerError::date_conversion(date, e.to_string()))?;
        debug!(
            "{} -> {}/{}/{} AH",
            date,
            converted.day(),
            converted.month(),
            converted.year()
        );

        let year = i32::try_from(converted.year())
            .map_err(|_| PrayerError::date_conversion(date, "Hijri year out of range"))?;
        Ok(HijriDate {
            day: converted.day() as u32,
            month: converted.month() as u32,
            year,
        })
    }
}
