use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{PrayerError, PrayerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum CalculationMethod {
    /// Shafi'i, Maliki and Hanbali schools.
    #[default]
    Standard,
    Hanafi,
}

impl CalculationMethod {
    pub const ALL: [CalculationMethod; 2] = [CalculationMethod::Standard, CalculationMethod::Hanafi];

    pub fn name(self) -> &'static str {
        match self {
            CalculationMethod::Standard => "standard",
            CalculationMethod::Hanafi => "hanafi",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CalculationMethod::Standard => "Standard (Shafi'i, Maliki, Hanbali)",
            CalculationMethod::Hanafi => "Hanafi",
        }
    }

    /// Shadow length, in object lengths, added to the noon shadow to mark Asr.
    pub fn asr_factor(self) -> f64 {
        match self {
            CalculationMethod::Standard => 1.0,
            CalculationMethod::Hanafi => 2.0,
        }
    }

    /// Solar depression below the horizon at dawn.
    pub fn fajr_angle_degrees(self) -> f64 {
        18.0
    }

    /// Solar depression below the horizon at nightfall.
    pub fn isha_angle_degrees(self) -> f64 {
        match self {
            CalculationMethod::Standard => 17.0,
            CalculationMethod::Hanafi => 18.0,
        }
    }

    pub fn from_name(name: &str) -> PrayerResult<Self> {
        let wanted = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PrayerError::UnsupportedMethod {
                name: name.to_string(),
                valid: Self::valid_names(),
            })
    }

    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|m| m.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for CalculationMethod {
    type Err = PrayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
