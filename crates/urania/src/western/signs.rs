//! Zodiac signs and sign placements.
//!
//! Each sign spans 30 degrees of ecliptic longitude starting at 0° Aries.

use crate::angles::normalize_full;
use crate::rounding::round2;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SIGN_SPAN: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// Signs in zodiac order.
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Sign for a 0-based index; wraps past 11.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_longitude(longitude: f64) -> Self {
        let lon = normalize_full(longitude);
        Self::from_index((lon / SIGN_SPAN).floor() as usize)
    }

    pub fn slug(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "aries",
            ZodiacSign::Taurus => "taurus",
            ZodiacSign::Gemini => "gemini",
            ZodiacSign::Cancer => "cancer",
            ZodiacSign::Leo => "leo",
            ZodiacSign::Virgo => "virgo",
            ZodiacSign::Libra => "libra",
            ZodiacSign::Scorpio => "scorpio",
            ZodiacSign::Sagittarius => "sagittarius",
            ZodiacSign::Capricorn => "capricorn",
            ZodiacSign::Aquarius => "aquarius",
            ZodiacSign::Pisces => "pisces",
        }
    }
}

/// Degrees, minutes and seconds of arc, truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dms {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Dms {
    /// Split a non-negative two-decimal degree value.
    ///
    /// Works on whole hundredths of a degree: one hundredth is exactly 36
    /// seconds of arc, so the truncation never drops a second to float error.
    pub fn from_degrees(degrees: f64) -> Self {
        let hundredths = (degrees.max(0.0) * 100.0).round() as u64;
        let whole = hundredths / 100;
        let arc_seconds = (hundredths % 100) * 36;
        Self {
            degrees: whole as u32,
            minutes: (arc_seconds / 60) as u32,
            seconds: (arc_seconds % 60) as u32,
        }
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{:02}'{:02}\"", self.degrees, self.minutes, self.seconds)
    }
}

/// Where a longitude falls in the zodiac.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignPlacement {
    pub sign: ZodiacSign,
    /// Degree within the sign, rounded to two decimals.
    #[serde(rename = "degree")]
    pub degree_in_sign: f64,
    pub dms: Dms,
}

impl SignPlacement {
    pub fn from_longitude(longitude: f64) -> Self {
        let lon = normalize_full(longitude);
        let sign = ZodiacSign::from_longitude(lon);
        let degree_in_sign = round2(lon % SIGN_SPAN);
        Self {
            sign,
            degree_in_sign,
            dms: Dms::from_degrees(degree_in_sign),
        }
    }
}
