//! Local civil time to Universal Time and Julian Day.
//!
//! The UTC offset is looked up at the *local* wall-clock moment so that the
//! daylight-saving rule in force on the local date is the one applied.
//! Unknown zones and failed lookups fall back to reading the local time as
//! UTC; the fallback is reported, never raised.

use chrono::{Datelike, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_ZONE: &str = "UTC";

const NANOS_PER_SECOND: u64 = 1_000_000_000;
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: f64 = 3_600e9;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimezoneError {
    #[error("Unknown timezone: {0}")]
    UnknownZone(String),
    #[error("Invalid civil date/time: {0}")]
    InvalidDateTime(String),
}

/// A wall-clock moment. Seconds ride along as a fraction of `minute`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CivilDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: f64,
}

impl CivilDateTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: f64) -> Self {
        Self { year, month, day, hour, minute }
    }

    pub fn fractional_hour(&self) -> f64 {
        self.hour as f64 + self.minute / 60.0
    }

    /// Whole minute, second and nanosecond, split on integer nanoseconds so
    /// :59 never reads back as :58.999.
    fn minute_parts(&self) -> (u32, u32, u32) {
        let total_nanos = (self.minute.max(0.0) * 60e9).round().min(NANOS_PER_HOUR - 1.0) as u64;
        let minute = total_nanos / NANOS_PER_MINUTE;
        let second = (total_nanos % NANOS_PER_MINUTE) / NANOS_PER_SECOND;
        let nanos = total_nanos % NANOS_PER_SECOND;
        (minute as u32, second as u32, nanos as u32)
    }

    pub fn to_naive(&self) -> Result<NaiveDateTime, TimezoneError> {
        let invalid = || TimezoneError::InvalidDateTime(self.to_string());
        if !(0.0..60.0).contains(&self.minute) {
            return Err(invalid());
        }
        let (minute, second, nanos) = self.minute_parts();

        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|date| date.and_hms_nano_opt(self.hour, minute, second, nanos))
            .ok_or_else(invalid)
    }

    pub fn from_naive(dt: NaiveDateTime) -> Self {
        let seconds = dt.second() as f64 + dt.nanosecond() as f64 / 1e9;
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute() as f64 + seconds / 60.0,
        }
    }
}

impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (minute, second, _) = self.minute_parts();
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, minute, second
        )
    }
}

/// Continuous Universal Time day count.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JulianDay(f64);

impl JulianDay {
    /// J2000.0, 2000-01-01 12:00 UT
    pub const J2000: JulianDay = JulianDay(2_451_545.0);

    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Julian Day of a UTC civil moment, Gregorian calendar throughout.
    pub fn from_utc(utc: &CivilDateTime) -> Self {
        julian_day(utc.year, utc.month, utc.day, utc.fractional_hour())
    }
}

/// Standard Julian Day algorithm for the proleptic Gregorian calendar.
pub fn julian_day(year: i32, month: u32, day: u32, hour: f64) -> JulianDay {
    let mut y = year as f64;
    let mut m = month as f64;
    if month < 3 {
        y -= 1.0;
        m += 12.0;
    }
    let century = (y / 100.0).floor();
    let gregorian = 2.0 - century + (century / 4.0).floor();

    let jd = (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64
        + gregorian
        - 1524.5
        + hour / 24.0;
    JulianDay(jd)
}

/// Maps a zone name and local moment to the UTC offset in force there.
pub trait TimezoneDatabase: Send + Sync {
    fn utc_offset(&self, local: &CivilDateTime, zone: &str) -> Result<FixedOffset, TimezoneError>;
}

/// IANA zones compiled in through `chrono-tz`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IanaTimezones;

impl TimezoneDatabase for IanaTimezones {
    fn utc_offset(&self, local: &CivilDateTime, zone: &str) -> Result<FixedOffset, TimezoneError> {
        let tz: Tz = zone
            .trim()
            .parse()
            .map_err(|_| TimezoneError::UnknownZone(zone.to_string()))?;
        let naive = local.to_naive()?;

        let offset = match tz.offset_from_local_datetime(&naive) {
            LocalResult::Single(offset) => offset.fix(),
            // Repeated hour: take the earlier instant
            LocalResult::Ambiguous(earliest, _) => earliest.fix(),
            // Skipped hour: use the offset from before the transition
            LocalResult::None => tz.offset_from_utc_datetime(&(naive - Duration::hours(26))).fix(),
        };
        Ok(offset)
    }
}

/// Outcome of normalizing a local moment to UTC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcResolution {
    pub utc: CivilDateTime,
    pub julian_day: JulianDay,
    /// Offset east of UTC, in seconds
    pub offset_seconds: i32,
    /// False when the local time was taken as UTC after a lookup failure
    pub zone_resolved: bool,
}

/// Convert a local civil moment in `zone` to UTC and its Julian Day.
pub fn normalize_to_utc(
    local: &CivilDateTime,
    zone: &str,
    timezones: &dyn TimezoneDatabase,
) -> UtcResolution {
    let shifted = timezones.utc_offset(local, zone).and_then(|offset| {
        let naive = local.to_naive()?;
        let utc = naive - Duration::seconds(offset.local_minus_utc() as i64);
        Ok((CivilDateTime::from_naive(utc), offset.local_minus_utc()))
    });

    let (utc, offset_seconds, zone_resolved) = match shifted {
        Ok((utc, offset)) => (utc, offset, true),
        Err(e) => {
            log::warn!("Timezone resolution failed ({}); treating {} as UTC", e, local);
            (*local, 0, false)
        }
    };

    UtcResolution {
        utc,
        julian_day: JulianDay::from_utc(&utc),
        offset_seconds,
        zone_resolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_j2000_reference() {
        let jd = julian_day(2000, 1, 1, 12.0);
        assert_eq!(jd, JulianDay::J2000);
    }

    #[test]
    fn test_published_julian_days() {
        // Meeus, Astronomical Algorithms, example 7.a and table 7.a
        assert!((julian_day(1957, 10, 4, 19.0 + 26.4 / 60.0).value() - 2_436_116.31).abs() < 1e-6);
        assert!((julian_day(1987, 1, 27, 0.0).value() - 2_446_822.5).abs() < 1e-9);
        assert!((julian_day(1988, 6, 19, 12.0).value() - 2_447_332.0).abs() < 1e-9);
        assert!((julian_day(1600, 1, 1, 0.0).value() - 2_305_447.5).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_minute_carries_seconds() {
        let civil = CivilDateTime::new(2000, 1, 1, 12, 30.5);
        let naive = civil.to_naive().unwrap();
        assert_eq!(naive.second(), 30);
        assert_eq!(CivilDateTime::from_naive(naive), civil);
        assert_eq!(civil.to_string(), "2000-01-01T12:30:30");
    }

    #[test]
    fn test_every_whole_second_survives() {
        for s in 0..60u32 {
            let civil = CivilDateTime::new(2000, 1, 1, 12, 12.0 + s as f64 / 60.0);
            assert_eq!(civil.to_string(), format!("2000-01-01T12:12:{:02}", s));
            let naive = civil.to_naive().unwrap();
            assert_eq!(naive.minute(), 12);
            assert_eq!(naive.second(), s, "second {}", s);
            assert_eq!(naive.nanosecond(), 0);
        }
    }

    #[test]
    fn test_utc_echo_keeps_last_second() {
        let local = CivilDateTime::new(1990, 1, 15, 14, 12.0 + 59.0 / 60.0);
        for zone in ["UTC", "Mars/Olympus_Mons", "Europe/London"] {
            let res = normalize_to_utc(&local, zone, &IanaTimezones);
            assert_eq!(res.utc.to_string(), "1990-01-15T14:12:59", "zone {}", zone);
        }
    }

    #[test]
    fn test_invalid_calendar_date() {
        let civil = CivilDateTime::new(2023, 2, 30, 0, 0.0);
        assert!(matches!(civil.to_naive(), Err(TimezoneError::InvalidDateTime(_))));
    }

    #[test]
    fn test_unknown_zone_falls_back_to_utc() {
        let local = CivilDateTime::new(1990, 5, 17, 8, 15.0);
        let res = normalize_to_utc(&local, "Mars/Olympus_Mons", &IanaTimezones);
        assert!(!res.zone_resolved);
        assert_eq!(res.utc, local);
        assert_eq!(res.offset_seconds, 0);
    }
}
