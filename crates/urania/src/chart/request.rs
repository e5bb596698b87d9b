//! Birth input parsing.
//!
//! Raw input is validated in full before any computation starts.

use crate::time::{CivilDateTime, DEFAULT_ZONE};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Missing required field: {0}")]
    Missing(&'static str),
    #[error("Invalid birth date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid birth time '{0}': expected HH:MM or HH:MM:SS")]
    InvalidTime(String),
    #[error("Invalid {field} '{value}': expected a number")]
    InvalidCoordinate { field: &'static str, value: String },
    #[error("{field} {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Coordinates arrive either as JSON numbers or numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn parse(&self, field: &'static str, min: f64, max: f64) -> Result<f64, InputError> {
        let value = match self {
            Coordinate::Number(n) => *n,
            Coordinate::Text(s) => s.trim().parse::<f64>().map_err(|_| InputError::InvalidCoordinate {
                field,
                value: s.clone(),
            })?,
        };
        if !value.is_finite() {
            return Err(InputError::InvalidCoordinate { field, value: value.to_string() });
        }
        if value < min || value > max {
            return Err(InputError::OutOfRange { field, value, min, max });
        }
        Ok(value)
    }
}

/// Birth input as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthRequest {
    pub birth_date: Option<String>,
    pub birth_time: Option<String>,
    pub latitude: Option<Coordinate>,
    pub longitude: Option<Coordinate>,
    pub timezone: Option<String>,
}

/// Validated birth input.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthData {
    pub date: String,
    pub time: String,
    pub local: CivilDateTime,
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl BirthData {
    pub fn parse(request: &BirthRequest) -> Result<Self, InputError> {
        let date_text = request.birth_date.as_deref().ok_or(InputError::Missing("birthDate"))?;
        let time_text = request.birth_time.as_deref().ok_or(InputError::Missing("birthTime"))?;
        let latitude = request
            .latitude
            .as_ref()
            .ok_or(InputError::Missing("latitude"))?
            .parse("latitude", -90.0, 90.0)?;
        let longitude = request
            .longitude
            .as_ref()
            .ok_or(InputError::Missing("longitude"))?
            .parse("longitude", -180.0, 180.0)?;

        let date = NaiveDate::parse_from_str(date_text.trim(), "%Y-%m-%d")
            .map_err(|_| InputError::InvalidDate(date_text.to_string()))?;
        let (hour, minute) = parse_time(time_text)?;

        let timezone = request
            .timezone
            .as_deref()
            .map(str::trim)
            .filter(|tz| !tz.is_empty())
            .unwrap_or(DEFAULT_ZONE)
            .to_string();

        Ok(Self {
            date: date_text.trim().to_string(),
            time: time_text.trim().to_string(),
            local: CivilDateTime::new(date.year(), date.month(), date.day(), hour, minute),
            timezone,
            latitude,
            longitude,
        })
    }
}

/// "HH:MM" or "HH:MM:SS[.fff]"; seconds fold into the minute.
fn parse_time(text: &str) -> Result<(u32, f64), InputError> {
    let invalid = || InputError::InvalidTime(text.to_string());
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(invalid());
    }

    if !all_digits(parts[0]) || !all_digits(parts[1]) {
        return Err(invalid());
    }
    let hour: u32 = parts[0].parse().map_err(|_| invalid())?;
    let minute: u32 = parts[1].parse().map_err(|_| invalid())?;
    let second: f64 = match parts.get(2) {
        Some(s) => {
            let (whole, fraction) = s.split_once('.').unwrap_or((*s, "0"));
            if !all_digits(whole) || !all_digits(fraction) {
                return Err(invalid());
            }
            s.parse().map_err(|_| invalid())?
        }
        None => 0.0,
    };

    if hour > 23 || minute > 59 || !(0.0..60.0).contains(&second) {
        return Err(invalid());
    }

    Ok((hour, minute as f64 + second / 60.0))
}

fn all_digits(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}
