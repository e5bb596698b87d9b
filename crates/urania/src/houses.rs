//! House membership for ecliptic longitudes.
//!
//! Cusps are given in house order 1→12. Raw cusp values are not monotonic:
//! the house that contains 0° Aries has a start cusp greater than its end.

use crate::angles::normalize_full;
use crate::western::signs::SignPlacement;
use serde::{Deserialize, Serialize};

/// One house cusp of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    pub house: u8,
    pub label: String,
    #[serde(serialize_with = "crate::rounding::serialize_round6")]
    pub cusp: f64,
    #[serde(flatten)]
    pub placement: SignPlacement,
    #[serde(rename = "signName")]
    pub sign_name: String,
}

/// House number (1-12) containing `longitude`.
///
/// Houses are half-open: a body exactly on a cusp belongs to the house that
/// starts there. Returns 1 if no house matches, which only happens for cusp
/// sets that do not span the circle.
pub fn assign_house(longitude: f64, cusps: &[f64; 12]) -> u8 {
    let lon = normalize_full(longitude);

    for i in 0..12 {
        let start = normalize_full(cusps[i]);
        let end = normalize_full(cusps[(i + 1) % 12]);

        let inside = if start <= end {
            start <= lon && lon < end
        } else {
            lon >= start || lon < end
        };

        if inside {
            return (i + 1) as u8;
        }
    }

    1
}
