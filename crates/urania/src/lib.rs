//! Natal chart engine.
//!
//! Converts a local birth moment into Universal Time, queries an
//! [`ephemeris::EphemerisProvider`] for bodies and house cusps, and derives
//! sign placements, house membership and aspects from the results.

pub mod angles;
pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod houses;
pub mod time;
pub mod western;

mod rounding;

pub use chart::{BirthData, BirthRequest, ChartAssembler, ChartError, ChartResult, ChartSettings};
pub use ephemeris::{Body, EphemerisProvider, SwissEphemerisAdapter};
pub use time::{IanaTimezones, TimezoneDatabase};
