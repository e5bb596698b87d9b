pub mod assembler;
pub mod request;
pub mod result;
pub mod settings;

pub use assembler::{BodyOutcome, ChartAssembler};
pub use request::{BirthData, BirthRequest, Coordinate, InputError};
pub use result::{AngularPoint, BirthInfo, ChartAspect, ChartResult, FailedBody, PlacedBody};
pub use settings::ChartSettings;

use crate::ephemeris::EphemerisError;
use thiserror::Error;

/// Errors that abort a chart
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("Failed to calculate houses: {0}")]
    Houses(#[source] EphemerisError),
}
