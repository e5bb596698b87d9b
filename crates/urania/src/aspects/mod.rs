pub mod calculator;
pub mod types;

pub use calculator::{is_applying, AspectCalculator};
pub use types::{
    Aspect, AspectCatalogue, AspectDefinition, AspectKind, ChartPoint, PointMotion,
    DEFAULT_ORB, DEFAULT_SEXTILE_ORB,
};
