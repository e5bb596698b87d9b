pub mod adapter;
pub mod types;

pub use adapter::{EphemerisConfig, SwissEphemerisAdapter};
pub use types::{
    Body, BodyPosition, EphemerisError, EphemerisProvider, HouseFrame, HouseSystem,
};
