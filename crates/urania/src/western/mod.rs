pub mod catalogue;
pub mod signs;

pub use catalogue::{Catalogue, Locale, CATALOGUE_VERSION};
pub use signs::{Dms, SignPlacement, ZodiacSign, SIGN_SPAN};
