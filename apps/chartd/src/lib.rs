//! HTTP front end for the natal chart engine.

pub mod router;

pub use router::{router, AppState};
