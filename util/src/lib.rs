//! Utility library for the Simu-Marty software

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod convert;
pub mod host;
pub mod logger;
pub mod params;
pub mod routine;
pub mod session;
pub mod time;

// ---------------------------------------------------------------------------
// REEXPORTS
// ---------------------------------------------------------------------------

pub use ric_if;
