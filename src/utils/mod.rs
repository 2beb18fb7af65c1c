//! Utility modules
//!
//! Provides logging initialization with optional file output and startup
//! rotation.

pub mod logging;

pub use logging::init_logging;
