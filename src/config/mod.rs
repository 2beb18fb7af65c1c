//! Configuration management module
//!
//! This module provides the serde-backed configuration model for the
//! presentation session (advance period and startup leeway) and a manager
//! for loading/saving it as JSON.
//!
//! Missing or corrupt configuration files fall back to defaults rather
//! than failing the session; invalid values (a zero advance period) are
//! rejected by validation before the coordinator is built.

pub mod manager;
pub mod models;

pub use manager::ConfigManager;
pub use models::{SlideshowConfig, TimingConfig};
