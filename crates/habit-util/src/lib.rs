//! Shared utilities for the habit tracker
//!
//! This crate provides:
//! - ID types (HabitId)
//! - Clock helpers (local now, today, epoch millis, a debug-only clock shift)
//! - Error types for input parsing at the presentation boundary
//! - Default paths for the configuration file

mod error;
mod ids;
mod paths;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
