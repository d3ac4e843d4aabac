//! Domain types and actions for the habit tracker
//!
//! This crate defines the vocabulary shared by the store and its consumers:
//! - Habits and their derived statistics
//! - Actions (the only way to request state changes) and their type identifiers
//! - Action log entries and the case-insensitive log filter

mod actions;
mod log;
mod types;

pub use actions::*;
pub use log::*;
pub use types::*;
