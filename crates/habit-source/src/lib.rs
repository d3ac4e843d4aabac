//! Habit source interface for the habit tracker
//!
//! `loadHabits` fetches through the [`HabitSource`] trait. This crate holds
//! the trait plus the implementations the store can be built with:
//! - [`StaticSource`]: stand-in for a remote call (fixed delay, two habits)
//! - [`FileSource`]: read-only JSON seed file
//! - [`MockSource`]: scriptable source for tests

mod file;
mod fixed;
mod mock;
mod traits;

pub use file::*;
pub use fixed::*;
pub use mock::*;
pub use traits::*;
