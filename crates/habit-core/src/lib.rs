//! Core state container for the habit tracker
//!
//! This crate provides:
//! - Reducers for the habits and debug slices
//! - Memoized statistics selectors
//! - The dispatch middleware chain and the action logger
//! - [`Store`], which ties them together with the async habit load

mod debug;
mod habits;
mod middleware;
mod selectors;
mod store;

pub use debug::*;
pub use habits::*;
pub use middleware::*;
pub use selectors::*;
pub use store::*;
