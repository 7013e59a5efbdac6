//! Integrators

#[macro_use]
extern crate log;

mod common;
mod ppm;

// Re-export.
pub use common::*;
pub use ppm::*;
