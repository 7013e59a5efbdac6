//! Numeric base types shared by every module.

mod axis;
mod common;

// Re-export
pub use axis::*;
pub use common::*;
