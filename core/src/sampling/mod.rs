//! Sampling

mod common;
mod sampled_direction;

// Re-export
pub use common::*;
pub use sampled_direction::*;
