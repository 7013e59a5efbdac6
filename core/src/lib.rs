//! Core

extern crate bitflags;
#[macro_use]
extern crate hexf;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

// Re-export.
pub mod app;
pub mod base;
pub mod camera;
pub mod film;
pub mod geometry;
pub mod image_io;
pub mod material;
pub mod microfacet;
pub mod reflection;
pub mod rng;
pub mod sampling;
pub mod scene;
pub mod spectrum;
