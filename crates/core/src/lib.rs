#![deny(unsafe_code)]
//! Core types and traits for the lava-lamp renderer.
//!
//! Provides the `Engine` trait, the `Surface` drawing abstraction with a
//! recording and a CPU `Raster` implementation, the `RadialGradient` fill
//! style over `Srgb` colors, the `Xorshift64` PRNG, `Seed`, and
//! parameter helpers.

pub mod color;
pub mod engine;
pub mod error;
pub mod gradient;
pub mod params;
pub mod prng;
pub mod raster;
pub mod seed;
pub mod surface;

pub use color::Srgb;
pub use engine::Engine;
pub use error::EngineError;
pub use gradient::RadialGradient;
pub use prng::Xorshift64;
pub use raster::Raster;
pub use seed::Seed;
pub use surface::{DrawOp, RecordingSurface, Surface};
