#![deny(unsafe_code)]
//! Engine registry: maps engine names to implementations and provides CPU-side
//! snapshot rendering.
//!
//! This crate sits between `lava-lamp-core` (which defines the `Engine` trait)
//! and the engine crates (`lava-lamp-metaballs`). The CLI goes through it so
//! name-based dispatch lives in one place.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use lava_lamp_core::error::EngineError;
use lava_lamp_core::raster::Raster;
use lava_lamp_core::seed::Seed;
use lava_lamp_core::surface::Surface;
use lava_lamp_core::{Engine, Srgb};
use serde_json::Value;

/// All available engine names.
const ENGINE_NAMES: &[&str] = &["metaballs"];

/// Enumeration of all available engines.
///
/// Wraps each engine implementation and delegates `Engine` trait methods.
/// Use [`EngineKind::from_name`] for string-based construction.
#[derive(Debug, Clone)]
pub enum EngineKind {
    /// Metaball lava lamp.
    Metaballs(lava_lamp_metaballs::Metaballs),
}

impl EngineKind {
    /// Constructs an engine by name.
    ///
    /// Returns `EngineError::UnknownEngine` if the name is not recognized.
    pub fn from_name(
        name: &str,
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, EngineError> {
        match name {
            "metaballs" => Ok(EngineKind::Metaballs(
                lava_lamp_metaballs::Metaballs::from_json(width, height, seed, params)?,
            )),
            _ => Err(EngineError::UnknownEngine(name.to_string())),
        }
    }

    /// Validates `seed` and constructs the engine it names.
    pub fn from_seed(seed: &Seed) -> Result<Self, EngineError> {
        seed.validate()?;
        Self::from_name(&seed.engine, seed.width, seed.height, seed.seed, &seed.params)
    }

    /// Returns a slice of all recognized engine names.
    pub fn list_engines() -> &'static [&'static str] {
        ENGINE_NAMES
    }
}

impl Engine for EngineKind {
    fn render_frame(&mut self, surface: &mut dyn Surface) {
        match self {
            EngineKind::Metaballs(e) => e.render_frame(surface),
        }
    }

    fn resize(&mut self, width: usize, height: usize) -> Result<(), EngineError> {
        match self {
            EngineKind::Metaballs(e) => e.resize(width, height),
        }
    }

    fn viewport(&self) -> (usize, usize) {
        match self {
            EngineKind::Metaballs(e) => e.viewport(),
        }
    }

    fn frame(&self) -> u64 {
        match self {
            EngineKind::Metaballs(e) => e.frame(),
        }
    }

    fn params(&self) -> Value {
        match self {
            EngineKind::Metaballs(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EngineKind::Metaballs(e) => e.param_schema(),
        }
    }
}

/// Builds the engine `seed` names and renders `seed.frames` frames onto a
/// fresh raster, returning the raster as it looks after the last frame.
///
/// With zero frames the raster is left at `background`.
pub fn render_seed(seed: &Seed, background: Srgb) -> Result<Raster, EngineError> {
    let mut engine = EngineKind::from_seed(seed)?;
    let mut raster = Raster::new(seed.width, seed.height, background)?;
    for _ in 0..seed.frames {
        engine.render_frame(&mut raster);
    }
    Ok(raster)
}
