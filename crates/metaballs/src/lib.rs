#![deny(unsafe_code)]
//! Metaball lava-lamp engine.
//!
//! A handful of balls bounce around the viewport. Each contributes
//! `size^2 / d^2` to a scalar field sampled on a coarse lattice, and the
//! level set where the field reaches 1 is traced with marching squares and
//! filled with a radial gradient.
//!
//! Module map:
//! - [`ball`]: bouncing influence sources
//! - [`lattice`]: lazily evaluated field with epoch-stamped caching
//! - [`direction`]: the marching-squares case table
//! - [`tracer`]: the contour walk
//! - [`animator`]: per-frame orchestration onto a `Surface`

pub mod animator;
pub mod ball;
pub mod direction;
pub mod lattice;
pub mod tracer;

pub use animator::{FieldAnimator, FrameStats, LATTICE_STEP};
pub use ball::Ball;
pub use lattice::Lattice;
pub use tracer::ContourPath;

use lava_lamp_core::error::EngineError;
use lava_lamp_core::params::{param_color, param_usize};
use lava_lamp_core::prng::Xorshift64;
use lava_lamp_core::surface::Surface;
use lava_lamp_core::{Engine, Srgb};
use serde_json::{json, Value};

/// Default number of balls.
pub const DEFAULT_BALL_COUNT: usize = 6;
/// Default gradient color at the anchor corner.
pub const DEFAULT_INNER_COLOR: Srgb = Srgb {
    r: 0x25 as f64 / 255.0,
    g: 0xCE as f64 / 255.0,
    b: 0xD1 as f64 / 255.0,
};
/// Default gradient color at and beyond the gradient radius.
pub const DEFAULT_OUTER_COLOR: Srgb = Srgb {
    r: 0xEC as f64 / 255.0,
    g: 0x40 as f64 / 255.0,
    b: 0x7A as f64 / 255.0,
};
/// Upper bound on `ball_count`; each ball costs one walk per frame.
pub const MAX_BALL_COUNT: usize = 64;

/// Tunable parameters of the metaball engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetaballParams {
    pub ball_count: usize,
    pub inner_color: Srgb,
    pub outer_color: Srgb,
}

impl Default for MetaballParams {
    fn default() -> Self {
        Self {
            ball_count: DEFAULT_BALL_COUNT,
            inner_color: DEFAULT_INNER_COLOR,
            outer_color: DEFAULT_OUTER_COLOR,
        }
    }
}

impl MetaballParams {
    /// Extracts parameters from a JSON object, falling back to defaults for
    /// missing keys.
    ///
    /// `ball_count` is capped at 64. A color that is present but not a
    /// `#rrggbb` string is an error.
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        Ok(Self {
            ball_count: param_usize(params, "ball_count", DEFAULT_BALL_COUNT).min(MAX_BALL_COUNT),
            inner_color: param_color(params, "inner_color", DEFAULT_INNER_COLOR)?,
            outer_color: param_color(params, "outer_color", DEFAULT_OUTER_COLOR)?,
        })
    }
}

/// The metaball engine: an [`FieldAnimator`] behind the [`Engine`] trait.
#[derive(Debug, Clone)]
pub struct Metaballs {
    animator: FieldAnimator,
    params: MetaballParams,
    frame: u64,
    last_stats: FrameStats,
}

impl Metaballs {
    /// Creates the engine with `params.ball_count` random balls drawn from
    /// `seed`. The count is capped at [`MAX_BALL_COUNT`].
    ///
    /// Returns `EngineError::InvalidDimensions` if width or height is zero.
    pub fn new(
        width: usize,
        height: usize,
        seed: u64,
        params: MetaballParams,
    ) -> Result<Self, EngineError> {
        let params = MetaballParams {
            ball_count: params.ball_count.min(MAX_BALL_COUNT),
            ..params
        };
        let mut rng = Xorshift64::new(seed);
        let balls = (0..params.ball_count)
            .map(|_| Ball::random(&mut rng, width as f64, height as f64))
            .collect();
        let animator =
            FieldAnimator::new(width, height, balls, params.inner_color, params.outer_color)?;
        tracing::debug!(
            width,
            height,
            seed,
            balls = params.ball_count,
            "metaball engine created"
        );
        Ok(Self {
            animator,
            params,
            frame: 0,
            last_stats: FrameStats::default(),
        })
    }

    /// Creates the engine from a JSON params object.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, EngineError> {
        Self::new(width, height, seed, MetaballParams::from_json(json_params)?)
    }

    pub fn animator(&self) -> &FieldAnimator {
        &self.animator
    }

    /// Counters from the most recent frame.
    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }
}

impl Engine for Metaballs {
    fn render_frame(&mut self, surface: &mut dyn Surface) {
        let stats = self.animator.render_frame(surface);
        self.frame += 1;
        self.last_stats = stats;
        tracing::trace!(
            frame = self.frame,
            contours = stats.contours,
            vertices = stats.vertices,
            steps = stats.steps,
            "frame rendered"
        );
    }

    fn resize(&mut self, width: usize, height: usize) -> Result<(), EngineError> {
        self.animator.resize(width, height)?;
        tracing::debug!(width, height, "metaball engine resized");
        Ok(())
    }

    fn viewport(&self) -> (usize, usize) {
        self.animator.viewport()
    }

    fn frame(&self) -> u64 {
        self.frame
    }

    fn params(&self) -> Value {
        json!({
            "ball_count": self.params.ball_count,
            "inner_color": self.params.inner_color.to_hex(),
            "outer_color": self.params.outer_color.to_hex(),
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "ball_count": {
                "type": "integer",
                "default": DEFAULT_BALL_COUNT,
                "min": 0,
                "max": MAX_BALL_COUNT,
                "description": "Number of bouncing balls"
            },
            "inner_color": {
                "type": "color",
                "default": DEFAULT_INNER_COLOR.to_hex(),
                "description": "Gradient color at the bottom-right anchor"
            },
            "outer_color": {
                "type": "color",
                "default": DEFAULT_OUTER_COLOR.to_hex(),
                "description": "Gradient color at one viewport width from the anchor"
            }
        })
    }
}
