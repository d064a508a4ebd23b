//! Per-frame orchestration: move, retrace, fill.

use glam::IVec2;
use lava_lamp_core::error::EngineError;
use lava_lamp_core::gradient::RadialGradient;
use lava_lamp_core::surface::Surface;
use lava_lamp_core::Srgb;

use crate::ball::Ball;
use crate::lattice::Lattice;
use crate::tracer::{trace, ContourPath};

/// Lattice spacing in pixels.
pub const LATTICE_STEP: f64 = 5.0;

/// Counters for one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Contours that produced at least one vertex and were filled.
    pub contours: usize,
    /// Vertices across all filled contours.
    pub vertices: usize,
    /// Cells walked across all traces.
    pub steps: usize,
    /// Walks cut off by the step cap.
    pub capped: usize,
}

/// Owns the balls and the lattice and draws one frame at a time.
#[derive(Debug, Clone)]
pub struct FieldAnimator {
    balls: Vec<Ball>,
    lattice: Lattice,
    gradient: RadialGradient,
    path: ContourPath,
    width: usize,
    height: usize,
}

impl FieldAnimator {
    /// Returns `EngineError::InvalidDimensions` for a zero-sized viewport.
    pub fn new(
        width: usize,
        height: usize,
        balls: Vec<Ball>,
        inner: Srgb,
        outer: Srgb,
    ) -> Result<Self, EngineError> {
        let lattice = Lattice::new(width, height, LATTICE_STEP)?;
        Ok(Self {
            balls,
            lattice,
            gradient: RadialGradient::for_viewport(width as f64, height as f64, inner, outer),
            path: ContourPath::new(),
            width,
            height,
        })
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn gradient(&self) -> &RadialGradient {
        &self.gradient
    }

    pub fn viewport(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Advances the animation one frame and draws it onto `surface`.
    ///
    /// Clears the viewport, moves every ball, flips the field polarity, then
    /// walks one contour per ball starting from the lattice cell nearest its
    /// center. Each walk that produced vertices is filled with the gradient.
    /// A ball whose blob was already traced this frame yields nothing.
    pub fn render_frame(&mut self, surface: &mut dyn Surface) -> FrameStats {
        surface.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
        for ball in &mut self.balls {
            ball.advance();
        }
        self.lattice.begin_iteration();

        let mut stats = FrameStats::default();
        surface.begin_path();
        for ball in &self.balls {
            self.path.clear();
            let seed = (ball.pos() / self.lattice.step()).round();
            let seed = IVec2::new(seed.x as i32, seed.y as i32);
            let outcome = trace(&mut self.lattice, &self.balls, seed, &mut self.path);
            stats.steps += outcome.steps;
            stats.capped += usize::from(outcome.capped);

            if self.path.is_empty() {
                continue;
            }
            for &v in self.path.vertices() {
                surface.line_to(v);
            }
            surface.fill(&self.gradient);
            surface.close_path();
            surface.begin_path();
            stats.contours += 1;
            stats.vertices += self.path.len();
        }
        stats
    }

    /// Adapts to a new viewport.
    ///
    /// The lattice is rebuilt with a bumped epoch, balls are rescaled into
    /// the new box, and the gradient is re-anchored. On error nothing changes.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), EngineError> {
        self.lattice.rebuild(width, height)?;
        for ball in &mut self.balls {
            ball.rescale(width as f64, height as f64);
        }
        self.gradient = RadialGradient::for_viewport(
            width as f64,
            height as f64,
            self.gradient.inner,
            self.gradient.outer,
        );
        self.width = width;
        self.height = height;
        Ok(())
    }
}
