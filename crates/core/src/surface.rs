//! The drawing surface a host hands to an engine each frame.
//!
//! The operations are the subset of a 2D canvas context the renderer needs.
//! Engines never hold on to a surface; it is passed into every frame, which
//! keeps the geometry code free of any graphics backend.

use glam::DVec2;

use crate::gradient::RadialGradient;

/// Path-filling drawing surface.
///
/// The trait is object-safe so hosts can pass `&mut dyn Surface`.
pub trait Surface {
    /// Resets the rectangle `(x, y, width, height)` to the background.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Discards the current path and starts a new, empty one.
    fn begin_path(&mut self);

    /// Appends a vertex to the current path. The first vertex of a path
    /// starts its subpath, as it does on a canvas.
    fn line_to(&mut self, point: DVec2);

    /// Closes the current subpath back to its first vertex.
    fn close_path(&mut self);

    /// Fills the current path with `style`.
    fn fill(&mut self, style: &RadialGradient);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    ClearRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    BeginPath,
    LineTo(DVec2),
    ClosePath,
    Fill,
}

/// A surface that records every call, for tests and for tooling that wants
/// the geometry without pixels.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// The vertex lists that were filled, in fill order.
    ///
    /// Each entry holds the `line_to` vertices accumulated since the last
    /// `begin_path` before a `fill`.
    pub fn filled_paths(&self) -> Vec<Vec<DVec2>> {
        let mut paths = Vec::new();
        let mut current = Vec::new();
        for op in &self.ops {
            match op {
                DrawOp::BeginPath => current.clear(),
                DrawOp::LineTo(p) => current.push(*p),
                DrawOp::Fill => paths.push(current.clone()),
                DrawOp::ClearRect { .. } | DrawOp::ClosePath => {}
            }
        }
        paths
    }

    pub fn fill_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == DrawOp::Fill).count()
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn line_to(&mut self, point: DVec2) {
        self.ops.push(DrawOp::LineTo(point));
    }

    fn close_path(&mut self) {
        self.ops.push(DrawOp::ClosePath);
    }

    fn fill(&mut self, _style: &RadialGradient) {
        self.ops.push(DrawOp::Fill);
    }
}
