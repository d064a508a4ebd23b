//! CPU [`Surface`] that rasterizes filled paths into an sRGB pixel grid.
//!
//! Filling follows the canvas default: the current path is implicitly closed
//! and pixels whose centers have a non-zero winding number are painted. Each
//! painted pixel is shaded from the fill gradient at its center.

use glam::DVec2;

use crate::color::Srgb;
use crate::error::EngineError;
use crate::gradient::RadialGradient;
use crate::surface::Surface;

#[derive(Debug, Clone)]
struct Subpath {
    points: Vec<DVec2>,
    closed: bool,
}

/// Row-major sRGB pixel buffer implementing [`Surface`].
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    background: Srgb,
    pixels: Vec<Srgb>,
    path: Vec<Subpath>,
}

impl Raster {
    /// Creates a raster filled with `background`.
    ///
    /// Returns `EngineError::InvalidDimensions` if either dimension is zero
    /// or `width * height` overflows.
    pub fn new(width: usize, height: usize, background: Srgb) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(EngineError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            background,
            pixels: vec![background; len],
            path: Vec::new(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn background(&self) -> Srgb {
        self.background
    }

    /// Row-major pixels.
    pub fn pixels(&self) -> &[Srgb] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the raster.
    pub fn get(&self, x: usize, y: usize) -> Option<Srgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Number of pixels that differ from the background.
    pub fn painted_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != self.background).count()
    }

    /// Clamps a half-open span `[lo, hi)` in pixel units to `0..limit`.
    fn pixel_span(lo: f64, hi: f64, limit: usize) -> (usize, usize) {
        let clamp = |v: f64| {
            if v.is_nan() {
                0
            } else {
                v.clamp(0.0, limit as f64) as usize
            }
        };
        (clamp(lo), clamp(hi))
    }

    /// Signed edge crossings of the horizontal line `y`, sorted by x.
    fn crossings(&self, y: f64) -> Vec<(f64, i32)> {
        let mut hits = Vec::new();
        for sub in &self.path {
            let n = sub.points.len();
            if n < 2 {
                continue;
            }
            for i in 0..n {
                let a = sub.points[i];
                let b = sub.points[(i + 1) % n];
                if a.y == b.y {
                    continue;
                }
                let (lo, hi) = if a.y < b.y { (a.y, b.y) } else { (b.y, a.y) };
                if y < lo || y >= hi {
                    continue;
                }
                let x = a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y);
                hits.push((x, if b.y > a.y { 1 } else { -1 }));
            }
        }
        hits.sort_by(|l, r| l.0.total_cmp(&r.0));
        hits
    }
}

impl Surface for Raster {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (x0, x1) = Self::pixel_span(x.floor(), (x + width).ceil(), self.width);
        let (y0, y1) = Self::pixel_span(y.floor(), (y + height).ceil(), self.height);
        for row in y0..y1 {
            let start = row * self.width;
            self.pixels[start + x0..start + x1].fill(self.background);
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn line_to(&mut self, point: DVec2) {
        if !point.is_finite() {
            return;
        }
        match self.path.last_mut() {
            Some(sub) if !sub.closed => sub.points.push(point),
            _ => self.path.push(Subpath {
                points: vec![point],
                closed: false,
            }),
        }
    }

    fn close_path(&mut self) {
        if let Some(sub) = self.path.last_mut() {
            sub.closed = true;
        }
    }

    fn fill(&mut self, style: &RadialGradient) {
        for row in 0..self.height {
            let y = row as f64 + 0.5;
            let hits = self.crossings(y);
            let mut winding = 0;
            for pair in hits.windows(2) {
                winding += pair[0].1;
                if winding == 0 {
                    continue;
                }
                // Pixel centers px + 0.5 inside [x_left, x_right).
                let (x0, x1) =
                    Self::pixel_span((pair[0].0 - 0.5).ceil(), (pair[1].0 - 0.5).ceil(), self.width);
                let start = row * self.width;
                for px in x0..x1 {
                    let center = DVec2::new(px as f64 + 0.5, y);
                    self.pixels[start + px] = style.color_at(center);
                }
            }
        }
    }
}
