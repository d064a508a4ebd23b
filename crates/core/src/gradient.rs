//! Radial gradient fill style.
//!
//! Mirrors the two-stop radial gradient a 2D canvas builds with
//! `createRadialGradient(cx, cy, 0, cx, cy, r)`: the inner color sits at the
//! center and the outer color at `radius` and beyond.

use glam::DVec2;

use crate::color::Srgb;

/// A two-stop radial gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub center: DVec2,
    pub radius: f64,
    pub inner: Srgb,
    pub outer: Srgb,
}

impl RadialGradient {
    pub fn new(center: DVec2, radius: f64, inner: Srgb, outer: Srgb) -> Self {
        Self {
            center,
            radius,
            inner,
            outer,
        }
    }

    /// The lamp's fill: anchored at the bottom-right corner of the viewport
    /// with a radius equal to the viewport width.
    pub fn for_viewport(width: f64, height: f64, inner: Srgb, outer: Srgb) -> Self {
        Self::new(DVec2::new(width, height), width, inner, outer)
    }

    /// Gradient parameter in [0, 1] at `point`.
    ///
    /// A zero radius collapses the gradient to its outer color.
    pub fn offset_at(&self, point: DVec2) -> f64 {
        if self.radius <= 0.0 {
            return 1.0;
        }
        (point.distance(self.center) / self.radius).clamp(0.0, 1.0)
    }

    /// Color at `point`.
    pub fn color_at(&self, point: DVec2) -> Srgb {
        self.inner.mix(self.outer, self.offset_at(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp() -> RadialGradient {
        RadialGradient::for_viewport(
            800.0,
            600.0,
            Srgb::from_hex("#25ced1").unwrap(),
            Srgb::from_hex("#ec407a").unwrap(),
        )
    }

    #[test]
    fn for_viewport_anchors_at_bottom_right() {
        let g = lamp();
        assert_eq!(g.center, DVec2::new(800.0, 600.0));
        assert_eq!(g.radius, 800.0);
    }

    #[test]
    fn center_uses_inner_color() {
        let g = lamp();
        assert_eq!(g.offset_at(g.center), 0.0);
        assert_eq!(g.color_at(g.center).to_rgb8(), [0x25, 0xce, 0xd1]);
    }

    #[test]
    fn beyond_radius_uses_outer_color() {
        let g = lamp();
        let far = DVec2::new(-1000.0, -1000.0);
        assert_eq!(g.offset_at(far), 1.0);
        assert_eq!(g.color_at(far).to_rgb8(), [0xec, 0x40, 0x7a]);
    }

    #[test]
    fn offset_grows_with_distance() {
        let g = lamp();
        let near = g.offset_at(DVec2::new(700.0, 600.0));
        let mid = g.offset_at(DVec2::new(400.0, 600.0));
        assert!(near < mid, "{near} should be < {mid}");
        assert!((mid - 0.5).abs() < 1e-12);
    }

    #[test]
    fn equal_stops_give_that_color_exactly() {
        let white = Srgb::from_hex("#ffffff").unwrap();
        let g = RadialGradient::for_viewport(40.0, 30.0, white, white);
        for p in [g.center, DVec2::new(0.0, 0.0), DVec2::new(17.3, 4.9)] {
            assert_eq!(g.color_at(p), white, "at {p:?}");
        }
    }

    #[test]
    fn midpoint_blends_channels_linearly() {
        let g = RadialGradient::for_viewport(
            100.0,
            100.0,
            Srgb::BLACK,
            Srgb::from_hex("#ffffff").unwrap(),
        );
        let c = g.color_at(DVec2::new(50.0, 100.0));
        assert_eq!(c.to_rgb8(), [128, 128, 128]);
    }

    #[test]
    fn zero_radius_is_outer_everywhere() {
        let mut g = lamp();
        g.radius = 0.0;
        assert_eq!(g.offset_at(g.center), 1.0);
    }
}
