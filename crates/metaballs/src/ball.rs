//! Bouncing influence sources.

use glam::DVec2;
use lava_lamp_core::prng::Xorshift64;

/// Lower bound of the horizontal and vertical speed.
const MIN_SPEED: f64 = 0.2;
/// Random spread added to the horizontal speed.
const SPEED_SPREAD_X: f64 = 0.25;
/// Random spread added to the vertical speed. Balls drift up and down faster
/// than sideways.
const SPEED_SPREAD_Y: f64 = 1.0;
/// Size multiplier range, in units of `min(width, height) / 15`.
const MIN_SIZE: f64 = 0.1;
const MAX_SIZE: f64 = 1.5;
/// Fraction of the viewport kept free on each side when placing balls.
const PLACEMENT_MARGIN: f64 = 0.2;

/// A circular influence source bouncing inside a `width x height` box.
///
/// After construction and after every [`Ball::advance`] the center satisfies
/// `size <= x <= width - size` and `size <= y <= height - size`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pos: DVec2,
    vel: DVec2,
    size: f64,
    bounds: DVec2,
}

impl Ball {
    /// Creates a ball and clamps its position into the legal band.
    pub fn new(pos: DVec2, vel: DVec2, size: f64, width: f64, height: f64) -> Self {
        let mut ball = Self {
            pos,
            vel,
            size: size.max(0.0),
            bounds: DVec2::new(width, height),
        };
        ball.pos = ball.clamp_to_band(ball.pos);
        ball
    }

    /// A ball with random heading, speed, size, and a position in the inner
    /// 60% of the viewport.
    pub fn random(rng: &mut Xorshift64, width: f64, height: f64) -> Self {
        let unit = width.min(height) / 15.0;
        let vel = DVec2::new(
            rng.next_sign() * (MIN_SPEED + SPEED_SPREAD_X * rng.next_f64()),
            rng.next_sign() * (MIN_SPEED + SPEED_SPREAD_Y * rng.next_f64()),
        );
        let inner = 1.0 - 2.0 * PLACEMENT_MARGIN;
        let pos = DVec2::new(
            PLACEMENT_MARGIN * width + rng.next_f64() * width * inner,
            PLACEMENT_MARGIN * height + rng.next_f64() * height * inner,
        );
        let size = unit + rng.next_range(MIN_SIZE, MAX_SIZE) * unit;
        Self::new(pos, vel, size, width, height)
    }

    pub fn pos(&self) -> DVec2 {
        self.pos
    }

    pub fn vel(&self) -> DVec2 {
        self.vel
    }

    /// Radius-like strength of the source.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// `(width, height)` of the box the ball bounces in.
    pub fn bounds(&self) -> DVec2 {
        self.bounds
    }

    /// Moves by one velocity step, bouncing off the walls.
    ///
    /// Each axis is handled on its own: a step that would reach a wall lands
    /// on the wall, and the velocity component flips only if it still points
    /// outward.
    pub fn advance(&mut self) {
        let next = self.pos + self.vel;
        let (x, vx) = bounce(next.x, self.vel.x, self.size, self.bounds.x);
        let (y, vy) = bounce(next.y, self.vel.y, self.size, self.bounds.y);
        self.pos = DVec2::new(x, y);
        self.vel = DVec2::new(vx, vy);
    }

    /// Moves the ball into a resized box.
    ///
    /// Position scales with the box and size with its shorter side, so the
    /// scene keeps its composition; velocity is unchanged.
    pub fn rescale(&mut self, width: f64, height: f64) {
        let old = self.bounds;
        let new = DVec2::new(width, height);
        if old.x > 0.0 && old.y > 0.0 {
            self.pos *= new / old;
            let old_short = old.x.min(old.y);
            if old_short > 0.0 {
                self.size *= new.x.min(new.y) / old_short;
            }
        }
        self.bounds = new;
        self.pos = self.clamp_to_band(self.pos);
    }

    fn clamp_to_band(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            clamp_axis(p.x, self.size, self.bounds.x),
            clamp_axis(p.y, self.size, self.bounds.y),
        )
    }
}

/// Clamps `v` into `[size, extent - size]`, or to the midpoint when the box
/// is narrower than the ball.
fn clamp_axis(v: f64, size: f64, extent: f64) -> f64 {
    let (lo, hi) = (size, extent - size);
    if lo > hi {
        return extent / 2.0;
    }
    if v.is_nan() {
        return lo;
    }
    v.clamp(lo, hi)
}

fn bounce(next: f64, vel: f64, size: f64, extent: f64) -> (f64, f64) {
    let (lo, hi) = (size, extent - size);
    if lo > hi {
        return (extent / 2.0, vel);
    }
    if next >= hi {
        (hi, if vel > 0.0 { -vel } else { vel })
    } else if next <= lo {
        (lo, if vel < 0.0 { -vel } else { vel })
    } else {
        (next, vel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_band(b: &Ball) -> bool {
        let p = b.pos();
        let s = b.size();
        let bounds = b.bounds();
        p.x >= s && p.x <= bounds.x - s && p.y >= s && p.y <= bounds.y - s
    }

    #[test]
    fn resting_ball_stays_put() {
        let mut b = Ball::new(DVec2::new(50.0, 40.0), DVec2::ZERO, 10.0, 100.0, 80.0);
        for _ in 0..10 {
            b.advance();
        }
        assert_eq!(b.pos(), DVec2::new(50.0, 40.0));
    }

    #[test]
    fn advance_moves_by_velocity() {
        let mut b = Ball::new(
            DVec2::new(50.0, 40.0),
            DVec2::new(1.5, -0.5),
            10.0,
            100.0,
            80.0,
        );
        b.advance();
        assert_eq!(b.pos(), DVec2::new(51.5, 39.5));
        assert_eq!(b.vel(), DVec2::new(1.5, -0.5));
    }

    #[test]
    fn hitting_right_wall_clamps_and_flips_x_only() {
        let mut b = Ball::new(DVec2::new(89.5, 40.0), DVec2::new(1.0, 0.3), 10.0, 100.0, 80.0);
        b.advance();
        assert_eq!(b.pos().x, 90.0);
        assert_eq!(b.vel(), DVec2::new(-1.0, 0.3));
        b.advance();
        assert_eq!(b.pos().x, 89.0);
    }

    #[test]
    fn hitting_top_wall_flips_y_magnitude_preserved() {
        let mut b = Ball::new(DVec2::new(50.0, 10.5), DVec2::new(0.0, -0.75), 10.0, 100.0, 80.0);
        b.advance();
        assert_eq!(b.pos().y, 10.0);
        assert_eq!(b.vel().y, 0.75);
    }

    #[test]
    fn inward_velocity_at_wall_is_not_flipped_again() {
        // Already on the wall and moving away from it: no double inversion.
        let mut b = Ball::new(DVec2::new(10.0, 40.0), DVec2::new(0.5, 0.0), 10.0, 100.0, 80.0);
        b.advance();
        assert_eq!(b.vel().x, 0.5);
        assert_eq!(b.pos().x, 10.5);
    }

    #[test]
    fn new_clamps_out_of_band_positions() {
        let b = Ball::new(DVec2::new(-30.0, 500.0), DVec2::ZERO, 5.0, 100.0, 80.0);
        assert_eq!(b.pos(), DVec2::new(5.0, 75.0));
    }

    #[test]
    fn oversized_ball_is_centered() {
        let mut b = Ball::new(DVec2::new(3.0, 3.0), DVec2::new(1.0, 1.0), 30.0, 40.0, 40.0);
        assert_eq!(b.pos(), DVec2::new(20.0, 20.0));
        b.advance();
        assert_eq!(b.pos(), DVec2::new(20.0, 20.0));
    }

    #[test]
    fn random_ball_matches_construction_ranges() {
        let mut rng = Xorshift64::new(11);
        let (w, h) = (800.0, 600.0);
        let unit = 600.0 / 15.0;
        for _ in 0..200 {
            let b = Ball::random(&mut rng, w, h);
            let v = b.vel();
            assert!((0.2..0.45).contains(&v.x.abs()), "vx {}", v.x);
            assert!((0.2..1.2).contains(&v.y.abs()), "vy {}", v.y);
            assert!(b.size() >= unit * 1.1 && b.size() < unit * 2.5);
            assert!(in_band(&b));
            assert!(b.pos().x >= 0.2 * w && b.pos().x <= 0.8 * w);
        }
    }

    #[test]
    fn rescale_keeps_relative_position_and_band() {
        let mut b = Ball::new(DVec2::new(400.0, 300.0), DVec2::new(0.3, 0.3), 60.0, 800.0, 600.0);
        b.rescale(400.0, 300.0);
        assert_eq!(b.pos(), DVec2::new(200.0, 150.0));
        assert_eq!(b.size(), 30.0);
        assert_eq!(b.bounds(), DVec2::new(400.0, 300.0));
        assert!(in_band(&b));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn advance_keeps_ball_in_band(
                seed: u64,
                w in 60.0_f64..2000.0,
                h in 60.0_f64..2000.0,
                frames in 1_usize..400,
            ) {
                let mut rng = Xorshift64::new(seed);
                let mut b = Ball::random(&mut rng, w, h);
                for frame in 0..frames {
                    let speed = b.vel().abs();
                    b.advance();
                    prop_assert!(in_band(&b), "left band at frame {frame}: {:?}", b);
                    prop_assert_eq!(b.vel().abs(), speed);
                }
            }

            #[test]
            fn rescale_keeps_ball_in_band(
                seed: u64,
                w in 60.0_f64..2000.0,
                h in 60.0_f64..2000.0,
                nw in 60.0_f64..2000.0,
                nh in 60.0_f64..2000.0,
            ) {
                let mut rng = Xorshift64::new(seed);
                let mut b = Ball::random(&mut rng, w, h);
                b.rescale(nw, nh);
                prop_assert!(in_band(&b));
            }
        }
    }
}
