//! Seedable Xorshift64 generator.
//!
//! Every random choice an engine makes (ball placement, speed, heading,
//! size) is drawn from one of these, so a seed fully determines an animation.

use serde::{Deserialize, Serialize};

/// Xorshift64 PRNG with shifts (13, 7, 17).
///
/// A zero seed is the algorithm's fixed point and is replaced by a constant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const ZERO_SEED_REPLACEMENT: u64 = 0x1A7A_1A4D_C0FF_EE01;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 {
                Self::ZERO_SEED_REPLACEMENT
            } else {
                seed
            },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform in [0, 1), built from the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// `1.0` or `-1.0` with equal probability.
    pub fn next_sign(&mut self) -> f64 {
        if self.next_f64() > 0.5 {
            1.0
        } else {
            -1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_value_for_seed_42_is_stable() {
        // Changing this value changes every seeded animation.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn zero_seed_does_not_stick_at_zero() {
        let mut rng = Xorshift64::new(0);
        assert!((0..3).all(|_| rng.next_u64() != 0));
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Xorshift64::new(2024);
        let mut b = Xorshift64::new(2024);
        for i in 0..500 {
            assert_eq!(a.next_u64(), b.next_u64(), "diverged at {i}");
        }
    }

    #[test]
    fn next_sign_produces_both_signs() {
        let mut rng = Xorshift64::new(7);
        let signs: Vec<f64> = (0..200).map(|_| rng.next_sign()).collect();
        assert!(signs.iter().all(|s| *s == 1.0 || *s == -1.0));
        assert!(signs.contains(&1.0));
        assert!(signs.contains(&-1.0));
    }

    #[test]
    fn serialized_state_resumes_sequence() {
        let mut rng = Xorshift64::new(99);
        for _ in 0..10 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for _ in 0..20 {
            assert_eq!(rng.next_u64(), restored.next_u64());
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v), "{v} out of [0, 1)");
                }
            }

            #[test]
            fn next_range_in_bounds(seed: u64, min in -1e4_f64..1e4, span in 1e-3_f64..1e4) {
                let max = min + span;
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_range(min, max);
                    prop_assert!(v >= min && v < max, "{v} outside [{min}, {max})");
                }
            }
        }
    }
}
