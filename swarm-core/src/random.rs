use crate::vector::Vector2D;

/// Uniform scalar randomness consumed by spawning and jitter.
///
/// With the `std` feature every [`rand::Rng`] is a source; embedded targets
/// implement this directly on their own generator.
pub trait RandomSource {
    /// Uniform sample in `[min, max)`. Returns `min` when the range is empty.
    fn range(&mut self, min: f32, max: f32) -> f32;
}

#[cfg(feature = "std")]
impl<R: rand::Rng> RandomSource for R {
    fn range(&mut self, min: f32, max: f32) -> f32 {
        if min < max {
            self.gen_range(min..max)
        } else {
            min
        }
    }
}

/// Random unit vector, uniform over the circle.
pub fn random_heading<R: RandomSource + ?Sized>(rng: &mut R) -> Vector2D {
    Vector2D::from_angle(rng.range(0.0, core::f32::consts::TAU))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_range_stays_in_bounds() {
        let mut rng = SmallRng::seed_from_u64(12345);
        for _ in 0..1000 {
            let value = rng.range(-50.0, 0.0);
            assert!((-50.0..0.0).contains(&value));
        }
    }

    #[test]
    fn test_empty_range_returns_min() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(rng.range(3.0, 3.0), 3.0);
        assert_eq!(rng.range(5.0, 1.0), 5.0);
    }

    #[test]
    fn test_rng_repeatability() {
        let mut rng1 = SmallRng::seed_from_u64(0xBEEF);
        let mut rng2 = SmallRng::seed_from_u64(0xBEEF);
        for _ in 0..100 {
            assert_eq!(rng1.range(0.0, 1.0), rng2.range(0.0, 1.0));
        }
    }

    #[test]
    fn test_random_heading_is_unit() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let heading = random_heading(&mut rng);
            assert!((heading.magnitude() - 1.0).abs() < 1e-5);
        }
    }
}
