use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Zero-mean Gaussian noise whose standard deviation scales with the reading.
///
/// Seeded, so two sessions with the same seed see the same noise sequence.
#[derive(Debug, Clone)]
pub struct GaussianNoise {
    rng: ChaCha8Rng,
    factor: f32,
}

impl GaussianNoise {
    pub fn new(seed: u64, factor: f32) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), factor: factor.max(0.0) }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Perturb `distance` and clamp the result back into `[0, max_range]`.
    pub fn apply(&mut self, distance: f32, max_range: f32) -> f32 {
        let sigma = self.factor * distance;
        if sigma.is_nan() || sigma <= 0.0 {
            return distance.clamp(0.0, max_range);
        }
        match Normal::new(0.0f32, sigma) {
            Ok(normal) => (distance + normal.sample(&mut self.rng)).clamp(0.0, max_range),
            Err(_) => distance.clamp(0.0, max_range),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_stays_in_range() {
        let mut noise = GaussianNoise::new(1, 0.5);
        for _ in 0..500 {
            let v = noise.apply(9.5, 10.0);
            assert!((0.0..=10.0).contains(&v));
        }
    }

    #[test]
    fn test_noise_varies_and_is_seeded() {
        let mut a = GaussianNoise::new(3, 0.05);
        let mut b = GaussianNoise::new(3, 0.05);
        let xs: Vec<f32> = (0..10).map(|_| a.apply(5.0, 10.0)).collect();
        let ys: Vec<f32> = (0..10).map(|_| b.apply(5.0, 10.0)).collect();
        assert_eq!(xs, ys);

        let spread = xs.iter().cloned().fold(f32::MIN, f32::max)
            - xs.iter().cloned().fold(f32::MAX, f32::min);
        assert!(spread > 0.0);
    }

    #[test]
    fn test_zero_factor_is_identity() {
        let mut noise = GaussianNoise::new(1, 0.0);
        assert_eq!(noise.apply(4.2, 10.0), 4.2);
        // zero reading has zero sigma
        let mut noise = GaussianNoise::new(1, 0.1);
        assert_eq!(noise.apply(0.0, 10.0), 0.0);
    }
}
