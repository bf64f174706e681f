//! Poisson sampling over a [`tinyrand`] source.

use tinyrand::Rand;

/// Draws one Poisson-distributed count with rate `lambda`, using Knuth's inversion
/// by uniform products. Runtime is proportional to `lambda`, which for football
/// statistics (goals through shots) stays in the low tens.
pub fn sample(lambda: f64, rand: &mut impl Rand) -> u32 {
    debug_assert!(lambda > 0.0 && lambda.is_finite(), "invalid lambda {lambda}");
    let limit = f64::exp(-lambda);
    let mut count = 0;
    let mut product = 1.0;
    loop {
        product *= random_f64(rand);
        if product <= limit {
            return count;
        }
        count += 1;
    }
}

#[inline]
pub fn random_f64(rand: &mut impl Rand) -> f64 {
    rand.next_u64() as f64 / u64::MAX as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyrand::{Seeded, StdRand};

    fn mean_of_samples(lambda: f64, trials: usize) -> f64 {
        let mut rand = StdRand::seed(17);
        let sum: u64 = (0..trials).map(|_| sample(lambda, &mut rand) as u64).sum();
        sum as f64 / trials as f64
    }

    #[test]
    fn sample_mean_tracks_lambda() {
        for lambda in [0.3, 1.45, 2.5, 13.0] {
            let mean = mean_of_samples(lambda, 50_000);
            let relative_error = (mean - lambda).abs() / lambda;
            assert!(
                relative_error < 0.05,
                "lambda={lambda}, mean={mean}, relative_error={relative_error}"
            );
        }
    }

    #[test]
    fn tiny_lambda_rarely_scores() {
        let mean = mean_of_samples(1e-6, 10_000);
        assert!(mean < 0.01);
    }

    #[test]
    fn random_f64_within_unit_interval() {
        let mut rand = StdRand::seed(9);
        for _ in 0..1_000 {
            let value = random_f64(&mut rand);
            assert!((0.0..=1.0).contains(&value));
        }
    }
}
