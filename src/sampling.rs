//! Shared sampling utilities
//!
//! All statistical draws used by the generators live here so there is exactly
//! one weighted-choice algorithm, one Gaussian wrapper, and one Poisson
//! wrapper to test. Every function takes an injected `Rng`; nothing in this
//! crate ever reseeds or reads a global generator.

use crate::{CityPulseError, Result};
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand_distr::{Normal, Poisson};

/// Pick one entry from an ordered set of `(value, weight)` pairs.
///
/// Weights need not sum to 1; entries with weight 0 are unreachable. Fails if
/// the slice is empty or the weights are degenerate (all zero, negative, or
/// non-finite).
pub fn weighted_choice<'a, T, R>(rng: &mut R, choices: &'a [(T, f64)]) -> Result<&'a T>
where
    R: Rng + ?Sized,
{
    let dist = WeightedIndex::new(choices.iter().map(|(_, weight)| *weight))
        .map_err(|e| CityPulseError::validation(format!("invalid categorical weights: {e}")))?;
    Ok(&choices[dist.sample(rng)].0)
}

/// Draw from a normal distribution with the given mean and spread.
///
/// A non-positive spread degenerates to the mean rather than failing; the
/// callers that hit this path are clamping a configured spread, not handling
/// a runtime error.
pub fn gaussian<R>(rng: &mut R, mean: f64, std_dev: f64) -> f64
where
    R: Rng + ?Sized,
{
    match Normal::new(mean, std_dev) {
        Ok(dist) => dist.sample(rng),
        Err(_) => mean,
    }
}

/// Draw a count from a Poisson distribution with the given rate.
///
/// A non-positive rate yields 0 (an empty-incident hour, not an error).
pub fn poisson<R>(rng: &mut R, lambda: f64) -> u32
where
    R: Rng + ?Sized,
{
    if lambda <= 0.0 {
        return 0;
    }
    match Poisson::new(lambda) {
        Ok(dist) => dist.sample(rng) as u32,
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_weighted_choice_respects_zero_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let choices = [("never", 0.0), ("always", 1.0)];
        for _ in 0..200 {
            let picked = weighted_choice(&mut rng, &choices).unwrap();
            assert_eq!(*picked, "always");
        }
    }

    #[test]
    fn test_weighted_choice_rejects_degenerate_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let empty: [(&str, f64); 0] = [];
        assert!(weighted_choice(&mut rng, &empty).is_err());

        let all_zero = [("a", 0.0), ("b", 0.0)];
        assert!(weighted_choice(&mut rng, &all_zero).is_err());
    }

    #[test]
    fn test_weighted_choice_is_deterministic_for_a_fixed_seed() {
        let choices = [("a", 0.5), ("b", 0.4), ("c", 0.1)];
        let run = || -> Vec<&str> {
            let mut rng = ChaCha8Rng::seed_from_u64(99);
            (0..50)
                .map(|_| *weighted_choice(&mut rng, &choices).unwrap())
                .collect()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_gaussian_degenerate_spread_returns_mean() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(gaussian(&mut rng, 3.0, 0.0), 3.0);
        assert_eq!(gaussian(&mut rng, 3.0, -1.0), 3.0);
    }

    #[test]
    fn test_gaussian_centers_on_mean() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let n = 2000;
        let sum: f64 = (0..n).map(|_| gaussian(&mut rng, 5.0, 1.0)).sum();
        let mean = sum / f64::from(n);
        assert!((mean - 5.0).abs() < 0.2, "sample mean was {mean}");
    }

    #[test]
    fn test_poisson_zero_rate_yields_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(poisson(&mut rng, 0.0), 0);
        assert_eq!(poisson(&mut rng, -2.0), 0);
    }

    #[test]
    fn test_poisson_rate_tracks_mean() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let n = 2000;
        let sum: u32 = (0..n).map(|_| poisson(&mut rng, 2.0)).sum();
        let mean = f64::from(sum) / f64::from(n);
        assert!((mean - 2.0).abs() < 0.2, "sample mean was {mean}");
    }
}
