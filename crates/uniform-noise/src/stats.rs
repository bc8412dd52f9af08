//! Distribution diagnostics for remapped noise.
//!
//! Used to check that remapped samples are close to U(0, 1): a fixed-bin
//! histogram and the one-sample Kolmogorov–Smirnov statistic.
use serde::{Deserialize, Serialize};

/// Equal-width histogram over [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub counts: Vec<u64>,
    /// Number of non-NaN samples binned.
    pub total: u64,
}

impl Histogram {
    /// Bin `samples` into `bins` equal buckets. Values outside [0, 1] land in
    /// the edge buckets; NaN samples are skipped.
    ///
    /// # Panics
    /// Panics if `bins == 0`.
    pub fn from_samples(samples: &[f64], bins: usize) -> Self {
        assert!(bins > 0, "histogram needs at least one bin");
        let mut counts = vec![0u64; bins];
        let mut total = 0u64;
        for &v in samples {
            if v.is_nan() {
                continue;
            }
            let idx = ((v * bins as f64).floor().max(0.0) as usize).min(bins - 1);
            counts[idx] += 1;
            total += 1;
        }
        Self { counts, total }
    }

    /// Fraction of samples per bin. All zeros when empty.
    pub fn frequencies(&self) -> Vec<f64> {
        if self.total == 0 {
            return vec![0.0; self.counts.len()];
        }
        self.counts.iter().map(|&c| c as f64 / self.total as f64).collect()
    }

    /// Largest `|f_i − 1/bins| · bins` across bins: 0 for a perfectly flat
    /// histogram, 1 when a bin is empty or holds double its share.
    pub fn max_relative_deviation(&self) -> f64 {
        let bins = self.counts.len() as f64;
        self.frequencies()
            .iter()
            .map(|f| (f * bins - 1.0).abs())
            .fold(0.0, f64::max)
    }
}

/// One-sample Kolmogorov–Smirnov D statistic against U(0, 1).
///
/// NaN samples are ignored; returns 0 when no samples remain.
pub fn ks_uniform(samples: &[f64]) -> f64 {
    let mut sorted: Vec<f64> = samples.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return 0.0;
    }
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len() as f64;
    sorted
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let cdf = v.clamp(0.0, 1.0);
            let above = (i + 1) as f64 / n - cdf;
            let below = cdf - i as f64 / n;
            above.max(below)
        })
        .fold(0.0, f64::max)
}

/// Asymptotic KS critical value `sqrt(-ln(alpha / 2) / 2) / sqrt(n)`.
///
/// `ks_uniform(samples) > ks_critical_value(n, alpha)` rejects uniformity at
/// significance `alpha`.
pub fn ks_critical_value(n: usize, alpha: f64) -> f64 {
    let c = (-(alpha / 2.0).ln() / 2.0).sqrt();
    c / (n as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn histogram_bins_and_clamps() {
        let h = Histogram::from_samples(&[0.0, 0.1, 0.49, 0.5, 0.99, 1.0, -3.0, 7.0, f64::NAN], 2);
        assert_eq!(h.counts, vec![4, 4]);
        assert_eq!(h.total, 8);
    }

    #[test]
    fn flat_histogram_has_no_deviation() {
        let samples: Vec<f64> = (0..1000).map(|i| (i as f64 + 0.5) / 1000.0).collect();
        let h = Histogram::from_samples(&samples, 10);
        assert!(h.counts.iter().all(|&c| c == 100), "{:?}", h.counts);
        assert!(h.max_relative_deviation() < 1e-12);
    }

    #[test]
    fn empty_histogram() {
        let h = Histogram::from_samples(&[], 4);
        assert_eq!(h.frequencies(), vec![0.0; 4]);
        assert_eq!(h.total, 0);
    }

    #[test]
    fn ks_of_point_mass() {
        // Everything at 0.5: the empirical CDF jumps 0 → 1 there.
        let d = ks_uniform(&[0.5; 100]);
        assert_relative_eq!(d, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn ks_of_even_grid_is_small() {
        let n = 1000;
        let samples: Vec<f64> = (0..n).map(|i| (i as f64 + 0.5) / n as f64).collect();
        assert_relative_eq!(ks_uniform(&samples), 0.5 / n as f64, epsilon = 1e-12);
    }

    #[test]
    fn ks_accepts_random_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let samples: Vec<f64> = (0..5000).map(|_| rng.gen::<f64>()).collect();
        let d = ks_uniform(&samples);
        assert!(d < ks_critical_value(samples.len(), 0.001), "D={d}");
    }

    #[test]
    fn ks_rejects_bell_shape() {
        let mut rng = StdRng::seed_from_u64(5);
        // Mean of four uniforms is strongly peaked at 0.5.
        let samples: Vec<f64> = (0..5000)
            .map(|_| (0..4).map(|_| rng.gen::<f64>()).sum::<f64>() / 4.0)
            .collect();
        let d = ks_uniform(&samples);
        assert!(d > ks_critical_value(samples.len(), 0.05), "D={d}");
    }

    #[test]
    fn critical_value_known_constant() {
        // c(0.05) ≈ 1.358
        assert_relative_eq!(ks_critical_value(1, 0.05), 1.3581, epsilon = 1e-3);
    }
}
