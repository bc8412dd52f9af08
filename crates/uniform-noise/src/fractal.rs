//! Multi-octave fractal accumulation of a raw gradient-noise source.
//!
//! Octave `i` samples the source at `point * 2^i` and weights it by
//! `persistence^i`. Every octave reads the same seeded source: the fitted CDF
//! curves in [`crate::remap`] assume exactly this scheme, so per-octave seed
//! offsets must not be introduced here.
use noise::{NoiseFn, Seedable};

/// Frequency multiplier between successive octaves.
pub const LACUNARITY: f64 = 2.0;

/// Sum `octaves` layers of `source` at `point`.
///
/// Returns exactly `0.0` when `octaves == 0`. Non-finite coordinates propagate
/// into the result unchecked.
pub fn accumulate<S, const DIM: usize>(
    source: &S,
    point: [f64; DIM],
    octaves: u32,
    persistence: f64,
) -> f64
where
    S: NoiseFn<f64, DIM> + ?Sized,
{
    let mut noise = 0.0f64;
    let mut frequency = 1.0f64;
    let mut amplitude = 1.0f64;
    for _ in 0..octaves {
        noise += source.get(point.map(|c| c * frequency)) * amplitude;
        amplitude *= persistence;
        frequency *= LACUNARITY;
    }
    noise
}

#[inline]
pub fn accumulate_2d<S>(source: &S, point: [f64; 2], octaves: u32, persistence: f64) -> f64
where
    S: NoiseFn<f64, 2> + ?Sized,
{
    accumulate(source, point, octaves, persistence)
}

#[inline]
pub fn accumulate_3d<S>(source: &S, point: [f64; 3], octaves: u32, persistence: f64) -> f64
where
    S: NoiseFn<f64, 3> + ?Sized,
{
    accumulate(source, point, octaves, persistence)
}

/// Build a source of type `S` for a signed seed.
///
/// The seed's bit pattern is handed to the source unchanged (`-1` becomes
/// `u32::MAX`), so distinct `i32` seeds stay distinct.
pub fn seeded_source<S: Seedable + Default>(seed: i32) -> S {
    S::default().set_seed(seed as u32)
}

/// [`accumulate_2d`] over a freshly seeded `S`.
///
/// Building the source costs more than one evaluation; hold a
/// [`crate::UniformNoise`] when sampling many points.
pub fn accumulate_seeded_2d<S>(seed: i32, point: [f64; 2], octaves: u32, persistence: f64) -> f64
where
    S: NoiseFn<f64, 2> + Seedable + Default,
{
    accumulate_2d(&seeded_source::<S>(seed), point, octaves, persistence)
}

/// [`accumulate_3d`] over a freshly seeded `S`.
pub fn accumulate_seeded_3d<S>(seed: i32, point: [f64; 3], octaves: u32, persistence: f64) -> f64
where
    S: NoiseFn<f64, 3> + Seedable + Default,
{
    accumulate_3d(&seeded_source::<S>(seed), point, octaves, persistence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::PerlinLite;
    use crate::testing::ReferenceWave;
    use approx::assert_abs_diff_eq;
    use noise::Perlin;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::cell::RefCell;

    /// Records every point it is sampled at and returns a constant.
    struct Recorder {
        calls: RefCell<Vec<[f64; 2]>>,
        value: f64,
    }

    impl NoiseFn<f64, 2> for Recorder {
        fn get(&self, point: [f64; 2]) -> f64 {
            self.calls.borrow_mut().push(point);
            self.value
        }
    }

    #[test]
    fn zero_octaves_is_exactly_zero() {
        let perlin = PerlinLite::new(7);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let p = [rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)];
            assert_eq!(accumulate_2d(&perlin, p, 0, 0.5), 0.0);
            assert_eq!(accumulate_3d(&perlin, [p[0], p[1], 3.3], 0, 0.5), 0.0);
        }
    }

    #[test]
    fn octaves_double_frequency_and_scale_amplitude() {
        let rec = Recorder { calls: RefCell::new(Vec::new()), value: 1.0 };
        let sum = accumulate_2d(&rec, [0.3, -1.5], 4, 0.5);
        let calls = rec.calls.into_inner();
        assert_eq!(calls, vec![[0.3, -1.5], [0.6, -3.0], [1.2, -6.0], [2.4, -12.0]]);
        assert_abs_diff_eq!(sum, 1.0 + 0.5 + 0.25 + 0.125, epsilon = 1e-15);
    }

    #[test]
    fn persistence_is_not_validated() {
        let rec = Recorder { calls: RefCell::new(Vec::new()), value: 0.5 };
        let sum = accumulate_2d(&rec, [0.0, 0.0], 3, 3.0);
        assert_abs_diff_eq!(sum, 0.5 * (1.0 + 3.0 + 9.0), epsilon = 1e-12);
    }

    #[test]
    fn same_seed_every_octave() {
        // Lattice points are zero for gradient noise, so at (0.5, 0.5) every
        // octave past the first lands on the lattice and contributes nothing.
        let perlin = PerlinLite::new(1234);
        let one = accumulate_2d(&perlin, [0.5, 0.5], 1, 0.5);
        let four = accumulate_2d(&perlin, [0.5, 0.5], 4, 0.5);
        assert_eq!(one, four);
        assert_eq!(one, perlin.get([0.5, 0.5]));
        assert_eq!(four, 0.032875124365091324);
        assert_eq!(accumulate_3d(&perlin, [0.5, 0.5, 0.5], 4, 0.5), 0.0);
    }

    #[test]
    fn reference_wave_golden_values() {
        let wave = ReferenceWave::new(1234);
        assert_abs_diff_eq!(
            accumulate_2d(&wave, [0.5, 0.5], 4, 0.5),
            0.5550577050794984,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            accumulate_3d(&wave, [0.5, 0.5, 0.5], 4, 0.5),
            0.19213043839462854,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            accumulate_2d(&wave, [0.25, -0.75], 4, 0.5),
            -0.5091060752430396,
            epsilon = 1e-12
        );
    }

    #[test]
    fn seeded_variants_match_explicit_source() {
        let p = [1.3, 2.1];
        let explicit = accumulate_2d(&ReferenceWave::new(1234), p, 4, 0.5);
        let seeded = accumulate_seeded_2d::<ReferenceWave>(1234, p, 4, 0.5);
        assert_eq!(explicit, seeded);
        assert_abs_diff_eq!(seeded, 0.6087318257017236, epsilon = 1e-12);

        let q = [0.1, 0.7, -2.0];
        assert_eq!(
            accumulate_seeded_3d::<PerlinLite>(-5, q, 4, 0.5),
            accumulate_3d(&PerlinLite::new(-5), q, 4, 0.5)
        );
        // Any Seedable noise source plugs in.
        assert_eq!(
            accumulate_seeded_3d::<Perlin>(-5, q, 4, 0.5),
            accumulate_3d(&Perlin::new((-5i32) as u32), q, 4, 0.5)
        );
    }

    #[test]
    fn negative_seed_keeps_bit_pattern() {
        let source: PerlinLite = seeded_source(-1);
        assert_eq!(source.seed(), u32::MAX);
        assert_eq!(source.signed_seed(), -1);
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let seed: i32 = rng.gen();
            let p = [rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)];
            let a = accumulate_seeded_3d::<PerlinLite>(seed, p, 4, 0.5);
            let b = accumulate_seeded_3d::<PerlinLite>(seed, p, 4, 0.5);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn non_finite_coordinates_propagate() {
        let rec = Recorder { calls: RefCell::new(Vec::new()), value: f64::NAN };
        assert!(accumulate_2d(&rec, [f64::NAN, 0.0], 2, 0.5).is_nan());
    }
}
