use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// Seedable source of the random variates used by the engine.
///
/// Inter-arrival intervals are uniform, service times are exponential.
/// Every realization owns its own [`Sampler`], so seeding one realization
/// never perturbs another.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: Pcg64,
}

impl Sampler {
    /// Creates a sampler with a fixed seed.
    /// The same seed always yields the same sample stream.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Draws a value uniformly from `[min, max)`.
    /// Callers must guarantee `min < max`; configuration validation enforces it.
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        debug_assert!(min < max);
        self.rng.random_range(min..max)
    }

    /// Draws a value from an exponential distribution with the given rate
    /// via inverse-CDF sampling: `-ln(1 - u) / rate` with `u` in `[0, 1)`.
    ///
    /// Since `1 - u` lies in `(0, 1]`, the logarithm is finite and the
    /// result is always a finite value `>= 0`.
    pub fn exponential(&mut self, rate: f64) -> f64 {
        debug_assert!(rate > 0.);
        let u: f64 = self.rng.random();
        -(1. - u).ln() / rate
    }
}
