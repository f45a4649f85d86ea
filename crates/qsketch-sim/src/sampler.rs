//! Born-rule shot sampling.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};

use crate::config::DEFAULT_NORM_TOLERANCE;
use crate::counts::OutcomeHistogram;
use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// Draws computational-basis measurement outcomes from a statevector.
///
/// Each shot is an independent categorical draw with probability
/// `|amplitude|²`. The state itself is not collapsed.
#[derive(Debug, Clone)]
pub struct MeasurementSampler {
    tolerance: f64,
    seed: Option<u64>,
}

impl MeasurementSampler {
    /// Create a sampler seeded from system entropy.
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_NORM_TOLERANCE,
            seed: None,
        }
    }

    /// Set the allowed deviation of the total probability from 1.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Use a fixed seed, making every call reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Reject a shot count of zero.
    pub fn check_shots(shots: u64) -> SimResult<()> {
        if shots == 0 {
            return Err(SimError::InvalidShotCount(shots));
        }
        Ok(())
    }

    /// Sample `shots` outcomes.
    pub fn sample(&self, state: &Statevector, shots: u64) -> SimResult<OutcomeHistogram> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.sample_with_rng(state, shots, &mut rng)
    }

    /// Sample `shots` outcomes using the given RNG.
    #[instrument(skip(self, state, rng), fields(num_qubits = state.num_qubits()))]
    pub fn sample_with_rng<R: Rng + ?Sized>(
        &self,
        state: &Statevector,
        shots: u64,
        rng: &mut R,
    ) -> SimResult<OutcomeHistogram> {
        Self::check_shots(shots)?;

        let probabilities = state.probabilities();
        let norm: f64 = probabilities.iter().sum();
        // Written so that a NaN norm is rejected too
        let within_tolerance = (norm - 1.0).abs() <= self.tolerance;
        if !within_tolerance {
            return Err(SimError::UnnormalizedState { norm });
        }

        let distribution = WeightedIndex::<f64>::new(&probabilities)
            .map_err(|_| SimError::UnnormalizedState { norm })?;

        let mut tally: FxHashMap<usize, u64> = FxHashMap::default();
        for _ in 0..shots {
            *tally.entry(distribution.sample(rng)).or_insert(0) += 1;
        }
        debug!("Sampled {} shots into {} outcomes", shots, tally.len());

        Ok(OutcomeHistogram::from_tally(state.num_qubits(), tally))
    }
}

impl Default for MeasurementSampler {
    fn default() -> Self {
        Self::new()
    }
}
