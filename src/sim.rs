//! The Monte Carlo engine: draws a fixed number of independent trials from the six
//! adjusted Poisson rates (home/away × goals/corners/shots) and returns the raw
//! sample arrays for the market calculator.
//!
//! Independence between the two sides and between the three statistic axes is a
//! deliberate modelling simplification; do not introduce correlation here.

use tinyrand::{Seeded, StdRand};

use crate::adjust::AdjustedExpectation;
use crate::poisson;

/// Raw per-trial counts for the six simulated variables. All six vectors have the
/// same length (the trial count).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleSet {
    pub home_goals: Vec<u32>,
    pub away_goals: Vec<u32>,
    pub home_corners: Vec<u32>,
    pub away_corners: Vec<u32>,
    pub home_shots: Vec<u32>,
    pub away_shots: Vec<u32>,
}
impl SampleSet {
    fn with_capacity(trials: usize) -> Self {
        Self {
            home_goals: Vec::with_capacity(trials),
            away_goals: Vec::with_capacity(trials),
            home_corners: Vec::with_capacity(trials),
            away_corners: Vec::with_capacity(trials),
            home_shots: Vec::with_capacity(trials),
            away_shots: Vec::with_capacity(trials),
        }
    }

    pub fn trials(&self) -> usize {
        self.home_goals.len()
    }
}

/// Derives the RNG seed for a fixture. A supplied fixture identifier seeds the
/// generator deterministically so that repeated runs reproduce identical
/// summaries; otherwise the fixed default applies.
pub fn fixture_seed(fixture_id: Option<u64>, default_seed: u64) -> u64 {
    fixture_id.unwrap_or(default_seed)
}

/// Runs `trials` independent draws of all six variables from a deterministically
/// seeded generator. The draw order within a trial is fixed (home before away,
/// goals before corners before shots) and is part of the determinism contract.
pub fn simulate(expectation: &AdjustedExpectation, trials: usize, seed: u64) -> SampleSet {
    let mut rand = StdRand::seed(seed);
    let mut samples = SampleSet::with_capacity(trials);
    for _ in 0..trials {
        samples
            .home_goals
            .push(poisson::sample(expectation.home.goals, &mut rand));
        samples
            .away_goals
            .push(poisson::sample(expectation.away.goals, &mut rand));
        samples
            .home_corners
            .push(poisson::sample(expectation.home.corners, &mut rand));
        samples
            .away_corners
            .push(poisson::sample(expectation.away.corners, &mut rand));
        samples
            .home_shots
            .push(poisson::sample(expectation.home.shots, &mut rand));
        samples
            .away_shots
            .push(poisson::sample(expectation.away.shots, &mut rand));
    }
    samples
}

#[cfg(test)]
mod tests;
