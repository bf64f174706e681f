use super::*;
use crate::domain::PerStat;

fn expectation() -> AdjustedExpectation {
    AdjustedExpectation {
        home: PerStat {
            goals: 1.65,
            corners: 5.8,
            shots: 13.4,
        },
        away: PerStat {
            goals: 1.10,
            corners: 4.2,
            shots: 9.6,
        },
    }
}

fn mean(samples: &[u32]) -> f64 {
    samples.iter().map(|&count| count as u64).sum::<u64>() as f64 / samples.len() as f64
}

#[test]
fn seed_prefers_fixture_id() {
    assert_eq!(1_035_048, fixture_seed(Some(1_035_048), 42));
    assert_eq!(42, fixture_seed(None, 42));
}

#[test]
fn all_six_variables_share_the_trial_count() {
    let samples = simulate(&expectation(), 1_000, 42);
    assert_eq!(1_000, samples.trials());
    assert_eq!(1_000, samples.away_goals.len());
    assert_eq!(1_000, samples.home_corners.len());
    assert_eq!(1_000, samples.away_corners.len());
    assert_eq!(1_000, samples.home_shots.len());
    assert_eq!(1_000, samples.away_shots.len());
}

#[test]
fn same_seed_reproduces_identical_samples() {
    let first = simulate(&expectation(), 2_000, 7);
    let second = simulate(&expectation(), 2_000, 7);
    assert_eq!(first, second);
}

#[test]
fn different_seeds_diverge() {
    let first = simulate(&expectation(), 2_000, 7);
    let second = simulate(&expectation(), 2_000, 8);
    assert_ne!(first, second);
}

#[test]
fn sample_means_converge_on_the_rates() {
    let expectation = expectation();
    for (trials, tolerance) in [(1_000, 0.15), (10_000, 0.05), (50_000, 0.03)] {
        let samples = simulate(&expectation, trials, 42);
        for (observed, lambda) in [
            (mean(&samples.home_goals), expectation.home.goals),
            (mean(&samples.away_goals), expectation.away.goals),
            (mean(&samples.home_corners), expectation.home.corners),
            (mean(&samples.away_corners), expectation.away.corners),
            (mean(&samples.home_shots), expectation.home.shots),
            (mean(&samples.away_shots), expectation.away.shots),
        ] {
            let relative_error = (observed - lambda).abs() / lambda;
            assert!(
                relative_error < tolerance,
                "trials={trials}, lambda={lambda}, observed={observed}"
            );
        }
    }
}
