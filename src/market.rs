//! The market probability calculator: converts the engine's raw samples into the
//! final [`SimulationResult`]. Every percentage is derived purely from sample
//! frequency, so the reported markets are internally consistent with the reported
//! point estimates for the same sample set.
//!
//! Field names and precision (two decimals for means, one for percentages) are a
//! stable contract: the downstream rendering layer formats them directly.

use serde::Serialize;

use crate::config::ModelConfig;
use crate::sim::SampleSet;

/// The projection output record for one fixture. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationResult {
    pub home_score: f64,
    pub away_score: f64,
    pub home_win_pct: f64,
    pub draw_pct: f64,
    pub away_win_pct: f64,
    pub over_1_5_pct: f64,
    pub over_2_5_pct: f64,
    pub over_3_5_pct: f64,
    pub btts_pct: f64,
    pub home_o1_5_pct: f64,
    pub away_o1_5_pct: f64,
    pub home_corners: f64,
    pub away_corners: f64,
    pub total_corners: f64,
    pub home_shots: f64,
    pub away_shots: f64,
    pub total_shots: f64,
}

pub fn summarise(samples: &SampleSet, config: &ModelConfig) -> SimulationResult {
    let trials = samples.trials();
    debug_assert!(trials > 0);

    let (mut home_wins, mut draws, mut away_wins) = (0, 0, 0);
    for (&home, &away) in samples.home_goals.iter().zip(&samples.away_goals) {
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => home_wins += 1,
            std::cmp::Ordering::Equal => draws += 1,
            std::cmp::Ordering::Less => away_wins += 1,
        }
    }

    let [line_low, line_mid, line_high] = config.total_goals_lines;
    SimulationResult {
        home_score: round2(mean(&samples.home_goals)),
        away_score: round2(mean(&samples.away_goals)),
        home_win_pct: percentage(home_wins, trials),
        draw_pct: percentage(draws, trials),
        away_win_pct: percentage(away_wins, trials),
        over_1_5_pct: percentage(
            over_count(&samples.home_goals, &samples.away_goals, line_low),
            trials,
        ),
        over_2_5_pct: percentage(
            over_count(&samples.home_goals, &samples.away_goals, line_mid),
            trials,
        ),
        over_3_5_pct: percentage(
            over_count(&samples.home_goals, &samples.away_goals, line_high),
            trials,
        ),
        btts_pct: percentage(btts_count(&samples.home_goals, &samples.away_goals), trials),
        home_o1_5_pct: percentage(
            team_over_count(&samples.home_goals, config.team_total_line),
            trials,
        ),
        away_o1_5_pct: percentage(
            team_over_count(&samples.away_goals, config.team_total_line),
            trials,
        ),
        home_corners: round2(mean(&samples.home_corners)),
        away_corners: round2(mean(&samples.away_corners)),
        total_corners: round2(mean_total(&samples.home_corners, &samples.away_corners)),
        home_shots: round2(mean(&samples.home_shots)),
        away_shots: round2(mean(&samples.away_shots)),
        total_shots: round2(mean_total(&samples.home_shots, &samples.away_shots)),
    }
}

/// Number of trials where the combined count strictly exceeds `line`.
pub fn over_count(home: &[u32], away: &[u32], line: f64) -> usize {
    home.iter()
        .zip(away)
        .filter(|&(&home, &away)| (home + away) as f64 > line)
        .count()
}

fn btts_count(home: &[u32], away: &[u32]) -> usize {
    home.iter()
        .zip(away)
        .filter(|&(&home, &away)| home > 0 && away > 0)
        .count()
}

fn team_over_count(side: &[u32], line: f64) -> usize {
    side.iter().filter(|&&count| count as f64 > line).count()
}

fn mean(samples: &[u32]) -> f64 {
    samples.iter().map(|&count| count as u64).sum::<u64>() as f64 / samples.len() as f64
}

fn mean_total(home: &[u32], away: &[u32]) -> f64 {
    home.iter()
        .zip(away)
        .map(|(&home, &away)| (home + away) as u64)
        .sum::<u64>() as f64
        / home.len() as f64
}

/// Sample frequency as a percentage with one decimal place. The three 1X2
/// percentages are rounded independently and deliberately not renormalised to
/// 100.0.
fn percentage(hits: usize, trials: usize) -> f64 {
    round1(hits as f64 / trials as f64 * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
