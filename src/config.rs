//! Tunable policy constants for the projection pipeline. Earlier drafts of the model
//! disagreed on several of these (blend splits, clamp ceilings, home-advantage
//! bonuses); they are surfaced here as named parameters so that a variant behaviour
//! is a configuration change rather than a forked code path. The defaults carry the
//! most recent tuning.

use thiserror::Error;

use crate::domain::{PerStat, Stat};

/// Floor applied to every Poisson rate before sampling. A Poisson process requires a
/// strictly positive rate; compounding adjustments may otherwise drive one to zero
/// or below.
pub const MIN_LAMBDA: f64 = 1e-6;

/// Floor applied to every divisor in ratio computations (rates, coefficient and
/// booster ratios).
pub const MIN_DENOMINATOR: f64 = 1e-9;

#[derive(Debug, Error)]
pub enum InvalidConfig {
    #[error("blend weights {primary} + {secondary} do not sum to 1")]
    NonConvexWeights { primary: f64, secondary: f64 },

    #[error("trials must be nonzero")]
    ZeroTrials,
}

/// Fixed weights for collapsing two scopes of the same statistic into one rate.
/// `primary` and `secondary` must form a convex combination.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendWeights {
    pub primary: f64,
    pub secondary: f64,
}
impl BlendWeights {
    pub fn new(primary: f64, secondary: f64) -> Self {
        Self { primary, secondary }
    }

    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if (self.primary + self.secondary - 1.0).abs() > 1e-9 {
            return Err(InvalidConfig::NonConvexWeights {
                primary: self.primary,
                secondary: self.secondary,
            });
        }
        Ok(())
    }
}

/// Additive bonus applied to the home side's expectations, one constant per
/// statistic. Goals carry the smallest bonus, shots the largest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HomeAdvantage {
    pub bonus: PerStat,
}
impl Default for HomeAdvantage {
    fn default() -> Self {
        Self {
            bonus: PerStat {
                goals: 0.15,
                corners: 0.30,
                shots: 1.00,
            },
        }
    }
}
impl HomeAdvantage {
    pub fn bonus_for(&self, stat: Stat) -> f64 {
        self.bonus[stat]
    }
}

/// Head-to-head influence policy. The blend weight grows linearly with the number of
/// recorded meetings and saturates at `max_weight`, so a single historical meeting
/// contributes little while ten contribute the maximum allowed influence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct H2hPolicy {
    pub max_weight: f64,
    pub per_match_weight: f64,
}
impl Default for H2hPolicy {
    fn default() -> Self {
        Self {
            max_weight: 0.40,
            per_match_weight: 0.04,
        }
    }
}
impl H2hPolicy {
    pub fn weight(&self, num_matches: u32) -> f64 {
        f64::min(self.max_weight, self.per_match_weight * num_matches as f64)
    }
}

/// Deterministic guards against multiplicative drift in the goal expectations.
/// Thresholds compare raw league coefficients (boosters excluded).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlausibilityGuards {
    /// Coefficient above which a league is considered elite.
    pub elite_coef: f64,
    /// Ceiling on the home goal expectation in an elite-vs-elite matchup.
    pub elite_home_cap: f64,
    /// Ceiling on the away goal expectation in an elite-vs-elite matchup.
    pub elite_away_cap: f64,
    /// Coefficient below which the away side's goal expectation is damped.
    pub weak_away_coef: f64,
    /// Damping factor applied to a markedly weaker away side.
    pub weak_away_damp: f64,
    /// Coefficient below which an away side is considered outclassed by an elite
    /// home side.
    pub outclassed_coef: f64,
    /// Attacking boost applied to an elite home side facing an outclassed away side.
    pub strong_home_boost: f64,
}
impl Default for PlausibilityGuards {
    fn default() -> Self {
        Self {
            elite_coef: 0.90,
            elite_home_cap: 2.8,
            elite_away_cap: 2.5,
            weak_away_coef: 0.75,
            weak_away_damp: 0.85,
            outclassed_coef: 0.70,
            strong_home_boost: 1.15,
        }
    }
}

/// The complete, immutable configuration of one pipeline run.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelConfig {
    /// Current-season vs prior-season blend (primary = current).
    pub season_blend: BlendWeights,
    /// Domestic vs continental blend (primary = domestic).
    pub competition_blend: BlendWeights,
    pub home_advantage: HomeAdvantage,
    pub h2h: H2hPolicy,
    pub guards: PlausibilityGuards,
    /// Number of Monte Carlo trials per fixture.
    pub trials: usize,
    /// Seed used when a fixture carries no identifier.
    pub default_seed: u64,
    /// Total-goals lines, ascending. The three entries feed the named
    /// `over_1_5_pct`/`over_2_5_pct`/`over_3_5_pct` output fields.
    pub total_goals_lines: [f64; 3],
    /// Line for the per-side team-total market.
    pub team_total_line: f64,
}
impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            season_blend: BlendWeights::new(0.65, 0.35),
            competition_blend: BlendWeights::new(0.80, 0.20),
            home_advantage: HomeAdvantage::default(),
            h2h: H2hPolicy::default(),
            guards: PlausibilityGuards::default(),
            trials: 10_000,
            default_seed: 42,
            total_goals_lines: [1.5, 2.5, 3.5],
            team_total_line: 1.5,
        }
    }
}
impl ModelConfig {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        self.season_blend.validate()?;
        self.competition_blend.validate()?;
        if self.trials == 0 {
            return Err(InvalidConfig::ZeroTrials);
        }
        Ok(())
    }
}
