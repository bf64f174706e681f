//! The context adjuster: transforms two blended team profiles into the six Poisson
//! rate parameters of the simulation. Applies, in order: the attack/defence base
//! expectation, the additive home advantage, league-coefficient and booster
//! scaling, the plausibility guards, head-to-head blending (goals only), and the
//! final positivity clamp.

use strum::IntoEnumIterator;

use crate::config::{ModelConfig, MIN_DENOMINATOR, MIN_LAMBDA};
use crate::data::H2hRecord;
use crate::domain::{PerStat, Stat};
use crate::profile::TeamProfile;

/// Everything the adjuster needs to know about one fixture. Coefficients and
/// boosters are resolved by the caller so that this stage stays a pure function of
/// its inputs.
#[derive(Debug)]
pub struct FixtureContext<'a> {
    pub home: &'a TeamProfile,
    pub away: &'a TeamProfile,
    pub home_coef: f64,
    pub away_coef: f64,
    pub home_booster: f64,
    pub away_booster: f64,
    pub h2h: Option<H2hRecord>,
}

/// The final per-match Poisson parameters for both sides. Every field is strictly
/// positive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AdjustedExpectation {
    pub home: PerStat,
    pub away: PerStat,
}

pub fn adjust(context: &FixtureContext, config: &ModelConfig) -> AdjustedExpectation {
    let mut expectation = AdjustedExpectation::default();

    // The matchup outcome depends on both attacking and opposing defensive
    // strength: the home side's home attack meets the away side's away defence,
    // and vice versa.
    for stat in Stat::iter() {
        let home_rates = context.home.rates(stat);
        let away_rates = context.away.rates(stat);
        expectation.home[stat] = (home_rates.scored.home + away_rates.conceded.away) / 2.0
            + config.home_advantage.bonus_for(stat);
        expectation.away[stat] = (away_rates.scored.away + home_rates.conceded.home) / 2.0;
    }

    let strength_ratio = (context.home_coef * context.home_booster)
        / f64::max(context.away_coef * context.away_booster, MIN_DENOMINATOR);
    for stat in Stat::iter() {
        expectation.home[stat] *= strength_ratio;
        expectation.away[stat] /= f64::max(strength_ratio, MIN_DENOMINATOR);
    }

    apply_guards(&mut expectation, context, config);
    apply_h2h(&mut expectation, context, config);

    for stat in Stat::iter() {
        expectation.home[stat] = f64::max(expectation.home[stat], MIN_LAMBDA);
        expectation.away[stat] = f64::max(expectation.away[stat], MIN_LAMBDA);
    }
    expectation
}

/// Deterministic, bounded guards against multiplicative drift in the goal
/// expectations. Thresholds compare raw league coefficients; boosters are a manual
/// override and deliberately escape them.
fn apply_guards(
    expectation: &mut AdjustedExpectation,
    context: &FixtureContext,
    config: &ModelConfig,
) {
    let guards = &config.guards;
    if context.home_coef > guards.elite_coef && context.away_coef > guards.elite_coef {
        expectation.home.goals = f64::min(expectation.home.goals, guards.elite_home_cap);
        expectation.away.goals = f64::min(expectation.away.goals, guards.elite_away_cap);
    }
    if context.away_coef < guards.weak_away_coef {
        expectation.away.goals *= guards.weak_away_damp;
    }
    if context.home_coef > guards.elite_coef && context.away_coef < guards.outclassed_coef {
        expectation.home.goals *= guards.strong_home_boost;
    }
}

/// Blends the goal expectations towards the historical head-to-head averages. Only
/// goals are nudged; corners and shots have no head-to-head evidence. A record
/// with zero contributing meetings carries no influence.
fn apply_h2h(
    expectation: &mut AdjustedExpectation,
    context: &FixtureContext,
    config: &ModelConfig,
) {
    let Some(record) = context.h2h else {
        return;
    };
    if record.matches == 0 {
        return;
    }
    let weight = config.h2h.weight(record.matches);
    expectation.home.goals = expectation.home.goals * (1.0 - weight) + record.avg_home * weight;
    expectation.away.goals = expectation.away.goals * (1.0 - weight) + record.avg_away * weight;
}
