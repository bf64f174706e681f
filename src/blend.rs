//! Fixed-weight blending of two scopes of the same statistic: current vs prior
//! season, or domestic vs continental competition. A scope only participates if it
//! has at least one match of sample support; the blended rate is always a convex
//! combination of the participating inputs.

use crate::config::BlendWeights;

/// A rate estimate qualified by its sample support.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scoped {
    pub rate: f64,
    pub matches: u32,
}
impl Scoped {
    pub fn new(rate: f64, matches: u32) -> Self {
        debug_assert!(rate.is_finite() && rate >= 0.0, "invalid rate {rate}");
        Self { rate, matches }
    }

    /// A scope with no recorded matches; contributes nothing to a blend.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_support(&self) -> bool {
        self.matches > 0
    }
}

/// Collapses two scopes into one effective rate. With support on both sides the
/// result is the weighted combination; with support on one side that input is used
/// unweighted; with no support the rate is `0.0`.
pub fn blend(primary: Scoped, secondary: Scoped, weights: &BlendWeights) -> f64 {
    debug_assert!(weights.validate().is_ok(), "invalid weights {weights:?}");
    match (primary.has_support(), secondary.has_support()) {
        (true, true) => weights.primary * primary.rate + weights.secondary * secondary.rate,
        (true, false) => primary.rate,
        (false, true) => secondary.rate,
        (false, false) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    const SEASON: BlendWeights = BlendWeights {
        primary: 0.65,
        secondary: 0.35,
    };

    #[test]
    fn blends_supported_scopes() {
        let blended = blend(Scoped::new(2.0, 20), Scoped::new(1.0, 38), &SEASON);
        assert_float_absolute_eq!(0.65 * 2.0 + 0.35 * 1.0, blended);
    }

    #[test]
    fn one_sided_support_passes_through_exactly() {
        assert_eq!(1.8, blend(Scoped::new(1.8, 12), Scoped::empty(), &SEASON));
        assert_eq!(1.2, blend(Scoped::empty(), Scoped::new(1.2, 30), &SEASON));
    }

    #[test]
    fn no_support_yields_zero() {
        assert_eq!(0.0, blend(Scoped::empty(), Scoped::empty(), &SEASON));
    }

    #[test]
    fn zero_rate_with_support_still_participates() {
        // A goalless season is real evidence, not missing data.
        let blended = blend(Scoped::new(0.0, 5), Scoped::new(2.0, 38), &SEASON);
        assert_float_absolute_eq!(0.35 * 2.0, blended);
    }

    #[test]
    fn blend_stays_within_input_bounds() {
        let weight_splits = [(0.5, 0.5), (0.6, 0.4), (0.65, 0.35), (0.7, 0.3), (0.8, 0.2)];
        let rate_pairs = [(0.0, 3.0), (1.3, 1.4), (2.5, 0.1), (4.0, 4.0)];
        for (primary_weight, secondary_weight) in weight_splits {
            let weights = BlendWeights::new(primary_weight, secondary_weight);
            for (primary_rate, secondary_rate) in rate_pairs {
                let blended = blend(
                    Scoped::new(primary_rate, 10),
                    Scoped::new(secondary_rate, 10),
                    &weights,
                );
                assert!(blended >= f64::min(primary_rate, secondary_rate));
                assert!(blended <= f64::max(primary_rate, secondary_rate));
            }
        }
    }
}
