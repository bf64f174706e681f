//! The team profile store: produces one canonical [`TeamProfile`] per team id
//! regardless of which upstream schema supplied the data.
//!
//! Merge precedence is fixed and deterministic, field by field:
//! goals come from the split-schema (API) sources whenever any split scope has
//! sample support, falling back to the manual row's `scored`/`conceded` pair
//! otherwise; corners and shots come from the manual source only, as the API
//! sources do not carry them. Split-scope goals are season-blended
//! (current/prior) per venue and then competition-blended with the continental
//! scope.

use rustc_hash::FxHashMap;

use crate::blend::{blend, Scoped};
use crate::config::ModelConfig;
use crate::data::{OverallRow, SplitStats, TeamEntry, VenueTotals};
use crate::domain::{Side, Stat};

/// A per-match rate split by venue. Sources without a venue split populate both
/// fields with the same overall rate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VenueRate {
    pub home: f64,
    pub away: f64,
}
impl VenueRate {
    pub fn uniform(rate: f64) -> Self {
        Self {
            home: rate,
            away: rate,
        }
    }

    pub fn at(&self, venue: Side) -> f64 {
        match venue {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }
}

/// For/against rates for one statistic axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatRates {
    pub scored: VenueRate,
    pub conceded: VenueRate,
}

/// The canonical per-team statistical profile consumed by the context adjuster.
/// Rebuilt on every pipeline run; never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct TeamProfile {
    pub id: u32,
    pub name: String,
    pub league: String,
    pub goals: StatRates,
    pub corners: StatRates,
    pub shots: StatRates,
}
impl TeamProfile {
    pub fn rates(&self, stat: Stat) -> &StatRates {
        match stat {
            Stat::Goals => &self.goals,
            Stat::Corners => &self.corners,
            Stat::Shots => &self.shots,
        }
    }
}

/// The statistics sources contributing to a run, already parsed. `current`,
/// `prior` and `continental` use the split schema; `manual` uses the overall
/// schema.
#[derive(Debug, Default)]
pub struct StatsSources {
    pub manual: FxHashMap<u32, OverallRow>,
    pub current: FxHashMap<u32, SplitStats>,
    pub prior: FxHashMap<u32, SplitStats>,
    pub continental: FxHashMap<u32, SplitStats>,
}

/// Read-only index of resolved profiles, built once per run.
#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: FxHashMap<u32, TeamProfile>,
}
impl ProfileStore {
    pub fn build(
        teams: &FxHashMap<u32, TeamEntry>,
        sources: &StatsSources,
        config: &ModelConfig,
    ) -> Self {
        let mut profiles = FxHashMap::default();
        let mut team_ids: Vec<u32> = sources
            .manual
            .keys()
            .chain(sources.current.keys())
            .chain(sources.prior.keys())
            .chain(sources.continental.keys())
            .copied()
            .collect();
        team_ids.sort_unstable();
        team_ids.dedup();

        for team_id in team_ids {
            let manual = sources.manual.get(&team_id);
            let goals = resolve_goals(
                sources.current.get(&team_id),
                sources.prior.get(&team_id),
                sources.continental.get(&team_id),
                manual,
                config,
            );
            let corners = manual.map(|row| overall_rates(row.corners, row.corners_conceded));
            let shots = manual.map(|row| overall_rates(row.shots, row.shots_conceded));

            let (name, league) = identity(team_id, teams.get(&team_id), manual);
            profiles.insert(
                team_id,
                TeamProfile {
                    id: team_id,
                    name,
                    league,
                    goals,
                    corners: corners.unwrap_or_default(),
                    shots: shots.unwrap_or_default(),
                },
            );
        }
        Self { profiles }
    }

    /// Looks up the resolved profile for a team. `None` means the team id was absent
    /// from every source; the caller must skip or flag the fixture rather than
    /// simulate a meaningless result.
    pub fn get(&self, team_id: u32) -> Option<&TeamProfile> {
        self.profiles.get(&team_id)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn identity(
    team_id: u32,
    entry: Option<&TeamEntry>,
    manual: Option<&OverallRow>,
) -> (String, String) {
    let name = entry
        .map(|entry| entry.name.clone())
        .or_else(|| manual.and_then(|row| row.name.clone()))
        .unwrap_or_else(|| format!("team-{team_id}"));
    let league = entry
        .map(|entry| entry.league.clone())
        .or_else(|| manual.and_then(|row| row.league.clone()))
        .unwrap_or_default();
    (name, league)
}

fn overall_rates(scored: Option<f64>, conceded: Option<f64>) -> StatRates {
    StatRates {
        scored: VenueRate::uniform(scored.unwrap_or(0.0)),
        conceded: VenueRate::uniform(conceded.unwrap_or(0.0)),
    }
}

/// Normalises split-schema raw totals to per-match rates. The denominator is
/// floored at one match so that a zero-match block resolves to rate `0.0` with no
/// sample support, never a division by zero.
fn venue_scoped(block: &VenueTotals) -> (Scoped, Scoped) {
    let denominator = f64::max(block.matches as f64, 1.0);
    (
        Scoped::new(block.goals_for / denominator, block.matches),
        Scoped::new(block.goals_against / denominator, block.matches),
    )
}

/// Overall per-match rates across both venues of a split file, used for the
/// continental scope where per-venue sample sizes are too small to split.
fn overall_scoped(stats: &SplitStats) -> (Scoped, Scoped) {
    let matches = stats.home.matches + stats.away.matches;
    let denominator = f64::max(matches as f64, 1.0);
    (
        Scoped::new((stats.home.goals_for + stats.away.goals_for) / denominator, matches),
        Scoped::new(
            (stats.home.goals_against + stats.away.goals_against) / denominator,
            matches,
        ),
    )
}

fn resolve_goals(
    current: Option<&SplitStats>,
    prior: Option<&SplitStats>,
    continental: Option<&SplitStats>,
    manual: Option<&OverallRow>,
    config: &ModelConfig,
) -> StatRates {
    let split_support = [current, prior, continental]
        .iter()
        .flatten()
        .any(|stats| stats.home.matches + stats.away.matches > 0);
    if !split_support {
        return manual
            .map(|row| overall_rates(row.scored, row.conceded))
            .unwrap_or_default();
    }

    let continental_scoped = continental.map(overall_scoped);
    let rate_at = |venue: Side| {
        let block_at = |stats: Option<&SplitStats>| {
            stats
                .map(|stats| match venue {
                    Side::Home => stats.home,
                    Side::Away => stats.away,
                })
                .unwrap_or_default()
        };
        let (current_for, current_against) = venue_scoped(&block_at(current));
        let (prior_for, prior_against) = venue_scoped(&block_at(prior));

        let domestic_for = Scoped::new(
            blend(current_for, prior_for, &config.season_blend),
            current_for.matches + prior_for.matches,
        );
        let domestic_against = Scoped::new(
            blend(current_against, prior_against, &config.season_blend),
            current_against.matches + prior_against.matches,
        );

        let (continental_for, continental_against) =
            continental_scoped.unwrap_or((Scoped::empty(), Scoped::empty()));
        (
            blend(domestic_for, continental_for, &config.competition_blend),
            blend(domestic_against, continental_against, &config.competition_blend),
        )
    };

    let (home_scored, home_conceded) = rate_at(Side::Home);
    let (away_scored, away_conceded) = rate_at(Side::Away);
    StatRates {
        scored: VenueRate {
            home: home_scored,
            away: away_scored,
        },
        conceded: VenueRate {
            home: home_conceded,
            away: away_conceded,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    fn split(home: (u32, f64, f64), away: (u32, f64, f64)) -> SplitStats {
        SplitStats {
            team_id: 0,
            league_id: None,
            home: VenueTotals {
                matches: home.0,
                goals_for: home.1,
                goals_against: home.2,
            },
            away: VenueTotals {
                matches: away.0,
                goals_for: away.1,
                goals_against: away.2,
            },
        }
    }

    fn sources_with_current(team_id: u32, stats: SplitStats) -> StatsSources {
        let mut sources = StatsSources::default();
        sources.current.insert(team_id, SplitStats { team_id, ..stats });
        sources
    }

    #[test]
    fn split_totals_normalise_to_per_match_rates() {
        let config = ModelConfig::default();
        let sources = sources_with_current(50, split((10, 25.0, 8.0), (9, 18.0, 9.0)));
        let store = ProfileStore::build(&FxHashMap::default(), &sources, &config);

        let profile = store.get(50).unwrap();
        assert_float_absolute_eq!(2.5, profile.goals.scored.home);
        assert_float_absolute_eq!(0.8, profile.goals.conceded.home);
        assert_float_absolute_eq!(2.0, profile.goals.scored.away);
        assert_float_absolute_eq!(1.0, profile.goals.conceded.away);
    }

    #[test]
    fn zero_match_blocks_resolve_to_zero_rates() {
        let config = ModelConfig::default();
        let sources = sources_with_current(50, split((0, 0.0, 0.0), (0, 0.0, 0.0)));
        let store = ProfileStore::build(&FxHashMap::default(), &sources, &config);

        let profile = store.get(50).unwrap();
        assert_eq!(0.0, profile.goals.scored.home);
        assert_eq!(0.0, profile.goals.conceded.away);
        assert!(profile.goals.scored.home.is_finite());
    }

    #[test]
    fn season_blend_combines_current_and_prior() {
        let config = ModelConfig::default();
        let mut sources = sources_with_current(50, split((10, 20.0, 10.0), (10, 10.0, 10.0)));
        sources
            .prior
            .insert(50, SplitStats { team_id: 50, ..split((19, 19.0, 19.0), (19, 19.0, 19.0)) });
        let store = ProfileStore::build(&FxHashMap::default(), &sources, &config);

        let profile = store.get(50).unwrap();
        // current 2.0/match at home, prior 1.0/match: 0.65 * 2.0 + 0.35 * 1.0
        assert_float_absolute_eq!(1.65, profile.goals.scored.home);
    }

    #[test]
    fn prior_only_scope_passes_through_unweighted() {
        let config = ModelConfig::default();
        let mut sources = StatsSources::default();
        sources
            .prior
            .insert(50, SplitStats { team_id: 50, ..split((10, 15.0, 5.0), (8, 8.0, 12.0)) });
        let store = ProfileStore::build(&FxHashMap::default(), &sources, &config);

        let profile = store.get(50).unwrap();
        assert_float_absolute_eq!(1.5, profile.goals.scored.home);
        assert_float_absolute_eq!(1.0, profile.goals.scored.away);
        assert_float_absolute_eq!(1.5, profile.goals.conceded.away);
    }

    #[test]
    fn competition_blend_folds_in_continental_scope() {
        let config = ModelConfig::default();
        let mut sources = sources_with_current(50, split((10, 20.0, 10.0), (10, 10.0, 10.0)));
        sources
            .continental
            .insert(50, SplitStats { team_id: 50, ..split((3, 9.0, 3.0), (3, 3.0, 3.0)) });
        let store = ProfileStore::build(&FxHashMap::default(), &sources, &config);

        let profile = store.get(50).unwrap();
        // domestic 2.0/match at home, continental 2.0/match overall: 0.8 * 2.0 + 0.2 * 2.0
        assert_float_absolute_eq!(2.0, profile.goals.scored.home);
        // domestic 1.0/match away, continental 2.0/match overall
        assert_float_absolute_eq!(0.8 * 1.0 + 0.2 * 2.0, profile.goals.scored.away);
    }

    #[test]
    fn goals_prefer_split_source_over_manual() {
        let config = ModelConfig::default();
        let mut sources = sources_with_current(50, split((10, 20.0, 10.0), (10, 10.0, 10.0)));
        sources.manual.insert(
            50,
            OverallRow {
                id: 50,
                scored: Some(9.9),
                conceded: Some(9.9),
                corners: Some(5.5),
                corners_conceded: Some(4.5),
                ..OverallRow::default()
            },
        );
        let store = ProfileStore::build(&FxHashMap::default(), &sources, &config);

        let profile = store.get(50).unwrap();
        assert_float_absolute_eq!(2.0, profile.goals.scored.home);
        // corners only exist in the manual source and merge in field-by-field
        assert_eq!(5.5, profile.corners.scored.home);
        assert_eq!(5.5, profile.corners.scored.away);
        assert_eq!(4.5, profile.corners.conceded.home);
    }

    #[test]
    fn manual_goals_fill_in_when_split_scopes_lack_support() {
        let config = ModelConfig::default();
        let mut sources = sources_with_current(50, split((0, 0.0, 0.0), (0, 0.0, 0.0)));
        sources.manual.insert(
            50,
            OverallRow {
                id: 50,
                scored: Some(1.7),
                conceded: Some(1.1),
                ..OverallRow::default()
            },
        );
        let store = ProfileStore::build(&FxHashMap::default(), &sources, &config);

        let profile = store.get(50).unwrap();
        assert_eq!(1.7, profile.goals.scored.home);
        assert_eq!(1.7, profile.goals.scored.away);
        assert_eq!(1.1, profile.goals.conceded.home);
    }

    #[test]
    fn team_absent_from_all_sources_is_reported_missing() {
        let store = ProfileStore::build(
            &FxHashMap::default(),
            &StatsSources::default(),
            &ModelConfig::default(),
        );
        assert!(store.get(404).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn identity_prefers_team_list_over_manual_row() {
        let config = ModelConfig::default();
        let mut teams = FxHashMap::default();
        teams.insert(
            50,
            TeamEntry {
                id: 50,
                name: "Manchester City".into(),
                league: "Premier League".into(),
            },
        );
        let mut sources = StatsSources::default();
        sources.manual.insert(
            50,
            OverallRow {
                id: 50,
                name: Some("Man City".into()),
                league: Some("EPL".into()),
                ..OverallRow::default()
            },
        );
        let store = ProfileStore::build(&teams, &sources, &config);

        let profile = store.get(50).unwrap();
        assert_eq!("Manchester City", profile.name);
        assert_eq!("Premier League", profile.league);
    }
}
