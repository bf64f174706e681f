//! The projection engine: an immutable statistics context constructed once per
//! pipeline run and shared, read-only, across every fixture. Each fixture's
//! projection depends only on this context and its own two team ids, so a batch has
//! no cross-fixture ordering and a failed fixture never aborts the rest.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::adjust::{adjust, FixtureContext};
use crate::config::ModelConfig;
use crate::data::{Boosters, H2hTable, LeagueCoefficients};
use crate::domain::Fixture;
use crate::market::{summarise, SimulationResult};
use crate::profile::ProfileStore;
use crate::sim::{fixture_seed, simulate};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("no statistics for team {team_id} in any source")]
    MissingProfile { team_id: u32 },
}

/// One projected fixture, ready for the downstream rendering layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectionRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture_id: Option<u64>,
    pub home: String,
    pub away: String,
    #[serde(flatten)]
    pub result: SimulationResult,
}

/// A fixture that could not be projected, with the reason.
#[derive(Clone, Debug, PartialEq)]
pub struct FixtureFailure {
    pub fixture: Fixture,
    pub error: ProjectionError,
}

/// The outcome of a batch run: projected fixtures in input order, failures
/// reported per fixture and omitted from the output collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchOutcome {
    pub records: Vec<ProjectionRecord>,
    pub failures: Vec<FixtureFailure>,
}

pub struct ProjectionEngine {
    config: ModelConfig,
    profiles: ProfileStore,
    coefficients: LeagueCoefficients,
    boosters: Boosters,
    h2h: H2hTable,
}
impl ProjectionEngine {
    pub fn new(
        profiles: ProfileStore,
        coefficients: LeagueCoefficients,
        boosters: Boosters,
        h2h: H2hTable,
        config: ModelConfig,
    ) -> Self {
        Self {
            config,
            profiles,
            coefficients,
            boosters,
            h2h,
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Projects one fixture: resolve both profiles, adjust, simulate, summarise.
    pub fn project(&self, fixture: &Fixture) -> Result<ProjectionRecord, ProjectionError> {
        let home = self
            .profiles
            .get(fixture.home_id)
            .ok_or(ProjectionError::MissingProfile {
                team_id: fixture.home_id,
            })?;
        let away = self
            .profiles
            .get(fixture.away_id)
            .ok_or(ProjectionError::MissingProfile {
                team_id: fixture.away_id,
            })?;

        let context = FixtureContext {
            home,
            away,
            home_coef: self.coefficients.get(&home.league),
            away_coef: self.coefficients.get(&away.league),
            home_booster: self.boosters.get(fixture.home_id),
            away_booster: self.boosters.get(fixture.away_id),
            h2h: self.h2h.get(fixture.home_id, fixture.away_id),
        };
        let expectation = adjust(&context, &self.config);
        debug!(
            "{} vs {}: λ(goals)={:.2}/{:.2}",
            home.name, away.name, expectation.home.goals, expectation.away.goals
        );

        let seed = fixture_seed(fixture.fixture_id, self.config.default_seed);
        let samples = simulate(&expectation, self.config.trials, seed);
        Ok(ProjectionRecord {
            fixture_id: fixture.fixture_id,
            home: home.name.clone(),
            away: away.name.clone(),
            result: summarise(&samples, &self.config),
        })
    }

    /// Projects a batch of fixtures. Failures are logged and collected; they never
    /// abort the remaining fixtures.
    pub fn project_batch(&self, fixtures: &[Fixture]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for fixture in fixtures {
            match self.project(fixture) {
                Ok(record) => outcome.records.push(record),
                Err(error) => {
                    warn!(
                        "skipping fixture {:?} ({} vs {}): {error}",
                        fixture.fixture_id, fixture.home_id, fixture.away_id
                    );
                    outcome.failures.push(FixtureFailure {
                        fixture: fixture.clone(),
                        error,
                    });
                }
            }
        }
        info!(
            "projected {} fixture(s), {} skipped",
            outcome.records.len(),
            outcome.failures.len()
        );
        outcome
    }
}
